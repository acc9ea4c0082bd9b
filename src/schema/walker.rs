//! Depth-first traversal over field trees.

use crate::schema::types::field::FieldVariant;

/// Visits every field in the tree depth-first: each field before its
/// options' nested fields, options in declared order, siblings in list
/// order.
pub fn walk_fields<'a>(fields: &'a [FieldVariant], visitor: &mut dyn FnMut(&'a FieldVariant)) {
    for field in fields {
        visitor(field);
        for option in field.options() {
            walk_fields(&option.nested_fields, visitor);
        }
    }
}

/// Mutable counterpart of [`walk_fields`], same visit order.
pub fn walk_fields_mut(fields: &mut [FieldVariant], visitor: &mut dyn FnMut(&mut FieldVariant)) {
    for field in fields.iter_mut() {
        visitor(field);
        if let Some(options) = field.options_mut() {
            for option in options.iter_mut() {
                walk_fields_mut(&mut option.nested_fields, visitor);
            }
        }
    }
}
