//! Locate, replace, and remove fields anywhere in a canonical tree.
//!
//! All operations use the same depth-first order as the walker and act on
//! the first match: a field is checked before its options' nested lists,
//! earlier options before later ones. Removal does not renumber the
//! remaining siblings; callers re-sort when contiguous ranks matter.
//! Behavior on a non-normalized tree is undefined.

use crate::schema::types::field::Field;
use crate::schema::types::FieldVariant;

/// Finds the first field with the given name, at any depth.
pub fn find_field_by_name<'a>(fields: &'a [FieldVariant], name: &str) -> Option<&'a FieldVariant> {
    for field in fields {
        if field.name() == name {
            return Some(field);
        }
        for option in field.options() {
            if let Some(found) = find_field_by_name(&option.nested_fields, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable counterpart of [`find_field_by_name`].
pub fn find_field_by_name_mut<'a>(
    fields: &'a mut [FieldVariant],
    name: &str,
) -> Option<&'a mut FieldVariant> {
    for field in fields.iter_mut() {
        if field.name() == name {
            return Some(field);
        }
        if let Some(options) = field.options_mut() {
            for option in options.iter_mut() {
                if let Some(found) = find_field_by_name_mut(&mut option.nested_fields, name) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Replaces the first field with the given name, wherever it lives.
/// Returns whether a replacement happened.
pub fn replace_field_by_name(
    fields: &mut [FieldVariant],
    name: &str,
    replacement: FieldVariant,
) -> bool {
    match find_field_by_name_mut(fields, name) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

/// Removes the first field with the given name from its owning sibling
/// list. Returns whether a removal occurred.
pub fn remove_field_by_name(fields: &mut Vec<FieldVariant>, name: &str) -> bool {
    let mut index = 0;
    while index < fields.len() {
        if fields[index].name() == name {
            fields.remove(index);
            return true;
        }
        if let Some(options) = fields[index].options_mut() {
            for option in options.iter_mut() {
                if remove_field_by_name(&mut option.nested_fields, name) {
                    return true;
                }
            }
        }
        index += 1;
    }
    false
}
