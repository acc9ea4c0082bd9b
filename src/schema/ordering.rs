//! Deterministic ordering of sibling fields.

use std::collections::HashMap;

use crate::schema::types::field::Field;
use crate::schema::types::FieldVariant;
use crate::schema::walker::walk_fields_mut;

/// Recursively sorts every sibling list ascending by `order`.
///
/// The sort is stable: fields sharing an `order` rank keep their prior
/// relative position.
pub fn sort_fields_in_place(fields: &mut [FieldVariant]) {
    fields.sort_by_key(|field| field.order());
    for field in fields.iter_mut() {
        if let Some(options) = field.options_mut() {
            for option in options.iter_mut() {
                sort_fields_in_place(&mut option.nested_fields);
            }
        }
    }
}

/// Re-ranks fields by their position in `ordered_names` (searching the
/// entire tree at any depth), then re-sorts every sibling list.
///
/// Names not present in the list keep their prior `order`; any resulting
/// rank collisions are resolved by sort stability.
pub fn apply_reorder(fields: &mut [FieldVariant], ordered_names: &[String]) {
    let ranks: HashMap<&str, u32> = ordered_names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index as u32))
        .collect();

    walk_fields_mut(fields, &mut |field| {
        if let Some(rank) = ranks.get(field.name()) {
            field.set_order(*rank);
        }
    });

    sort_fields_in_place(fields);
}
