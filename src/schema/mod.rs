pub mod invariants;
pub mod locator;
pub mod normalizer;
pub mod ordering;
pub mod types;
pub mod walker;


// Re-export the tree primitives at the schema module level
pub use invariants::{assert_tree_limits, assert_unique_names, assert_well_formed};
pub use locator::{
    find_field_by_name, find_field_by_name_mut, remove_field_by_name, replace_field_by_name,
};
pub use normalizer::normalize_fields;
pub use ordering::{apply_reorder, sort_fields_in_place};
pub use walker::{walk_fields, walk_fields_mut};
