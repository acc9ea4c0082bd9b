/// Common constants used across the FormFold crate.
///
/// The tree limits bound schema-authoring payloads before a tree is accepted
/// as canonical; the paging bounds apply to submission listings.
pub const MAX_TREE_DEPTH: usize = 16;
pub const MAX_TREE_FIELDS: usize = 256;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
