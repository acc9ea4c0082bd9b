//! Global invariants over a normalized field tree.
//!
//! These checks run after normalization and before a tree is accepted as
//! canonical. A violation aborts the whole operation; no partially valid
//! tree is ever committed.

use std::collections::HashSet;

use crate::constants::{MAX_TREE_DEPTH, MAX_TREE_FIELDS};
use crate::schema::types::field::Field;
use crate::schema::types::{FieldVariant, SchemaError};
use crate::schema::walker::walk_fields;

/// Ensures every field name is unique across the whole tree, including
/// names inside nested branches under different options.
///
/// Walks depth-first in sibling order, parents before children, options in
/// declared order; the first duplicate encountered is the one reported.
pub fn assert_unique_names(fields: &[FieldVariant]) -> Result<(), SchemaError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicate: Option<String> = None;
    walk_fields(fields, &mut |field| {
        if duplicate.is_none() && !seen.insert(field.name()) {
            duplicate = Some(field.name().to_string());
        }
    });
    match duplicate {
        Some(name) => Err(SchemaError::DuplicateFieldName(name)),
        None => Ok(()),
    }
}

/// Ensures names, labels, and option labels/values are present and that
/// names use only letters, numbers, and underscores.
pub fn assert_well_formed(fields: &[FieldVariant]) -> Result<(), SchemaError> {
    let mut problem: Option<SchemaError> = None;
    walk_fields(fields, &mut |field| {
        if problem.is_some() {
            return;
        }
        if field.name().is_empty() {
            problem = Some(SchemaError::InvalidField(
                "Field name cannot be empty".to_string(),
            ));
        } else if !field
            .name()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            problem = Some(SchemaError::InvalidField(format!(
                "Field name '{}' can only include letters, numbers, and underscores",
                field.name()
            )));
        } else if field.label().is_empty() {
            problem = Some(SchemaError::InvalidField(format!(
                "Field '{}' must have a label",
                field.name()
            )));
        } else if field
            .options()
            .iter()
            .any(|option| option.value.is_empty() || option.label.is_empty())
        {
            problem = Some(SchemaError::InvalidField(format!(
                "Field '{}' has an option without a label or value",
                field.name()
            )));
        }
    });
    match problem {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Bounds the tree against hostile payloads: maximum nesting depth and
/// maximum total field count.
pub fn assert_tree_limits(fields: &[FieldVariant]) -> Result<(), SchemaError> {
    let mut total = 0usize;
    check_level(fields, 1, &mut total)
}

fn check_level(
    fields: &[FieldVariant],
    depth: usize,
    total: &mut usize,
) -> Result<(), SchemaError> {
    if depth > MAX_TREE_DEPTH {
        return Err(SchemaError::NestingTooDeep {
            max: MAX_TREE_DEPTH,
        });
    }
    for field in fields {
        *total += 1;
        if *total > MAX_TREE_FIELDS {
            return Err(SchemaError::TreeTooLarge {
                max: MAX_TREE_FIELDS,
            });
        }
        for option in field.options() {
            if !option.nested_fields.is_empty() {
                check_level(&option.nested_fields, depth + 1, total)?;
            }
        }
    }
    Ok(())
}
