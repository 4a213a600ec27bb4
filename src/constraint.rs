//! Constraint name generation and duplicate merging.
//!
//! Editors hand over one constraint entry per participating column. Entries
//! sharing a name are the same constraint and get folded into a single
//! multi-column one before any SQL is written.

use std::collections::HashMap;

use log::debug;

use crate::descriptor::{ConstraintDescriptor, ConstraintKind};
use crate::naming::max_suffix;
use crate::synth::SynthError;

/// Stands for the table name in fragments built before the name is final.
pub const TABLE_NAME_PLACEHOLDER: &str = "<TABLE_NAME>";

/// `<STEM>_<TABLE_NAME>_<N>` with `N` past the highest suffix in `existing`.
pub fn generate_constraint_name<I, S>(kind: ConstraintKind, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stem = format!("{}_{}_", kind.name_stem(), TABLE_NAME_PLACEHOLDER);
    let next = max_suffix(&stem, existing) + 1;
    format!("{stem}{next}")
}

/// Name unnamed constraints and merge entries that share a name.
///
/// Output keeps first-seen order; a later entry with an already seen name is
/// dropped after its columns are appended to the retained one. Suffixes of
/// generated names are chosen against every name in the input, so a generated
/// name never collides with an explicit one further down the list.
pub fn deduplicate(
    constraints: &[ConstraintDescriptor],
) -> Result<Vec<ConstraintDescriptor>, SynthError> {
    let mut names: Vec<Option<String>> = constraints
        .iter()
        .map(|c| c.name().map(str::to_string))
        .collect();

    let mut merged: Vec<ConstraintDescriptor> = Vec::with_capacity(constraints.len());
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (index, source) in constraints.iter().enumerate() {
        let mut constraint = source.clone();

        let name = match names[index].clone() {
            Some(name) => name,
            None => {
                let kind = constraint
                    .kind
                    .ok_or(SynthError::MalformedConstraint { index })?;
                let generated = generate_constraint_name(kind, names.iter().flatten());
                debug!("generated constraint name {generated} for entry {index}");

                names[index] = Some(generated.clone());
                constraint.name = Some(generated.clone());
                constraint.generated_name = true;
                generated
            }
        };

        match first_seen.get(&name) {
            Some(&at) => {
                let origin = &mut merged[at];
                origin.columns.extend(constraint.columns);
                origin.ref_columns.extend(constraint.ref_columns);
                debug!(
                    "merged entry {index} into constraint {name} ({} columns)",
                    origin.column_count()
                );
            }
            None => {
                first_seen.insert(name, merged.len());
                merged.push(constraint);
            }
        }
    }

    Ok(merged)
}
