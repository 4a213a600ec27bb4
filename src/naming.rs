//! Generated names for new objects and unnamed constraints.

use log::debug;

use crate::objects::ObjectKind;

/// Highest numeric suffix among `names` that carry `stem`.
///
/// A name whose remainder after removing the stem is not a number, or is the
/// largest representable suffix, contributes nothing; it is logged and skipped.
/// The result is therefore always safe to increment.
pub fn max_suffix<I, S>(stem: &str, names: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut max = 0;

    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() || !name.contains(stem) {
            continue;
        }
        let suffix = name.replace(stem, "");
        match suffix.parse::<u32>() {
            Ok(u32::MAX) => debug!("ignoring name {name:?}: suffix has no successor"),
            Ok(n) => max = max.max(n),
            Err(e) => debug!("ignoring name {name:?}: suffix {suffix:?} is not a number ({e})"),
        }
    }

    max
}

/// `NEW_<TYPE>_<N>` with `N` one past the highest suffix already taken.
///
/// `siblings` is a snapshot of the names currently present in the category;
/// callers that share a live collection must take the snapshot themselves.
pub fn generate_name_for_object<I, S>(kind: ObjectKind, siblings: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stem = format!("NEW_{}_", kind.meta_tag());
    let next = max_suffix(&stem, siblings) + 1;
    format!("{stem}{next}")
}
