//! Entry Filter

use crate::grd::{Entry, ResourceTree};
use crate::i18n::limit::LimitSet;

/// Translatable entries in document order, restricted to `limit` when given.
///
/// Membership is an exact string match.
pub fn filter_entries<'t>(tree: &'t ResourceTree, limit: Option<&LimitSet>) -> Vec<&'t Entry> {
    tree.entries()
        .filter(|entry| entry.is_translatable())
        .filter(|entry| limit.map_or(true, |ids| ids.contains(&entry.id)))
        .collect()
}
