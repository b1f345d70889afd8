//! Back-filling of missing keys from the fallback locale.

use crate::types::{LocaleCollection, LocaleTree, TreeValue};

/// Returns `tree` with every key of `fallback` it lacks.
///
/// Keys already present in `tree` are never overwritten, except that a
/// leaf standing where the fallback has a subtree is replaced by that
/// subtree. Adopted keys are appended after the existing ones.
pub fn merge_fallback(tree: LocaleTree, fallback: &LocaleTree) -> LocaleTree {
    let mut merged = tree;

    for (key, value) in fallback.iter() {
        match value {
            TreeValue::Node(fallback_node) => match merged.get_mut(key) {
                Some(TreeValue::Node(existing)) => {
                    let current = std::mem::take(existing);
                    *existing = merge_fallback(current, fallback_node);
                }
                _ => {
                    merged.insert(key, value.clone());
                }
            },
            TreeValue::Leaf(_) => {
                if !merged.contains_key(key) {
                    merged.insert(key, value.clone());
                }
            }
        }
    }

    merged
}

/// Fills every locale except `fallback_locale` from the fallback locale's tree.
///
/// Does nothing when the collection has no `fallback_locale`.
pub fn apply_fallback(locales: &mut LocaleCollection, fallback_locale: &str) {
    let Some(fallback) = locales.get(fallback_locale).cloned() else {
        tracing::debug!(%fallback_locale, "fallback locale not present, skipping");
        return;
    };

    for (locale, tree) in locales.iter_mut() {
        if locale == fallback_locale {
            continue;
        }
        let current = std::mem::take(tree);
        *tree = merge_fallback(current, &fallback);
    }
}
