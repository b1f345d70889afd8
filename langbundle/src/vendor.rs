//! Relocation of package translations loaded from `lang/vendor`.
//!
//! The vendor directory is laid out as `vendor/<package>/<locale>/<group>`;
//! after relocation each group lives under
//! `<locale>.vendor.<package>.<group>` and the top-level `vendor` entry is
//! gone.

use crate::{
    loader::VENDOR,
    types::{LocaleCollection, LocaleTree, TreeValue},
};

/// Moves every vendor group into its locale's own `vendor` key.
///
/// Locales that only exist in the vendor tree are created. Leaves found
/// where a package or locale directory is expected are dropped.
pub fn relocate_vendor(locales: &mut LocaleCollection) {
    let Some(vendor) = locales.remove(VENDOR) else {
        return;
    };

    for (package, data) in vendor {
        let TreeValue::Node(data) = data else {
            continue;
        };
        for (locale, groups) in data {
            let TreeValue::Node(groups) = groups else {
                continue;
            };
            tracing::debug!(%package, %locale, "relocating vendor translations");

            let target = locales.get_or_insert_with(&locale, LocaleTree::new);
            let mut bucket = take_node(target, VENDOR);
            let mut package_tree = take_node(&mut bucket, &package);
            for (group, lang) in groups {
                package_tree.insert(group, lang);
            }
            bucket.insert(package.as_str(), TreeValue::Node(package_tree));
            target.insert(VENDOR, TreeValue::Node(bucket));
        }
    }
}

/// Takes the subtree at `key` out of `tree`, or an empty tree if there is none.
///
/// The key keeps its position, so writing the subtree back does not reorder.
fn take_node(tree: &mut LocaleTree, key: &str) -> LocaleTree {
    match tree.get_mut(key) {
        Some(TreeValue::Node(node)) => std::mem::take(node),
        _ => LocaleTree::new(),
    }
}
