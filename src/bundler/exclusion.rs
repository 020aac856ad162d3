//! Recursive exclusion-set resolution.

use std::collections::HashSet;

use crate::config::{GroupTable, NameList};
use crate::error::{BundleError, Result};

/// Flattens an exclusion declaration against the group table.
///
/// A name that matches a group expands, recursively, to that group's own
/// item list; any other name passes through as a literal exclusion. Whether
/// a name is a group is decided by table lookup at traversal time, so
/// groups may reference each other in any declaration order. Output keeps
/// traversal order and duplicates.
///
/// A group reaching itself through its own expansion fails with
/// [`BundleError::CyclicExclusion`].
pub fn exclusion_list(exclude: &NameList, groups: &GroupTable) -> Result<Vec<String>> {
    let mut expanding = HashSet::new();
    let mut flat = Vec::new();
    expand(&exclude.names(), groups, &mut expanding, &mut flat)?;
    Ok(flat)
}

fn expand(
    names: &[String],
    groups: &GroupTable,
    expanding: &mut HashSet<String>,
    out: &mut Vec<String>,
) -> Result<()> {
    for name in names {
        match groups.get(name) {
            Some(group) => {
                if !expanding.insert(name.clone()) {
                    return Err(BundleError::CyclicExclusion(name.clone()));
                }
                expand(&group.items.names(), groups, expanding, out)?;
                expanding.remove(name);
            }
            None => out.push(name.clone()),
        }
    }
    Ok(())
}

/// Renders the flattened exclusions as a `" - a - b"` expression suffix.
///
/// Empty exclusions render as an empty string so the result can always be
/// appended to a base expression.
pub fn exclusion_suffix(exclude: &NameList, groups: &GroupTable) -> Result<String> {
    let flat = exclusion_list(exclude, groups)?;
    if flat.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!(" - {}", flat.join(" - ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupSpec;

    fn table(entries: &[(&str, &[&str])]) -> GroupTable {
        entries
            .iter()
            .map(|(name, items)| {
                let spec: GroupSpec = serde_json::from_value(serde_json::json!({
                    "items": items.iter().copied().collect::<Vec<_>>(),
                }))
                .unwrap();
                (name.to_string(), spec)
            })
            .collect()
    }

    fn names(list: &[&str]) -> NameList {
        NameList::Names(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn literal_names_pass_through_in_order() {
        let groups = table(&[]);
        let flat = exclusion_list(&names(&["z", "a", "z"]), &groups).unwrap();
        assert_eq!(flat, vec!["z", "a", "z"]);
    }

    #[test]
    fn group_names_expand_to_their_items() {
        let groups = table(&[("vendor", &["a", "b"])]);
        let flat = exclusion_list(&names(&["vendor"]), &groups).unwrap();
        assert_eq!(flat, vec!["a", "b"]);
        let suffix = exclusion_suffix(&names(&["vendor"]), &groups).unwrap();
        assert_eq!(suffix, " - a - b");
    }

    #[test]
    fn nested_groups_expand_recursively() {
        let groups = table(&[("outer", &["inner", "x"]), ("inner", &["a", "b"])]);
        let flat = exclusion_list(&names(&["outer", "y"]), &groups).unwrap();
        assert_eq!(flat, vec!["a", "b", "x", "y"]);
    }

    #[test]
    fn shared_group_expands_once_per_reference() {
        let groups = table(&[("left", &["shared"]), ("right", &["shared"]), ("shared", &["s"])]);
        let flat = exclusion_list(&names(&["left", "right"]), &groups).unwrap();
        assert_eq!(flat, vec!["s", "s"]);
    }

    #[test]
    fn empty_exclusions_render_empty() {
        let groups = table(&[]);
        assert_eq!(exclusion_suffix(&names(&[]), &groups).unwrap(), "");
    }

    #[test]
    fn self_reference_is_a_cycle_error() {
        let groups = table(&[("loop", &["loop"])]);
        let err = exclusion_list(&names(&["loop"]), &groups).unwrap_err();
        assert!(matches!(err, BundleError::CyclicExclusion(name) if name == "loop"));
    }

    #[test]
    fn indirect_cycle_is_detected() {
        let groups = table(&[("a", &["b"]), ("b", &["a"])]);
        let err = exclusion_list(&names(&["a"]), &groups).unwrap_err();
        assert!(matches!(err, BundleError::CyclicExclusion(_)));
    }

    #[test]
    fn keyed_exclude_uses_its_keys() {
        let groups = table(&[("vendor", &["a"])]);
        let exclude: NameList =
            serde_json::from_value(serde_json::json!({"vendor": {}, "extra": true})).unwrap();
        // keyed form iterates in sorted key order
        let flat = exclusion_list(&exclude, &groups).unwrap();
        assert_eq!(flat, vec!["extra", "a"]);
    }
}
