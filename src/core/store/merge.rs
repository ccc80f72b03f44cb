//! Order-preserving merge of extracted strings into a store.

use std::collections::HashSet;

use super::ConfigStore;
use crate::{
    core::{
        context::ExtractedString,
        keys::{KeyStrategy, SuggestKey, disambiguate, qualify},
    },
    issues::{CollaboratorFailureIssue, Issue},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// New entries, in the order they were appended.
    pub added: Vec<AddedEntry>,
    /// Extracted values already present under some key.
    pub already_present: usize,
    pub issues: Vec<Issue>,
}

/// Append every extracted value not yet in `store`, in discovery order.
///
/// Existing entries are never touched. New keys never collide with existing
/// or newly assigned ones.
pub fn merge_extracted(
    store: &mut ConfigStore,
    extracted: &[ExtractedString],
    strategy: &KeyStrategy,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let mut known_values: HashSet<String> = store.iter().map(|(_, v)| v.to_string()).collect();

    let mut ordered: Vec<&ExtractedString> = extracted.iter().collect();
    ordered.sort_by_key(|item| item.order);

    for item in ordered {
        if known_values.contains(&item.value) {
            outcome.already_present += 1;
            continue;
        }

        let suggestion = strategy.suggest(&item.value);
        if let Some(failure) = suggestion.failure {
            outcome.issues.push(
                CollaboratorFailureIssue {
                    path: item.occurrences.first().map(|o| o.path.clone()),
                    subject: format!("key for \"{}\"", item.value),
                    failure,
                }
                .into(),
            );
        }

        let candidate = qualify(item.module_prefix.as_deref(), &suggestion.base);
        let key = disambiguate(&candidate, |k| store.contains_key(k));

        store.insert(key.clone(), item.value.clone());
        known_values.insert(item.value.clone());
        outcome.added.push(AddedEntry {
            key,
            value: item.value.clone(),
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ai::{AssistRequest, Assistant},
        core::{context::Occurrence, keys::KeyRules},
        issues::CollaboratorFailure,
    };

    fn extracted(value: &str, order: usize, prefix: Option<&str>) -> ExtractedString {
        ExtractedString {
            value: value.to_string(),
            order,
            module_prefix: prefix.map(str::to_string),
            occurrences: vec![Occurrence {
                path: "src/A.java".to_string(),
                line: order + 1,
            }],
        }
    }

    fn deterministic() -> KeyStrategy {
        KeyStrategy::deterministic(KeyRules::default())
    }

    #[test]
    fn test_existing_value_is_not_readded() {
        let mut store = ConfigStore::new();
        store.insert("a.b", "已存在");

        let outcome = merge_extracted(&mut store, &[extracted("已存在", 0, None)], &deterministic());

        assert!(outcome.added.is_empty());
        assert_eq!(outcome.already_present, 1);
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![("a.b", "已存在")]);
    }

    #[test]
    fn test_new_entries_append_in_discovery_order() {
        let mut store = ConfigStore::new();
        store.insert("z_last", "最后");
        store.insert("a_first", "最先");

        let items = [
            extracted("第三个", 2, None),
            extracted("第一个", 0, None),
            extracted("第二个", 1, Some("order")),
        ];
        merge_extracted(&mut store, &items, &deterministic());

        assert_eq!(
            store.keys().collect::<Vec<_>>(),
            vec!["z_last", "a_first", "第一个", "order.第二个", "第三个"]
        );
    }

    #[test]
    fn test_key_collisions_get_suffixes() {
        let mut store = ConfigStore::new();
        store.insert("保存成功", "保存成功。");

        let items = [extracted("保存成功", 0, None), extracted("保存成功!", 1, None)];
        let outcome = merge_extracted(&mut store, &items, &deterministic());

        assert_eq!(
            outcome.added,
            vec![
                AddedEntry {
                    key: "保存成功_1".to_string(),
                    value: "保存成功".to_string()
                },
                AddedEntry {
                    key: "保存成功_2".to_string(),
                    value: "保存成功!".to_string()
                },
            ]
        );
    }

    struct Unreachable;

    impl Assistant for Unreachable {
        fn respond(&self, _: &AssistRequest) -> Result<String, CollaboratorFailure> {
            Err(CollaboratorFailure::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn test_collaborator_failure_is_recorded_and_falls_back() {
        let mut store = ConfigStore::new();
        let strategy = KeyStrategy::remote(Box::new(Unreachable), KeyRules::default(), 40);

        let outcome = merge_extracted(&mut store, &[extracted("用户不存在", 0, None)], &strategy);

        assert_eq!(store.get("用户不存在"), Some("用户不存在"));
        assert_eq!(outcome.issues.len(), 1);
        assert!(matches!(
            &outcome.issues[0],
            Issue::CollaboratorFailure(issue) if issue.path.as_deref() == Some("src/A.java")
        ));
    }
}
