use enum_dispatch::enum_dispatch;

use super::{KeyRules, base_key};
use crate::{
    ai::{AssistRequest, Assistant},
    issues::CollaboratorFailure,
};

/// A base key plus the collaborator failure that forced a fallback, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub base: String,
    pub failure: Option<CollaboratorFailure>,
}

#[enum_dispatch]
pub trait SuggestKey {
    /// Base key for `value`, without module prefix or collision suffix.
    fn suggest(&self, value: &str) -> Suggestion;
}

/// How base keys are produced, chosen once per run.
#[enum_dispatch(SuggestKey)]
pub enum KeyStrategy {
    Deterministic,
    Remote,
}

impl KeyStrategy {
    pub fn deterministic(rules: KeyRules) -> Self {
        Deterministic { rules }.into()
    }

    pub fn remote(assistant: Box<dyn Assistant>, rules: KeyRules, max_slug_length: usize) -> Self {
        Remote {
            assistant,
            fallback: Deterministic { rules },
            max_slug_length,
        }
        .into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Deterministic {
    pub rules: KeyRules,
}

impl SuggestKey for Deterministic {
    fn suggest(&self, value: &str) -> Suggestion {
        Suggestion {
            base: base_key(value, self.rules),
            failure: None,
        }
    }
}

/// Model-suggested English slugs with the deterministic key as fallback.
pub struct Remote {
    assistant: Box<dyn Assistant>,
    fallback: Deterministic,
    max_slug_length: usize,
}

impl SuggestKey for Remote {
    fn suggest(&self, value: &str) -> Suggestion {
        let request = AssistRequest::key_slug(value, self.max_slug_length);
        let min_length = self.fallback.rules.min_length;

        let result = self.assistant.respond(&request).and_then(|answer| {
            sanitize_slug(&answer, self.max_slug_length, min_length).ok_or_else(|| {
                CollaboratorFailure::Malformed(format!("unusable key suggestion {:?}", answer))
            })
        });

        match result {
            Ok(base) => Suggestion {
                base,
                failure: None,
            },
            Err(failure) => {
                tracing::warn!(%failure, value, "key suggestion failed, using deterministic key");
                Suggestion {
                    failure: Some(failure),
                    ..self.fallback.suggest(value)
                }
            }
        }
    }
}

/// Reduce a model answer to `[a-z0-9_]`, at most `max_length` characters.
///
/// Returns `None` when fewer than `min_length` characters survive.
pub fn sanitize_slug(answer: &str, max_length: usize, min_length: usize) -> Option<String> {
    let first_line = answer.lines().find(|line| !line.trim().is_empty())?;

    let mut slug = String::new();
    let mut pending_separator = false;
    for c in first_line.trim().trim_matches('`').chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug.truncate(max_length);
    let slug = slug.trim_end_matches('_').to_string();
    (slug.len() >= min_length).then_some(slug)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    struct Canned {
        answer: Result<String, CollaboratorFailure>,
        seen: RefCell<Vec<AssistRequest>>,
    }

    impl Assistant for Canned {
        fn respond(&self, request: &AssistRequest) -> Result<String, CollaboratorFailure> {
            self.seen.borrow_mut().push(request.clone());
            self.answer.clone()
        }
    }

    fn remote(answer: Result<&str, CollaboratorFailure>) -> KeyStrategy {
        KeyStrategy::remote(
            Box::new(Canned {
                answer: answer.map(str::to_string),
                seen: RefCell::new(Vec::new()),
            }),
            KeyRules::default(),
            40,
        )
    }

    #[test]
    fn test_sanitize_slug() {
        assert_eq!(
            sanitize_slug("User Not Found", 40, 3).as_deref(),
            Some("user_not_found")
        );
        assert_eq!(
            sanitize_slug("`save-button`\nexplanation", 40, 3).as_deref(),
            Some("save_button")
        );
        assert_eq!(
            sanitize_slug("a_very_long_identifier_name", 10, 3).as_deref(),
            Some("a_very_lon")
        );
        assert_eq!(sanitize_slug("abcdefghi_jk", 10, 3).as_deref(), Some("abcdefghi"));
        assert_eq!(sanitize_slug("好", 40, 3), None);
        assert_eq!(sanitize_slug("   ", 40, 3), None);
    }

    #[test]
    fn test_deterministic_strategy() {
        let strategy = KeyStrategy::deterministic(KeyRules::default());
        assert_eq!(
            strategy.suggest("用户不存在"),
            Suggestion {
                base: "用户不存在".to_string(),
                failure: None
            }
        );
    }

    #[test]
    fn test_remote_strategy_uses_model_slug() {
        let strategy = remote(Ok("User Not Found"));
        assert_eq!(strategy.suggest("用户不存在").base, "user_not_found");
    }

    #[test]
    fn test_remote_strategy_falls_back_on_failure() {
        let suggestion = remote(Err(CollaboratorFailure::Timeout)).suggest("用户不存在");
        assert_eq!(suggestion.base, "用户不存在");
        assert_eq!(suggestion.failure, Some(CollaboratorFailure::Timeout));
    }

    #[test]
    fn test_remote_strategy_rejects_unusable_answer() {
        let suggestion = remote(Ok("？")).suggest("用户不存在");
        assert_eq!(suggestion.base, "用户不存在");
        assert!(matches!(
            suggestion.failure,
            Some(CollaboratorFailure::Malformed(_))
        ));
    }
}
