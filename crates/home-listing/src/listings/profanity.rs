use std::collections::BTreeSet;
use std::sync::Arc;

use super::draft::HomeDraft;
use super::fields::PHOTO_FIELD;
use super::notify::{NotificationService, ToastOptions};

pub const PROFANITY_MESSAGE: &str = "Please remove inappropriate language from your listing.";

const DEFAULT_WORDS: &[&str] = &[
    "arse", "asshole", "bastard", "bitch", "bollocks", "crap", "damn", "dick", "fuck", "piss",
    "shit", "slut", "twat", "wanker",
];

/// Flags disallowed content anywhere in a draft.
pub trait ProfanityChecker: Send + Sync {
    fn contains_profanity(&self, draft: &HomeDraft) -> bool;
}

/// Case-insensitive whole-word match against a fixed word list.
///
/// When a notifier is attached the checker tells the user about the
/// violation itself; callers stay silent.
pub struct WordListChecker {
    words: BTreeSet<String>,
    notifier: Option<Arc<dyn NotificationService>>,
}

impl WordListChecker {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationService>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn offending_field<'a>(&self, draft: &'a HomeDraft) -> Option<&'a str> {
        // The photo is an encoded payload, not text the user typed.
        draft
            .iter()
            .filter(|(name, _)| *name != PHOTO_FIELD)
            .find_map(|(name, value)| {
                value
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|token| !token.is_empty())
                    .any(|token| self.words.contains(&token.to_lowercase()))
                    .then_some(name)
            })
    }
}

impl Default for WordListChecker {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl std::fmt::Debug for WordListChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordListChecker")
            .field("words", &self.words.len())
            .field("notifies", &self.notifier.is_some())
            .finish()
    }
}

impl ProfanityChecker for WordListChecker {
    fn contains_profanity(&self, draft: &HomeDraft) -> bool {
        let Some(field) = self.offending_field(draft) else {
            return false;
        };

        tracing::info!(field, "listing draft rejected for profanity");
        if let Some(notifier) = &self.notifier {
            notifier.error(PROFANITY_MESSAGE, ToastOptions::transient());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::notify::NotificationLog;

    fn draft(pairs: &[(&str, &str)]) -> HomeDraft {
        pairs.iter().copied().collect()
    }

    #[test]
    fn matches_whole_words_case_insensitively() {
        let checker = WordListChecker::default();
        assert!(checker.contains_profanity(&draft(&[("description", "Damn fine view!")])));
        assert!(!checker.contains_profanity(&draft(&[("city", "Scunthorpe")])));
        assert!(!checker.contains_profanity(&draft(&[("name", "Classic cottage")])));
    }

    #[test]
    fn checks_every_field_of_the_draft() {
        let checker = WordListChecker::new(["swamp"]);
        let flagged = draft(&[("name", "Lake House"), ("address", "1 Swamp Rd")]);
        assert!(checker.contains_profanity(&flagged));
    }

    #[test]
    fn encoded_photo_is_not_scanned() {
        let checker = WordListChecker::default();
        let listing = draft(&[
            ("name", "Lake House"),
            ("photo", "data:image/png;base64,AAA/shit+AAA"),
        ]);
        assert!(!checker.contains_profanity(&listing));

        let typed = draft(&[("description", "data:text/plain;base64,AAA/shit+AAA")]);
        assert!(checker.contains_profanity(&typed));
    }

    #[test]
    fn attached_notifier_receives_the_warning() {
        let log = NotificationLog::default();
        let checker = WordListChecker::default().with_notifier(Arc::new(log.clone()));

        assert!(checker.contains_profanity(&draft(&[("name", "crap shack")])));
        assert_eq!(log.messages(), vec![PROFANITY_MESSAGE]);

        assert!(!checker.contains_profanity(&draft(&[("name", "Lake House")])));
        assert_eq!(log.messages().len(), 1);
    }
}
