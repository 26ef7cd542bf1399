use std::collections::BTreeMap;

/// Name of the per-turn set filled from the content assistant's suggestions.
pub const REMOTE_SET: &str = "remote";
pub const INITIAL_SET: &str = "initial";

#[derive(Debug, Clone)]
pub struct SuggestionBook {
    sets: BTreeMap<String, Vec<String>>,
}

impl SuggestionBook {
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    /// Falls back to the initial set for names the book does not know.
    pub fn get_or_initial(&self, name: &str) -> &[String] {
        self.get(name)
            .or_else(|| self.get(INITIAL_SET))
            .unwrap_or(&[])
    }

    pub fn builtin() -> Self {
        let sets: [(&str, [&str; 4]); 7] = [
            (
                "initial",
                ["I'm feeling anxious today", "Help me sleep better", "Breathing exercises", "Daily meditation tips"],
            ),
            (
                "anxiety",
                ["Breathing techniques", "Quick meditation", "Grounding exercises", "Talk to a professional"],
            ),
            (
                "sleep",
                ["Bedtime routine", "Relaxation techniques", "Sleep meditation", "Sleep sounds"],
            ),
            (
                "meditation",
                ["Beginner meditation", "Guided meditation", "Mindfulness practice", "Deep focus"],
            ),
            (
                "depression",
                ["Mood-lifting activities", "Self-care ideas", "Talk about depression", "Connect with others"],
            ),
            (
                "stress",
                ["Stress reduction", "Work-life balance", "Relaxation techniques", "Time management"],
            ),
            (
                "crisis",
                ["Crisis resources", "Grounding exercise", "Reasons to stay", "Contact support"],
            ),
        ];

        Self {
            sets: sets
                .iter()
                .map(|(name, replies)| {
                    (name.to_string(), replies.iter().map(|r| r.to_string()).collect())
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let book = SuggestionBook::builtin();
        assert_eq!(book.get("crisis").unwrap()[0], "Crisis resources");
        assert!(book.get(REMOTE_SET).is_none());
        assert_eq!(book.get_or_initial("unknown")[0], "I'm feeling anxious today");
    }
}
