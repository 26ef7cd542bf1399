use std::sync::Arc;

/// Blocklist check for offensive language in a chat turn.
#[derive(Clone)]
pub struct AbuseFilter {
    terms: Arc<Vec<String>>,
}

impl AbuseFilter {
    pub fn new(terms: Arc<Vec<String>>) -> Self {
        Self { terms }
    }

    /// First blocklisted term contained in `text`, if any.
    pub fn matched_term(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .find(|t| lowered.contains(t.as_str()))
            .map(String::as_str)
    }

    pub fn is_abusive(&self, text: &str) -> bool {
        self.matched_term(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::replies::builtin_blocklist;

    fn filter() -> AbuseFilter {
        AbuseFilter::new(Arc::new(builtin_blocklist()))
    }

    #[test]
    fn test_flags_blocklisted_terms() {
        assert!(filter().is_abusive("you are stupid"));
        assert!(filter().is_abusive("This is USELESS"));
        assert_eq!(filter().matched_term("what nonsense"), Some("nonsense"));
    }

    #[test]
    fn test_clean_text_passes() {
        assert!(!filter().is_abusive("I feel anxious today"));
        assert!(!filter().is_abusive(""));
    }
}
