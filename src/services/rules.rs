//! First-match-wins evaluation shared by the reply and content-intent logic.

use regex::Regex;

/// Text predicate. Input handed to `matches` is already lower-cased.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Plain substring containment of any keyword.
    Keywords(Vec<String>),
    /// Compiled pattern; see [`Matcher::word_starts`].
    Pattern(Regex),
}

impl Matcher {
    pub fn keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        Matcher::Keywords(
            keywords
                .iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Alternatives anchored at the start of a word only, so inflected forms
    /// still match: `["panic", "hi"]` → `(?i)\b(?:panic|hi)` hits "panicking"
    /// but not "this".
    pub fn word_starts<S: AsRef<str>>(words: &[S]) -> Result<Self, regex::Error> {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})"))?;
        Ok(Matcher::Pattern(regex))
    }

    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Matcher::Keywords(keywords) => keywords.iter().any(|k| lowered.contains(k.as_str())),
            Matcher::Pattern(regex) => regex.is_match(lowered),
        }
    }
}

/// Ordered `(matcher, value)` pairs; lookup returns the first match.
#[derive(Debug, Clone)]
pub struct RuleTable<T> {
    rules: Vec<(Matcher, T)>,
}

impl<T> Default for RuleTable<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> RuleTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, matcher: Matcher, value: T) {
        self.rules.push((matcher, value));
    }

    pub fn with(mut self, matcher: Matcher, value: T) -> Self {
        self.push(matcher, value);
        self
    }

    pub fn first_match(&self, lowered: &str) -> Option<&T> {
        self.rules
            .iter()
            .find(|(matcher, _)| matcher.matches(lowered))
            .map(|(_, value)| value)
    }
}

/// A named step of a [`Cascade`]: returns `Some` to claim the text.
pub struct Stage<S: ?Sized, A: ?Sized, O> {
    pub name: &'static str,
    pub apply: fn(&S, &str, &A) -> Option<O>,
}

/// Runs stages in order over one lower-cased text and stops at the first one
/// that produces an output. `S` holds the tables the stages read, `A` is any
/// per-call context besides the text.
pub struct Cascade<S: ?Sized, A: ?Sized, O> {
    stages: Vec<Stage<S, A, O>>,
}

impl<S: ?Sized, A: ?Sized, O> Default for Cascade<S, A, O> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<S: ?Sized, A: ?Sized, O> Cascade<S, A, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, name: &'static str, apply: fn(&S, &str, &A) -> Option<O>) -> Self {
        self.stages.push(Stage { name, apply });
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name).collect()
    }

    pub fn run(&self, state: &S, lowered: &str, ctx: &A) -> Option<(&'static str, O)> {
        self.stages
            .iter()
            .find_map(|stage| (stage.apply)(state, lowered, ctx).map(|out| (stage.name, out)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_substrings() {
        let m = Matcher::keywords(&["Kill Myself", "die"]);
        assert!(m.matches("i want to kill myself"));
        assert!(m.matches("studied"));
        assert!(!m.matches("hello"));
    }

    #[test]
    fn test_word_starts_anchor_the_front_only() {
        let m = Matcher::word_starts(&["hi", "can't get up"]).unwrap();
        assert!(m.matches("hi there"));
        assert!(m.matches("oh, hi!"));
        assert!(!m.matches("i think so"));
        assert!(!m.matches("this one"));
        assert!(m.matches("i can't get up today"));
    }

    #[test]
    fn test_word_starts_keep_suffixes() {
        let m = Matcher::word_starts(&["panic", "stress"]).unwrap();
        assert!(m.matches("i keep panicking at work"));
        assert!(m.matches("everything feels so stressful"));
        assert!(!m.matches("distress"));
    }

    #[test]
    fn test_words_escape_metacharacters() {
        let m = Matcher::word_starts(&["4-7-8", "a.b"]).unwrap();
        assert!(m.matches("try 4-7-8 breathing"));
        assert!(!m.matches("axb"));
    }

    #[test]
    fn test_rule_table_declaration_order_wins() {
        let table = RuleTable::new()
            .with(Matcher::keywords(&["sleep hygiene"]), "hygiene")
            .with(Matcher::keywords(&["sleep"]), "sleep");
        assert_eq!(table.first_match("tell me about sleep hygiene"), Some(&"hygiene"));
        assert_eq!(table.first_match("i can't sleep"), Some(&"sleep"));
        assert_eq!(table.first_match("nothing here"), None);
    }

    #[test]
    fn test_cascade_stops_at_first_claim() {
        fn short(_: &(), s: &str, _: &()) -> Option<&'static str> {
            (s.len() < 3).then_some("short")
        }
        fn has_x(_: &(), s: &str, _: &()) -> Option<&'static str> {
            s.contains('x').then_some("x")
        }
        let cascade: Cascade<(), (), &'static str> =
            Cascade::new().stage("short", short).stage("x", has_x);
        assert_eq!(cascade.names(), vec!["short", "x"]);
        assert_eq!(cascade.run(&(), "x", &()), Some(("short", "short")));
        assert_eq!(cascade.run(&(), "xyz", &()), Some(("x", "x")));
        assert_eq!(cascade.run(&(), "abc", &()), None);
    }
}
