//! Response selector: picks a canned reply and a quick-reply set for one turn.

use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::replies::{
    CIVILITY_REPLY, CRISIS_FALLBACK_REPLY, DEFAULT_REPLY, GAMES_ACK, MEDITATION_ACK, MUSIC_ACK,
};
use crate::catalog::suggestions::INITIAL_SET;
use crate::catalog::{ContentKind, ResponseRule, TipBook};
use crate::domain::{AnalysisResult, ConcernCategory};
use crate::services::moderation::AbuseFilter;
use crate::services::rules::{Cascade, Matcher, RuleTable};

/// Source of the index used to pick a personalised tip.
pub trait TipPicker: Send + Sync {
    /// Must return a value below `len`; `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

pub struct RandomPicker;

impl TipPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the list).
pub struct FixedPicker(pub usize);

impl TipPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Whether the civility filter or crisis detection runs first when a message
/// contains both an offensive term and crisis language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecedencePolicy {
    #[default]
    CivilityFirst,
    CrisisFirst,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectedResponse {
    pub text: String,
    pub suggestion_set: String,
    pub content_request: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentKind>,
}

impl SelectedResponse {
    fn reply(text: impl Into<String>, suggestion_set: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion_set: suggestion_set.into(),
            content_request: false,
            content_type: None,
        }
    }

    fn content(text: &str, kind: ContentKind) -> Self {
        Self {
            text: text.to_string(),
            suggestion_set: INITIAL_SET.to_string(),
            content_request: true,
            content_type: Some(kind),
        }
    }
}

type Stages = Cascade<ResponseSelector, AnalysisResult, SelectedResponse>;

pub struct ResponseSelector {
    abuse: AbuseFilter,
    content_requests: RuleTable<ContentKind>,
    rules: RuleTable<ResponseRule>,
    tips: Arc<TipBook>,
    picker: Arc<dyn TipPicker>,
    stages: Stages,
}

impl ResponseSelector {
    pub fn new(
        rules: &[ResponseRule],
        abuse: AbuseFilter,
        tips: Arc<TipBook>,
        picker: Arc<dyn TipPicker>,
        policy: PrecedencePolicy,
    ) -> Result<Self, regex::Error> {
        let mut table = RuleTable::new();
        for rule in rules {
            table.push(Matcher::word_starts(&rule.patterns[..])?, rule.clone());
        }

        // Substring match like the navigation hints, so plurals and
        // inflections ("meditations", "listening") count. Music is checked
        // before meditation before games.
        let content_requests = RuleTable::new()
            .with(
                Matcher::keywords(&["music", "song", "play music", "listen"]),
                ContentKind::Music,
            )
            .with(
                Matcher::keywords(&["meditation", "meditate", "mindfulness session"]),
                ContentKind::Meditations,
            )
            .with(
                Matcher::keywords(&["game", "play game", "puzzle"]),
                ContentKind::Games,
            );

        let stages: Stages = match policy {
            PrecedencePolicy::CivilityFirst => Cascade::new()
                .stage("civility", civility)
                .stage("crisis", crisis),
            PrecedencePolicy::CrisisFirst => Cascade::new()
                .stage("crisis", crisis)
                .stage("civility", civility),
        };
        let stages = stages
            .stage("content_request", content_request)
            .stage("rule_table", rule_table)
            .stage("concern_tip", concern_tip);

        Ok(Self {
            abuse,
            content_requests,
            rules: table,
            tips,
            picker,
            stages,
        })
    }

    /// Stage names in evaluation order; the default reply follows the last one.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.names()
    }

    pub fn select_response(&self, text: &str, analysis: &AnalysisResult) -> SelectedResponse {
        let lowered = text.to_lowercase();
        match self.stages.run(self, &lowered, analysis) {
            Some((stage, response)) => {
                tracing::debug!(
                    "Reply selected by stage '{}' (set '{}')",
                    stage,
                    response.suggestion_set
                );
                response
            }
            None => SelectedResponse::reply(DEFAULT_REPLY, INITIAL_SET),
        }
    }
}

fn civility(selector: &ResponseSelector, lowered: &str, _: &AnalysisResult) -> Option<SelectedResponse> {
    selector
        .abuse
        .is_abusive(lowered)
        .then(|| SelectedResponse::reply(CIVILITY_REPLY, INITIAL_SET))
}

fn crisis(_: &ResponseSelector, _: &str, analysis: &AnalysisResult) -> Option<SelectedResponse> {
    analysis.has_crisis.then(|| {
        let text = analysis.message.as_deref().unwrap_or(CRISIS_FALLBACK_REPLY);
        SelectedResponse::reply(text, ConcernCategory::Crisis.as_str())
    })
}

fn content_request(
    selector: &ResponseSelector,
    lowered: &str,
    _: &AnalysisResult,
) -> Option<SelectedResponse> {
    let kind = *selector.content_requests.first_match(lowered)?;
    let ack = match kind {
        ContentKind::Music => MUSIC_ACK,
        ContentKind::Meditations => MEDITATION_ACK,
        ContentKind::Games | ContentKind::Breathing => GAMES_ACK,
    };
    Some(SelectedResponse::content(ack, kind))
}

fn rule_table(selector: &ResponseSelector, lowered: &str, _: &AnalysisResult) -> Option<SelectedResponse> {
    selector.rules.first_match(lowered).map(|rule| {
        SelectedResponse::reply(rule.response_text.clone(), rule.suggestion_set.clone())
    })
}

fn concern_tip(selector: &ResponseSelector, _: &str, analysis: &AnalysisResult) -> Option<SelectedResponse> {
    let concern = analysis.primary_concern();
    if concern == ConcernCategory::General {
        return None;
    }
    let tips = selector.tips.tips_for(concern);
    if tips.is_empty() {
        return None;
    }
    let tip = tips.get(selector.picker.pick(tips.len()))?;
    let name = concern.as_str();
    Some(SelectedResponse::reply(
        format!(
            "It sounds like you might be dealing with some {name}-related concerns. {tip} Would you like to explore more resources for {name}?"
        ),
        name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::replies::{builtin_blocklist, builtin_rules};
    use crate::catalog::{ConcernTable, ResourceLibrary};
    use crate::services::concern::ConcernAnalyzer;

    fn selector_with(policy: PrecedencePolicy, picker: usize) -> ResponseSelector {
        ResponseSelector::new(
            &builtin_rules(),
            AbuseFilter::new(Arc::new(builtin_blocklist())),
            Arc::new(TipBook::builtin()),
            Arc::new(FixedPicker(picker)),
            policy,
        )
        .unwrap()
    }

    fn respond(text: &str) -> SelectedResponse {
        respond_with(PrecedencePolicy::CivilityFirst, text)
    }

    fn respond_with(policy: PrecedencePolicy, text: &str) -> SelectedResponse {
        let analyzer =
            ConcernAnalyzer::new(&ConcernTable::builtin(), Arc::new(ResourceLibrary::builtin()));
        let analysis = analyzer.analyze(text);
        selector_with(policy, 0).select_response(text, &analysis)
    }

    #[test]
    fn test_stage_order_follows_policy() {
        assert_eq!(
            selector_with(PrecedencePolicy::CivilityFirst, 0).stage_names(),
            vec!["civility", "crisis", "content_request", "rule_table", "concern_tip"]
        );
        assert_eq!(
            selector_with(PrecedencePolicy::CrisisFirst, 0).stage_names()[..2],
            ["crisis", "civility"]
        );
    }

    #[test]
    fn test_abuse_wins_over_everything_by_default() {
        for text in ["you are stupid", "this is useless, I want to kill myself", "stupid music"] {
            let response = respond(text);
            assert_eq!(response.text, CIVILITY_REPLY);
            assert_eq!(response.suggestion_set, "initial");
            assert!(!response.content_request);
        }
    }

    #[test]
    fn test_crisis_first_policy_lets_crisis_through() {
        let response = respond_with(PrecedencePolicy::CrisisFirst, "this is useless, I want to kill myself");
        assert_eq!(response.suggestion_set, "crisis");
        assert_eq!(response.text, crate::catalog::concerns::CRISIS_MESSAGE);
    }

    #[test]
    fn test_crisis_beats_content_requests_and_rules() {
        for text in ["I want to kill myself", "hello, I want to end it all", "play music, I want to die"] {
            let response = respond(text);
            assert_eq!(response.suggestion_set, "crisis", "text: {text}");
            assert_eq!(response.text, crate::catalog::concerns::CRISIS_MESSAGE);
            assert!(!response.content_request);
        }
    }

    #[test]
    fn test_content_requests() {
        let music = respond("Can you recommend a song?");
        assert!(music.content_request);
        assert_eq!(music.content_type, Some(ContentKind::Music));
        assert_eq!(music.text, MUSIC_ACK);
        assert_eq!(music.suggestion_set, "initial");

        let meditation = respond("Recommend guided meditations");
        assert_eq!(meditation.content_type, Some(ContentKind::Meditations));

        let games = respond("Tell me about games");
        assert_eq!(games.content_type, Some(ContentKind::Games));
        assert_eq!(games.text, GAMES_ACK);

        // music is tested before games
        let both = respond("a music game");
        assert_eq!(both.content_type, Some(ContentKind::Music));
    }

    #[test]
    fn test_content_requests_accept_inflected_words() {
        let cases = [
            ("Show me some meditations", ContentKind::Meditations),
            ("I'm listening to relaxing tracks", ContentKind::Music),
            ("any musical ideas?", ContentKind::Music),
            ("favourite songs for a rainy day", ContentKind::Music),
        ];
        for (text, kind) in cases {
            let response = respond(text);
            assert!(response.content_request, "text: {text}");
            assert_eq!(response.content_type, Some(kind), "text: {text}");
            assert_ne!(response.text, DEFAULT_REPLY);
        }
    }

    #[test]
    fn test_rule_replies_accept_inflected_words() {
        for text in ["I keep panicking at work", "everything feels so stressful"] {
            let response = respond(text);
            assert_eq!(response.suggestion_set, "anxiety", "text: {text}");
            assert!(response.text.starts_with("I notice you're feeling anxious"), "text: {text}");
        }
    }

    #[test]
    fn test_rule_table_replies() {
        let greeting = respond("Hello there");
        assert_eq!(greeting.suggestion_set, "initial");
        assert!(greeting.text.starts_with("Hello!"));

        let anxious = respond("I'm feeling anxious today");
        assert_eq!(anxious.suggestion_set, "anxiety");

        let hygiene = respond("Help me sleep better");
        assert!(hygiene.text.starts_with("Good sleep hygiene"));
        assert_eq!(hygiene.suggestion_set, "sleep");

        let low = respond("I feel so down");
        assert_eq!(low.suggestion_set, "depression");

        let technique = respond("how to meditate");
        // "meditate" is a content request before the rule table is consulted
        assert!(technique.content_request);

        let mindful = respond("I want to be more mindful");
        assert_eq!(mindful.suggestion_set, "meditation");
    }

    #[test]
    fn test_greeting_needs_word_start() {
        // "this" and "think" contain "hi" but are not greetings
        let response = respond("I think this is fine");
        assert_eq!(response.text, DEFAULT_REPLY);
    }

    #[test]
    fn test_concern_tip_fallback_is_pinned_by_picker() {
        // "worry" is an anxiety keyword that no reply rule mentions
        let analyzer =
            ConcernAnalyzer::new(&ConcernTable::builtin(), Arc::new(ResourceLibrary::builtin()));
        let text = "I worry all the time";
        let analysis = analyzer.analyze(text);

        let first = selector_with(PrecedencePolicy::CivilityFirst, 0).select_response(text, &analysis);
        assert_eq!(first.suggestion_set, "anxiety");
        assert!(first.text.starts_with("It sounds like you might be dealing with some anxiety-related concerns."));
        assert!(first.text.contains("4-7-8 breathing"));

        let last = selector_with(PrecedencePolicy::CivilityFirst, 99).select_response(text, &analysis);
        assert!(last.text.contains("catastrophic thinking"));
    }

    #[test]
    fn test_default_reply() {
        for text in ["", "   ", "?!", "Quelle heure est-il"] {
            let response = respond(text);
            assert_eq!(response.text, DEFAULT_REPLY);
            assert_eq!(response.suggestion_set, "initial");
            assert!(response.content_type.is_none());
        }
    }
}
