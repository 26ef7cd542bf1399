//! One chat turn end to end: analyze, select a reply, and attach content
//! recommendations and navigation hints when the user asked for content.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::suggestions::REMOTE_SET;
use crate::catalog::{ReferenceData, SuggestionBook};
use crate::domain::{AnalysisResult, Message, NavigationHint, Sender};
use crate::services::assistant::ContentAssistant;
use crate::services::concern::ConcernAnalyzer;
use crate::services::moderation::AbuseFilter;
use crate::services::recommender::{ContentBundle, ContentRecommender};
use crate::services::responder::{PrecedencePolicy, ResponseSelector, SelectedResponse, TipPicker};
use crate::services::rules::Matcher;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanionReply {
    pub reply_text: String,
    pub suggestion_set_name: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<ContentBundle>,
    pub navigation_hints: Vec<NavigationHint>,
}

pub struct Companion {
    analyzer: ConcernAnalyzer,
    selector: ResponseSelector,
    recommender: ContentRecommender,
    assistant: ContentAssistant,
    abuse: AbuseFilter,
    suggestions: Arc<SuggestionBook>,
    navigation: Vec<(Matcher, NavigationHint)>,
}

impl Companion {
    pub fn new(
        data: &ReferenceData,
        picker: Arc<dyn TipPicker>,
        policy: PrecedencePolicy,
    ) -> Result<Self, regex::Error> {
        let abuse = AbuseFilter::new(data.blocklist.clone());
        let selector = ResponseSelector::new(
            &data.rules[..],
            abuse.clone(),
            data.tips.clone(),
            picker,
            policy,
        )?;

        Ok(Self {
            analyzer: ConcernAnalyzer::new(&data.concerns, data.resources.clone()),
            selector,
            recommender: ContentRecommender::new(data.content.clone(), data.topics.clone()),
            assistant: ContentAssistant::new(data.content.clone()),
            abuse,
            suggestions: data.suggestions.clone(),
            navigation: navigation_table(),
        })
    }

    pub fn analyzer(&self) -> &ConcernAnalyzer {
        &self.analyzer
    }

    pub fn selector(&self) -> &ResponseSelector {
        &self.selector
    }

    pub fn recommender(&self) -> &ContentRecommender {
        &self.recommender
    }

    pub fn suggestions(&self) -> &SuggestionBook {
        &self.suggestions
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyzer.analyze(text)
    }

    /// Answers a transcript message; bot messages are never answered.
    pub fn respond_to(&self, message: &Message) -> Option<CompanionReply> {
        match message.sender {
            Sender::User => Some(self.respond(&message.text)),
            Sender::Bot => None,
        }
    }

    pub fn respond(&self, text: &str) -> CompanionReply {
        let analysis = self.analyzer.analyze(text);
        let selected = self.selector.select_response(text, &analysis);
        let navigation_hints = self.navigation_hints(text);

        if selected.content_request {
            return self.content_reply(text, selected, navigation_hints);
        }

        let suggestions = self
            .suggestions
            .get_or_initial(&selected.suggestion_set)
            .to_vec();
        CompanionReply {
            reply_text: selected.text,
            suggestion_set_name: selected.suggestion_set,
            suggestions,
            recommendations: None,
            navigation_hints,
        }
    }

    fn content_reply(
        &self,
        text: &str,
        selected: SelectedResponse,
        navigation_hints: Vec<NavigationHint>,
    ) -> CompanionReply {
        let assisted = self.assistant.resolve(text);
        let content_type = selected.content_type.map(|k| k.as_str()).unwrap_or("general");
        let recommendations = self.recommender.recommend(content_type, text);
        tracing::debug!(
            "Content request answered with intent '{}' ({:.1})",
            assisted.intent,
            assisted.confidence
        );

        CompanionReply {
            reply_text: assisted.text,
            suggestion_set_name: REMOTE_SET.to_string(),
            suggestions: assisted.suggestions,
            recommendations: Some(recommendations),
            navigation_hints,
        }
    }

    /// In-app screens mentioned by the text; never offered for abusive input.
    pub fn navigation_hints(&self, text: &str) -> Vec<NavigationHint> {
        if self.abuse.is_abusive(text) {
            return Vec::new();
        }
        let lowered = text.to_lowercase();
        self.navigation
            .iter()
            .filter(|(matcher, _)| matcher.matches(&lowered))
            .map(|(_, hint)| hint.clone())
            .collect()
    }
}

fn navigation_table() -> Vec<(Matcher, NavigationHint)> {
    let hint = |label: &str, target_screen: &str| NavigationHint {
        label: label.to_string(),
        target_screen: target_screen.to_string(),
    };
    vec![
        (
            Matcher::keywords(&["meditation", "meditate", "mindfulness session"]),
            hint("Go to Meditations", "Meditation"),
        ),
        (
            Matcher::keywords(&["game", "puzzle"]),
            hint("Go to Games", "Games"),
        ),
        (
            Matcher::keywords(&["music", "song", "listen"]),
            hint("Music Library", "Music"),
        ),
    ]
}
