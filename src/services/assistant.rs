//! Content assistant: answers explicit content requests with a short list of
//! catalog items and its own quick-reply suggestions.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{ContentCatalog, ContentKind, ContentListing};
use crate::services::rules::{Matcher, RuleTable};

/// Items listed in one reply.
const LISTED_ITEMS: usize = 3;
const INTENT_CONFIDENCE: f32 = 0.9;
const FALLBACK_CONFIDENCE: f32 = 0.7;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantReply {
    pub text: String,
    pub intent: String,
    pub confidence: f32,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_kind: Option<ContentKind>,
}

/// Narrows a catalog listing by a word in its summary line.
#[derive(Debug, Clone)]
struct SubIntent {
    name: &'static str,
    summary_contains: &'static str,
}

#[derive(Debug, Clone)]
struct ContentIntent {
    kind: ContentKind,
    suggestions: [&'static str; 4],
    refinements: RuleTable<SubIntent>,
}

pub struct ContentAssistant {
    catalog: Arc<ContentCatalog>,
    intents: RuleTable<ContentIntent>,
}

impl ContentAssistant {
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        let sub = |name, summary_contains| SubIntent {
            name,
            summary_contains,
        };

        let intents = RuleTable::new()
            .with(
                Matcher::keywords(&["music", "play", "song", "audio", "sound"]),
                ContentIntent {
                    kind: ContentKind::Music,
                    suggestions: ["Relaxing music", "Sleep music", "Focus music", "Show all music"],
                    refinements: RuleTable::new()
                        .with(Matcher::keywords(&["relax", "calm", "stress"]), sub("relaxation", "relax"))
                        .with(Matcher::keywords(&["sleep", "night", "bed"]), sub("sleep", "sleep"))
                        .with(Matcher::keywords(&["focus", "concentrate", "study"]), sub("focus", "focus")),
                },
            )
            .with(
                Matcher::keywords(&["meditation", "meditate"]),
                ContentIntent {
                    kind: ContentKind::Meditations,
                    suggestions: ["Beginner meditation", "Sleep meditation", "Stress meditation", "Show all meditations"],
                    refinements: RuleTable::new()
                        .with(Matcher::keywords(&["beginner", "start", "new"]), sub("beginner", "beginner"))
                        .with(Matcher::keywords(&["sleep"]), sub("sleep", "sleep")),
                },
            )
            .with(
                Matcher::keywords(&["game", "puzzle", "activity"]),
                ContentIntent {
                    kind: ContentKind::Games,
                    suggestions: ["Relaxing games", "Puzzle games", "Mindfulness games", "Show all games"],
                    refinements: RuleTable::new().with(Matcher::keywords(&["puzzle"]), sub("puzzle", "puzzle")),
                },
            )
            .with(
                Matcher::keywords(&["breathing", "breath"]),
                ContentIntent {
                    kind: ContentKind::Breathing,
                    suggestions: ["Box breathing", "4-7-8 breathing", "Diaphragmatic breathing", "More exercises"],
                    refinements: RuleTable::new(),
                },
            );

        Self { catalog, intents }
    }

    pub fn resolve(&self, text: &str) -> AssistantReply {
        let lowered = text.to_lowercase();
        let Some(intent) = self.intents.first_match(&lowered) else {
            return AssistantReply {
                text: "I'm here to help with your mental health and provide recommendations for content in our app. You can ask about music, meditations, games, or breathing exercises!".to_string(),
                intent: "fallback".to_string(),
                confidence: FALLBACK_CONFIDENCE,
                suggestions: to_owned(&["Show me relaxing music", "I need a meditation", "Games for relaxation", "Breathing exercises"]),
                content_kind: None,
            };
        };

        let mut listings = self.catalog.listings(intent.kind);
        let sub_intent = match intent.refinements.first_match(&lowered) {
            Some(refinement) => {
                listings.retain(|item| item.summary.to_lowercase().contains(refinement.summary_contains));
                refinement.name
            }
            None => "list",
        };

        AssistantReply {
            text: format_listings(&listings, intent.kind.label()),
            intent: format!("{}.{}", intent_prefix(intent.kind), sub_intent),
            confidence: INTENT_CONFIDENCE,
            suggestions: to_owned(&intent.suggestions),
            content_kind: Some(intent.kind),
        }
    }
}

fn intent_prefix(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Meditations => "meditation",
        ContentKind::Music => "music",
        ContentKind::Games => "games",
        ContentKind::Breathing => "breathing",
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn format_listings(items: &[ContentListing], label: &str) -> String {
    if items.is_empty() {
        return format!("No {label} content found matching your request.");
    }

    let mut message = format!("Here are some {label} suggestions for you:\n\n");
    for (index, item) in items.iter().take(LISTED_ITEMS).enumerate() {
        message.push_str(&format!(
            "{}. **{}**\n   {}\n   {}\n\n",
            index + 1,
            item.title,
            item.summary,
            item.details
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> ContentAssistant {
        ContentAssistant::new(Arc::new(ContentCatalog::builtin()))
    }

    #[test]
    fn test_music_sub_intents() {
        let reply = assistant().resolve("play some music to help me sleep");
        assert_eq!(reply.intent, "music.sleep");
        assert_eq!(reply.content_kind, Some(ContentKind::Music));
        assert!(reply.text.starts_with("Here are some music suggestions for you:"));
        assert!(reply.text.contains("**Nature Sounds**"));
        assert!(!reply.text.contains("Peaceful Piano"));
        assert_eq!(reply.suggestions[0], "Relaxing music");

        let relax = assistant().resolve("music to relax");
        assert_eq!(relax.intent, "music.relaxation");
        assert!(relax.text.contains("**Peaceful Piano**"));
    }

    #[test]
    fn test_general_listing_caps_at_three_items() {
        let reply = assistant().resolve("Any music?");
        assert_eq!(reply.intent, "music.list");
        assert!(reply.text.contains("3. **Meditation Bowl Sounds**"));
        assert!(!reply.text.contains("4. "));
    }

    #[test]
    fn test_meditation_and_games() {
        let beginner = assistant().resolve("a meditation for a beginner");
        assert_eq!(beginner.intent, "meditation.beginner");
        assert!(beginner.text.contains("10-Minute Relaxation"));
        assert!(beginner.text.contains("Stress Relief"));
        assert!(!beginner.text.contains("Mindfulness Meditation"));

        let puzzle = assistant().resolve("any puzzle games?");
        assert_eq!(puzzle.intent, "games.puzzle");
        assert!(puzzle.text.contains("Calm Puzzle"));
        assert_eq!(puzzle.content_kind, Some(ContentKind::Games));
    }

    #[test]
    fn test_breathing_and_fallback() {
        let breathing = assistant().resolve("breathing exercises please");
        assert_eq!(breathing.intent, "breathing.list");
        assert!(breathing.text.starts_with("Here are some breathing exercises suggestions"));

        let fallback = assistant().resolve("I like to listen");
        assert_eq!(fallback.intent, "fallback");
        assert!(fallback.content_kind.is_none());
        assert_eq!(fallback.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_listing_message() {
        assert_eq!(
            format_listings(&[], "games"),
            "No games content found matching your request."
        );
    }
}
