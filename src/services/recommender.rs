//! Content recommender: maps a requested kind or a mood/goal query onto the
//! read-only content catalogs.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{
    BreathingExercise, Categorized, ContentCatalog, ContentKind, Game, Meditation, MusicTrack,
    TopicMap,
};

/// Partial record: only the catalogs relevant to a request are present.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ContentBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meditations: Option<Vec<Meditation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<Vec<MusicTrack>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<Game>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing: Option<Vec<BreathingExercise>>,
}

fn filtered<T: Categorized + Clone>(items: &[T], categories: &[String]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.in_categories(categories))
        .cloned()
        .collect()
}

fn searched<T: Categorized + Clone>(items: &[T], needle: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.mentions(needle))
        .cloned()
        .collect()
}

// query keyword → topic, tested in this order
const QUERY_TOPICS: [(&[&str], &str); 3] = [
    (&["relax", "stress"], "relax"),
    (&["sleep"], "sleep"),
    (&["focus"], "focus"),
];

const DEFAULT_BUNDLE_SIZE: usize = 2;

#[derive(Clone)]
pub struct ContentRecommender {
    catalog: Arc<ContentCatalog>,
    topics: Arc<TopicMap>,
}

impl ContentRecommender {
    pub fn new(catalog: Arc<ContentCatalog>, topics: Arc<TopicMap>) -> Self {
        Self { catalog, topics }
    }

    /// A concrete `content_type` returns that whole catalog; anything else
    /// ("general", empty, unknown) is resolved from the mood keywords in `query`.
    pub fn recommend(&self, content_type: &str, query: &str) -> ContentBundle {
        if let Some(kind) = ContentKind::parse(content_type) {
            return self.full(kind);
        }

        let lowered = query.to_lowercase();
        let topic = QUERY_TOPICS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(_, topic)| *topic);

        match topic {
            Some(topic) => {
                tracing::debug!("Recommending content for topic '{}'", topic);
                self.recommendations_for(topic)
            }
            None => ContentBundle {
                meditations: Some(
                    self.catalog
                        .meditations
                        .iter()
                        .take(DEFAULT_BUNDLE_SIZE)
                        .cloned()
                        .collect(),
                ),
                music: Some(
                    self.catalog
                        .music
                        .iter()
                        .take(DEFAULT_BUNDLE_SIZE)
                        .cloned()
                        .collect(),
                ),
                games: None,
                breathing: None,
            },
        }
    }

    /// Filters all four catalogs by the categories mapped to `topic`.
    pub fn recommendations_for(&self, topic: &str) -> ContentBundle {
        let categories = self.topics.categories_for(topic);
        ContentBundle {
            meditations: Some(filtered(&self.catalog.meditations, categories)),
            music: Some(filtered(&self.catalog.music, categories)),
            games: Some(filtered(&self.catalog.games, categories)),
            breathing: Some(filtered(&self.catalog.breathing, categories)),
        }
    }

    /// Free-text search; restricted to one catalog when `kind` is given.
    pub fn search(&self, query: &str, kind: Option<ContentKind>) -> ContentBundle {
        let needle = query.trim().to_lowercase();
        let wants = |k: ContentKind| kind.map_or(true, |only| only == k);
        ContentBundle {
            meditations: wants(ContentKind::Meditations)
                .then(|| searched(&self.catalog.meditations, &needle)),
            music: wants(ContentKind::Music).then(|| searched(&self.catalog.music, &needle)),
            games: wants(ContentKind::Games).then(|| searched(&self.catalog.games, &needle)),
            breathing: wants(ContentKind::Breathing)
                .then(|| searched(&self.catalog.breathing, &needle)),
        }
    }

    pub fn full(&self, kind: ContentKind) -> ContentBundle {
        let mut bundle = ContentBundle::default();
        match kind {
            ContentKind::Meditations => bundle.meditations = Some(self.catalog.meditations.clone()),
            ContentKind::Music => bundle.music = Some(self.catalog.music.clone()),
            ContentKind::Games => bundle.games = Some(self.catalog.games.clone()),
            ContentKind::Breathing => bundle.breathing = Some(self.catalog.breathing.clone()),
        }
        bundle
    }
}
