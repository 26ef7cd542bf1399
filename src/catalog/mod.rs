//! Read-only reference data: concern keywords, reply rules, self-help
//! resources, quick-reply sets and the content catalogs. Built once at
//! startup and shared by `Arc`.

pub mod concerns;
pub mod content;
pub mod replies;
pub mod resources;
pub mod suggestions;

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub use concerns::{ConcernKeywords, ConcernTable};
pub use content::{
    BreathingExercise, Categorized, ContentCatalog, ContentKind, ContentListing, Game, Meditation,
    MusicTrack, TopicMap,
};
pub use replies::ResponseRule;
pub use resources::{ResourceLibrary, SupportResource, TipBook};
pub use suggestions::SuggestionBook;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct ReferenceData {
    pub concerns: Arc<ConcernTable>,
    pub rules: Arc<Vec<ResponseRule>>,
    pub blocklist: Arc<Vec<String>>,
    pub resources: Arc<ResourceLibrary>,
    pub tips: Arc<TipBook>,
    pub suggestions: Arc<SuggestionBook>,
    pub content: Arc<ContentCatalog>,
    pub topics: Arc<TopicMap>,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self::with_content(ContentCatalog::builtin())
    }

    pub fn with_content(content: ContentCatalog) -> Self {
        Self {
            concerns: Arc::new(ConcernTable::builtin()),
            rules: Arc::new(replies::builtin_rules()),
            blocklist: Arc::new(replies::builtin_blocklist()),
            resources: Arc::new(ResourceLibrary::builtin()),
            tips: Arc::new(TipBook::builtin()),
            suggestions: Arc::new(SuggestionBook::builtin()),
            content: Arc::new(content),
            topics: Arc::new(TopicMap::builtin()),
        }
    }

    /// Uses the catalog file when one is configured, the built-in catalog otherwise.
    pub fn load(catalog_path: Option<&Path>) -> Result<Self, CatalogError> {
        match catalog_path {
            Some(path) => {
                let content = ContentCatalog::from_json_file(path)?;
                tracing::info!(
                    "Loaded content catalog from {} ({} meditations, {} tracks, {} games, {} breathing exercises)",
                    path.display(),
                    content.meditations.len(),
                    content.music.len(),
                    content.games.len(),
                    content.breathing.len()
                );
                Ok(Self::with_content(content))
            }
            None => Ok(Self::builtin()),
        }
    }
}
