use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meditation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MusicTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreathingExercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub benefits: Vec<String>,
}

/// Catalog items that can be filtered by a list of content categories.
pub trait Categorized {
    fn in_categories(&self, categories: &[String]) -> bool;

    /// Case-insensitive containment over the item's searchable fields.
    /// `needle` must already be lower-cased.
    fn mentions(&self, needle: &str) -> bool;
}

fn contains_lower(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

fn benefits_mention(benefits: &[String], categories: &[String]) -> bool {
    benefits.iter().any(|b| {
        let b = b.to_lowercase();
        categories.iter().any(|c| b.contains(c.as_str()))
    })
}

impl Categorized for Meditation {
    fn in_categories(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| *c == self.category)
    }

    fn mentions(&self, needle: &str) -> bool {
        contains_lower(&self.title, needle)
            || contains_lower(&self.description, needle)
            || contains_lower(&self.category, needle)
    }
}

impl Categorized for MusicTrack {
    fn in_categories(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| *c == self.category)
    }

    fn mentions(&self, needle: &str) -> bool {
        contains_lower(&self.title, needle)
            || contains_lower(&self.artist, needle)
            || contains_lower(&self.description, needle)
            || contains_lower(&self.category, needle)
    }
}

impl Categorized for Game {
    fn in_categories(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| *c == self.category) || benefits_mention(&self.benefits, categories)
    }

    fn mentions(&self, needle: &str) -> bool {
        contains_lower(&self.name, needle)
            || contains_lower(&self.description, needle)
            || contains_lower(&self.category, needle)
            || self.benefits.iter().any(|b| contains_lower(b, needle))
    }
}

impl Categorized for BreathingExercise {
    // Breathing exercises carry no category tag; "breathing" selects all of them,
    // otherwise the benefits list decides.
    fn in_categories(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| c == "breathing") || benefits_mention(&self.benefits, categories)
    }

    fn mentions(&self, needle: &str) -> bool {
        contains_lower(&self.name, needle)
            || contains_lower(&self.description, needle)
            || self.benefits.iter().any(|b| contains_lower(b, needle))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Meditations,
    Music,
    Games,
    Breathing,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Meditations => "meditations",
            ContentKind::Music => "music",
            ContentKind::Games => "games",
            ContentKind::Breathing => "breathing",
        }
    }

    /// Human label used in reply text ("Here are some music suggestions").
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Meditations => "meditation",
            ContentKind::Music => "music",
            ContentKind::Games => "games",
            ContentKind::Breathing => "breathing exercises",
        }
    }

    /// Accepts singular and plural spellings; anything else (including
    /// "general") is not a concrete catalog.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "meditation" | "meditations" => Some(ContentKind::Meditations),
            "music" => Some(ContentKind::Music),
            "game" | "games" => Some(ContentKind::Games),
            "breathing" => Some(ContentKind::Breathing),
            _ => None,
        }
    }
}

/// Display-ready projection of a catalog item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentListing {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub meditations: Vec<Meditation>,
    pub music: Vec<MusicTrack>,
    pub games: Vec<Game>,
    pub breathing: Vec<BreathingExercise>,
}

impl ContentCatalog {
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: ContentCatalog = serde_json::from_str(raw)?;
        Ok(catalog)
    }

    pub fn listings(&self, kind: ContentKind) -> Vec<ContentListing> {
        match kind {
            ContentKind::Meditations => self
                .meditations
                .iter()
                .map(|m| ContentListing {
                    id: m.id.clone(),
                    title: m.title.clone(),
                    summary: format!("{} - {} - {}", m.duration, m.level, m.category),
                    details: m.description.clone(),
                })
                .collect(),
            ContentKind::Music => self
                .music
                .iter()
                .map(|t| ContentListing {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    summary: format!("{} - {} - {}", t.artist, t.duration, t.category),
                    details: t.description.clone(),
                })
                .collect(),
            ContentKind::Games => self
                .games
                .iter()
                .map(|g| ContentListing {
                    id: g.id.clone(),
                    title: g.name.clone(),
                    summary: format!("{} - {} - {}", g.difficulty, g.duration, g.category),
                    details: g.description.clone(),
                })
                .collect(),
            ContentKind::Breathing => self
                .breathing
                .iter()
                .map(|b| ContentListing {
                    id: b.id.clone(),
                    title: b.name.clone(),
                    summary: b.duration.clone(),
                    details: b.description.clone(),
                })
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            meditations: vec![
                meditation("1", "10-Minute Relaxation", "A short session to help you relax and reset during a busy day", "10 min", "relaxation", "Beginner"),
                meditation("2", "Deep Breathing", "Learn proper breathing techniques to calm your nervous system", "15 min", "breathing", "All Levels"),
                meditation("3", "Mindfulness Meditation", "Practice present moment awareness with guided mindfulness techniques", "20 min", "mindfulness", "Intermediate"),
                meditation("4", "Stress Relief", "Release tension and worry with this calming guided meditation", "10 min", "stress", "Beginner"),
                meditation("5", "Sleep Better", "Gentle meditation to help you fall asleep naturally and peacefully", "30 min", "sleep", "All Levels"),
            ],
            music: vec![
                track("1", "Peaceful Piano", "Various Artists", "120 min", "relaxation", "Gentle piano melodies for relaxation and focus"),
                track("2", "Nature Sounds", "Nature's Symphony", "60 min", "sleep", "Calming forest and water sounds for better sleep"),
                track("3", "Meditation Bowl Sounds", "Zen Master", "45 min", "meditation", "Tibetan singing bowls for deep meditation"),
                track("4", "Focus Beats", "Study Mix", "90 min", "focus", "Low-fi beats designed to improve concentration and productivity"),
                track("5", "Anxiety Relief", "Calm Collective", "30 min", "anxiety", "Specially composed music to reduce anxiety and stress"),
            ],
            games: vec![
                game("1", "Calm Puzzle", "Solve relaxing puzzles to clear your mind and reduce stress", "puzzle", "Easy", "5-10 min", &["Stress Relief", "Focus", "Cognitive Skills"]),
                game("2", "Mindful Coloring", "Express yourself through colors while practicing mindfulness", "creative", "Easy", "Any time", &["Creativity", "Calm", "Expression"]),
                game("3", "Relaxing Music Game", "Create beautiful melodies to help you unwind and relax", "music", "Medium", "10-15 min", &["Relaxation", "Creativity", "Auditory Skills"]),
                game("4", "Meditation Journey", "An interactive journey through guided meditation exercises", "meditation", "Medium", "15-20 min", &["Deep Relaxation", "Mindfulness", "Emotional Balance"]),
            ],
            breathing: vec![
                breathing("1", "Box Breathing", "Breathe in for 4, hold for 4, out for 4, hold for 4", "3-5 min", &["Stress reduction", "Improved focus", "Anxiety relief"]),
                breathing("2", "4-7-8 Breathing", "Inhale for 4, hold for 7, exhale for 8", "5 min", &["Sleep improvement", "Anxiety reduction", "Calm nervous system"]),
                breathing("3", "Diaphragmatic Breathing", "Deep belly breathing to engage the diaphragm fully", "5-10 min", &["Reduced stress", "Full oxygen exchange", "Lower heart rate"]),
            ],
        }
    }
}

fn meditation(id: &str, title: &str, description: &str, duration: &str, category: &str, level: &str) -> Meditation {
    Meditation {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        duration: duration.into(),
        category: category.into(),
        level: level.into(),
    }
}

fn track(id: &str, title: &str, artist: &str, duration: &str, category: &str, description: &str) -> MusicTrack {
    MusicTrack {
        id: id.into(),
        title: title.into(),
        artist: artist.into(),
        duration: duration.into(),
        category: category.into(),
        description: description.into(),
    }
}

fn game(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    difficulty: &str,
    duration: &str,
    benefits: &[&str],
) -> Game {
    Game {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: category.into(),
        difficulty: difficulty.into(),
        duration: duration.into(),
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
    }
}

fn breathing(id: &str, name: &str, description: &str, duration: &str, benefits: &[&str]) -> BreathingExercise {
    BreathingExercise {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        duration: duration.into(),
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
    }
}

/// Mood/goal keyword → content categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicMap {
    topics: BTreeMap<String, Vec<String>>,
    fallback: Vec<String>,
}

impl TopicMap {
    pub fn builtin() -> Self {
        let entries: [(&str, &[&str]); 9] = [
            ("anxious", &["anxiety", "stress", "breathing", "relaxation"]),
            ("stressed", &["stress", "relaxation", "breathing"]),
            ("sad", &["mindfulness", "creative"]),
            ("tired", &["sleep", "relaxation"]),
            ("unfocused", &["focus", "mindfulness"]),
            ("sleep", &["sleep", "relaxation"]),
            ("focus", &["focus", "mindfulness"]),
            ("relax", &["relaxation", "stress"]),
            ("calm", &["relaxation", "mindfulness", "breathing"]),
        ];
        let topics = entries
            .iter()
            .map(|(topic, cats)| (topic.to_string(), cats.iter().map(|c| c.to_string()).collect()))
            .collect();
        Self {
            topics,
            fallback: vec!["mindfulness".to_string()],
        }
    }

    /// Unknown topics map to the fallback list.
    pub fn categories_for(&self, topic: &str) -> &[String] {
        self.topics
            .get(&topic.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_accepts_aliases() {
        assert_eq!(ContentKind::parse("Meditation"), Some(ContentKind::Meditations));
        assert_eq!(ContentKind::parse("games"), Some(ContentKind::Games));
        assert_eq!(ContentKind::parse("game"), Some(ContentKind::Games));
        assert_eq!(ContentKind::parse("general"), None);
        assert_eq!(ContentKind::parse(""), None);
    }

    #[test]
    fn test_listing_summaries() {
        let catalog = ContentCatalog::builtin();
        let music = catalog.listings(ContentKind::Music);
        assert_eq!(music.len(), 5);
        assert_eq!(music[0].title, "Peaceful Piano");
        assert_eq!(music[0].summary, "Various Artists - 120 min - relaxation");

        let breathing = catalog.listings(ContentKind::Breathing);
        assert_eq!(breathing[1].summary, "5 min");
    }

    #[test]
    fn test_game_matches_through_benefits() {
        let catalog = ContentCatalog::builtin();
        let cats = vec!["stress".to_string()];
        let calm_puzzle = &catalog.games[0];
        assert!(calm_puzzle.in_categories(&cats));
        let coloring = &catalog.games[1];
        assert!(!coloring.in_categories(&cats));
    }

    #[test]
    fn test_topic_fallback() {
        let topics = TopicMap::builtin();
        assert_eq!(topics.categories_for("Relax"), ["relaxation", "stress"]);
        assert_eq!(topics.categories_for("bored"), ["mindfulness"]);
    }

    #[test]
    fn test_catalog_json_roundtrip_through_file_format() {
        let raw = serde_json::to_string(&ContentCatalog::builtin()).unwrap();
        let parsed = ContentCatalog::from_json_str(&raw).unwrap();
        assert_eq!(parsed.games.len(), 4);
        assert!(ContentCatalog::from_json_str("{\"meditations\": 3}").is_err());
    }
}
