use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SupportResource;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConcernCategory {
    Anxiety,
    Depression,
    Sleep,
    Crisis,
    General,
}

impl ConcernCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernCategory::Anxiety => "anxiety",
            ConcernCategory::Depression => "depression",
            ConcernCategory::Sleep => "sleep",
            ConcernCategory::Crisis => "crisis",
            ConcernCategory::General => "general",
        }
    }
}

impl TryFrom<&str> for ConcernCategory {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "anxiety" => Ok(ConcernCategory::Anxiety),
            "depression" => Ok(ConcernCategory::Depression),
            "sleep" => Ok(ConcernCategory::Sleep),
            "crisis" => Ok(ConcernCategory::Crisis),
            "general" => Ok(ConcernCategory::General),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// Outcome of scanning one utterance for concern keywords.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub concerns: Vec<ConcernCategory>,
    pub has_crisis: bool,
    pub severity: Severity,
    pub recommended_resources: Vec<SupportResource>,
    pub message: Option<String>,
}

impl AnalysisResult {
    pub fn primary_concern(&self) -> ConcernCategory {
        self.concerns
            .first()
            .copied()
            .unwrap_or(ConcernCategory::General)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavigationHint {
    pub label: String,
    pub target_screen: String,
}
