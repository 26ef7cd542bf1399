//! Concern analyzer: keyword scan of one utterance over the fixed concern
//! categories, with crisis detection overriding everything else.

use std::sync::Arc;

use crate::catalog::{ConcernTable, ResourceLibrary};
use crate::domain::{AnalysisResult, ConcernCategory, Severity};
use crate::services::rules::Matcher;

#[derive(Clone)]
pub struct ConcernAnalyzer {
    matchers: Arc<Vec<(ConcernCategory, Matcher)>>,
    crisis_message: String,
    resources: Arc<ResourceLibrary>,
}

impl ConcernAnalyzer {
    pub fn new(table: &ConcernTable, resources: Arc<ResourceLibrary>) -> Self {
        let matchers = table
            .entries
            .iter()
            .map(|entry| (entry.category, Matcher::keywords(&entry.keywords)))
            .collect();
        Self {
            matchers: Arc::new(matchers),
            crisis_message: table.crisis_message.clone(),
            resources,
        }
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let lowered = text.to_lowercase();
        let concerns: Vec<ConcernCategory> = self
            .matchers
            .iter()
            .filter(|(_, matcher)| matcher.matches(&lowered))
            .map(|(category, _)| *category)
            .collect();

        if concerns.contains(&ConcernCategory::Crisis) {
            tracing::warn!("Crisis keywords detected in chat turn");
            return AnalysisResult {
                concerns: vec![ConcernCategory::Crisis],
                has_crisis: true,
                severity: Severity::High,
                recommended_resources: self.resources.crisis_lines().to_vec(),
                message: Some(self.crisis_message.clone()),
            };
        }

        let Some(primary) = concerns.first().copied() else {
            return AnalysisResult {
                concerns: vec![ConcernCategory::General],
                has_crisis: false,
                severity: Severity::Low,
                recommended_resources: self.resources.for_concern(ConcernCategory::General).to_vec(),
                message: None,
            };
        };

        let severity = if concerns.len() > 1 {
            Severity::Moderate
        } else {
            Severity::Low
        };
        tracing::debug!(
            "Concerns detected: {:?} (severity {:?})",
            concerns,
            severity
        );

        AnalysisResult {
            recommended_resources: self.resources.for_concern(primary).to_vec(),
            concerns,
            has_crisis: false,
            severity,
            message: None,
        }
    }
}
