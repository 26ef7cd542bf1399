use serde::{Deserialize, Serialize};

use crate::domain::ConcernCategory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportResource {
    pub name: String,
    pub description: String,
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SupportResource {
    fn self_help(name: &str, description: &str, resource_type: &str, duration: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            resource_type: resource_type.into(),
            duration: Some(duration.into()),
            contact: None,
            website: None,
        }
    }

    fn hotline(name: &str, contact: &str, description: &str, website: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            resource_type: "hotline".into(),
            duration: None,
            contact: Some(contact.into()),
            website: Some(website.into()),
        }
    }
}

/// Self-help resources per concern plus the crisis lines.
#[derive(Debug, Clone)]
pub struct ResourceLibrary {
    anxiety: Vec<SupportResource>,
    depression: Vec<SupportResource>,
    sleep: Vec<SupportResource>,
    general: Vec<SupportResource>,
    crisis: Vec<SupportResource>,
}

impl ResourceLibrary {
    pub fn for_concern(&self, concern: ConcernCategory) -> &[SupportResource] {
        match concern {
            ConcernCategory::Anxiety => &self.anxiety,
            ConcernCategory::Depression => &self.depression,
            ConcernCategory::Sleep => &self.sleep,
            ConcernCategory::Crisis => &self.crisis,
            ConcernCategory::General => &self.general,
        }
    }

    pub fn crisis_lines(&self) -> &[SupportResource] {
        &self.crisis
    }

    pub fn builtin() -> Self {
        Self {
            anxiety: vec![
                SupportResource::self_help("Breathing Techniques", "Simple breathing exercises to reduce anxiety", "exercise", "5 min"),
                SupportResource::self_help("Grounding Exercise", "5-4-3-2-1 sensory awareness technique", "exercise", "3 min"),
                SupportResource::self_help("Progressive Muscle Relaxation", "Relieve tension through muscle relaxation", "exercise", "10 min"),
            ],
            depression: vec![
                SupportResource::self_help("Mood Journal", "Track your mood patterns over time", "tool", "ongoing"),
                SupportResource::self_help("Behavioral Activation", "Simple activities to boost your mood", "exercise", "varies"),
                SupportResource::self_help("Self-Compassion Meditation", "Practice being kind to yourself", "meditation", "10 min"),
            ],
            sleep: vec![
                SupportResource::self_help("Sleep Hygiene Tips", "Evidence-based practices for better sleep", "guide", "5 min read"),
                SupportResource::self_help("Bedtime Meditation", "Gentle meditation to prepare for sleep", "meditation", "15 min"),
                SupportResource::self_help("Sleep Journal", "Track sleep patterns to identify issues", "tool", "ongoing"),
            ],
            general: vec![
                SupportResource::self_help("Daily Mindfulness", "Simple mindfulness practices for everyday life", "guide", "varies"),
                SupportResource::self_help("Gratitude Practice", "Cultivate appreciation for the positive aspects of life", "exercise", "5 min"),
                SupportResource::self_help("Values Reflection", "Connect with what matters most to you", "exercise", "15 min"),
            ],
            crisis: vec![
                SupportResource::hotline(
                    "988 Suicide & Crisis Lifeline",
                    "988",
                    "24/7 support for anyone in suicidal crisis or emotional distress",
                    "https://988lifeline.org/",
                ),
                SupportResource::hotline(
                    "Crisis Text Line",
                    "Text HOME to 741741",
                    "24/7 support via text message for any type of crisis",
                    "https://www.crisistextline.org/",
                ),
                SupportResource::hotline(
                    "SAMHSA National Helpline",
                    "1-800-662-4357",
                    "Treatment referral and information service for mental health and substance use disorders",
                    "https://www.samhsa.gov/find-help/national-helpline",
                ),
            ],
        }
    }
}

/// Short self-care tips used when a concern was detected but no reply rule fired.
#[derive(Debug, Clone)]
pub struct TipBook {
    anxiety: Vec<String>,
    depression: Vec<String>,
    sleep: Vec<String>,
    general: Vec<String>,
}

impl TipBook {
    /// Never empty. Crisis has no tips of its own and borrows the general ones.
    pub fn tips_for(&self, concern: ConcernCategory) -> &[String] {
        match concern {
            ConcernCategory::Anxiety => &self.anxiety,
            ConcernCategory::Depression => &self.depression,
            ConcernCategory::Sleep => &self.sleep,
            ConcernCategory::Crisis | ConcernCategory::General => &self.general,
        }
    }

    pub fn builtin() -> Self {
        let owned = |tips: &[&str]| tips.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        Self {
            anxiety: owned(&[
                "Try the 4-7-8 breathing technique: Inhale for 4 seconds, hold for 7, and exhale for 8.",
                "Grounding can help with anxiety. Try naming 5 things you can see, 4 things you can touch, 3 things you can hear, 2 things you can smell, and 1 thing you can taste.",
                "When anxiety hits, try to identify and challenge catastrophic thinking patterns.",
            ]),
            depression: owned(&[
                "Even small movements can help - try taking a 5-minute walk or stretching.",
                "Set one small, achievable goal for today, and celebrate when you complete it.",
                "Connect with nature, even just looking at trees or plants can help improve mood.",
            ]),
            sleep: owned(&[
                "Try to maintain a consistent sleep schedule, even on weekends.",
                "Limit screen time at least one hour before bed to improve sleep quality.",
                "Create a relaxing bedtime routine to signal to your body that it's time to wind down.",
            ]),
            general: owned(&[
                "Practice mindfulness by fully focusing on a routine activity like eating or walking.",
                "Spend a few minutes each day writing down three things you're grateful for.",
                "Remember that your feelings are valid, even if they're uncomfortable.",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_concern_has_resources_and_tips() {
        let library = ResourceLibrary::builtin();
        let tips = TipBook::builtin();
        for concern in [
            ConcernCategory::Anxiety,
            ConcernCategory::Depression,
            ConcernCategory::Sleep,
            ConcernCategory::Crisis,
            ConcernCategory::General,
        ] {
            assert!(!library.for_concern(concern).is_empty());
            assert!(!tips.tips_for(concern).is_empty());
        }
    }

    #[test]
    fn test_crisis_lines_carry_contacts() {
        let library = ResourceLibrary::builtin();
        assert_eq!(library.crisis_lines().len(), 3);
        assert!(library
            .crisis_lines()
            .iter()
            .all(|r| r.contact.is_some() && r.resource_type == "hotline"));
        assert_eq!(library.crisis_lines()[0].contact.as_deref(), Some("988"));
    }
}
