use crate::domain::ConcernCategory;

pub const CRISIS_MESSAGE: &str = "I'm concerned about what you're sharing. If you're thinking about harming yourself, please reach out to a crisis resource immediately. Would you like me to share some crisis support options?";

#[derive(Debug, Clone)]
pub struct ConcernKeywords {
    pub category: ConcernCategory,
    pub keywords: Vec<String>,
}

/// Keyword lists in evaluation order. `general` has no entry: it is the
/// result when nothing else matches.
#[derive(Debug, Clone)]
pub struct ConcernTable {
    pub entries: Vec<ConcernKeywords>,
    pub crisis_message: String,
}

impl ConcernTable {
    pub fn builtin() -> Self {
        let table: [(ConcernCategory, &[&str]); 4] = [
            (
                ConcernCategory::Anxiety,
                &["anxious", "anxiety", "worry", "worried", "nervous", "panic", "stress", "stressed", "fear", "afraid"],
            ),
            (
                ConcernCategory::Depression,
                &["depressed", "depression", "sad", "sadness", "hopeless", "worthless", "empty", "numb", "tired", "exhausted"],
            ),
            (
                ConcernCategory::Sleep,
                &["sleep", "insomnia", "tired", "fatigue", "rest", "awake", "nightmare", "dream"],
            ),
            (
                ConcernCategory::Crisis,
                &["suicide", "kill myself", "die", "end it", "no point", "not worth living", "hurt myself", "self harm"],
            ),
        ];

        Self {
            entries: table
                .iter()
                .map(|(category, keywords)| ConcernKeywords {
                    category: *category,
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
            crisis_message: CRISIS_MESSAGE.to_string(),
        }
    }
}
