use serde::{Deserialize, Serialize};

pub const CIVILITY_REPLY: &str = "I understand you may be frustrated, but please try to express your feelings without using harmful language. How else can I support you today?";
pub const DEFAULT_REPLY: &str = "I'm here to listen and support you with your mental health. Could you tell me more about how you're feeling today?";
pub const CRISIS_FALLBACK_REPLY: &str = "I'm concerned about what you're saying. If you're in crisis, please reach out to a professional immediately. Would you like me to share some crisis resources?";
pub const MUSIC_ACK: &str = "I'd be happy to suggest some music. Let me find the right options for you.";
pub const MEDITATION_ACK: &str = "I'd be happy to suggest some meditation sessions. Let me find the right options for you.";
pub const GAMES_ACK: &str = "I'd be happy to suggest some mindfulness games. Let me find the right options for you.";

/// One canned reply. `patterns` are alternatives anchored at a word start, matched
/// case-insensitively; the first rule in declaration order that matches wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseRule {
    pub patterns: Vec<String>,
    pub response_text: String,
    pub suggestion_set: String,
}

fn rule(patterns: &[&str], response_text: &str, suggestion_set: &str) -> ResponseRule {
    ResponseRule {
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        response_text: response_text.into(),
        suggestion_set: suggestion_set.into(),
    }
}

/// Default rule table. Within a topic the narrower phrases come first so
/// they are reachable at all.
pub fn builtin_rules() -> Vec<ResponseRule> {
    vec![
        // greetings
        rule(
            &["hi", "hello", "hey", "greetings"],
            "Hello! I'm your mental health assistant. How are you feeling today?",
            "initial",
        ),
        rule(
            &["how are you", "how are you doing"],
            "I'm here and ready to support you. More importantly, how are you doing today?",
            "initial",
        ),
        rule(
            &["thanks", "thank you"],
            "You're welcome! I'm here anytime you need support with your mental wellbeing.",
            "initial",
        ),
        rule(
            &["bye", "goodbye", "see you"],
            "Take care of yourself. Remember, I'm here whenever you need to talk.",
            "initial",
        ),
        // anxiety
        rule(
            &["anxious", "anxiety", "worried", "panic", "stress", "stressed"],
            "I notice you're feeling anxious. Anxiety is a common experience. Would you like to try a breathing exercise to help calm your nervous system?",
            "anxiety",
        ),
        rule(
            &["breathing", "breathe"],
            "Try this simple breathing technique: Breathe in for 4 counts, hold for 2, and exhale for 6. Would you like me to guide you through it?",
            "anxiety",
        ),
        rule(
            &["grounding"],
            "A helpful grounding exercise is the 5-4-3-2-1 technique. Notice 5 things you can see, 4 things you can touch, 3 things you can hear, 2 things you can smell, and 1 thing you can taste.",
            "anxiety",
        ),
        // depression
        rule(
            &["sad", "depressed", "depression", "unhappy", "low", "down"],
            "I'm sorry to hear you're feeling low. Depression and sadness are normal emotions that everyone experiences. Would you like to explore some gentle activities that might help lift your mood?",
            "depression",
        ),
        rule(
            &["no motivation", "can't get up", "tired", "exhausted"],
            "Starting small can help when motivation is low. Could you think of one tiny step you could take in the next 5 minutes? Even getting a glass of water counts.",
            "depression",
        ),
        // sleep
        rule(
            &["sleep hygiene", "sleep better"],
            "Good sleep hygiene includes keeping a consistent schedule, avoiding screens before bed, creating a relaxing bedtime routine, and ensuring your sleeping environment is comfortable and dark.",
            "sleep",
        ),
        rule(
            &["sleep", "insomnia", "tired", "rest", "sleepy", "awake"],
            "Sleep difficulties can really affect our mental well-being. Would you like some evidence-based tips for improving your sleep quality?",
            "sleep",
        ),
        // meditation
        rule(
            &["how to meditate", "meditation technique"],
            "A simple way to start meditating is to focus on your breath. Find a comfortable position, close your eyes, and notice the sensation of breathing in and out. When your mind wanders, gently bring your attention back to your breath.",
            "meditation",
        ),
        rule(
            &["meditation", "meditate", "mindful", "mindfulness"],
            "Meditation and mindfulness are powerful practices for mental health. Would you like to explore different meditation techniques that might work for you?",
            "meditation",
        ),
        // crisis, second net behind the concern analyzer
        rule(
            &["suicide", "kill myself", "die", "end it", "not worth living", "hurt myself", "harm"],
            "I'm concerned about what you're sharing. If you're in crisis or having thoughts of harming yourself, please reach out to a crisis helpline immediately. In the US, you can text HOME to 741741 or call 988 to reach the Suicide & Crisis Lifeline.",
            "crisis",
        ),
    ]
}

pub fn builtin_blocklist() -> Vec<String> {
    ["fuck", "bad", "stupid", "useless", "bitch", "crazy", "nonsense"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}
