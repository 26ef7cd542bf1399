pub mod assistant;
pub mod companion;
pub mod concern;
pub mod moderation;
pub mod recommender;
pub mod responder;
pub mod rules;
pub mod turns;

pub use companion::{Companion, CompanionReply};
pub use responder::{PrecedencePolicy, RandomPicker};
pub use turns::TurnTracker;
