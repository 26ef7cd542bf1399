pub mod models;

pub use models::{AnalysisResult, ConcernCategory, Message, NavigationHint, Sender, Severity};
