use std::sync::Arc;
use std::time::Duration;

use crate::db::UserStore;
use crate::middleware::RateLimiter;
use crate::services::{Companion, TurnTracker};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub companion: Arc<Companion>,
    pub turns: TurnTracker,
    pub auth_limiter: RateLimiter,
    pub session_key: Vec<u8>,
    pub session_ttl: chrono::Duration,
    pub typing_delay: Duration,
    pub secure_cookies: bool,
}

pub type SharedState = Arc<AppState>;
