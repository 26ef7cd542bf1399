use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u64,
    touched: Instant,
}

/// Latest turn per conversation. A turn that is no longer the latest once its
/// typing delay has elapsed is dropped instead of being answered.
#[derive(Clone, Default)]
pub struct TurnTracker {
    slots: Arc<RwLock<HashMap<Uuid, Slot>>>,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new turn and returns its generation.
    pub async fn begin(&self, conversation: Uuid) -> u64 {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(conversation).or_insert(Slot {
            generation: 0,
            touched: Instant::now(),
        });
        slot.generation += 1;
        slot.touched = Instant::now();
        slot.generation
    }

    pub async fn is_current(&self, conversation: Uuid, generation: u64) -> bool {
        self.slots
            .read()
            .await
            .get(&conversation)
            .map_or(false, |slot| slot.generation == generation)
    }

    /// Drops conversations idle for longer than `idle`; returns how many were removed.
    pub async fn prune(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| now.duration_since(slot.touched) < idle);
        let removed = before - slots.len();
        tracing::debug!(
            "Turn tracker cleanup: {} removed, {} active conversations",
            removed,
            slots.len()
        );
        removed
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_newer_turn_supersedes_older() {
        let tracker = TurnTracker::new();
        let conversation = Uuid::new_v4();

        let first = tracker.begin(conversation).await;
        let second = tracker.begin(conversation).await;
        assert!(second > first);
        assert!(!tracker.is_current(conversation, first).await);
        assert!(tracker.is_current(conversation, second).await);
    }

    #[tokio::test]
    async fn test_conversations_are_independent() {
        let tracker = TurnTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let turn_a = tracker.begin(a).await;
        tracker.begin(b).await;
        assert!(tracker.is_current(a, turn_a).await);
        assert!(!tracker.is_current(Uuid::new_v4(), 1).await);
    }

    #[tokio::test]
    async fn test_prune_idle_conversations() {
        let tracker = TurnTracker::new();
        tracker.begin(Uuid::new_v4()).await;
        tracker.begin(Uuid::new_v4()).await;

        assert_eq!(tracker.prune(Duration::from_secs(3600)).await, 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(tracker.prune(Duration::from_millis(10)).await, 2);
        assert_eq!(tracker.len().await, 0);
    }
}
