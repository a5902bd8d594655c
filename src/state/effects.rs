//! Click sparkles
//!
//! Every document click leaves a short-lived sparkle at the pointer. Each
//! sparkle owns its own expiry timer; nothing is shared between them, so one
//! sparkle expiring never touches another.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::data::Position;

/// How long a sparkle stays on screen
pub const SPARKLE_LIFETIME: Duration = Duration::from_millis(1000);

/// Identifier of a spawned sparkle (monotonically increasing, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(u64);

impl EffectId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A live sparkle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub position: Position,
    pub created_at: Instant,
}

impl Sparkle {
    /// Progress through the lifetime in `[0.0, 1.0]`
    pub fn progress(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.created_at);
        (age.as_secs_f32() / SPARKLE_LIFETIME.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Owns every live sparkle, keyed by ID.
#[derive(Debug, Default)]
pub struct EffectManager {
    next_id: u64,
    live: BTreeMap<EffectId, Sparkle>,
}

impl EffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sparkle and return its ID.
    ///
    /// The caller is responsible for scheduling removal, normally by
    /// awaiting [`expire_after`] with the returned ID.
    pub fn spawn(&mut self, position: Position, now: Instant) -> EffectId {
        self.next_id += 1;
        let id = EffectId(self.next_id);
        self.live.insert(
            id,
            Sparkle {
                position,
                created_at: now,
            },
        );
        tracing::trace!(id = id.get(), x = position.x, y = position.y, "sparkle spawned");
        id
    }

    /// Remove a sparkle. Returns false if it was already gone.
    pub fn remove(&mut self, id: EffectId) -> bool {
        self.live.remove(&id).is_some()
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn get(&self, id: EffectId) -> Option<&Sparkle> {
        self.live.get(&id)
    }

    /// Live sparkles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (EffectId, &Sparkle)> {
        self.live.iter().map(|(id, sparkle)| (*id, sparkle))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drop every live sparkle. Pending timers will find nothing to remove.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

/// Resolves with `id` once a sparkle's lifetime has elapsed.
///
/// The sleep is created inside the future, so building it outside a tokio
/// runtime is fine; it only has to be polled on one.
pub async fn expire_after(id: EffectId) -> EffectId {
    tokio::time::sleep(SPARKLE_LIFETIME).await;
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_spawns_get_distinct_ids() {
        let mut effects = EffectManager::new();
        let now = Instant::now();

        let ids: Vec<EffectId> = (0..50)
            .map(|i| effects.spawn(Position::new(i as f32, 0.0), now))
            .collect();

        let unique: HashSet<EffectId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 50);
        assert!(ids.iter().all(|id| effects.contains(*id)));
    }

    #[test]
    fn test_removal_is_idempotent() {
        let mut effects = EffectManager::new();
        let id = effects.spawn(Position::ORIGIN, Instant::now());

        assert!(effects.remove(id));
        assert!(!effects.remove(id));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_removing_one_keeps_the_others() {
        let mut effects = EffectManager::new();
        let now = Instant::now();
        let first = effects.spawn(Position::new(1.0, 1.0), now);
        let second = effects.spawn(Position::new(2.0, 2.0), now);

        effects.remove(first);

        assert!(!effects.contains(first));
        assert_eq!(effects.get(second).unwrap().position, Position::new(2.0, 2.0));
    }

    #[test]
    fn test_ids_are_not_reused_after_clear() {
        let mut effects = EffectManager::new();
        let now = Instant::now();
        let before = effects.spawn(Position::ORIGIN, now);
        effects.clear();
        let after = effects.spawn(Position::ORIGIN, now);
        assert!(after > before);
    }

    #[test]
    fn test_progress_is_clamped() {
        let start = Instant::now();
        let sparkle = Sparkle {
            position: Position::ORIGIN,
            created_at: start,
        };

        assert_eq!(sparkle.progress(start), 0.0);
        assert!((sparkle.progress(start + SPARKLE_LIFETIME / 2) - 0.5).abs() < 1e-3);
        assert_eq!(sparkle.progress(start + SPARKLE_LIFETIME * 3), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_fires_after_exactly_one_lifetime() {
        let mut effects = EffectManager::new();
        let id = effects.spawn(Position::ORIGIN, Instant::now());
        let started = tokio::time::Instant::now();

        let expired = expire_after(id).await;
        effects.remove(expired);

        assert_eq!(expired, id);
        assert_eq!(started.elapsed(), SPARKLE_LIFETIME);
        assert!(!effects.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staggered_sparkles_expire_independently() {
        let mut effects = EffectManager::new();
        let first = effects.spawn(Position::ORIGIN, Instant::now());
        let first_timer = tokio::spawn(expire_after(first));

        tokio::time::sleep(Duration::from_millis(400)).await;
        let second = effects.spawn(Position::new(5.0, 5.0), Instant::now());
        let second_timer = tokio::spawn(expire_after(second));

        // First timer fires 600ms later; the second still has 400ms to go
        let expired = first_timer.await.unwrap();
        effects.remove(expired);
        assert!(!effects.contains(first));
        assert!(effects.contains(second));

        let expired = second_timer.await.unwrap();
        effects.remove(expired);
        assert!(effects.is_empty());
    }
}
