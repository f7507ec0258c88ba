//! Time-to-live cache with an injectable clock
//!
//! Keyed lookup cache with explicit expiry, used by external-lookup tools
//! (weather). The clock is a trait so expiry can be tested deterministically
//! with a fake clock instead of sleeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Keyed cache where entries expire after a fixed TTL
pub struct TtlCache<V> {
    entries: HashMap<String, (Instant, V)>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V> TtlCache<V> {
    /// Create a cache with the given TTL on the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Look up a live entry; expired entries are treated as absent
    pub fn get(&self, key: &str) -> Option<&V> {
        let (stored_at, value) = self.entries.get(key)?;
        if self.clock.now().duration_since(*stored_at) < self.ttl {
            Some(value)
        } else {
            None
        }
    }

    /// Insert or refresh an entry at the current instant
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), (self.clock.now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Clock that only moves when told to
    struct FakeClock {
        base: Instant,
        offset: Mutex<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock().unwrap()
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = Arc::new(FakeClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.insert("weather_Bangalore", "28 C");
        clock.advance(Duration::from_secs(3599));
        assert_eq!(cache.get("weather_Bangalore"), Some(&"28 C"));
    }

    #[test]
    fn test_miss_after_expiry() {
        let clock = Arc::new(FakeClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.insert("weather_Bangalore", "28 C");
        clock.advance(Duration::from_secs(3600));
        assert_eq!(cache.get("weather_Bangalore"), None);
    }

    #[test]
    fn test_insert_refreshes_expiry() {
        let clock = Arc::new(FakeClock::new());
        let mut cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());

        cache.insert("k", 1);
        clock.advance(Duration::from_secs(59));
        cache.insert("k", 2);
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("k"), Some(&2));
    }

    #[test]
    fn test_unknown_key() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1));
        assert!(cache.get("nope").is_none());
        assert!(cache.is_empty());
    }
}
