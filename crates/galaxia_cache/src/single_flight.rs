//! # Single-Flight LRU Cache
//!
//! Memoizes expensive computations by key with stampede protection.
//!
//! ## Guarantees
//!
//! - At most one computation in flight per key. Concurrent callers for
//!   the same key block until it finishes and share its result.
//! - A failed or panicking computation leaves no entry behind. Blocked
//!   callers wake up and retry; one of them becomes the new computer.
//! - Finished entries are evicted least-recently-used once the entry
//!   count exceeds the capacity. In-flight slots are never evicted.
//!
//! ```text
//!   caller A ──► miss ──► InFlight ──► compute ──► Ready ──► notify
//!   caller B ──► InFlight ──► wait ───────────────────────► shared Arc
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Outcome published to waiters.
enum Outcome<V> {
    Ready(Arc<V>),
    Failed,
}

/// Completion signal for one in-flight computation.
struct InFlight<V> {
    outcome: Mutex<Option<Outcome<V>>>,
    condvar: Condvar,
}

impl<V> InFlight<V> {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            condvar: Condvar::new(),
        }
    }

    fn publish(&self, outcome: Outcome<V>) {
        *self.outcome.lock() = Some(outcome);
        self.condvar.notify_all();
    }

    /// Blocks until published. `None` means the computation failed.
    fn wait(&self) -> Option<Arc<V>> {
        let mut guard = self.outcome.lock();
        while guard.is_none() {
            self.condvar.wait(&mut guard);
        }
        match guard.as_ref() {
            Some(Outcome::Ready(value)) => Some(Arc::clone(value)),
            _ => None,
        }
    }
}

enum Slot<V> {
    Ready { value: Arc<V>, last_used: u64 },
    InFlight(Arc<InFlight<V>>),
}

struct State<K, V> {
    slots: HashMap<K, Slot<V>>,
    clock: u64,
}

impl<K, V> State<K, V> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn ready_count(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, Slot::Ready { .. }))
            .count()
    }
}

/// Snapshot of cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Served from a finished entry or a shared in-flight result.
    pub hits: u64,
    /// Found nothing and started a computation.
    pub misses: u64,
    /// Computations that finished successfully.
    pub computations: u64,
    /// Computations that returned an error or panicked.
    pub failures: u64,
    /// Entries dropped to respect the capacity.
    pub evictions: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    failures: AtomicU64,
    evictions: AtomicU64,
}

/// Keyed memoization with single-flight semantics.
pub struct SingleFlightCache<K, V> {
    state: Mutex<State<K, V>>,
    capacity: usize,
    counters: Counters,
}

/// Removes the in-flight slot and wakes waiters unless disarmed.
struct FlightGuard<'a, K: Eq + Hash + Clone, V> {
    cache: &'a SingleFlightCache<K, V>,
    key: &'a K,
    flight: Arc<InFlight<V>>,
    armed: bool,
}

impl<K: Eq + Hash + Clone, V> Drop for FlightGuard<'_, K, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut state = self.cache.state.lock();
            if matches!(state.slots.get(self.key), Some(Slot::InFlight(f)) if Arc::ptr_eq(f, &self.flight))
            {
                state.slots.remove(self.key);
            }
        }
        self.cache.counters.failures.fetch_add(1, Ordering::Relaxed);
        self.flight.publish(Outcome::Failed);
        tracing::warn!("cached computation failed, slot released");
    }
}

impl<K, V> SingleFlightCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` finished entries
    /// (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                slots: HashMap::new(),
                clock: 0,
            }),
            capacity: capacity.max(1),
            counters: Counters::default(),
        }
    }

    /// Returns the cached value for `key`, computing it if absent.
    ///
    /// `compute` runs on the calling thread, without the cache lock held,
    /// and at most once per call. Callers that find the key in flight
    /// block until it resolves.
    ///
    /// # Errors
    ///
    /// Returns the error of `compute` if this call ran it and it failed.
    /// A caller that was waiting on someone else's failed computation
    /// retries instead of inheriting that error.
    pub fn get_or_compute<E, F>(&self, key: &K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let flight = loop {
            let mut state = self.state.lock();
            let now = state.tick();
            match state.slots.get_mut(key) {
                Some(Slot::Ready { value, last_used }) => {
                    *last_used = now;
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Arc::clone(value));
                }
                Some(Slot::InFlight(flight)) => {
                    let flight = Arc::clone(flight);
                    drop(state);
                    if let Some(value) = flight.wait() {
                        self.counters.hits.fetch_add(1, Ordering::Relaxed);
                        return Ok(value);
                    }
                }
                None => {
                    let flight = Arc::new(InFlight::new());
                    state
                        .slots
                        .insert(key.clone(), Slot::InFlight(Arc::clone(&flight)));
                    self.counters.misses.fetch_add(1, Ordering::Relaxed);
                    break flight;
                }
            }
        };

        let mut guard = FlightGuard {
            cache: self,
            key,
            flight: Arc::clone(&flight),
            armed: true,
        };
        let value = Arc::new(compute()?);
        guard.armed = false;

        {
            let mut state = self.state.lock();
            let now = state.tick();
            state.slots.insert(
                key.clone(),
                Slot::Ready {
                    value: Arc::clone(&value),
                    last_used: now,
                },
            );
            self.evict(&mut state);
        }
        self.counters.computations.fetch_add(1, Ordering::Relaxed);
        flight.publish(Outcome::Ready(Arc::clone(&value)));
        Ok(value)
    }

    fn evict(&self, state: &mut State<K, V>) {
        while state.ready_count() > self.capacity {
            let oldest = state
                .slots
                .iter()
                .filter_map(|(k, slot)| match slot {
                    Slot::Ready { last_used, .. } => Some((*last_used, k)),
                    Slot::InFlight(_) => None,
                })
                .min_by_key(|(last_used, _)| *last_used)
                .map(|(_, k)| k.clone());
            let Some(oldest) = oldest else {
                break;
            };
            state.slots.remove(&oldest);
            self.counters.evictions.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    /// Returns a finished entry without computing or waiting.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut state = self.state.lock();
        let now = state.tick();
        match state.slots.get_mut(key) {
            Some(Slot::Ready { value, last_used }) => {
                *last_used = now;
                Some(Arc::clone(value))
            }
            _ => None,
        }
    }

    /// True if a finished entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        matches!(self.state.lock().slots.get(key), Some(Slot::Ready { .. }))
    }

    /// Drops a finished entry. In-flight computations are left alone.
    pub fn invalidate(&self, key: &K) -> bool {
        let mut state = self.state.lock();
        if matches!(state.slots.get(key), Some(Slot::Ready { .. })) {
            state.slots.remove(key);
            true
        } else {
            false
        }
    }

    /// Drops every finished entry.
    pub fn clear(&self) {
        self.state
            .lock()
            .slots
            .retain(|_, slot| matches!(slot, Slot::InFlight(_)));
    }

    /// Number of finished entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().ready_count()
    }

    /// True if no finished entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of finished entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counter snapshot.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}
