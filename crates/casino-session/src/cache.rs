//! In-memory query cache with stale-time tracking.

use casino_client::{
    CreditPackage, LeaderboardEntry, ManualPaymentConfig, ManualPaymentRequest, Transaction,
    UserProfile,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Identifies one cached backend read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    CurrentUserProfile,
    IsCallerAdmin,
    Leaderboard,
    MyTransactions,
    CreditPackages,
    MyManualPaymentRequests,
    ManualPaymentRequest(u64),
    ManualPaymentConfig,
    IsStripeConfigured,
    AllManualPaymentRequests,
    HouseEdge,
}

/// A cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Profile(Option<UserProfile>),
    Flag(bool),
    Leaderboard(Vec<LeaderboardEntry>),
    Transactions(Vec<Transaction>),
    Packages(Vec<CreditPackage>),
    PaymentRequests(Vec<ManualPaymentRequest>),
    PaymentRequest(Option<ManualPaymentRequest>),
    PaymentConfig(Option<ManualPaymentConfig>),
    HouseEdge(u64),
}

/// Conversion between a query's result type and its cached form.
pub trait CacheValue: Clone + Send + Sync + Sized {
    fn into_data(self) -> QueryData;
    fn from_data(data: QueryData) -> Option<Self>;
}

macro_rules! cache_value {
    ($ty:ty, $variant:ident) => {
        impl CacheValue for $ty {
            fn into_data(self) -> QueryData {
                QueryData::$variant(self)
            }

            fn from_data(data: QueryData) -> Option<Self> {
                match data {
                    QueryData::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

cache_value!(Option<UserProfile>, Profile);
cache_value!(bool, Flag);
cache_value!(Vec<LeaderboardEntry>, Leaderboard);
cache_value!(Vec<Transaction>, Transactions);
cache_value!(Vec<CreditPackage>, Packages);
cache_value!(Vec<ManualPaymentRequest>, PaymentRequests);
cache_value!(Option<ManualPaymentRequest>, PaymentRequest);
cache_value!(Option<ManualPaymentConfig>, PaymentConfig);
cache_value!(u64, HouseEdge);

/// Entry in the cache with freshness tracking.
struct CacheEntry {
    data: QueryData,
    updated_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.updated_at.elapsed() < stale_time
    }
}

/// Marker taken before a fetch; the fetched value is only cached if no
/// invalidation touched the key in between.
pub type Generation = u64;

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    generations: HashMap<QueryKey, Generation>,
    cleared_at: Generation,
    counter: Generation,
}

impl CacheState {
    fn next_generation(&mut self) -> Generation {
        self.counter += 1;
        self.counter
    }

    fn generation(&self, key: &QueryKey) -> Generation {
        self.generations
            .get(key)
            .copied()
            .unwrap_or(0)
            .max(self.cleared_at)
    }

    fn insert(&mut self, key: QueryKey, data: QueryData) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                updated_at: Instant::now(),
                invalidated: false,
            },
        );
    }
}

/// Shared cache of backend reads.
///
/// An entry is fresh for `stale_time` after it was written, unless it was
/// invalidated. Stale entries stay readable through [`QueryCache::peek`] until
/// they are overwritten by a successful fetch.
///
/// Every invalidation moves the key to a new [`Generation`]. A fetch that
/// started before the invalidation can still return its value to the caller,
/// but [`QueryCache::set_if_current`] will not cache it.
#[derive(Clone)]
pub struct QueryCache {
    state: Arc<RwLock<CacheState>>,
    stale_time: Duration,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Get a value if it is cached and still fresh.
    pub async fn get_fresh<T: CacheValue>(&self, key: &QueryKey) -> Option<T> {
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.stale_time))
            .and_then(|entry| T::from_data(entry.data.clone()))
    }

    /// Get a value regardless of freshness.
    pub async fn peek<T: CacheValue>(&self, key: &QueryKey) -> Option<T> {
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .and_then(|entry| T::from_data(entry.data.clone()))
    }

    /// Current generation of `key`, to pass to [`QueryCache::set_if_current`].
    pub async fn generation(&self, key: &QueryKey) -> Generation {
        self.state.read().await.generation(key)
    }

    /// Write a value, marking it fresh.
    pub async fn set<T: CacheValue>(&self, key: QueryKey, value: T) {
        self.state.write().await.insert(key, value.into_data());
    }

    /// Write a fetched value unless `key` was invalidated since `generation`.
    /// Returns whether the value was cached.
    pub async fn set_if_current<T: CacheValue>(
        &self,
        key: QueryKey,
        value: T,
        generation: Generation,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation(&key) != generation {
            debug!("Discarding outdated fetch for {:?}", key);
            return false;
        }
        state.insert(key, value.into_data());
        true
    }

    /// Modify a cached value in place. Returns false if the key is not cached.
    pub async fn update<F>(&self, key: &QueryKey, f: F) -> bool
    where
        F: FnOnce(&mut QueryData),
    {
        let mut state = self.state.write().await;
        match state.entries.get_mut(key) {
            Some(entry) => {
                f(&mut entry.data);
                entry.updated_at = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Mark entries stale so the next read refetches them.
    pub async fn invalidate(&self, keys: &[QueryKey]) {
        let mut state = self.state.write().await;
        for key in keys {
            let generation = state.next_generation();
            state.generations.insert(key.clone(), generation);
            if let Some(entry) = state.entries.get_mut(key) {
                entry.invalidated = true;
                debug!("Invalidated {:?}", key);
            }
        }
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        let generation = state.next_generation();
        state.cleared_at = generation;
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
