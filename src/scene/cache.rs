//! Content-addressed memoization of prepared scenes.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use xxhash_rust::xxh3::Xxh3;

use crate::foundation::error::WhiteboardResult;
use crate::scene::input::SceneInput;
use crate::scene::prepared::PreparedScene;

const XXH3_SEED: u64 = 0x5c3e_9a71_d2b4_6f08;

/// Default number of prepared scenes kept by [`SceneCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Stable 128-bit content hash of a [`SceneInput`].
///
/// [`SceneCache`] matches on the key alone: distinct inputs are assumed never to share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SceneKey {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl SceneKey {
    /// Hash the canonical JSON encoding of `input`.
    pub fn of(input: &SceneInput) -> WhiteboardResult<Self> {
        let bytes = input.to_canonical_json()?;
        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&bytes);
        let v = h.digest128();
        Ok(Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        })
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that prepared a new scene.
    pub misses: u64,
    /// Scenes dropped to respect the capacity.
    pub evictions: u64,
}

/// Bounded least-recently-used cache of prepared scenes keyed by content hash.
///
/// Callers discard stale entries with [`SceneCache::invalidate`] or [`SceneCache::clear`] when
/// the source image changes.
#[derive(Debug)]
pub struct SceneCache {
    capacity: usize,
    // Front is least recently used.
    entries: VecDeque<(SceneKey, Arc<PreparedScene>)>,
    stats: CacheStats,
}

impl Default for SceneCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SceneCache {
    /// Empty cache holding at most `capacity` scenes (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Return the prepared scene for `input`, preparing and caching it on a miss.
    ///
    /// Preparation errors are returned and nothing is cached.
    pub fn get_or_prepare(
        &mut self,
        input: &SceneInput,
    ) -> WhiteboardResult<(SceneKey, Arc<PreparedScene>)> {
        let key = SceneKey::of(input)?;
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.stats.hits += 1;
            tracing::debug!(%key, "scene cache hit");
            if let Some(entry) = self.entries.remove(pos) {
                let scene = Arc::clone(&entry.1);
                self.entries.push_back(entry);
                return Ok((key, scene));
            }
        }

        self.stats.misses += 1;
        tracing::debug!(%key, "scene cache miss");
        let scene = Arc::new(PreparedScene::prepare(input)?);
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
            self.stats.evictions += 1;
        }
        self.entries.push_back((key, Arc::clone(&scene)));
        Ok((key, scene))
    }

    /// Cached scene for `key`, without touching recency or counters.
    pub fn get(&self, key: &SceneKey) -> Option<Arc<PreparedScene>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, s)| Arc::clone(s))
    }

    /// Drop the scene for `key`. Returns whether it was cached.
    pub fn invalidate(&mut self, key: &SceneKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before != self.entries.len()
    }

    /// Drop every cached scene.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached scenes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cache.rs"]
mod tests;
