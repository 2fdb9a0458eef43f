//! Stamp-validated caches.
//!
//! Every cached value remembers the modification count it was computed
//! under. A read under another count recomputes; nothing is invalidated
//! eagerly. Computation always runs without holding the cache lock, so two
//! readers that both see a stale slot may both compute. The first to publish
//! wins and the other adopts the published value, which keeps every caller
//! of one stamp on the same result.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

/// A single value computed under a stamp.
pub struct CachedValue<T> {
    slot: RwLock<Option<(u64, Arc<T>)>>,
}

impl<T> Default for CachedValue<T> {
    fn default() -> Self {
        CachedValue {
            slot: RwLock::new(None),
        }
    }
}

impl<T> CachedValue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value if it was computed under `stamp`.
    pub fn get(&self, stamp: u64) -> Option<Arc<T>> {
        match &*self.slot.read() {
            Some((cached, value)) if *cached == stamp => Some(Arc::clone(value)),
            _ => None,
        }
    }

    pub fn get_or_compute(&self, stamp: u64, compute: impl FnOnce() -> T) -> Arc<T> {
        match self.try_get_or_compute(stamp, || Ok::<_, std::convert::Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for fallible
    /// computations. Errors are not cached.
    pub fn try_get_or_compute<E>(
        &self,
        stamp: u64,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(value) = self.get(stamp) {
            tracing::trace!(stamp, "cache hit");
            return Ok(value);
        }

        let computed = Arc::new(compute()?);

        let mut slot = self.slot.write();
        match &*slot {
            // Another reader published for the same stamp first.
            Some((cached, value)) if *cached == stamp => return Ok(Arc::clone(value)),
            // A newer stamp is already published; ours is only good for us.
            Some((cached, _)) if *cached > stamp => return Ok(computed),
            _ => {}
        }
        *slot = Some((stamp, Arc::clone(&computed)));
        Ok(computed)
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl<T> std::fmt::Debug for CachedValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stamp = self.slot.read().as_ref().map(|(stamp, _)| *stamp);
        f.debug_struct("CachedValue").field("stamp", &stamp).finish()
    }
}

/// A keyed table that is cleared wholesale when the stamp moves.
pub struct StampedMap<K, V> {
    table: Mutex<(u64, FxHashMap<K, V>)>,
}

impl<K, V> Default for StampedMap<K, V> {
    fn default() -> Self {
        StampedMap {
            table: Mutex::new((0, FxHashMap::default())),
        }
    }
}

impl<K: Eq + Hash, V: Clone> StampedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stamp: u64, key: &K) -> Option<V> {
        let table = self.table.lock();
        if table.0 == stamp {
            table.1.get(key).cloned()
        } else {
            None
        }
    }

    /// Store `value` under `stamp`, returning the value already stored for
    /// `key` under the same stamp if there is one.
    pub fn insert(&self, stamp: u64, key: K, value: V) -> V {
        let mut table = self.table.lock();
        if table.0 < stamp {
            tracing::trace!(old = table.0, new = stamp, "stamped table reset");
            table.1.clear();
            table.0 = stamp;
        } else if table.0 > stamp {
            return value;
        }
        table.1.entry(key).or_insert(value).clone()
    }

    pub fn try_get_or_compute<E>(
        &self,
        stamp: u64,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(stamp, &key) {
            return Ok(value);
        }
        let value = compute()?;
        Ok(self.insert(stamp, key, value))
    }

    pub fn remove(&self, key: &K) {
        self.table.lock().1.remove(key);
    }

    pub fn len(&self) -> usize {
        self.table.lock().1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
