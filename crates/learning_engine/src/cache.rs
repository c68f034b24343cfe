//! Bounded map with least-recently-used eviction
//!
//! Shared by the transposition table and the learned value table. Each slot
//! carries a monotonically increasing stamp; a `BTreeMap` from stamp to key
//! keeps the recency order so touching and evicting are both logarithmic.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    stamp: u64,
}

/// Map holding at most `capacity` entries, evicting the least recently used
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    slots: HashMap<K, Slot<V>>,
    order: BTreeMap<u64, K>,
    capacity: usize,
    tick: u64,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create an empty cache; a zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::new(),
            order: BTreeMap::new(),
            capacity: capacity.max(1),
            tick: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up without changing recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).map(|slot| &slot.value)
    }

    /// Look up and mark as most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let stamp = self.next_stamp();
        let slot = self.slots.get_mut(key)?;
        if let Some(owner) = self.order.remove(&slot.stamp) {
            self.order.insert(stamp, owner);
        }
        slot.stamp = stamp;
        Some(&slot.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Insert or replace, marking the key as most recently used.
    /// Returns the evicted entry when the cache was full.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let stamp = self.next_stamp();

        if let Some(slot) = self.slots.get_mut(&key) {
            self.order.remove(&slot.stamp);
            slot.value = value;
            slot.stamp = stamp;
            self.order.insert(stamp, key);
            return None;
        }

        let evicted = if self.slots.len() >= self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        self.order.insert(stamp, key.clone());
        self.slots.insert(key, Slot { value, stamp });
        evicted
    }

    /// Remove and return the least recently used entry
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let slot = self.slots.remove(&key)?;
        Some((key, slot.value))
    }

    /// Entries from least to most recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .values()
            .filter_map(move |key| self.slots.get(key).map(|slot| (key, &slot.value)))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    /// Change the bound, evicting the oldest entries if the cache shrank
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.slots.len() > self.capacity {
            if self.pop_oldest().is_none() {
                break;
            }
        }
    }

    fn next_stamp(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get("a"), Some(&1));

        let evicted = cache.insert("c", 3);
        assert_eq!(evicted, Some(("b", 2)));
        assert!(cache.contains_key("a"));
        assert!(cache.contains_key("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_peek_does_not_touch() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.peek("a"), Some(&1));

        let evicted = cache.insert("c", 3);
        assert_eq!(evicted, Some(("a", 1)));
    }

    #[test]
    fn test_replace_keeps_size() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        assert_eq!(cache.insert("a", 5), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek("a"), Some(&5));
    }

    #[test]
    fn test_iter_oldest_first() {
        let mut cache = LruCache::new(3);
        cache.insert(1, 'x');
        cache.insert(2, 'y');
        cache.insert(3, 'z');
        cache.get(&1);
        let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![2, 3, 1]);
    }

    #[test]
    fn test_shrinking_capacity_evicts() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.insert(i, i * 10);
        }
        cache.set_capacity(2);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key(&0));
        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&3));
    }
}
