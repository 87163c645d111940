//! Integration Tests for the public cache API
//!
//! Drives `Cache` and `Session` through the crate's public surface only.

use std::sync::{Arc, Mutex};

use geecache::{Cache, Session, Value};

// == Helper Types ==

/// A value whose reported size is fixed, independent of its contents.
#[derive(Debug, Clone, PartialEq)]
struct Blob {
    id: u32,
    size: usize,
}

impl Value for Blob {
    fn byte_len(&self) -> usize {
        self.size
    }
}

fn blob(id: u32, size: usize) -> Blob {
    Blob { id, size }
}

// == Cache Scenarios ==

#[test]
fn test_hit_and_miss() {
    let mut cache = Cache::new(0, None);
    cache.add("key1", "1234".to_string());

    assert_eq!(cache.get("key1").map(String::as_str), Some("1234"));
    assert!(cache.get("key2").is_none());
}

#[test]
fn test_capacity_of_two_entries_evicts_first() {
    let capacity = "key1".len() + "key2".len() + "value1".len() + "value2".len();
    let mut cache = Cache::new(capacity, None);

    cache.add("key1", "value1".to_string());
    cache.add("key2", "value2".to_string());
    cache.add("k3", "v3".to_string());

    assert!(cache.get("key1").is_none());
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_eviction_callback_fires_oldest_first() {
    let keys = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&keys);
    let mut cache = Cache::with_eviction_callback(10, move |key, _value: String| {
        sink.lock().unwrap().push(key);
    });

    cache.add("key1", "123456".to_string());
    cache.add("k2", "k2".to_string());
    cache.add("k3", "k3".to_string());
    cache.add("k4", "k4".to_string());

    assert_eq!(*keys.lock().unwrap(), ["key1", "k2"]);
}

#[test]
fn test_update_in_place_replaces_size() {
    let mut cache = Cache::new(0, None);
    cache.add("key", "1".to_string());
    cache.add("key", "111".to_string());

    assert_eq!(cache.used_bytes(), "key".len() + "111".len());
}

#[test]
fn test_custom_value_sizes() {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let mut cache = Cache::with_eviction_callback(100, move |_key, value: Blob| {
        sink.lock().unwrap().push(value.id);
    });

    cache.add("a", blob(1, 40));
    cache.add("b", blob(2, 40));
    // Touch "a" so "b" is the oldest
    assert_eq!(cache.get("a"), Some(&blob(1, 40)));
    cache.add("c", blob(3, 40));

    assert_eq!(*evicted.lock().unwrap(), [2u32]);
    assert_eq!(cache.used_bytes(), 82);
    assert_eq!(cache.keys().collect::<Vec<_>>(), ["c", "a"]);
}

#[test]
fn test_zero_sized_values_still_charge_keys() {
    let mut cache = Cache::new(5, None);

    cache.add("ab", blob(1, 0));
    cache.add("cd", blob(2, 0));
    cache.add("ef", blob(3, 0));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.used_bytes(), 4);
    assert!(!cache.contains("ab"));
}

#[test]
fn test_cache_behind_mutex() {
    let shared = Arc::new(Mutex::new(Cache::<String>::new(0, None)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                shared
                    .lock()
                    .unwrap()
                    .add(format!("key{}", i), format!("value{}", i));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let cache = shared.lock().unwrap();
    assert_eq!(cache.len(), 4);
    assert_eq!(cache.used_bytes(), 4 * ("key0".len() + "value0".len()));
}

#[test]
fn test_stats_track_lookups_and_evictions() {
    let mut cache = Cache::new(8, None);

    cache.add("a", "123".to_string());
    cache.add("b", "123".to_string());
    cache.add("c", "123".to_string());
    cache.get("a");
    cache.get("c");

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.used_bytes, 8);
}

// == Session Scenarios ==

#[test]
fn test_session_script() {
    let mut session = Session::new(10);
    let script = [
        "# fill past the budget",
        "add key1 123456",
        "add k2 k2",
        "",
        "get key1",
        "add k3 k3",
        "add k4 k4",
        "len",
        "peek k4",
        "nonsense",
    ];

    let replies: Vec<String> = script
        .iter()
        .filter_map(|line| session.respond(line).unwrap())
        .collect();

    assert_eq!(
        replies,
        [
            r#"{"key":"key1","evicted":[]}"#,
            r#"{"key":"k2","evicted":["key1"]}"#,
            r#"{"error":"Key not found: key1"}"#,
            r#"{"key":"k3","evicted":[]}"#,
            r#"{"key":"k4","evicted":["k2"]}"#,
            r#"{"len":2}"#,
            r#"{"key":"k4","value":"k4"}"#,
            r#"{"error":"Invalid command: unknown verb 'nonsense'"}"#,
        ]
    );
}
