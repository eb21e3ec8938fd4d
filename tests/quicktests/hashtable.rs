use iterbst::{HashTable, HashTableConfig};

use std::collections::HashMap;

use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations(ops: Vec<Op<String, i64>>) -> bool {
    // Few buckets so chains get long.
    let mut table = HashTable::new(HashTableConfig { buckets: 3 }).unwrap();
    let mut map = HashMap::new();

    for op in &ops {
        match op {
            Op::Insert(k, v) => {
                table.insert(k, *v);
                map.insert(k.clone(), *v);
            }
            Op::Remove(k) => {
                table.delete(k);
                map.remove(k);
            }
        }
    }

    table.len() == map.len()
        && map.iter().all(|(k, v)| table.get(k) == Some(v))
        && table.entries().all(|entry| map.get(entry.key()) == Some(entry.value()))
}

#[quickcheck]
fn clear_forgets_everything(keys: Vec<String>) -> bool {
    let mut table = HashTable::default();
    for key in &keys {
        table.insert(key, ());
    }
    table.clear();

    table.is_empty() && keys.iter().all(|key| table.search(key).is_none())
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trips_through_json() {
    let config = HashTableConfig { buckets: 17 };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"buckets":17}"#);

    let loaded: HashTableConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, config);

    // Missing fields fall back to the defaults.
    let defaulted: HashTableConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaulted, HashTableConfig::default());
}
