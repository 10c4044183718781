//! Regression tests for the load-aware cuckoo filter.
//! 负载感知布谷鸟过滤器回归测试

use loadaware_cuckoo_filter::{CuckooFilter, CuckooFilterBuilder, DefaultHasher, Error};

fn keys(n: u32) -> Vec<Vec<u8>> {
    (0..n).map(|i| format!("key-{i:08}").into_bytes()).collect()
}

/// Every inserted and not-deleted item must be reported present.
#[test]
fn test_no_false_negatives() {
    let mut filter = CuckooFilterBuilder::new().capacity(4096).seed(1).finish();

    for key in keys(1000) {
        assert!(filter.insert(&key), "insert below threshold must succeed");
    }
    for key in keys(1000) {
        assert!(filter.contains(&key), "false negative for {key:?}");
    }
}

/// Count equals successful inserts minus successful removes.
#[test]
fn test_count_accuracy() {
    let mut filter = CuckooFilterBuilder::new().capacity(1024).seed(2).finish();
    let keys = keys(300);

    let mut expected = 0usize;
    for key in &keys {
        if filter.insert(key) {
            expected += 1;
        }
    }
    assert_eq!(filter.len(), expected);

    for key in &keys[..100] {
        if filter.remove(key) {
            expected -= 1;
        }
    }
    assert_eq!(filter.len(), expected);
}

/// insert_unique never grows the count for a present item.
#[test]
fn test_insert_unique() {
    let mut filter = CuckooFilter::new(1024);

    assert!(filter.insert_unique(b"foo"));
    assert!(!filter.insert_unique(b"foo"));
    assert!(!filter.insert_unique(b"foo"));
    assert_eq!(filter.len(), 1);
}

/// decode(encode(f)) reproduces the bucket layout byte for byte.
#[test]
fn test_encode_decode_round_trip() {
    let mut filter = CuckooFilterBuilder::new().capacity(256).seed(3).finish();
    let keys = keys(200);
    let inserted: Vec<_> = keys.iter().filter(|key| filter.insert(key)).collect();
    assert!(!inserted.is_empty());

    let bytes = filter.encode();
    assert_eq!(bytes.len(), filter.capacity());

    let restored: CuckooFilter = CuckooFilter::decode(&bytes).unwrap();
    assert_eq!(restored.len(), filter.len());
    assert_eq!(restored.capacity(), filter.capacity());
    assert_eq!(restored.encode(), bytes);

    for key in inserted {
        assert!(restored.contains(key), "lost {key:?} across round trip");
    }
}

/// Malformed input is rejected without producing a partial filter.
#[test]
fn test_decode_rejects_malformed() {
    assert!(matches!(
        CuckooFilter::<DefaultHasher>::decode(&[]),
        Err(Error::InvalidLength(0))
    ));
    assert!(matches!(
        CuckooFilter::<DefaultHasher>::decode(&[1, 2, 3]),
        Err(Error::InvalidLength(3))
    ));
    assert!(matches!(
        CuckooFilter::<DefaultHasher>::decode(&[0; 10]),
        Err(Error::InvalidLength(10))
    ));
    // 24 bytes decode to 6 buckets, which no power-of-two index can address
    // 24 字节解码为 6 个桶，无法用 2 的幂索引寻址
    assert!(matches!(
        CuckooFilter::<DefaultHasher>::decode(&[0; 24]),
        Err(Error::InvalidBucketCount(6))
    ));
}

/// Two buckets of known fingerprints survive the flat layout unchanged.
#[test]
fn test_decode_known_layout() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let filter: CuckooFilter = CuckooFilter::decode(&bytes).unwrap();
    assert_eq!(filter.len(), 8);
    assert_eq!(filter.capacity(), 8);
    assert_eq!(filter.encode(), bytes);
}

/// Reset empties the filter completely.
#[test]
fn test_reset() {
    let mut filter = CuckooFilterBuilder::new().capacity(512).seed(4).finish();
    let keys = keys(200);
    for key in &keys {
        filter.insert(key);
    }
    assert!(!filter.is_empty());

    filter.reset();
    assert_eq!(filter.len(), 0);
    for key in &keys {
        assert!(!filter.contains(key), "{key:?} survived reset");
    }
}

/// A saturated filter reports failure without corrupting its buckets.
#[test]
fn test_bounded_saturation() {
    let mut filter = CuckooFilterBuilder::new().capacity(8).seed(5).finish();
    assert_eq!(filter.capacity(), 8);

    let mut successes = 0usize;
    let mut failures = 0usize;
    for key in keys(100) {
        if filter.insert(&key) {
            successes += 1;
        } else {
            failures += 1;
        }
    }
    assert!(failures > 0, "a 2-bucket filter must saturate");
    assert!(filter.len() <= filter.capacity());
    assert_eq!(filter.len(), successes);

    // Occupied slots in the encoding agree with the count
    // 编码中的已占用槽与计数一致
    let bytes = filter.encode();
    assert_eq!(bytes.len(), 8);
    assert_eq!(
        bytes.iter().filter(|&&slot| slot != 0).count(),
        filter.len()
    );
}

/// Removing an item that was never inserted reports false and keeps count.
#[test]
fn test_remove_absent() {
    let mut filter = CuckooFilter::new(1024);
    assert!(!filter.remove(b"never inserted"));
    assert_eq!(filter.len(), 0);

    filter.insert(b"present");
    let before = filter.len();
    // An empty slot pair cannot collide; a populated filter may, so only
    // assert the count bound here
    // 空槽对不会碰撞；非空过滤器可能碰撞，此处只断言计数边界
    filter.remove(b"absent");
    assert!(filter.len() <= before);
}

/// Same seed, same inserts, same bytes.
#[test]
fn test_seeded_determinism() {
    let build = || CuckooFilterBuilder::new().capacity(64).seed(99).finish();
    let mut a = build();
    let mut b = build();

    for key in keys(60) {
        assert_eq!(a.insert(&key), b.insert(&key));
    }
    assert_eq!(a.encode(), b.encode());
    assert_eq!(a.relocations(), b.relocations());
}

#[test]
#[cfg(feature = "serde_support")]
fn test_serde_round_trip() {
    let mut filter = CuckooFilterBuilder::new().capacity(256).seed(6).finish();
    let keys = keys(100);
    let inserted: Vec<_> = keys.iter().filter(|key| filter.insert(key)).collect();

    let serialized = sonic_rs::to_string(&filter).unwrap();
    let deserialized: CuckooFilter = sonic_rs::from_str(&serialized).unwrap();
    assert_eq!(deserialized.len(), filter.len());
    for key in inserted {
        assert!(deserialized.contains(key));
    }
}
