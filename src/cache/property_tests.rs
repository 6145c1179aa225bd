//! Property-Based Tests for cache keys and freshness
//!
//! Uses proptest to check fingerprint determinism and injectivity.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::cache::CacheEntry;
use crate::models::DistrictQuery;
use crate::params::ParamSet;

// == Strategies ==
/// Parameter names, unique per set
fn param_map_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z\\[\\]_-]{1,16}", "[ -~]{0,24}", 1..8)
}

/// Values that may contain key separators
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &=%-]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any permutation of the same pairs yields the same fingerprint.
    #[test]
    fn prop_key_ignores_insertion_order(
        (pairs, shuffled) in param_map_strategy().prop_flat_map(|map| {
            let pairs: Vec<(String, String)> = map.into_iter().collect();
            (Just(pairs.clone()), Just(pairs).prop_shuffle())
        }),
    ) {
        let forward: ParamSet = pairs.into_iter().collect();
        let shuffled: ParamSet = shuffled.into_iter().collect();

        prop_assert_eq!(forward.cache_key(), shuffled.cache_key());
    }

    // Changing any single value changes the fingerprint.
    #[test]
    fn prop_key_differs_on_value_change(
        map in param_map_strategy(),
        index in any::<prop::sample::Index>(),
        replacement in value_strategy(),
    ) {
        let pairs: Vec<(String, String)> = map.into_iter().collect();
        let target = index.index(pairs.len());
        prop_assume!(pairs[target].1 != replacement);

        let original: ParamSet = pairs.clone().into_iter().collect();
        let changed: ParamSet = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (n, v))| if i == target { (n, replacement.clone()) } else { (n, v) })
            .collect();

        prop_assert_ne!(original.cache_key(), changed.cache_key());
    }

    // Distinct district queries never share a fingerprint.
    #[test]
    fn prop_distinct_queries_distinct_keys(
        a in (value_strategy(), value_strategy(), "[0-9]{1,3}", "[0-9]{1,3}"),
        b in (value_strategy(), value_strategy(), "[0-9]{1,3}", "[0-9]{1,3}"),
    ) {
        let qa = DistrictQuery::new(format!("S{}", a.0), format!("Y{}", a.1)).with_page(a.2, a.3);
        let qb = DistrictQuery::new(format!("S{}", b.0), format!("Y{}", b.1)).with_page(b.2, b.3);
        let va = qa.validate().unwrap();
        let vb = qb.validate().unwrap();

        let ka = ParamSet::for_query("key", &va).cache_key();
        let kb = ParamSet::for_query("key", &vb).cache_key();

        prop_assert_eq!(va == vb, ka == kb);
    }

    // Freshness is exactly "age < ttl".
    #[test]
    fn prop_freshness_matches_age(
        written in 0u64..1_000_000_000,
        age in 0u64..10_000_000,
        ttl_secs in 0u64..10_000,
    ) {
        let entry = CacheEntry::at(written, serde_json::Value::Null);
        let fresh = entry.is_fresh_at(written + age, Duration::from_secs(ttl_secs));
        prop_assert_eq!(fresh, age < ttl_secs * 1000);
    }
}
