//! Early-stop semantics of the visitor walks.

use shardedmap::{BackendKind, ShardedMap};
use std::ops::ControlFlow;

fn visit_order(map: &ShardedMap<u32, u32>) -> Vec<u32> {
    let mut order = Vec::new();
    let _ = map.for_each(|k, _| {
        order.push(*k);
        ControlFlow::Continue(())
    });
    order
}

#[test]
fn test_stop_sees_exact_prefix() {
    for kind in [BackendKind::Simple, BackendKind::Dense] {
        let map = ShardedMap::new(4, kind).unwrap();
        for i in 0..64 {
            map.insert(i, i);
        }

        // With no writes in between, the walk order is repeatable.
        let full = visit_order(&map);
        assert_eq!(full.len(), 64);

        for stop_at in [0, 1, 17, 40, 63] {
            let stop_key = full[stop_at];
            let mut seen = Vec::new();
            let flow = map.for_each(|k, _| {
                seen.push(*k);
                if *k == stop_key {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });

            assert!(flow.is_break());
            assert_eq!(seen, full[..=stop_at].to_vec());
        }
    }
}

#[test]
fn test_stop_skips_remaining_shards() {
    let map = ShardedMap::new(8, BackendKind::Simple).unwrap();
    for i in 0..400 {
        map.insert(i, i);
    }

    // Stop on the first entry of the second shard walked.
    let mut shards_seen = Vec::new();
    let flow = map.for_each(|k, _| {
        let shard = map.shard_index(k);
        shards_seen.push(shard);
        if shard != shards_seen[0] {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    assert!(flow.is_break());
    let first = shards_seen[0];
    let loads = map.shard_loads();
    assert_eq!(shards_seen.len(), loads[first] + 1);
    let second = *shards_seen.last().unwrap();
    assert!(second > first);
    assert!(shards_seen[..shards_seen.len() - 1].iter().all(|&s| s == first));
}

#[test]
fn test_shards_are_walked_in_order() {
    let map = ShardedMap::new(5, BackendKind::Dense).unwrap();
    for i in 0..500 {
        map.insert(i, i);
    }

    let mut shard_sequence = Vec::new();
    let _ = map.for_each(|k, _| {
        shard_sequence.push(map.shard_index(k));
        ControlFlow::Continue(())
    });

    assert!(shard_sequence.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_single_shard_stop() {
    let map = ShardedMap::new(2, BackendKind::Simple).unwrap();
    for i in 0..100 {
        map.insert(i, i);
    }

    let mut visited = 0;
    let flow = map
        .for_each_in_shard(1, |_, _| {
            visited += 1;
            if visited == 10 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

    assert!(flow.is_break());
    assert_eq!(visited, 10.min(map.shard_loads()[1]));
}
