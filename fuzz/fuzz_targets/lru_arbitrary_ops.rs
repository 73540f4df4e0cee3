#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte picks the capacity; each following pair is (op, key).
// A VecDeque model (front = most recent) is kept in lockstep.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap_byte % 16) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);
    let mut model: VecDeque<(u8, u32)> = VecDeque::new();
    let mut stamp = 0u32;

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 6;
        let key = pair[1] % 32;
        stamp = stamp.wrapping_add(1);

        let model_pos = model.iter().position(|(k, _)| *k == key);

        match op {
            0 => {
                // put
                let previous = cache.put(key, stamp);
                match model_pos {
                    Some(pos) => {
                        let (_, old) = model.remove(pos).unwrap();
                        assert_eq!(previous, Some(old));
                    },
                    None => {
                        assert_eq!(previous, None);
                        if model.len() == capacity {
                            model.pop_back();
                        }
                    },
                }
                model.push_front((key, stamp));
            },
            1 => {
                // get
                let got = cache.get(&key).copied();
                match model_pos {
                    Some(pos) => {
                        let entry = model.remove(pos).unwrap();
                        assert_eq!(got, Some(entry.1));
                        model.push_front(entry);
                    },
                    None => assert_eq!(got, None),
                }
            },
            2 => {
                // peek
                let got = cache.peek(&key).copied();
                assert_eq!(got, model_pos.map(|pos| model[pos].1));
            },
            3 => {
                // delete
                assert_eq!(cache.delete(&key), model_pos.is_some());
                if let Some(pos) = model_pos {
                    model.remove(pos);
                }
            },
            4 => {
                // pop_lru
                assert_eq!(cache.pop_lru(), model.pop_back());
            },
            5 => {
                // touch
                assert_eq!(cache.touch(&key), model_pos.is_some());
                if let Some(pos) = model_pos {
                    let entry = model.remove(pos).unwrap();
                    model.push_front(entry);
                }
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.len(), model.len());
        assert!(cache.check_invariants().is_ok());
    }

    let order: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
    let expected: Vec<_> = model.into_iter().collect();
    assert_eq!(order, expected);
});
