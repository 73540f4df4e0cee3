#![no_main]

use std::collections::HashMap;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use lrukit::policy::weak_lru::{Lookup, RcWeakLruCache};

// Fuzz arbitrary operation sequences on WeakLruCache
//
// Owners are created and dropped by the input as well, so entries expire
// at arbitrary points. Expired entries must stay indexed until they are
// deleted, evicted or purged.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap_byte % 16) + 2;
    let mut cache: RcWeakLruCache<u8, u32> = RcWeakLruCache::new(capacity);
    let mut owners: HashMap<u8, Rc<u32>> = HashMap::new();

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 7;
        let key = pair[1] % 32;

        match op {
            0 => {
                // put with a live owner
                let owner = Rc::new(u32::from(key));
                let old_len = cache.len();
                let existed = cache.contains(&key);

                cache.put(key, &owner);
                owners.insert(key, owner);

                assert_eq!(cache.recency_rank(&key), Some(0));
                if existed || old_len < capacity {
                    assert_eq!(cache.len(), old_len + usize::from(!existed));
                } else {
                    assert_eq!(cache.len(), capacity);
                }
            },
            1 => {
                // drop the owner
                owners.remove(&key);
                if cache.contains(&key) {
                    assert_eq!(cache.is_expired(&key), Some(true));
                }
            },
            2 => {
                // get
                let indexed = cache.contains(&key);
                match cache.get(&key) {
                    Some(Lookup::Live(value)) => {
                        assert_eq!(*value, u32::from(key));
                        assert!(owners.contains_key(&key));
                    },
                    Some(Lookup::Expired) => assert!(indexed),
                    None => assert!(!indexed),
                }
                if indexed {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            3 => {
                // delete
                let indexed = cache.contains(&key);
                assert_eq!(cache.delete(&key), indexed);
                assert!(!cache.contains(&key));
            },
            4 => {
                // pop_lru
                let lru = cache.keys().last().copied();
                let popped = cache.pop_lru().map(|(k, _)| k);
                assert_eq!(popped, lru);
            },
            5 => {
                // purge_expired
                let expired = cache.expired_count();
                let old_len = cache.len();
                assert_eq!(cache.purge_expired(), expired);
                assert_eq!(cache.len(), old_len - expired);
                assert_eq!(cache.expired_count(), 0);
            },
            6 => {
                // touch
                let indexed = cache.contains(&key);
                assert_eq!(cache.touch(&key), indexed);
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
