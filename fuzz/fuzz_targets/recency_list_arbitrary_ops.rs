#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, pop_back, move_to_front, remove,
// get and clear, checking link consistency after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_front
                let id = list.push_front(value);
                all_ids.push(id);

                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                // pop_back
                let old_len = list.len();
                let old_back = list.back().copied();
                let popped = list.pop_back();

                assert_eq!(popped, old_back);
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(list.len(), 0);
                }
            },
            2 => {
                // move_to_front, possibly with a stale id
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_live = list.contains(id);

                    assert_eq!(list.move_to_front(id), was_live);
                    if was_live {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            },
            3 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = list.len();

                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    } else {
                        assert_eq!(list.len(), old_len);
                    }
                }
            },
            4 => {
                // get (read-only)
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    assert_eq!(list.get(id).is_some(), list.contains(id));
                }
            },
            5 => {
                // iteration agrees with len
                assert_eq!(list.iter().count(), list.len());
                assert_eq!(list.iter().len(), list.len());
            },
            6 => {
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            },
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
        idx += 2;
    }
});
