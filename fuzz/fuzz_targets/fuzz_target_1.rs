#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use skipset::SkipList;

fuzz_target!(|data: &[u8]| {
    let Some((&levels, script)) = data.split_first() else {
        return;
    };

    let mut list = SkipList::with_seed(levels as usize % 16 + 1, 0).unwrap();
    let mut set = BTreeSet::new();

    for chunk in script.chunks(2) {
        let value = chunk[0] as i64;

        if chunk.len() == 2 && chunk[1] % 3 == 0 {
            assert_eq!(list.delete(value).is_ok(), set.remove(&value));
        } else {
            assert_eq!(list.insert(value), set.insert(value));
        }

        list.check_invariants().unwrap();
    }

    assert!(list.iter().eq(set.iter().copied()));
});
