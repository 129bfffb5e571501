//! Ordered lookup in builtin property tables
//!
//! Every builtin variant keeps its lazily instantiable property names in a
//! table sorted by magic-string id. All tables share this one search.

/// Binary search for `key` in the strictly ascending `sorted_ids`.
///
/// Returns the index of `key`, or `None` if it is not present. Tables are
/// checked for ordering in debug builds only.
pub fn find<T: Ord + Copy>(sorted_ids: &[T], key: T) -> Option<usize> {
    debug_assert!(
        is_strictly_ascending(sorted_ids),
        "builtin property table is not strictly ascending"
    );

    let mut min = 0usize;
    let mut max = sorted_ids.len();

    while min < max {
        let mid = min + (max - min) / 2;
        let probe = sorted_ids[mid];

        if probe == key {
            return Some(mid);
        } else if probe > key {
            max = mid;
        } else {
            min = mid + 1;
        }
    }

    None
}

/// Check the ordering precondition of [`find`].
pub fn is_strictly_ascending<T: Ord>(ids: &[T]) -> bool {
    ids.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use otter_ecma_core::MagicStringId;
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    #[test]
    fn test_find_magic_ids() {
        let table = [
            MagicStringId::Undefined,
            MagicStringId::NaN,
            MagicStringId::Infinity,
            MagicStringId::ParseInt,
        ];
        assert_eq!(find(&table, MagicStringId::Undefined), Some(0));
        assert_eq!(find(&table, MagicStringId::ParseInt), Some(3));
        assert_eq!(find(&table, MagicStringId::Infinity), Some(2));
        assert_eq!(find(&table, MagicStringId::Eval), None);
        assert_eq!(find(&table, MagicStringId::Tan), None);
    }

    #[test]
    fn test_find_empty_table() {
        let table: [MagicStringId; 0] = [];
        assert_eq!(find(&table, MagicStringId::Length), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not strictly ascending")]
    fn test_unsorted_table_is_fatal_in_debug() {
        find(&[3u16, 1, 2], 1);
    }

    proptest! {
        #[test]
        fn find_returns_the_unique_matching_index(
            ids in btree_set(any::<u16>(), 0..64),
            key in any::<u16>(),
        ) {
            let table: Vec<u16> = ids.into_iter().collect();
            match find(&table, key) {
                Some(index) => prop_assert_eq!(table[index], key),
                None => prop_assert!(!table.contains(&key)),
            }
        }

        #[test]
        fn every_member_is_found(ids in btree_set(any::<u16>(), 1..64)) {
            let table: Vec<u16> = ids.into_iter().collect();
            for (index, &id) in table.iter().enumerate() {
                prop_assert_eq!(find(&table, id), Some(index));
            }
        }
    }
}
