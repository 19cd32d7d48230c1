use std::collections::HashMap;
use std::hash::Hash;

/// Groups items by key. Groups come out in the order their key first appears,
/// and items keep their input order inside each group.
pub fn group_by<'a, T, K, F>(items: &'a [T], key_of: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let key = key_of(item);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// Counts items per key, in first-appearance order.
pub fn count_by<T, K, F>(items: &[T], key_of: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    group_by(items, key_of)
        .into_iter()
        .map(|(key, members)| (key, members.len()))
        .collect()
}
