use iterbst::{ItemsBuffer, Node, Tree};

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                bst.delete(k);
                map.remove(k);
            }
        }
    }
}

fn keys<K: Copy, V>(items: &ItemsBuffer<&Node<K, V>>) -> Vec<K> {
    items.iter().map(|node| *node.key()).collect()
}

/// Height of the subtree at `node`, or `None` if some node in it is out of balance.
fn balanced_height<K, V>(node: Option<&Node<K, V>>) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    let left = balanced_height(node.left())?;
    let right = balanced_height(node.right())?;
    (left.abs_diff(right) <= 1).then(|| left.max(right) + 1)
}

#[quickcheck]
fn fuzz_multiple_operations_char(ops: Vec<Op<char, i32>>) -> bool {
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len() && map.keys().all(|key| tree.search(key) == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<char>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.search(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<char>, nots: Vec<char>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    let mut items = ItemsBuffer::new();
    tree.inorder(&mut items).unwrap();
    let distinct: HashSet<_> = still_present.into_iter().collect();
    let mut expected: Vec<_> = distinct.into_iter().collect();
    expected.sort_unstable();

    deletes.iter().all(|x| tree.search(x).is_none()) && keys(&items) == expected
}

#[quickcheck]
fn preorder_starts_and_postorder_ends_at_root(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, ());
    }

    let mut pre = ItemsBuffer::new();
    let mut post = ItemsBuffer::new();
    tree.preorder(&mut pre).unwrap();
    tree.postorder(&mut post).unwrap();

    let pre = keys(&pre);
    let post = keys(&post);
    let root_first = pre.first() == tree.root().map(Node::key);
    let root_last = post.last() == tree.root().map(Node::key);
    let mut sorted_pre = pre.clone();
    let mut sorted_post = post.clone();
    sorted_pre.sort_unstable();
    sorted_post.sort_unstable();

    root_first && root_last && sorted_pre == sorted_post && pre.len() == tree.len()
}

#[quickcheck]
fn balance_any_tree(xs: Vec<u16>, deletes: Vec<u16>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, x.to_string());
    }
    for delete in &deletes {
        tree.delete(delete);
    }
    let before: Vec<_> = tree.iter().map(|(k, v)| (*k, v.clone())).collect();

    tree.balance().unwrap();

    let after: Vec<_> = tree.iter().map(|(k, v)| (*k, v.clone())).collect();
    before == after && balanced_height(tree.root()) == Some(tree.height())
}

#[test]
fn delete_root_promotes_predecessor() {
    let mut tree = Tree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key, key * 10);
    }

    let mut items = ItemsBuffer::new();
    tree.inorder(&mut items).unwrap();
    assert_eq!(keys(&items), [1, 3, 4, 5, 7, 8, 9]);
    drop(items);

    tree.delete(&5);
    assert_eq!(tree.root().map(|root| *root.key()), Some(4));
    assert_eq!(tree.search(&4), Some(&40));

    let mut items = ItemsBuffer::new();
    tree.inorder(&mut items).unwrap();
    assert_eq!(keys(&items), [1, 3, 4, 7, 8, 9]);
}

#[test]
fn balance_ascending_chain() {
    let mut tree = Tree::new();
    for key in 1..=5 {
        tree.insert(key, ());
    }
    assert_eq!(tree.height(), 5);

    tree.balance().unwrap();

    assert!(tree.height() <= 3);
    assert_eq!(tree.root().map(|root| *root.key()), Some(3));
}
