use ordered_tree::{Key, Locate, Order, OrderedTree};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a counting map.
/// The tree holds duplicates, so the map tracks how many copies of each key are live.
fn do_ops(ops: &[Op<i8>], tree: &mut OrderedTree, model: &mut BTreeMap<Key, usize>) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                tree.insert(k.into());
                *model.entry(k.into()).or_insert(0) += 1;
            }
            Op::Delete(k) => {
                let k = Key::from(k);
                let expected = match model.get_mut(&k) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(&k);
                        }
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.delete(k), expected);
            }
        }
    }
}

/// Every key in the model, repeated by its count, in ascending order.
fn expand(model: &BTreeMap<Key, usize>) -> Vec<Key> {
    model
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

fn tree_of(xs: &[i8]) -> OrderedTree {
    let mut tree = OrderedTree::new();
    for &x in xs {
        tree.insert(x.into());
    }
    tree
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model);

    let expected = expand(&model);
    tree.len() == expected.len()
        && tree.traverse(Order::In) == expected
        && (i8::MIN..=i8::MAX).all(|x| {
            let x = Key::from(x);
            tree.contains(x) == model.contains_key(&x)
        })
        && tree.check_invariants().is_ok()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|&x| {
        let x = Key::from(x);
        tree.find(x).map(|id| tree.key(id)) == Some(Ok(x))
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|&x| tree.find(x.into()).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    // Delete every copy so the key is really gone.
    for &delete in &deletes {
        while tree.delete(delete.into()) {}
    }

    let mut still_present = xs;
    for delete in &deletes {
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|&x| tree.find(x.into()).is_none())
        && still_present.iter().all(|&x| tree.find(x.into()).is_some())
}

#[quickcheck]
fn deleting_everything_empties_the_tree(xs: Vec<i8>, rotate: usize) -> bool {
    let mut tree = tree_of(&xs);

    // Delete in a different order than insertion.
    let mut order = xs.clone();
    if !order.is_empty() {
        let by = rotate % order.len();
        order.rotate_left(by);
        order.reverse();
    }

    order.iter().all(|&x| tree.delete(x.into()))
        && tree.is_empty()
        && tree.len() == 0
        && tree.root().is_none()
        && xs.iter().all(|&x| tree.find(x.into()).is_none())
}

#[quickcheck]
fn failed_delete_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
    let xs: Vec<_> = xs.into_iter().filter(|&x| x != missing).collect();
    let mut tree = tree_of(&xs);
    let pre = tree.traverse(Order::Pre);

    !tree.delete(missing.into()) && tree.traverse(Order::Pre) == pre && tree.len() == xs.len()
}

#[quickcheck]
fn pre_order_rebuilds_the_same_tree(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    do_ops(&ops, &mut tree, &mut BTreeMap::new());

    let pre = tree.traverse(Order::Pre);
    let rebuilt = pre.iter().fold(OrderedTree::new(), |mut rebuilt, &key| {
        rebuilt.insert(key);
        rebuilt
    });

    rebuilt.traverse(Order::Pre) == pre && rebuilt.traverse(Order::Post) == tree.traverse(Order::Post)
}

#[quickcheck]
fn locate_agrees_with_find(xs: Vec<i8>, probe: i8) -> bool {
    let tree = tree_of(&xs);
    let probe = Key::from(probe);

    match tree.locate(probe) {
        None => tree.is_empty(),
        Some(Locate::Found(id)) => tree.find(probe) == Some(id),
        Some(Locate::Vacant { parent, side }) => {
            let slot = match side {
                ordered_tree::Side::Left => tree.left(parent),
                ordered_tree::Side::Right => tree.right(parent),
            };
            tree.find(probe).is_none() && slot == Ok(None)
        }
    }
}

#[test]
fn scenario_from_seven_keys() {
    let mut tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);

    assert_eq!(tree.traverse(Order::In), vec![20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.traverse(Order::Pre), vec![50, 30, 20, 40, 70, 60, 80]);

    let thirty = tree.find(30).unwrap();
    assert!(tree.delete(30));
    assert_eq!(tree.key(thirty), Ok(40));
    assert_eq!(tree.traverse(Order::In), vec![20, 40, 50, 60, 70, 80]);

    let before = tree.traverse(Order::Pre);
    assert!(!tree.delete(99));
    assert_eq!(tree.traverse(Order::Pre), before);
}

#[test]
fn find_on_single_node_tree() {
    let mut tree = OrderedTree::new();
    let five = tree.insert(5);

    assert_eq!(tree.find(5), Some(five));
    assert_eq!(tree.find(6), None);
    assert_eq!(tree.locate(6).map(Locate::node), Some(five));
}
