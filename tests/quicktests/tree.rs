use ordered_tree::{Comparator, Natural, Node, OrderedTree, Removal, Reversed, TreeError};
use quickcheck_macros::quickcheck;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::Op;

/// Keeps generated values in a small range so adds and removes keep colliding.
fn small(v: u8) -> u8 {
    v % 16
}

/// Checks every value in the subtree lies strictly between `lo` and `hi` under `comparator`.
fn within<C: Comparator<u8>>(
    comparator: &C,
    node: Option<&Node<u8, C>>,
    lo: Option<u8>,
    hi: Option<u8>,
) -> bool {
    let Some(node) = node else {
        return true;
    };
    let v = *node.value();
    node.count() >= 1
        && lo.map_or(true, |lo| comparator.compare(&lo, &v))
        && hi.map_or(true, |hi| comparator.compare(&v, &hi))
        && within(comparator, node.left(), lo, Some(v))
        && within(comparator, node.right(), Some(v), hi)
}

fn is_bst<C: Comparator<u8>>(tree: &OrderedTree<u8, C>, comparator: &C) -> bool {
    within(comparator, Some(tree.root()), None, None)
}

/// The multiset in `model`, listed in the order `comparator` puts it.
fn expand<C: Comparator<u8>>(model: &BTreeMap<u8, usize>, comparator: &C) -> Vec<u8> {
    let mut values: Vec<u8> = model
        .iter()
        .flat_map(|(v, count)| std::iter::repeat(*v).take(*count))
        .collect();
    values.sort_by(|a, b| {
        if comparator.equals(a, b) {
            Ordering::Equal
        } else if comparator.compare(a, b) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    });
    values
}

/// Applies a set of operations to a tree and a multiset model, checking after every step that
/// the tree agrees with the model and is still a BST under `comparator`.
fn do_ops<C: Comparator<u8>>(
    ops: &[Op<u8>],
    tree: &mut OrderedTree<u8, C>,
    comparator: &C,
    model: &mut BTreeMap<u8, usize>,
) -> bool {
    for op in ops {
        match *op {
            Op::Add(v) => {
                let v = small(v);
                tree.add(v);
                *model.entry(v).or_insert(0) += 1;
            }
            Op::Remove(v) => {
                let v = small(v);
                let expected = match model.get(&v).copied() {
                    None => Ok(Removal::NotFound),
                    Some(n) if n > 1 => Ok(Removal::Decremented { remaining: n - 1 }),
                    Some(_) if model.len() == 1 => Err(TreeError::CannotRemoveLast),
                    Some(_) => Ok(Removal::Unlinked),
                };
                if tree.remove(&v) != expected {
                    return false;
                }
                match expected {
                    Ok(Removal::Decremented { remaining }) => {
                        model.insert(v, remaining);
                    }
                    Ok(Removal::Unlinked) => {
                        model.remove(&v);
                    }
                    _ => {}
                }
            }
            Op::List => {
                let expected = expand(model, comparator);
                if tree.asc_list() != expected {
                    return false;
                }
            }
        }

        if !is_bst(tree, comparator) || tree.node_count() != model.len() {
            return false;
        }
    }

    true
}

/// Runs `ops` from a tree holding only `first` and checks the final tree against the model.
fn fuzz_with<C: Comparator<u8>>(comparator: C, first: u8, ops: &[Op<u8>]) -> bool {
    let mut tree = OrderedTree::new(small(first), comparator.clone());
    let mut model = BTreeMap::new();
    model.insert(small(first), 1);

    do_ops(ops, &mut tree, &comparator, &mut model)
        && tree.asc_list() == expand(&model, &comparator)
        && model.iter().all(|(v, count)| tree.find(v) == Some(v) && tree.count_of(v) == *count)
        && (0..16).filter(|v| !model.contains_key(v)).all(|v| tree.find(&v).is_none())
}

#[quickcheck]
fn fuzz_multiple_operations(first: u8, ops: Vec<Op<u8>>) -> bool {
    fuzz_with(Natural, first, &ops)
}

#[quickcheck]
fn fuzz_multiple_operations_reversed(first: u8, ops: Vec<Op<u8>>) -> bool {
    fuzz_with(Reversed(Natural), first, &ops)
}

#[quickcheck]
fn desc_is_reverse_of_asc(first: u8, ops: Vec<Op<u8>>) -> bool {
    let mut tree = OrderedTree::new(small(first), Natural);
    let mut model = BTreeMap::new();
    model.insert(small(first), 1);
    do_ops(&ops, &mut tree, &Natural, &mut model);

    let mut desc = tree.desc_list();
    desc.reverse();
    desc == tree.asc_list()
}

#[quickcheck]
fn count_conservation(first: u8, adds: Vec<u8>, removes: Vec<u8>) -> bool {
    let mut tree = OrderedTree::new(small(first), Natural);
    for v in &adds {
        tree.add(small(*v));
    }

    let mut effective = 0;
    for v in &removes {
        match tree.remove(&small(*v)) {
            Ok(Removal::Decremented { .. }) | Ok(Removal::Unlinked) => effective += 1,
            Ok(Removal::NotFound) | Err(_) => {}
        }
    }

    tree.len() == 1 + adds.len() - effective && tree.iter().count() == tree.len()
}

#[quickcheck]
fn draining_through_the_root(first: u8, adds: Vec<u8>) -> bool {
    let mut tree = OrderedTree::new(first, Natural);
    for v in &adds {
        tree.add(*v);
    }

    // Every removal of the current root must keep the tree a BST, until only one value is left.
    let total = tree.len();
    for removed in 1..total {
        let root = *tree.root().value();
        if tree.remove(&root).is_err() || !is_bst(&tree, &Natural) || tree.len() != total - removed {
            return false;
        }
    }

    let last = *tree.root().value();
    tree.len() == 1 && tree.remove(&last) == Err(TreeError::CannotRemoveLast)
}

#[quickcheck]
fn duplicates_decrement_before_unlinking(first: u8, value: u8, times: u8) -> bool {
    let times = usize::from(times % 8) + 1;
    let mut tree = OrderedTree::new(first, Natural);
    if first == value {
        // Make sure `value` isn't the last node so it can be unlinked.
        tree.add(first.wrapping_add(1));
    }
    for _ in 0..times {
        tree.add(value);
    }

    let already = usize::from(first == value);
    let total = times + already;
    (1..total).all(|i| tree.remove(&value) == Ok(Removal::Decremented { remaining: total - i }))
        && tree.remove(&value) == Ok(Removal::Unlinked)
        && !tree.contains(&value)
}
