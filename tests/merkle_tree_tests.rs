//! Merkle tree construction tests

use hashtree::{hash, hash_pair, Digest, HashTreeError, MerkleTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn message_leaves(messages: &[&str]) -> Vec<Digest> {
    messages.iter().map(|m| hash(m.as_bytes()).unwrap()).collect()
}

#[rstest]
#[case::two(&["a", "b"], "324140b20a63776bdab222340b613ff3f01111349599a33d0ff971ae85bae9dd")]
#[case::three(&["a", "b", "c"], "3a112362700ef3363f90cff3f1dfbf451fb0a4ee170efdb849bf8667e777e595")]
#[case::four(&["a", "b", "c", "d"], "993c45455f7a6ddfe761f9cc0dff6a5bb38aad1bd10931a177967752b22df3b4")]
fn test_known_roots(#[case] messages: &[&str], #[case] expected: &str) {
    let tree = MerkleTree::build(message_leaves(messages)).unwrap();
    assert_eq!(tree.root().to_hex(), expected);
}

#[test]
fn test_four_leaf_structure() {
    let leaves = message_leaves(&["a", "b", "c", "d"]);
    let tree = MerkleTree::build(leaves.clone()).unwrap();

    let ab = hash_pair(&leaves[0], &leaves[1]);
    let cd = hash_pair(&leaves[2], &leaves[3]);
    assert_eq!(tree.root(), hash_pair(&ab, &cd));
    assert_eq!(tree.leaf_count(), 4);
    assert_eq!(tree.node_count(), 7);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.leaves(), leaves.as_slice());
}

#[test]
fn test_five_leaves_split_three_two() {
    let leaves = message_leaves(&["a", "b", "c", "d", "e"]);
    let tree = MerkleTree::build(leaves.clone()).unwrap();

    let left = hash_pair(&hash_pair(&leaves[0], &leaves[1]), &leaves[2]);
    let right = hash_pair(&leaves[3], &leaves[4]);
    assert_eq!(tree.root(), hash_pair(&left, &right));
}

#[test]
fn test_single_leaf() {
    let leaf = hash(b"solo").unwrap();
    let tree = MerkleTree::build(vec![leaf]).unwrap();
    assert_eq!(tree.root(), leaf);
    assert_eq!(tree.depth(), 0);
}

#[test]
fn test_empty_leaves_rejected() {
    let result = MerkleTree::build(Vec::new());
    assert!(matches!(result, Err(HashTreeError::EmptyInput)));

    let messages: [&str; 0] = [];
    assert!(MerkleTree::from_messages(&messages).is_err());
}

#[test]
fn test_order_matters() {
    let forward = MerkleTree::build(message_leaves(&["a", "b", "c"])).unwrap();
    let reversed = MerkleTree::build(message_leaves(&["c", "b", "a"])).unwrap();
    assert_ne!(forward.root(), reversed.root());
}

#[test]
fn test_duplicate_leaves_allowed() {
    let tree = MerkleTree::build(message_leaves(&["x", "x", "x"])).unwrap();
    assert_eq!(tree.leaf_count(), 3);
    assert_eq!(tree.position(&hash(b"x").unwrap()), Some(0));
}

#[test]
fn test_large_tree_builds_without_recursion() {
    let filler = hash(b"filler").unwrap();
    let leaves = vec![filler; 100_000];
    let tree = MerkleTree::build(leaves).unwrap();
    assert_eq!(tree.node_count(), 199_999);
    assert_eq!(tree.depth(), 17);
}

proptest! {
    #[test]
    fn prop_shape_invariants(n in 1usize..300) {
        let leaves: Vec<Digest> = (0..n)
            .map(|i| hash(&(i as u64).to_be_bytes()).unwrap())
            .collect();
        let tree = MerkleTree::build(leaves).unwrap();

        prop_assert_eq!(tree.node_count(), 2 * n - 1);
        prop_assert!(n <= 1 << tree.depth());
        prop_assert!(tree.depth() == 0 || n > 1 << (tree.depth() - 1));
    }
}
