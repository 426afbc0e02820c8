//! Hash function tests
//!
//! Known-answer vectors plus properties of the padding and pair hashing.

use hashtree::{hash, hash_file, hash_pair, hash_string, Digest};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[rstest]
#[case::empty("", "d6dd8bda1faabdac40e3309bebaa85c8c6e28845cd7c1e1bb0259b7f0bc6b8fb")]
#[case::abc("abc", "4665555433f86fd41c4a99480957e19a020030648e7f0593bcb0346e44246267")]
#[case::single_a("a", "08fd9bc3b03f66cf80c73a4e95f5b289491b73a0496d9b71a819a43fb3833d99")]
#[case::single_d("d", "58926a8c94b8f005ca02c3f65d3766b06613b0e9e71c27bcf7915e6bbd841ca7")]
fn test_known_vectors(#[case] message: &str, #[case] expected: &str) {
    assert_eq!(hash(message.as_bytes()).unwrap().to_hex(), expected);
    assert_eq!(hash_string(message).unwrap().to_hex(), expected);
}

#[rstest]
#[case::one_block_tail(55, "f351cd1255995d1d1ee371814175e68b19d0a34c2f384e25c158b55588053e71")]
#[case::two_block_tail(56, "3d43f17bcc622f32724fb197dbcd389ce614e342c93e1bca008f341f147fdad2")]
#[case::exact_block(64, "0697c74e3574b2b48f8986f098482bbb39a5aa948ffb59ef947f45d338859fe9")]
fn test_padding_boundaries(#[case] length: usize, #[case] expected: &str) {
    let message = vec![b'a'; length];
    assert_eq!(hash(&message).unwrap().to_hex(), expected);
}

#[test]
fn test_repeated_pattern_vector() {
    let message = "abcd".repeat(16);
    assert_eq!(
        hash(message.as_bytes()).unwrap().to_hex(),
        "8b22952cf32506189ff47182a33eb97cf469c1c52074cb05c379029df0cc5283"
    );
}

#[test]
fn test_is_not_standard_sm3() {
    // GB/T 32905 digest of "abc"; the round constants are omitted here
    let standard = "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0";
    assert_ne!(hash(b"abc").unwrap().to_hex(), standard);
}

#[test]
fn test_hash_file_matches_hash() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"abc").unwrap();
    assert_eq!(hash_file(file.path()).unwrap(), hash(b"abc").unwrap());
}

#[test]
fn test_hash_file_missing() {
    assert!(hash_file(std::path::Path::new("/nonexistent/hashtree/input")).is_err());
}

proptest! {
    #[test]
    fn prop_hash_pair_is_hash_of_concatenation(
        left in any::<[u8; 32]>(),
        right in any::<[u8; 32]>(),
    ) {
        let (left, right) = (Digest::from_bytes(left), Digest::from_bytes(right));
        let mut joined = left.as_bytes().to_vec();
        joined.extend_from_slice(right.as_bytes());

        prop_assert_eq!(hash_pair(&left, &right), hash(&joined).unwrap());
    }

    #[test]
    fn prop_hash_is_deterministic(message in proptest::collection::vec(any::<u8>(), 0..300)) {
        prop_assert_eq!(hash(&message).unwrap(), hash(&message).unwrap());
    }

    #[test]
    fn prop_appending_a_byte_changes_digest(
        message in proptest::collection::vec(any::<u8>(), 0..200),
        extra in any::<u8>(),
    ) {
        let mut longer = message.clone();
        longer.push(extra);
        prop_assert_ne!(hash(&message).unwrap(), hash(&longer).unwrap());
    }

    #[test]
    fn prop_hex_round_trip(bytes in any::<[u8; 32]>()) {
        let digest = Digest::from_bytes(bytes);
        prop_assert_eq!(Digest::from_hex(&digest.to_hex_upper()).unwrap(), digest);
    }
}
