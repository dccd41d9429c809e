use rstest::*;

use huffman_codec::coding::{decode, encode};
use huffman_codec::tree_codec::{deserialize, serialize};
use huffman_codec::{HuffmanCoder, HuffmanError, HuffmanTree, Node};

fn all_bytes() -> Vec<u8> {
    (0..=255u8).chain((0..=255u8).step_by(3)).collect()
}

fn count_leaves_of_strict_tree(node: &Node) -> usize {
    match node {
        Node::Leaf { .. } => 1,
        Node::Internal { left, right, .. } => count_leaves_of_strict_tree(left) + count_leaves_of_strict_tree(right),
    }
}

#[rstest]
#[case(b"aaab".to_vec())]
#[case(b"zzzz".to_vec())]
#[case(b"x".to_vec())]
#[case(b"ab".to_vec())]
#[case(b"LBLBLLBB".to_vec())]
#[case(b"abracadabra".to_vec())]
#[case(b"The quick brown fox jumps over the lazy dog.\n".repeat(20))]
#[case(all_bytes())]
fn coder_roundtrips(#[case] input: Vec<u8>) {
    let mut encoder = HuffmanCoder::new();
    let bits = encoder.compress(&input).expect("compression failed");
    let tokens = encoder.serialize_tree().expect("no tree after compress");

    assert!(bits.chars().all(|c| c == '0' || c == '1'));

    let mut decoder = HuffmanCoder::new();
    let decoded = decoder.decompress(&bits, &tokens).expect("decompression failed");
    assert_eq!(decoded, input);
}

#[rstest]
#[case(b"aaab".to_vec())]
#[case(b"mississippi".to_vec())]
#[case(all_bytes())]
fn tree_has_one_leaf_per_distinct_byte(#[case] input: Vec<u8>) {
    let tree = HuffmanTree::from_bytes(&input).unwrap();
    let mut distinct = input.clone();
    distinct.sort_unstable();
    distinct.dedup();

    assert_eq!(count_leaves_of_strict_tree(tree.root()), distinct.len());
    assert_eq!(tree.code_table().len(), distinct.len());
}

#[rstest]
#[case(b"abracadabra".to_vec())]
#[case(b"aaaaaaaaaaaaaaaabbbbbbbbccccddeefg".to_vec())]
#[case(all_bytes())]
fn code_table_is_prefix_free(#[case] input: Vec<u8>) {
    let table = HuffmanTree::from_bytes(&input).unwrap().code_table();
    let codes: Vec<&String> = table.values().collect();
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
            }
        }
    }
}

#[rstest]
#[case(b"banana bandana".to_vec())]
#[case(b"0101010011".to_vec())]
#[case(all_bytes())]
fn serialized_tree_decodes_identically(#[case] input: Vec<u8>) {
    let tree = HuffmanTree::from_bytes(&input).unwrap();
    let rebuilt = deserialize(&serialize(&tree)).unwrap();

    assert_eq!(rebuilt.code_table(), tree.code_table());
    assert_eq!(rebuilt.symbols(), tree.symbols());

    let bits = encode(&input, &tree.code_table()).unwrap();
    assert_eq!(decode(&bits, &rebuilt).unwrap(), input);
}

#[test]
fn aaab_scenario() {
    let mut coder = HuffmanCoder::new();
    assert_eq!(coder.compress("aaab").unwrap(), "1110");
    assert_eq!(coder.serialize_tree().unwrap(), b"LbLaB");

    // mirrored tree from another producer decodes just as well
    assert_eq!(coder.decompress("0001", b"LaLbB").unwrap(), b"aaab");
}

#[test]
fn single_symbol_policy_is_consistent() {
    let mut coder = HuffmanCoder::new();
    let bits = coder.compress("zzzz").unwrap();
    let tokens = coder.serialize_tree().unwrap();
    assert_eq!(bits, "0000");
    assert_eq!(tokens, b"Lz");
    assert_eq!(coder.decompress(&bits, &tokens).unwrap(), b"zzzz");
}

#[test]
fn output_is_reproducible() {
    let text = "equal weights everywhere: abcdefgh";
    let mut first = HuffmanCoder::new();
    let mut second = HuffmanCoder::new();
    assert_eq!(first.compress(text).unwrap(), second.compress(text).unwrap());
    assert_eq!(first.serialize_tree().unwrap(), second.serialize_tree().unwrap());
}

#[rstest]
#[case(b"".as_slice(), 0)]
#[case(b"B".as_slice(), 0)]
#[case(b"LaB".as_slice(), 2)]
#[case(b"LaLbLc".as_slice(), 6)]
#[case(b"LaQ".as_slice(), 2)]
#[case(b"LaL".as_slice(), 2)]
fn malformed_token_streams_are_rejected(#[case] tokens: &[u8], #[case] position: usize) {
    let mut coder = HuffmanCoder::new();
    match coder.decompress("", tokens) {
        Err(HuffmanError::MalformedTree { position: at, .. }) => assert_eq!(at, position),
        other => panic!("expected MalformedTree, got {other:?}"),
    }
    assert_eq!(coder.serialize_tree(), Err(HuffmanError::NoTree));
}

#[rstest]
#[case("1", b"LaLbLcBB".as_slice())]
#[case("01", b"LaLbLcBB".as_slice())]
#[case("01", b"Lz".as_slice())]
fn bad_bitstrings_are_rejected(#[case] bits: &str, #[case] tokens: &[u8]) {
    let mut coder = HuffmanCoder::new();
    assert!(matches!(
        coder.decompress(bits, tokens),
        Err(HuffmanError::Traversal { .. })
    ));
}

#[test]
fn independent_coders_run_in_parallel() {
    let inputs = ["alpha beta gamma", "delta", "epsilon zeta eta theta"];
    let handles: Vec<_> = inputs
        .iter()
        .map(|&text| {
            std::thread::spawn(move || {
                let mut coder = HuffmanCoder::new();
                let bits = coder.compress(text).unwrap();
                let tokens = coder.serialize_tree().unwrap();
                HuffmanCoder::new().decompress(&bits, &tokens).unwrap()
            })
        })
        .collect();

    for (handle, text) in handles.into_iter().zip(inputs) {
        assert_eq!(handle.join().unwrap(), text.as_bytes());
    }
}
