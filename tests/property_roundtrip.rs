use std::collections::BTreeMap;

use proptest::prelude::*;

use huffman_paths::{code_table, CodecConfig, HuffmanCodec, HuffmanTree, Symbol, EOF_SYMBOL};

fn frequencies() -> impl Strategy<Value = BTreeMap<Symbol, u64>> {
    prop::collection::btree_map(0..=EOF_SYMBOL, 1u64..10_000, 2..64)
}

fn prefix_free(table: &BTreeMap<Symbol, String>) -> bool {
    let mut paths: Vec<&String> = table.values().collect();
    paths.sort();
    // after sorting, a prefix always sits directly before one of its extensions
    paths.windows(2).all(|w| !w[1].starts_with(w[0].as_str()))
}

proptest! {
    #[test]
    fn prop_table_roundtrip_keeps_codes(freqs in frequencies()) {
        let tree = HuffmanTree::from_frequencies(freqs.clone()).unwrap();
        let imported = code_table::import(code_table::to_text(&tree).lines()).unwrap();

        prop_assert_eq!(imported.generate_table(), tree.generate_table());
        prop_assert_eq!(code_table::to_text(&imported), code_table::to_text(&tree));
        prop_assert_eq!(imported.leaf_count(), freqs.len());
    }

    #[test]
    fn prop_codes_are_prefix_free(freqs in frequencies()) {
        let tree = HuffmanTree::from_frequencies(freqs).unwrap();
        prop_assert!(prefix_free(&tree.generate_table()));
    }

    #[test]
    fn prop_heavier_symbols_never_get_longer_codes(freqs in frequencies()) {
        let tree = HuffmanTree::from_frequencies(freqs.clone()).unwrap();
        let table = tree.generate_table();
        for (a, wa) in &freqs {
            for (b, wb) in &freqs {
                if wa > wb {
                    prop_assert!(table[a].len() <= table[b].len());
                }
            }
        }
    }

    #[test]
    fn prop_decode_inverts_encode(
        freqs in frequencies(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..200),
    ) {
        let alphabet: Vec<Symbol> = freqs.keys().copied().collect();
        let message: Vec<Symbol> = picks.iter().map(|i| *i.get(&alphabet)).collect();

        let codec = HuffmanCodec::from_frequencies(freqs, CodecConfig::default()).unwrap();
        let encoded = codec.encode(&message).unwrap();
        let decoded = codec.decode(encoded.reader()).unwrap();
        prop_assert_eq!(decoded, message);
    }
}
