use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use huffman_paths::{CodecConfig, HuffmanCodec, Symbol};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let symbols: Vec<Symbol> = sample_text.bytes().map(Symbol::from).collect();
    let mut counts: BTreeMap<Symbol, u64> = BTreeMap::new();
    for &symbol in &symbols {
        *counts.entry(symbol).or_insert(0) += 1;
    }

    let codec = HuffmanCodec::from_frequencies(counts, CodecConfig::default())?;
    println!("📝 {} symbols, {} distinct", symbols.len(), codec.export_table().len());

    // Persist the code table
    let table_path = "sample.code";
    codec.write_table(&mut File::create(table_path)?)?;

    let encoded = codec.encode(&symbols)?;
    println!(
        "🗜️  Encoded to {} bits ({:.1}% of original)",
        encoded.bit_count(),
        encoded.bit_count() as f64 / (symbols.len() * 8) as f64 * 100.0
    );

    // Rebuild the codec from the table and decode
    let restored =
        HuffmanCodec::read_table(BufReader::new(File::open(table_path)?), CodecConfig::default())?;
    let decoded = restored.decode(encoded.reader())?;

    if decoded == symbols {
        println!("✅ Decoding successful! Data matches exactly.");
    } else {
        println!("❌ Decoding failed! Data mismatch.");
        return Err("decode verification failed".into());
    }

    std::fs::remove_file(table_path)?;
    println!("🧹 Cleaned up temporary files");

    Ok(())
}
