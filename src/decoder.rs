use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use huffman_codec::HuffmanCoder;

#[derive(Parser, Debug)]
#[command(name = "decode", about = "Decode a Huffman bitstring against its serialized tree", long_about = None)]
struct Args {
    /// Encoded bitstring of '0' and '1' characters.
    bits: String,

    /// Serialized tree tokens, e.g. LaLbB.
    tokens: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("--- Start Decoding ---");
    let mut coder = HuffmanCoder::new();
    let decoded = coder
        .decompress(&args.bits, args.tokens.as_bytes())
        .context("decoding failed")?;

    match String::from_utf8(decoded) {
        Ok(text) => println!("Decoded string: {}", text),
        Err(e) => {
            warn!("Decoded bytes are not valid UTF-8; printing lossily");
            println!("Decoded string: {}", String::from_utf8_lossy(e.as_bytes()));
        }
    }

    info!("--- End ---");
    Ok(())
}
