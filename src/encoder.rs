use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info, warn};

use huffman_codec::{CompressionStats, HuffmanCoder};

#[derive(Parser, Debug)]
#[command(name = "encode", about = "Huffman-encode a string into a bitstring and tree tokens", long_about = None)]
struct Args {
    /// Text to encode. Ignored when --input is given.
    text: Option<String>,

    /// Read the text to encode from this file instead.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Also print the code assigned to every symbol.
    #[arg(short, long)]
    table: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = match (&args.input, args.text) {
        (Some(path), _) => {
            info!("Reading input file: {}", path.display());
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        (None, Some(text)) => text.into_bytes(),
        (None, None) => bail!("nothing to encode: pass TEXT or --input <FILE>"),
    };
    debug!("Input size: {} bytes", data.len());

    let mut coder = HuffmanCoder::new();
    let bits = coder.compress(&data).context("compression failed")?;
    let tokens = coder.serialize_tree()?;

    if std::str::from_utf8(&tokens).is_err() {
        warn!("Tree tokens contain non-UTF-8 bytes; printed form is lossy");
    }

    println!("Compressed string: {}", bits);
    println!("Serialized tree:   {}", String::from_utf8_lossy(&tokens));

    if args.table {
        println!("\nCode table:");
        for (byte, code) in coder.code_table()? {
            if byte.is_ascii_graphic() {
                println!("  '{}' => {}", byte as char, code);
            } else {
                println!("  {:#04x} => {}", byte, code);
            }
        }
    }

    let stats = coder.stats(&data, &bits)?;
    println!("{}", summary(&stats));
    Ok(())
}

fn summary(stats: &CompressionStats) -> String {
    format!("\n✅ Encoding successful.\n{}", stats)
}
