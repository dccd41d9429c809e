use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{debug, error};

use huffman_codec::HuffmanCoder;

#[derive(Debug, PartialEq, Eq)]
enum Operation {
    Encode,
    Decode,
    Exit,
}

impl Operation {
    fn parse(line: &[u8]) -> Option<Self> {
        match line.trim_ascii() {
            b"1" => Some(Operation::Encode),
            b"2" => Some(Operation::Decode),
            b"3" => Some(Operation::Exit),
            _ => None,
        }
    }
}

/// Last encoding produced in this session, kept for the decode operation.
#[derive(Default)]
struct Session {
    coder: HuffmanCoder,
    compressed: String,
    serialized: Vec<u8>,
}

impl Session {
    fn encode(&mut self, input: &[u8], out: &mut impl Write) -> io::Result<()> {
        match self.coder.compress(input).and_then(|bits| {
            let tokens = self.coder.serialize_tree()?;
            Ok((bits, tokens))
        }) {
            Ok((bits, tokens)) => {
                writeln!(out, "\nCompressed string: {}", bits)?;
                writeln!(out, "\nSerialized tree: {}", String::from_utf8_lossy(&tokens))?;
                self.compressed = bits;
                self.serialized = tokens;
            }
            Err(e) => {
                error!("Encoding failed: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn decode(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.compressed.is_empty() || self.serialized.is_empty() {
            return writeln!(out, "Error: No encoded string or serialized tree.");
        }
        match self.coder.decompress(&self.compressed, &self.serialized) {
            Ok(decoded) => writeln!(out, "Decoded string: {}", String::from_utf8_lossy(&decoded)),
            Err(e) => {
                error!("Decoding failed: {}", e);
                writeln!(out, "Error: {}", e)
            }
        }
    }
}

/// Reads one line as raw bytes, without its `\n` or `\r\n` ending.
fn read_line_bytes(input: &mut impl BufRead, line: &mut Vec<u8>) -> io::Result<usize> {
    line.clear();
    let read = input.read_until(b'\n', line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(read)
}

fn run(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut session = Session::default();
    let mut line = Vec::new();

    loop {
        write!(
            out,
            "\nOperation Codes:\n\
             1: Encode string.\n\
             2: Decode string.\n\
             3: Exit program.\n\
             \nEnter desired operation code: "
        )?;
        out.flush()?;

        if read_line_bytes(input, &mut line)? == 0 {
            debug!("Input closed, leaving command loop");
            return Ok(());
        }

        match Operation::parse(&line) {
            Some(Operation::Encode) => {
                write!(out, "\nEnter string for encoding: ")?;
                out.flush()?;
                read_line_bytes(input, &mut line)?;
                session.encode(&line, out)?;
            }
            Some(Operation::Decode) => session.decode(out)?,
            Some(Operation::Exit) => {
                writeln!(out, "Program exited.")?;
                return Ok(());
            }
            None => writeln!(out, "Error: Invalid operation code.")?,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
