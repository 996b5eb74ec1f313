//! Debug driver: replays a file or stdin through a segmentation session in
//! fixed-size chunks, the same workload shape as token-by-token model
//! output, and prints the typed spans as they close.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use chunkdown_engine::{split_by_xml, Segment, SegmentKind, StreamSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Block-level roster.
    Block,
    /// Inline-level roster.
    Inline,
    /// One-shot XML splitter over the whole input.
    Xml,
}

#[derive(Parser)]
#[command(name = "chunkdown", about = "Segment Markdown-like text as it streams")]
struct Cli {
    /// Input file; reads stdin when omitted.
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Block)]
    mode: Mode,

    /// Chunk size in UTF-16 code units for the streaming modes.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let units: Vec<u16> = text.encode_utf16().collect();

    match cli.mode {
        Mode::Xml => {
            for span in split_by_xml(&units) {
                println!(
                    "{:>7?} [{:>4}, {:>4}) {:?}",
                    span.kind,
                    span.start,
                    span.end,
                    preview(&units, span.start, span.end)
                );
            }
        }
        Mode::Block | Mode::Inline => {
            let mut session = match cli.mode {
                Mode::Block => StreamSession::block(),
                _ => StreamSession::inline(),
            };
            for chunk in units.chunks(cli.chunk_size.max(1)) {
                print_segments(&session.push(chunk), &units);
            }
        }
    }
    Ok(())
}

fn print_segments(segments: &[Segment], units: &[u16]) {
    for seg in segments {
        if seg.kind == SegmentKind::Break {
            println!("        ---- break @ {}", seg.start);
        } else {
            println!(
                "{:>14?} [{:>4}, {:>4}) {:?}",
                seg.kind,
                seg.start,
                seg.end,
                preview(units, seg.start, seg.end)
            );
        }
    }
}

fn preview(units: &[u16], start: u32, end: u32) -> String {
    let text = String::from_utf16_lossy(&units[start as usize..end as usize]);
    if text.chars().count() > 60 {
        let cut: String = text.chars().take(57).collect();
        format!("{cut}…")
    } else {
        text
    }
}
