use std::path::{Path, PathBuf};
use std::time::Instant;

use blast_stream::io::{LineSource, SourceResult, open_file_lines};

// Powers of ten like the historical sweep, plus the native 0 mode last.
const BUFFER_UNITS: [usize; 9] = [
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    0,
];

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <fasta_path> [runs]", args[0]);
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);
    let runs = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3u32);
    if !path.exists() {
        eprintln!("File does not exist: {:?}", path);
        std::process::exit(1);
    }

    if let Err(err) = run(&path, runs) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(path: &Path, runs: u32) -> SourceResult<()> {
    let (lines, max_len, total_len) = line_stats(path)?;
    let average = if lines == 0 { 0 } else { total_len / lines };
    println!("{}: {lines} lines, max/average length {max_len}/{average}", path.display());
    println!("{:-<60}", "");

    for buffer_unit in BUFFER_UNITS {
        let start = Instant::now();
        let mut read = 0u64;
        for _ in 0..runs {
            read = read_through(path, buffer_unit)?;
        }
        let per_run = start.elapsed() / runs.max(1);
        let label = if buffer_unit == 0 {
            "native".to_string()
        } else {
            buffer_unit.to_string()
        };
        println!("{label:>12}: {per_run:?} per pass ({read} lines)");
    }
    Ok(())
}

fn line_stats(path: &Path) -> SourceResult<(u64, usize, u64)> {
    let mut lines = open_file_lines(path, 0)?;
    let mut count = 0u64;
    let mut max_len = 0usize;
    let mut total_len = 0u64;
    while let Some(line) = lines.next_line()? {
        count += 1;
        max_len = max_len.max(line.len());
        total_len += line.len() as u64;
    }
    Ok((count, max_len, total_len))
}

fn read_through(path: &Path, buffer_unit: usize) -> SourceResult<u64> {
    let mut lines = open_file_lines(path, buffer_unit)?;
    let mut count = 0u64;
    while lines.next_line()?.is_some() {
        count += 1;
    }
    Ok(count)
}
