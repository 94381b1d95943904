mod config;

use std::error::Error;
use std::fs;
use std::time::Duration;

use blast_stream::blast::{
    FastaFactory, LogObserver, RecordStream, SeqStream, Sequence, Strand, ThroughputFilter,
    render_csv_sequences, write_parquet_sequences,
};
use blast_stream::io::{LineSource, RemoteSource, open_file_lines};

use config::{Config, InputSpec, OutputFormat};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_args()?;

    let (sequences, pulled, elapsed) = match &config.input {
        InputSpec::Local(path) => {
            let lines = open_file_lines(path, config.buffer_unit)?;
            collect_sequences(lines, &config)?
        }
        InputSpec::Remote {
            config: remote,
            object,
        } => {
            let source = RemoteSource::connect(remote, object)?;
            collect_sequences(source.into_lines(config.buffer_unit), &config)?
        }
    };

    match config.format {
        OutputFormat::Plain => {
            for seq in &sequences {
                println!("{}\t{}\t{}", seq.id(), seq.len(), seq.title());
            }
        }
        OutputFormat::Csv => {
            let csv = render_csv_sequences(&sequences);
            match config.output.as_ref() {
                Some(path) => fs::write(path, csv)?,
                None => print!("{csv}"),
            }
        }
        OutputFormat::Parquet => {
            let path = config
                .output
                .as_ref()
                .ok_or("--output is required when --format parquet")?;
            let file = fs::File::create(path)?;
            write_parquet_sequences(&sequences, file)?;
        }
    }

    eprintln!(
        "{} records pulled, {} kept, {:.3}s between pulls",
        pulled,
        sequences.len(),
        elapsed.as_secs_f64()
    );
    Ok(())
}

fn collect_sequences<L>(
    lines: L,
    config: &Config,
) -> Result<(Vec<Sequence>, u64, Duration), Box<dyn Error>>
where
    L: LineSource,
{
    let records = RecordStream::new(lines);
    let seqs = SeqStream::new(FastaFactory::new(Strand::Unknown), records);
    let min_residues = config.min_residues;
    let mut filter = ThroughputFilter::with_predicate(seqs, config.max_records, move |item| {
        match item {
            Ok(seq) => seq.len() >= min_residues,
            // Errors must reach the consumer, not vanish in the filter.
            Err(_) => true,
        }
    })
    .with_observer(Box::new(LogObserver));

    let mut collected = Vec::new();
    for item in filter.by_ref() {
        collected.push(item?);
    }
    Ok((collected, ThroughputFilter::count(&filter), filter.total_time()))
}
