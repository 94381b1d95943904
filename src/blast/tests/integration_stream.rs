use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::blast::{
    BlastOptions, BlastResultStream, Blaster, FastaFactory, RecordStream, SeqStream, Sequence,
    Strand, ThroughputFilter,
};
use crate::io::open_file_lines;

use super::helpers::LengthEngine;

fn write_fixture(name: &str, contents: &[u8]) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{name}_{nanos}.fa"));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_pipeline_reports_every_subject_in_order() {
    let fasta = b">est1 lung clone\nACGTACGT\nACGT\n>est2\nTTTTT\n>est3 short\nGG\n";
    let path = write_fixture("blast_stream_pipeline", fasta);

    let lines = open_file_lines(&path, 128).unwrap();
    let records = RecordStream::new(lines);
    let subjects = SeqStream::new(FastaFactory::new(Strand::Unknown), records);

    let (engine, _prepared) = LengthEngine::new();
    let query = Sequence::new("probe".into(), String::new(), Strand::Plus, b"ACGT".to_vec());
    let blaster = Blaster::new(engine, &query, BlastOptions::default());
    let results = BlastResultStream::new(blaster, subjects);
    let mut filter = ThroughputFilter::new(results, 0);

    let outcomes: Vec<_> = filter.by_ref().map(|r| r.unwrap()).collect();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(
        outcomes
            .iter()
            .map(|o| (o.subject.id(), o.report))
            .collect::<Vec<_>>(),
        vec![("est1", 12), ("est2", 5), ("est3", 2)]
    );
    assert_eq!(ThroughputFilter::count(&filter), 3);

    fs::remove_file(&path).unwrap();
}

#[test]
fn predicate_and_cap_shape_the_result_stream() {
    let fasta = b">a\nACGTACGT\n>b\nGG\n>c\nACGTACGTACGT\n>d\nTT\n>e\nAAAA\n";
    let path = write_fixture("blast_stream_filtered", fasta);

    let lines = open_file_lines(&path, 64).unwrap();
    let subjects = SeqStream::new(FastaFactory::new(Strand::Unknown), RecordStream::new(lines));
    let (engine, _prepared) = LengthEngine::new();
    let query = Sequence::new("probe".into(), String::new(), Strand::Plus, b"ACGT".to_vec());
    let results = BlastResultStream::new(
        Blaster::new(engine, &query, BlastOptions::default()),
        subjects,
    );

    // Keep reports of at least four residues, stop after four upstream pulls.
    let kept: Vec<usize> = ThroughputFilter::with_predicate(results, 4, |item| match item {
        Ok(outcome) => outcome.report >= 4,
        Err(_) => true,
    })
    .map(|r| r.unwrap().report)
    .collect();
    assert_eq!(kept, vec![8, 12]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn native_and_buffered_pipelines_agree() {
    let fasta = b"orphan preamble\n>x one\nACGT\n>y two\nTT\nTT\n";
    let path = write_fixture("blast_stream_modes", fasta);

    let mut views: Vec<Vec<(String, usize)>> = Vec::new();
    for buffer_unit in [0usize, 1, 32, 1 << 16] {
        let lines = open_file_lines(&path, buffer_unit).unwrap();
        let seqs = SeqStream::new(FastaFactory::new(Strand::Unknown), RecordStream::new(lines));
        views.push(
            seqs.map(|s| {
                let s = s.unwrap();
                (s.id().to_string(), s.len())
            })
            .collect(),
        );
    }
    for view in &views[1..] {
        assert_eq!(view, &views[0]);
    }
    assert_eq!(
        views[0],
        vec![
            ("sequence_1".to_string(), 14),
            ("x".to_string(), 4),
            ("y".to_string(), 4),
        ]
    );

    fs::remove_file(&path).unwrap();
}
