use std::fmt;
use std::io::Write;
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::errors::ParquetError;

use super::sequence::Sequence;

pub fn render_csv_sequences(sequences: &[Sequence]) -> String {
    let mut out = String::from("id,title,strand,residues\n");
    for seq in sequences {
        out.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv_field(seq.id()),
            escape_csv_field(seq.title()),
            seq.strand().as_str(),
            seq.len()
        ));
    }
    out
}

fn escape_csv_field(value: &str) -> String {
    if !value.contains([',', '"', '\n']) {
        return value.to_string();
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

#[derive(Debug)]
pub enum ExportError {
    Arrow(arrow_schema::ArrowError),
    Parquet(ParquetError),
}

impl From<arrow_schema::ArrowError> for ExportError {
    fn from(value: arrow_schema::ArrowError) -> Self {
        ExportError::Arrow(value)
    }
}

impl From<ParquetError> for ExportError {
    fn from(value: ParquetError) -> Self {
        ExportError::Parquet(value)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Arrow(err) => write!(f, "arrow error: {err}"),
            ExportError::Parquet(err) => write!(f, "parquet error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Arrow(err) => Some(err),
            ExportError::Parquet(err) => Some(err),
        }
    }
}

pub fn write_parquet_sequences<W: Write + Send + 'static>(
    sequences: &[Sequence],
    writer: W,
) -> Result<(), ExportError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("strand", DataType::Utf8, false),
        Field::new("residues", DataType::UInt64, false),
    ]));

    let ids: Vec<&str> = sequences.iter().map(|s| s.id()).collect();
    let titles: Vec<&str> = sequences.iter().map(|s| s.title()).collect();
    let strands: Vec<&str> = sequences.iter().map(|s| s.strand().as_str()).collect();
    let lengths: Vec<u64> = sequences.iter().map(|s| s.len() as u64).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(StringArray::from(titles)),
        Arc::new(StringArray::from(strands)),
        Arc::new(UInt64Array::from(lengths)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let mut arrow_writer = ArrowWriter::try_new(writer, schema, None)?;
    arrow_writer.write(&batch)?;
    arrow_writer.close()?;
    Ok(())
}
