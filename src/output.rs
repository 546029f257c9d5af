use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::parser::{BreedPageRecord, BreedRecord};

/// A record that can be written as one delimited row.
pub trait Row: Serialize {
    const COLUMNS: &'static [&'static str];

    /// Cells in `COLUMNS` order.
    fn cells(&self) -> Vec<String>;
}

impl Row for BreedRecord {
    const COLUMNS: &'static [&'static str] = &BreedRecord::COLUMNS;

    fn cells(&self) -> Vec<String> {
        self.to_row()
    }
}

impl Row for BreedPageRecord {
    const COLUMNS: &'static [&'static str] = &BreedPageRecord::COLUMNS;

    fn cells(&self) -> Vec<String> {
        self.to_row()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
    Json,
}

impl Format {
    fn separator(self) -> Option<char> {
        match self {
            Format::Csv => Some(','),
            Format::Tsv => Some('\t'),
            Format::Json => None,
        }
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header row plus one row per record, or a JSON array.
pub fn write_records<W: Write, R: Row>(mut w: W, records: &[R], format: Format) -> Result<()> {
    match format.separator() {
        Some(sep) => {
            let header: Vec<String> = R::COLUMNS.iter().map(|c| c.to_string()).collect();
            write_row(&mut w, &header, sep)?;
            for record in records {
                write_row(&mut w, &record.cells(), sep)?;
            }
        }
        None => {
            serde_json::to_writer_pretty(&mut w, records)?;
            writeln!(w)?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn save<R: Row>(path: &Path, records: &[R], format: Format) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_records(BufWriter::new(file), records, format)
        .with_context(|| format!("Failed to write {:?}", path))
}
