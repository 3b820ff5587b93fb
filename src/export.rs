// Tabular export of accepted and skipped records
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::types::{Record, Result, SkippedRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Tsv,
}

impl Format {
    pub fn delimiter(self) -> u8 {
        match self {
            Format::Csv => b',',
            Format::Tsv => b'\t',
        }
    }
}

/// A uniformly shaped row type with a fixed header.
pub trait Tabular: Serialize {
    const HEADERS: &'static [&'static str];
}

impl Tabular for Record {
    const HEADERS: &'static [&'static str] = &["last_name", "first_names", "city", "birth_date"];
}

impl Tabular for SkippedRecord {
    const HEADERS: &'static [&'static str] =
        &["last_name", "first_names", "city_raw", "birth_date", "reason"];
}

/// Write a header row followed by `rows`. The header is written even
/// when there are no rows.
pub fn write_rows<T: Tabular, W: Write>(writer: W, rows: &[T], format: Format) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_writer(writer);

    out.write_record(T::HEADERS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_file<T: Tabular>(path: &Path, rows: &[T], format: Format) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_rows(file, rows, format)?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkipReason;

    fn render<T: Tabular>(rows: &[T], format: Format) -> String {
        let mut buf = Vec::new();
        write_rows(&mut buf, rows, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_accepted_rows() {
        let rows = vec![Record {
            last_name: "Virtanen".into(),
            first_names: "Matti Juhani".into(),
            city: "Helsinki".into(),
            birth_date: "12.05.1980".into(),
        }];
        assert_eq!(
            render(&rows, Format::Csv),
            "last_name,first_names,city,birth_date\nVirtanen,Matti Juhani,Helsinki,12.05.1980\n"
        );
    }

    #[test]
    fn test_skipped_rows_carry_reason_tag() {
        let rows = vec![SkippedRecord {
            last_name: "Korhonen".into(),
            first_names: "Barn".into(),
            city_raw: "Tampere, kylä".into(),
            birth_date: String::new(),
            reason: SkipReason::BlacklistedTerm,
        }];
        assert_eq!(
            render(&rows, Format::Csv),
            "last_name,first_names,city_raw,birth_date,reason\nKorhonen,Barn,\"Tampere, kylä\",,BlacklistedTerm\n"
        );
    }

    #[test]
    fn test_empty_collection_still_has_header() {
        let rows: Vec<SkippedRecord> = Vec::new();
        assert_eq!(
            render(&rows, Format::Tsv),
            "last_name\tfirst_names\tcity_raw\tbirth_date\treason\n"
        );
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("accepted.csv");
        write_file::<Record>(&path, &[], Format::Csv).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "last_name,first_names,city,birth_date\n"
        );
    }
}
