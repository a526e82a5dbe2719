// src/file/dataset.rs
use super::{extension, FileHandler};
use crate::analysis::Dataset;
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct DatasetFileHandler;

impl DatasetFileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Parses delimited text. The first record is the header row.
    pub fn parse(&self, name: &str, text: &str, delimiter: u8) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let raw_headers: Vec<String> = reader.headers()
            .context("Failed to read header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if raw_headers.is_empty() || raw_headers.iter().all(String::is_empty) {
            return Err(anyhow!("File has no header row"));
        }
        let headers = unique_headers(raw_headers);

        let mut rows = Vec::new();
        let mut ragged = 0;
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to parse record {}", line + 1))?;
            if record.len() != headers.len() {
                ragged += 1;
            }
            // short rows are padded with missing cells, long rows are cut
            let row = (0..headers.len())
                .map(|i| {
                    record.get(i)
                        .map(str::trim)
                        .filter(|cell| !cell.is_empty())
                        .map(str::to_string)
                })
                .collect();
            rows.push(row);
        }
        if ragged > 0 {
            log::warn!("{}: {} rows did not match the header width", name, ragged);
        }

        Ok(Dataset::new(name, headers, rows))
    }
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to one char).
fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(e) => {
            log::warn!("{} is not valid UTF-8; decoding as Latin-1", path.display());
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    }
}

fn delimiter_for(path: &Path, text: &str) -> u8 {
    if extension(path).as_deref() == Some("tsv") {
        return b'\t';
    }
    let first = text.lines().next().unwrap_or_default();
    if first.matches('\t').count() > first.matches(',').count() {
        b'\t'
    } else {
        b','
    }
}

/// Blank headers become `Unnamed: i`; repeats get `.1`, `.2`, ... suffixes.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, header)| {
            let base = if header.is_empty() { format!("Unnamed: {}", i) } else { header };
            let mut candidate = base.clone();
            let mut n = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{}.{}", base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

impl FileHandler<Dataset> for DatasetFileHandler {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = decode(bytes, path);
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let dataset = self.parse(&name, &text, delimiter_for(path, &text))
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::info!(
            "Loaded {} ({} rows, {} columns)",
            name,
            dataset.row_count(),
            dataset.column_count()
        );
        Ok(dataset)
    }

    fn save(&self, data: &Dataset, path: &Path) -> Result<()> {
        let delimiter = if extension(path).as_deref() == Some("tsv") { b'\t' } else { b',' };
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer.write_record(&data.headers)?;
        for row in &data.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_cells_are_missing_and_rows_are_padded() {
        let handler = DatasetFileHandler::new();
        let ds = handler.parse("t", "a,b,c\n1,,x\n2\n3,4,5,6\n", b',').unwrap();

        assert_eq!(ds.headers, vec!["a", "b", "c"]);
        assert_eq!(ds.rows[0], vec![Some("1".into()), None, Some("x".into())]);
        assert_eq!(ds.rows[1], vec![Some("2".into()), None, None]);
        assert_eq!(ds.rows[2], vec![Some("3".into()), Some("4".into()), Some("5".into())]);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        assert_eq!(
            unique_headers(vec!["id".into(), "id".into(), "".into(), "id".into(), "id.1".into()]),
            vec!["id", "id.1", "Unnamed: 2", "id.2", "id.1.1"]
        );
    }

    #[test]
    fn test_header_only_file_is_an_empty_dataset() {
        let ds = DatasetFileHandler::new().parse("t", "a,b\n", b',').unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn test_blank_file_is_an_error() {
        assert!(DatasetFileHandler::new().parse("t", "", b',').is_err());
    }

    #[test]
    fn test_latin1_fallback_and_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.tsv");
        let mut bytes = b"city\tcount\nM".to_vec();
        bytes.push(0xFC); // u-umlaut in Latin-1
        bytes.extend_from_slice(b"nchen\t4\n");
        fs::write(&path, bytes).unwrap();

        let ds = DatasetFileHandler::new().load(&path).unwrap();
        assert_eq!(ds.name, "cities.tsv");
        assert_eq!(ds.rows[0][0].as_deref(), Some("München"));
        assert_eq!(ds.rows[0][1].as_deref(), Some("4"));
    }

    #[test]
    fn test_tab_delimiter_is_sniffed_for_txt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "\u{feff}a\tb\n1\t2\n").unwrap();

        let ds = DatasetFileHandler::new().load(&path).unwrap();
        assert_eq!(ds.headers, vec!["a", "b"]);
        assert_eq!(ds.rows[0][1].as_deref(), Some("2"));
    }

    #[test]
    fn test_save_then_load_keeps_missing_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let handler = DatasetFileHandler::new();
        let ds = Dataset::new(
            "out.csv",
            vec!["a".into(), "b".into()],
            vec![vec![Some("1".into()), None], vec![None, Some("y, z".into())]],
        );

        handler.save(&ds, &path).unwrap();
        assert_eq!(handler.load(&path).unwrap(), ds);
    }
}
