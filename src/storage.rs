use crate::error::QueryError;
use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::Encoding;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Lazy, single-pass stream of decoded rows from a delimited datafile.
///
/// Each call to [`open_rows`] gets its own file handle; dropping the stream
/// closes it, so an early return from a scan releases the file too.
pub struct Rows {
    reader: csv::Reader<File>,
    record: ByteRecord,
    encoding: &'static Encoding,
    path: PathBuf,
    done: bool,
}

/// Open `path` for scanning, decoding every cell with `encoding`.
///
/// Fails with `DatasetUnavailable` when the file is absent, before any read.
pub fn open_rows<P: AsRef<Path>>(path: P, encoding: &'static Encoding) -> Result<Rows, QueryError> {
    let path = path.as_ref();
    if !path.is_file() {
        log::warn!("dataset not found: {}", path.display());
        return Err(QueryError::dataset_missing(path));
    }
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| QueryError::DatasetUnavailable {
            path: path.to_path_buf(),
            source: Some(e.into()),
        })?;
    Ok(Rows {
        reader,
        record: ByteRecord::new(),
        encoding,
        path: path.to_path_buf(),
        done: false,
    })
}

impl Rows {
    fn decode(&self) -> Vec<String> {
        self.record
            .iter()
            .map(|field| {
                let (text, _) = self.encoding.decode_without_bom_handling(field);
                text.into_owned()
            })
            .collect()
    }
}

impl Iterator for Rows {
    type Item = Result<Vec<String>, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => Some(Ok(self.decode())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(QueryError::DatasetUnavailable {
                    path: self.path.clone(),
                    source: Some(e.into()),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_fails_fast() {
        let dir = tempdir().unwrap();
        let err = open_rows(dir.path().join("nope.csv"), encoding_rs::MACINTOSH)
            .err()
            .unwrap();
        assert!(matches!(err, QueryError::DatasetUnavailable { source: None, .. }));
    }

    #[test]
    fn directory_is_not_a_dataset() {
        let dir = tempdir().unwrap();
        assert!(open_rows(dir.path(), encoding_rs::MACINTOSH).is_err());
    }

    #[test]
    fn rows_keep_ragged_widths_and_quoted_commas() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        std::fs::write(&p, "\"Korea, Rep.\",KOR,x\nDEU,DEU,y,1,2\n").unwrap();
        let rows: Vec<Vec<String>> = open_rows(&p, encoding_rs::MACINTOSH)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Korea, Rep.", "KOR", "x"]);
        assert_eq!(rows[1].len(), 5);
    }

    #[test]
    fn decodes_mac_roman_bytes() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("mac.csv");
        // 0x87 is 'á' in Mac Roman
        std::fs::write(&p, b"CIV,C\x87te,1\n").unwrap();
        let row = open_rows(&p, encoding_rs::MACINTOSH)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row[1], "C\u{e1}te");
    }
}
