//! Shared CSV substrate handling: validated reads and atomic writes.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Read a file, rejecting payloads that cannot be CSV text.
fn read_validated(path: &Path) -> Result<Vec<u8>, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let corrupt = |what: &str| StoreError::Corrupt(format!("{}: {what}", path.display()));
    let text = std::str::from_utf8(&bytes).map_err(|_| corrupt("not UTF-8 text"))?;
    if text.contains('\0') {
        return Err(corrupt("NUL byte in CSV text"));
    }
    Ok(bytes)
}

/// Deserialize every row of a headed CSV file, by header name.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = read_validated(path)?;
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes.as_slice())
        .deserialize()
        .map(|row| row.map_err(|e| StoreError::csv(path, e)))
        .collect()
}

/// A headed CSV file read as raw records whose lengths may differ from the
/// header's.
pub(crate) struct RaggedTable {
    pub(crate) headers: csv::StringRecord,
    pub(crate) records: Vec<csv::StringRecord>,
}

impl RaggedTable {
    pub(crate) fn read(path: &Path) -> Result<Self, StoreError> {
        let bytes = read_validated(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(bytes.as_slice());
        let headers = reader
            .headers()
            .map_err(|e| StoreError::csv(path, e))?
            .clone();
        let records = reader
            .records()
            .map(|record| record.map_err(|e| StoreError::csv(path, e)))
            .collect::<Result<_, _>>()?;
        Ok(Self { headers, records })
    }

    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Cell `col` of `record`, blank when the row stops short of it.
pub(crate) fn cell(record: &csv::StringRecord, col: Option<usize>) -> &str {
    col.and_then(|col| record.get(col)).unwrap_or_default()
}

/// Writer settings shared by every file this crate produces: all fields quoted.
pub(crate) fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.quote_style(csv::QuoteStyle::Always);
    builder
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

/// Write a CSV file through a temporary sibling and rename it into place.
pub(crate) fn write_atomically<F>(path: &Path, fill: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut csv::Writer<BufWriter<File>>) -> Result<(), csv::Error>,
{
    ensure_parent(path)?;

    let tmp_path = partial_path(path);
    let write_result = (|| -> Result<(), StoreError> {
        let file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
        let mut writer = writer_builder().from_writer(BufWriter::new(file));
        fill(&mut writer).map_err(|e| StoreError::csv(&tmp_path, e))?;
        writer.flush().map_err(|e| StoreError::io(&tmp_path, e))?;
        let buffered = writer.into_inner().map_err(|e| {
            StoreError::io(
                &tmp_path,
                std::io::Error::new(e.error().kind(), e.error().to_string()),
            )
        })?;
        let file = buffered
            .into_inner()
            .map_err(|e| StoreError::io(&tmp_path, e.into_error()))?;
        file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::io(path, e)
    })
}

/// `.<name>.partial-<pid>-<n>` next to the target, so the rename stays on one
/// filesystem.
fn partial_path(path: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial-{}-{n}", std::process::id()))
}
