use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::results::PageResult;

/// Create the output directory if it does not exist.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Path of one page's JSON output file: `{runPrefix}-page-{N}.json`.
pub fn page_result_path(dir: &Path, run_prefix: &str, page_number: u32) -> PathBuf {
    dir.join(format!("{}-page-{}.json", run_prefix, page_number))
}

/// Path of one job's plain-text file: `page-{P}-job-{I}.txt`.
pub fn job_text_path(dir: &Path, page_number: u32, job_index: usize) -> PathBuf {
    dir.join(format!("page-{}-job-{}.txt", page_number, job_index))
}

/// Persist one PageResult as pretty-printed JSON, atomically.
pub fn write_page_result(path: &Path, result: &PageResult, record_key: &str) -> io::Result<()> {
    let value = result.to_json(record_key);
    let content = serde_json::to_string_pretty(&value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_atomic(path, &content)
}

/// Write each record's plain-text field to its own file. Records where the
/// field is null are skipped (the JSON file still carries them).
pub fn write_job_texts(
    dir: &Path,
    page_number: u32,
    result: &PageResult,
    field: &str,
) -> io::Result<()> {
    for (index, record) in result.records.iter().enumerate() {
        if let Some(text) = record.get(field) {
            write_atomic(&job_text_path(dir, page_number, index), text)?;
        }
    }
    Ok(())
}

/// Write to a temp file in the same directory, then rename into place, so an
/// interrupted run never leaves a truncated file behind.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
