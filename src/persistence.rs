// File: src/persistence.rs
use crate::core::scores::ScoreTable;
use crate::error::ShoprResult;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// `.bin` tables are bincode, everything else is a JSON object of key to rating.
fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

/// Writes the table next to its destination first, then renames it into
/// place so a crash never leaves a half-written file.
pub fn save_scores(scores: &ScoreTable, path: &Path) -> ShoprResult<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        if is_binary(path) {
            bincode::serialize_into(&mut writer, scores)?;
        } else {
            serde_json::to_writer_pretty(&mut writer, scores)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads a table back. A file that does not exist yet is an empty table.
pub fn load_scores(path: &Path) -> ShoprResult<ScoreTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScoreTable::new()),
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    let scores = if is_binary(path) {
        bincode::deserialize_from(reader)?
    } else {
        serde_json::from_reader(reader)?
    };
    Ok(scores)
}
