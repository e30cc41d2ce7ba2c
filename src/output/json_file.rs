//! JSON file persister
//!
//! Writes each record to `<dir>/<file_name>`, appending. Running the same
//! crawl twice therefore leaves two JSON documents back to back in each file.

use crate::matches::MergedMatchRecord;
use crate::output::traits::{OutputError, OutputResult, Persister};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends pretty-printed records to files in one directory
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    dir: PathBuf,
}

impl JsonFilePersister {
    /// Creates a persister for `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Persister for JsonFilePersister {
    fn persist(&self, file_name: &str, record: &MergedMatchRecord) -> OutputResult<()> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(OutputError::Write(format!(
                "'{}' is not a plain file name",
                file_name
            )));
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        record.serialize(&mut serializer)?;
        writer.flush()?;

        tracing::debug!("Appended record to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> MergedMatchRecord {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_creates_directory_and_writes() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("games");
        let persister = JsonFilePersister::new(&dir);

        persister
            .persist("game_TRLH1_1002440062.json", &record(json!({"gameId": 1})))
            .unwrap();

        let content = std::fs::read_to_string(dir.join("game_TRLH1_1002440062.json")).unwrap();
        assert_eq!(content, "{\n    \"gameId\": 1\n}");
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, json!({"gameId": 1}));
    }

    #[test]
    fn test_second_write_appends() {
        let temp = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(temp.path());

        persister.persist("game.json", &record(json!({"a": 1}))).unwrap();
        persister.persist("game.json", &record(json!({"a": 1}))).unwrap();

        let content = std::fs::read_to_string(temp.path().join("game.json")).unwrap();
        let documents: Vec<Value> = serde_json::Deserializer::from_str(&content)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn test_rejects_path_in_file_name() {
        let temp = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(temp.path());
        let result = persister.persist("../escape.json", &record(json!({})));
        assert!(matches!(result, Err(OutputError::Write(_))));
    }
}
