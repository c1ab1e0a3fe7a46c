use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::{DocumentStore, StoreError, validate_collection};

/// One pretty-printed `<collection>.json` array per collection under `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_collection(collection)?;
        Ok(self.dir.join(format!("{collection}.json")))
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        let path = self.path_for(collection)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(&path)(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, collection: &str, records: &[JsonValue]) -> Result<(), StoreError> {
        let path = self.path_for(collection)?;
        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Write-then-rename so a crash never leaves a half-written collection.
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp, body).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        tracing::debug!(collection, records = records.len(), path = %path.display(), "collection saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load("inventory").unwrap().is_empty());
    }

    #[test]
    fn save_then_load_from_a_fresh_handle() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        JsonFileStore::new(&nested)
            .save("inventory", &[json!({"name": "Butter"})])
            .unwrap();

        assert!(nested.join("inventory.json").exists());
        assert!(!nested.join("inventory.json.tmp").exists());
        let docs = JsonFileStore::new(&nested).load("inventory").unwrap();
        assert_eq!(docs, vec![json!({"name": "Butter"})]);
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inventory.json"), "{not json").unwrap();
        let err = JsonFileStore::new(dir.path()).load("inventory").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
