use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tasktable_shared::storage::StorageBackend;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Key/value storage where each key is a
/// `<key>.json` file in the data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    pub data_dir: PathBuf,
}

impl FileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        info!(data_dir = %data_dir.display(), "opened file storage");
        Ok(Self { data_dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    #[tracing::instrument(skip(self))]
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(file = %path.display(), bytes = raw.len(), "read stored value");
                Ok(Some(raw))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed reading {}", path.display())),
        }
    }

    #[tracing::instrument(skip(self, value))]
    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        save_atomic(&path, value)
            .with_context(|| format!("failed to save {}", path.display()))
    }
}

#[tracing::instrument(skip(path, value))]
fn save_atomic(path: &Path, value: &str) -> anyhow::Result<()> {
    debug!(file = %path.display(), bytes = value.len(), "saving atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(value.as_bytes())?;
    writeln!(temp)?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tasktable_shared::storage::StorageBackend;
    use tempfile::tempdir;

    use super::FileStorage;

    #[test]
    fn missing_key_reads_as_none() {
        let temp = tempdir().expect("tempdir");
        let storage = FileStorage::open(temp.path()).expect("open");
        assert_eq!(storage.read("tasktable.tasks").expect("read"), None);
    }

    #[test]
    fn write_replaces_previous_value() {
        let temp = tempdir().expect("tempdir");
        let mut storage = FileStorage::open(temp.path()).expect("open");
        storage.write("k", "[1]").expect("first write");
        storage.write("k", "[2]").expect("second write");

        let raw = storage.read("k").expect("read").expect("value present");
        assert_eq!(raw.trim(), "[2]");
        assert!(storage.path_for("k").ends_with("k.json"));
    }
}
