use super::RegistryStore;
use crate::error::{HerokronError, Result};
use crate::model::Registry;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATABASE_FILENAME: &str = "database.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the database inside `data_dir`, creating the directory and an empty
    /// database if needed. A file holding invalid JSON is reset to an empty database.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(HerokronError::Io)?;
        }

        let store = Self {
            path: data_dir.join(DATABASE_FILENAME),
        };

        if !store.is_valid()? {
            log::debug!("initializing database at {}", store.path.display());
            store.write(&Registry::default())?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_valid(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&self.path).map_err(HerokronError::Io)?;
        Ok(serde_json::from_str::<Registry>(&content).is_ok())
    }

    fn write(&self, registry: &Registry) -> Result<()> {
        let content =
            serde_json::to_string_pretty(registry).map_err(HerokronError::Serialization)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(HerokronError::Io)?;
        fs::rename(&tmp, &self.path).map_err(HerokronError::Io)?;
        Ok(())
    }
}

impl RegistryStore for FileStore {
    fn load(&self) -> Result<Registry> {
        log::debug!("loading database from {}", self.path.display());
        let content = fs::read_to_string(&self.path).map_err(HerokronError::Io)?;
        serde_json::from_str(&content).map_err(|source| HerokronError::CorruptRegistry {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, registry: &Registry) -> Result<()> {
        log::debug!("saving database to {}", self.path.display());
        self.write(registry)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_COLOR;
    use tempfile::TempDir;

    #[test]
    fn open_creates_directory_and_empty_database() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested").join("Herokron");

        let store = FileStore::open(&data_dir).unwrap();

        assert!(store.path().exists());
        let registry = store.load().unwrap();
        assert!(registry.keys.is_empty());
        assert_eq!(registry.color, DEFAULT_COLOR);
    }

    #[test]
    fn open_resets_invalid_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(DATABASE_FILENAME), "{not json").unwrap();

        let store = FileStore::open(temp.path()).unwrap();

        assert_eq!(store.load().unwrap(), Registry::default());
    }

    #[test]
    fn open_keeps_existing_database() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DATABASE_FILENAME),
            r#"{"keys": [{"k": ["svc"]}], "color": 1, "webhook": {}}"#,
        )
        .unwrap();

        let store = FileStore::open(temp.path()).unwrap();
        let registry = store.load().unwrap();

        assert_eq!(registry.app_owner("svc"), Some("k"));
        assert_eq!(registry.color, 1);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();

        let mut registry = Registry::default();
        registry.insert_key("key", vec!["a".into(), "b".into()]);
        store.save(&registry).unwrap();

        let reopened = FileStore::open(temp.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), registry);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();

        store.save(&Registry::default()).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![DATABASE_FILENAME.to_string()]);
    }

    #[test]
    fn load_reports_corruption_after_open() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        fs::write(store.path(), "garbage").unwrap();

        assert!(matches!(
            store.load(),
            Err(HerokronError::CorruptRegistry { .. })
        ));
    }
}
