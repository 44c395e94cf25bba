use std::fs;
use std::path::Path;

use super::annotation::Annotation;
use super::store::{AnnotationError, AnnotationStore};

impl AnnotationStore {
    // =========================================================================
    // Save/Load
    // =========================================================================

    /// Write committed annotations to `path` as pretty JSON.
    /// The in-progress annotation is never written.
    pub fn save_to(&self, path: &Path) -> Result<(), AnnotationError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let committed: Vec<&Annotation> = self
            .annotations()
            .iter()
            .filter(|annotation| !annotation.is_temporary())
            .collect();
        let json = serde_json::to_string_pretty(&committed)?;
        fs::write(path, json)?;
        tracing::debug!(count = committed.len(), path = %path.display(), "saved annotations");
        Ok(())
    }

    /// Load committed annotations from `path`. The store starts in normal mode.
    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        let json = fs::read_to_string(path)?;
        let annotations: Vec<Annotation> = serde_json::from_str(&json)?;
        tracing::debug!(count = annotations.len(), path = %path.display(), "loaded annotations");
        Ok(Self::with_annotations(annotations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AnnotationCommands, AnnotationId, Mode};

    fn scratch_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("annotation-overlay-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_save_load_skips_temp() {
        let mut store = AnnotationStore::with_annotations(vec![
            Annotation::new("a", 1.0, "deploy"),
            Annotation::range("b", 2.0, 8.0, "outage"),
        ]);
        store.start_adding(Annotation::temporary("Name Me")).unwrap();

        let path = scratch_file("annotations.json");
        store.save_to(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("tempAnno"));

        let loaded = AnnotationStore::load(&path).unwrap();
        assert_eq!(loaded.mode(), Mode::Normal);
        assert_eq!(loaded.annotations().len(), 2);
        assert_eq!(loaded.annotations()[1].id, AnnotationId::from("b"));
        assert_eq!(loaded.annotations()[1].end_time, Some(8.0));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_committed_annotation_survives_reload() {
        let mut store = AnnotationStore::new();
        store.start_adding(Annotation::new(AnnotationId::Temporary, 4.0, "x")).unwrap();
        store.commit_adding_annotation();

        let path = scratch_file("annotations.json");
        store.save_to(&path).unwrap();
        let loaded = AnnotationStore::load(&path).unwrap();
        assert_eq!(loaded.annotations(), store.annotations());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = AnnotationStore::load(&scratch_file("missing.json"));
        assert!(matches!(result, Err(AnnotationError::Io(_))));
    }
}
