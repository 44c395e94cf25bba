//! Canonical annotation list, add-session mode and hover flag.

use uuid::Uuid;

use super::annotation::{Annotation, AnnotationId, AnnotationPatch, Mode};

/// Errors raised by store operations that can refuse.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("an annotation is already being added")]
    AlreadyAdding,
    #[error("annotation not found: {0}")]
    NotFound(AnnotationId),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable view of the store handed to the overlay on every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSnapshot {
    pub annotations: Vec<Annotation>,
    pub mode: Mode,
    pub is_temp_hovering: bool,
}

/// Edit intents forwarded by the overlay. Fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationIntent {
    Update(AnnotationId, AnnotationPatch),
    Commit,
    Dismiss,
    HoverEnter,
    HoverLeave,
}

/// Write side of the store as seen by the overlay.
pub trait AnnotationCommands {
    fn update_annotation(&mut self, id: &AnnotationId, patch: &AnnotationPatch);
    fn commit_adding_annotation(&mut self);
    fn dismiss_adding_annotation(&mut self);
    fn hover_enter_temp(&mut self);
    fn hover_leave_temp(&mut self);

    fn apply(&mut self, intent: AnnotationIntent) {
        match intent {
            AnnotationIntent::Update(id, patch) => self.update_annotation(&id, &patch),
            AnnotationIntent::Commit => self.commit_adding_annotation(),
            AnnotationIntent::Dismiss => self.dismiss_adding_annotation(),
            AnnotationIntent::HoverEnter => self.hover_enter_temp(),
            AnnotationIntent::HoverLeave => self.hover_leave_temp(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    mode: Mode,
    is_temp_hovering: bool,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from committed annotations. Stray temporary entries are dropped.
    pub fn with_annotations(annotations: Vec<Annotation>) -> Self {
        let before = annotations.len();
        let annotations: Vec<Annotation> = annotations
            .into_iter()
            .filter(|annotation| !annotation.is_temporary())
            .collect();
        if annotations.len() != before {
            tracing::warn!(
                dropped = before - annotations.len(),
                "dropped temporary annotations from loaded list"
            );
        }
        Self {
            annotations,
            mode: Mode::Normal,
            is_temp_hovering: false,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[allow(dead_code)]
    pub fn is_temp_hovering(&self) -> bool {
        self.is_temp_hovering
    }

    pub fn snapshot(&self) -> AnnotationSnapshot {
        AnnotationSnapshot {
            annotations: self.annotations.clone(),
            mode: self.mode,
            is_temp_hovering: self.is_temp_hovering,
        }
    }

    pub fn temp_annotation(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.is_temporary())
    }

    /// Enter add mode with a provisional in-progress annotation.
    pub fn start_adding(&mut self, provisional: Annotation) -> Result<(), AnnotationError> {
        if self.temp_annotation().is_some() {
            return Err(AnnotationError::AlreadyAdding);
        }
        let temp = Annotation {
            id: AnnotationId::Temporary,
            ..provisional
        };
        self.annotations.push(temp);
        self.mode = Mode::Adding;
        self.is_temp_hovering = false;
        tracing::debug!("started adding annotation");
        Ok(())
    }

    pub fn delete_annotation(&mut self, id: &AnnotationId) -> Result<Annotation, AnnotationError> {
        if id.is_temporary() {
            // Only dismiss may discard the in-progress annotation.
            return Err(AnnotationError::NotFound(id.clone()));
        }
        let index = self
            .annotations
            .iter()
            .position(|annotation| &annotation.id == id)
            .ok_or_else(|| AnnotationError::NotFound(id.clone()))?;
        tracing::debug!(id = %id, "deleted annotation");
        Ok(self.annotations.remove(index))
    }

    /// Leave add mode and clear the hover hint.
    fn end_session(&mut self) {
        self.mode = Mode::Normal;
        self.is_temp_hovering = false;
    }
}

impl AnnotationCommands for AnnotationStore {
    fn update_annotation(&mut self, id: &AnnotationId, patch: &AnnotationPatch) {
        match self.annotations.iter_mut().find(|annotation| &annotation.id == id) {
            Some(annotation) => annotation.apply_patch(patch),
            None => tracing::warn!(id = %id, "update for unknown annotation ignored"),
        }
    }

    fn commit_adding_annotation(&mut self) {
        let index = self.annotations.iter().position(|annotation| annotation.is_temporary());
        match index {
            Some(index) if !self.annotations[index].start_time.is_some_and(f64::is_finite) => {
                tracing::warn!("commit of an unplaced annotation, discarding it");
                self.annotations.remove(index);
            }
            Some(index) => {
                let id = Uuid::new_v4().to_string();
                tracing::info!(id = %id, "committed new annotation");
                self.annotations[index].id = AnnotationId::Persisted(id);
            }
            None => tracing::debug!("commit without a temporary annotation"),
        }
        self.end_session();
    }

    fn dismiss_adding_annotation(&mut self) {
        let before = self.annotations.len();
        self.annotations.retain(|annotation| !annotation.is_temporary());
        if self.annotations.len() == before {
            tracing::debug!("dismiss without a temporary annotation");
        }
        self.end_session();
    }

    fn hover_enter_temp(&mut self) {
        self.is_temp_hovering = true;
    }

    fn hover_leave_temp(&mut self) {
        self.is_temp_hovering = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing_store() -> AnnotationStore {
        let mut store = AnnotationStore::with_annotations(vec![Annotation::new("a", 1.0, "first")]);
        store
            .start_adding(Annotation::new(AnnotationId::Temporary, 5.0, "x"))
            .unwrap();
        store
    }

    #[test]
    fn test_start_adding_enters_editing() {
        let store = editing_store();
        assert_eq!(store.mode(), Mode::Adding);
        assert_eq!(store.annotations().len(), 2);
        assert!(store.temp_annotation().is_some());
    }

    #[test]
    fn test_start_adding_twice_is_refused() {
        let mut store = editing_store();
        let result = store.start_adding(Annotation::temporary("again"));
        assert!(matches!(result, Err(AnnotationError::AlreadyAdding)));
        let temps = store.annotations().iter().filter(|a| a.is_temporary()).count();
        assert_eq!(temps, 1);
    }

    #[test]
    fn test_update_keeps_mode_and_presence() {
        let mut store = editing_store();
        store.update_annotation(&AnnotationId::Temporary, &AnnotationPatch::span(9.0, 7.0));
        let temp = store.temp_annotation().unwrap();
        assert_eq!(temp.start_time, Some(7.0));
        assert_eq!(temp.end_time, Some(9.0));
        assert_eq!(store.mode(), Mode::Adding);
        assert_eq!(store.annotations().len(), 2);
    }

    #[test]
    fn test_commit_materializes_temp() {
        let mut store = editing_store();
        store.hover_enter_temp();
        store.commit_adding_annotation();
        assert_eq!(store.mode(), Mode::Normal);
        assert!(!store.is_temp_hovering());
        assert!(store.temp_annotation().is_none());
        assert_eq!(store.annotations().len(), 2);
        let committed = &store.annotations()[1];
        assert!(matches!(committed.id, AnnotationId::Persisted(_)));
        assert_eq!(committed.text, "x");
        assert_eq!(committed.start_time, Some(5.0));
    }

    #[test]
    fn test_dismiss_discards_temp() {
        let mut store = editing_store();
        store.dismiss_adding_annotation();
        assert_eq!(store.mode(), Mode::Normal);
        assert_eq!(store.annotations().len(), 1);
        assert!(store.temp_annotation().is_none());
    }

    #[test]
    fn test_commit_of_unplaced_temp_discards_it() {
        let mut store = AnnotationStore::with_annotations(vec![Annotation::new("a", 1.0, "first")]);
        store.start_adding(Annotation::temporary("Name Me")).unwrap();
        store.commit_adding_annotation();
        assert_eq!(store.mode(), Mode::Normal);
        assert_eq!(store.annotations().len(), 1);
        assert_eq!(store.annotations()[0].id, AnnotationId::from("a"));
    }

    #[test]
    fn test_commit_without_temp_only_resets_mode() {
        let mut store = editing_store();
        store.dismiss_adding_annotation();
        store.mode = Mode::Adding;
        store.is_temp_hovering = true;
        let before = store.annotations().to_vec();

        store.commit_adding_annotation();
        assert_eq!(store.mode(), Mode::Normal);
        assert!(!store.is_temp_hovering());
        assert_eq!(store.annotations(), before.as_slice());
    }

    #[test]
    fn test_dismiss_without_temp_only_resets_mode() {
        let mut store = editing_store();
        store.dismiss_adding_annotation();
        store.mode = Mode::Adding;
        let before = store.annotations().to_vec();

        store.dismiss_adding_annotation();
        assert_eq!(store.mode(), Mode::Normal);
        assert_eq!(store.annotations(), before.as_slice());
    }

    #[test]
    fn test_update_of_unknown_id_changes_nothing() {
        let mut store = editing_store();
        let before = store.snapshot();
        store.update_annotation(&AnnotationId::from("missing"), &AnnotationPatch::text("y"));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_hover_is_idempotent() {
        let mut store = editing_store();
        store.hover_enter_temp();
        let once = store.snapshot();
        store.hover_enter_temp();
        assert_eq!(store.snapshot(), once);
        assert!(store.is_temp_hovering());

        store.hover_leave_temp();
        store.hover_leave_temp();
        assert!(!store.is_temp_hovering());
    }

    #[test]
    fn test_hover_outside_session_leaves_list_alone() {
        let mut store = AnnotationStore::new();
        store.hover_enter_temp();
        assert!(store.annotations().is_empty());
        assert_eq!(store.mode(), Mode::Normal);
    }

    #[test]
    fn test_delete_cannot_remove_temp() {
        let mut store = editing_store();
        assert!(store.delete_annotation(&AnnotationId::Temporary).is_err());
        assert!(store.temp_annotation().is_some());

        let removed = store.delete_annotation(&AnnotationId::from("a")).unwrap();
        assert_eq!(removed.text, "first");
        assert!(matches!(
            store.delete_annotation(&AnnotationId::from("a")),
            Err(AnnotationError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_routes_intents() {
        let mut store = editing_store();
        store.apply(AnnotationIntent::HoverEnter);
        assert!(store.is_temp_hovering());
        store.apply(AnnotationIntent::Update(
            AnnotationId::Temporary,
            AnnotationPatch::text("renamed"),
        ));
        assert_eq!(store.temp_annotation().unwrap().text, "renamed");
        store.apply(AnnotationIntent::Dismiss);
        assert_eq!(store.mode(), Mode::Normal);
    }

    #[test]
    fn test_loaded_list_drops_temp() {
        let store = AnnotationStore::with_annotations(vec![
            Annotation::new("a", 1.0, ""),
            Annotation::temporary(""),
        ]);
        assert_eq!(store.annotations().len(), 1);
        assert_eq!(store.mode(), Mode::Normal);
    }
}
