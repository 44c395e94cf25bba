//! State management module
//!
//! - Annotation: point or range notes drawn over the chart
//! - AnnotationStore: the canonical list, add-session mode and hover flag
//! - OverlaySettings: user settings loaded from JSON

mod annotation;
mod persistence;
mod settings;
mod store;

pub use annotation::{Annotation, AnnotationId, AnnotationPatch, Mode};
pub use settings::{OverlaySettings, SETTINGS_FILE_NAME};
pub use store::{AnnotationCommands, AnnotationIntent, AnnotationSnapshot, AnnotationStore};
