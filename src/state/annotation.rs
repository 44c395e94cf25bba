use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire value that marks the in-progress annotation.
pub const TEMP_ANNOTATION_ID: &str = "tempAnno";

/// Identity of an annotation.
///
/// The in-progress annotation is its own variant rather than a magic string,
/// so code that renders or mutates annotations can match on it directly.
/// On the wire both variants are plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationId {
    /// A committed annotation with a store-assigned id.
    Persisted(String),
    /// The single annotation currently being created.
    Temporary,
}

impl AnnotationId {
    pub fn is_temporary(&self) -> bool {
        matches!(self, AnnotationId::Temporary)
    }

    /// String form used for element keys and logging.
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationId::Persisted(id) => id,
            AnnotationId::Temporary => TEMP_ANNOTATION_ID,
        }
    }
}

impl From<String> for AnnotationId {
    fn from(value: String) -> Self {
        if value == TEMP_ANNOTATION_ID {
            AnnotationId::Temporary
        } else {
            AnnotationId::Persisted(value)
        }
    }
}

impl From<&str> for AnnotationId {
    fn from(value: &str) -> Self {
        AnnotationId::from(value.to_string())
    }
}

impl From<AnnotationId> for String {
    fn from(value: AnnotationId) -> Self {
        match value {
            AnnotationId::Persisted(id) => id,
            AnnotationId::Temporary => TEMP_ANNOTATION_ID.to_string(),
        }
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the store is running an add-annotation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Normal,
    Adding,
}

/// A point-in-time or time-range note drawn over a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    /// Start of the annotation in epoch seconds. `None` means malformed.
    #[serde(default)]
    pub start_time: Option<f64>,
    /// End of the annotation in epoch seconds; absent or equal to the start for a point.
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Annotation {
    /// Create a point annotation.
    pub fn new(id: impl Into<AnnotationId>, time: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time: Some(time),
            end_time: Some(time),
            text: text.into(),
            group: None,
            kind: None,
        }
    }

    /// Create a range annotation.
    #[allow(dead_code)]
    pub fn range(id: impl Into<AnnotationId>, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            end_time: Some(end),
            ..Self::new(id, start, text)
        }
    }

    /// The in-progress annotation inserted when an add session starts.
    /// Times stay empty until the user places it on the chart.
    pub fn temporary(text: impl Into<String>) -> Self {
        Self {
            id: AnnotationId::Temporary,
            start_time: None,
            end_time: None,
            text: text.into(),
            group: None,
            kind: None,
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.id.is_temporary()
    }

    /// True when the end time lies after the start time.
    #[allow(dead_code)]
    pub fn is_range(&self) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.is_finite() && end != start,
            _ => false,
        }
    }

    /// Overwrite the fields carried by `patch`; the id is never touched.
    pub fn apply_patch(&mut self, patch: &AnnotationPatch) {
        if let Some(start) = patch.start_time {
            self.start_time = Some(start);
        }
        if let Some(end) = patch.end_time {
            self.end_time = Some(end);
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(group) = &patch.group {
            self.group = group.clone();
        }
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
    }
}

/// Field replacements for an existing annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPatch {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub text: Option<String>,
    /// `Some(None)` clears the group.
    pub group: Option<Option<String>>,
    pub kind: Option<Option<String>>,
}

impl AnnotationPatch {
    /// Move the annotation to the ordered range between `a` and `b`.
    pub fn span(a: f64, b: f64) -> Self {
        Self {
            start_time: Some(a.min(b)),
            end_time: Some(a.max(b)),
            ..Default::default()
        }
    }

    /// Collapse the annotation onto a single point.
    pub fn point(time: f64) -> Self {
        Self::span(time, time)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}
