//! Chart components
//!
//! - ChartPanel: ruler plus chart body hosting the overlay
//! - AnnotationsLayer: draws the overlay frame for a store snapshot
//! - AnnotationMarker: committed annotation marker
//! - NewAnnotationEditor: capture layer for the annotation being added

mod annotations_layer;
mod marker_element;
mod new_annotation;
mod panel;
mod ruler;

pub use panel::ChartPanel;
