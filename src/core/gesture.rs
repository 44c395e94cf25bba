//! Pointer handling for placing a new annotation.
//!
//! A click places a point annotation, a drag places a range. The gesture
//! never touches the store itself; it emits intents for the owner to apply.

use crate::state::{AnnotationId, AnnotationIntent, AnnotationPatch};

use super::surface::ChartSurface;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum GestureState {
    #[default]
    Idle,
    Dragging {
        origin_x: f64,
        origin_time: f64,
        last_x: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewAnnotationGesture {
    state: GestureState,
    click_threshold_px: f64,
}

impl NewAnnotationGesture {
    pub fn new(click_threshold_px: f64) -> Self {
        Self {
            state: GestureState::Idle,
            click_threshold_px: click_threshold_px.max(0.0),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn pointer_down<S: ChartSurface>(&mut self, surface: &S, x: f64) -> Vec<AnnotationIntent> {
        let origin_time = surface.to_time(x);
        self.state = GestureState::Dragging {
            origin_x: x,
            origin_time,
            last_x: x,
        };
        vec![update(AnnotationPatch::point(origin_time))]
    }

    pub fn pointer_move<S: ChartSurface>(&mut self, surface: &S, x: f64) -> Vec<AnnotationIntent> {
        let GestureState::Dragging {
            origin_x,
            origin_time,
            ..
        } = self.state
        else {
            return Vec::new();
        };
        self.state = GestureState::Dragging {
            origin_x,
            origin_time,
            last_x: x,
        };
        vec![update(self.placement(surface, origin_x, origin_time, x))]
    }

    /// Finish the placement and commit it.
    pub fn pointer_up<S: ChartSurface>(&mut self, surface: &S, x: f64) -> Vec<AnnotationIntent> {
        let GestureState::Dragging {
            origin_x,
            origin_time,
            ..
        } = self.state
        else {
            return Vec::new();
        };
        self.state = GestureState::Idle;
        let patch = self.placement(surface, origin_x, origin_time, x);
        tracing::debug!(start = ?patch.start_time, end = ?patch.end_time, "placed new annotation");
        vec![update(patch), AnnotationIntent::Commit]
    }

    pub fn pointer_enter(&mut self) -> Vec<AnnotationIntent> {
        vec![AnnotationIntent::HoverEnter]
    }

    /// Leaving mid-drag finishes the placement at the last seen position.
    pub fn pointer_leave<S: ChartSurface>(&mut self, surface: &S) -> Vec<AnnotationIntent> {
        let mut intents = match self.state {
            GestureState::Dragging { last_x, .. } => self.pointer_up(surface, last_x),
            GestureState::Idle => Vec::new(),
        };
        intents.push(AnnotationIntent::HoverLeave);
        intents
    }

    pub fn cancel(&mut self) -> Vec<AnnotationIntent> {
        self.state = GestureState::Idle;
        vec![AnnotationIntent::Dismiss]
    }

    fn placement<S: ChartSurface>(&self, surface: &S, origin_x: f64, origin_time: f64, x: f64) -> AnnotationPatch {
        if (x - origin_x).abs() < self.click_threshold_px {
            AnnotationPatch::point(origin_time)
        } else {
            AnnotationPatch::span(origin_time, surface.to_time(x))
        }
    }
}

fn update(patch: AnnotationPatch) -> AnnotationIntent {
    AnnotationIntent::Update(AnnotationId::Temporary, patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::TimeAxis;
    use crate::state::{Annotation, AnnotationCommands, AnnotationStore, Mode};

    fn axis() -> TimeAxis {
        TimeAxis::new(100.0, 10.0, 1_000.0)
    }

    #[test]
    fn test_click_places_point_and_commits() {
        let mut gesture = NewAnnotationGesture::new(4.0);
        let surface = axis();
        gesture.pointer_down(&surface, 50.0);
        let intents = gesture.pointer_up(&surface, 52.0);
        assert_eq!(
            intents,
            vec![update(AnnotationPatch::point(105.0)), AnnotationIntent::Commit]
        );
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_drag_left_produces_ordered_range() {
        let mut gesture = NewAnnotationGesture::new(4.0);
        let surface = axis();
        gesture.pointer_down(&surface, 300.0);
        let moved = gesture.pointer_move(&surface, 100.0);
        assert_eq!(moved, vec![update(AnnotationPatch::span(110.0, 130.0))]);
        let intents = gesture.pointer_up(&surface, 100.0);
        assert_eq!(intents[0], update(AnnotationPatch::span(110.0, 130.0)));
        assert_eq!(intents[1], AnnotationIntent::Commit);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut gesture = NewAnnotationGesture::new(4.0);
        assert!(gesture.pointer_move(&axis(), 10.0).is_empty());
        assert!(gesture.pointer_up(&axis(), 10.0).is_empty());
    }

    #[test]
    fn test_leave_mid_drag_commits_last_position() {
        let mut gesture = NewAnnotationGesture::new(4.0);
        let surface = axis();
        gesture.pointer_down(&surface, 0.0);
        gesture.pointer_move(&surface, 200.0);
        let intents = gesture.pointer_leave(&surface);
        assert_eq!(
            intents,
            vec![
                update(AnnotationPatch::span(100.0, 120.0)),
                AnnotationIntent::Commit,
                AnnotationIntent::HoverLeave,
            ]
        );
    }

    #[test]
    fn test_gesture_drives_store_to_commit() {
        let mut store = AnnotationStore::new();
        store.start_adding(Annotation::temporary("Name Me")).unwrap();
        let mut gesture = NewAnnotationGesture::new(4.0);
        let surface = axis();

        let mut intents = gesture.pointer_enter();
        intents.extend(gesture.pointer_down(&surface, 100.0));
        intents.extend(gesture.pointer_move(&surface, 150.0));
        intents.extend(gesture.pointer_up(&surface, 200.0));
        for intent in intents {
            store.apply(intent);
        }

        assert_eq!(store.mode(), Mode::Normal);
        assert!(!store.is_temp_hovering());
        let committed = &store.annotations()[0];
        assert!(!committed.is_temporary());
        assert_eq!(committed.start_time, Some(110.0));
        assert_eq!(committed.end_time, Some(120.0));
        assert_eq!(committed.text, "Name Me");
    }

    #[test]
    fn test_cancel_dismisses() {
        let mut store = AnnotationStore::new();
        store.start_adding(Annotation::temporary("Name Me")).unwrap();
        let mut gesture = NewAnnotationGesture::new(4.0);
        gesture.pointer_down(&axis(), 10.0);
        for intent in gesture.cancel() {
            store.apply(intent);
        }
        assert!(store.annotations().is_empty());
        assert_eq!(store.mode(), Mode::Normal);
        assert!(!gesture.is_dragging());
    }
}
