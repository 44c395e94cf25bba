use dioxus::prelude::*;

use crate::constants::{
    BG_ELEVATED, BG_SURFACE, BORDER_DEFAULT, CHART_HEIGHT, RULER_HEIGHT, TEXT_DIM, TEXT_MUTED,
};
use crate::core::surface::TimeAxis;
use crate::state::{AnnotationId, AnnotationIntent, AnnotationSnapshot, Mode, OverlaySettings};

use super::annotations_layer::AnnotationsLayer;
use super::ruler::TimeRuler;

/// Chart area with a time ruler and the annotation overlay.
#[component]
pub fn ChartPanel(
    axis: TimeAxis,
    surface_ready: bool,
    snapshot: AnnotationSnapshot,
    settings: OverlaySettings,
    // Fired once when the chart body is mounted and can map coordinates
    on_ready: EventHandler<()>,
    on_intent: EventHandler<AnnotationIntent>,
    on_delete: EventHandler<AnnotationId>,
) -> Element {
    let surface = surface_ready.then_some(axis);
    let width = axis.width;
    let body_height = CHART_HEIGHT - RULER_HEIGHT;
    let committed = snapshot
        .annotations
        .iter()
        .filter(|annotation| !annotation.is_temporary())
        .count();
    let mode_label = match snapshot.mode {
        Mode::Normal => "Normal",
        Mode::Adding => "Adding",
    };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                width: {width}px; height: {CHART_HEIGHT}px;
                background-color: {BG_ELEVATED};
                border: 1px solid {BORDER_DEFAULT};
                border-radius: 6px;
                overflow: hidden;
            ",

            // Ruler
            div {
                style: "position: relative; height: {RULER_HEIGHT}px; flex-shrink: 0; background-color: {BG_SURFACE};",
                TimeRuler { axis }
            }

            // Chart body
            div {
                style: "position: relative; height: {body_height}px; user-select: none;",
                onmounted: move |_| on_ready.call(()),
                AnnotationsLayer {
                    snapshot,
                    surface,
                    settings,
                    on_intent: move |intent| on_intent.call(intent),
                    on_delete: move |id| on_delete.call(id),
                }
            }
        }
        div {
            style: "display: flex; gap: 12px; padding: 6px 2px; font-size: 10px; color: {TEXT_DIM};",
            span { style: "color: {TEXT_MUTED};", "Mode: {mode_label}" }
            span { "{committed} annotations" }
        }
    }
}
