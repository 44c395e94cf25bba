use dioxus::prelude::*;

use crate::core::overlay::{AnnotationsOverlay, OverlayItem};
use crate::core::surface::TimeAxis;
use crate::state::{AnnotationId, AnnotationIntent, AnnotationSnapshot, OverlaySettings};

use super::marker_element::AnnotationMarker;
use super::new_annotation::NewAnnotationEditor;

/// Draws the overlay frame for the current store snapshot.
/// Renders nothing until the chart surface is ready.
#[component]
pub fn AnnotationsLayer(
    snapshot: AnnotationSnapshot,
    surface: Option<TimeAxis>,
    settings: OverlaySettings,
    on_intent: EventHandler<AnnotationIntent>,
    on_delete: EventHandler<AnnotationId>,
) -> Element {
    let mut overlay = AnnotationsOverlay::new().with_culling(settings.cull_offscreen);
    if let Some(axis) = surface {
        overlay.attach_surface(axis);
    }
    let Ok(axis) = overlay.surface().copied() else {
        return rsx! {};
    };
    let frame = overlay.render_snapshot(&snapshot);

    rsx! {
        div {
            class: "annotations-container",
            style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; overflow: hidden;",
            for item in frame.items {
                {
                    match item {
                        OverlayItem::Fixed(marker) => rsx! {
                            AnnotationMarker {
                                key: "{marker.key()}",
                                marker: marker.clone(),
                                color: settings.marker_color.clone(),
                                zoom: axis.zoom,
                                on_intent: move |intent| on_intent.call(intent),
                                on_delete: move |id| on_delete.call(id),
                            }
                        },
                        OverlayItem::Editor(editor) => {
                            let editor_key = "new-annotation";
                            rsx! {
                            NewAnnotationEditor {
                                key: "{editor_key}",
                                editor,
                                axis,
                                color: settings.editor_color.clone(),
                                click_threshold_px: settings.click_threshold_px,
                                on_intent: move |intent| on_intent.call(intent),
                            }
                            }
                        }
                    }
                }
            }
        }
    }
}
