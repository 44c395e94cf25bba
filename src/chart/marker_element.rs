use dioxus::prelude::*;

use crate::constants::{
    ACCENT_DANGER, BG_SURFACE, BORDER_DEFAULT, RANGE_BAND_OPACITY, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::core::overlay::FixedMarker;
use crate::state::{AnnotationId, AnnotationIntent, AnnotationPatch};

/// Committed annotation: a vertical line, plus a shaded band for ranges.
/// Dragging moves the annotation; the context menu deletes it.
#[component]
pub fn AnnotationMarker(
    marker: FixedMarker,
    color: String,
    zoom: f64,
    on_intent: EventHandler<AnnotationIntent>,
    on_delete: EventHandler<AnnotationId>,
) -> Element {
    let x = marker.x;
    let band_width = marker.end_x.map(|end_x| (end_x - x).max(1.0));
    let start_time = marker.start_time;
    let end_time = marker.end_time;
    let tags: Vec<&str> = [marker.kind.as_deref(), marker.group.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    let mut tooltip = marker.time_label.clone();
    if !marker.text.is_empty() {
        tooltip = format!("{}\n{}", marker.text, tooltip);
    }
    if !tags.is_empty() {
        tooltip = format!("{}\n[{}]", tooltip, tags.join(", "));
    }

    let mut drag_active = use_signal(|| false);
    let mut drag_start_x = use_signal(|| 0.0);
    let mut drag_origin = use_signal(|| (start_time, end_time));
    let mut show_menu = use_signal(|| false);
    let mut menu_pos = use_signal(|| (0.0, 0.0));

    let move_id = marker.id.clone();
    let delete_id = marker.id.clone();

    rsx! {
        if let Some(band_width) = band_width {
            div {
                style: "
                    position: absolute;
                    left: {x}px;
                    top: 0;
                    width: {band_width}px;
                    height: 100%;
                    background-color: {color};
                    opacity: {RANGE_BAND_OPACITY};
                    pointer-events: none;
                ",
            }
        }
        div {
            title: "{tooltip}",
            style: "
                position: absolute;
                left: {x}px;
                top: 0;
                height: 100%;
                width: 9px;
                transform: translateX(-4px);
                cursor: ew-resize;
            ",
            onmousedown: move |e| {
                if let Some(btn) = e.trigger_button() {
                    if format!("{:?}", btn) == "Primary" {
                        e.prevent_default();
                        e.stop_propagation();
                        drag_active.set(true);
                        drag_start_x.set(e.client_coordinates().x);
                        drag_origin.set((start_time, end_time));
                    }
                }
            },
            oncontextmenu: move |e| {
                e.prevent_default();
                e.stop_propagation();
                let coords = e.client_coordinates();
                menu_pos.set((coords.x, coords.y));
                show_menu.set(true);
            },

            div {
                style: "
                    position: absolute;
                    left: 4px;
                    top: 0;
                    width: 1px;
                    height: 100%;
                    background-color: {color};
                ",
            }
            div {
                style: "
                    position: absolute;
                    left: 0;
                    top: 0;
                    width: 0;
                    height: 0;
                    border-left: 4px solid transparent;
                    border-right: 4px solid transparent;
                    border-top: 6px solid {color};
                ",
            }
            if !marker.text.is_empty() {
                div {
                    style: "
                        position: absolute;
                        left: 10px;
                        top: 2px;
                        max-width: 140px;
                        padding: 2px 6px;
                        font-size: 10px;
                        border-radius: 6px;
                        background-color: {BG_SURFACE};
                        color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_DEFAULT};
                        white-space: nowrap;
                        overflow: hidden;
                        text-overflow: ellipsis;
                        pointer-events: none;
                    ",
                    "{marker.text}"
                }
            }
        }

        if drag_active() {
            div {
                style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 9999; cursor: ew-resize;",
                oncontextmenu: move |e| e.prevent_default(),
                onmousemove: move |e| {
                    let delta = (e.client_coordinates().x - drag_start_x()) / zoom.max(f64::EPSILON);
                    let (origin_start, origin_end) = drag_origin();
                    on_intent.call(AnnotationIntent::Update(
                        move_id.clone(),
                        AnnotationPatch::span(origin_start + delta, origin_end + delta),
                    ));
                },
                onmouseup: move |_| drag_active.set(false),
            }
        }

        if show_menu() {
            div {
                style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 9998;",
                onclick: move |_| show_menu.set(false),
                oncontextmenu: move |e| {
                    e.prevent_default();
                    show_menu.set(false);
                },
            }
            div {
                style: "
                    position: fixed;
                    left: {menu_pos().0}px;
                    top: {menu_pos().1}px;
                    background-color: {BG_SURFACE};
                    border: 1px solid {BORDER_DEFAULT};
                    border-radius: 6px;
                    padding: 4px 0;
                    min-width: 140px;
                    box-shadow: 0 4px 12px rgba(0,0,0,0.3);
                    z-index: 9999;
                    font-size: 12px;
                ",
                oncontextmenu: move |e| e.prevent_default(),
                div {
                    style: "padding: 6px 12px; color: {TEXT_SECONDARY}; font-size: 10px;",
                    "{marker.time_label}"
                }
                div {
                    style: "
                        padding: 6px 12px;
                        color: {ACCENT_DANGER};
                        cursor: pointer;
                    ",
                    onclick: move |_| {
                        on_delete.call(delete_id.clone());
                        show_menu.set(false);
                    },
                    "Delete Annotation"
                }
            }
        }
    }
}
