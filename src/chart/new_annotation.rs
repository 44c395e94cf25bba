use dioxus::prelude::*;

use crate::constants::{
    BG_SURFACE, BORDER_DEFAULT, RANGE_BAND_OPACITY, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::core::gesture::NewAnnotationGesture;
use crate::core::overlay::EditorMarker;
use crate::core::surface::TimeAxis;
use crate::state::{AnnotationId, AnnotationIntent, AnnotationPatch};

/// Capture layer shown while an annotation is being added.
/// Click to place a point, drag to place a range.
#[component]
pub fn NewAnnotationEditor(
    editor: EditorMarker,
    axis: TimeAxis,
    color: String,
    click_threshold_px: f64,
    on_intent: EventHandler<AnnotationIntent>,
) -> Element {
    let mut gesture = use_signal(|| NewAnnotationGesture::new(click_threshold_px));
    let dispatch = move |intents: Vec<AnnotationIntent>| {
        for intent in intents {
            on_intent.call(intent);
        }
    };

    let hover_style = if editor.is_hovering { "0.9" } else { "0.6" };
    let prompt = if gesture.read().is_dragging() {
        "Release to place annotation"
    } else {
        "Click or drag to annotate"
    };

    rsx! {
        div {
            style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; cursor: crosshair; z-index: 10;",
            onmouseenter: move |_| {
                let intents = gesture.write().pointer_enter();
                dispatch(intents);
            },
            onmouseleave: move |_| {
                let intents = gesture.write().pointer_leave(&axis);
                dispatch(intents);
            },
            onmousedown: move |e| {
                e.prevent_default();
                e.stop_propagation();
                let intents = gesture.write().pointer_down(&axis, e.element_coordinates().x);
                dispatch(intents);
            },
            onmousemove: move |e| {
                if gesture.read().is_dragging() {
                    let intents = gesture.write().pointer_move(&axis, e.element_coordinates().x);
                    dispatch(intents);
                }
            },
            onmouseup: move |e| {
                let intents = gesture.write().pointer_up(&axis, e.element_coordinates().x);
                dispatch(intents);
            },

            if let Some(x) = editor.x {
                if let Some(end_x) = editor.end_x {
                    div {
                        style: "position: absolute; left: {x}px; top: 0; width: {(end_x - x).max(1.0)}px; height: 100%; background-color: {color}; opacity: {RANGE_BAND_OPACITY}; pointer-events: none;",
                    }
                    div {
                        style: "position: absolute; left: {end_x}px; top: 0; width: 1px; height: 100%; background-color: {color}; pointer-events: none;",
                    }
                }
                div {
                    style: "position: absolute; left: {x}px; top: 0; width: 2px; height: 100%; background-color: {color}; opacity: {hover_style}; pointer-events: none;",
                }
            }

            div {
                style: "
                    position: absolute;
                    left: 50%;
                    top: 8px;
                    transform: translateX(-50%);
                    display: flex;
                    align-items: center;
                    gap: 8px;
                    padding: 4px 8px;
                    background-color: {BG_SURFACE};
                    border: 1px solid {BORDER_DEFAULT};
                    border-radius: 6px;
                    font-size: 11px;
                    color: {TEXT_MUTED};
                ",
                onmousedown: move |e| e.stop_propagation(),
                onmouseup: move |e| e.stop_propagation(),
                span { "{prompt}" }
                input {
                    r#type: "text",
                    value: "{editor.text}",
                    style: "width: 140px; font-size: 11px; padding: 2px 4px; background: transparent; color: {TEXT_PRIMARY}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;",
                    // Keep typed letters from reaching the app hotkeys; Escape still cancels.
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() != Key::Escape {
                            e.stop_propagation();
                        }
                    },
                    oninput: move |e| on_intent.call(AnnotationIntent::Update(
                        AnnotationId::Temporary,
                        AnnotationPatch::text(e.value()),
                    )),
                }
                button {
                    style: "font-size: 11px; padding: 2px 8px; border: none; border-radius: 4px; cursor: pointer;",
                    onclick: move |_| {
                        let intents = gesture.write().cancel();
                        dispatch(intents);
                    },
                    "Cancel"
                }
            }
        }
    }
}
