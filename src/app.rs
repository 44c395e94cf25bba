use dioxus::prelude::*;

use crate::chart::ChartPanel;
use crate::constants::{
    BG_BASE, BG_HOVER, BG_SURFACE, BORDER_DEFAULT, MAX_ZOOM, MIN_ZOOM, TEXT_MUTED, TEXT_PRIMARY,
    TOOLBAR_HEIGHT, ZOOM_STEP,
};
use crate::core::paths::annotations_path;
use crate::core::surface::TimeAxis;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{
    Annotation, AnnotationCommands, AnnotationId, AnnotationIntent, AnnotationStore, Mode,
    OverlaySettings,
};

fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

fn load_store(settings: &OverlaySettings) -> AnnotationStore {
    let path = annotations_path(settings.annotations_path.as_deref());
    if !path.exists() {
        return AnnotationStore::new();
    }
    match AnnotationStore::load(&path) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, path = %path.display(), "failed to load annotations");
            AnnotationStore::new()
        }
    }
}

/// Main application component
#[component]
pub fn App() -> Element {
    let settings = use_context::<OverlaySettings>();
    let mut store = use_signal({
        let settings = settings.clone();
        move || load_store(&settings)
    });
    let mut axis = use_signal({
        let settings = settings.clone();
        move || TimeAxis::ending_at(now_seconds(), settings.zoom, settings.chart_width)
    });
    let mut surface_ready = use_signal(|| false);
    let mut status = use_signal(String::new);

    let snapshot = store.read().snapshot();
    let is_adding = snapshot.mode == Mode::Adding;

    let default_text = use_signal({
        let text = settings.default_text.clone();
        move || text
    });
    let save_path = use_signal({
        let configured = settings.annotations_path.clone();
        move || annotations_path(configured.as_deref())
    });

    let mut start_annotation = move || {
        let provisional = Annotation::temporary(default_text());
        match store.write().start_adding(provisional) {
            Ok(()) => status.set("Click or drag on the chart to place the annotation".to_string()),
            Err(err) => tracing::debug!(%err, "start annotation ignored"),
        }
    };
    let mut dismiss_annotation = move || {
        store.write().dismiss_adding_annotation();
        status.set(String::new());
    };
    let mut save_annotations = move || {
        let path = save_path();
        let result = store.read().save_to(&path);
        match result {
            Ok(()) => status.set(format!("Saved to {}", path.display())),
            Err(err) => {
                tracing::error!(%err, "failed to save annotations");
                status.set(format!("Save failed: {err}"));
            }
        }
    };
    let mut zoom_by = move |factor: f64| {
        let current = axis();
        let zoom = (current.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        axis.set(current.zoomed(zoom, current.width));
    };
    let mut pan_by = move |fraction: f64| {
        let current = axis();
        axis.set(current.panned(current.width / current.zoom * fraction));
    };

    let button_style = format!(
        "height: 24px; padding: 0 10px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; \
         background-color: {BG_SURFACE}; color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;"
    );
    let annotate_bg = if is_adding { BG_HOVER } else { BG_SURFACE };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 12px;
                width: 100vw; height: 100vh; padding: 16px; box-sizing: border-box;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                outline: none;
            ",
            tabindex: "0",
            oncontextmenu: move |e| e.prevent_default(),
            onkeydown: move |e: KeyboardEvent| {
                let hotkey_context = HotkeyContext {
                    is_adding: store.read().mode() == Mode::Adding,
                };
                let modifiers = e.modifiers();
                match handle_hotkey(&e.key(), modifiers.ctrl(), modifiers.meta(), &hotkey_context) {
                    HotkeyResult::Action(action) => {
                        e.prevent_default();
                        tracing::debug!(?action, "hotkey");
                        match action {
                            HotkeyAction::ZoomIn => zoom_by(ZOOM_STEP),
                            HotkeyAction::ZoomOut => zoom_by(1.0 / ZOOM_STEP),
                            HotkeyAction::StartAnnotation => start_annotation(),
                            HotkeyAction::DismissAnnotation => dismiss_annotation(),
                            HotkeyAction::SaveAnnotations => save_annotations(),
                        }
                    }
                    HotkeyResult::NoMatch => {}
                }
            },

            // Toolbar
            div {
                style: "display: flex; align-items: center; gap: 8px; height: {TOOLBAR_HEIGHT}px;",
                span { style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px; margin-right: 8px;", "Annotations" }
                button {
                    style: "{button_style} background-color: {annotate_bg};",
                    onclick: move |_| {
                        if store.read().mode() == Mode::Adding {
                            dismiss_annotation();
                        } else {
                            start_annotation();
                        }
                    },
                    if is_adding { "Cancel Annotation" } else { "Annotate" }
                }
                button { style: "{button_style}", onclick: move |_| pan_by(-0.5), "◀" }
                button { style: "{button_style}", onclick: move |_| pan_by(0.5), "▶" }
                button { style: "{button_style}", onclick: move |_| zoom_by(1.0 / ZOOM_STEP), "−" }
                button { style: "{button_style}", onclick: move |_| zoom_by(ZOOM_STEP), "+" }
                button { style: "{button_style}", onclick: move |_| save_annotations(), "Save" }
                span { style: "font-size: 11px; color: {TEXT_MUTED};", "{status}" }
            }

            ChartPanel {
                axis: axis(),
                surface_ready: surface_ready(),
                snapshot,
                settings: settings.clone(),
                on_ready: move |_| {
                    if !surface_ready() {
                        tracing::debug!("chart surface ready");
                        surface_ready.set(true);
                    }
                },
                on_intent: move |intent: AnnotationIntent| {
                    if intent == AnnotationIntent::Commit {
                        status.set(String::new());
                    }
                    store.write().apply(intent);
                },
                on_delete: move |id: AnnotationId| {
                    if let Err(err) = store.write().delete_annotation(&id) {
                        tracing::warn!(%err, "delete failed");
                    }
                },
            }
        }
    }
}
