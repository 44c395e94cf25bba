//! Hotkey system
//!
//! - **HotkeyAction**: semantic actions triggered by keys
//! - **HotkeyContext**: app state that decides which hotkeys are active
//! - **handle_hotkey()**: maps key events to actions

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Zoom the chart in (more pixels per second)
    ZoomIn,
    /// Zoom the chart out
    ZoomOut,
    /// Start adding an annotation
    StartAnnotation,
    /// Cancel the annotation being added
    DismissAnnotation,
    /// Save committed annotations
    SaveAnnotations,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether an annotation is currently being added
    pub is_adding: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    Action(HotkeyAction),
    NoMatch,
}

pub fn handle_hotkey(key: &Key, ctrl: bool, meta: bool, context: &HotkeyContext) -> HotkeyResult {
    match key {
        Key::Escape if context.is_adding => HotkeyResult::Action(HotkeyAction::DismissAnnotation),
        Key::Character(c) if (ctrl || meta) && c.eq_ignore_ascii_case("s") => {
            HotkeyResult::Action(HotkeyAction::SaveAnnotations)
        }
        Key::Character(c) if c == "+" || c == "=" => HotkeyResult::Action(HotkeyAction::ZoomIn),
        Key::Character(c) if c == "-" => HotkeyResult::Action(HotkeyAction::ZoomOut),
        Key::Character(c) if !context.is_adding && c.eq_ignore_ascii_case("a") => {
            HotkeyResult::Action(HotkeyAction::StartAnnotation)
        }
        _ => HotkeyResult::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_zooms_in() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("+".to_string()), false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::ZoomIn)));
    }

    #[test]
    fn test_a_starts_annotation_only_when_idle() {
        let idle = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("a".to_string()), false, false, &idle);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::StartAnnotation)));

        let adding = HotkeyContext { is_adding: true };
        let result = handle_hotkey(&Key::Character("a".to_string()), false, false, &adding);
        assert!(matches!(result, HotkeyResult::NoMatch));
    }

    #[test]
    fn test_escape_dismisses_while_adding() {
        let ctx = HotkeyContext { is_adding: true };
        let result = handle_hotkey(&Key::Escape, false, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::DismissAnnotation)));
    }

    #[test]
    fn test_escape_when_idle_is_ignored() {
        let result = handle_hotkey(&Key::Escape, false, false, &HotkeyContext::default());
        assert!(matches!(result, HotkeyResult::NoMatch));
    }

    #[test]
    fn test_ctrl_s_saves() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("s".to_string()), true, false, &ctx);
        assert!(matches!(result, HotkeyResult::Action(HotkeyAction::SaveAnnotations)));
    }
}
