//! Shared UI constants such as colors and chart sizing.

pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_ANNOTATION: &str = "#f97316";
pub const ACCENT_EDITOR: &str = "#22c55e";
pub const ACCENT_DANGER: &str = "#ef4444";

pub const CHART_HEIGHT: f64 = 320.0;
pub const RULER_HEIGHT: f64 = 24.0;
pub const TOOLBAR_HEIGHT: f64 = 36.0;
pub const ZOOM_STEP: f64 = 1.25;
pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 200.0;
pub const RANGE_BAND_OPACITY: f64 = 0.18;
