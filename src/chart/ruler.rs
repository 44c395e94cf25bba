use dioxus::prelude::*;

use crate::constants::{BORDER_STRONG, BORDER_SUBTLE, TEXT_DIM};
use crate::core::surface::{ChartSurface, TimeAxis};

const NICE_TICKS: [f64; 12] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 1800.0, 3600.0,
];

/// Seconds between major ticks so labels sit roughly `target_px` apart.
pub(crate) fn tick_spacing(zoom: f64, target_px: f64) -> f64 {
    let target_seconds = target_px / zoom.max(f64::EPSILON);
    NICE_TICKS
        .iter()
        .copied()
        .find(|tick| *tick >= target_seconds)
        .unwrap_or(NICE_TICKS[NICE_TICKS.len() - 1])
}

/// Upper bound on ticks drawn in one ruler.
const MAX_TICKS: f64 = 200.0;

/// Tick spacing and the first/last tick index covering the visible range.
pub(crate) fn tick_layout(axis: &TimeAxis) -> (f64, i64, i64) {
    let (visible_start, visible_end) = axis.visible_range();
    let mut spacing = tick_spacing(axis.zoom, 90.0);
    let span = (visible_end - visible_start).max(0.0);
    if span / spacing > MAX_TICKS {
        let largest = NICE_TICKS[NICE_TICKS.len() - 1];
        spacing = (span / MAX_TICKS / largest).ceil() * largest;
    }
    let first = (visible_start / spacing).ceil() as i64;
    let last = (visible_end / spacing).floor() as i64;
    (spacing, first, last)
}

fn tick_label(time: f64) -> String {
    chrono::DateTime::from_timestamp(time.floor() as i64, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Time ruler with tick marks and labels
/// All elements here use pointer-events: none so clicks pass through to parent
#[component]
pub(crate) fn TimeRuler(axis: TimeAxis) -> Element {
    let (spacing, first, last) = tick_layout(&axis);

    rsx! {
        div {
            style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; pointer-events: none; border-bottom: 1px solid {BORDER_SUBTLE};",
            for tick in first..=last {
                {
                    let time = tick as f64 * spacing;
                    let x = axis.to_pixel(time);
                    let label = tick_label(time);
                    rsx! {
                        div {
                            key: "tick-{tick}",
                            style: "position: absolute; left: {x}px; bottom: 0; width: 1px; height: 8px; background-color: {BORDER_STRONG};",
                        }
                        div {
                            key: "label-{tick}",
                            style: "position: absolute; left: {x + 4.0}px; top: 3px; font-size: 9px; color: {TEXT_DIM}; font-family: 'SF Mono', Consolas, monospace; user-select: none;",
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_spacing_picks_nice_value() {
        assert_eq!(tick_spacing(10.0, 90.0), 10.0);
        assert_eq!(tick_spacing(100.0, 90.0), 1.0);
        assert_eq!(tick_spacing(0.001, 90.0), 3600.0);
    }

    #[test]
    fn test_tick_count_is_bounded() {
        let axis = TimeAxis::new(0.0, 1e-9, 960.0);
        let (spacing, first, last) = tick_layout(&axis);
        assert!(spacing >= 3600.0);
        assert!(last - first + 1 <= MAX_TICKS as i64 + 1);

        let normal = TimeAxis::new(0.0, 10.0, 960.0);
        assert_eq!(tick_layout(&normal), (10.0, 0, 9));
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(3_661.0), "01:01:01");
    }
}
