//! Time/pixel mapping for the chart the overlay is drawn on.

/// Coordinate mapping supplied by the chart once it is ready.
pub trait ChartSurface {
    /// Horizontal pixel offset of `time` (epoch seconds) from the surface's left edge.
    fn to_pixel(&self, time: f64) -> f64;
    /// Inverse of [`ChartSurface::to_pixel`].
    fn to_time(&self, x: f64) -> f64;
    /// Time range currently visible, as `(start, end)`.
    fn visible_range(&self) -> (f64, f64);
    /// Visible width in pixels.
    fn width(&self) -> f64;
}

/// Linear time axis: `zoom` pixels per second starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub start: f64,
    pub zoom: f64,
    pub width: f64,
}

impl TimeAxis {
    pub fn new(start: f64, zoom: f64, width: f64) -> Self {
        Self {
            start,
            zoom: zoom.max(f64::EPSILON),
            width: width.max(1.0),
        }
    }

    /// Axis whose right edge sits at `end`.
    pub fn ending_at(end: f64, zoom: f64, width: f64) -> Self {
        let axis = Self::new(0.0, zoom, width);
        Self {
            start: end - axis.width / axis.zoom,
            ..axis
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.width / self.zoom
    }

    /// Shift the visible window by `seconds`.
    pub fn panned(&self, seconds: f64) -> Self {
        Self {
            start: self.start + seconds,
            ..*self
        }
    }

    /// Change zoom keeping the time under `anchor_x` fixed.
    pub fn zoomed(&self, zoom: f64, anchor_x: f64) -> Self {
        let anchor_time = self.to_time(anchor_x);
        let zoom = zoom.max(f64::EPSILON);
        Self {
            start: anchor_time - anchor_x / zoom,
            zoom,
            width: self.width,
        }
    }
}

impl ChartSurface for TimeAxis {
    fn to_pixel(&self, time: f64) -> f64 {
        (time - self.start) * self.zoom
    }

    fn to_time(&self, x: f64) -> f64 {
        self.start + x / self.zoom
    }

    fn visible_range(&self) -> (f64, f64) {
        (self.start, self.end())
    }

    fn width(&self) -> f64 {
        self.width
    }
}
