//! Maps annotations onto a chart surface.
//!
//! The overlay turns an [`AnnotationSnapshot`] into an [`OverlayFrame`]: one
//! fixed marker per committed annotation plus, while an annotation is being
//! added, a single editor bound to the temporary annotation. Rendering is a
//! pure function of the snapshot and the attached surface; every edit goes
//! back to the store as an [`AnnotationIntent`](crate::state::AnnotationIntent).

use crate::state::{Annotation, AnnotationId, AnnotationSnapshot, Mode};

use super::surface::ChartSurface;

/// Problems found while rendering. None of them abort a render.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("chart surface is not ready")]
    SurfaceNotReady,
    #[error("found {count} temporary annotations, expected at most one")]
    SentinelInvariantViolation { count: usize },
    #[error("annotation {id} is malformed: {reason}")]
    MalformedAnnotation { id: AnnotationId, reason: &'static str },
}

/// Read-only marker for a committed annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedMarker {
    pub id: AnnotationId,
    /// Pixel offset of the (possibly clipped) start.
    pub x: f64,
    /// Pixel offset of the (possibly clipped) end for range annotations.
    pub end_x: Option<f64>,
    /// Original start and end in epoch seconds after normalization.
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub group: Option<String>,
    pub kind: Option<String>,
    pub time_label: String,
}

impl FixedMarker {
    pub fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// The in-progress annotation while the store is in add mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorMarker {
    /// `None` until the user has placed the annotation.
    pub x: Option<f64>,
    pub end_x: Option<f64>,
    pub text: String,
    pub is_hovering: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayItem {
    Fixed(FixedMarker),
    Editor(EditorMarker),
}

/// Result of one render pass, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub items: Vec<OverlayItem>,
    pub anomalies: Vec<OverlayError>,
}

#[allow(dead_code)]
impl OverlayFrame {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn editor(&self) -> Option<&EditorMarker> {
        self.items.iter().find_map(|item| match item {
            OverlayItem::Editor(editor) => Some(editor),
            OverlayItem::Fixed(_) => None,
        })
    }

    pub fn editor_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, OverlayItem::Editor(_)))
            .count()
    }

    pub fn fixed_markers(&self) -> impl Iterator<Item = &FixedMarker> {
        self.items.iter().filter_map(|item| match item {
            OverlayItem::Fixed(marker) => Some(marker),
            OverlayItem::Editor(_) => None,
        })
    }
}

/// Renders annotations against an attached chart surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationsOverlay<S> {
    surface: Option<S>,
    cull_offscreen: bool,
}

impl<S> Default for AnnotationsOverlay<S> {
    fn default() -> Self {
        Self {
            surface: None,
            cull_offscreen: true,
        }
    }
}

impl<S: ChartSurface> AnnotationsOverlay<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide (or keep) committed annotations entirely outside the visible range.
    pub fn with_culling(mut self, cull_offscreen: bool) -> Self {
        self.cull_offscreen = cull_offscreen;
        self
    }

    /// Register the surface once the chart is ready for coordinate queries.
    pub fn attach_surface(&mut self, surface: S) {
        if self.surface.is_some() {
            tracing::debug!("chart surface replaced");
        }
        self.surface = Some(surface);
    }

    /// Drop the surface; later renders are empty until a new one is attached.
    #[allow(dead_code)]
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Result<&S, OverlayError> {
        self.surface.as_ref().ok_or(OverlayError::SurfaceNotReady)
    }

    #[allow(dead_code)]
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Time under the pointer at `x` pixels.
    #[allow(dead_code)]
    pub fn time_at(&self, x: f64) -> Result<f64, OverlayError> {
        Ok(self.surface()?.to_time(x))
    }

    pub fn render_snapshot(&self, snapshot: &AnnotationSnapshot) -> OverlayFrame {
        self.render(&snapshot.annotations, snapshot.mode, snapshot.is_temp_hovering)
    }

    pub fn render(&self, annotations: &[Annotation], mode: Mode, is_hovering: bool) -> OverlayFrame {
        let Some(surface) = self.surface.as_ref() else {
            tracing::trace!("render skipped, chart surface not ready");
            return OverlayFrame::default();
        };

        let mut frame = OverlayFrame::default();
        let temp_count = annotations.iter().filter(|a| a.is_temporary()).count();
        if temp_count > 1 {
            tracing::warn!(count = temp_count, "multiple temporary annotations, rendering the first");
            frame
                .anomalies
                .push(OverlayError::SentinelInvariantViolation { count: temp_count });
        }

        let mut seen_temp = false;
        for annotation in annotations {
            if annotation.is_temporary() {
                if seen_temp {
                    continue;
                }
                seen_temp = true;
                if mode == Mode::Adding {
                    frame
                        .items
                        .push(OverlayItem::Editor(editor_marker(surface, annotation, is_hovering)));
                    continue;
                }
            }

            match self.fixed_marker(surface, annotation) {
                Ok(Some(marker)) => frame.items.push(OverlayItem::Fixed(marker)),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%err, "skipping annotation");
                    frame.anomalies.push(err);
                }
            }
        }
        frame
    }

    /// `Ok(None)` when the annotation is culled as off screen.
    fn fixed_marker(&self, surface: &S, annotation: &Annotation) -> Result<Option<FixedMarker>, OverlayError> {
        let malformed = |reason| OverlayError::MalformedAnnotation {
            id: annotation.id.clone(),
            reason,
        };
        let (start, end) = normalized_span(annotation).ok_or_else(|| malformed("missing start time"))?;

        let (mut draw_start, mut draw_end) = (start, end);
        if self.cull_offscreen {
            let (visible_start, visible_end) = surface.visible_range();
            if end < visible_start || start > visible_end {
                return Ok(None);
            }
            draw_start = start.max(visible_start);
            draw_end = end.min(visible_end);
        }

        let x = surface.to_pixel(draw_start);
        if !x.is_finite() {
            return Err(malformed("time cannot be mapped to the chart"));
        }
        let end_x = (end > start)
            .then(|| surface.to_pixel(draw_end))
            .filter(|x| x.is_finite());

        Ok(Some(FixedMarker {
            id: annotation.id.clone(),
            x,
            end_x,
            start_time: start,
            end_time: end,
            text: annotation.text.clone(),
            group: annotation.group.clone(),
            kind: annotation.kind.clone(),
            time_label: time_label(start, end),
        }))
    }
}

/// Start and end in ascending order. A missing or non-finite end makes a point.
fn normalized_span(annotation: &Annotation) -> Option<(f64, f64)> {
    let start = annotation.start_time.filter(|time| time.is_finite())?;
    let end = annotation
        .end_time
        .filter(|time| time.is_finite())
        .unwrap_or(start);
    Some(if end < start { (end, start) } else { (start, end) })
}

/// The editor is never culled or clipped.
fn editor_marker<S: ChartSurface>(surface: &S, annotation: &Annotation, is_hovering: bool) -> EditorMarker {
    let span = normalized_span(annotation);
    let x = span
        .map(|(start, _)| surface.to_pixel(start))
        .filter(|x| x.is_finite());
    let end_x = span
        .filter(|(start, end)| end > start)
        .map(|(_, end)| surface.to_pixel(end))
        .filter(|x| x.is_finite());
    EditorMarker {
        x,
        end_x: x.and(end_x),
        text: annotation.text.clone(),
        is_hovering,
    }
}

/// UTC label shown in the marker tooltip.
pub fn format_time(time: f64) -> String {
    chrono::DateTime::from_timestamp_millis((time * 1000.0).round() as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("{time:.3}"))
}

fn time_label(start: f64, end: f64) -> String {
    if end > start {
        format!("{} - {}", format_time(start), format_time(end))
    } else {
        format_time(start)
    }
}
