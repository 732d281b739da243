use serde::{Deserialize, Serialize};

use crate::core::{DataBounds, DataPoint, ExpressionSanitizer, LinearScale, Viewport};
use crate::error::{NumlabError, NumlabResult};
use crate::render::{
    Color, LinePrimitive, MarkerPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

/// Colors and metrics for a result plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub background: Color,
    pub axis_color: Color,
    pub series_color: Color,
    pub marker_color: Color,
    pub label_color: Color,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub font_size_px: f64,
    pub padding_px: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            axis_color: Color::rgb(0.35, 0.35, 0.35),
            series_color: Color::rgb(0.16, 0.38, 0.85),
            marker_color: Color::rgb(0.85, 0.25, 0.2),
            label_color: Color::rgb(0.1, 0.1, 0.1),
            stroke_width: 2.0,
            marker_radius: 3.0,
            font_size_px: 12.0,
            padding_px: 40.0,
        }
    }
}

/// Projected segment between two consecutive samples, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Maps samples through both scales and joins neighbours into segments.
///
/// Deterministic so the builder and tests share the exact same geometry.
pub fn project_polyline(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> NumlabResult<Vec<LineSegment>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut mapped = Vec::with_capacity(points.len());
    for point in points {
        mapped.push((
            x_scale.domain_to_pixel(point.x)?,
            y_scale.domain_to_pixel(point.y)?,
        ));
    }

    Ok(mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect())
}

/// Turns a result series into a `RenderFrame`: two axes, their extreme
/// labels, the polyline, one marker per sample and an optional caption.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotBuilder {
    viewport: Viewport,
    style: PlotStyle,
    caption: Option<String>,
}

impl PlotBuilder {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            style: PlotStyle::default(),
            caption: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        self.caption = (!caption.trim().is_empty()).then_some(caption);
        self
    }

    /// Captions the plot with the machine form of a user expression.
    #[must_use]
    pub fn with_expression(self, raw: &str, sanitizer: &ExpressionSanitizer) -> Self {
        let sanitized = sanitizer.sanitize(raw);
        self.with_caption(format!("f(x) = {sanitized}"))
    }

    #[must_use]
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    /// Non-finite samples are dropped before projection. The returned frame
    /// always passes [`RenderFrame::validate`].
    pub fn build(&self, points: &[DataPoint]) -> NumlabResult<RenderFrame> {
        let Viewport { width, height } = self.viewport;
        if !self.viewport.is_valid() {
            return Err(NumlabError::InvalidViewport { width, height });
        }
        let pad = self.style.padding_px;
        let (w, h) = (f64::from(width), f64::from(height));
        if !pad.is_finite() || pad < 0.0 || pad * 2.0 >= w || pad * 2.0 >= h {
            return Err(NumlabError::InvalidData(format!(
                "padding {pad}px does not fit a {width}x{height} plot"
            )));
        }

        let style = self.style;
        let mut frame = RenderFrame::new(self.viewport)
            .with_line(LinePrimitive::new(pad, h - pad, w - pad, h - pad, 1.0, style.axis_color))
            .with_line(LinePrimitive::new(pad, pad, pad, h - pad, 1.0, style.axis_color));

        if let Some(caption) = &self.caption {
            frame = frame.with_text(TextPrimitive::new(
                caption.clone(),
                pad,
                pad * 0.25,
                style.font_size_px,
                style.label_color,
                TextHAlign::Left,
            ));
        }

        let finite: Vec<DataPoint> = points.iter().copied().filter(|p| p.is_finite()).collect();
        let Some(bounds) = DataBounds::from_points(&finite) else {
            frame.validate()?;
            return Ok(frame);
        };
        let x_scale = LinearScale::new(bounds.x_min, bounds.x_max)?.with_range(pad, w - pad)?;
        let y_scale = LinearScale::new(bounds.y_min, bounds.y_max)?.with_range(h - pad, pad)?;

        for segment in project_polyline(&finite, x_scale, y_scale)? {
            frame = frame.with_line(LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                style.stroke_width,
                style.series_color,
            ));
        }
        for point in &finite {
            frame = frame.with_marker(MarkerPrimitive::new(
                x_scale.domain_to_pixel(point.x)?,
                y_scale.domain_to_pixel(point.y)?,
                style.marker_radius,
                style.marker_color,
            ));
        }

        let label = |text: f64, x: f64, y: f64, h_align: TextHAlign| {
            TextPrimitive::new(
                format_tick(text),
                x,
                y,
                style.font_size_px,
                style.label_color,
                h_align,
            )
        };
        let below_axis = h - pad + 4.0;
        let left_of_axis = pad - 4.0;
        frame = frame
            .with_text(label(bounds.x_min, pad, below_axis, TextHAlign::Center))
            .with_text(label(bounds.x_max, w - pad, below_axis, TextHAlign::Center))
            .with_text(label(bounds.y_min, left_of_axis, h - pad - style.font_size_px, TextHAlign::Right))
            .with_text(label(bounds.y_max, left_of_axis, pad, TextHAlign::Right));

        frame.validate()?;
        Ok(frame)
    }
}

/// Fixed four decimals with trailing zeros removed: `2.5000` -> `2.5`.
#[must_use]
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.4}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}
