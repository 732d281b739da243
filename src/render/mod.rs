mod frame;
mod null_renderer;
mod plot;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use plot::{LineSegment, PlotBuilder, PlotStyle, format_tick, project_polyline};
pub use primitives::{Color, LinePrimitive, MarkerPrimitive, TextHAlign, TextPrimitive};

use crate::error::NumlabResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code never
/// sees solver responses or plot layout decisions.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> NumlabResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
