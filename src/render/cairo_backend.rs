use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::core::Viewport;
use crate::error::{NumlabError, NumlabResult};
use crate::export::{DrawingSurface, RasterSnapshot};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Offscreen Cairo + Pango renderer.
///
/// The backing `ImageSurface` is the raster a chart export snapshots, so the
/// renderer doubles as a [`DrawingSurface`].
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> NumlabResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(NumlabError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Sizes the surface from a viewport, the way plots are configured.
    pub fn for_viewport(viewport: Viewport) -> NumlabResult<Self> {
        let to_i32 = |value: u32| {
            i32::try_from(value).map_err(|_| NumlabError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            })
        };
        Self::new(to_i32(viewport.width)?, to_i32(viewport.height)?)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> NumlabResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> NumlabResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for marker in &frame.markers {
            apply_color(context, marker.color);
            context.new_sub_path();
            context.arc(marker.x, marker.y, marker.radius, 0.0, TAU);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.markers_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.surface.flush();
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> NumlabResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.draw(&context, frame)
    }
}

impl DrawingSurface for ImageSurface {
    fn snapshot(&self) -> NumlabResult<RasterSnapshot> {
        // A finished or errored surface refuses new contexts.
        Context::new(self).map_err(|err| {
            NumlabError::ContextUnavailable(format!("could not get 2D context from surface: {err}"))
        })?;

        let mut png = Vec::new();
        self.write_to_png(&mut png)
            .map_err(|err| NumlabError::InvalidData(format!("failed to encode png: {err}")))?;
        let viewport = Viewport::new(
            u32::try_from(self.width()).unwrap_or(0),
            u32::try_from(self.height()).unwrap_or(0),
        );
        RasterSnapshot::new(viewport, png)
    }
}

impl DrawingSurface for CairoRenderer {
    fn snapshot(&self) -> NumlabResult<RasterSnapshot> {
        self.surface.snapshot()
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> NumlabError {
    NumlabError::InvalidData(format!("{prefix}: {err}"))
}
