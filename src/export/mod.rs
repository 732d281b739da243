//! Chart export: rendered raster -> standalone SVG file.
//!
//! The exporter snapshots a [`DrawingSurface`] as PNG, wraps it in an
//! [`SvgEnvelope`] sized to the surface and hands the text to a
//! [`DownloadSink`]. Every temporary resource is released before
//! `export_as_image` returns, whatever the outcome.

mod download;
mod surface;
mod svg;

use std::path::PathBuf;

use tracing::{debug, error};

pub use download::{DirectorySink, DownloadSink, SVG_MIME, StagedFile, validate_file_name};
pub use surface::{DrawingSurface, RasterSnapshot};
pub use svg::{SVG_NAMESPACE, SvgEnvelope, XLINK_NAMESPACE, png_data_url};

use crate::core::Viewport;
use crate::error::NumlabResult;

pub const DEFAULT_FILE_NAME: &str = "chart.svg";

/// Result of an export request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved {
        path: PathBuf,
        viewport: Viewport,
        bytes: usize,
    },
    /// No surface was supplied; the miss was logged and nothing was written.
    MissingSurface,
}

impl ExportOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Saved { path, .. } => Some(path),
            Self::MissingSurface => None,
        }
    }
}

/// Snapshots `surface` and serializes it into an SVG envelope.
pub fn render_svg_document<S: DrawingSurface + ?Sized>(surface: &S) -> NumlabResult<String> {
    let snapshot = surface.snapshot()?;
    Ok(SvgEnvelope::from_snapshot(&snapshot).to_svg_string())
}

#[derive(Debug, Clone)]
pub struct ChartExporter<K = DirectorySink> {
    sink: K,
}

impl<K: DownloadSink> ChartExporter<K> {
    #[must_use]
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Exports under [`DEFAULT_FILE_NAME`].
    pub fn export_with_default_name<S: DrawingSurface + ?Sized>(
        &self,
        surface: Option<&S>,
    ) -> NumlabResult<ExportOutcome> {
        self.export_as_image(surface, DEFAULT_FILE_NAME)
    }

    /// A `None` surface is logged and reported as
    /// [`ExportOutcome::MissingSurface`]; a surface without a usable 2D
    /// context fails with `NumlabError::ContextUnavailable`.
    pub fn export_as_image<S: DrawingSurface + ?Sized>(
        &self,
        surface: Option<&S>,
        file_name: &str,
    ) -> NumlabResult<ExportOutcome> {
        let Some(surface) = surface else {
            error!(file_name, "chart element not found");
            return Ok(ExportOutcome::MissingSurface);
        };
        validate_file_name(file_name)?;

        let snapshot = surface.snapshot()?;
        let viewport = snapshot.viewport();
        let document = SvgEnvelope::from_snapshot(&snapshot).to_svg_string();
        debug!(
            file_name,
            width = viewport.width,
            height = viewport.height,
            bytes = document.len(),
            "chart converted to svg"
        );

        let path = self.sink.deliver(file_name, SVG_MIME, document.as_bytes())?;
        Ok(ExportOutcome::Saved {
            path,
            viewport,
            bytes: document.len(),
        })
    }
}
