use crate::core::Viewport;
use crate::error::{NumlabError, NumlabResult};

/// PNG-encoded copy of a drawing surface at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    viewport: Viewport,
    png: Vec<u8>,
}

impl RasterSnapshot {
    pub fn new(viewport: Viewport, png: Vec<u8>) -> NumlabResult<Self> {
        if !viewport.is_valid() {
            return Err(NumlabError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if png.is_empty() {
            return Err(NumlabError::InvalidData(
                "raster snapshot must not be empty".to_owned(),
            ));
        }
        Ok(Self { viewport, png })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn png(&self) -> &[u8] {
        &self.png
    }
}

/// A rendered raster target the exporter can borrow for a snapshot.
///
/// The chart owns the surface; export only reads it.
pub trait DrawingSurface {
    /// Encodes the current contents as PNG together with the pixel size.
    ///
    /// Returns `NumlabError::ContextUnavailable` when no 2D context can be
    /// obtained from the surface.
    fn snapshot(&self) -> NumlabResult<RasterSnapshot>;
}

impl<T: DrawingSurface + ?Sized> DrawingSurface for &T {
    fn snapshot(&self) -> NumlabResult<RasterSnapshot> {
        (**self).snapshot()
    }
}
