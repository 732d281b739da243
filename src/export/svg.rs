use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::export::RasterSnapshot;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Minimal SVG document wrapping one embedded raster image.
///
/// This is not a vector re-render: the chart pixels travel as a PNG data URL
/// stretched over the full canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgEnvelope {
    pub width: u32,
    pub height: u32,
    pub href: String,
}

impl SvgEnvelope {
    #[must_use]
    pub fn from_snapshot(snapshot: &RasterSnapshot) -> Self {
        let viewport = snapshot.viewport();
        Self {
            width: viewport.width,
            height: viewport.height,
            href: png_data_url(snapshot.png()),
        }
    }

    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let (width, height) = (self.width, self.height);
        format!(
            "<svg xmlns=\"{SVG_NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\" width=\"{width}\" height=\"{height}\">\
             <image xlink:href=\"{}\" width=\"{width}\" height=\"{height}\"/></svg>",
            escape_attribute(&self.href)
        )
    }
}

#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
