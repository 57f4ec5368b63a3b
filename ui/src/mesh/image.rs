//! URLs for the Mesh image-transform endpoint.
//!
//! Images are served from the project webroot and resized on the fly:
//! `{base}/{project}/webroot{path}?w={width}&mode=smart`.

use crate::core::config::MeshConfig;

/// A `<source>` in the tour picture: used once the viewport is at least
/// `min_height_px` tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub min_height_px: u32,
    pub width: u32,
}

impl Breakpoint {
    pub fn media_query(&self) -> String {
        format!("(min-height: {}px)", self.min_height_px)
    }
}

pub const BREAKPOINTS: [Breakpoint; 3] = [
    Breakpoint {
        min_height_px: 320,
        width: 500,
    },
    Breakpoint {
        min_height_px: 786,
        width: 800,
    },
    Breakpoint {
        min_height_px: 1280,
        width: 1200,
    },
];

/// Width requested for the plain `<img>` fallback.
pub const FALLBACK_WIDTH: u32 = 600;

pub fn webroot_url(config: &MeshConfig, path: &str) -> String {
    format!("{}/{}/webroot{}", config.base_url(), config.project(), path)
}

pub fn resized_url(config: &MeshConfig, path: &str, width: u32) -> String {
    format!("{}?w={width}&mode=smart", webroot_url(config, path))
}
