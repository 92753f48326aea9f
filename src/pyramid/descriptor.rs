//! Pyramid descriptors.
//!
//! The Deep Zoom XML descriptor consumed once by viewers to bootstrap tiling,
//! and the flat JSON info mapping. Both are pure projections of
//! [`PyramidInfo`]; adjacent-tile overlap is always zero.

use serde::Serialize;

use crate::pyramid::geometry::PyramidInfo;

/// Generate the DZI XML descriptor for a pyramid.
///
/// `format` is the tile image format name; it is lowercased in the output.
///
/// # Example output
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?><Image xmlns="http://schemas.microsoft.com/deepzoom/2008" Format="jpeg" Overlap="0" TileSize="512"><Size Width="10000" Height="8000"/></Image>
/// ```
pub fn dzi_xml(info: &PyramidInfo, format: &str) -> String {
    let fmt = format.to_lowercase();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Image xmlns="http://schemas.microsoft.com/deepzoom/2008" Format="{fmt}" Overlap="0" TileSize="{tile_size}"><Size Width="{width}" Height="{height}"/></Image>"#,
        tile_size = info.tile_size,
        width = info.width,
        height = info.height,
    )
}

/// Flat pyramid summary served by the info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoResponse {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "tileSize")]
    pub tile_size: u32,
    #[serde(rename = "maxLevel")]
    pub max_level: u32,
    pub scene: u32,
}

impl From<&PyramidInfo> for InfoResponse {
    fn from(info: &PyramidInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            tile_size: info.tile_size,
            max_level: info.max_level,
            scene: info.scene,
        }
    }
}
