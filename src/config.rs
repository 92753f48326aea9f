//! Configuration management.
//!
//! Command-line arguments via clap, with environment-variable overrides using
//! the `TILER_` prefix and sensible defaults for all optional settings.
//!
//! # Environment Variables
//!
//! - `TILER_HOST` - Server bind address (default: 0.0.0.0)
//! - `TILER_PORT` - Server port (default: 3000)
//! - `TILER_WIDTH` / `TILER_HEIGHT` - Slide dimensions for the synthetic
//!   demo source (native backends resolve bounds from their own metadata)
//! - `TILER_ORIGIN_X` / `TILER_ORIGIN_Y` - Scene origin offset
//! - `TILER_TILE_SIZE` - Nominal tile edge length (default: 512)
//! - `TILER_SCENE` - Scene index fixed for this pyramid (default: 0)
//! - `TILER_MAX_READS` - Bound on concurrent decode sessions (default: 8)
//! - `TILER_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `TILER_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use clap::Parser;

use crate::server::DEFAULT_CACHE_MAX_AGE;
use crate::tile::DEFAULT_MAX_CONCURRENT_READS;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default nominal tile edge length.
pub const DEFAULT_TILE_SIZE: u32 = 512;

// =============================================================================
// CLI Arguments
// =============================================================================

/// slide-tiler - a Deep Zoom tile server for gigapixel microscopy slides.
///
/// Serves tiles cut on demand from a resolution pyramid; the full image is
/// never materialized. The bundled backend is a deterministic synthetic
/// slide; native decode backends plug in through the `SlideSource` trait.
#[derive(Parser, Debug, Clone)]
#[command(name = "slide-tiler")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "TILER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "TILER_PORT")]
    pub port: u16,

    // =========================================================================
    // Slide Configuration
    // =========================================================================
    /// Full-resolution slide width in pixels (synthetic demo source).
    #[arg(long, default_value_t = 10000, env = "TILER_WIDTH")]
    pub width: i64,

    /// Full-resolution slide height in pixels (synthetic demo source).
    #[arg(long, default_value_t = 8000, env = "TILER_HEIGHT")]
    pub height: i64,

    /// X offset of the scene in native coordinates.
    #[arg(long, default_value_t = 0, env = "TILER_ORIGIN_X")]
    pub origin_x: i64,

    /// Y offset of the scene in native coordinates.
    #[arg(long, default_value_t = 0, env = "TILER_ORIGIN_Y")]
    pub origin_y: i64,

    /// Nominal tile edge length in pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE, env = "TILER_TILE_SIZE")]
    pub tile_size: u32,

    /// Scene index fixed for this pyramid instance.
    #[arg(long, default_value_t = 0, env = "TILER_SCENE")]
    pub scene: u32,

    // =========================================================================
    // Resource Configuration
    // =========================================================================
    /// Maximum number of concurrently open decode sessions.
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_READS, env = "TILER_MAX_READS")]
    pub max_reads: usize,

    /// HTTP Cache-Control max-age in seconds for tile responses.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "TILER_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "TILER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err("slide dimensions must be positive".to_string());
        }
        if self.width > u32::MAX as i64 || self.height > u32::MAX as i64 {
            return Err("slide dimensions exceed the supported range".to_string());
        }

        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }
        if self.tile_size > 8192 {
            return Err("tile_size must be at most 8192".to_string());
        }

        if self.max_reads == 0 {
            return Err("max_reads must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
