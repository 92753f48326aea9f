//! slide-tiler - a Deep Zoom tile server for gigapixel microscopy slides.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slide_tiler::{
    config::Config,
    server::{create_router, RouterConfig},
    source::SyntheticSource,
    tile::TileService,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("slide-tiler v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!(
        "  Slide: {}x{} at origin ({}, {})",
        config.width, config.height, config.origin_x, config.origin_y
    );
    info!("  Tile size: {}", config.tile_size);
    info!("  Scene: {}", config.scene);
    info!("  Max concurrent reads: {}", config.max_reads);

    // Create the slide source. The bundled backend is a deterministic
    // synthetic slide; native decoders plug in through the same trait.
    let source = SyntheticSource::with_origin(
        config.origin_x,
        config.origin_y,
        config.width,
        config.height,
    );

    // Open the pyramid. Bounds resolution failures are fatal here, not
    // deferred to the first tile request.
    let tile_service = match TileService::open_with_read_bound(
        source,
        config.tile_size,
        config.scene,
        config.max_reads,
    )
    .await
    {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to open slide: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pyramid = tile_service.info();
    info!(
        "Pyramid ready: max level {}, {} levels total",
        pyramid.max_level,
        pyramid.max_level + 1
    );

    // Build router configuration
    let mut router_config = RouterConfig::default()
        .with_cache_max_age(config.cache_max_age)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    let router = create_router(tile_service, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/dzi", addr);
    info!("    curl http://{}/info", addr);
    info!("    curl http://{}/tile/0/0_0.jpeg --output tile.jpeg", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "slide_tiler=debug,tower_http=debug"
    } else {
        "slide_tiler=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
