// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! QuakeWatch - accelerometer earthquake detector
//!
//! Watches a motion sensor and checks every burst of shaking against the
//! USGS earthquake feed, showing the verdict on an RGB LCD.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use quakewatch::display::{ConsoleDisplay, DisplayController, DisplayDevice};
use quakewatch::sensors::{SampleSource, SimulatedAccelerometer};
use quakewatch::{build_info, Config, Engine, UsgsFeed, VerificationClient, VERSION};

/// QuakeWatch - accelerometer earthquake detector
#[derive(Parser, Debug)]
#[command(name = "quakewatch")]
#[command(author = "QuakeWatch Project")]
#[command(version = VERSION)]
#[command(about = "Detect shaking and verify it against the USGS earthquake feed")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use a simulated accelerometer and log the display to the console
    #[arg(long)]
    demo: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Override the configured latitude
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Override the configured longitude
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Override the event feed endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let build = build_info();
    info!("QuakeWatch v{} ({}/{}, features: {:?})", build.version, build.os, build.target, build.features);

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if args.demo {
        config.demo_mode = true;
    }
    if let Some(latitude) = args.latitude {
        config.location.latitude = latitude;
    }
    if let Some(longitude) = args.longitude {
        config.location.longitude = longitude;
    }
    if let Some(endpoint) = args.endpoint {
        config.feed.endpoint = endpoint;
    }
    config.validate()?;

    info!("Configuration loaded from {:?}", config_path);
    info!("Demo mode: {}", config.demo_mode);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    let (source, device) = open_devices(&config)?;

    let (display, display_task) = DisplayController::spawn(device);
    let feed = Arc::new(UsgsFeed::new(&config.feed)?);
    info!("Verifying against {}", feed.endpoint());

    let verifier = VerificationClient::new(feed, config.location, display);
    let mut engine = Engine::new(source, verifier);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received, cleaning up..."),
            Err(e) => warn!("Could not listen for Ctrl+C: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    info!("QuakeWatch running, press Ctrl+C to stop");
    engine.run(shutdown_rx).await?;

    // The engine owns the last display handle
    drop(engine);
    let _ = display_task.await;

    info!("QuakeWatch shutdown complete");
    Ok(())
}

type Devices = (Box<dyn SampleSource>, Box<dyn DisplayDevice>);

fn open_devices(config: &Config) -> Result<Devices> {
    if config.demo_mode {
        info!("Using simulated accelerometer and console display");
        return Ok(demo_devices());
    }

    #[cfg(feature = "hardware")]
    {
        use quakewatch::display::Jhd1313m1;
        use quakewatch::sensors::Mma7660Sensor;

        let sensor: Box<dyn SampleSource> = Box::new(Mma7660Sensor::open(
            config.sensor.i2c_bus,
            config.sensor.address,
            config.sensor.axis,
        )?);
        let lcd: Box<dyn DisplayDevice> = Box::new(Jhd1313m1::open(
            config.display.i2c_bus,
            config.display.lcd_address,
            config.display.rgb_address,
        )?);
        return Ok((sensor, lcd));
    }

    #[cfg(not(feature = "hardware"))]
    {
        warn!("Built without the hardware feature, falling back to demo devices");
        return Ok(demo_devices());
    }
}

fn demo_devices() -> Devices {
    (
        Box::new(SimulatedAccelerometer::new("simulated-accelerometer")),
        Box::new(ConsoleDisplay::new()),
    )
}
