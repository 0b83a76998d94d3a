use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Duration;

mod demo;

use demo::Demo;
use ws2812_spi::{Color, Config, MemoryTransport, Strip, Transport};

#[derive(Parser)]
#[command(name = "ws2812_demo")]
#[command(about = "Drive a WS2812 / SK6812 LED strip over SPI", long_about = None)]
struct Cli {
    /// Path to configuration file (JSON)
    config: String,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps every frame)
    #[arg(long)]
    ddebug: bool,

    /// Encode frames without opening the SPI device
    #[arg(long)]
    dry_run: bool,

    /// Extract the common white part of RGB colors on RGBW strips
    #[arg(long)]
    extract_white: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set every LED to one color
    Fill {
        r: u8,
        g: u8,
        b: u8,
        #[arg(default_value_t = 0)]
        w: u8,
    },
    /// Set a single LED, leaving the rest off
    Pixel {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        r: u8,
        g: u8,
        b: u8,
        #[arg(default_value_t = 0)]
        w: u8,
    },
    /// Run one lit LED along the strip until Ctrl-C
    Chase {
        r: u8,
        g: u8,
        b: u8,
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },
    /// Turn every LED off
    Clear,
}

fn open_transport(config: &Config, dry_run: bool) -> Result<Box<dyn Transport>> {
    if dry_run {
        return Ok(Box::new(MemoryTransport::new()));
    }
    open_spi(config)
}

#[cfg(target_os = "linux")]
fn open_spi(config: &Config) -> Result<Box<dyn Transport>> {
    let path = config.spi.device_path();
    let transport = ws2812_spi::SpiTransport::open(&path, config.strip.clock_hz())
        .context(format!("Failed to open SPI device {}", path))?;
    Ok(Box::new(transport))
}

#[cfg(not(target_os = "linux"))]
fn open_spi(_config: &Config) -> Result<Box<dyn Transport>> {
    anyhow::bail!("SPI output needs Linux spidev; use --dry-run")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ddebug implies debug
    let level = if cli.ddebug {
        log::LevelFilter::Trace
    } else if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();

    // Load configuration
    let config_data = fs::read_to_string(&cli.config)
        .context(format!("Failed to read config {}", cli.config))?;
    let config: Config = serde_json::from_str(&config_data)
        .context(format!("Failed to parse config {}", cli.config))?;

    let transport = open_transport(&config, cli.dry_run)?;
    let strip = Strip::new(&config.strip, transport)?;
    let mut demo = Demo::new(strip);
    let has_white = demo.strip().has_white();
    log::debug!(
        "{} LEDs, brightness {}, {} reset bytes per side",
        demo.strip().led_count(),
        demo.strip().brightness(),
        demo.strip().reset_bytes()
    );

    let color = |r, g, b, w| {
        let color = Color::rgbw(r, g, b, w);
        if cli.extract_white && has_white {
            color.extract_white()
        } else {
            color
        }
    };

    match cli.command {
        Command::Fill { r, g, b, w } => demo.fill(color(r, g, b, w))?,
        Command::Pixel { index, r, g, b, w } => demo.pixel(index, color(r, g, b, w))?,
        Command::Chase { r, g, b, delay_ms } => {
            // Set up Ctrl-C handler with graceful shutdown
            let running = demo.get_running_flag();
            let result = ctrlc::set_handler(move || {
                log::info!("Shutting down...");
                running.store(false, std::sync::atomic::Ordering::Relaxed);
            });

            if let Err(e) = result {
                log::warn!("Could not set Ctrl-C handler: {}", e);
            }

            demo.chase(color(r, g, b, 0), Duration::from_millis(delay_ms))?;
            demo.shutdown()?;
        }
        Command::Clear => demo.shutdown()?,
    }

    Ok(())
}
