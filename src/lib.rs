//! Drive WS2812 (RGB) and SK6812 (RGBW) LED strips from a SPI bus.
//!
//! The strip's one-wire protocol encodes every data bit as a short or long
//! high pulse. With the SPI clock set so that a few SPI bits span one
//! protocol bit, each protocol bit can be written as a fixed SPI bit pattern.
//!
//! ```
//! use ws2812_spi::{Color, MemoryTransport, Strip, StripConfig};
//!
//! let mut strip = Strip::new(&StripConfig::new(3, false), MemoryTransport::new())?;
//! strip.set_all_pixels(Color::rgb(255, 0, 0));
//! strip.set_brightness(0.5)?;
//! strip.show()?;
//! # Ok::<(), ws2812_spi::StripError>(())
//! ```

pub mod color;
pub mod config;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod strip;
pub mod transport;

pub use color::{Color, PixelFormat};
pub use config::{Config, SpiConfig, StripConfig};
pub use encoder::{Encoding, PulseEncoding};
pub use error::{Result, StripError};
pub use strip::Strip;
pub use transport::{MemoryTransport, Transport};

#[cfg(target_os = "linux")]
pub use transport::SpiTransport;
