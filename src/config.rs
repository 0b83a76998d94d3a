use serde::{Deserialize, Serialize};

use crate::encoder::Encoding;
use crate::error::{Result, StripError};
use crate::frame::DEFAULT_RESET_MICROS;

/// Top-level demo configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub spi: SpiConfig,
    pub strip: StripConfig,
}

/// Which spidev node to open. Clock rate lives in [`StripConfig`] because
/// the encoding depends on it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpiConfig {
    #[serde(default)]
    pub bus: u8,
    #[serde(default)]
    pub device: u8,
}

impl SpiConfig {
    pub fn device_path(&self) -> String {
        format!("/dev/spidev{}.{}", self.bus, self.device)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripConfig {
    pub led_count: usize,
    /// SK6812-RGBW strips carry a fourth, white channel
    #[serde(default)]
    pub has_white: bool,
    #[serde(default)]
    pub encoding: Encoding,
    /// SPI clock; defaults to the encoding's nominal rate
    pub clock_hz: Option<u32>,
    #[serde(default = "default_reset_micros")]
    pub reset_micros: u32,
    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

fn default_reset_micros() -> u32 {
    DEFAULT_RESET_MICROS
}

fn default_brightness() -> f32 {
    1.0
}

impl StripConfig {
    pub fn new(led_count: usize, has_white: bool) -> Self {
        StripConfig {
            led_count,
            has_white,
            encoding: Encoding::default(),
            clock_hz: None,
            reset_micros: DEFAULT_RESET_MICROS,
            brightness: 1.0,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = Some(clock_hz);
        self
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
            .unwrap_or_else(|| self.encoding.nominal_clock_hz())
    }

    pub fn validate(&self) -> Result<()> {
        if self.led_count == 0 {
            return Err(StripError::InvalidConfig("led_count must be positive".into()));
        }
        if self.clock_hz() == 0 {
            return Err(StripError::InvalidConfig("clock_hz must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(StripError::InvalidBrightness(self.brightness));
        }
        Ok(())
    }
}
