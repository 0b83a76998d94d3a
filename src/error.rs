use std::io;

use thiserror::Error;

pub type Result<T, E = StripError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StripError {
    #[error("pixel index {index} out of range for a strip of {led_count} LEDs")]
    IndexOutOfRange { index: i64, led_count: usize },

    #[error("brightness {0} is outside 0.0..=1.0")]
    InvalidBrightness(f32),

    #[error("invalid strip configuration: {0}")]
    InvalidConfig(String),

    #[error("transport write failed")]
    Transport(#[source] io::Error),
}
