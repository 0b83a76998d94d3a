use crate::color::{Color, PixelFormat};
use crate::config::StripConfig;
use crate::encoder::PulseEncoding;
use crate::error::{Result, StripError};
use crate::frame::{self, FrameLayout};
use crate::transport::Transport;

/// A WS2812 / SK6812 strip behind a [`Transport`].
///
/// Colors are stored exactly as set. Brightness is applied to a copy while
/// rendering, so lowering it and raising it again loses nothing.
pub struct Strip<T> {
    pixels: Vec<Color>,
    brightness: f32,
    format: PixelFormat,
    encoding: PulseEncoding,
    clock_hz: u32,
    reset_bytes: usize,
    transport: T,
}

impl<T: Transport> Strip<T> {
    pub fn new(config: &StripConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let encoding = config.encoding.pulses();
        let clock_hz = config.clock_hz();

        if !encoding.timing_in_tolerance(clock_hz) {
            log::warn!(
                "{:?} encoding at {} Hz gives a {} ns bit period, outside {}..={} ns",
                config.encoding,
                clock_hz,
                encoding.bit_period_ns(clock_hz),
                crate::encoder::MIN_BIT_PERIOD_NS,
                crate::encoder::MAX_BIT_PERIOD_NS,
            );
        }

        Ok(Strip {
            pixels: vec![Color::BLACK; config.led_count],
            brightness: config.brightness,
            format: PixelFormat::from_has_white(config.has_white),
            encoding,
            clock_hz,
            reset_bytes: frame::reset_byte_count(clock_hz, config.reset_micros),
            transport,
        })
    }

    pub fn led_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn has_white(&self) -> bool {
        self.format.has_white()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    pub fn encoding(&self) -> PulseEncoding {
        self.encoding
    }

    pub fn reset_bytes(&self) -> usize {
        self.reset_bytes
    }

    /// Sizes of the reset runs and pixel region of every rendered frame
    pub fn layout(&self) -> FrameLayout {
        let pixel_bytes =
            self.led_count() * self.format.channels() * self.encoding.bytes_per_channel();
        FrameLayout::new(pixel_bytes, self.reset_bytes)
    }

    /// The stored, unscaled color at `index`
    pub fn pixel(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Set one pixel. Takes effect on the next [`show`](Self::show).
    pub fn set_pixel(&mut self, index: usize, color: Color) -> Result<()> {
        let led_count = self.led_count();
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(StripError::IndexOutOfRange {
                index: index as i64,
                led_count,
            })?;
        *slot = color;
        Ok(())
    }

    /// Like [`set_pixel`](Self::set_pixel) for callers holding signed
    /// positions, e.g. animation offsets that can run off either end.
    pub fn set_pixel_signed(&mut self, index: i64, color: Color) -> Result<()> {
        let led_count = self.led_count();
        match usize::try_from(index) {
            Ok(index) if index < led_count => self.set_pixel(index, color),
            _ => Err(StripError::IndexOutOfRange { index, led_count }),
        }
    }

    pub fn set_all_pixels(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Rejects values outside 0.0..=1.0 and keeps the previous brightness.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(StripError::InvalidBrightness(brightness));
        }
        self.brightness = brightness;
        Ok(())
    }

    /// Encode the current pixels at the current brightness without sending.
    pub fn render(&self) -> Vec<u8> {
        let has_white = self.has_white();
        let per_pixel = self.format.channels() * self.encoding.bytes_per_channel();

        let encoded = self.pixels.iter().map(|color| {
            let mut bytes = Vec::with_capacity(per_pixel);
            for &channel in color.scaled(self.brightness).wire_order_channels(has_white).iter() {
                self.encoding.encode_byte_into(channel, &mut bytes);
            }
            bytes
        });

        frame::build_frame(encoded, self.reset_bytes)
    }

    /// Render and write one frame to the transport.
    pub fn show(&mut self) -> Result<()> {
        let frame = self.render();
        self.write_frame(&frame)
    }

    /// Turn every LED off, both in the buffer and on the strip.
    pub fn clear(&mut self) -> Result<()> {
        self.set_all_pixels(Color::BLACK);
        self.show()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        log::debug!(
            "sending frame: {} bytes ({} LEDs, {} reset bytes each side)",
            frame.len(),
            self.led_count(),
            self.reset_bytes
        );

        if log::log_enabled!(log::Level::Trace) {
            let hex: String = frame
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            log::trace!("frame: {}", hex);
        }

        self.transport.write(frame).map_err(StripError::Transport)
    }
}
