/// Shortest idle-low time WS2812-class chips are guaranteed to latch on
pub const DEFAULT_RESET_MICROS: u32 = 280;

/// Number of all-zero SPI bytes needed to hold the line low for
/// `reset_micros` at `clock_hz`, rounded up to whole bytes.
pub fn reset_byte_count(clock_hz: u32, reset_micros: u32) -> usize {
    let bits = u64::from(clock_hz) * u64::from(reset_micros);
    bits.div_ceil(1_000_000 * 8) as usize
}

/// Build a complete SPI frame: reset run, pixel data, reset run
pub fn build_frame<I, P>(pixels: I, reset_bytes: usize) -> Vec<u8>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut frame = vec![0u8; reset_bytes];

    for pixel in pixels {
        frame.extend_from_slice(pixel.as_ref());
    }

    frame.resize(frame.len() + reset_bytes, 0);
    frame
}

/// Where the pieces of a built frame sit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub leading: usize,
    pub pixel_bytes: usize,
    pub trailing: usize,
}

impl FrameLayout {
    pub fn new(pixel_bytes: usize, reset_bytes: usize) -> Self {
        FrameLayout {
            leading: reset_bytes,
            pixel_bytes,
            trailing: reset_bytes,
        }
    }

    pub fn total(&self) -> usize {
        self.leading + self.pixel_bytes + self.trailing
    }

    /// The encoded pixel bytes of `frame`, or `None` if it has another size
    pub fn pixel_region<'a>(&self, frame: &'a [u8]) -> Option<&'a [u8]> {
        if frame.len() != self.total() {
            return None;
        }
        Some(&frame[self.leading..self.leading + self.pixel_bytes])
    }
}
