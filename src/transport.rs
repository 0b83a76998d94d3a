use std::io;

/// Sink for fully encoded frames.
///
/// `write` returns once the frame has gone out on the bus, or fails. The
/// strip never retries a failed write.
pub trait Transport {
    fn write(&mut self, frame: &[u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).write(frame)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).write(frame)
    }
}

/// Keeps every frame it is handed. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    frames: Vec<Vec<u8>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Transport for MemoryTransport {
    fn write(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

#[cfg(target_os = "linux")]
pub use self::spi::SpiTransport;

#[cfg(target_os = "linux")]
mod spi {
    use std::io::{self, Write};

    use spidev::{SpiModeFlags, Spidev, SpidevOptions};

    use super::Transport;

    /// Linux spidev device, e.g. `/dev/spidev0.0` on a Raspberry Pi
    pub struct SpiTransport {
        device: Spidev,
        path: String,
    }

    impl SpiTransport {
        /// Open `path` in SPI mode 0, MSB first, 8-bit words at `clock_hz`
        pub fn open(path: &str, clock_hz: u32) -> io::Result<Self> {
            let mut device = Spidev::open(path)?;

            let options = SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(clock_hz)
                .lsb_first(false)
                .mode(SpiModeFlags::SPI_MODE_0)
                .build();
            device.configure(&options)?;

            log::debug!("opened {} at {} Hz", path, clock_hz);

            Ok(SpiTransport {
                device,
                path: path.to_string(),
            })
        }

        pub fn path(&self) -> &str {
            &self.path
        }
    }

    impl Transport for SpiTransport {
        fn write(&mut self, frame: &[u8]) -> io::Result<()> {
            self.device.write_all(frame)?;
            self.device.flush()
        }
    }
}
