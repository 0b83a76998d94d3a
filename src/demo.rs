use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ws2812_spi::{Color, Strip, Transport};

/// Runs one demo command against a strip
pub struct Demo<T: Transport> {
    strip: Strip<T>,
    running: Arc<AtomicBool>,
}

impl<T: Transport> Demo<T> {
    pub fn new(strip: Strip<T>) -> Self {
        Demo {
            strip,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Get a clone of the running flag for signal handlers
    pub fn get_running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn strip(&self) -> &Strip<T> {
        &self.strip
    }

    pub fn fill(&mut self, color: Color) -> Result<()> {
        log::info!("filling {} LEDs with {}", self.strip.led_count(), color);
        self.strip.set_all_pixels(color);
        self.strip.show().context("Failed to show frame")
    }

    pub fn pixel(&mut self, index: i64, color: Color) -> Result<()> {
        self.strip
            .set_pixel_signed(index, color)
            .context(format!("Cannot set pixel {}", index))?;
        self.strip.show().context("Failed to show frame")
    }

    /// Walk a single lit pixel along the strip until stopped
    pub fn chase(&mut self, color: Color, delay: Duration) -> Result<()> {
        let led_count = self.strip.led_count();
        let mut position = 0;
        let mut frames: u64 = 0;

        while self.running.load(Ordering::Relaxed) {
            self.strip.set_all_pixels(Color::BLACK);
            self.strip.set_pixel(position, color)?;
            self.strip.show().context("Failed to show frame")?;

            frames += 1;
            position = (position + 1) % led_count;
            thread::sleep(delay);
        }

        log::info!("chase stopped after {} frames", frames);
        Ok(())
    }

    /// Turn the strip off
    pub fn shutdown(&mut self) -> Result<()> {
        log::debug!("Turning off LEDs...");
        self.strip.clear().context("Failed to clear strip")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws2812_spi::{MemoryTransport, StripConfig};

    fn demo(led_count: usize) -> Demo<MemoryTransport> {
        let strip = Strip::new(&StripConfig::new(led_count, false), MemoryTransport::new()).unwrap();
        Demo::new(strip)
    }

    #[test]
    fn test_fill_and_shutdown() {
        let mut demo = demo(3);
        demo.fill(Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(demo.strip().pixel(2), Some(Color::rgb(1, 2, 3)));

        demo.shutdown().unwrap();
        assert_eq!(demo.strip().pixel(2), Some(Color::BLACK));
        assert_eq!(demo.strip().transport().frames().len(), 2);
    }

    #[test]
    fn test_pixel_out_of_range() {
        let mut demo = demo(3);
        assert!(demo.pixel(-1, Color::rgb(1, 1, 1)).is_err());
        assert!(demo.pixel(3, Color::rgb(1, 1, 1)).is_err());
        assert!(demo.strip().transport().frames().is_empty());
        demo.pixel(2, Color::rgb(1, 1, 1)).unwrap();
    }

    #[test]
    fn test_chase_stops_when_flag_cleared() {
        let mut demo = demo(3);
        demo.get_running_flag().store(false, Ordering::Relaxed);
        demo.chase(Color::rgb(9, 9, 9), Duration::ZERO).unwrap();
        assert!(demo.strip().transport().frames().is_empty());
    }
}
