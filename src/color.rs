use std::fmt;
use std::ops::Deref;

/// Channel layout a strip expects on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// WS2812 / WS2812B: green, red, blue
    Grb,
    /// SK6812-RGBW: green, red, blue, white
    Grbw,
}

impl PixelFormat {
    pub fn from_has_white(has_white: bool) -> Self {
        if has_white {
            PixelFormat::Grbw
        } else {
            PixelFormat::Grb
        }
    }

    /// Number of 8-bit channels sent per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Grb => 3,
            PixelFormat::Grbw => 4,
        }
    }

    pub fn has_white(self) -> bool {
        self == PixelFormat::Grbw
    }
}

/// An RGB or RGBW color. Strips without a white channel ignore `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, w: 0 }
    }

    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Color { r, g, b, w }
    }

    /// Build a color from computed components, clamping each into 0..=255.
    pub fn clamped(r: i32, g: i32, b: i32, w: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Color {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
            w: clamp(w),
        }
    }

    /// Multiply every component by `brightness`, truncating toward zero.
    ///
    /// Callers keep `brightness` within [0.0, 1.0]; anything else saturates.
    pub fn scaled(&self, brightness: f32) -> Color {
        let scale = |v: u8| (f32::from(v) * brightness) as u8;
        Color {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            w: scale(self.w),
        }
    }

    /// Components in wire order: GRB, or GRBW when `has_white` is set.
    pub fn wire_order_channels(&self, has_white: bool) -> WireChannels {
        let len = PixelFormat::from_has_white(has_white).channels();
        WireChannels {
            bytes: [self.g, self.r, self.b, self.w],
            len,
        }
    }

    /// Move the gray part shared by r, g and b into the white channel.
    pub fn extract_white(&self) -> Color {
        let w = self.r.min(self.g).min(self.b);

        Color {
            r: self.r - w,
            g: self.g - w,
            b: self.b - w,
            w: self.w.saturating_add(w),
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, w): (u8, u8, u8, u8)) -> Self {
        Color::rgbw(r, g, b, w)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.w > 0 {
            write!(f, "Color(r={}, g={}, b={}, w={})", self.r, self.g, self.b, self.w)
        } else {
            write!(f, "Color(r={}, g={}, b={})", self.r, self.g, self.b)
        }
    }
}

/// The 3 or 4 channel bytes of one pixel, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireChannels {
    bytes: [u8; 4],
    len: usize,
}

impl Deref for WireChannels {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_order_rgb() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(&*red.wire_order_channels(false), &[0u8, 255, 0]);

        let c = Color::rgb(1, 2, 3);
        assert_eq!(&*c.wire_order_channels(false), &[2u8, 1, 3]);
    }

    #[test]
    fn test_wire_order_drops_white_on_rgb_strip() {
        let c = Color::rgbw(1, 2, 3, 4);
        assert_eq!(&*c.wire_order_channels(false), &[2u8, 1, 3]);
        assert_eq!(&*c.wire_order_channels(true), &[2u8, 1, 3, 4]);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Color::clamped(300, -5, 128, 0), Color::rgb(255, 0, 128));
        assert_eq!(Color::clamped(0, 0, 0, 999), Color::rgbw(0, 0, 0, 255));
    }

    #[test]
    fn test_scaled() {
        let c = Color::rgbw(255, 128, 3, 10);
        assert_eq!(c.scaled(1.0), c);
        assert_eq!(c.scaled(0.0), Color::BLACK);
        // Truncates, does not round
        assert_eq!(c.scaled(0.5), Color::rgbw(127, 64, 1, 5));
    }

    #[test]
    fn test_scaled_is_stable_under_full_brightness() {
        let c = Color::rgbw(201, 77, 13, 250);
        for step in 0..=20 {
            let b = step as f32 / 20.0;
            let once = c.scaled(b);
            assert_eq!(once.scaled(1.0), once);
        }
    }

    #[test]
    fn test_extract_white() {
        assert_eq!(Color::rgb(255, 255, 255).extract_white(), Color::rgbw(0, 0, 0, 255));
        assert_eq!(Color::rgb(255, 128, 128).extract_white(), Color::rgbw(127, 0, 0, 128));
        assert_eq!(Color::rgb(255, 0, 0).extract_white(), Color::rgb(255, 0, 0));
        assert_eq!(Color::rgbw(10, 10, 10, 250).extract_white(), Color::rgbw(0, 0, 0, 255));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "Color(r=1, g=2, b=3)");
        assert_eq!(Color::rgbw(1, 2, 3, 4).to_string(), "Color(r=1, g=2, b=3, w=4)");
    }

    #[test]
    fn test_pixel_format() {
        assert_eq!(PixelFormat::from_has_white(false).channels(), 3);
        assert_eq!(PixelFormat::from_has_white(true).channels(), 4);
        assert!(PixelFormat::Grbw.has_white());
    }
}
