use serde::{Deserialize, Serialize};

/// WS2812 accepts a total bit period of 1.25µs ± 600ns
pub const MIN_BIT_PERIOD_NS: u64 = 650;
pub const MAX_BIT_PERIOD_NS: u64 = 1850;

/// Named pulse encodings selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// 3 SPI bits per protocol bit: `110` is a one, `100` is a zero
    #[default]
    ThreeBit,
    /// One whole SPI byte per protocol bit
    BytePerBit,
}

impl Encoding {
    pub const fn pulses(self) -> PulseEncoding {
        match self {
            Encoding::ThreeBit => PulseEncoding::THREE_BIT,
            Encoding::BytePerBit => PulseEncoding::BYTE_PER_BIT,
        }
    }

    /// SPI clock at which one protocol bit lasts ~1.25µs
    pub const fn nominal_clock_hz(self) -> u32 {
        match self {
            Encoding::ThreeBit => 2_400_000,
            Encoding::BytePerBit => 6_500_000,
        }
    }
}

/// Expands protocol bits into SPI bit patterns.
///
/// Each protocol bit becomes `width` SPI bits taken from a two-entry table,
/// right-aligned in a `u8`. Eight protocol bits therefore always fill exactly
/// `width` SPI bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseEncoding {
    width: u32,
    table: [u8; 2],
}

impl PulseEncoding {
    pub const THREE_BIT: PulseEncoding = PulseEncoding {
        width: 3,
        table: [0b100, 0b110],
    };

    pub const BYTE_PER_BIT: PulseEncoding = PulseEncoding {
        width: 8,
        table: [0b1100_0000, 0b1111_1100],
    };

    /// A custom encoding. `None` if the width is not 1..=8, a pattern does
    /// not fit in `width` bits, or both patterns are the same.
    pub fn new(width: u32, one: u8, zero: u8) -> Option<Self> {
        if !(1..=8).contains(&width) || one == zero {
            return None;
        }
        if width < 8 && (one >> width != 0 || zero >> width != 0) {
            return None;
        }

        Some(PulseEncoding {
            width,
            table: [zero, one],
        })
    }

    /// SPI bits per protocol bit, which is also SPI bytes per channel byte
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn bytes_per_channel(&self) -> usize {
        self.width as usize
    }

    pub fn encode_bit(&self, bit: bool) -> u8 {
        self.table[usize::from(bit)]
    }

    pub fn encode_byte(&self, value: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes_per_channel());
        self.encode_byte_into(value, &mut out);
        out
    }

    /// Append the encoding of `value`, most significant bit first.
    pub fn encode_byte_into(&self, value: u8, out: &mut Vec<u8>) {
        let mut acc: u32 = 0;
        let mut filled = 0;

        for shift in (0..8).rev() {
            let pattern = self.encode_bit((value >> shift) & 1 == 1);
            acc = (acc << self.width) | u32::from(pattern);
            filled += self.width;

            while filled >= 8 {
                filled -= 8;
                out.push((acc >> filled) as u8);
            }
            acc &= (1 << filled) - 1;
        }
    }

    /// Recover a channel value from its encoded bytes.
    ///
    /// Returns `None` if `bytes` has the wrong length or any slot matches
    /// neither pattern.
    pub fn decode_byte(&self, bytes: &[u8]) -> Option<u8> {
        if bytes.len() != self.bytes_per_channel() {
            return None;
        }

        let mask = (1u32 << self.width) - 1;
        let mut acc: u32 = 0;
        let mut filled = 0;
        let mut value: u8 = 0;

        for &byte in bytes {
            acc = (acc << 8) | u32::from(byte);
            filled += 8;

            while filled >= self.width {
                filled -= self.width;
                let slot = ((acc >> filled) & mask) as u8;
                let bit = match slot {
                    s if s == self.table[1] => 1,
                    s if s == self.table[0] => 0,
                    _ => return None,
                };
                value = (value << 1) | bit;
            }
            acc &= (1 << filled) - 1;
        }

        Some(value)
    }

    /// Duration of one protocol bit at the given SPI clock
    pub fn bit_period_ns(&self, clock_hz: u32) -> u64 {
        u64::from(self.width) * 1_000_000_000 / u64::from(clock_hz.max(1))
    }

    pub fn timing_in_tolerance(&self, clock_hz: u32) -> bool {
        (MIN_BIT_PERIOD_NS..=MAX_BIT_PERIOD_NS).contains(&self.bit_period_ns(clock_hz))
    }
}

impl Default for PulseEncoding {
    fn default() -> Self {
        PulseEncoding::THREE_BIT
    }
}
