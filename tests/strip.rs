use ws2812_spi::frame::reset_byte_count;
use ws2812_spi::{Color, Encoding, MemoryTransport, Strip, StripConfig, StripError};

fn decode(strip: &Strip<MemoryTransport>, frame: &[u8]) -> Vec<u8> {
    let encoding = strip.encoding();
    strip
        .layout()
        .pixel_region(frame)
        .expect("frame has the strip's layout")
        .chunks(encoding.bytes_per_channel())
        .map(|chunk| encoding.decode_byte(chunk).expect("valid pulse pattern"))
        .collect()
}

#[test]
fn red_strip_end_to_end() {
    let config = StripConfig::new(3, false);
    let mut strip = Strip::new(&config, MemoryTransport::new()).unwrap();
    strip.set_all_pixels(Color::rgb(255, 0, 0));
    strip.set_brightness(1.0).unwrap();
    strip.show().unwrap();

    let frames = strip.transport().frames();
    assert_eq!(frames.len(), 1);

    let reset = reset_byte_count(config.clock_hz(), config.reset_micros);
    let frame = &frames[0];
    assert!(frame[..reset].iter().all(|&b| b == 0));
    assert!(frame[frame.len() - reset..].iter().all(|&b| b == 0));
    assert_eq!(decode(&strip, frame), vec![0, 255, 0, 0, 255, 0, 0, 255, 0]);
}

#[test]
fn white_is_dropped_on_rgb_strips() {
    let mut strip = Strip::new(&StripConfig::new(1, false), MemoryTransport::new()).unwrap();
    strip.set_pixel(0, Color::rgbw(1, 2, 3, 200)).unwrap();
    strip.show().unwrap();

    let frame = strip.transport().last_frame().unwrap();
    assert_eq!(decode(&strip, frame), vec![2, 1, 3]);
}

#[test]
fn half_brightness_frames_are_identical() {
    let config = StripConfig::new(5, true).with_encoding(Encoding::BytePerBit);
    let mut strip = Strip::new(&config, MemoryTransport::new()).unwrap();
    for i in 0..5 {
        strip.set_pixel(i, Color::rgbw(50 * i as u8, 255, 3, 77)).unwrap();
    }
    strip.set_brightness(0.5).unwrap();

    strip.show().unwrap();
    strip.show().unwrap();

    let frames = strip.transport().frames();
    assert_eq!(frames[0], frames[1]);
    assert_eq!(&decode(&strip, &frames[0])[..4], &[127, 0, 1, 38]);
}

#[test]
fn rejected_brightness_keeps_previous_value() {
    let mut strip = Strip::new(&StripConfig::new(2, false), MemoryTransport::new()).unwrap();
    strip.set_brightness(0.3).unwrap();

    for bad in [1.5, -0.1] {
        match strip.set_brightness(bad) {
            Err(StripError::InvalidBrightness(v)) => assert_eq!(v, bad),
            other => panic!("expected InvalidBrightness, got {:?}", other),
        }
    }
    assert_eq!(strip.brightness(), 0.3);
}

#[test]
fn index_bounds() {
    let mut strip = Strip::new(&StripConfig::new(4, false), MemoryTransport::new()).unwrap();
    let c = Color::rgb(1, 1, 1);

    assert!(strip.set_pixel(0, c).is_ok());
    assert!(strip.set_pixel(3, c).is_ok());
    assert!(matches!(strip.set_pixel(4, c), Err(StripError::IndexOutOfRange { .. })));
    assert!(matches!(
        strip.set_pixel_signed(-1, c),
        Err(StripError::IndexOutOfRange { .. })
    ));
}

#[test]
fn custom_clock_changes_reset_padding() {
    let config = StripConfig::new(1, false).with_clock_hz(3_000_000);
    let strip = Strip::new(&config, MemoryTransport::new()).unwrap();
    // 3 MHz * 280µs = 840 bits
    assert_eq!(strip.reset_bytes(), 105);
    assert_eq!(strip.render().len(), 105 + 9 + 105);
}
