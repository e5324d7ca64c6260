//! Fixed-point helpers in the style of `FastLED`'s `lib8tion`.
//!
//! Beat functions take the current time in milliseconds so callers decide
//! which clock drives them.

use core::f32::consts::TAU;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale a 16-bit value by a 16-bit factor (0-65535 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale16(value: u16, scale: u16) -> u16 {
    ((value as u32 * (1 + scale as u32)) >> 16) as u16
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Sine over a full 16-bit turn, returning -32767..=32767
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn sin16(theta: u16) -> i16 {
    let radians = f32::from(theta) * TAU / 65536.0;
    (libm::sinf(radians) * 32767.0) as i16
}

/// Sine over a full 8-bit turn, returning 0..=255 centered on 128
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sin8(theta: u8) -> u8 {
    let wave = i32::from(sin16(u16::from(theta) << 8)) >> 8;
    (wave + 128).clamp(0, 255) as u8
}

/// Sawtooth rising 0..65535 at `bpm88` beats per minute (Q8.8).
#[allow(clippy::cast_possible_truncation)]
pub const fn beat88(bpm88: u16, now_ms: u32) -> u16 {
    ((now_ms as u64 * bpm88 as u64 * 280) >> 16) as u16
}

/// Sawtooth rising 0..65535; values below 256 are whole beats per minute.
pub const fn beat16(bpm: u16, now_ms: u32) -> u16 {
    let bpm88 = if bpm < 256 { bpm << 8 } else { bpm };
    beat88(bpm88, now_ms)
}

/// Sawtooth rising 0..255
#[allow(clippy::cast_possible_truncation)]
pub const fn beat8(bpm: u16, now_ms: u32) -> u8 {
    (beat16(bpm, now_ms) >> 8) as u8
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn unsigned_sin16(theta: u16) -> u16 {
    (i32::from(sin16(theta)) + 32768) as u16
}

/// Sine wave oscillating over `low..=high`, rate in Q8.8 beats per minute.
pub fn beatsin88(bpm88: u16, low: u16, high: u16, now_ms: u32) -> u16 {
    let wave = unsigned_sin16(beat88(bpm88, now_ms));
    let range = high.saturating_sub(low);
    low + scale16(wave, range)
}

/// Sine wave oscillating over `low..=high`, whole beats per minute.
pub fn beatsin16(bpm: u16, low: u16, high: u16, now_ms: u32) -> u16 {
    let wave = unsigned_sin16(beat16(bpm, now_ms));
    let range = high.saturating_sub(low);
    low + scale16(wave, range)
}

/// 8-bit sine wave oscillating over `low..=high`.
pub fn beatsin8(bpm: u16, low: u8, high: u8, now_ms: u32) -> u8 {
    let wave = sin8(beat8(bpm, now_ms));
    let range = high.saturating_sub(low);
    low + scale8(wave, range)
}
