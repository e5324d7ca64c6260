pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{blend8, scale8},
};

/// On-color marker meaning "pick a hue-cycled or random color instead".
pub const RAINBOW: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Check whether a color is the [`RAINBOW`] marker
#[inline]
pub fn is_rainbow(color: Rgb) -> bool {
    color == RAINBOW
}

/// Build an RGB color from 8-bit hue, saturation and value
#[inline]
pub fn hsv(hue: u8, sat: u8, val: u8) -> Rgb {
    hsv2rgb(Hsv { hue, sat, val })
}

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Per-channel saturating addition
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Per-channel maximum
#[inline]
pub fn max_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.max(b.r),
        g: a.g.max(b.g),
        b: a.b.max(b.b),
    }
}

/// Scale every channel by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Dim every pixel towards black by `amount` (0 = unchanged)
pub fn fade_to_black_by(leds: &mut [Rgb], amount: u8) {
    if amount == 0 {
        return;
    }
    let keep = 255 - amount;
    for led in leds {
        *led = scale_color(*led, keep);
    }
}

/// Paint a rainbow starting at `initial_hue`, advancing `delta_hue` per pixel
pub fn fill_rainbow(leds: &mut [Rgb], initial_hue: u8, delta_hue: u8) {
    let mut hue = initial_hue;
    for led in leds {
        *led = hsv(hue, 240, 255);
        hue = hue.wrapping_add(delta_hue);
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
