use super::{Rgb, blend_colors, rgb_from_u32, scale_color};

/// 16-entry palette interpolated across the 0-255 index range
pub type Palette16 = [Rgb; 16];

/// Warm purple, red and orange stripes with a single blue
pub const PARTY_COLORS: Palette16 = [
    rgb_from_u32(0x5500AB),
    rgb_from_u32(0x84007C),
    rgb_from_u32(0xB5004B),
    rgb_from_u32(0xE5001B),
    rgb_from_u32(0xE81700),
    rgb_from_u32(0xB84700),
    rgb_from_u32(0xAB7700),
    rgb_from_u32(0xABAB00),
    rgb_from_u32(0xAB5500),
    rgb_from_u32(0xDD2200),
    rgb_from_u32(0xF2000E),
    rgb_from_u32(0xC2003E),
    rgb_from_u32(0x8F0071),
    rgb_from_u32(0x5F00A1),
    rgb_from_u32(0x2F00D0),
    rgb_from_u32(0x0007F9),
];

/// Look up `index` in the palette, blending linearly towards the next entry
/// (wrapping after the last) and scaling by `brightness`.
pub fn color_from_palette(palette: &Palette16, index: u8, brightness: u8) -> Rgb {
    let entry = usize::from(index >> 4);
    let fraction = (index & 0x0F) << 4;

    let mut color = palette[entry];
    if fraction != 0 {
        let next = palette[(entry + 1) % palette.len()];
        color = blend_colors(color, next, fraction);
    }

    if brightness == 255 {
        color
    } else {
        scale_color(color, brightness)
    }
}
