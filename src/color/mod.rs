mod palette;
mod utils;

pub use palette::{PARTY_COLORS, Palette16, color_from_palette};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    RAINBOW, add_colors, blend_colors, fade_to_black_by, fill_rainbow, hsv, hsv2rgb, is_rainbow,
    max_colors, rgb_from_u32, rgb_to_u32, scale_color,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;
