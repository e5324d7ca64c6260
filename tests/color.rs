mod tests {
    use myrtio_led_node::color::{
        PARTY_COLORS, RAINBOW, Rgb, add_colors, blend_colors, color_from_palette,
        fade_to_black_by, fill_rainbow, is_rainbow, max_colors, rgb_from_u32, rgb_to_u32,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_add_and_max() {
        let dim = Rgb::new(200, 10, 0);
        assert_eq!(add_colors(dim, Rgb::new(100, 10, 5)), Rgb::new(255, 20, 5));
        assert_eq!(max_colors(dim, Rgb::new(100, 30, 5)), Rgb::new(200, 30, 5));
    }

    #[test]
    fn test_fade_to_black_by() {
        let mut leds = [RED, WHITE];
        fade_to_black_by(&mut leds, 0);
        assert_eq!(leds, [RED, WHITE]);

        fade_to_black_by(&mut leds, 128);
        assert_eq!(leds, [Rgb::new(127, 0, 0), Rgb::new(127, 127, 127)]);

        fade_to_black_by(&mut leds, 255);
        assert_eq!(leds, [BLACK, BLACK]);
    }

    #[test]
    fn test_packed_colors() {
        assert_eq!(rgb_from_u32(0xFF0000), RED);
        assert_eq!(rgb_from_u32(16_711_680), RED);
        assert_eq!(rgb_from_u32(0xFF12_3456), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(rgb_to_u32(Rgb::new(0x12, 0x34, 0x56)), 0x12_3456);
        assert_eq!(rgb_to_u32(BLUE), 0x0000FF);
    }

    #[test]
    fn test_rainbow_marker() {
        assert!(is_rainbow(RAINBOW));
        assert!(is_rainbow(rgb_from_u32(0)));
        assert!(!is_rainbow(RED));
    }

    #[test]
    fn test_color_from_palette() {
        assert_eq!(color_from_palette(&PARTY_COLORS, 0, 255), rgb_from_u32(0x5500AB));
        assert_eq!(color_from_palette(&PARTY_COLORS, 16, 255), rgb_from_u32(0x84007C));
        assert_eq!(color_from_palette(&PARTY_COLORS, 8, 255), Rgb::new(109, 0, 147));
        assert_eq!(color_from_palette(&PARTY_COLORS, 0xF8, 255), Rgb::new(43, 3, 210));
        assert_eq!(color_from_palette(&PARTY_COLORS, 16, 128), Rgb::new(66, 0, 62));
    }

    #[test]
    fn test_fill_rainbow() {
        let mut leds = [BLACK; 12];
        fill_rainbow(&mut leds, 0, 7);
        assert!(leds.iter().all(|led| *led != BLACK));
        assert_ne!(leds[0], leds[6]);
    }
}
