mod common;

mod tests {
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use myrtio_led_node::Outcome;
    use myrtio_led_node::command::{Command, OpCode, decode};
    use myrtio_led_node::color::RAINBOW;
    use myrtio_led_node::effect::{
        Bounce, Bpm, Confetti, Cylon, EffectSlot, Fade, FillPattern, FillRandom, Horizontal,
        Juggle, Limits, Lightning, Middle, Radial, Rainbow, RainbowFade, RandomFlash,
        RotatePattern, Scroll, Stack, Strobe, Vertical, Wipe,
    };

    use crate::common::{BLACK, BLUE, Frame, RED, frames, new_engine};

    fn lit(frame: &Frame) -> Vec<usize> {
        frame
            .pixels
            .iter()
            .enumerate()
            .filter(|(_, pixel)| **pixel != BLACK)
            .map(|(index, _)| index)
            .collect()
    }

    fn strobe(limits: Limits) -> EffectSlot {
        EffectSlot::Strobe(Strobe {
            limits,
            on: RED,
            off: BLACK,
            on_time_ms: 10,
            off_time_ms: 10,
        })
    }

    #[test]
    fn test_fill_pattern_repeats_every_eight() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 10);
        let effect = EffectSlot::FillPattern(FillPattern {
            pattern: 0b1010_1010,
            on: RED,
            off: BLACK,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        assert_eq!(
            engine.strip().pixels(),
            &[BLACK, RED, BLACK, RED, BLACK, RED, BLACK, RED, BLACK, RED]
        );
        assert_eq!(frames(&engine).len(), 1);
    }

    #[test]
    fn test_repeat_count() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);

        assert_eq!(block_on(engine.run(&strobe(Limits::new(3, 0)))), Outcome::Completed);
        assert_eq!(frames(&engine).len(), 6);
        assert_eq!(engine.host().elapsed_ms(), 60);
    }

    #[test]
    fn test_duration_ceiling() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);

        assert_eq!(block_on(engine.run(&strobe(Limits::duration(95)))), Outcome::Completed);
        assert_eq!(engine.host().elapsed_ms(), 95);
        assert_eq!(frames(&engine).len(), 10);
    }

    #[test]
    fn test_new_command_cancels() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);
        engine.host_mut().post_at(35, br#"{"cmd":4}"#);

        assert_eq!(block_on(engine.run(&strobe(Limits::default()))), Outcome::Cancelled);
        assert_eq!(engine.host().elapsed_ms(), 35);
        assert_eq!(frames(&engine).len(), 4);
        assert!(mailbox.is_available());
    }

    #[test]
    fn test_cancellation_skips_cleanup() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 8);
        engine.host_mut().post_at(5, br#"{"cmd":4}"#);
        let effect = EffectSlot::RandomFlash(RandomFlash {
            limits: Limits::default(),
            on: RED,
            off: BLACK,
            on_time_ms: 10,
            off_time_ms: 10,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Cancelled);
        assert_eq!(lit(frames(&engine).last().unwrap()).len(), 1);
    }

    #[test]
    fn test_random_flash_clears_on_completion() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 8);
        let effect = EffectSlot::RandomFlash(RandomFlash {
            limits: Limits::new(2, 0),
            on: RED,
            off: BLUE,
            on_time_ms: 10,
            off_time_ms: 10,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        let frames = frames(&engine);
        assert_eq!(frames.len(), 6);
        assert!(frames.last().unwrap().pixels.iter().all(|pixel| *pixel == BLUE));
    }

    #[test]
    fn test_fade_runs_to_the_end_despite_new_command() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 3);
        engine.host_mut().post_at(15, br#"{"cmd":4}"#);
        let effect = EffectSlot::Fade(Fade {
            direction: Vertical::Up,
            increment: 51,
            step_ms: 10,
            color: RED,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        let brightness: Vec<u8> = frames(&engine).iter().map(|f| f.brightness).collect();
        assert_eq!(brightness, vec![0, 51, 102, 153, 204, 255]);
        assert_eq!(engine.host().elapsed_ms(), 50);
        assert!(mailbox.is_available());
    }

    #[test]
    fn test_fade_down_ends_dark() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 3);
        let effect = EffectSlot::Fade(Fade {
            direction: Vertical::Down,
            increment: 100,
            step_ms: 1,
            color: RED,
        });

        block_on(engine.run(&effect));
        let brightness: Vec<u8> = frames(&engine).iter().map(|f| f.brightness).collect();
        assert_eq!(brightness, vec![255, 155, 55, 0]);
        assert_eq!(engine.strip().brightness(), 0);
    }

    #[test]
    fn test_rotate_pattern() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 8);
        let mut rotate = RotatePattern {
            limits: Limits::new(2, 0),
            pattern: 0b0000_0001,
            pattern_length: 8,
            direction: Horizontal::Left,
            on: RED,
            off: BLACK,
            on_time_ms: 5,
        };

        block_on(engine.run(&EffectSlot::Pattern(rotate.clone())));
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(positions, vec![vec![0], vec![1]]);

        let mut engine = new_engine(&mailbox, 8);
        rotate.direction = Horizontal::Right;
        block_on(engine.run(&EffectSlot::Pattern(rotate)));
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(positions, vec![vec![0], vec![7]]);
    }

    #[test]
    fn test_rotate_pattern_repeats_every_pattern_length() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 8);
        let command = decode(br#"{"cmd":17,"p":1,"pl":4,"r":2,"ont":5,"onc":16711680}"#).unwrap();
        let effect = EffectSlot::from_command(&command).unwrap();

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(positions, vec![vec![0, 4], vec![1, 5]]);
    }

    #[test]
    fn test_scroll_clips_at_both_ends() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);
        let mut scroll = Scroll {
            limits: Limits::new(1, 0),
            pattern: 0b01,
            pattern_length: 2,
            direction: Horizontal::Left,
            on: RED,
            off: BLACK,
            on_time_ms: 10,
            clear_after: false,
            clear_end: false,
        };

        block_on(engine.run(&EffectSlot::Scroll(scroll.clone())));
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(
            positions,
            vec![vec![], vec![0], vec![1], vec![2], vec![3], vec![]]
        );
        assert_eq!(engine.host().elapsed_ms(), 50);

        let mut engine = new_engine(&mailbox, 8);
        scroll.direction = Horizontal::Right;
        block_on(engine.run(&EffectSlot::Scroll(scroll)));
        let positions: Vec<Vec<usize>> = frames(&engine).iter().skip(1).map(lit).collect();
        assert_eq!(
            positions,
            vec![vec![7], vec![6], vec![5], vec![4], vec![3], vec![2], vec![1], vec![0], vec![]]
        );
    }

    #[test]
    fn test_bounce_draws_each_reflection_once() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 5);
        let effect = EffectSlot::Bounce(Bounce {
            limits: Limits::new(2, 0),
            pattern: 0b01,
            pattern_length: 2,
            direction: Horizontal::Left,
            on: RED,
            off: BLACK,
            on_time_ms: 1,
            off_time_ms: 0,
            bounce_time_ms: 0,
            clear_after: true,
            clear_end: false,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        let positions: Vec<usize> = frames(&engine)
            .iter()
            .map(lit)
            .filter(|lit| !lit.is_empty())
            .map(|lit| lit[0])
            .collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 2, 1, 0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn test_middle_out() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 5);
        let effect = EffectSlot::Middle(Middle {
            limits: Limits::new(1, 0),
            direction: Radial::Out,
            on: RED,
            off: BLACK,
            on_time_ms: 1,
            off_time_ms: 0,
            clear_after: false,
            clear_end: false,
        });

        block_on(engine.run(&effect));
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(
            positions,
            vec![vec![], vec![2], vec![1, 2, 3], vec![0, 1, 2, 3, 4]]
        );
    }

    #[test]
    fn test_expiry_still_clears_the_end() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);
        let effect = EffectSlot::Wipe(Wipe {
            limits: Limits::duration(25),
            direction: Horizontal::Left,
            on: RED,
            off: BLACK,
            on_time_ms: 10,
            off_time_ms: 0,
            clear_after: false,
            clear_end: true,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        assert_eq!(engine.host().elapsed_ms(), 25);
        let positions: Vec<Vec<usize>> = frames(&engine).iter().map(lit).collect();
        assert_eq!(
            positions,
            vec![vec![], vec![0], vec![0, 1], vec![0, 1, 2], vec![]]
        );
    }

    #[test]
    fn test_stack_fills_the_strip() {
        for direction in [Vertical::Down, Vertical::Up] {
            let mailbox = Default::default();
            let mut engine = new_engine(&mailbox, 3);
            let effect = EffectSlot::Stack(Stack {
                limits: Limits::new(1, 0),
                direction,
                on: RED,
                off: BLACK,
                on_time_ms: 1,
                clear_end: false,
            });

            block_on(engine.run(&effect));
            assert_eq!(engine.strip().pixels(), &[RED, RED, RED]);
        }
    }

    #[test]
    fn test_fill_random_lights_every_pixel_once() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 6);
        let effect = EffectSlot::FillRandom(FillRandom {
            limits: Limits::new(1, 0),
            on: RED,
            off: BLACK,
            on_time_ms: 1,
            off_time_ms: 0,
            clear_after: false,
            clear_end: false,
        });

        block_on(engine.run(&effect));
        let counts: Vec<usize> = frames(&engine).iter().map(|f| lit(f).len()).collect();
        assert_eq!(counts, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_lightning_strike() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 4);
        let effect = EffectSlot::Lightning(Lightning {
            limits: Limits::new(1, 0),
            on: RED,
            off: BLACK,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        let count = frames(&engine).len();
        assert!((4..=10).contains(&count));
        assert_eq!(count % 2, 0);
        assert!(lit(frames(&engine).last().unwrap()).is_empty());
    }

    #[test]
    fn test_rainbow_paces_frames_until_duration() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 10);
        let effect = EffectSlot::Rainbow(Rainbow {
            duration_ms: 100,
            glitter_probability: 80,
            glitter: BLUE,
            frame: Duration::from_millis(10),
            hue_update_ms: 0,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        assert_eq!(engine.host().elapsed_ms(), 100);
        assert_eq!(frames(&engine).len(), 10);
        assert!(frames(&engine).iter().all(|f| f.pixels.len() == 10));
    }

    #[test]
    fn test_procedural_effects_honor_duration() {
        let frame = Duration::from_millis(20);
        let effects = [
            EffectSlot::RainbowFade(RainbowFade {
                duration_ms: 200,
                frame,
            }),
            EffectSlot::Confetti(Confetti {
                duration_ms: 200,
                color: RAINBOW,
                fade_by: 10,
                frame,
                hue_update_ms: 5,
            }),
            EffectSlot::Bpm(Bpm {
                duration_ms: 200,
                frame,
                hue_update_ms: 0,
            }),
            EffectSlot::Juggle(Juggle {
                duration_ms: 200,
                frame,
            }),
        ];

        for effect in &effects {
            let mailbox = Default::default();
            let mut engine = new_engine(&mailbox, 12);
            assert_eq!(block_on(engine.run(effect)), Outcome::Completed);
            assert_eq!(engine.host().elapsed_ms(), 200);
            assert_eq!(frames(&engine).len(), 10);
            assert!(frames(&engine).iter().any(|f| !lit(f).is_empty()));
        }
    }

    #[test]
    fn test_cylon_stays_in_bounds() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 10);
        let effect = EffectSlot::Cylon(Cylon {
            limits: Limits::duration(2000),
            color: RED,
            frame_ms: 5,
            bpm: 60,
            hue_update_ms: 0,
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Completed);
        assert_eq!(engine.host().elapsed_ms(), 2000);
        assert!(frames(&engine).iter().all(|f| f.pixels.len() == 10));
        assert!(frames(&engine).iter().any(|f| !lit(f).is_empty()));
    }

    #[test]
    fn test_procedural_effect_cancels_within_a_frame() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 10);
        engine.host_mut().post_after_idles(3, br#"{"cmd":4}"#);
        let effect = EffectSlot::Juggle(Juggle {
            duration_ms: 0,
            frame: Duration::from_millis(10),
        });

        assert_eq!(block_on(engine.run(&effect)), Outcome::Cancelled);
        assert_eq!(frames(&engine).len(), 1);
        assert_eq!(engine.host().idle_calls, 3);
    }

    fn unbounded(op: OpCode) -> Command {
        let mut command = Command::new(op);
        command.pattern = 0b0000_0101;
        command.on_color = RED;
        command.on_time_ms = 5;
        command.off_time_ms = 5;
        command.bounce_time_ms = 5;
        command.fade_time_ms = 5;
        command.fade_increment = 50;
        command
    }

    #[test]
    fn test_every_effect_yields_to_a_new_command() {
        let cases = [
            (OpCode::Show, Outcome::Completed),
            (OpCode::SetPixel, Outcome::Completed),
            (OpCode::Fill, Outcome::Completed),
            (OpCode::FillPattern, Outcome::Completed),
            (OpCode::SetIntensity, Outcome::Completed),
            (OpCode::SetHueUpdateTime, Outcome::Completed),
            (OpCode::Complete, Outcome::Completed),
            (OpCode::Fade, Outcome::Completed),
            (OpCode::Pattern, Outcome::Cancelled),
            (OpCode::Wipe, Outcome::Cancelled),
            (OpCode::Scroll, Outcome::Cancelled),
            (OpCode::Bounce, Outcome::Cancelled),
            (OpCode::Middle, Outcome::Cancelled),
            (OpCode::RandomFlash, Outcome::Cancelled),
            (OpCode::Strobe, Outcome::Cancelled),
            (OpCode::Lightning, Outcome::Cancelled),
            (OpCode::Stack, Outcome::Cancelled),
            (OpCode::FillRandom, Outcome::Cancelled),
            (OpCode::Rainbow, Outcome::Cancelled),
            (OpCode::RainbowFade, Outcome::Cancelled),
            (OpCode::Confetti, Outcome::Cancelled),
            (OpCode::Cylon, Outcome::Cancelled),
            (OpCode::Bpm, Outcome::Cancelled),
            (OpCode::Juggle, Outcome::Cancelled),
        ];

        for (op, expected) in cases {
            let mailbox = Default::default();
            let mut engine = new_engine(&mailbox, 12);
            engine.host_mut().post_after_idles(20, br#"{"cmd":4}"#);
            let effect = EffectSlot::from_command(&unbounded(op)).unwrap();

            assert_eq!(block_on(engine.run(&effect)), expected, "{}", op.as_str());
            if expected == Outcome::Cancelled {
                assert_eq!(engine.host().idle_calls, 20, "{}", op.as_str());
                assert!(mailbox.is_available());
            }
        }
    }

    #[test]
    fn test_global_settings() {
        let mailbox = Default::default();
        let mut engine = new_engine(&mailbox, 2);

        block_on(engine.run(&EffectSlot::SetIntensity(10)));
        block_on(engine.run(&EffectSlot::Show));
        assert_eq!(frames(&engine).last().unwrap().brightness, 10);

        let interval = engine.hue().interval();
        block_on(engine.run(&EffectSlot::SetHueUpdateTime(0)));
        assert_eq!(engine.hue().interval(), interval);
        block_on(engine.run(&EffectSlot::SetHueUpdateTime(50)));
        assert_eq!(engine.hue().interval(), Duration::from_millis(50));
    }
}
