//! Per-button debounce and hold-repeat handling.
//!
//! Raw pad reads register far too quickly to act on directly, so every
//! button carries a held flag ("kp") and a held-tick counter ("sw"); actions
//! fire on the press edge and, for the repeating controls, again after a
//! fixed number of held ticks.

use celgrid_core::cel::CelArena;
use celgrid_core::inputs::Buttons;
use celgrid_core::numbers::NumberCels;
use celgrid_core::renderer::DrawMode;

use crate::game::GameState;
use crate::grid::{self, Grid};

#[derive(Debug, Default)]
pub struct InputDebounce {
    kp_left: bool,
    kp_right: bool,
    kp_up: bool,
    kp_down: bool,
    kp_ls: bool,
    kp_rs: bool,
    kp_a: bool,
    kp_b: bool,
    kp_c: bool,
    kp_start: bool,
    kp_stop: bool,

    moving_left: bool,
    moving_right: bool,

    sw_left: i32,
    sw_right: i32,
    sw_up: i32,
    sw_down: i32,
    sw_ls: i32,
    sw_rs: i32,
    sw_a: i32,
    sw_b: i32,
    sw_c: i32,
}

impl InputDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(
        &mut self,
        joy_bits: Buttons,
        state: &mut GameState,
        arena: &mut CelArena,
        grid: &Grid,
        numbers: &mut NumberCels,
    ) {
        if joy_bits.contains(Buttons::X) {
            if !self.kp_stop {
                state.do_animation = false;
                grid::set_default_block_positions(arena, grid);
            }
            self.kp_stop = true;
        } else {
            self.kp_stop = false;
        }

        if joy_bits.contains(Buttons::START) {
            if !self.kp_start {
                state.do_animation = true;
            }
            self.kp_start = true;
        } else {
            self.kp_start = false;
        }

        if joy_bits.contains(Buttons::LEFT_SHIFT) {
            if !self.kp_ls {
                state.draw_mode = DrawMode::Cels;
            }
            self.kp_ls = true;
            self.sw_ls += 1;
        } else {
            self.sw_ls = 0;
            self.kp_ls = false;
        }

        if joy_bits.contains(Buttons::RIGHT_SHIFT) {
            if !self.kp_rs {
                state.draw_mode = DrawMode::ScreenCels;
            }
            self.kp_rs = true;
            self.sw_rs += 1;

            if self.sw_rs >= 60 {
                self.sw_rs = 0;
            }
        } else {
            self.sw_rs = 0;
            self.kp_rs = false;
        }

        if joy_bits.contains(Buttons::A) {
            let mut fire = !self.kp_a;
            if !fire {
                self.sw_a += 1;
                fire = self.sw_a >= 15;
            }
            if fire {
                state.selected_template -= 1;
                if state.selected_template < 0 {
                    state.selected_template = 4;
                }
            }

            self.kp_a = true;

            if self.sw_a >= 15 {
                self.sw_a = 0;
            }
        } else {
            self.kp_a = false;
            self.sw_a = 0;
        }

        if joy_bits.contains(Buttons::B) {
            if !self.kp_b {
                if state.show_debug_stats {
                    state.show_debug_stats = false;
                    numbers.hide_number_cels(arena);
                } else {
                    state.show_debug_stats = true;
                    numbers.show_number_cels(arena);
                }
            }
            self.kp_b = true;
        } else {
            self.kp_b = false;
            self.sw_b = 0;
        }

        if joy_bits.contains(Buttons::C) {
            let mut fire = !self.kp_c;
            if !fire {
                self.sw_c += 1;
                fire = self.sw_c >= 15;
            }
            if fire {
                state.selected_template += 1;
                if state.selected_template > 4 {
                    state.selected_template = 0;
                }
            }

            self.kp_c = true;

            if self.sw_c >= 15 {
                self.sw_c = 0;
            }
        } else {
            self.kp_c = false;
            self.sw_c = 0;
        }

        // the d-pad vertical counters run but drive nothing yet
        if joy_bits.contains(Buttons::UP) {
            if self.kp_up {
                self.sw_up += 1;
            }
            self.kp_up = true;

            if self.sw_up >= 15 {
                self.sw_up = 0;
            }
        } else {
            self.sw_up = 0;
            self.kp_up = false;
        }

        if joy_bits.contains(Buttons::DOWN) {
            if self.kp_down {
                self.sw_down += 1;
            }
            self.kp_down = true;

            if self.sw_down >= 3 {
                self.sw_down = 0;
            }
        } else {
            self.sw_down = 0;
            self.kp_down = false;
        }

        if joy_bits.contains(Buttons::LEFT) {
            // stagger the repeat: 8 held ticks to start moving, 4 after
            if !self.kp_left
                || (self.sw_left >= 8 && !self.moving_left)
                || (self.sw_left >= 4 && self.moving_left)
            {
                state.draw_delay += 1;
            }

            self.kp_left = true;
            self.sw_left += 1;

            if self.moving_left && self.sw_left > 4 {
                self.sw_left = 0;
            }

            if !self.moving_left && self.sw_left > 8 {
                self.moving_left = true;
            }
        } else {
            self.sw_left = 0;
            self.kp_left = false;
            self.moving_left = false;
        }

        if joy_bits.contains(Buttons::RIGHT) {
            if !self.kp_right
                || (self.sw_right >= 8 && !self.moving_right)
                || (self.sw_right >= 4 && self.moving_right)
            {
                state.draw_delay -= 1;
                if state.draw_delay < 0 {
                    state.draw_delay = 0;
                }
            }

            self.kp_right = true;
            self.sw_right += 1;

            if self.moving_right && self.sw_right > 4 {
                self.sw_right = 0;
            }

            if !self.moving_right && self.sw_right > 8 {
                self.moving_right = true;
            }
        } else {
            self.sw_right = 0;
            self.kp_right = false;
            self.moving_right = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use celgrid_core::cel::{CelImage, ImageBank, CEL_COLUMN_STEP};

    struct Fixture {
        debounce: InputDebounce,
        state: GameState,
        arena: CelArena,
        grid: Grid,
        numbers: NumberCels,
    }

    fn fixture() -> Fixture {
        let mut arena = CelArena::default();
        let mut bank = ImageBank::default();
        let img = bank.add(CelImage {
            width: 12,
            height: 12,
            pixels: vec![1; 144].into_boxed_slice(),
        });
        let numbers = NumberCels::init(6, &mut arena, &mut bank);
        let grid = build_grid(&mut arena, img, &numbers);
        Fixture {
            debounce: InputDebounce::new(),
            state: GameState::default(),
            arena,
            grid,
            numbers,
        }
    }

    fn tick(f: &mut Fixture, joy_bits: Buttons) {
        f.debounce.handle_input(
            joy_bits,
            &mut f.state,
            &mut f.arena,
            &f.grid,
            &mut f.numbers,
        );
    }

    #[test]
    fn stop_halts_animation_and_resets_positions() {
        let mut f = fixture();
        f.arena.get_mut(f.grid.cels[0][0]).x = 999;

        tick(&mut f, Buttons::X);
        assert!(!f.state.do_animation);
        assert_eq!(f.arena.get(f.grid.cels[0][0]).x, 4);

        // held, not re-fired: a later scramble survives
        f.arena.get_mut(f.grid.cels[0][0]).x = 999;
        tick(&mut f, Buttons::X);
        assert_eq!(f.arena.get(f.grid.cels[0][0]).x, 999);
    }

    #[test]
    fn stop_then_start_resumes_animation() {
        let mut f = fixture();
        tick(&mut f, Buttons::X);
        tick(&mut f, Buttons::empty());
        assert!(!f.state.do_animation);

        tick(&mut f, Buttons::START);
        assert!(f.state.do_animation);
    }

    #[test]
    fn shoulders_pick_the_draw_strategy() {
        let mut f = fixture();
        tick(&mut f, Buttons::RIGHT_SHIFT);
        assert_eq!(f.state.draw_mode, DrawMode::ScreenCels);
        tick(&mut f, Buttons::empty());
        tick(&mut f, Buttons::LEFT_SHIFT);
        assert_eq!(f.state.draw_mode, DrawMode::Cels);
    }

    #[test]
    fn template_buttons_wrap_in_both_directions() {
        let mut f = fixture();
        // A decrements with wraparound from 0 to 4
        tick(&mut f, Buttons::A);
        assert_eq!(f.state.selected_template, 4);
        tick(&mut f, Buttons::empty());

        // C increments with wraparound from 4 to 0
        tick(&mut f, Buttons::C);
        assert_eq!(f.state.selected_template, 0);
    }

    #[test]
    fn template_hold_repeats_every_15_ticks() {
        let mut f = fixture();
        for _ in 0..16 {
            tick(&mut f, Buttons::C);
        }
        // edge fire at tick 1, repeat fire at tick 16 (15 held ticks after)
        assert_eq!(f.state.selected_template, 2);

        for _ in 0..15 {
            tick(&mut f, Buttons::C);
        }
        assert_eq!(f.state.selected_template, 3);
    }

    #[test]
    fn b_toggles_stats_and_overlay_visibility() {
        let mut f = fixture();
        assert!(f.state.show_debug_stats);

        tick(&mut f, Buttons::B);
        assert!(!f.state.show_debug_stats);
        assert!(f.numbers.is_hidden());

        // held B does not toggle again
        tick(&mut f, Buttons::B);
        assert!(!f.state.show_debug_stats);

        tick(&mut f, Buttons::empty());
        tick(&mut f, Buttons::B);
        assert!(f.state.show_debug_stats);
        assert!(!f.numbers.is_hidden());
    }

    #[test]
    fn dpad_left_raises_the_draw_delay_with_stagger() {
        let mut f = fixture();
        assert_eq!(f.state.draw_delay, 1);

        for _ in 0..9 {
            tick(&mut f, Buttons::LEFT);
        }
        // edge fire at tick 1, stagger fire at tick 9
        assert_eq!(f.state.draw_delay, 3);

        // once moving, every 4th tick fires
        for _ in 0..4 {
            tick(&mut f, Buttons::LEFT);
        }
        assert_eq!(f.state.draw_delay, 4);
    }

    #[test]
    fn dpad_right_clamps_the_draw_delay_at_zero() {
        let mut f = fixture();
        assert_eq!(f.state.draw_delay, 1);

        for _ in 0..9 {
            tick(&mut f, Buttons::RIGHT);
        }
        assert_eq!(f.state.draw_delay, 0);

        for _ in 0..20 {
            tick(&mut f, Buttons::RIGHT);
        }
        assert_eq!(f.state.draw_delay, 0);
    }

    #[test]
    fn vertical_dpad_counters_run_without_side_effects() {
        let mut f = fixture();
        let before = (
            f.state.draw_delay,
            f.state.selected_template,
            f.state.do_animation,
            f.state.show_debug_stats,
        );
        for _ in 0..40 {
            tick(&mut f, Buttons::UP | Buttons::DOWN);
        }
        let after = (
            f.state.draw_delay,
            f.state.selected_template,
            f.state.do_animation,
            f.state.show_debug_stats,
        );
        assert_eq!(before, after);
        assert!(f.debounce.sw_up < 15);
        assert!(f.debounce.sw_down < 3);
    }

    #[test]
    fn shoulder_hold_counters_tick_and_recycle() {
        let mut f = fixture();
        for _ in 0..5 {
            tick(&mut f, Buttons::LEFT_SHIFT);
        }
        assert_eq!(f.debounce.sw_ls, 5);

        // the right shoulder counter recycles every 60 held ticks with no
        // further effect on the draw mode
        for _ in 0..60 {
            tick(&mut f, Buttons::RIGHT_SHIFT);
        }
        assert_eq!(f.debounce.sw_rs, 0);
        assert_eq!(f.state.draw_mode, DrawMode::ScreenCels);

        tick(&mut f, Buttons::empty());
        tick(&mut f, Buttons::B);
        tick(&mut f, Buttons::empty());
        assert_eq!(f.debounce.sw_b, 0);
    }

    #[test]
    fn release_resets_the_held_counters() {
        let mut f = fixture();
        for _ in 0..6 {
            tick(&mut f, Buttons::LEFT | Buttons::A);
        }
        tick(&mut f, Buttons::empty());
        assert_eq!(f.debounce.sw_left, 0);
        assert_eq!(f.debounce.sw_a, 0);
        assert!(!f.debounce.kp_left);
        assert!(!f.debounce.moving_left);
    }
}
