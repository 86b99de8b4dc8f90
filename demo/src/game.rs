use std::rc::Rc;

use celgrid_core::assets::builtin::BLOCK_IMAGE_COUNT;
use celgrid_core::cel::{CelArena, ImageBank, ImageId};
use celgrid_core::display::ScreenContext;
use celgrid_core::inputs::ControlPad;
use celgrid_core::numbers::NumberCels;
use celgrid_core::renderer::{draw_cels, draw_screen_cels, DrawMode};
use celgrid_core::sport::SportChannel;
use celgrid_core::timing::TimeDaemon;
use log::{debug, info};

use crate::anim::{animate_blocks, initial_lanes, tick_lanes, AnimData, ANIM_LANES};
use crate::grid::{build_grid, Grid};
use crate::input::InputDebounce;
use crate::loader::LoadedAssets;
use crate::palette::{apply_selected_color_palette, PALETTE_LANES};
use crate::stats::DebugData;

/// Everything the frame loop mutates, gathered into one place instead of
/// file-scope statics.
#[derive(Debug)]
pub struct GameState {
    pub selected_template: i32,
    pub previous_template: i32,
    /// The live lane-to-image mapping the palette selector assigns from.
    pub block_image_idx: [usize; PALETTE_LANES],
    /// Rotating lane start offset, advanced with the draw gate.
    pub starting_idx: i32,
    /// Frames accumulated toward the draw gate.
    pub counter: i32,
    /// Frames the gate holds before the grid updates again.
    pub draw_delay: i32,
    pub do_animation: bool,
    pub draw_mode: DrawMode,
    pub show_debug_stats: bool,
    pub anim: [AnimData; ANIM_LANES],
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            selected_template: 0,
            previous_template: -1,
            block_image_idx: [0, 1, 2, 3, 4, 5, 6],
            starting_idx: 0,
            counter: 0,
            draw_delay: 1,
            do_animation: true,
            draw_mode: DrawMode::Cels,
            show_debug_stats: true,
            anim: initial_lanes(),
        }
    }
}

/// The demo: simulated console subsystems plus the gameplay state, driven
/// one frame at a time.
pub struct Game<Clock: TimeDaemon> {
    pub screen: ScreenContext,
    pub sport: SportChannel,
    pub arena: CelArena,
    pub bank: ImageBank,
    pub block_images: [ImageId; BLOCK_IMAGE_COUNT],
    pub grid: Grid,
    pub numbers: NumberCels,
    pub pad: ControlPad,
    pub debounce: InputDebounce,
    pub state: GameState,
    pub ddata: DebugData,
    pub clock: Clock,

    visible_screen_page: usize,
    frame_count: i32,
}

impl<Clock: TimeDaemon> Game<Clock> {
    pub fn new(clock: Clock, assets: LoadedAssets) -> Self {
        let mut arena = CelArena::default();
        let mut bank = ImageBank::default();

        let mut block_images = [ImageId(0); BLOCK_IMAGE_COUNT];
        for (slot, image) in assets.blocks.into_iter().enumerate() {
            block_images[slot] = bank.add(image);
        }
        info!("loaded {} block images", BLOCK_IMAGE_COUNT);

        // six tracked displays, three per side of the lower screen
        let mut numbers = NumberCels::init(6, &mut arena, &mut bank);
        numbers.init_number_cel(&mut arena, 0, 10, 180, 0, true);
        numbers.init_number_cel(&mut arena, 1, 10, 200, 0, true);
        numbers.init_number_cel(&mut arena, 2, 10, 220, 0, true);
        numbers.init_number_cel(&mut arena, 3, 237, 180, 0, false);
        numbers.init_number_cel(&mut arena, 4, 237, 200, 0, false);
        numbers.init_number_cel(&mut arena, 5, 237, 220, 0, false);

        let grid = build_grid(&mut arena, block_images[0], &numbers);

        let mut game = Self {
            screen: ScreenContext::new(),
            sport: SportChannel::new(),
            arena,
            bank,
            block_images,
            grid,
            numbers,
            pad: ControlPad::new(),
            debounce: InputDebounce::new(),
            state: GameState::default(),
            ddata: DebugData::default(),
            clock,
            visible_screen_page: 0,
            frame_count: 0,
        };

        // make the grid pretty before anything is presented
        apply_selected_color_palette(
            &mut game.state,
            &mut game.arena,
            &game.grid,
            &game.block_images,
        );

        // the background lands on each newly off-screen page via the SPORT
        // channel; nothing to kick until the first page flip
        game.sport.configure_copy(Rc::new(assets.background));
        game.sport.retarget(game.visible_screen_page);

        game
    }

    /// Re-prime the overlay and the stats clocks for a fresh round.
    pub fn init_game(&mut self) {
        self.numbers.reset_cel_numbers(&mut self.arena);
        self.ddata.init(self.clock.get_now_ms());
        debug!("round primed, pad listener ready");
    }

    /// Poll the pad once and run the debounce automata.
    pub fn handle_input(&mut self) {
        let joy_bits = self.pad.poll();
        self.debounce.handle_input(
            joy_bits,
            &mut self.state,
            &mut self.arena,
            &self.grid,
            &mut self.numbers,
        );
    }

    /// Advance the gameplay picture. The draw gate holds everything back for
    /// `draw_delay` frames; when it opens, the lane rotation advances, the
    /// oscillators move the rows, and the palette reassigns every cel.
    pub fn draw_gameplay_screen(&mut self) {
        self.state.counter += 1;
        if self.state.counter > self.state.draw_delay {
            self.state.starting_idx += 1;
            if self.state.starting_idx > 6 {
                self.state.starting_idx = 0;
            }

            self.state.counter = 0;

            if self.state.do_animation {
                tick_lanes(&mut self.state.anim);
                animate_blocks(&mut self.arena, &self.grid, &self.state.anim);
            }

            apply_selected_color_palette(
                &mut self.state,
                &mut self.arena,
                &self.grid,
                &self.block_images,
            );
        }
    }

    /// Draw the chain into the working page, present it, flip, and kick the
    /// background transfer for the page that just went off screen.
    pub fn display_gameplay_screen(&mut self) {
        self.frame_count += 1;
        if self.frame_count >= 30 {
            self.ddata.close_30_frame_window(self.clock.get_now_ms());
            self.frame_count = 0;
        }

        self.ddata.accumulate_loop(self.clock.get_now_ms());

        if self.state.show_debug_stats {
            let values = [
                self.state.draw_mode.overlay_number(),
                self.ddata.last_seconds,
                self.ddata.last_draw_cels,
                self.ddata.last_round_trip,
                self.ddata.last30_time,
                self.ddata.avg_ms,
            ];
            for (idx, value) in values.into_iter().enumerate() {
                self.numbers.set_cel_numbers(&mut self.arena, idx, value);
            }
        }

        self.ddata.begin_draw(self.clock.get_now_ms());

        match self.state.draw_mode {
            DrawMode::Cels => draw_cels(
                &self.screen.bitmap(self.visible_screen_page),
                &self.arena,
                &self.grid.draw_order,
                &self.bank,
            ),
            DrawMode::ScreenCels => draw_screen_cels(
                &self.screen,
                self.visible_screen_page,
                &self.arena,
                &self.grid.draw_order,
                &self.bank,
            ),
        }

        self.ddata.finish_draw(self.clock.get_now_ms());

        self.screen.display(self.visible_screen_page);

        self.visible_screen_page = 1 - self.visible_screen_page;

        self.sport.retarget(self.visible_screen_page);
        self.sport.do_io(&self.screen);

        self.ddata.finish_render(self.clock.get_now_ms());
    }

    /// The page the next frame will draw into.
    pub fn working_page(&self) -> usize {
        self.visible_screen_page
    }
}
