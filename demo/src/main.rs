use std::env;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use celgrid_core::timing::{TimeDaemon, VblTimer};
use celgrid_demo::game::Game;
use celgrid_demo::loader;
use log::info;

struct InstantClock {
    start: Instant,
}

impl InstantClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimeDaemon for InstantClock {
    fn get_now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let assets = match env::args().nth(1) {
        Some(dir) => loader::load_data(Path::new(&dir))?,
        None => {
            info!("no asset directory given, using the built-in set");
            loader::builtin_assets()
        }
    };

    let mut game = Game::new(InstantClock::new(), assets);
    game.init_game();

    info!("entering the gameplay loop; kill the process to exit");

    let mut vbl = VblTimer::new(game.clock.get_now_ms());
    loop {
        game.handle_input();

        game.draw_gameplay_screen();

        game.display_gameplay_screen();

        let sleep_ms = vbl.wait_vbl(game.clock.get_now_ms(), 1);
        thread::sleep(Duration::from_secs_f64(sleep_ms / 1000.0));
    }
}
