//! Rolling render-timing counters for the stats overlay.
//!
//! Units follow the overlay: whole seconds since init, microseconds for the
//! draw and round-trip samples, milliseconds for the 30-frame window and the
//! running average.

/// Clock samples plus the derived stats the overlay shows.
#[derive(Debug, Default)]
pub struct DebugData {
    tv_init: f64,
    tv_frames30_start: f64,
    tv_draw_cels_start: f64,
    tv_render_end: f64,

    ms_count: i64,
    tot_elapsed_ms: f64,

    pub avg_ms: i64,
    pub last_seconds: i64,
    pub last_draw_cels: i64,
    pub last_round_trip: i64,
    pub last30_time: i64,
}

/// Samples folded into the running average before it resets.
const AVG_WINDOW_SAMPLES: i64 = 120;

impl DebugData {
    /// Prime the epoch clocks at the start of a round.
    pub fn init(&mut self, now_ms: f64) {
        self.tv_init = now_ms;
        self.tv_frames30_start = now_ms;
    }

    /// Close the 30-frame window and immediately restart it.
    pub fn close_30_frame_window(&mut self, now_ms: f64) {
        self.last30_time = (now_ms - self.tv_frames30_start) as i64;
        self.tv_frames30_start = now_ms;
    }

    /// Fold one frame's loop time into the running average.
    pub fn accumulate_loop(&mut self, now_ms: f64) {
        let elapsed = now_ms - self.tv_draw_cels_start;
        self.ms_count += 1;
        self.tot_elapsed_ms += elapsed;
        self.avg_ms = (self.tot_elapsed_ms / self.ms_count as f64) as i64;

        if self.ms_count > AVG_WINDOW_SAMPLES {
            self.ms_count = 0;
            self.tot_elapsed_ms = 0.0;
        }
    }

    pub fn begin_draw(&mut self, now_ms: f64) {
        self.tv_draw_cels_start = now_ms;
    }

    /// Derive the per-frame samples once the chain has been drawn.
    pub fn finish_draw(&mut self, now_ms: f64) {
        self.last_seconds = ((now_ms - self.tv_init) / 1000.0) as i64;
        self.last_draw_cels = ((now_ms - self.tv_draw_cels_start) * 1000.0) as i64;
        self.last_round_trip = ((now_ms - self.tv_render_end) * 1000.0) as i64;
    }

    pub fn finish_render(&mut self, now_ms: f64) {
        self.tv_render_end = now_ms;
    }

    pub fn samples_in_window(&self) -> i64 {
        self.ms_count
    }
}
