use log::debug;

use crate::cel::{CelArena, CelFlags, CelId, ImageBank};
use crate::display::{FrameBuffer, ScreenContext, SharedFrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Which hardware draw call presents the chain. Both composite the same
/// traversal order; they differ in the handle they draw through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Cels,
    ScreenCels,
}

impl DrawMode {
    /// Number shown in the stats overlay: 1 - draw_cels / 2 - draw_screen_cels.
    pub fn overlay_number(self) -> i64 {
        match self {
            DrawMode::Cels => 1,
            DrawMode::ScreenCels => 2,
        }
    }
}

/// Composite the chain into a bitmap handle.
pub fn draw_cels(bitmap: &SharedFrameBuffer, arena: &CelArena, order: &[CelId], bank: &ImageBank) {
    let mut fb = bitmap.borrow_mut();
    composite_chain(&mut **fb, arena, order, bank);
}

/// Composite the chain through the screen handle for one page.
pub fn draw_screen_cels(
    screen: &ScreenContext,
    page: usize,
    arena: &CelArena,
    order: &[CelId],
    bank: &ImageBank,
) {
    let bitmap = screen.bitmap(page);
    let mut fb = bitmap.borrow_mut();
    composite_chain(&mut **fb, arena, order, bank);
}

fn composite_chain(fb: &mut FrameBuffer, arena: &CelArena, order: &[CelId], bank: &ImageBank) {
    let mut pixels = 0usize;

    for &id in order {
        let cel = arena.get(id);
        if cel.flags.contains(CelFlags::SKIP) {
            continue;
        }

        let image = bank.get(cel.image);
        for ty in 0..image.height as i32 {
            let out_y = cel.y + ty;
            if out_y < 0 || out_y >= SCREEN_HEIGHT as i32 {
                continue;
            }
            for tx in 0..image.width as i32 {
                let out_x = cel.x + tx;
                if out_x < 0 || out_x >= SCREEN_WIDTH as i32 {
                    continue;
                }

                let color = image.pixel(tx as u32, ty as u32);
                if color == 0 && !cel.flags.contains(CelFlags::BGND) {
                    continue;
                }

                fb[out_x as usize + out_y as usize * SCREEN_WIDTH] = color;
                pixels += 1;
            }
        }
    }

    debug!(target: "renderer", "chain of {} cels drawn, {} pixels written", order.len(), pixels);
}
