use celgrid_core::cel::{
    init_cel_flags, position_cel_column, Cel, CelArena, CelId, DrawOrder, ImageId,
};
use celgrid_core::numbers::NumberCels;

pub const GRID_COLS: usize = 26;
pub const GRID_ROWS: usize = 20;
pub const GRID_CELS: usize = GRID_COLS * GRID_ROWS;

pub const GRID_X_OFFSET: i32 = 4;
pub const GRID_Y_OFFSET: i32 = 0;

/// The 26x20 block cels plus the order the renderer walks them in.
#[derive(Debug)]
pub struct Grid {
    pub cels: [[CelId; GRID_ROWS]; GRID_COLS],
    pub draw_order: DrawOrder,
}

/// Allocate the block cels at their default positions, all showing the
/// default image, and compute the draw order: rows top to bottom within a
/// column, columns left to right, ending in the overlay chain.
pub fn build_grid(arena: &mut CelArena, default_image: ImageId, overlay: &NumberCels) -> Grid {
    let mut cels = [[CelId(0); GRID_ROWS]; GRID_COLS];
    for (x, column) in cels.iter_mut().enumerate() {
        for (y, slot) in column.iter_mut().enumerate() {
            let mut cel = Cel::new(default_image);
            init_cel_flags(&mut cel);
            position_cel_column(&mut cel, x as i32, y as i32, GRID_X_OFFSET, GRID_Y_OFFSET);
            *slot = arena.alloc(cel);
        }
    }

    let overlay_chain = overlay.chain();
    let mut draw_order = DrawOrder::with_capacity(GRID_CELS + overlay_chain.len());
    for column in &cels {
        draw_order.extend_from_slice(column);
    }
    draw_order.extend(overlay_chain);

    Grid { cels, draw_order }
}

/// Put every block back on its deterministic grid coordinate.
pub fn set_default_block_positions(arena: &mut CelArena, grid: &Grid) {
    for (x, column) in grid.cels.iter().enumerate() {
        for (y, &id) in column.iter().enumerate() {
            position_cel_column(
                arena.get_mut(id),
                x as i32,
                y as i32,
                GRID_X_OFFSET,
                GRID_Y_OFFSET,
            );
        }
    }
}
