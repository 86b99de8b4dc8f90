use celgrid_core::assets::builtin::BLOCK_IMAGE_COUNT;
use celgrid_core::cel::{CelArena, ImageId};

use crate::game::GameState;
use crate::grid::Grid;

pub const PALETTE_TEMPLATES: usize = 5;
pub const PALETTE_LANES: usize = 7;

/// The five templates as block-image indices, one row per template.
pub const PALETTES: [[usize; PALETTE_LANES]; PALETTE_TEMPLATES] = [
    [1, 2, 3, 4, 5, 6, 12],    // default rainbow
    [7, 8, 9, 10, 11, 12, 13], // pinks and purple
    [14, 14, 15, 15, 1, 1, 1], // black red white
    [1, 2, 3, 4, 3, 2, 1],     // candy
    [1, 1, 14, 14, 5, 5, 5],   // red white blue
];

/// Assign every grid cel's source image from the active lane mapping.
///
/// The template row is only re-copied when the selection changed since the
/// last call. Assignment starts at the rotating `starting_idx` and walks the
/// grid in chain order, so advancing the offset by one rotates every cel's
/// lane by one.
pub fn apply_selected_color_palette(
    state: &mut GameState,
    arena: &mut CelArena,
    grid: &Grid,
    block_images: &[ImageId; BLOCK_IMAGE_COUNT],
) {
    let mut cb_idx = state.starting_idx as usize;

    if state.selected_template != state.previous_template {
        state.previous_template = state.selected_template;
        state.block_image_idx = PALETTES[state.selected_template as usize];
    }

    for column in &grid.cels {
        for &id in column {
            arena.get_mut(id).image = block_images[state.block_image_idx[cb_idx]];
            cb_idx += 1;
            if cb_idx > 6 {
                cb_idx = 0;
            }
        }
    }
}
