use celgrid_core::cel::{position_cel_column, CelArena};

use crate::grid::{Grid, GRID_COLS, GRID_ROWS};

/// Ticks before an oscillator reverses.
pub const ANIM_MAX: i32 = 5;
pub const ANIM_LANES: usize = 5;

/// One lane's horizontal oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimData {
    pub accl_x: bool,
    pub move_x: i32,
    pub dir_x: i32,
    pub move_count_x: i32,
}

pub fn initial_lanes() -> [AnimData; ANIM_LANES] {
    [
        AnimData { accl_x: true, move_x: 0, dir_x: 1, move_count_x: 0 },
        AnimData { accl_x: true, move_x: 2, dir_x: 2, move_count_x: 1 },
        AnimData { accl_x: true, move_x: 4, dir_x: 3, move_count_x: 2 },
        AnimData { accl_x: true, move_x: 6, dir_x: 4, move_count_x: 3 },
        AnimData { accl_x: true, move_x: 8, dir_x: 5, move_count_x: 4 },
    ]
}

/// Advance every lane one tick: position by velocity, velocity by the
/// accelerate/decelerate flag. At the reversal the tick count restarts from
/// `-(ANIM_MAX + 2)`, not zero, which skews the easing curve.
pub fn tick_lanes(lanes: &mut [AnimData; ANIM_LANES]) {
    for lane in lanes.iter_mut() {
        lane.move_x += lane.dir_x;

        if lane.accl_x {
            lane.dir_x += 1;
        } else {
            lane.dir_x -= 1;
        }

        lane.move_count_x += 1;
        if lane.move_count_x >= ANIM_MAX {
            lane.accl_x = !lane.accl_x;
            lane.move_count_x = -(ANIM_MAX + 2);
        }
    }
}

/// The lane driving each grid row: a triangle wave bouncing over [0, 4],
/// which staggers adjacent rows onto different oscillator phases.
pub fn row_lane_indices() -> [usize; GRID_ROWS] {
    let mut out = [0usize; GRID_ROWS];
    let mut i: i32 = 0;
    let mut accel = true;

    for row in out.iter_mut() {
        *row = i as usize;
        if (accel && i >= 4) || (!accel && i <= 0) {
            accel = !accel;
        }
        i += if accel { 1 } else { -1 };
    }
    out
}

/// Re-position every row by its lane's current offset. Columns carry a one
/// column bias so the swing stays on screen.
pub fn animate_blocks(arena: &mut CelArena, grid: &Grid, lanes: &[AnimData; ANIM_LANES]) {
    let row_lanes = row_lane_indices();
    for (y, &lane) in row_lanes.iter().enumerate() {
        let offset = lanes[lane].move_x;
        for x in 0..GRID_COLS {
            position_cel_column(
                arena.get_mut(grid.cels[x][y]),
                x as i32 - 1,
                y as i32,
                offset,
                0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use celgrid_core::cel::{CelImage, ImageBank, CEL_COLUMN_STEP};
    use celgrid_core::numbers::NumberCels;

    #[test]
    fn velocity_sequence_is_deterministic() {
        let mut lanes = initial_lanes();
        let mut dirs = Vec::new();
        for _ in 0..12 {
            tick_lanes(&mut lanes);
            dirs.push(lanes[0].dir_x);
        }
        assert_eq!(dirs, [2, 3, 4, 5, 6, 5, 4, 3, 2, 1, 0, -1]);
    }

    #[test]
    fn every_lane_returns_to_its_start_state_after_one_cycle() {
        let mut lanes = initial_lanes();
        for _ in 0..24 {
            tick_lanes(&mut lanes);
        }
        assert_eq!(lanes, initial_lanes());
    }

    #[test]
    fn oscillators_stay_bounded_over_1000_ticks() {
        let mut lanes = initial_lanes();
        for _ in 0..1000 {
            tick_lanes(&mut lanes);
            for lane in &lanes {
                assert!((-6..=6).contains(&lane.dir_x), "velocity ran away: {lane:?}");
                assert!((-2..=37).contains(&lane.move_x), "position ran away: {lane:?}");
            }
        }
    }

    #[test]
    fn row_lanes_form_a_triangle_wave_over_0_to_4() {
        let lanes = row_lane_indices();
        assert_eq!(
            lanes,
            [0, 1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3]
        );
        for pair in lanes.windows(2) {
            let step = pair[1] as i32 - pair[0] as i32;
            assert_eq!(step.abs(), 1);
        }
    }

    #[test]
    fn animate_blocks_applies_the_lane_offset_with_column_bias() {
        let mut arena = CelArena::default();
        let mut bank = ImageBank::default();
        let img = bank.add(CelImage {
            width: 12,
            height: 12,
            pixels: vec![1; 144].into_boxed_slice(),
        });
        let numbers = NumberCels::init(1, &mut arena, &mut bank);
        let grid = build_grid(&mut arena, img, &numbers);

        let mut lanes = initial_lanes();
        tick_lanes(&mut lanes);
        animate_blocks(&mut arena, &grid, &lanes);

        let row_lanes = row_lane_indices();
        for (y, &lane) in row_lanes.iter().enumerate() {
            for x in 0..GRID_COLS {
                let cel = arena.get(grid.cels[x][y]);
                assert_eq!(cel.x, (x as i32 - 1) * CEL_COLUMN_STEP + lanes[lane].move_x);
                assert_eq!(cel.y, y as i32 * CEL_COLUMN_STEP);
            }
        }
    }
}
