pub mod anim;
pub mod game;
pub mod grid;
pub mod input;
pub mod loader;
pub mod palette;
pub mod stats;
