#![no_std]
#![allow(clippy::single_match)]
extern crate alloc;

pub mod assets;
pub mod cel;
pub mod color;
pub mod display;
pub mod inputs;
pub mod numbers;
pub mod renderer;
pub mod sport;
pub mod timing;
