//! Cel and background-image containers, plus the built-in asset set used
//! when the host supplies no data directory.
//!
//! The containers are the simulation's own: a 4-byte magic (`CELD` with u32
//! width/height, or `IMAG` at the fixed screen size) followed by u16 pixels.
//! All multi-byte fields are host-endian; these files are a local stand-in
//! for the platform's asset formats, not an interchange format.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use bytemuck::{pod_collect_to_vec, pod_read_unaligned};
use thiserror::Error;

use crate::cel::CelImage;
use crate::color;
use crate::display::{SCREEN_HEIGHT, SCREEN_SIZE_IN_PIXELS, SCREEN_WIDTH};

pub const CEL_MAGIC: [u8; 4] = *b"CELD";
pub const IMG_MAGIC: [u8; 4] = *b"IMAG";

const CEL_HEADER_LEN: usize = 12;
const IMG_HEADER_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("bad magic {found:?}, expected {expected:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },
    #[error("truncated asset, expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unusable cel dimensions {width}x{height}")]
    BadDimensions { width: u32, height: u32 },
}

fn check_magic(bytes: &[u8], expected: [u8; 4]) -> Result<(), AssetError> {
    if bytes.len() < 4 {
        return Err(AssetError::Truncated {
            expected: 4,
            actual: bytes.len(),
        });
    }
    let found = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if found != expected {
        return Err(AssetError::BadMagic { expected, found });
    }
    Ok(())
}

impl CelImage {
    /// Decode a `CELD` container.
    pub fn from_cel_bytes(bytes: &[u8]) -> Result<CelImage, AssetError> {
        check_magic(bytes, CEL_MAGIC)?;
        if bytes.len() < CEL_HEADER_LEN {
            return Err(AssetError::Truncated {
                expected: CEL_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let width: u32 = pod_read_unaligned(&bytes[4..8]);
        let height: u32 = pod_read_unaligned(&bytes[8..12]);
        if width == 0 || height == 0 || width > SCREEN_WIDTH as u32 || height > SCREEN_HEIGHT as u32
        {
            return Err(AssetError::BadDimensions { width, height });
        }

        let expected = CEL_HEADER_LEN + (width * height) as usize * 2;
        if bytes.len() < expected {
            return Err(AssetError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels: Vec<u16> = pod_collect_to_vec(&bytes[CEL_HEADER_LEN..expected]);
        Ok(CelImage {
            width,
            height,
            pixels: pixels.into_boxed_slice(),
        })
    }
}

/// A full-screen background image for the SPORT copy channel.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub pixels: Box<[u16]>,
}

impl BackgroundImage {
    pub fn solid(color: u16) -> Self {
        Self {
            pixels: vec![color; SCREEN_SIZE_IN_PIXELS].into_boxed_slice(),
        }
    }

    /// Decode an `IMAG` container, always exactly one screen of pixels.
    pub fn from_img_bytes(bytes: &[u8]) -> Result<BackgroundImage, AssetError> {
        check_magic(bytes, IMG_MAGIC)?;

        let expected = IMG_HEADER_LEN + SCREEN_SIZE_IN_PIXELS * 2;
        if bytes.len() < expected {
            return Err(AssetError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels: Vec<u16> = pod_collect_to_vec(&bytes[IMG_HEADER_LEN..expected]);
        Ok(BackgroundImage {
            pixels: pixels.into_boxed_slice(),
        })
    }
}

/// The synthesized stand-ins for the stock asset files.
pub mod builtin {
    use super::*;
    use crate::color::{blue, dim, green, red, rgb555};

    pub const BLOCK_SIZE: u32 = 12;
    pub const BLOCK_IMAGE_COUNT: usize = 16;

    /// Fill colors in load order: the seven grid colors, the seven jewel
    /// variants, then white and black.
    fn block_fill_colors() -> [u16; BLOCK_IMAGE_COUNT] {
        [
            rgb555(0, 22, 20),  // teal
            rgb555(28, 2, 2),   // red
            rgb555(30, 14, 2),  // orange
            rgb555(30, 28, 4),  // yellow
            rgb555(4, 24, 6),   // green
            rgb555(4, 8, 28),   // blue
            rgb555(18, 4, 26),  // purple
            rgb555(26, 6, 10),  // j1
            rgb555(26, 16, 6),  // j2
            rgb555(24, 26, 8),  // j3
            rgb555(8, 26, 12),  // j4
            rgb555(8, 18, 26),  // j5
            rgb555(14, 8, 26),  // j6
            rgb555(24, 10, 24), // j7
            rgb555(30, 30, 30), // white
            color::BLACK,       // black; 0 would be transparent
        ]
    }

    fn brighten(px: u16) -> u16 {
        rgb555(
            (red(px) + 8).min(31),
            (green(px) + 8).min(31),
            (blue(px) + 8).min(31),
        )
    }

    fn block(fill: u16, faceted: bool) -> CelImage {
        let size = BLOCK_SIZE;
        let mut pixels = vec![color::TRANSPARENT; (size * size) as usize];
        let border = dim(fill);
        let highlight = brighten(fill);

        for y in 0..size {
            for x in 0..size {
                let on_border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                let mut px = if on_border { border } else { fill };
                if faceted {
                    let dx = (x as i32 - 6).abs();
                    let dy = (y as i32 - 6).abs();
                    if dx + dy <= 2 {
                        px = highlight;
                    }
                }
                pixels[(y * size + x) as usize] = px;
            }
        }

        CelImage {
            width: size,
            height: size,
            pixels: pixels.into_boxed_slice(),
        }
    }

    /// All sixteen block images: flat blocks, faceted jewels, white, black.
    pub fn block_images() -> Vec<CelImage> {
        block_fill_colors()
            .iter()
            .enumerate()
            .map(|(idx, &fill)| block(fill, (7..14).contains(&idx)))
            .collect()
    }

    /// The black full-screen background.
    pub fn background() -> BackgroundImage {
        BackgroundImage::solid(0)
    }
}
