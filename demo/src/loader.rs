use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use celgrid_core::assets::{builtin, BackgroundImage};
use celgrid_core::cel::CelImage;
use log::info;

/// The stock cel files, in image-index order.
pub const BLOCK_CEL_FILES: [&str; 16] = [
    "block_teal.cel",
    "block_red.cel",
    "block_orange.cel",
    "block_yellow.cel",
    "block_green.cel",
    "block_blue.cel",
    "block_purple.cel",
    "j1.cel",
    "j2.cel",
    "j3.cel",
    "j4.cel",
    "j5.cel",
    "j6.cel",
    "j7.cel",
    "block_white.cel",
    "block_black.cel",
];

pub const BACKGROUND_IMG_FILE: &str = "bgblack.img";

pub struct LoadedAssets {
    pub blocks: Vec<CelImage>,
    pub background: BackgroundImage,
}

/// The synthesized set used when no asset directory is given.
pub fn builtin_assets() -> LoadedAssets {
    LoadedAssets {
        blocks: builtin::block_images(),
        background: builtin::background(),
    }
}

/// Load the stock files from a directory, once at startup. Any missing or
/// undecodable file is fatal.
pub fn load_data(dir: &Path) -> Result<LoadedAssets> {
    let mut blocks = Vec::with_capacity(BLOCK_CEL_FILES.len());
    for name in BLOCK_CEL_FILES {
        let path = dir.join(name);
        let bytes =
            fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let image = CelImage::from_cel_bytes(&bytes)
            .with_context(|| format!("decoding {}", path.display()))?;
        blocks.push(image);
    }

    let path = dir.join(BACKGROUND_IMG_FILE);
    let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let background = BackgroundImage::from_img_bytes(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;

    info!("loaded {} cels and the background from {}", blocks.len(), dir.display());
    Ok(LoadedAssets { blocks, background })
}

#[cfg(test)]
mod tests {
    use super::*;
    use celgrid_core::assets::{CEL_MAGIC, IMG_MAGIC};
    use celgrid_core::display::SCREEN_SIZE_IN_PIXELS;
    use std::io::Write;

    fn write_stock_dir(dir: &Path) {
        for name in BLOCK_CEL_FILES {
            let mut bytes = Vec::new();
            bytes.extend_from_slice(&CEL_MAGIC);
            bytes.extend_from_slice(&12u32.to_ne_bytes());
            bytes.extend_from_slice(&12u32.to_ne_bytes());
            bytes.extend_from_slice(&[1u8; 12 * 12 * 2]);
            fs::File::create(dir.join(name))
                .unwrap()
                .write_all(&bytes)
                .unwrap();
        }
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&IMG_MAGIC);
        bytes.extend_from_slice(&vec![0u8; SCREEN_SIZE_IN_PIXELS * 2]);
        fs::File::create(dir.join(BACKGROUND_IMG_FILE))
            .unwrap()
            .write_all(&bytes)
            .unwrap();
    }

    #[test]
    fn builtin_assets_match_the_stock_list() {
        let assets = builtin_assets();
        assert_eq!(assets.blocks.len(), BLOCK_CEL_FILES.len());
        assert_eq!(assets.background.pixels.len(), SCREEN_SIZE_IN_PIXELS);
    }

    #[test]
    fn load_data_reads_the_full_stock_set() {
        let dir = std::env::temp_dir().join("celgrid-loader-full");
        fs::create_dir_all(&dir).unwrap();
        write_stock_dir(&dir);

        let assets = load_data(&dir).unwrap();
        assert_eq!(assets.blocks.len(), 16);
        assert_eq!(assets.blocks[0].width, 12);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn a_missing_file_is_fatal() {
        let dir = std::env::temp_dir().join("celgrid-loader-missing");
        fs::create_dir_all(&dir).unwrap();
        // only the first file exists
        write_stock_dir(&dir);
        fs::remove_file(dir.join("j3.cel")).unwrap();

        assert!(load_data(&dir).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
