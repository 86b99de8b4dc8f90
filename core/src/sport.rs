use alloc::rc::Rc;
use log::debug;

use crate::assets::BackgroundImage;
use crate::display::ScreenContext;

/// The transfer the channel performs when kicked.
#[derive(Debug, Clone)]
pub enum SportOp {
    /// Flood the whole target page with one color.
    FlashWrite { color: u16 },
    /// Copy a full-screen background image into the target page.
    Copy { image: Rc<BackgroundImage> },
}

/// The background-transfer channel. Configured once, retargeted to the new
/// off-screen page each frame and kicked with [`SportChannel::do_io`].
#[derive(Debug, Default)]
pub struct SportChannel {
    op: Option<SportOp>,
    target_page: usize,
}

impl SportChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_flash_write(&mut self, color: u16) {
        debug!(target: "sport", "configured flash write, color {color:#06x}");
        self.op = Some(SportOp::FlashWrite { color });
    }

    pub fn configure_copy(&mut self, image: Rc<BackgroundImage>) {
        debug!(target: "sport", "configured background copy");
        self.op = Some(SportOp::Copy { image });
    }

    /// Point the receive buffer at a page; the next `do_io` lands there.
    pub fn retarget(&mut self, page: usize) {
        self.target_page = page;
    }

    pub fn target_page(&self) -> usize {
        self.target_page
    }

    /// Run the configured transfer. A channel with no op kicks nothing.
    pub fn do_io(&self, screen: &ScreenContext) {
        let Some(op) = &self.op else {
            return;
        };

        let bitmap = screen.bitmap(self.target_page);
        let mut fb = bitmap.borrow_mut();
        match op {
            SportOp::FlashWrite { color } => fb.fill(*color),
            SportOp::Copy { image } => fb.copy_from_slice(&image.pixels),
        }
    }
}
