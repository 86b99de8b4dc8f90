use alloc::boxed::Box;
use alloc::vec::Vec;
use bitflags::bitflags;

/// Grid stepping used by [`position_cel_column`]; block cels are authored at
/// this size.
pub const CEL_COLUMN_STEP: i32 = 12;

bitflags! {
    /// Per-cel control bits, the interesting subset of the hardware CCB word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CelFlags: u8 {
        /// The renderer passes over this cel without drawing it.
        const SKIP = 1 << 0;
        /// Zero-valued texels are drawn opaque instead of transparent.
        const BGND = 1 << 1;
    }
}

/// Handle into an [`ImageBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// Handle into a [`CelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CelId(pub usize);

/// An immutable decoded source image. Loaded (or synthesized) once at
/// startup and shared by any number of cels; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CelImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Box<[u16]>,
}

impl CelImage {
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u16 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Decoded source images, indexed by [`ImageId`].
#[derive(Debug, Default)]
pub struct ImageBank {
    images: Vec<CelImage>,
}

impl ImageBank {
    pub fn add(&mut self, image: CelImage) -> ImageId {
        let id = ImageId(self.images.len());
        self.images.push(image);
        id
    }

    #[inline]
    pub fn get(&self, id: ImageId) -> &CelImage {
        &self.images[id.0]
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// One renderable unit: a source image reference plus a screen position.
///
/// Cels don't own their pixels and don't link to each other; draw order is
/// a separate index sequence over the arena (see [`DrawOrder`]).
#[derive(Debug, Clone, Copy)]
pub struct Cel {
    pub image: ImageId,
    pub x: i32,
    pub y: i32,
    pub flags: CelFlags,
}

impl Cel {
    pub fn new(image: ImageId) -> Self {
        Self {
            image,
            x: 0,
            y: 0,
            flags: CelFlags::empty(),
        }
    }
}

/// The traversal order the renderer follows; replaces the hardware's
/// next-pointer chain.
pub type DrawOrder = Vec<CelId>;

/// Process-lifetime arena of cels. Cels are allocated during init and
/// mutated every frame; none are ever freed.
#[derive(Debug, Default)]
pub struct CelArena {
    cels: Vec<Cel>,
}

impl CelArena {
    pub fn alloc(&mut self, cel: Cel) -> CelId {
        let id = CelId(self.cels.len());
        self.cels.push(cel);
        id
    }

    #[inline]
    pub fn get(&self, id: CelId) -> &Cel {
        &self.cels[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: CelId) -> &mut Cel {
        &mut self.cels[id.0]
    }

    pub fn len(&self) -> usize {
        self.cels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cels.is_empty()
    }
}

/// Reset a cel to the standard draw state: visible, transparent zeros.
pub fn init_cel_flags(cel: &mut Cel) {
    cel.flags = CelFlags::empty();
}

/// Position a cel on the fixed 12px column/row grid, plus a pixel offset.
pub fn position_cel_column(cel: &mut Cel, col: i32, row: i32, x_off: i32, y_off: i32) {
    cel.x = col * CEL_COLUMN_STEP + x_off;
    cel.y = row * CEL_COLUMN_STEP + y_off;
}
