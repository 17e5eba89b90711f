/// Alpha values above this count as solid when building masks.
pub const OPAQUE_ALPHA: u8 = 127;

const WORD_BITS: u32 = 64;

/// Packed 1-bit-per-pixel opacity mask for one sprite frame.
///
/// Row-major, top-left origin, y down. Built once at load time and
/// shared by every entity that draws the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    words: Vec<u64>,
}

impl PixelMask {
    pub fn empty(width: u32, height: u32) -> Self {
        let words = Self::words_per_row(width) * height as usize;
        Self {
            width,
            height,
            words: vec![0; words],
        }
    }

    /// Fully solid mask. Terrain blocks use this shape when their
    /// sheet region is opaque edge to edge.
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y);
            }
        }
        mask
    }

    /// Build a mask from an RGBA region of a sheet, magnifying each
    /// source pixel into a `scale` x `scale` block. A source pixel is
    /// solid when its alpha exceeds [`OPAQUE_ALPHA`].
    pub fn from_rgba_region(
        rgba: &[u8],
        sheet_width: u32,
        origin_x: u32,
        origin_y: u32,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Self {
        let scale = scale.max(1);
        let mut mask = Self::empty(width * scale, height * scale);
        for sy in 0..height {
            for sx in 0..width {
                let px = ((origin_y + sy) * sheet_width + origin_x + sx) as usize;
                let alpha = rgba.get(px * 4 + 3).copied().unwrap_or(0);
                if alpha > OPAQUE_ALPHA {
                    for dy in 0..scale {
                        for dx in 0..scale {
                            mask.set(sx * scale + dx, sy * scale + dy);
                        }
                    }
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.word_index(x, y);
        self.words[word] >> (x % WORD_BITS) & 1 == 1
    }

    pub fn set(&mut self, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = self.word_index(x, y);
        self.words[word] |= 1 << (x % WORD_BITS);
    }

    /// Number of solid pixels.
    pub fn solid_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Mirror left to right. Left-facing sprite variants collide with
    /// the mirrored silhouette.
    pub fn flipped_horizontal(&self) -> Self {
        let mut out = Self::empty(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set(self.width - 1 - x, y);
                }
            }
        }
        out
    }

    /// True when any solid pixel of `self` lines up with a solid pixel
    /// of `other` placed at `(dx, dy)` relative to self's top-left.
    pub fn overlaps(&self, other: &PixelMask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width as i32).min(self.width as i32);
        let y1 = (dy + other.height as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return true;
                }
            }
        }
        false
    }

    fn words_per_row(width: u32) -> usize {
        width.div_ceil(WORD_BITS) as usize
    }

    fn word_index(&self, x: u32, y: u32) -> usize {
        y as usize * Self::words_per_row(self.width) + (x / WORD_BITS) as usize
    }
}
