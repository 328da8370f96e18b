//! Output canvas with per-cell fill tracking
//!
//! The canvas owns an `image` buffer of the same pixel type as the source plus
//! a bit mask marking which cells have received a pixel. Cells start unfilled
//! and each one is filled at most once; later writes only touch filled cells.

use bitvec::prelude::{BitVec, bitvec};
use image::{ImageBuffer, Pixel};

use crate::io::configuration::MAX_OUTPUT_DIMENSION;
use crate::io::error::{QuiltError, Result, invalid_parameter};
use crate::spatial::grid::{Extent, PixelGrid, Point};

/// Mutable synthesis target
#[derive(Debug, Clone)]
pub struct Canvas<P: Pixel<Subpixel = u8>> {
    buffer: ImageBuffer<P, Vec<u8>>,
    filled: BitVec,
    extent: Extent,
}

impl<P: Pixel<Subpixel = u8>> Canvas<P> {
    /// Create an unfilled canvas
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero or exceeds `MAX_OUTPUT_DIMENSION`
    pub fn new(extent: Extent) -> Result<Self> {
        if extent.is_empty() {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", extent.width, extent.height),
                &"output dimensions must be positive",
            ));
        }
        if extent.width > MAX_OUTPUT_DIMENSION || extent.height > MAX_OUTPUT_DIMENSION {
            return Err(invalid_parameter(
                "size",
                &format!("{}x{}", extent.width, extent.height),
                &format!("output dimensions must not exceed {MAX_OUTPUT_DIMENSION}"),
            ));
        }

        Ok(Self {
            buffer: ImageBuffer::new(extent.width as u32, extent.height as u32),
            filled: bitvec![0; extent.area()],
            extent,
        })
    }

    fn cell_index(&self, x: usize, y: usize) -> Option<usize> {
        self.extent
            .contains(Point::new(x, y))
            .then_some(y * self.extent.width + x)
    }

    /// Whether `(x, y)` has received a pixel; `false` outside the canvas
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.cell_index(x, y)
            .and_then(|index| self.filled.get(index))
            .is_some_and(|bit| *bit)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.filled.count_ones()
    }

    /// True once every cell has been filled
    pub fn is_complete(&self) -> bool {
        self.filled.all()
    }

    /// Pixel at `(x, y)` only if that cell has been filled
    pub fn filled_pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if self.is_filled(x, y) {
            self.pixel(x, y)
        } else {
            None
        }
    }

    /// Write into an unfilled cell and mark it filled
    ///
    /// Returns `false` without writing when the cell is outside the canvas or
    /// already filled.
    pub fn fill(&mut self, x: usize, y: usize, channels: &[u8]) -> bool {
        let Some(index) = self.cell_index(x, y) else {
            return false;
        };
        if self.filled.get(index).is_none_or(|bit| *bit) {
            return false;
        }
        self.write(x, y, channels);
        self.filled.set(index, true);
        true
    }

    /// Replace the pixel of an already filled cell
    ///
    /// # Errors
    ///
    /// Returns an error if the cell has not been filled yet
    pub fn overwrite(&mut self, x: usize, y: usize, channels: &[u8]) -> Result<()> {
        self.require_filled(x, y)?;
        self.write(x, y, channels);
        Ok(())
    }

    /// Average an incoming pixel into an already filled cell, channel by channel
    ///
    /// # Errors
    ///
    /// Returns an error if the cell has not been filled yet
    pub fn blend(&mut self, x: usize, y: usize, channels: &[u8]) -> Result<()> {
        self.require_filled(x, y)?;
        if let Some(pixel) = self.pixel_mut(x, y) {
            for (existing, &incoming) in pixel.channels_mut().iter_mut().zip(channels) {
                *existing = (u16::from(*existing) + u16::from(incoming)).div_ceil(2) as u8;
            }
        }
        Ok(())
    }

    /// Borrow the underlying image buffer
    pub const fn as_image(&self) -> &ImageBuffer<P, Vec<u8>> {
        &self.buffer
    }

    /// Release the underlying image buffer
    pub fn into_image(self) -> ImageBuffer<P, Vec<u8>> {
        self.buffer
    }

    fn require_filled(&self, x: usize, y: usize) -> Result<()> {
        if self.is_filled(x, y) {
            Ok(())
        } else {
            Err(QuiltError::OutOfBounds {
                origin: (x, y),
                extent: (1, 1),
                bounds: (self.extent.width, self.extent.height),
            })
        }
    }

    fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut P> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.buffer.get_pixel_mut_checked(x, y)
    }

    fn write(&mut self, x: usize, y: usize, channels: &[u8]) {
        if let Some(pixel) = self.pixel_mut(x, y) {
            for (existing, &incoming) in pixel.channels_mut().iter_mut().zip(channels) {
                *existing = incoming;
            }
        }
    }
}

impl<P: Pixel<Subpixel = u8>> PixelGrid for Canvas<P> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn channel_count(&self) -> usize {
        usize::from(P::CHANNEL_COUNT)
    }

    fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        self.buffer.pixel(x, y)
    }
}
