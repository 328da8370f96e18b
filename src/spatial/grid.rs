//! Coordinates and the read-only pixel grid capability shared by sources and canvases
//!
//! Every grid exposes its extent, channel count and a bounds-checked pixel
//! accessor. Concrete layouts are 8-bit `image` buffers (RGB8, RGBA8) and the
//! synthesis canvas.

use image::{DynamicImage, ImageBuffer, Pixel, RgbImage, RgbaImage};

/// Pixel coordinate with `x` growing rightwards and `y` downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Point {
    /// Create a point from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Translate by a non-negative offset
    #[must_use]
    pub const fn offset(self, dx: usize, dy: usize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height of a grid or region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Extent {
    /// Create an extent from width and height
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Square extent with the given side length
    pub const fn square(side: usize) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Number of cells covered
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    /// True when either side is zero
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check whether a point lies inside `[0, width) x [0, height)`
    pub const fn contains(self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Component-wise minimum
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        Self {
            width: if self.width < other.width {
                self.width
            } else {
                other.width
            },
            height: if self.height < other.height {
                self.height
            } else {
                other.height
            },
        }
    }
}

/// Axis-aligned rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner (inclusive)
    pub origin: Point,
    /// Size of the rectangle
    pub extent: Extent,
}

impl Rect {
    /// Create a rectangle from its corner and extent
    pub const fn new(origin: Point, extent: Extent) -> Self {
        Self { origin, extent }
    }

    /// Rectangle anchored at the origin
    pub const fn at_origin(extent: Extent) -> Self {
        Self {
            origin: Point::new(0, 0),
            extent,
        }
    }

    /// Check whether the whole rectangle lies inside `bounds`
    ///
    /// Overflowing coordinates never fit.
    pub const fn fits_within(&self, bounds: Extent) -> bool {
        let right = self.origin.x.checked_add(self.extent.width);
        let bottom = self.origin.y.checked_add(self.extent.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= bounds.width && b <= bounds.height)
    }

    /// Check whether a point lies inside the rectangle
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x - self.origin.x < self.extent.width
            && point.y - self.origin.y < self.extent.height
    }
}

/// Read access to a 2D grid of fixed-width 8-bit pixels
pub trait PixelGrid {
    /// Grid dimensions
    fn extent(&self) -> Extent;

    /// Number of channels per pixel
    fn channel_count(&self) -> usize;

    /// Channel values at `(x, y)`, or `None` outside the grid
    fn pixel(&self, x: usize, y: usize) -> Option<&[u8]>;
}

impl<P> PixelGrid for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn extent(&self) -> Extent {
        Extent::new(self.width() as usize, self.height() as usize)
    }

    fn channel_count(&self) -> usize {
        usize::from(P::CHANNEL_COUNT)
    }

    fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.get_pixel_checked(x, y).map(Pixel::channels)
    }
}

/// Decoded source image in one of the supported channel layouts
#[derive(Debug, Clone)]
pub enum SourceImage {
    /// Three 8-bit channels
    Rgb8(RgbImage),
    /// Four 8-bit channels with alpha
    Rgba8(RgbaImage),
}

impl SourceImage {
    /// Name of the channel layout, for diagnostics
    pub const fn layout_name(&self) -> &'static str {
        match self {
            Self::Rgb8(_) => "RGB8",
            Self::Rgba8(_) => "RGBA8",
        }
    }
}

impl From<DynamicImage> for SourceImage {
    // Alpha is only carried through when the decoded image has it
    fn from(image: DynamicImage) -> Self {
        if image.color().has_alpha() {
            Self::Rgba8(image.into_rgba8())
        } else {
            Self::Rgb8(image.into_rgb8())
        }
    }
}

impl PixelGrid for SourceImage {
    fn extent(&self) -> Extent {
        match self {
            Self::Rgb8(image) => image.extent(),
            Self::Rgba8(image) => image.extent(),
        }
    }

    fn channel_count(&self) -> usize {
        match self {
            Self::Rgb8(image) => image.channel_count(),
            Self::Rgba8(image) => image.channel_count(),
        }
    }

    fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        match self {
            Self::Rgb8(image) => image.pixel(x, y),
            Self::Rgba8(image) => image.pixel(x, y),
        }
    }
}
