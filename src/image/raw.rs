//! Owned single-channel f32 image in row-major layout.
//!
//! `RawImage` is the unit every later stage works on: masking writes the
//! `NO_DATA` sentinel in place, and the buffer shape never changes after
//! construction.
use super::mask::MaskFlags;
use super::traits::{ImageSource, PixelRows};
use super::view::PixelView;
use crate::error::ImageError;
use log::debug;

/// Marker written into masked pixels. Downstream numeric code skips NaN.
pub const NO_DATA: f32 = f32::NAN;

#[derive(Clone, Debug, PartialEq)]
pub struct RawImage {
    width: usize,
    height: usize,
    /// Backing storage in row-major order, `width * height` values.
    pixels: Vec<f32>,
}

impl RawImage {
    /// Adopt `pixels` as the store of a `width × height` image.
    pub fn new(width: usize, height: usize, pixels: Vec<f32>) -> Result<Self, ImageError> {
        let count = check_shape(width, height)?;
        if pixels.len() != count {
            return Err(ImageError::ShapeMismatch {
                expected: [width, height],
                found: count_shape(pixels.len(), width),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Copy `pixels` into a new image.
    pub fn from_slice(width: usize, height: usize, pixels: &[f32]) -> Result<Self, ImageError> {
        Self::new(width, height, pixels.to_vec())
    }

    /// Image with every pixel set to `value`, to be filled by later writes.
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self, ImageError> {
        let count = check_shape(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![value; count],
        })
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if self.contains(x, y) {
            Ok(y * self.width + x)
        } else {
            Err(ImageError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Ordered copy of every pixel.
    pub fn pixels(&self) -> Vec<f32> {
        self.pixels.clone()
    }

    /// Non-owning view of the store, e.g. for a host-to-device copy.
    #[inline]
    pub fn data_ref(&self) -> PixelView<'_> {
        PixelView {
            w: self.width,
            h: self.height,
            data: &self.pixels,
        }
    }

    /// Give the store back to the caller.
    pub fn into_pixels(self) -> Vec<f32> {
        self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Result<f32, ImageError> {
        Ok(self.pixels[self.idx(x, y)?])
    }

    /// False when the pixel at (x, y) holds the `NO_DATA` sentinel.
    #[inline]
    pub fn has_data(&self, x: usize, y: usize) -> Result<bool, ImageError> {
        Ok(!self.pixel(x, y)?.is_nan())
    }

    pub fn count_no_data(&self) -> usize {
        self.pixels.iter().filter(|v| v.is_nan()).count()
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: f32) -> Result<(), ImageError> {
        let i = self.idx(x, y)?;
        self.pixels[i] = value;
        Ok(())
    }

    pub fn set_all_pix(&mut self, value: f32) {
        self.pixels.fill(value);
    }

    /// Replace every pixel whose mask value shares a bit with `flags` by
    /// [`NO_DATA`]. Returns how many pixels were newly invalidated.
    ///
    /// `mask` must have exactly this image's shape; otherwise nothing is
    /// written.
    pub fn apply_mask(&mut self, flags: MaskFlags, mask: &RawImage) -> Result<usize, ImageError> {
        if mask.width != self.width || mask.height != self.height {
            return Err(ImageError::ShapeMismatch {
                expected: [self.width, self.height],
                found: [mask.width, mask.height],
            });
        }

        let mut newly_masked = 0usize;
        for (px, &m) in self.pixels.iter_mut().zip(&mask.pixels) {
            if flags.matches(m) {
                if !px.is_nan() {
                    newly_masked += 1;
                }
                *px = NO_DATA;
            }
        }
        debug!(
            "RawImage::apply_mask flags={:#x} masked={} of {}",
            flags.bits(),
            newly_masked,
            self.pixels.len()
        );
        Ok(newly_masked)
    }

    /// Finite minimum and maximum, ignoring `NO_DATA`. `None` if no pixel
    /// holds data.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.pixels
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl ImageSource for RawImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
}

impl PixelRows for RawImage {
    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.pixels
    }
}

/// Pixel count of a `width × height` grid, rejecting empty or overflowing shapes.
fn check_shape(width: usize, height: usize) -> Result<usize, ImageError> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(ImageError::InvalidShape { width, height }),
    }
}

// Best-effort (width, height) description of a flat buffer of `len` values.
fn count_shape(len: usize, width: usize) -> [usize; 2] {
    if len % width == 0 {
        [width, len / width]
    } else {
        [len, 1]
    }
}
