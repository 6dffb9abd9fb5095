#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod image;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::ImageError;
pub use crate::image::{ImageSource, MaskFlags, PixelView, RawImage, NO_DATA};
pub use crate::types::MaskReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for pipeline code.
///
/// ```no_run
/// use raw_image::prelude::*;
///
/// # fn main() -> Result<(), ImageError> {
/// let mut science = RawImage::load_from_file("science.fits")?;
/// let mask = RawImage::load_from_file("mask.fits")?;
/// let masked = science.apply_mask(MaskFlags::SAT | MaskFlags::CR, &mask)?;
/// println!("masked={masked} of {}", science.pixels_per_image());
/// science.save_to_file("masked.fits")?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageSource, MaskFlags, PixelRows, RawImage, NO_DATA};
    pub use crate::ImageError;
}
