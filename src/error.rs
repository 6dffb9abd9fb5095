//! Error type shared by every fallible `RawImage` operation.
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Reasons an image operation can fail.
///
/// Every variant is reported at the failing call; nothing is retried and no
/// operation leaves the image partially mutated.
#[derive(Debug)]
pub enum ImageError {
    /// Width or height is zero, or `width * height` overflows.
    InvalidShape { width: usize, height: usize },
    /// Pixel count or mask shape disagrees with the declared `width × height`.
    ShapeMismatch {
        expected: [usize; 2],
        found: [usize; 2],
    },
    /// Pixel address outside `[0, width) × [0, height)`.
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Filesystem failure detected before the FITS library was involved.
    Io { path: PathBuf, source: io::Error },
    /// CFITSIO reported an error while reading or writing `path`.
    Fits {
        path: PathBuf,
        source: fitsio::errors::Error,
    },
    /// The primary HDU at `path` is not a two-dimensional image.
    NotAnImage { path: PathBuf, naxis: usize },
}

impl ImageError {
    pub(crate) fn fits(path: impl Into<PathBuf>, source: fitsio::errors::Error) -> Self {
        ImageError::Fits {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidShape { width, height } => {
                write!(f, "invalid image shape {width}×{height}")
            }
            ImageError::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}×{}, found {}×{}",
                expected[0], expected[1], found[0], found[1]
            ),
            ImageError::OutOfRange {
                x,
                y,
                width,
                height,
            } => write!(f, "pixel ({x},{y}) out of range for image {width}×{height}"),
            ImageError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            ImageError::Fits { path, source } => {
                write!(f, "FITS error on {}: {source}", path.display())
            }
            ImageError::NotAnImage { path, naxis } => write!(
                f,
                "{} does not hold a 2-D image (NAXIS = {naxis})",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Io { source, .. } => Some(source),
            ImageError::Fits { source, .. } => Some(source),
            _ => None,
        }
    }
}
