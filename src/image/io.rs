//! I/O helpers for images and JSON.
//!
//! - `RawImage::save_to_file` / `RawImage::load_from_file`: single-HDU FITS
//!   (`BITPIX = -32`) through CFITSIO.
//! - `save_preview_png`: min/max stretched 8-bit quick-look of a `RawImage`.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageSource, PixelRows, RawImage};
use crate::error::ImageError;
use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use fitsio::FitsFile;
use image::{GrayImage, Luma};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

impl RawImage {
    /// Write the image as the primary HDU of a FITS file at `path`,
    /// replacing any existing file.
    ///
    /// Pixels are stored as 32-bit IEEE floats, so values (NaN included)
    /// read back bit for bit. The parent directory must already exist.
    ///
    /// CFITSIO only ever sees a plain temporary name next to `path`; the
    /// finished file is renamed over `path`, so names with `[`, `!` or `+`
    /// work and a failed save leaves any previous file in place.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let dir = require_parent_dir(path)?;
        let staging = tempfile::Builder::new()
            .prefix(".raw_image")
            .suffix(".fits")
            .tempfile_in(dir)
            .map_err(|source| ImageError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into_temp_path();

        // FITS axes are listed slowest-varying first: [rows, columns].
        let shape = [self.height(), self.width()];
        let description = ImageDescription {
            data_type: ImageType::Float,
            dimensions: &shape,
        };
        {
            let mut fptr = FitsFile::create(&staging)
                .with_custom_primary(&description)
                .overwrite()
                .open()
                .map_err(|e| ImageError::fits(path, e))?;
            let hdu = fptr.primary_hdu().map_err(|e| ImageError::fits(path, e))?;
            hdu.write_image(&mut fptr, self.as_slice())
                .map_err(|e| ImageError::fits(path, e))?;
        }
        staging.persist(path).map_err(|e| ImageError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        debug!(
            "RawImage::save_to_file {} ({}×{})",
            path.display(),
            self.width(),
            self.height()
        );
        Ok(())
    }

    /// Read the primary HDU of the FITS file at `path`.
    ///
    /// Any numeric `BITPIX` is accepted; CFITSIO converts to `f32`. Files
    /// whose names CFITSIO would parse as extended syntax are read from a
    /// temporary copy.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let copy = if has_extended_syntax(path) {
            let tmp = tempfile::Builder::new()
                .suffix(".fits")
                .tempfile()
                .and_then(|tmp| fs::copy(path, tmp.path()).map(|_| tmp.into_temp_path()))
                .map_err(|source| ImageError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(tmp)
        } else {
            None
        };
        let open_path = copy.as_deref().unwrap_or(path);
        let mut fptr = FitsFile::open(open_path).map_err(|e| ImageError::fits(path, e))?;
        let hdu = fptr.primary_hdu().map_err(|e| ImageError::fits(path, e))?;

        let (height, width) = match &hdu.info {
            HduInfo::ImageInfo { shape, .. } if shape.len() == 2 => (shape[0], shape[1]),
            HduInfo::ImageInfo { shape, .. } => {
                return Err(ImageError::NotAnImage {
                    path: path.to_path_buf(),
                    naxis: shape.len(),
                })
            }
            _ => {
                return Err(ImageError::NotAnImage {
                    path: path.to_path_buf(),
                    naxis: 0,
                })
            }
        };
        let pixels: Vec<f32> = hdu
            .read_image(&mut fptr)
            .map_err(|e| ImageError::fits(path, e))?;

        debug!(
            "RawImage::load_from_file {} ({}×{})",
            path.display(),
            width,
            height
        );
        RawImage::new(width, height, pixels)
    }
}

/// Save a linear min/max stretch of the finite pixels to an 8-bit grayscale
/// PNG. `NO_DATA` pixels render black. Creates parent directories.
pub fn save_preview_png(image: &RawImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (lo, hi) = match image.finite_range() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => {
            warn!("preview {}: constant image, no stretch", path.display());
            (lo, lo + 1.0)
        }
        None => {
            warn!("preview {}: no finite pixels", path.display());
            (0.0, 1.0)
        }
    };
    let scale = 255.0 / (hi - lo);

    let mut out = GrayImage::new(image.width() as u32, image.height() as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = if px.is_finite() {
                ((px - lo) * scale).clamp(0.0, 255.0)
            } else {
                0.0
            };
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

// Directory that will hold `path`; `.` for bare file names.
fn require_parent_dir(path: &Path) -> Result<&Path, ImageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ImageError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", dir.display()),
            ),
        })
    }
}

// CFITSIO reads `[`/`(` as filters, a trailing `+N` as an HDU index, a
// leading `!` as "clobber" and `scheme://` as a driver prefix.
fn has_extended_syntax(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.contains(['[', ']', '(', ')', '+'])
        || text.contains("://")
        || path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('!'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::NO_DATA;

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("img.fits");
        let img = RawImage::filled(3, 3, 1.0).unwrap();
        let err = img.save_to_file(&path).unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }), "got {err}");
        assert!(!path.exists());
    }

    #[test]
    fn bracketed_name_saves_without_side_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame[1].fits");
        let img = RawImage::new(2, 2, vec![1.0, -2.0, 3.5, NO_DATA]).unwrap();
        img.save_to_file(&path).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["frame[1].fits".to_string()]);

        let back = RawImage::load_from_file(&path).unwrap();
        assert_eq!(back.dimensions(), [2, 2]);
        assert_eq!(back.pixel(1, 0).unwrap(), -2.0);
        assert!(!back.has_data(1, 1).unwrap());
    }

    #[test]
    fn extended_syntax_detection() {
        assert!(has_extended_syntax(Path::new("frame[1].fits")));
        assert!(has_extended_syntax(Path::new("dir/!out.fits")));
        assert!(has_extended_syntax(Path::new("img.fits+1")));
        assert!(!has_extended_syntax(Path::new("out/masked.fits")));
        assert!(!has_extended_syntax(Path::new("a!b.fits")));
    }

    #[test]
    fn preview_png_has_image_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicklook").join("preview.png");
        let img = RawImage::new(3, 2, vec![0.0, 1.0, 2.0, NO_DATA, 4.0, 5.0]).unwrap();
        save_preview_png(&img, &path).unwrap();

        let png = image::open(&path).unwrap().into_luma8();
        assert_eq!(png.dimensions(), (3, 2));
        assert_eq!(png.get_pixel(0, 0)[0], 0);
        assert_eq!(png.get_pixel(0, 1)[0], 0);
        assert_eq!(png.get_pixel(2, 1)[0], 255);
    }

    #[test]
    fn json_writer_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("report.json");
        write_json_file(&path, &vec![1, 2, 3]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let back: Vec<i32> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
