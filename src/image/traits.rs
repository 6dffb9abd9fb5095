/// Shape metadata shared by every image representation in the pipeline.
///
/// Orchestration code that only needs the grid size (allocating stacks,
/// sizing device buffers) takes `impl ImageSource` rather than a concrete
/// image type.
pub trait ImageSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// `[width, height]`, the `NAXIS1`/`NAXIS2` order used by FITS.
    fn dimensions(&self) -> [i64; 2] {
        [self.width() as i64, self.height() as i64]
    }

    fn pixels_per_image(&self) -> usize {
        self.width() * self.height()
    }

    fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }
}

/// Row access on top of [`ImageSource`] for contiguous `f32` images.
pub trait PixelRows: ImageSource {
    fn as_slice(&self) -> &[f32];

    /// Row `y` as a slice.
    ///
    /// # Panics
    /// Panics if `y >= height`; [`PixelRows::try_row`] is the checked form.
    fn row(&self, y: usize) -> &[f32] {
        assert!(y < self.height(), "row {y} out of bounds (height {})", self.height());
        let start = y * self.width();
        &self.as_slice()[start..start + self.width()]
    }

    fn try_row(&self, y: usize) -> Option<&[f32]> {
        (y < self.height()).then(|| self.row(y))
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub struct Rows<'a, I: ?Sized + PixelRows> {
    image: &'a I,
    y: usize,
}

impl<'a, I: PixelRows> Iterator for Rows<'a, I> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

impl<'a, I: PixelRows> ExactSizeIterator for Rows<'a, I> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shape(usize, usize);

    impl ImageSource for Shape {
        fn width(&self) -> usize {
            self.0
        }
        fn height(&self) -> usize {
            self.1
        }
    }

    #[test]
    fn derived_shape_metadata_follows_width_and_height() {
        let s = Shape(5, 3);
        assert_eq!(s.dimensions(), [5, 3]);
        assert_eq!(s.pixels_per_image(), 15);
        assert!(s.contains(4, 2));
        assert!(!s.contains(5, 0));
        assert!(!s.contains(0, 3));
    }

    struct Flat(Vec<f32>);

    impl ImageSource for Flat {
        fn width(&self) -> usize {
            2
        }
        fn height(&self) -> usize {
            2
        }
    }

    impl PixelRows for Flat {
        fn as_slice(&self) -> &[f32] {
            &self.0
        }
    }

    #[test]
    fn try_row_is_checked() {
        let img = Flat(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(img.try_row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(img.try_row(2), None);
        assert_eq!(img.rows().len(), 2);
    }

    #[test]
    #[should_panic(expected = "row 2 out of bounds")]
    fn row_past_the_end_panics() {
        let img = Flat(vec![1.0, 2.0, 3.0, 4.0]);
        let _ = img.row(2);
    }
}
