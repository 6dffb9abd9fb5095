//! Borrowed, non-owning window onto a `RawImage` pixel store.
//!
//! The lifetime `'a` ties the view to the owning image, so a view can never
//! outlive it or coexist with a mutable borrow of it.
use super::traits::{ImageSource, PixelRows};

#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) data: &'a [f32],
}

impl<'a> PixelView<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.contains(x, y).then(|| self.data[y * self.w + x])
    }

    /// Whole row-major store, `width * height` values.
    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Start of the store, for host-to-device copies. Valid for `len()`
    /// elements while the view is alive.
    #[inline]
    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the store in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data)
    }
}

impl<'a> ImageSource for PixelView<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
}

impl<'a> PixelRows for PixelView<'a> {
    #[inline]
    fn as_slice(&self) -> &[f32] {
        self.data
    }
}
