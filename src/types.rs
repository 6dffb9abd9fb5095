use crate::image::{ImageSource, MaskFlags, RawImage};
use serde::Serialize;

/// Summary of one masking pass, written by the `mask_image` tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskReport {
    pub width: usize,
    pub height: usize,
    pub flags: MaskFlags,
    /// Pixels turned into `NO_DATA` by this pass.
    pub masked: usize,
    /// `NO_DATA` pixels in the image after the pass.
    pub no_data_total: usize,
}

impl MaskReport {
    pub fn new(image: &RawImage, flags: MaskFlags, masked: usize) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            flags,
            masked,
            no_data_total: image.count_no_data(),
        }
    }
}
