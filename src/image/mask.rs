//! Mask-plane bits and the rule for reading them out of `f32` mask pixels.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Pixel-quality categories carried by a mask image.
    ///
    /// Bits without a name are retained, so any integer flag set built by a
    /// caller can be used unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MaskFlags: u32 {
        const BAD               = 1 << 0;
        const SAT               = 1 << 1;
        const INTRP             = 1 << 2;
        const CR                = 1 << 3; // cosmic ray
        const EDGE              = 1 << 4;
        const DETECTED          = 1 << 5;
        const DETECTED_NEGATIVE = 1 << 6;
        const SUSPECT           = 1 << 7;
        const NO_DATA           = 1 << 8;
    }
}

impl MaskFlags {
    /// Flags used when a caller does not choose any.
    pub const DEFAULT_REJECT: MaskFlags = MaskFlags::BAD
        .union(MaskFlags::SAT)
        .union(MaskFlags::CR)
        .union(MaskFlags::EDGE);

    /// Build from a raw integer, keeping unnamed bits.
    #[inline]
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// True when the mask pixel `value` carries any of these flags.
    #[inline]
    pub fn matches(self, value: f32) -> bool {
        mask_bits(value) & self.bits() != 0
    }
}

/// Integer bit pattern of a mask pixel.
///
/// The value is truncated toward zero through `i64` (NaN → 0) and the low 32
/// bits of its two's-complement form are used, so every `u32` plane up to
/// bit 31 is read back exactly.
#[inline]
pub fn mask_bits(value: f32) -> u32 {
    value as i64 as u32
}
