pub mod io;
pub mod mask;
pub mod raw;
pub mod traits;
pub mod view;

pub use self::mask::MaskFlags;
pub use self::raw::{RawImage, NO_DATA};
pub use self::traits::{ImageSource, PixelRows, Rows};
pub use self::view::PixelView;
