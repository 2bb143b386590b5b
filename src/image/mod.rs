pub mod buffer;
pub mod io;
pub mod traits;
pub mod view;

pub use self::buffer::{ImageBuf, ImageF32, ImageU8};
pub use self::traits::{ImageView, ImageViewMut};
pub use self::view::ImageRef;
