mod keys;
mod navigator;


pub use keys::NavKey;
pub use navigator::GalleryState;
