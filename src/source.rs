mod blob;
mod error;
mod preview;
mod probe;
mod resolver;
mod url_check;


pub use blob::{FileBlob, ImageSource};
pub use error::{Result, SourceError};
pub use preview::{ImageInfo, Preview, decode_preview, inspect_image};
pub use probe::{HttpImageProbe, ImageProbe};
pub use resolver::{InputResolver, ResolverNotice, SourceState};
pub use url_check::{IMAGE_EXTENSIONS, validate_image_url};
