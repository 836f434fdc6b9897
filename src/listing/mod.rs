//! Discovery of image items.
//!
//! Every source yields [`RawItem`]s in a stable order, already filtered by
//! the image extension allow-list.

mod directory;
mod error;
mod filter;
mod listing_file;
mod named;

pub use directory::DirectorySource;
pub use error::ListingError;
pub use filter::{ExtensionFilter, DEFAULT_EXTENSIONS};
pub use listing_file::ListingFile;
pub use named::NamedFiles;

use crate::item::RawItem;

/// Provider of the items of one export.
pub trait ItemSource {
    fn list(&self) -> Result<Vec<RawItem>, ListingError>;
}
