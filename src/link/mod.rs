//! Public link resolution for discovered images.
//!
//! A [`LinkResolver`] turns a stored item into the URL written to the
//! `ImageLink` column. Without a resolver the raw identifier is exported.

mod base_url;
mod error;
mod manifest;

pub use base_url::BaseUrlResolver;
pub use error::LinkError;
pub use manifest::ManifestResolver;

use crate::item::RawItem;

/// Maps a stored file to its public URL.
///
/// Calls are blocking and are made once per item, in listing order.
pub trait LinkResolver {
    fn resolve(&self, item: &RawItem) -> Result<String, LinkError>;
}
