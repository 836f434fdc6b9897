//! imgcsv - Image CSV export
//!
//! Maps the folder levels or filename tokens of an image collection to
//! Itemcode, Colorcode and custom tag columns, and exports one row per image.

pub mod cli;
pub mod config;
pub mod export;
pub mod item;
pub mod link;
pub mod listing;
pub mod mapping;

pub use config::Config;
pub use export::{ExportError, ExportTable, Format};
pub use item::RawItem;
pub use mapping::{ExportRow, Mapper, Mode, RoleAssignment, Tokenizer};
