//! Segment extraction and field mapping.
//!
//! Splits an item's identifier (a relative path or a file name) into ordered
//! tokens, builds a template from one representative item so a user can give
//! each position a role, and replays that role assignment over every item to
//! produce export rows.
//!
//! # Module Structure
//!
//! - `separator` - separator sets and single-pass alternation splitting
//! - `tokenize` - filename/folder tokenization with keyword stripping
//! - `role` - roles, positions and the role assignment
//! - `template` - representative item selection
//! - `mapper` - applying an assignment to produce [`ExportRow`]s
//!
//! # Example
//!
//! ```
//! use imgcsv::item::RawItem;
//! use imgcsv::mapping::{Mapper, RoleAssignment, SeparatorSet, Tokenizer};
//!
//! let tokenizer = Tokenizer::filename(SeparatorSet::new(["-"]).unwrap(), vec![]).unwrap();
//! let assignment = RoleAssignment::parse_specs(&["0=itemcode", "1=colorcode"], "Tag").unwrap();
//! let row = Mapper::new(&tokenizer, &assignment).apply(&RawItem::new("CSF440-119.jpg"));
//!
//! assert_eq!(row.itemcode, "CSF440");
//! assert_eq!(row.colorcode, "119");
//! ```

mod error;
mod mapper;
mod role;
mod separator;
mod template;
mod tokenize;

pub use error::MappingError;
pub use mapper::{CustomField, ExportRow, Mapper};
pub use role::{Position, Role, RoleAssignment, RoleBinding, RoleConflict, DEFAULT_TAG_LABEL};
pub use separator::SeparatorSet;
pub use template::{Pick, TokenTemplate};
pub use tokenize::{strip_keywords, Mode, Tokenizer};
