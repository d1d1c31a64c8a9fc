//! gridcodec codec - typed records to editable grid cells and back
//!
//! Three passes over a record collection:
//! - [`detect`] inspects the first record once and fixes a [`Schema`]
//! - [`flatten`] turns typed values into text cells a grid can edit
//! - [`reconstruct`] parses edited cells back into typed records

mod detect;
mod error;
mod flatten;
mod options;
mod reconstruct;

pub use detect::{detect, detect_value, project};
pub use error::{CellError, CodecError};
pub use flatten::{flatten, flatten_value, FlatRecord, FlatTable};
pub use options::{CodecOptions, FlattenMode, ListStyle};
pub use reconstruct::{reconstruct, reconstruct_lossy, reconstruct_value};

pub use gridcodec_types::{Column, FieldType, Record, Schema, Value};

/// Separator between list elements in comma-joined cells
pub const LIST_SEPARATOR: &str = ", ";
