pub mod collection;
pub mod filter;
pub mod key;
pub mod normalize;
pub mod row;

pub use collection::{SheetCollection, SheetData};
pub use filter::filter_rows;
pub use key::{normalize_key, resolve, sanitize_header, slug};
pub use normalize::normalize_rows;
pub use row::{CanonicalRow, RawRecord};
