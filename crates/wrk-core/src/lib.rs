pub mod resolve;
pub mod types;

pub use resolve::{resolve_display_id, resolve_label};
pub use types::*;
