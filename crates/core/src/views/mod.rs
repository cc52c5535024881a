pub mod axis;
pub mod compose;
pub mod export;
pub mod route;

pub use compose::compose;
pub use export::{content_bounds, export_rows};
