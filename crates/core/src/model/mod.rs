pub mod mapping;
pub mod task;
pub mod view_state;

pub use mapping::{Field, FieldMapping};
pub use task::{Task, TimeWindow};
pub use view_state::{MAX_SCALE, MIN_SCALE, ViewState};
