pub mod export;
pub mod types;
pub mod view;

pub use export::ExportRow;
pub use types::{Point, Rect};
pub use view::{
    AxisTicks, Connector, ResourceRow, RoutePath, TaskBar, TimeSpan, TimelineView,
};
