//! Types shared between the layout engine and whatever renders it.

mod pane;
mod view;
mod widget;

pub use pane::{LayoutStateData, PaneData};
pub use view::ActiveView;
pub use widget::{WidgetCategory, WidgetType};
