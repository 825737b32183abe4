pub mod format;
pub mod html;
pub mod report;
pub mod view;

pub use html::render_view;
pub use view::{resolve_view, MonitorView};
