pub mod render;
pub mod spec;

pub use render::{render_bar_chart, CHART_HEIGHT, CHART_WIDTH};
pub use spec::{ChartSegment, ChartSpec, ChartSpecError, Rgb};
