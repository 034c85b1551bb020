//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, RenderError};
pub use renderer::{ChartKind, StaticChartRenderer};
