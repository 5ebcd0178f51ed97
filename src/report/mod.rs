//! Presentation of a finished analysis: chart series and the text report.

pub mod chart;
pub mod style;
pub mod text;

pub use chart::{ChartSeries, TradeGroup};
pub use style::{Marker, Style, StyleKey};
pub use text::{render_text_report, REPORT_FILENAME};
