pub mod bar_chart;
pub mod breadcrumbs;
pub mod detail_table;
pub mod explorer;
pub mod treemap;

pub use explorer::DrilldownExplorer;
