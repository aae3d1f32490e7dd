pub mod d410_drilldown_explorer;

pub use d410_drilldown_explorer::DrilldownExplorer;
