pub mod d410_drilldown;
