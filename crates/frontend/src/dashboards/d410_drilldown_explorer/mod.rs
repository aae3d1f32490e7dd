pub mod api;
pub mod binding;
pub mod error;
pub mod navigator;
pub mod state;
pub mod ui;
pub mod view_sync;

pub use ui::DrilldownExplorer;
