pub mod analysis_mode;

pub use analysis_mode::AnalysisMode;
