pub mod card_animated;
pub mod pagination_controls;
pub mod table;
pub mod table_totals_row;

pub use card_animated::CardAnimated;
pub use pagination_controls::PaginationControls;
pub use table_totals_row::TableTotalsRow;
