//! Категории страниц.
//!
//! Корневой элемент страницы несёт `id` в формате `{entity}--{category}`
//! (например `"d410_drilldown_explorer--dashboard"`) и `data-page-category`.

/// Analytical dashboard / chart view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(
        id.split_once("--"),
        Some((entity, category)) if !entity.is_empty() && !category.is_empty()
    )
}
