//! PageFrame: корневая обёртка страницы с `id` и `data-page-category`.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id в формате `{entity}--{category}`
    page_id: &'static str,
    /// Одна из констант PAGE_CAT_*
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id '{}' does not match {{entity}}--{{category}}", page_id);
    }

    let base_class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
