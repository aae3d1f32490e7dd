use crate::shared::icons::icon;
use leptos::prelude::*;

/// Кнопки навигации по страницам таблицы
#[component]
pub fn PaginationControls(
    /// Текущая страница (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Всего страниц
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Всего записей
    #[prop(into)]
    total_count: Signal<usize>,

    /// Callback при смене страницы (1-based)
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let is_first = move || current_page.get() <= 1;
    let is_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="Primeira página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let page = current_page.get();
                    let total = total_pages.get().max(1);
                    let count = total_count.get();
                    format!("{} / {} ({})", page, total, count)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Próxima página"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=is_last
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
