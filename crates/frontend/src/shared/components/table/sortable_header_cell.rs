//! Сортируемая ячейка заголовка таблицы

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;

/// Заголовок с индикатором сортировки (▲▼); клик передаёт `sort_field` в `on_sort`
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки
    #[prop(into)]
    sort_ascending: Signal<bool>,

    on_sort: Callback<String>,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let header_class = if align == "right" {
        "table__header-cell table__header-cell--right"
    } else {
        "table__header-cell"
    };

    view! {
        <th class=header_class>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || {
                    get_sort_class(&current_sort_field.get(), &sort_field_for_class)
                }>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get()
                        )
                    }}
                </span>
            </div>
        </th>
    }
}
