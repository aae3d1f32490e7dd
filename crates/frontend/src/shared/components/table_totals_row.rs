use leptos::prelude::*;

/// Строка итогов таблицы (`.table__totals-row`), содержимое: `<td>` элементы
#[component]
pub fn TableTotalsRow(
    children: Children,
    /// Дополнительные CSS классы
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let row_class = if class.is_empty() {
        "table__totals-row".to_string()
    } else {
        format!("table__totals-row {}", class)
    };

    view! {
        <tr class={row_class}>
            {children()}
        </tr>
    }
}
