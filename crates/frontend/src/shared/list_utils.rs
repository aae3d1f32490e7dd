/// Универсальные утилиты для работы со списками (сортировка, поиск, UI компоненты)
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

/// Задержка перед применением поискового запроса
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Сортирует список по указанному полю.
///
/// Сортировка стабильная: равные элементы сохраняют исходный порядок
/// в обоих направлениях.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "sort-indicator sort-indicator--active"
    } else {
        "sort-indicator"
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для подсветки активного поиска)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Номер последнего ввода: применяется только последний
    let input_seq = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        input_seq.update_value(|s| *s += 1);
        let seq = input_seq.get_value();

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if input_seq.get_value() == seq {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        input_seq.update_value(|s| *s += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder={placeholder}
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        class="search-input__clear"
                        on:click=clear_filter
                        title="Limpar"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
