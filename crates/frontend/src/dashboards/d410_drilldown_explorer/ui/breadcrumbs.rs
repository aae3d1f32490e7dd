use contracts::dashboards::d410_drilldown::DrillPathEntry;
use leptos::prelude::*;

use crate::shared::icons::icon;

pub const ROOT_CRUMB_LABEL: &str = "Visão Geral";

/// Длина пути после клика по элементу `index`: сам элемент остаётся в пути
pub fn crumb_target(index: usize) -> usize {
    index + 1
}

/// Навигационная цепочка: корень + по элементу на каждый уровень пути.
/// Последний элемент (текущий уровень) не кликабелен.
#[component]
pub fn DrilldownBreadcrumbs(
    #[prop(into)]
    path: Signal<Vec<DrillPathEntry>>,
    /// Возврат к корню
    on_reset: Callback<()>,
    /// Новая длина пути (аргумент для `ascend_to`)
    on_navigate: Callback<usize>,
) -> impl IntoView {
    view! {
        <nav class="breadcrumbs">
            <button
                class="breadcrumbs__item breadcrumbs__item--root"
                disabled=move || path.with(|p| p.is_empty())
                on:click=move |_| on_reset.run(())
            >
                {icon("home")}
                <span>{ROOT_CRUMB_LABEL}</span>
            </button>
            {move || {
                let entries = path.get();
                let last = entries.len().saturating_sub(1);
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        let is_current = index == last;
                        view! {
                            <span class="breadcrumbs__separator">{icon("chevron-right")}</span>
                            <button
                                class=if is_current {
                                    "breadcrumbs__item breadcrumbs__item--current"
                                } else {
                                    "breadcrumbs__item"
                                }
                                disabled=is_current
                                on:click=move |_| on_navigate.run(crumb_target(index))
                            >
                                {entry.name}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}
