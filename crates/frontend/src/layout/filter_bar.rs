//! Панель глобальных фильтров: период, режим анализа, поиск

use contracts::dashboards::d410_drilldown::{DateRangeInput, DrilldownFilters};
use contracts::enums::AnalysisMode;
use leptos::prelude::*;
use thaw::*;

use super::global_context::AppGlobalContext;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateBound {
    From,
    To,
}

/// Меняет одну границу периода, сохраняя другую. Пустое значение снимает границу.
fn set_date_bound(filters: &mut DrilldownFilters, bound: DateBound, value: &str) {
    let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
    let (from, to) = filters
        .date_range
        .as_ref()
        .map(|r| r.bounds())
        .map(|(f, t)| (f.map(str::to_string), t.map(str::to_string)))
        .unwrap_or((None, None));
    let (from, to) = match bound {
        DateBound::From => (value, to),
        DateBound::To => (from, value),
    };
    filters.date_range = if from.is_none() && to.is_none() {
        None
    } else {
        Some(DateRangeInput::Range { from, to })
    };
}

fn set_search_term(filters: &mut DrilldownFilters, value: String) {
    filters.search_term = Some(value).filter(|v| !v.trim().is_empty());
}

fn period_label(filters: &DrilldownFilters) -> String {
    match filters.date_range.as_ref().map(|r| r.bounds()) {
        Some((Some(from), Some(to))) => format!("{} a {}", format_date(from), format_date(to)),
        Some((Some(from), None)) => format!("desde {}", format_date(from)),
        _ => "Sem período".to_string(),
    }
}

fn date_value(filters: &DrilldownFilters, bound: DateBound) -> String {
    filters
        .date_range
        .as_ref()
        .map(|r| r.bounds())
        .and_then(|(from, to)| match bound {
            DateBound::From => from,
            DateBound::To => to,
        })
        .and_then(contracts::dashboards::d410_drilldown::to_api_date)
        .unwrap_or_default()
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    let filters = ctx.filters;

    let exclude_employees = RwSignal::new(
        filters.with_untracked(|f| f.exclude_employees.unwrap_or(false)),
    );
    Effect::new(move |_| {
        let value = exclude_employees.get();
        if filters.with_untracked(|f| f.exclude_employees.unwrap_or(false)) != value {
            ctx.update_filters(|f| f.exclude_employees = Some(value));
        }
    });

    let mode_code = RwSignal::new(ctx.analysis_mode.get_untracked().code().to_string());
    Effect::new(move |_| {
        let code = mode_code.get();
        match AnalysisMode::from_code(&code) {
            Some(mode) if mode != ctx.analysis_mode.get_untracked() => ctx.analysis_mode.set(mode),
            Some(_) => {}
            None => log::warn!("unknown analysis mode '{}'", code),
        }
    });

    let search_value = Signal::derive(move || {
        filters.with(|f| f.search_term.clone().unwrap_or_default())
    });
    let on_search = Callback::new(move |value: String| {
        ctx.update_filters(|f| set_search_term(f, value));
    });

    let active_count = Memo::new(move |_| filters.with(|f| f.active_count()));

    view! {
        <div class="filter-bar">
            <div class="filter-bar__group">
                {icon("filter")}
                <label class="filter-bar__label">"Período"</label>
                <input
                    type="date"
                    class="filter-bar__date"
                    prop:value=move || filters.with(|f| date_value(f, DateBound::From))
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.update_filters(|f| set_date_bound(f, DateBound::From, &value));
                    }
                />
                <input
                    type="date"
                    class="filter-bar__date"
                    prop:value=move || filters.with(|f| date_value(f, DateBound::To))
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.update_filters(|f| set_date_bound(f, DateBound::To, &value));
                    }
                />
                <span class="filter-bar__hint">{move || filters.with(period_label)}</span>
            </div>

            <div class="filter-bar__group">
                <Select value=mode_code size=SelectSize::Small>
                    {AnalysisMode::all()
                        .into_iter()
                        .map(|mode| {
                            view! { <option value=mode.code()>{mode.display_name()}</option> }
                        })
                        .collect_view()}
                </Select>
                <Checkbox checked=exclude_employees label="Excluir funcionários" />
            </div>

            <div class="filter-bar__group filter-bar__group--grow">
                <SearchInput
                    value=search_value
                    on_change=on_search
                    placeholder="Buscar cliente, produto..."
                />
                <Show when=move || { active_count.get() > 0 }>
                    <span class="filter-bar__badge">{move || active_count.get()}</span>
                </Show>
            </div>
        </div>
    }
}
