use contracts::dashboards::d410_drilldown::{AggregationRow, DrillPathEntry};
use leptos::prelude::*;

use crate::dashboards::d410_drilldown_explorer::view_sync::{
    participation, progress_width, MetricColumn, TableSort, Totals, SORT_FIELD_NAME,
    SORT_FIELD_VALUE,
};
use crate::shared::components::table::{format_money, format_percent, SortableHeaderCell};
use crate::shared::components::TableTotalsRow;

/// Таблица детализации текущего уровня (одна страница)
#[component]
pub fn DetailTable(
    /// Строки текущей страницы (уже отсортированы)
    #[prop(into)]
    rows: Signal<Vec<AggregationRow>>,
    /// Видимые метрические колонки
    #[prop(into)]
    columns: Signal<Vec<MetricColumn>>,
    #[prop(into)]
    totals: Signal<Totals>,
    #[prop(into)]
    sort: Signal<TableSort>,
    /// Номер первой строки страницы минус один
    #[prop(into)]
    rank_offset: Signal<usize>,
    /// Подпись колонки имени (метка уровня)
    #[prop(into)]
    level_label: Signal<String>,
    #[prop(into)]
    can_drill: Signal<bool>,
    on_sort: Callback<String>,
    on_select: Callback<DrillPathEntry>,
) -> impl IntoView {
    let sort_field = Signal::derive(move || sort.with(|s| s.field.clone()));
    let sort_ascending = Signal::derive(move || sort.with(|s| s.ascending));

    view! {
        <div class="table-wrapper">
            <table class="table drilldown-table">
                <thead>
                    {move || {
                        let cols = columns.get();
                        view! {
                            <tr>
                                <th class="table__header-cell table__header-cell--rank">"#"</th>
                                <SortableHeaderCell
                                    label=level_label.get()
                                    sort_field=SORT_FIELD_NAME
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Valor"
                                    sort_field=SORT_FIELD_VALUE
                                    current_sort_field=sort_field
                                    sort_ascending=sort_ascending
                                    on_sort=on_sort
                                    align="right"
                                />
                                <th class="table__header-cell">"Participação"</th>
                                {cols
                                    .into_iter()
                                    .map(|col| {
                                        view! {
                                            <SortableHeaderCell
                                                label=col.label()
                                                sort_field=col.field()
                                                current_sort_field=sort_field
                                                sort_ascending=sort_ascending
                                                on_sort=on_sort
                                                align="right"
                                            />
                                        }
                                    })
                                    .collect_view()}
                            </tr>
                        }
                    }}
                </thead>
                <tbody>
                    {move || {
                        let cols = columns.get();
                        let total = totals.with(|t| t.total_value);
                        let offset = rank_offset.get();

                        rows.get()
                            .into_iter()
                            .enumerate()
                            .map(|(idx, row)| {
                                let entry = DrillPathEntry::from_row(&row);
                                let share = participation(row.value, total);
                                let bar_style = format!("width: {:.2}%;", progress_width(share));
                                let metric_cells = cols
                                    .iter()
                                    .map(|col| {
                                        view! {
                                            <td class="table__cell table__cell--right">
                                                {col.format_cell(&row)}
                                            </td>
                                        }
                                    })
                                    .collect_view();

                                view! {
                                    <tr
                                        class=move || {
                                            if can_drill.get() {
                                                "table__row table__row--clickable"
                                            } else {
                                                "table__row"
                                            }
                                        }
                                        on:click=move |_| on_select.run(entry.clone())
                                    >
                                        <td class="table__cell table__cell--rank">{offset + idx + 1}</td>
                                        <td class="table__cell">{row.display_name().to_string()}</td>
                                        <td class="table__cell table__cell--right">
                                            {format_money(row.value)}
                                        </td>
                                        <td class="table__cell">
                                            <div class="progress">
                                                <div class="progress__track">
                                                    <div class="progress__bar" style=bar_style></div>
                                                </div>
                                                <span class="progress__label">{format_percent(share)}</span>
                                            </div>
                                        </td>
                                        {metric_cells}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
                <tfoot>
                    {move || {
                        let t = totals.get();
                        let filler = columns.with(|c| c.len());
                        view! {
                            <TableTotalsRow>
                                <td class="table__cell"></td>
                                <td class="table__cell">{format!("Total ({} itens)", t.total_items)}</td>
                                <td class="table__cell table__cell--right">
                                    {format_money(t.total_value)}
                                </td>
                                <td class="table__cell">
                                    {format_percent(participation(t.total_value, t.total_value))}
                                </td>
                                {(0..filler)
                                    .map(|_| view! { <td class="table__cell"></td> })
                                    .collect_view()}
                            </TableTotalsRow>
                        }
                    }}
                </tfoot>
            </table>
        </div>
    }
}
