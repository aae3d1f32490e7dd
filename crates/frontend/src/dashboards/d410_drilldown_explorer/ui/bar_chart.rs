//! Горизонтальная столбчатая диаграмма top-N узлов

use contracts::dashboards::d410_drilldown::{AggregationRow, DrillPathEntry};
use leptos::prelude::*;

use super::treemap::PALETTE;
use crate::dashboards::d410_drilldown_explorer::view_sync::{participation, progress_width};
use crate::shared::components::table::{format_money, format_percent};

/// Длина полос в % от максимального значения серии (0..=100)
pub fn bar_lengths(values: &[f64]) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    values
        .iter()
        .map(|v| progress_width(participation(*v, max)))
        .collect()
}

#[component]
pub fn DrilldownBarChart(
    #[prop(into)]
    series: Signal<Vec<AggregationRow>>,
    #[prop(into)]
    total_value: Signal<f64>,
    #[prop(into)]
    can_drill: Signal<bool>,
    on_select: Callback<DrillPathEntry>,
) -> impl IntoView {
    view! {
        <div class="drilldown-bars">
            {move || {
                let nodes = series.get();
                let total = total_value.get();
                let values: Vec<f64> = nodes.iter().map(|n| n.value).collect();
                let lengths = bar_lengths(&values);

                nodes
                    .into_iter()
                    .zip(lengths)
                    .enumerate()
                    .map(|(idx, (node, length))| {
                        let entry = DrillPathEntry::from_row(&node);
                        let name = node.display_name().to_string();
                        let title = name.clone();
                        let share = format_percent(participation(node.value, total));
                        let bar_style = format!(
                            "width: {:.2}%; background: {};",
                            length,
                            PALETTE[idx % PALETTE.len()]
                        );

                        view! {
                            <div
                                class=move || {
                                    if can_drill.get() {
                                        "drilldown-bars__row drilldown-bars__row--clickable"
                                    } else {
                                        "drilldown-bars__row"
                                    }
                                }
                                title=title
                                on:click=move |_| on_select.run(entry.clone())
                            >
                                <span class="drilldown-bars__label">{name}</span>
                                <div class="drilldown-bars__track">
                                    <div class="drilldown-bars__bar" style=bar_style></div>
                                </div>
                                <span class="drilldown-bars__value">
                                    {format_money(node.value)}
                                    <small>{format!(" ({})", share)}</small>
                                </span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lengths_relative_to_max() {
        assert_eq!(bar_lengths(&[200.0, 100.0, 50.0]), vec![100.0, 50.0, 25.0]);
    }

    #[test]
    fn test_bar_lengths_without_positive_max() {
        assert_eq!(bar_lengths(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(bar_lengths(&[-10.0, -5.0]), vec![0.0, 0.0]);
        assert!(bar_lengths(&[]).is_empty());
    }

    #[test]
    fn test_bar_lengths_negative_clamped() {
        assert_eq!(bar_lengths(&[100.0, -30.0]), vec![100.0, 0.0]);
    }
}
