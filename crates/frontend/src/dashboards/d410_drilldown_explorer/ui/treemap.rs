//! Treemap: squarified-раскладка top-N узлов в SVG

use contracts::dashboards::d410_drilldown::{AggregationRow, DrillPathEntry};
use leptos::prelude::*;

use crate::dashboards::d410_drilldown_explorer::view_sync::participation;
use crate::shared::components::table::{format_money, format_percent};

const VIEW_WIDTH: f64 = 1000.0;
const VIEW_HEIGHT: f64 = 420.0;
const VIEW_HEIGHT_EXPANDED: f64 = 640.0;

/// Минимальный размер плитки для подписи
const LABEL_MIN_WIDTH: f64 = 70.0;
const LABEL_MIN_HEIGHT: f64 = 34.0;

pub const PALETTE: &[&str] = &[
    "#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#7c3aed", "#0891b2", "#db2777", "#65a30d",
    "#ea580c", "#4f46e5",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl TileRect {
    fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Squarified treemap. Возвращает по прямоугольнику на каждое значение
/// (в том же порядке). Отрицательные и нечисловые значения считаются нулём.
pub fn squarify(values: &[f64], width: f64, height: f64) -> Vec<TileRect> {
    let mut rects = vec![TileRect::default(); values.len()];
    let weights: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || width <= 0.0 || height <= 0.0 {
        return rects;
    }

    let scale = width * height / total;
    let areas: Vec<f64> = weights.iter().map(|w| w * scale).collect();
    let mut free = TileRect {
        x: 0.0,
        y: 0.0,
        w: width,
        h: height,
    };

    let mut start = 0;
    while start < areas.len() {
        let side = free.w.min(free.h);
        let mut end = start + 1;
        while end < areas.len()
            && worst_ratio(&areas[start..=end], side) <= worst_ratio(&areas[start..end], side)
        {
            end += 1;
        }
        layout_row(&areas[start..end], &mut free, &mut rects[start..end]);
        start = end;
    }
    rects
}

/// Худшее соотношение сторон в ряду при заданной короткой стороне
fn worst_ratio(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return 0.0;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    row.iter()
        .filter(|a| **a > 0.0)
        .map(|a| (side_sq * a / sum_sq).max(sum_sq / (side_sq * a)))
        .fold(0.0, f64::max)
}

fn layout_row(row: &[f64], free: &mut TileRect, out: &mut [TileRect]) {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        return;
    }
    if free.w >= free.h {
        // колонка слева
        let col_w = if free.h > 0.0 { sum / free.h } else { 0.0 };
        let mut y = free.y;
        for (area, rect) in row.iter().zip(out.iter_mut()) {
            let h = if col_w > 0.0 { area / col_w } else { 0.0 };
            *rect = TileRect {
                x: free.x,
                y,
                w: col_w,
                h,
            };
            y += h;
        }
        free.x += col_w;
        free.w = (free.w - col_w).max(0.0);
    } else {
        // ряд сверху
        let row_h = if free.w > 0.0 { sum / free.w } else { 0.0 };
        let mut x = free.x;
        for (area, rect) in row.iter().zip(out.iter_mut()) {
            let w = if row_h > 0.0 { area / row_h } else { 0.0 };
            *rect = TileRect {
                x,
                y: free.y,
                w,
                h: row_h,
            };
            x += w;
        }
        free.y += row_h;
        free.h = (free.h - row_h).max(0.0);
    }
}

#[component]
pub fn DrilldownTreemap(
    /// Top-N узлов, отсортированных по убыванию
    #[prop(into)]
    series: Signal<Vec<AggregationRow>>,
    /// Итог по всему набору (для долей)
    #[prop(into)]
    total_value: Signal<f64>,
    #[prop(into)]
    expanded: Signal<bool>,
    #[prop(into)]
    can_drill: Signal<bool>,
    on_select: Callback<DrillPathEntry>,
) -> impl IntoView {
    let view_height = move || {
        if expanded.get() {
            VIEW_HEIGHT_EXPANDED
        } else {
            VIEW_HEIGHT
        }
    };

    view! {
        <svg
            class="drilldown-treemap"
            width="100%"
            viewBox=move || format!("0 0 {} {}", VIEW_WIDTH, view_height())
            preserveAspectRatio="none"
        >
            {move || {
                let nodes = series.get();
                let total = total_value.get();
                let values: Vec<f64> = nodes.iter().map(|n| n.value).collect();
                let rects = squarify(&values, VIEW_WIDTH, view_height());

                nodes
                    .into_iter()
                    .zip(rects)
                    .enumerate()
                    .filter(|(_, (_, rect))| rect.area() > 0.0)
                    .map(|(idx, (node, rect))| {
                        let entry = DrillPathEntry::from_row(&node);
                        let name = node.display_name().to_string();
                        let share = format_percent(participation(node.value, total));
                        let tooltip = format!("{}: {} ({})", name, format_money(node.value), share);
                        let color = PALETTE[idx % PALETTE.len()];
                        let show_label = rect.w >= LABEL_MIN_WIDTH && rect.h >= LABEL_MIN_HEIGHT;

                        view! {
                            <g
                                class=move || {
                                    if can_drill.get() {
                                        "drilldown-treemap__tile drilldown-treemap__tile--clickable"
                                    } else {
                                        "drilldown-treemap__tile"
                                    }
                                }
                                on:click=move |_| on_select.run(entry.clone())
                            >
                                <title>{tooltip}</title>
                                <rect
                                    x=rect.x
                                    y=rect.y
                                    width=rect.w
                                    height=rect.h
                                    fill=color
                                    stroke="#ffffff"
                                    stroke-width="2"
                                ></rect>
                                {show_label.then(|| view! {
                                    <text x={rect.x + 8.0} y={rect.y + 18.0} class="drilldown-treemap__label">
                                        {name.clone()}
                                    </text>
                                    <text x={rect.x + 8.0} y={rect.y + 32.0} class="drilldown-treemap__value">
                                        {share.clone()}
                                    </text>
                                })}
                            </g>
                        }
                    })
                    .collect_view()
            }}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_squarify_fills_area_proportionally() {
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let rects = squarify(&values, 600.0, 400.0);
        assert_eq!(rects.len(), values.len());

        let total: f64 = values.iter().sum();
        let covered: f64 = rects.iter().map(TileRect::area).sum();
        assert_close(covered, 600.0 * 400.0);

        for (v, r) in values.iter().zip(&rects) {
            assert_close(r.area(), v / total * 600.0 * 400.0);
            assert!(r.x >= -1e-6 && r.y >= -1e-6);
            assert!(r.x + r.w <= 600.0 + 1e-6);
            assert!(r.y + r.h <= 400.0 + 1e-6);
        }
    }

    #[test]
    fn test_squarify_degenerate_inputs() {
        assert!(squarify(&[], 100.0, 100.0).is_empty());
        let rects = squarify(&[0.0, -5.0, f64::NAN], 100.0, 100.0);
        assert!(rects.iter().all(|r| r.area() == 0.0));
        let rects = squarify(&[10.0, 0.0], 100.0, 50.0);
        assert_close(rects[0].area(), 5000.0);
        assert_close(rects[1].area(), 0.0);
    }

    #[test]
    fn test_squarify_single_value_takes_everything() {
        let rects = squarify(&[42.0], 300.0, 200.0);
        assert_close(rects[0].x, 0.0);
        assert_close(rects[0].y, 0.0);
        assert_close(rects[0].w, 300.0);
        assert_close(rects[0].h, 200.0);
    }
}
