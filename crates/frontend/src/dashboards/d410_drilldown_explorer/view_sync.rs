//! Производные представления одного набора строк: серия для графиков,
//! страница таблицы, итоги и доли. Исходный массив не изменяется.

use std::cmp::Ordering;

use contracts::dashboards::d410_drilldown::{AggregationRow, PLACEHOLDER_NAME};

use crate::shared::components::table::{format_money, format_number_int, format_percent};
use crate::shared::list_utils::{sort_list, Sortable};

pub const PAGE_SIZE: usize = 50;
pub const CHART_LIMIT: usize = 20;

pub const SORT_FIELD_NAME: &str = "name";
pub const SORT_FIELD_VALUE: &str = "value";

/// Сортировка таблицы (по умолчанию: `value` по убыванию)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSort {
    pub field: String,
    pub ascending: bool,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: SORT_FIELD_VALUE.to_string(),
            ascending: false,
        }
    }
}

impl TableSort {
    /// Клик по заголовку: та же колонка меняет направление,
    /// новая колонка начинает с убывания
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = false;
        }
    }
}

/// Опциональные метрические колонки таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricColumn {
    Growth,
    Clients,
    AverageTicket,
    ConversionRate,
    Margin,
}

impl MetricColumn {
    pub const ALL: [MetricColumn; 5] = [
        MetricColumn::Growth,
        MetricColumn::Clients,
        MetricColumn::AverageTicket,
        MetricColumn::ConversionRate,
        MetricColumn::Margin,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            MetricColumn::Growth => "growth",
            MetricColumn::Clients => "clients",
            MetricColumn::AverageTicket => "average_ticket",
            MetricColumn::ConversionRate => "conversion_rate",
            MetricColumn::Margin => "margin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricColumn::Growth => "Crescimento",
            MetricColumn::Clients => "Clientes",
            MetricColumn::AverageTicket => "Ticket Médio",
            MetricColumn::ConversionRate => "Conversão",
            MetricColumn::Margin => "Margem",
        }
    }

    pub fn value(&self, row: &AggregationRow) -> Option<f64> {
        match self {
            MetricColumn::Growth => row.growth,
            MetricColumn::Clients => row.clients,
            MetricColumn::AverageTicket => row.average_ticket,
            MetricColumn::ConversionRate => row.conversion_rate,
            MetricColumn::Margin => row.margin,
        }
    }

    /// Текст ячейки; отсутствующее значение -> "-"
    pub fn format_cell(&self, row: &AggregationRow) -> String {
        let value = self.value(row);
        match self {
            MetricColumn::Growth | MetricColumn::ConversionRate | MetricColumn::Margin => {
                format_percent(value)
            }
            MetricColumn::Clients => value.map(format_number_int).unwrap_or_else(|| "-".into()),
            MetricColumn::AverageTicket => value.map(format_money).unwrap_or_else(|| "-".into()),
        }
    }

    fn from_field(field: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.field() == field)
    }
}

impl Sortable for AggregationRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            SORT_FIELD_NAME => self
                .display_name()
                .to_lowercase()
                .cmp(&other.display_name().to_lowercase()),
            SORT_FIELD_VALUE => self.value.total_cmp(&other.value),
            _ => match MetricColumn::from_field(field) {
                // отсутствующее значение меньше любого числа
                Some(col) => match (col.value(self), col.value(other)) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                },
                None => Ordering::Equal,
            },
        }
    }
}

/// Колонка видна для всего набора, если поле есть в первой строке
/// (исходного, несортированного массива); `null` тоже считается наличием
pub fn column_visible(first_row: Option<&AggregationRow>, column: MetricColumn) -> bool {
    first_row.is_some_and(|row| {
        row.has_metric(column.field()) || column.value(row).is_some()
    })
}

pub fn visible_columns(rows: &[AggregationRow]) -> Vec<MetricColumn> {
    MetricColumn::ALL
        .iter()
        .copied()
        .filter(|c| column_visible(rows.first(), *c))
        .collect()
}

/// Стабильная сортировка по `value` по убыванию (копия)
pub fn sorted_by_value_desc(rows: &[AggregationRow]) -> Vec<AggregationRow> {
    let mut sorted = rows.to_vec();
    sort_list(&mut sorted, SORT_FIELD_VALUE, false);
    sorted
}

/// Серия для treemap/bar: top-N по `value`, пустое имя заменяется заглушкой
pub fn chart_series(rows: &[AggregationRow], limit: usize) -> Vec<AggregationRow> {
    let mut series: Vec<AggregationRow> = rows
        .iter()
        .map(|row| {
            let mut node = row.clone();
            if node.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
                node.name = Some(PLACEHOLDER_NAME.to_string());
            }
            node
        })
        .collect();
    sort_list(&mut series, SORT_FIELD_VALUE, false);
    series.truncate(limit);
    series
}

/// Одна страница таблицы (1-based `page`)
pub fn table_page(
    rows: &[AggregationRow],
    sort: &TableSort,
    page: usize,
    page_size: usize,
) -> Vec<AggregationRow> {
    let page_size = page_size.max(1);
    let mut sorted = rows.to_vec();
    sort_list(&mut sorted, &sort.field, sort.ascending);

    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    sorted.into_iter().skip(start).take(page_size).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_items: usize,
    pub total_pages: usize,
    pub total_value: f64,
}

impl Totals {
    pub fn compute(rows: &[AggregationRow], page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            total_items: rows.len(),
            total_pages: rows.len().div_ceil(page_size),
            total_value: rows.iter().map(|r| r.value).sum(),
        }
    }
}

/// Доля строки в итоге, %; `None` при нулевом итоге или нечисловом результате
pub fn participation(value: f64, total: f64) -> Option<f64> {
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    let pct = value / total * 100.0;
    pct.is_finite().then_some(pct)
}

/// Ширина полосы прогресса, 0..=100
pub fn progress_width(pct: Option<f64>) -> f64 {
    pct.map(|p| p.clamp(0.0, 100.0)).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d410_drilldown::decode_rows;
    use serde_json::json;

    fn row(name: &str, value: f64) -> AggregationRow {
        AggregationRow {
            key: Some(name.to_string()),
            name: Some(name.to_string()),
            value,
            ..Default::default()
        }
    }

    fn names(rows: &[AggregationRow]) -> Vec<String> {
        rows.iter().map(|r| r.display_name().to_string()).collect()
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let rows = vec![
            row("a", 10.0),
            row("b", 30.0),
            row("c", 10.0),
            row("d", 30.0),
            row("e", 5.0),
        ];
        let once = sorted_by_value_desc(&rows);
        let twice = sorted_by_value_desc(&once);
        assert_eq!(names(&once), vec!["b", "d", "a", "c", "e"]);
        assert_eq!(once, twice);
        // исходный массив не изменён
        assert_eq!(names(&rows), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_chart_series_top_20_with_placeholder() {
        let mut rows: Vec<AggregationRow> =
            (0..30).map(|i| row(&format!("r{i}"), i as f64)).collect();
        rows.push(AggregationRow {
            value: 1000.0,
            ..Default::default()
        });
        let series = chart_series(&rows, CHART_LIMIT);
        assert_eq!(series.len(), 20);
        assert_eq!(series[0].name.as_deref(), Some(PLACEHOLDER_NAME));
        assert_eq!(series[1].value, 29.0);
        assert_eq!(series[19].value, 11.0);
    }

    #[test]
    fn test_pagination_covers_all_rows() {
        for len in [0usize, 1, 49, 50, 51, 120, 257] {
            let rows: Vec<AggregationRow> =
                (0..len).map(|i| row(&format!("r{i}"), (i % 17) as f64)).collect();
            let totals = Totals::compute(&rows, PAGE_SIZE);
            let sort = TableSort::default();
            let mut union = Vec::new();
            for page in 1..=totals.total_pages {
                union.extend(table_page(&rows, &sort, page, PAGE_SIZE));
            }
            assert_eq!(union, sorted_by_value_desc(&rows), "len={len}");
        }
    }

    #[test]
    fn test_scenario_120_rows_page_two() {
        let rows: Vec<AggregationRow> = (0..120).map(|i| row(&format!("r{i}"), i as f64)).collect();
        let totals = Totals::compute(&rows, PAGE_SIZE);
        assert_eq!(totals.total_pages, 3);
        assert_eq!(totals.total_items, 120);

        let page = table_page(&rows, &TableSort::default(), 2, PAGE_SIZE);
        assert_eq!(page.len(), 50);
        // 51-е по убыванию значение = 69, 100-е = 20
        assert_eq!(page.first().map(|r| r.value), Some(69.0));
        assert_eq!(page.last().map(|r| r.value), Some(20.0));
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        let rows = vec![row("a", 1.0)];
        assert!(table_page(&rows, &TableSort::default(), 5, PAGE_SIZE).is_empty());
        assert_eq!(table_page(&rows, &TableSort::default(), 0, PAGE_SIZE).len(), 1);
    }

    #[test]
    fn test_participation_zero_total() {
        assert_eq!(participation(10.0, 0.0), None);
        assert_eq!(participation(0.0, 0.0), None);
        assert_eq!(participation(10.0, f64::NAN), None);
        assert_eq!(progress_width(participation(10.0, 0.0)), 0.0);
        assert_eq!(participation(25.0, 100.0), Some(25.0));
        assert_eq!(progress_width(Some(-20.0)), 0.0);
        assert_eq!(progress_width(Some(150.0)), 100.0);
    }

    #[test]
    fn test_growth_column_inferred_from_first_row() {
        let rows = vec![
            AggregationRow {
                growth: Some(5.0),
                ..row("A", 100.0)
            },
            row("B", 50.0),
        ];
        let columns = visible_columns(&rows);
        assert_eq!(columns, vec![MetricColumn::Growth]);
        assert_eq!(MetricColumn::Growth.format_cell(&rows[1]), "-");
        assert_eq!(MetricColumn::Growth.format_cell(&rows[0]), "5,0%");
    }

    #[test]
    fn test_column_hidden_when_first_row_lacks_field() {
        let rows = vec![
            row("A", 100.0),
            AggregationRow {
                margin: Some(12.0),
                ..row("B", 50.0)
            },
        ];
        assert!(!column_visible(rows.first(), MetricColumn::Margin));
        assert!(visible_columns(&[]).is_empty());
    }

    #[test]
    fn test_table_sort_toggle() {
        let mut sort = TableSort::default();
        sort.toggle(SORT_FIELD_VALUE);
        assert!(sort.ascending);
        sort.toggle(SORT_FIELD_NAME);
        assert_eq!(sort.field, SORT_FIELD_NAME);
        assert!(!sort.ascending);

        let rows = vec![row("b", 1.0), row("A", 2.0), row("c", 3.0)];
        let sort = TableSort {
            field: "name".into(),
            ascending: true,
        };
        let page = table_page(&rows, &sort, 1, PAGE_SIZE);
        assert_eq!(names(&page), vec!["A", "b", "c"]);
    }

    #[test]
    fn test_sort_by_missing_metric() {
        let rows = vec![
            row("none", 1.0),
            AggregationRow {
                clients: Some(3.0),
                ..row("three", 1.0)
            },
            AggregationRow {
                clients: Some(9.0),
                ..row("nine", 1.0)
            },
        ];
        let sort = TableSort {
            field: "clients".into(),
            ascending: false,
        };
        assert_eq!(
            names(&table_page(&rows, &sort, 1, PAGE_SIZE)),
            vec!["nine", "three", "none"]
        );
    }

    #[test]
    fn test_null_metric_on_first_row_keeps_column() {
        let rows = decode_rows(&json!([
            { "name": "A", "value": 100, "growth": null },
            { "name": "B", "value": 50, "growth": 4.5 }
        ]));
        assert_eq!(visible_columns(&rows), vec![MetricColumn::Growth]);
        assert_eq!(MetricColumn::Growth.format_cell(&rows[0]), "-");
        assert_eq!(MetricColumn::Growth.format_cell(&rows[1]), "4,5%");
    }
}
