use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Подпись для групп без имени (например, записи без категории)
pub const PLACEHOLDER_NAME: &str = "Sem nome";

/// Опциональные метрики строки (имена полей JSON)
pub const METRIC_FIELDS: &[&str] = &[
    "percentage",
    "growth",
    "margin",
    "quantity",
    "clients",
    "average_ticket",
    "conversion_rate",
];

/// Одна строка результата агрегации.
///
/// Опциональные метрики приходят группой: наличие поля в первой строке
/// означает, что колонка есть у всего набора.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregationRow {
    pub key: Option<String>,
    pub name: Option<String>,
    pub value: f64,
    pub percentage: Option<f64>,
    pub growth: Option<f64>,
    pub margin: Option<f64>,
    pub quantity: Option<f64>,
    pub clients: Option<f64>,
    pub average_ticket: Option<f64>,
    pub conversion_rate: Option<f64>,
    /// Метрики, ключ которых присутствует в JSON (в том числе со значением `null`)
    #[serde(skip)]
    pub present_metrics: Vec<&'static str>,
}

impl AggregationRow {
    /// Мягкое чтение строки из JSON: ничего не паникует на кривых данных.
    ///
    /// - `name` не-строка -> `None`
    /// - `key` число -> строка
    /// - метрики принимаются как числа или числовые строки (Postgres numeric)
    /// - отсутствующий `value` -> 0
    pub fn from_value(v: &Value) -> Self {
        Self {
            key: text_field(v, "key"),
            name: v.get("name").and_then(Value::as_str).map(str::to_string),
            value: number_field(v, "value").unwrap_or(0.0),
            percentage: number_field(v, "percentage"),
            growth: number_field(v, "growth"),
            margin: number_field(v, "margin"),
            quantity: number_field(v, "quantity"),
            clients: number_field(v, "clients"),
            average_ticket: number_field(v, "average_ticket"),
            conversion_rate: number_field(v, "conversion_rate"),
            present_metrics: METRIC_FIELDS
                .iter()
                .copied()
                .filter(|field| v.get(*field).is_some())
                .collect(),
        }
    }

    /// Поле метрики есть в строке: ключ пришёл в JSON или значение задано
    pub fn has_metric(&self, field: &str) -> bool {
        self.present_metrics.contains(&field)
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => PLACEHOLDER_NAME,
        }
    }

    /// Ключ для drill-down: `key` (даже пустой), иначе имя
    pub fn drill_key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| self.display_name().to_string())
    }
}

/// Один выбранный узел пути drill-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillPathEntry {
    /// Значение, уходящее в `p_parent_keys`
    pub key: String,
    /// Подпись для хлебных крошек
    pub name: String,
}

impl DrillPathEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    pub fn from_row(row: &AggregationRow) -> Self {
        Self {
            key: row.drill_key(),
            name: row.display_name().to_string(),
        }
    }
}

/// Разбор ответа RPC: не массив -> пустой набор, не объекты пропускаются
pub fn decode_rows(payload: &Value) -> Vec<AggregationRow> {
    match payload {
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(AggregationRow::from_value)
            .collect(),
        _ => Vec::new(),
    }
}

fn text_field(v: &Value, field: &str) -> Option<String> {
    match v.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(v: &Value, field: &str) -> Option<f64> {
    let n = match v.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
