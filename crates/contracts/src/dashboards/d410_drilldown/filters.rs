use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Период в одном из двух допустимых видов: `{from, to}` или `[from, to]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateRangeInput {
    Range {
        from: Option<String>,
        to: Option<String>,
    },
    Pair(Option<String>, Option<String>),
}

impl DateRangeInput {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        DateRangeInput::Range {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Границы периода как есть, без нормализации
    pub fn bounds(&self) -> (Option<&str>, Option<&str>) {
        match self {
            DateRangeInput::Range { from, to } | DateRangeInput::Pair(from, to) => {
                (from.as_deref(), to.as_deref())
            }
        }
    }
}

/// Фильтры, приходящие от внешнего провайдера (глобальный контекст)
/// или заданные компоненту по умолчанию.
///
/// `None` означает "ключ не задан": при слиянии такой ключ не перекрывает
/// значение по умолчанию.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrilldownFilters {
    pub date_range: Option<DateRangeInput>,
    pub exclude_employees: Option<bool>,
    pub supervisors: Option<Vec<String>>,
    pub sellers: Option<Vec<String>>,
    pub customer_groups: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
    pub clients: Option<Vec<String>>,
    pub search_term: Option<String>,
}

impl DrilldownFilters {
    /// Слияние слоёв конфигурации: `overrides` побеждает при совпадении ключа
    pub fn merge(defaults: &Self, overrides: &Self) -> Self {
        Self {
            date_range: overrides
                .date_range
                .clone()
                .or_else(|| defaults.date_range.clone()),
            exclude_employees: overrides.exclude_employees.or(defaults.exclude_employees),
            supervisors: overrides
                .supervisors
                .clone()
                .or_else(|| defaults.supervisors.clone()),
            sellers: overrides.sellers.clone().or_else(|| defaults.sellers.clone()),
            customer_groups: overrides
                .customer_groups
                .clone()
                .or_else(|| defaults.customer_groups.clone()),
            regions: overrides.regions.clone().or_else(|| defaults.regions.clone()),
            clients: overrides.clients.clone().or_else(|| defaults.clients.clone()),
            search_term: overrides
                .search_term
                .clone()
                .or_else(|| defaults.search_term.clone()),
        }
    }

    /// Количество заданных фильтров (для бейджа панели фильтров)
    pub fn active_count(&self) -> usize {
        let lists = [
            &self.supervisors,
            &self.sellers,
            &self.customer_groups,
            &self.regions,
            &self.clients,
        ];
        let list_count = lists
            .iter()
            .filter(|l| l.as_ref().is_some_and(|v| !v.is_empty()))
            .count();
        let search = self
            .search_term
            .as_ref()
            .is_some_and(|s| !s.trim().is_empty());
        list_count + usize::from(search) + usize::from(self.exclude_employees == Some(true))
    }
}

/// Приводит дату к календарному виду `YYYY-MM-DD` для API.
///
/// Время и смещение отбрасываются без пересчёта часового пояса:
/// "2024-03-15T23:30:00-03:00" -> "2024-03-15".
pub fn to_api_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_accepts_both_shapes() {
        let obj: DateRangeInput =
            serde_json::from_str(r#"{"from":"2024-01-01","to":"2024-01-31"}"#).unwrap();
        let pair: DateRangeInput = serde_json::from_str(r#"["2024-01-01","2024-01-31"]"#).unwrap();
        assert_eq!(obj.bounds(), (Some("2024-01-01"), Some("2024-01-31")));
        assert_eq!(pair.bounds(), obj.bounds());
    }

    #[test]
    fn test_to_api_date_drops_time_without_shifting() {
        assert_eq!(
            to_api_date("2024-03-15T23:30:00-03:00").as_deref(),
            Some("2024-03-15")
        );
        assert_eq!(to_api_date("2024-03-15").as_deref(), Some("2024-03-15"));
        assert_eq!(to_api_date("2024-03-15 08:00:00").as_deref(), Some("2024-03-15"));
        assert_eq!(to_api_date("15.03.2024"), None);
        assert_eq!(to_api_date(""), None);
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = DrilldownFilters {
            exclude_employees: Some(true),
            regions: Some(vec!["SUL".into()]),
            search_term: Some("abc".into()),
            ..Default::default()
        };
        let overrides = DrilldownFilters {
            regions: Some(vec!["NORTE".into()]),
            date_range: Some(DateRangeInput::new("2024-01-01", "2024-01-31")),
            ..Default::default()
        };
        let merged = DrilldownFilters::merge(&defaults, &overrides);
        assert_eq!(merged.regions, Some(vec!["NORTE".to_string()]));
        assert_eq!(merged.exclude_employees, Some(true));
        assert_eq!(merged.search_term.as_deref(), Some("abc"));
        assert!(merged.date_range.is_some());
    }

    #[test]
    fn test_active_count() {
        let filters = DrilldownFilters {
            exclude_employees: Some(true),
            sellers: Some(vec!["V1".into()]),
            clients: Some(vec![]),
            search_term: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(filters.active_count(), 2);
    }
}
