use serde::{Deserialize, Serialize};

use super::filters::{to_api_date, DrilldownFilters};
use crate::enums::analysis_mode::AnalysisMode;

/// Параметры вызова RPC агрегации (имена полей совпадают с аргументами функции)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Начало периода (YYYY-MM-DD)
    pub p_start_date: Option<String>,
    /// Конец периода (YYYY-MM-DD)
    pub p_end_date: Option<String>,
    pub p_analysis_type: AnalysisMode,
    pub p_exclude_employees: bool,
    pub p_supervisors: Option<Vec<String>>,
    pub p_sellers: Option<Vec<String>>,
    pub p_customer_groups: Option<Vec<String>>,
    pub p_regions: Option<Vec<String>>,
    pub p_clients: Option<Vec<String>>,
    pub p_search_term: Option<String>,
    /// Текущий уровень drill-down (1-based)
    pub p_drilldown_level: u32,
    /// Ключи выбранных узлов от корня; `None` для корневого запроса, никогда `[]`
    pub p_parent_keys: Option<Vec<String>>,
}

impl QueryParameters {
    /// Запрос имеет смысл отправлять только при заданной дате начала
    pub fn is_ready(&self) -> bool {
        self.p_start_date.is_some()
    }
}

/// Собирает параметры запроса из фильтров и состояния навигации.
///
/// Фильтры измерений и строка поиска передаются без изменений.
pub fn build_params(
    filters: &DrilldownFilters,
    mode: AnalysisMode,
    level: usize,
    parent_keys: &[String],
) -> QueryParameters {
    let (from, to) = filters
        .date_range
        .as_ref()
        .map(|r| r.bounds())
        .unwrap_or((None, None));

    QueryParameters {
        p_start_date: from.and_then(to_api_date),
        p_end_date: to.and_then(to_api_date),
        p_analysis_type: mode,
        p_exclude_employees: filters.exclude_employees.unwrap_or(false),
        p_supervisors: filters.supervisors.clone(),
        p_sellers: filters.sellers.clone(),
        p_customer_groups: filters.customer_groups.clone(),
        p_regions: filters.regions.clone(),
        p_clients: filters.clients.clone(),
        p_search_term: filters.search_term.clone(),
        p_drilldown_level: u32::try_from(level).unwrap_or(u32::MAX),
        p_parent_keys: if parent_keys.is_empty() {
            None
        } else {
            Some(parent_keys.to_vec())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_drilldown::filters::DateRangeInput;

    fn january() -> DrilldownFilters {
        DrilldownFilters {
            date_range: Some(DateRangeInput::Pair(
                Some("2024-01-01T00:00:00.000Z".into()),
                Some("2024-01-31".into()),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn test_root_query_uses_null_parent_keys() {
        let params = build_params(&january(), AnalysisMode::Supervisor, 1, &[]);
        assert_eq!(params.p_parent_keys, None);
        let json = serde_json::to_value(&params).unwrap();
        assert!(json["p_parent_keys"].is_null());
    }

    #[test]
    fn test_parent_keys_preserve_order() {
        let keys = vec!["R1".to_string(), "S01".to_string()];
        let params = build_params(&january(), AnalysisMode::Region, 3, &keys);
        assert_eq!(params.p_parent_keys, Some(keys));
        assert_eq!(params.p_drilldown_level, 3);
    }

    #[test]
    fn test_dates_normalized_to_calendar_date() {
        let params = build_params(&january(), AnalysisMode::Supervisor, 1, &[]);
        assert_eq!(params.p_start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(params.p_end_date.as_deref(), Some("2024-01-31"));
        assert!(params.is_ready());
    }

    #[test]
    fn test_missing_date_range_is_not_ready() {
        let params = build_params(&DrilldownFilters::default(), AnalysisMode::Seller, 1, &[]);
        assert_eq!(params.p_start_date, None);
        assert!(!params.is_ready());
        assert!(!params.p_exclude_employees);
    }

    #[test]
    fn test_filters_pass_through_unchanged() {
        let filters = DrilldownFilters {
            supervisors: Some(vec![" S01 ".into()]),
            clients: Some(vec![]),
            search_term: Some("  Mercado ".into()),
            exclude_employees: Some(true),
            ..january()
        };
        let params = build_params(&filters, AnalysisMode::Supervisor, 1, &[]);
        assert_eq!(params.p_supervisors, Some(vec![" S01 ".to_string()]));
        assert_eq!(params.p_clients, Some(vec![]));
        assert_eq!(params.p_search_term.as_deref(), Some("  Mercado "));
        assert!(params.p_exclude_employees);
    }

    #[test]
    fn test_identical_inputs_yield_equal_params() {
        let a = build_params(&january(), AnalysisMode::Supervisor, 2, &["S01".into()]);
        let b = build_params(&january(), AnalysisMode::Supervisor, 2, &["S01".into()]);
        assert_eq!(a, b);
    }
}
