use contracts::dashboards::d410_drilldown::{DateRangeInput, DrilldownFilters};
use contracts::enums::AnalysisMode;
use leptos::prelude::Effect;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::shared::config::{load_config, Config};
use crate::shared::date_utils::month_range;

/// Глобальные фильтры приложения (внешний провайдер для explorer)
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub filters: RwSignal<DrilldownFilters>,
    pub analysis_mode: RwSignal<AnalysisMode>,
    pub config: StoredValue<Config>,
}

/// Состояние, отражаемое в query string (`?mode=region`)
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct UrlState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let config = load_config().unwrap_or_else(|e| {
            log::warn!("Config fallback to defaults: {}", e);
            Config::default()
        });
        let (from, to) = month_range(chrono::Local::now().date_naive());

        Self {
            filters: RwSignal::new(DrilldownFilters {
                date_range: Some(DateRangeInput::new(from, to)),
                ..Default::default()
            }),
            analysis_mode: RwSignal::new(AnalysisMode::default()),
            config: StoredValue::new(config),
        }
    }

    pub fn update_filters(&self, f: impl FnOnce(&mut DrilldownFilters)) {
        self.filters.update(f);
    }

    /// Синхронизация `analysis_mode` с адресной строкой
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let state = parse_url_state(&search);
        if let Some(mode) = state.mode.as_deref().and_then(AnalysisMode::from_code) {
            self.analysis_mode.set(mode);
        }

        let this = *self;
        Effect::new(move |_| {
            let mode = this.analysis_mode.get();
            let new_url = url_for_mode(mode);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_url_state(search: &str) -> UrlState {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

fn url_for_mode(mode: AnalysisMode) -> String {
    let state = UrlState {
        mode: Some(mode.code().to_string()),
    };
    format!("?{}", serde_qs::to_string(&state).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_state_roundtrip_mode() {
        assert_eq!(url_for_mode(AnalysisMode::Region), "?mode=region");
        let state = parse_url_state("?mode=customer_group");
        assert_eq!(state.mode.as_deref(), Some("customer_group"));
    }

    #[test]
    fn test_url_state_ignores_garbage() {
        assert_eq!(parse_url_state(""), UrlState::default());
        let state = parse_url_state("?mode=unknown");
        assert!(state.mode.as_deref().and_then(AnalysisMode::from_code).is_none());
    }
}
