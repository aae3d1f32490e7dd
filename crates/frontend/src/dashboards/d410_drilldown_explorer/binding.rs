//! Привязка к удалённому RPC агрегации: `{data, loading, error}`.
//!
//! Каждый запрос получает возрастающий номер (ticket). Ответ применяется,
//! только если его ticket совпадает с последним выданным; поздние ответы
//! устаревших запросов молча отбрасываются.

use std::sync::Arc;

use contracts::dashboards::d410_drilldown::{AggregationRow, QueryParameters};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::RpcClient;
use super::error::DrilldownError;

/// Ключ запроса: имя RPC + параметры
#[derive(Debug, Clone, PartialEq)]
pub struct BindingKey {
    pub endpoint: String,
    pub params: QueryParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BindingPhase {
    /// Запрос не разрешён (нет периода)
    #[default]
    Idle,
    Loading,
    Success(Arc<Vec<AggregationRow>>),
    Failure(DrilldownError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteBinding {
    seq: u64,
    in_flight: Option<RequestTicket>,
    key: Option<BindingKey>,
    phase: BindingPhase,
}

impl RemoteBinding {
    /// Регистрирует новый ключ. Возвращает ticket, если нужно выполнить запрос.
    ///
    /// `enabled = false` переводит привязку в `Idle` и делает текущий
    /// запрос устаревшим.
    pub fn request(&mut self, key: BindingKey, enabled: bool) -> Option<RequestTicket> {
        if !enabled {
            self.key = None;
            self.in_flight = None;
            self.phase = BindingPhase::Idle;
            return None;
        }
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key);
        Some(self.issue())
    }

    /// Повтор последнего запроса по явному действию пользователя
    pub fn retry(&mut self) -> Option<(RequestTicket, BindingKey)> {
        let key = self.key.clone()?;
        Some((self.issue(), key))
    }

    fn issue(&mut self) -> RequestTicket {
        self.seq += 1;
        let ticket = RequestTicket(self.seq);
        self.in_flight = Some(ticket);
        self.phase = BindingPhase::Loading;
        ticket
    }

    /// Применяет ответ. `false`: ответ устарел и отброшен.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<AggregationRow>, DrilldownError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        self.phase = match result {
            Ok(rows) => BindingPhase::Success(Arc::new(rows)),
            Err(e) => BindingPhase::Failure(e),
        };
        true
    }

    pub fn phase(&self) -> &BindingPhase {
        &self.phase
    }

    pub fn data(&self) -> Option<Arc<Vec<AggregationRow>>> {
        match &self.phase {
            BindingPhase::Success(rows) => Some(Arc::clone(rows)),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, BindingPhase::Loading)
    }

    pub fn error(&self) -> Option<&DrilldownError> {
        match &self.phase {
            BindingPhase::Failure(e) => Some(e),
            _ => None,
        }
    }
}

/// Выполняет запрос в фоне и применяет ответ к привязке
pub fn spawn_request(
    binding: RwSignal<RemoteBinding>,
    client: RpcClient,
    ticket: RequestTicket,
    key: BindingKey,
) {
    log::debug!(
        "rpc {} issued (#{}) level={} parents={:?}",
        key.endpoint,
        ticket.0,
        key.params.p_drilldown_level,
        key.params.p_parent_keys
    );
    spawn_local(async move {
        let result = client.call_rpc(&key.endpoint, &key.params).await;
        if let Err(e) = &result {
            log::error!("rpc {} failed: {}", key.endpoint, e);
        }
        let applied = binding
            .try_update(|b| b.resolve(ticket, result))
            .unwrap_or(false);
        if !applied {
            log::debug!("rpc {} response #{} discarded as stale", key.endpoint, ticket.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d410_drilldown::{build_params, DateRangeInput, DrilldownFilters};
    use contracts::enums::AnalysisMode;

    fn key(parents: &[&str]) -> BindingKey {
        let filters = DrilldownFilters {
            date_range: Some(DateRangeInput::new("2024-01-01", "2024-01-31")),
            ..Default::default()
        };
        let parents: Vec<String> = parents.iter().map(|s| s.to_string()).collect();
        BindingKey {
            endpoint: "get_drilldown_data".into(),
            params: build_params(&filters, AnalysisMode::Supervisor, parents.len() + 1, &parents),
        }
    }

    fn rows(name: &str) -> Vec<AggregationRow> {
        vec![AggregationRow {
            name: Some(name.into()),
            value: 1.0,
            ..Default::default()
        }]
    }

    #[test]
    fn test_disabled_stays_idle() {
        let mut binding = RemoteBinding::default();
        assert_eq!(binding.request(key(&[]), false), None);
        assert_eq!(binding.phase(), &BindingPhase::Idle);
        assert!(!binding.loading());
        assert!(binding.data().is_none());
    }

    #[test]
    fn test_success_flow() {
        let mut binding = RemoteBinding::default();
        let t = binding.request(key(&[]), true).unwrap();
        assert!(binding.loading());
        assert!(binding.resolve(t, Ok(rows("A"))));
        assert_eq!(binding.data().unwrap().as_slice(), rows("A").as_slice());
        assert!(binding.error().is_none());
    }

    #[test]
    fn test_same_key_does_not_refetch() {
        let mut binding = RemoteBinding::default();
        assert!(binding.request(key(&[]), true).is_some());
        assert!(binding.request(key(&[]), true).is_none());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut binding = RemoteBinding::default();
        let f1 = binding.request(key(&[]), true).unwrap();
        let f2 = binding.request(key(&["S01"]), true).unwrap();

        assert!(binding.resolve(f2, Ok(rows("F2"))));
        assert!(!binding.resolve(f1, Ok(rows("F1"))));
        assert_eq!(binding.data().unwrap().as_slice(), rows("F2").as_slice());
    }

    #[test]
    fn test_stale_response_discarded_while_newer_in_flight() {
        let mut binding = RemoteBinding::default();
        let f1 = binding.request(key(&[]), true).unwrap();
        let f2 = binding.request(key(&["S01"]), true).unwrap();

        assert!(!binding.resolve(f1, Err(DrilldownError::Remote("old".into()))));
        assert!(binding.loading());
        assert!(binding.resolve(f2, Ok(rows("F2"))));
        assert!(binding.error().is_none());
    }

    #[test]
    fn test_failure_and_retry() {
        let mut binding = RemoteBinding::default();
        let t = binding.request(key(&[]), true).unwrap();
        binding.resolve(t, Err(DrilldownError::Remote("timeout".into())));
        assert_eq!(binding.error().map(|e| e.to_string()).as_deref(), Some("timeout"));
        assert!(binding.data().is_none());

        let (t2, k) = binding.retry().unwrap();
        assert_eq!(k, key(&[]));
        assert!(binding.loading());
        assert!(binding.resolve(t2, Ok(rows("A"))));
    }

    #[test]
    fn test_disable_invalidates_in_flight() {
        let mut binding = RemoteBinding::default();
        let t = binding.request(key(&[]), true).unwrap();
        binding.request(key(&[]), false);
        assert!(!binding.resolve(t, Ok(rows("A"))));
        assert_eq!(binding.phase(), &BindingPhase::Idle);
        // повторное включение с тем же ключом снова запрашивает
        assert!(binding.request(key(&[]), true).is_some());
    }
}
