use contracts::dashboards::d410_drilldown::{decode_rows, AggregationRow, QueryParameters};
use gloo_net::http::Request;

use super::error::DrilldownError;
use crate::shared::api_utils::{api_base, rpc_url};
use crate::shared::config::RemoteConfig;

/// Клиент RPC-функций BaaS (`POST {base}{rpc_prefix}/{endpoint}`)
#[derive(Debug, Clone, PartialEq)]
pub struct RpcClient {
    base: String,
    rpc_prefix: String,
    api_key: String,
}

impl RpcClient {
    pub fn new(remote: &RemoteConfig) -> Self {
        Self {
            base: api_base(remote),
            rpc_prefix: remote.rpc_prefix.clone(),
            api_key: remote.api_key.clone(),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        rpc_url(&self.base, &self.rpc_prefix, endpoint)
    }

    /// Вызвать функцию агрегации и разобрать строки ответа
    pub async fn call_rpc(
        &self,
        endpoint: &str,
        params: &QueryParameters,
    ) -> Result<Vec<AggregationRow>, DrilldownError> {
        let url = self.endpoint_url(endpoint);

        let mut builder = Request::post(&url).header("Accept", "application/json");
        if !self.api_key.is_empty() {
            builder = builder
                .header("apikey", &self.api_key)
                .header("Authorization", &format!("Bearer {}", self.api_key));
        }

        let response = builder
            .json(params)
            .map_err(|e| DrilldownError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| DrilldownError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DrilldownError::from_response(status, &body));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DrilldownError::Decode(e.to_string()))?;

        Ok(decode_rows(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_from_config() {
        let client = RpcClient::new(&RemoteConfig {
            base_url: "https://xyz.supabase.co".into(),
            rpc_prefix: "/rest/v1/rpc".into(),
            api_key: "anon".into(),
        });
        assert_eq!(
            client.endpoint_url("get_drilldown_data"),
            "https://xyz.supabase.co/rest/v1/rpc/get_drilldown_data"
        );
    }
}
