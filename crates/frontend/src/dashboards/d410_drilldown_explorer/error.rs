use thiserror::Error;

/// Ошибка загрузки агрегации; текст `Remote` показывается пользователю как есть
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrilldownError {
    #[error("Falha na requisição: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Remote(String),

    #[error("Resposta inválida: {0}")]
    Decode(String),
}

impl DrilldownError {
    /// Разбор тела ответа с ошибкой RPC: `{message}`, `{error}` или `{msg}`
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "error", "msg"]
                    .iter()
                    .find_map(|field| v.get(*field).and_then(|m| m.as_str()).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty());

        match message {
            Some(message) => DrilldownError::Remote(message),
            None => DrilldownError::Http { status },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_is_verbatim() {
        let err = DrilldownError::from_response(
            400,
            r#"{"code":"P0001","message":"function get_drilldown_data does not exist"}"#,
        );
        assert_eq!(err.to_string(), "function get_drilldown_data does not exist");
    }

    #[test]
    fn test_unparsable_body_falls_back_to_status() {
        let err = DrilldownError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err, DrilldownError::Http { status: 502 });
        assert_eq!(err.to_string(), "HTTP 502");
    }
}
