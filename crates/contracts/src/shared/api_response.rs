use serde::{Deserialize, Serialize};

/// Конверт ответа сервера: `{ "success": bool, "data": ..., "error": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Текст ошибки для логов, если сервер его не прислал
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "server responded with success = false".to_string())
    }
}
