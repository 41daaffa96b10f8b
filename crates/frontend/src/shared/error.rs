//! Error taxonomy of the report pages.
//!
//! Errors are caught at the page boundary and turned into alert banners;
//! nothing here is retried.

use crate::shared::config::{MSG_ERRO_GENERICO, MSG_FILTROS_OBRIGATORIOS};
use contracts::shared::error::ApiErrorBody;
use thiserror::Error;

/// Failure of a single outbound request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The request never produced a response (offline, CORS, aborted)
    #[error("Falha de comunicação com o servidor: {0}")]
    Network(String),
    /// Non-2xx response; `message` comes from the server when it sent one
    #[error("{message}")]
    Http { status: u16, message: String },
    /// 2xx response whose body did not match the expected shape
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

impl RequestError {
    /// Builds the error for a non-2xx response from its raw body.
    ///
    /// The server's own message is kept verbatim so it can be shown to the user.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message().map(str::to_string))
            .unwrap_or_else(|| format!("{} (HTTP {})", MSG_ERRO_GENERICO, status));
        RequestError::Http { status, message }
    }
}

/// Missing required filter before a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", MSG_FILTROS_OBRIGATORIOS)]
    AnoObrigatorio,
    #[error("{}", MSG_FILTROS_OBRIGATORIOS)]
    MesObrigatorio,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unexpected or missing data while building the view or an export
    #[error("Erro ao montar a visualização: {0}")]
    Render(String),
}
