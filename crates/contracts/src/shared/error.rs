use serde::{Deserialize, Serialize};

/// Error body returned by the report backend on non-2xx responses.
///
/// Different endpoints use different field names, so all of them are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// First non-blank message, in the order `erro`, `error`, `message`, `detail`.
    pub fn message(&self) -> Option<&str> {
        [&self.erro, &self.error, &self.message, &self.detail]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}
