use super::config::DETALHES_LANCAMENTOS_URL;
use crate::shared::api_utils::get_with_params;
use crate::shared::error::RequestError;
use contracts::reports::r101_receita_fonte::dto::{DetalhesLancamentosParams, LancamentosResponse};

/// Ledger entries behind one fonte/alínea pair; the server caps the list
pub async fn detalhes_lancamentos(
    params: &DetalhesLancamentosParams,
) -> Result<LancamentosResponse, RequestError> {
    get_with_params(DETALHES_LANCAMENTOS_URL, params).await
}
