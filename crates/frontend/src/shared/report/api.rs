//! Requests shared by every report module
use crate::shared::api_utils::{get_json, get_with_params};
use crate::shared::error::RequestError;
use crate::shared::report::config::ReportEndpoints;
use contracts::reports::relatorio::{
    ExportacaoResponse, ExportarRelatorioParams, GerarRelatorioParams, RelatorioResponse,
};
use contracts::shared::filters::FiltrosResponse;

/// Years, UGs and server defaults for the filter form
pub async fn fetch_filtros(endpoints: &ReportEndpoints) -> Result<FiltrosResponse, RequestError> {
    get_json(endpoints.filtros).await
}

pub async fn gerar_relatorio(
    endpoints: &ReportEndpoints,
    params: &GerarRelatorioParams,
) -> Result<RelatorioResponse, RequestError> {
    get_with_params(endpoints.gerar, params).await
}

/// Full, uncapped rows for the spreadsheet export
pub async fn exportar_relatorio(
    endpoints: &ReportEndpoints,
    params: &ExportarRelatorioParams,
) -> Result<ExportacaoResponse, RequestError> {
    get_with_params(endpoints.exportar, params).await
}
