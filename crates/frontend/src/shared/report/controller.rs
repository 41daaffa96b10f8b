//! Report page state machine.
//!
//! ```text
//! Idle ──init──▶ LoadingFilters ──ok──▶ FiltersReady ──submit──▶ GeneratingReport ──ok──▶ ReportReady
//!                      │                     ▲                         │                      │
//!                      └──err──▶ Error       └────────────err──────────┘                      │
//! Idle ◀────────────────────────────────────────clear──────────────────────────────────────────┘
//! ```
//!
//! Every generation gets a [`RequestToken`]. Only the most recently issued
//! token may apply its result, so a slow response can never overwrite the
//! state produced by a newer submission.

use crate::shared::error::RequestError;
use crate::shared::report::filters::FilterSelection;
use crate::shared::report::integration::{IntegrationPanel, ReportIntegration};
use crate::shared::report::view_model::{filter_rows, RowFilter};
use contracts::reports::relatorio::{LinhaRelatorio, RelatorioResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingFilters,
    FiltersReady,
    GeneratingReport,
    ReportReady,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Outcome of [`ReportController::complete_generation`]
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The response is now the displayed report
    Applied,
    /// Superseded or cleared while in flight; the result was dropped
    Stale,
    Failed(String),
}

#[derive(Debug, Clone)]
struct InFlight {
    token: RequestToken,
    selection: FilterSelection,
}

pub struct ReportController {
    phase: Phase,
    next_token: u64,
    in_flight: Option<InFlight>,
    report: Option<RelatorioResponse>,
    /// Selection the displayed report was generated from
    applied_selection: Option<FilterSelection>,
    /// Untouched copy of the server rows; client-side filters start from here
    baseline: Vec<LinhaRelatorio>,
    visible: Vec<LinhaRelatorio>,
    row_filter: RowFilter,
    last_error: Option<String>,
    integrations: Vec<Box<dyn ReportIntegration>>,
}

impl Default for ReportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            next_token: 0,
            in_flight: None,
            report: None,
            applied_selection: None,
            baseline: Vec::new(),
            visible: Vec::new(),
            row_filter: RowFilter::default(),
            last_error: None,
            integrations: Vec::new(),
        }
    }

    pub fn with_integration(mut self, integration: Box<dyn ReportIntegration>) -> Self {
        self.integrations.push(integration);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_generating(&self) -> bool {
        self.phase == Phase::GeneratingReport
    }

    pub fn report(&self) -> Option<&RelatorioResponse> {
        self.report.as_ref()
    }

    /// Selection behind [`Self::report`]; a failed or superseded submission
    /// never changes it
    pub fn applied_selection(&self) -> Option<&FilterSelection> {
        self.applied_selection.as_ref()
    }

    pub fn baseline(&self) -> &[LinhaRelatorio] {
        &self.baseline
    }

    pub fn visible_rows(&self) -> &[LinhaRelatorio] {
        &self.visible
    }

    pub fn row_filter(&self) -> &RowFilter {
        &self.row_filter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn panels(&self) -> Vec<IntegrationPanel> {
        self.integrations.iter().filter_map(|i| i.panel()).collect()
    }

    pub fn begin_loading_filters(&mut self) {
        self.phase = Phase::LoadingFilters;
        self.last_error = None;
    }

    pub fn filters_loaded(&mut self) {
        if self.phase == Phase::LoadingFilters {
            self.phase = Phase::FiltersReady;
        }
    }

    pub fn filters_failed(&mut self, err: &RequestError) {
        log::error!("filters request failed: {}", err);
        self.phase = Phase::Error;
        self.last_error = Some(err.to_string());
    }

    /// Starts a generation for `selection`.
    ///
    /// Returns `None` while filters are still loading, or when the same
    /// selection is already in flight (repeated click). A different selection
    /// supersedes the in-flight request.
    pub fn begin_generation(&mut self, selection: &FilterSelection) -> Option<RequestToken> {
        if self.phase == Phase::LoadingFilters {
            return None;
        }
        if let Some(in_flight) = &self.in_flight {
            if &in_flight.selection == selection {
                log::debug!("duplicate report submission dropped");
                return None;
            }
            log::debug!("superseding in-flight report request {:?}", in_flight.token);
        }

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight = Some(InFlight {
            token,
            selection: selection.clone(),
        });
        self.phase = Phase::GeneratingReport;
        self.last_error = None;
        Some(token)
    }

    pub fn complete_generation(
        &mut self,
        token: RequestToken,
        result: Result<RelatorioResponse, RequestError>,
    ) -> Completion {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.token == token => in_flight,
            other => {
                self.in_flight = other;
                log::debug!("ignoring stale report response {:?}", token);
                return Completion::Stale;
            }
        };

        match result {
            Ok(report) => {
                self.applied_selection = Some(in_flight.selection);
                self.baseline = report.dados.clone();
                self.visible = filter_rows(&self.baseline, &self.row_filter);
                for integration in &mut self.integrations {
                    integration.integrate(&report);
                }
                self.report = Some(report);
                self.phase = Phase::ReportReady;
                Completion::Applied
            }
            Err(err) => {
                let message = err.to_string();
                self.last_error = Some(message.clone());
                self.phase = Phase::FiltersReady;
                Completion::Failed(message)
            }
        }
    }

    /// Re-filters the visible rows from the pristine baseline
    pub fn apply_row_filter(&mut self, filter: RowFilter) {
        self.visible = filter_rows(&self.baseline, &filter);
        self.row_filter = filter;
    }

    /// Drops the report and everything derived from it
    pub fn clear(&mut self) {
        for integration in &mut self.integrations {
            integration.destroy();
        }
        self.in_flight = None;
        self.report = None;
        self.applied_selection = None;
        self.baseline.clear();
        self.visible.clear();
        self.row_filter = RowFilter::default();
        self.last_error = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report::integration::VariationHighlights;
    use contracts::reports::relatorio::LinhaRelatorio;

    fn selection(ano: i32, mes: u32) -> FilterSelection {
        FilterSelection {
            tipo: None,
            ano: Some(ano),
            mes: Some(mes),
            coug: None,
        }
    }

    fn line(nivel: u8, descricao: &str, variacao: f64) -> LinhaRelatorio {
        LinhaRelatorio {
            nivel,
            codigo: String::new(),
            descricao: descricao.to_string(),
            cofonte: None,
            coalinea: None,
            coug: None,
            previsao_inicial: None,
            previsao_atualizada: None,
            receita_atual: Some(100.0),
            receita_anterior: Some(100.0 - variacao),
            variacao_absoluta: Some(variacao),
            variacao_percentual: None,
        }
    }

    fn report(label: &str) -> RelatorioResponse {
        RelatorioResponse {
            dados: vec![line(0, "TOTAL", 10.0), line(1, label, 10.0)],
            tem_dados: true,
            periodo: None,
            tipo: None,
        }
    }

    fn ready_controller() -> ReportController {
        let mut ctrl = ReportController::new();
        ctrl.begin_loading_filters();
        ctrl.filters_loaded();
        ctrl
    }

    #[test]
    fn test_happy_path() {
        let mut ctrl = ReportController::new();
        assert_eq!(ctrl.phase(), Phase::Idle);
        ctrl.begin_loading_filters();
        assert_eq!(ctrl.phase(), Phase::LoadingFilters);
        assert!(ctrl.begin_generation(&selection(2024, 6)).is_none());
        ctrl.filters_loaded();
        assert_eq!(ctrl.phase(), Phase::FiltersReady);

        let token = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        assert!(ctrl.is_generating());
        assert_eq!(ctrl.complete_generation(token, Ok(report("Correntes"))), Completion::Applied);
        assert_eq!(ctrl.phase(), Phase::ReportReady);
        assert_eq!(ctrl.visible_rows().len(), 2);
        assert_eq!(ctrl.baseline().len(), 2);
    }

    #[test]
    fn test_filters_failure_moves_to_error() {
        let mut ctrl = ReportController::new();
        ctrl.begin_loading_filters();
        ctrl.filters_failed(&RequestError::Network("offline".to_string()));
        assert_eq!(ctrl.phase(), Phase::Error);
        assert!(ctrl.last_error().unwrap().contains("offline"));
    }

    #[test]
    fn test_duplicate_submission_is_dropped() {
        let mut ctrl = ready_controller();
        assert!(ctrl.begin_generation(&selection(2024, 6)).is_some());
        assert!(ctrl.begin_generation(&selection(2024, 6)).is_none());
    }

    #[test]
    fn test_out_of_order_response_does_not_clobber_newer_state() {
        let mut ctrl = ready_controller();
        let slow = ctrl.begin_generation(&selection(2023, 12)).unwrap();
        let fast = ctrl.begin_generation(&selection(2024, 6)).unwrap();

        assert_eq!(ctrl.complete_generation(fast, Ok(report("2024"))), Completion::Applied);
        assert_eq!(ctrl.complete_generation(slow, Ok(report("2023"))), Completion::Stale);

        assert_eq!(ctrl.visible_rows()[1].descricao, "2024");
        assert_eq!(ctrl.phase(), Phase::ReportReady);
    }

    #[test]
    fn test_failure_returns_to_filters_ready_with_server_message() {
        let mut ctrl = ready_controller();
        let mut invalid = selection(2024, 6);
        invalid.mes = Some(13);
        let token = ctrl.begin_generation(&invalid).unwrap();
        let err = RequestError::from_response(400, r#"{"erro": "Mês deve estar entre 1 e 12"}"#);
        assert_eq!(
            ctrl.complete_generation(token, Err(err)),
            Completion::Failed("Mês deve estar entre 1 e 12".to_string())
        );
        assert_eq!(ctrl.phase(), Phase::FiltersReady);
        assert!(!ctrl.is_generating());
        // a new attempt is possible right away
        assert!(ctrl.begin_generation(&invalid).is_some());
    }

    #[test]
    fn test_failed_generation_keeps_applied_selection() {
        let mut ctrl = ready_controller();
        let token = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        ctrl.complete_generation(token, Ok(report("2024")));
        assert_eq!(ctrl.applied_selection(), Some(&selection(2024, 6)));

        let token = ctrl.begin_generation(&selection(2023, 12)).unwrap();
        // still the selection of the table on screen while the request runs
        assert_eq!(ctrl.applied_selection(), Some(&selection(2024, 6)));
        let err = RequestError::from_response(500, r#"{"erro": "Falha ao consultar"}"#);
        assert!(matches!(ctrl.complete_generation(token, Err(err)), Completion::Failed(_)));

        assert_eq!(ctrl.visible_rows()[1].descricao, "2024");
        assert_eq!(ctrl.applied_selection(), Some(&selection(2024, 6)));
    }

    #[test]
    fn test_stale_response_keeps_in_flight_request() {
        let mut ctrl = ready_controller();
        let slow = ctrl.begin_generation(&selection(2023, 12)).unwrap();
        let fast = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        assert_eq!(ctrl.complete_generation(slow, Ok(report("2023"))), Completion::Stale);
        assert!(ctrl.is_generating());
        assert!(ctrl.applied_selection().is_none());

        assert_eq!(ctrl.complete_generation(fast, Ok(report("2024"))), Completion::Applied);
        assert_eq!(ctrl.applied_selection(), Some(&selection(2024, 6)));
    }

    #[test]
    fn test_row_filter_starts_from_baseline() {
        let mut ctrl = ready_controller();
        let token = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        ctrl.complete_generation(token, Ok(report("Correntes")));

        ctrl.apply_row_filter(RowFilter {
            texto: String::new(),
            nivel_maximo: 0,
        });
        assert_eq!(ctrl.visible_rows().len(), 1);
        ctrl.apply_row_filter(RowFilter::default());
        assert_eq!(ctrl.visible_rows().len(), 2);
        assert_eq!(ctrl.baseline().len(), 2);
    }

    #[test]
    fn test_row_filter_survives_new_report() {
        let mut ctrl = ready_controller();
        ctrl.apply_row_filter(RowFilter {
            texto: String::new(),
            nivel_maximo: 0,
        });
        let token = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        ctrl.complete_generation(token, Ok(report("Correntes")));
        assert_eq!(ctrl.visible_rows().len(), 1);
    }

    #[test]
    fn test_clear_destroys_integrations_and_ignores_late_response() {
        let mut ctrl =
            ready_controller().with_integration(Box::new(VariationHighlights::new(1, 3)));
        let token = ctrl.begin_generation(&selection(2024, 6)).unwrap();
        ctrl.complete_generation(token, Ok(report("Correntes")));
        assert_eq!(ctrl.panels().len(), 1);

        let late = ctrl.begin_generation(&selection(2024, 5)).unwrap();
        ctrl.clear();
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(ctrl.report().is_none());
        assert!(ctrl.applied_selection().is_none());
        assert!(ctrl.panels().is_empty());
        assert_eq!(ctrl.complete_generation(late, Ok(report("tarde"))), Completion::Stale);
        assert!(ctrl.visible_rows().is_empty());
    }
}
