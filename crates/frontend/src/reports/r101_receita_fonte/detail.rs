//! Line-item drill-down of a fonte/alínea pair.
//!
//! [`DetailState`] is the modal's model: it only accepts the response of the
//! request it issued last, and forgets everything on close.

use crate::shared::config::LIMITE_LANCAMENTOS;
use crate::shared::error::RequestError;
use crate::shared::export::CsvExportable;
use crate::shared::format::{format_count, format_currency};
use crate::shared::list_utils::{filter_list, sort_list, Searchable, Sortable};
use crate::shared::utils::group_by;
use contracts::reports::r101_receita_fonte::dto::{DebitoCredito, Lancamento, LancamentosResponse};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Closed,
    Loading,
    Loaded,
    /// Shown as a single row in place of the table body
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSummary {
    pub total_debito: f64,
    pub total_credito: f64,
    pub saldo: f64,
    pub total_registros: u64,
}

#[derive(Debug, Clone)]
pub struct DetailState {
    status: DetailStatus,
    next_request: u64,
    pending: Option<DetailRequest>,
    cofonte: String,
    coalinea: String,
    summary: DetailSummary,
    lancamentos: Vec<Lancamento>,
    limitado: bool,
    search: String,
    sort_field: String,
    sort_ascending: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailState {
    pub fn new() -> Self {
        Self {
            status: DetailStatus::Closed,
            next_request: 0,
            pending: None,
            cofonte: String::new(),
            coalinea: String::new(),
            summary: DetailSummary::default(),
            lancamentos: Vec::new(),
            limitado: false,
            search: String::new(),
            sort_field: String::new(),
            sort_ascending: true,
        }
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.status != DetailStatus::Closed
    }

    pub fn pair(&self) -> (&str, &str) {
        (&self.cofonte, &self.coalinea)
    }

    pub fn summary(&self) -> &DetailSummary {
        &self.summary
    }

    /// Opens the modal for a pair, dropping whatever the previous one showed
    pub fn open(&mut self, cofonte: &str, coalinea: &str) -> DetailRequest {
        self.reset_data();
        self.cofonte = cofonte.to_string();
        self.coalinea = coalinea.to_string();
        self.status = DetailStatus::Loading;
        self.next_request += 1;
        let request = DetailRequest(self.next_request);
        self.pending = Some(request);
        request
    }

    /// Applies a response; returns `false` when it belongs to a closed or
    /// superseded request.
    pub fn apply(
        &mut self,
        request: DetailRequest,
        result: Result<LancamentosResponse, RequestError>,
    ) -> bool {
        if self.pending != Some(request) {
            log::debug!("ignoring stale line-item response {:?}", request);
            return false;
        }
        self.pending = None;

        match result {
            Ok(resp) => {
                self.summary = DetailSummary {
                    total_debito: resp.total_debito,
                    total_credito: resp.total_credito,
                    saldo: resp.saldo,
                    total_registros: resp.total_registros,
                };
                self.limitado = resp.limitado;
                self.lancamentos = resp.dados;
                self.status = DetailStatus::Loaded;
            }
            Err(err) => {
                log::error!(
                    "line items {}/{} failed: {}",
                    self.cofonte,
                    self.coalinea,
                    err
                );
                self.status = DetailStatus::Failed(err.to_string());
            }
        }
        true
    }

    pub fn close(&mut self) {
        self.reset_data();
        self.pending = None;
        self.cofonte.clear();
        self.coalinea.clear();
        self.status = DetailStatus::Closed;
    }

    fn reset_data(&mut self) {
        self.summary = DetailSummary::default();
        self.lancamentos = Vec::new();
        self.limitado = false;
        self.search.clear();
    }

    /// Banner text when the server capped the list
    pub fn truncation_notice(&self) -> Option<String> {
        self.limitado.then(|| {
            format!(
                "Exibindo os primeiros {} de {} lançamentos. Para a lista completa, utilize a exportação do relatório.",
                format_count(LIMITE_LANCAMENTOS as u64),
                format_count(self.summary.total_registros),
            )
        })
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    /// Clicking the sorted column flips the direction
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// Balance (credits minus debits) per UG of the visible line items
    pub fn saldo_por_ug(&self) -> Vec<(String, f64)> {
        group_by(self.visible_rows(), |l| format!("{} - {}", l.coug, l.noug))
            .into_iter()
            .map(|(ug, lancamentos)| {
                let saldo = lancamentos.iter().map(signed_valor).sum::<f64>();
                (ug, saldo)
            })
            .collect()
    }

    /// Line items after the search box and the column sort
    pub fn visible_rows(&self) -> Vec<Lancamento> {
        let mut rows = filter_list(self.lancamentos.clone(), &self.search);
        if !self.sort_field.is_empty() {
            sort_list(&mut rows, &self.sort_field, self.sort_ascending);
        }
        rows
    }
}

fn signed_valor(l: &Lancamento) -> f64 {
    match l.indebitocredito {
        DebitoCredito::Credito => l.valor,
        DebitoCredito::Debito => -l.valor,
    }
}

impl Searchable for Lancamento {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        [
            &self.cocontacontabil,
            &self.nocontacontabil,
            &self.coug,
            &self.noug,
            &self.nudocumento,
            &self.coevento,
            &self.noevento,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(filter_lower))
    }
}

impl Sortable for Lancamento {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "conta" => self.cocontacontabil.cmp(&other.cocontacontabil),
            "ug" => self.coug.cmp(&other.coug),
            "documento" => self.nudocumento.cmp(&other.nudocumento),
            "evento" => self.coevento.cmp(&other.coevento),
            "dc" => self
                .indebitocredito
                .label()
                .cmp(other.indebitocredito.label()),
            "valor" => self.valor.total_cmp(&other.valor),
            _ => Ordering::Equal,
        }
    }
}

impl CsvExportable for Lancamento {
    fn headers() -> Vec<&'static str> {
        vec![
            "Conta Contábil",
            "Descrição da Conta",
            "UG",
            "Nome da UG",
            "Documento",
            "Evento",
            "Descrição do Evento",
            "Grupo",
            "D/C",
            "Valor",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.cocontacontabil.clone(),
            self.nocontacontabil.clone(),
            self.coug.clone(),
            self.noug.clone(),
            self.nudocumento.clone(),
            self.coevento.clone(),
            self.noevento.clone(),
            self.cogrupo.clone(),
            self.indebitocredito.label().to_string(),
            format_currency(Some(self.valor)),
        ]
    }
}
