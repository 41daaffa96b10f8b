//! Filter form state of a report page: year, month, UG and report type.
//!
//! The controller is plain data so the page can keep it in a signal and the
//! tests can drive it without a browser.

use crate::shared::config::MESES;
use crate::shared::error::ValidationError;
use crate::shared::storage::SelectionStore;
use contracts::reports::relatorio::{GerarRelatorioParams, TipoRelatorio};
use contracts::shared::filters::{FiltrosResponse, UnidadeGestora};
use serde::{Deserialize, Serialize};

/// Current values of the filter form, persisted as a flat record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub tipo: Option<TipoRelatorio>,
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub mes: Option<u32>,
    #[serde(default)]
    pub coug: Option<String>,
}

/// How a report module treats the report type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoPolicy {
    /// The module has no report type (Balanço Receita)
    NotUsed,
    /// Missing type falls back to the given value (Receita/Fonte)
    DefaultTo(TipoRelatorio),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub value: u32,
    pub label: &'static str,
}

/// A selection that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFilters {
    pub tipo: Option<TipoRelatorio>,
    pub ano: i32,
    pub mes: u32,
    pub coug: Option<String>,
}

impl ValidFilters {
    pub fn to_params(&self) -> GerarRelatorioParams {
        GerarRelatorioParams {
            tipo: self.tipo,
            ano: self.ano,
            mes: self.mes,
            coug: self.coug.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FiltersController {
    storage_key: &'static str,
    tipo_policy: TipoPolicy,
    anos: Vec<i32>,
    ugs: Vec<UnidadeGestora>,
    ano_atual: Option<i32>,
    ultimo_mes: Option<u32>,
    selection: FilterSelection,
    restored: bool,
}

impl FiltersController {
    pub fn new(storage_key: &'static str, tipo_policy: TipoPolicy) -> Self {
        let selection = FilterSelection {
            tipo: Self::default_tipo(tipo_policy),
            ..FilterSelection::default()
        };
        Self {
            storage_key,
            tipo_policy,
            anos: Vec::new(),
            ugs: Vec::new(),
            ano_atual: None,
            ultimo_mes: None,
            selection,
            restored: false,
        }
    }

    fn default_tipo(policy: TipoPolicy) -> Option<TipoRelatorio> {
        match policy {
            TipoPolicy::NotUsed => None,
            TipoPolicy::DefaultTo(tipo) => Some(tipo),
        }
    }

    /// Fills the selects from the filters payload and selects the server defaults
    pub fn populate(&mut self, filtros: &FiltrosResponse) {
        self.anos = filtros.anos.clone();
        if let Some(ano) = filtros.ano_atual {
            if !self.anos.contains(&ano) {
                self.anos.insert(0, ano);
            }
        }
        self.ugs = filtros.ugs.clone();
        self.ano_atual = filtros.ano_atual;
        self.ultimo_mes = filtros.ultimo_mes;
        self.restored = false;
        self.selection = self.default_selection();
    }

    fn default_selection(&self) -> FilterSelection {
        FilterSelection {
            tipo: Self::default_tipo(self.tipo_policy),
            ano: self.ano_atual.or_else(|| self.anos.first().copied()),
            mes: if self.ano_atual.is_some() {
                self.ultimo_mes
            } else {
                None
            },
            coug: None,
        }
    }

    pub fn anos(&self) -> &[i32] {
        &self.anos
    }

    pub fn ugs(&self) -> &[UnidadeGestora] {
        &self.ugs
    }

    pub fn tipo_policy(&self) -> TipoPolicy {
        self.tipo_policy
    }

    /// Month options; always the 12 months of the year
    pub fn meses(&self) -> Vec<MonthOption> {
        MESES
            .iter()
            .enumerate()
            .map(|(i, label)| MonthOption {
                value: i as u32 + 1,
                label,
            })
            .collect()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Year change cascades into the month select: the current year jumps to
    /// the latest closed month, other years to December.
    pub fn select_year(&mut self, ano: Option<i32>) {
        self.selection.ano = ano;
        self.selection.mes = match ano {
            None => None,
            Some(ano) if Some(ano) == self.ano_atual => self.ultimo_mes.or(Some(12)),
            Some(_) => Some(12),
        };
    }

    pub fn select_month(&mut self, mes: Option<u32>) {
        self.selection.mes = mes;
    }

    pub fn select_ug(&mut self, coug: Option<String>) {
        self.selection.coug = coug.filter(|c| !c.trim().is_empty());
    }

    pub fn select_tipo(&mut self, tipo: Option<TipoRelatorio>) {
        self.selection.tipo = match self.tipo_policy {
            TipoPolicy::NotUsed => None,
            TipoPolicy::DefaultTo(default) => Some(tipo.unwrap_or(default)),
        };
    }

    /// Year and month are required; the month range is left to the server
    pub fn validate(&self) -> Result<ValidFilters, ValidationError> {
        validate_selection(&self.selection, self.tipo_policy)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn persist(&self, store: &dyn SelectionStore) {
        match serde_json::to_string(&self.selection) {
            Ok(raw) => store.save(self.storage_key, &raw),
            Err(e) => log::warn!("could not serialize filter selection: {}", e),
        }
    }

    /// Restores the last persisted selection verbatim, if any.
    ///
    /// Returns whether a selection was restored. A corrupt record is removed;
    /// an incomplete one (no year or month) leaves the server defaults in place.
    pub fn restore(&mut self, store: &dyn SelectionStore) -> bool {
        let Some(raw) = store.load(self.storage_key) else {
            return false;
        };
        match serde_json::from_str::<FilterSelection>(&raw) {
            Ok(selection) if validate_selection(&selection, self.tipo_policy).is_err() => {
                log::debug!("ignoring incomplete stored filters under {}", self.storage_key);
                false
            }
            Ok(selection) => {
                self.selection = selection;
                self.restored = true;
                true
            }
            Err(e) => {
                log::warn!("discarding stored filters under {}: {}", self.storage_key, e);
                store.remove(self.storage_key);
                false
            }
        }
    }

    /// Whether the page should generate the report right after loading filters
    pub fn should_auto_generate(&self) -> bool {
        if self.restored && self.is_valid() {
            return true;
        }
        self.ano_atual.is_some() && self.ultimo_mes.is_some()
    }

    /// Back to the server defaults; the persisted record is left alone
    pub fn clear(&mut self) {
        self.restored = false;
        self.selection = self.default_selection();
    }
}

/// Same check as [`FiltersController::validate`], for a bare selection
pub fn validate_selection(
    selection: &FilterSelection,
    policy: TipoPolicy,
) -> Result<ValidFilters, ValidationError> {
    let ano = selection.ano.ok_or(ValidationError::AnoObrigatorio)?;
    let mes = selection.mes.ok_or(ValidationError::MesObrigatorio)?;
    let tipo = match policy {
        TipoPolicy::NotUsed => None,
        TipoPolicy::DefaultTo(default) => Some(selection.tipo.unwrap_or(default)),
    };
    Ok(ValidFilters {
        tipo,
        ano,
        mes,
        coug: selection.coug.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    const KEY: &str = "test_filtros_v1";

    fn filtros() -> FiltrosResponse {
        FiltrosResponse {
            anos: vec![2024, 2023, 2022],
            ano_atual: Some(2024),
            ultimo_mes: Some(6),
            ugs: vec![UnidadeGestora {
                coug: "150101".to_string(),
                nome: "SEFAZ".to_string(),
            }],
        }
    }

    fn fonte_controller() -> FiltersController {
        FiltersController::new(KEY, TipoPolicy::DefaultTo(TipoRelatorio::Fonte))
    }

    #[test]
    fn test_populate_selects_latest_month() {
        let mut fc = fonte_controller();
        fc.populate(&filtros());
        assert_eq!(fc.meses().len(), 12);
        assert_eq!(fc.selection().ano, Some(2024));
        assert_eq!(fc.selection().mes, Some(6));
        assert_eq!(fc.selection().tipo, Some(TipoRelatorio::Fonte));
        assert_eq!(fc.ugs().len(), 1);
    }

    #[test]
    fn test_year_cascade() {
        let mut fc = fonte_controller();
        fc.populate(&filtros());
        fc.select_year(Some(2023));
        assert_eq!(fc.selection().mes, Some(12));
        fc.select_year(Some(2024));
        assert_eq!(fc.selection().mes, Some(6));
        fc.select_year(None);
        assert_eq!(fc.selection().mes, None);
    }

    #[test]
    fn test_validation_requires_year_and_month() {
        let policy = TipoPolicy::NotUsed;
        let mut selection = FilterSelection {
            ano: Some(2024),
            mes: Some(3),
            ..Default::default()
        };
        assert!(validate_selection(&selection, policy).is_ok());

        selection.mes = None;
        assert_eq!(
            validate_selection(&selection, policy),
            Err(ValidationError::MesObrigatorio)
        );

        selection.mes = Some(3);
        selection.ano = None;
        assert_eq!(
            validate_selection(&selection, policy),
            Err(ValidationError::AnoObrigatorio)
        );
    }

    #[test]
    fn test_month_range_is_not_checked() {
        let selection = FilterSelection {
            ano: Some(2024),
            mes: Some(13),
            ..Default::default()
        };
        let valid = validate_selection(&selection, TipoPolicy::NotUsed).unwrap();
        assert_eq!(valid.mes, 13);
    }

    #[test]
    fn test_tipo_defaults_and_not_used() {
        let selection = FilterSelection {
            ano: Some(2024),
            mes: Some(1),
            ..Default::default()
        };
        let valid =
            validate_selection(&selection, TipoPolicy::DefaultTo(TipoRelatorio::Fonte)).unwrap();
        assert_eq!(valid.tipo, Some(TipoRelatorio::Fonte));

        let mut fc = FiltersController::new(KEY, TipoPolicy::NotUsed);
        fc.select_tipo(Some(TipoRelatorio::Alinea));
        assert_eq!(fc.selection().tipo, None);
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let store = MemoryStore::new();
        let mut fc = fonte_controller();
        fc.populate(&filtros());
        fc.select_year(Some(2023));
        fc.select_month(Some(4));
        fc.select_ug(Some("150101".to_string()));
        fc.select_tipo(Some(TipoRelatorio::Alinea));
        fc.persist(&store);
        let saved = fc.selection().clone();

        let mut fresh = fonte_controller();
        fresh.populate(&filtros());
        assert!(fresh.restore(&store));
        assert_eq!(fresh.selection(), &saved);
    }

    #[test]
    fn test_restore_discards_corrupt_record() {
        let store = MemoryStore::new();
        store.save(KEY, "{not json");
        let mut fc = fonte_controller();
        assert!(!fc.restore(&store));
        assert_eq!(store.load(KEY), None);
    }

    #[test]
    fn test_restore_keeps_defaults_for_incomplete_record() {
        let store = MemoryStore::new();
        store.save(KEY, r#"{"ano": 2023}"#);
        let mut fc = fonte_controller();
        fc.populate(&filtros());
        assert!(!fc.restore(&store));
        assert_eq!(fc.selection().ano, Some(2024));
        assert_eq!(fc.selection().mes, Some(6));
        assert!(fc.is_valid());
        assert!(fc.should_auto_generate());
    }

    #[test]
    fn test_should_auto_generate() {
        let store = MemoryStore::new();

        let mut fc = fonte_controller();
        fc.populate(&FiltrosResponse {
            anos: vec![2023],
            ..Default::default()
        });
        assert!(!fc.should_auto_generate());

        store.save(KEY, r#"{"ano": 2023, "mes": 5}"#);
        assert!(fc.restore(&store));
        assert!(fc.should_auto_generate());

        let mut fc = fonte_controller();
        fc.populate(&filtros());
        assert!(fc.should_auto_generate());
    }

    #[test]
    fn test_empty_ug_is_cleared() {
        let mut fc = fonte_controller();
        fc.select_ug(Some(String::new()));
        assert_eq!(fc.selection().coug, None);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut fc = fonte_controller();
        fc.populate(&filtros());
        fc.select_year(Some(2022));
        fc.select_ug(Some("150101".to_string()));
        fc.clear();
        assert_eq!(fc.selection().ano, Some(2024));
        assert_eq!(fc.selection().mes, Some(6));
        assert_eq!(fc.selection().coug, None);
    }
}
