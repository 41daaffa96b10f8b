//! Application-wide state shared through leptos context.
//!
//! Report pages publish their last generated report and the selection that
//! produced it here, keyed by module, so other components (the drill-down
//! modal, the sidebar) read them without reaching into the page.

use crate::shared::alerts::Alerts;
use crate::shared::format::period_label;
use crate::shared::report::filters::FilterSelection;
use contracts::reports::relatorio::RelatorioResponse;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Key of the page shown in the content area
    pub active: RwSignal<String>,
    pub alerts: RwSignal<Alerts>,
    pub reports: RwSignal<HashMap<&'static str, RelatorioResponse>>,
    pub active_filters: RwSignal<HashMap<&'static str, FilterSelection>>,
}

impl AppContext {
    pub fn new(default_page: &str) -> Self {
        Self {
            active: RwSignal::new(default_page.to_string()),
            alerts: RwSignal::new(Alerts::default()),
            reports: RwSignal::new(HashMap::new()),
            active_filters: RwSignal::new(HashMap::new()),
        }
    }

    pub fn activate(&self, key: &str) {
        log::debug!("activate page '{}'", key);
        self.active.set(key.to_string());
    }

    pub fn set_report(&self, module: &'static str, report: RelatorioResponse) {
        self.reports.update(|reports| {
            reports.insert(module, report);
        });
    }

    /// Period of the last report generated on `module`, tracked
    pub fn report_period(&self, module: &str) -> Option<String> {
        self.reports.with(|reports| {
            let periodo = reports.get(module)?.periodo.as_ref()?;
            Some(
                periodo
                    .descricao
                    .clone()
                    .unwrap_or_else(|| period_label(periodo.ano, periodo.mes)),
            )
        })
    }

    pub fn set_filters(&self, module: &'static str, selection: FilterSelection) {
        self.active_filters.update(|filters| {
            filters.insert(module, selection);
        });
    }

    /// Selection of the last submitted generation of `module`
    pub fn filters_untracked(&self, module: &str) -> Option<FilterSelection> {
        self.active_filters
            .with_untracked(|filters| filters.get(module).cloned())
    }

    /// Forgets the report and the selection of `module`
    pub fn clear_module(&self, module: &str) {
        self.reports.update(|reports| {
            reports.remove(module);
        });
        self.active_filters.update(|filters| {
            filters.remove(module);
        });
    }

    /// Two-way binding between the active page and the `?active=` query
    /// parameter, so a reload lands on the same report.
    pub fn init_router_integration(&self, known_pages: &'static [&'static str]) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(key) = params.get("active") {
            if known_pages.contains(&key.as_str()) {
                self.activate(key);
            } else {
                log::warn!("unknown page '{}' in query string", key);
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let active_key = this.active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::reports::relatorio::Periodo;

    #[test]
    fn test_module_state_roundtrip() {
        let owner = Owner::new();
        owner.set();

        let ctx = AppContext::new("r100_balanco_receita");
        assert_eq!(ctx.active.get_untracked(), "r100_balanco_receita");

        let selection = FilterSelection {
            ano: Some(2024),
            mes: Some(6),
            ..Default::default()
        };
        ctx.set_filters("r101", selection.clone());
        ctx.set_report(
            "r101",
            RelatorioResponse {
                dados: vec![],
                tem_dados: false,
                periodo: Some(Periodo {
                    ano: 2024,
                    mes: 6,
                    ano_anterior: None,
                    descricao: None,
                }),
                tipo: None,
            },
        );
        assert_eq!(ctx.filters_untracked("r101"), Some(selection));
        assert_eq!(ctx.report_period("r101").as_deref(), Some("Janeiro a Junho de 2024"));
        assert!(ctx.report_period("r100").is_none());

        ctx.clear_module("r101");
        assert!(ctx.filters_untracked("r101").is_none());
        assert!(ctx.report_period("r101").is_none());
    }
}
