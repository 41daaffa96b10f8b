use super::detail_modal::LancamentosModal;
use crate::layout::global_context::AppContext;
use crate::reports::r101_receita_fonte::api::detalhes_lancamentos;
use crate::reports::r101_receita_fonte::config::CONFIG;
use crate::reports::r101_receita_fonte::detail::DetailState;
use crate::shared::alerts::{notify, AlertKind};
use crate::shared::config::MSG_FILTROS_OBRIGATORIOS;
use crate::shared::report::integration::{ReportIntegration, VariationHighlights};
use crate::shared::report::ui::ReportView;
use contracts::reports::r101_receita_fonte::dto::DetalhesLancamentosParams;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn integrations() -> Vec<Box<dyn ReportIntegration>> {
    vec![Box::new(VariationHighlights::new(2, 5))]
}

#[component]
pub fn RelatorioReceitaFontePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let detail = RwSignal::new(DetailState::new());

    // year and UG come from the selection that produced the table, not from
    // whatever the filter form shows now
    let open_detail = Callback::new(move |(cofonte, coalinea): (String, String)| {
        let Some(ano) = ctx.filters_untracked(CONFIG.key).and_then(|s| s.ano) else {
            notify(ctx.alerts, AlertKind::Warning, MSG_FILTROS_OBRIGATORIOS);
            return;
        };
        let coug = ctx.filters_untracked(CONFIG.key).and_then(|s| s.coug);
        let Some(request) = detail.try_update(|d| d.open(&cofonte, &coalinea)) else {
            return;
        };
        let params = DetalhesLancamentosParams {
            cofonte,
            coalinea,
            ano,
            coug,
        };
        spawn_local(async move {
            let result = detalhes_lancamentos(&params).await;
            detail.try_update(|d| d.apply(request, result));
        });
    });

    view! {
        <ReportView config=&CONFIG integrations=integrations on_row_click=open_detail />
        <LancamentosModal detail=detail />
    }
}
