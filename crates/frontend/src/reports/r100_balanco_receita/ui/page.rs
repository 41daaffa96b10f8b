use crate::reports::r100_balanco_receita::config::CONFIG;
use crate::shared::report::integration::{MonthlyComparison, ReportIntegration, VariationHighlights};
use crate::shared::report::ui::ReportView;
use leptos::prelude::*;

fn integrations() -> Vec<Box<dyn ReportIntegration>> {
    vec![
        Box::new(MonthlyComparison::new()),
        Box::new(VariationHighlights::new(1, 5)),
    ]
}

#[component]
pub fn BalancoReceitaPage() -> impl IntoView {
    view! { <ReportView config=&CONFIG integrations=integrations /> }
}
