//! Page registry: single mapping from page key to view

use crate::reports::r100_balanco_receita::ui::BalancoReceitaPage;
use crate::reports::r101_receita_fonte::ui::RelatorioReceitaFontePage;
use crate::reports::{r100_balanco_receita, r101_receita_fonte};
use leptos::prelude::*;

pub const DEFAULT_PAGE: &str = r100_balanco_receita::config::KEY;

/// Keys accepted in the `?active=` query parameter
pub const PAGES: [&str; 2] = [r100_balanco_receita::config::KEY, r101_receita_fonte::config::KEY];

pub fn page_title(key: &str) -> &'static str {
    match key {
        r100_balanco_receita::config::KEY => r100_balanco_receita::config::CONFIG.title,
        r101_receita_fonte::config::KEY => r101_receita_fonte::config::CONFIG.title,
        _ => "Página não encontrada",
    }
}

pub fn render_page(key: &str) -> AnyView {
    match key {
        r100_balanco_receita::config::KEY => view! { <BalancoReceitaPage /> }.into_any(),
        r101_receita_fonte::config::KEY => view! { <RelatorioReceitaFontePage /> }.into_any(),
        _ => {
            log::warn!("no page registered for '{}'", key);
            view! { <div class="app-main__empty">"Página não encontrada"</div> }.into_any()
        }
    }
}
