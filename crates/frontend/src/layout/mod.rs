pub mod global_context;
pub mod registry;
pub mod sidebar;

use crate::shared::alerts::AlertBanner;
use global_context::AppContext;
use leptos::prelude::*;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |  Sidebar  |  AlertBanner                 |
/// |           |  active report page          |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="app-layout">
            <aside class="app-sidebar">
                <sidebar::Sidebar />
            </aside>
            <main class="app-main">
                <AlertBanner alerts=ctx.alerts />
                {move || registry::render_page(&ctx.active.get())}
            </main>
        </div>
    }
}
