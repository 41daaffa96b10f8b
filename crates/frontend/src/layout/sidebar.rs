use crate::layout::global_context::AppContext;
use crate::layout::registry::{page_title, PAGES};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <nav class="app-sidebar__content">
            <div class="app-sidebar__brand">"Balanço Geral"</div>
            {PAGES
                .iter()
                .map(|key| {
                    let key = *key;
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active.get() == key
                            on:click=move |_| ctx.activate(key)
                        >
                            {icon("table")}
                            <span class="app-sidebar__label">{page_title(key)}</span>
                            {move || ctx.report_period(key).map(|periodo| view! {
                                <span class="app-sidebar__period">{periodo}</span>
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </nav>
    }
}
