use crate::layout::global_context::AppContext;
use crate::layout::registry::{DEFAULT_PAGE, PAGES};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(DEFAULT_PAGE);
    provide_context(ctx);
    ctx.init_router_integration(&PAGES);

    view! {
        <thaw::ConfigProvider>
            <Shell />
        </thaw::ConfigProvider>
    }
}
