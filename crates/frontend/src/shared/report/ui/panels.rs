use crate::shared::report::integration::IntegrationPanel;
use leptos::prelude::*;

/// Side analyses produced by the page integrations
#[component]
pub fn IntegrationPanels(#[prop(into)] panels: Signal<Vec<IntegrationPanel>>) -> impl IntoView {
    view! {
        <Show when=move || panels.with(|p| !p.is_empty())>
            <div class="report-panels">
                {move || {
                    panels
                        .get()
                        .into_iter()
                        .map(|panel| {
                            view! {
                                <section class="report-panel">
                                    <h3 class="report-panel__title">{panel.title}</h3>
                                    <dl class="report-panel__lines">
                                        {panel
                                            .lines
                                            .into_iter()
                                            .map(|line| {
                                                view! {
                                                    <dt>{line.label}</dt>
                                                    <dd class=line.css_class>{line.value}</dd>
                                                }
                                            })
                                            .collect_view()}
                                    </dl>
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
