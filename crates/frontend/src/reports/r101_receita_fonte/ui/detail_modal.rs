use crate::layout::global_context::AppContext;
use crate::reports::r101_receita_fonte::config::CONFIG;
use crate::reports::r101_receita_fonte::detail::{DetailState, DetailStatus};
use crate::shared::alerts::{notify, AlertKind};
use crate::shared::export::export_to_csv;
use crate::shared::format::{format_count, format_currency};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, SearchInput};
use crate::shared::modal_frame::ModalFrame;
use leptos::prelude::*;
use thaw::*;

const COLUMNS: [(&str, &str); 6] = [
    ("conta", "Conta Contábil"),
    ("ug", "UG"),
    ("documento", "Documento"),
    ("evento", "Evento"),
    ("dc", "D/C"),
    ("valor", "Valor"),
];

#[component]
fn SummaryItem(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="detail-summary__item">
            <span class="detail-summary__label">{label}</span>
            <span class="detail-summary__value">{move || value.get()}</span>
        </div>
    }
}

/// Ledger entries of the clicked fonte/alínea row
#[component]
pub fn LancamentosModal(detail: RwSignal<DetailState>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let title = Signal::derive(move || {
        detail.with(|d| {
            let (cofonte, coalinea) = d.pair();
            format!("Lançamentos - Fonte {} / Alínea {}", cofonte, coalinea)
        })
    });
    let close = Callback::new(move |_| detail.update(|d| d.close()));

    let export_csv = move || {
        let rows = detail.with_untracked(|d| d.visible_rows());
        let (cofonte, coalinea) = detail.with_untracked(|d| {
            let (f, a) = d.pair();
            (f.to_string(), a.to_string())
        });
        let filename = format!("{}_lancamentos_{}_{}.csv", CONFIG.file_prefix, cofonte, coalinea);
        match export_to_csv(&rows, &filename) {
            Ok(()) => notify(ctx.alerts, AlertKind::Success, "Lançamentos exportados com sucesso."),
            Err(e) => notify(ctx.alerts, AlertKind::Error, e.to_string()),
        }
    };

    let body = move || match detail.with(|d| d.status().clone()) {
        DetailStatus::Closed => ().into_any(),
        DetailStatus::Loading => view! {
            <tr>
                <td colspan="7" class="detail-table__placeholder">
                    <Spinner label="Carregando lançamentos..." />
                </td>
            </tr>
        }
        .into_any(),
        DetailStatus::Failed(message) => view! {
            <tr>
                <td colspan="7" class="detail-table__error">{message}</td>
            </tr>
        }
        .into_any(),
        DetailStatus::Loaded => {
            let rows = detail.with(|d| d.visible_rows());
            if rows.is_empty() {
                return view! {
                    <tr>
                        <td colspan="7" class="detail-table__placeholder">
                            "Nenhum lançamento encontrado."
                        </td>
                    </tr>
                }
                .into_any();
            }
            rows.into_iter()
                .map(|l| {
                    view! {
                        <tr>
                            <td title=l.nocontacontabil.clone()>{l.cocontacontabil.clone()}</td>
                            <td title=l.noug.clone()>{l.coug.clone()}</td>
                            <td>{l.nudocumento.clone()}</td>
                            <td title=l.noevento.clone()>{format!("{} - {}", l.coevento, l.noevento)}</td>
                            <td>{l.indebitocredito.label()}</td>
                            <td class="detail-table__value">{format_currency(Some(l.valor))}</td>
                            <td>{l.cogrupo.clone()}</td>
                        </tr>
                    }
                })
                .collect_view()
                .into_any()
        }
    };

    view! {
        <Show when=move || detail.with(|d| d.is_open())>
            <ModalFrame title=title on_close=close modal_class="detail-modal">
                <div class="detail-summary">
                    <SummaryItem
                        label="Total Débito"
                        value=Signal::derive(move || detail.with(|d| format_currency(Some(d.summary().total_debito))))
                    />
                    <SummaryItem
                        label="Total Crédito"
                        value=Signal::derive(move || detail.with(|d| format_currency(Some(d.summary().total_credito))))
                    />
                    <SummaryItem
                        label="Saldo"
                        value=Signal::derive(move || detail.with(|d| format_currency(Some(d.summary().saldo))))
                    />
                    <SummaryItem
                        label="Registros"
                        value=Signal::derive(move || detail.with(|d| format_count(d.summary().total_registros)))
                    />
                </div>

                {move || {
                    let saldos = detail.with(|d| d.saldo_por_ug());
                    (saldos.len() > 1).then(|| view! {
                        <dl class="detail-ugs">
                            {saldos
                                .into_iter()
                                .map(|(ug, saldo)| view! {
                                    <dt>{ug}</dt>
                                    <dd>{format_currency(Some(saldo))}</dd>
                                })
                                .collect_view()}
                        </dl>
                    })
                }}

                {move || {
                    detail
                        .with(|d| d.truncation_notice())
                        .map(|notice| view! { <div class="alert alert--info detail-notice">{notice}</div> })
                }}

                <div class="detail-toolbar">
                    <SearchInput
                        on_change=Callback::new(move |texto: String| detail.update(|d| d.set_search(texto)))
                        placeholder="Filtrar lançamentos..."
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || detail.with(|d| *d.status() != DetailStatus::Loaded))
                        on_click=move |_| export_csv()
                    >
                        {icon("download")}
                        " Exportar CSV"
                    </Button>
                </div>

                <div class="detail-table__wrapper">
                    <table class="detail-table">
                        <thead>
                            <tr>
                                {COLUMNS
                                    .iter()
                                    .map(|(field, label)| {
                                        let field = *field;
                                        view! {
                                            <th
                                                class="detail-table__sortable"
                                                on:click=move |_| detail.update(|d| d.toggle_sort(field))
                                            >
                                                {*label}
                                                {move || detail.with(|d| {
                                                    get_sort_indicator(d.sort_field(), field, d.sort_ascending())
                                                })}
                                            </th>
                                        }
                                    })
                                    .collect_view()}
                                <th>"Grupo"</th>
                            </tr>
                        </thead>
                        <tbody>{body}</tbody>
                    </table>
                </div>
            </ModalFrame>
        </Show>
    }
}
