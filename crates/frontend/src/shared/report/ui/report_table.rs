use crate::shared::report::view_model::{RowView, TableState, VALUE_HEADERS};
use leptos::prelude::*;
use thaw::*;

#[component]
fn ReportRow(row: RowView, on_row_click: Option<Callback<(String, String)>>) -> impl IntoView {
    let clickable = on_row_click.is_some() && row.drilldown.is_some();
    let drilldown = row.drilldown.clone();
    let class = if clickable {
        format!("{} report-table__row--clickable", row.row_class)
    } else {
        row.row_class.to_string()
    };
    let variance_class = row.variance_class;
    let [previsao_inicial, previsao_atualizada, receita_atual, receita_anterior, variacao, variacao_pct] =
        row.values;

    view! {
        <tr
            class=class
            title=clickable.then_some("Clique para ver os lançamentos")
            on:click=move |_| {
                if let (Some(callback), Some(key)) = (on_row_click, drilldown.clone()) {
                    callback.run(key);
                }
            }
        >
            <td class="report-table__label">{row.label}</td>
            <td class="report-table__value">{previsao_inicial}</td>
            <td class="report-table__value">{previsao_atualizada}</td>
            <td class="report-table__value">{receita_atual}</td>
            <td class="report-table__value">{receita_anterior}</td>
            <td class=format!("report-table__value {}", variance_class)>{variacao}</td>
            <td class=format!("report-table__value {}", variance_class)>{variacao_pct}</td>
        </tr>
    }
}

/// Hierarchical report table; rows with a drill-down key are clickable when
/// `on_row_click` is given
#[component]
pub fn ReportTable(
    #[prop(into)] state: Signal<TableState>,
    table_id: &'static str,
    description_header: &'static str,
    on_row_click: Option<Callback<(String, String)>>,
) -> impl IntoView {
    let colspan = (VALUE_HEADERS.len() + 1).to_string();

    let body = move || match state.get() {
        TableState::Initial => view! {
            <tr>
                <td class="report-table__placeholder" colspan=colspan.clone()>
                    "Selecione os filtros e clique em Gerar relatório."
                </td>
            </tr>
        }
        .into_any(),
        TableState::Loading => view! {
            <tr>
                <td class="report-table__placeholder" colspan=colspan.clone()>
                    <Spinner label="Carregando..." />
                </td>
            </tr>
        }
        .into_any(),
        TableState::Empty(message) => view! {
            <tr>
                <td class="report-table__placeholder" colspan=colspan.clone()>
                    {message}
                </td>
            </tr>
        }
        .into_any(),
        TableState::Rows(rows) => rows
            .into_iter()
            .map(|row| view! { <ReportRow row=row on_row_click=on_row_click /> })
            .collect_view()
            .into_any(),
    };

    view! {
        <table id=table_id class="report-table">
            <thead>
                <tr>
                    <th>{description_header}</th>
                    {VALUE_HEADERS
                        .iter()
                        .map(|header| view! { <th class="report-table__value">{*header}</th> })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
