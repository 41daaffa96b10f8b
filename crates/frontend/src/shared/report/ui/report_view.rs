//! Generic report page: filter bar, export toolbar, hierarchical table and the
//! integration panels, driven by a [`ReportModuleConfig`].

use super::filter_bar::FilterBar;
use super::panels::IntegrationPanels;
use super::report_table::ReportTable;
use crate::layout::global_context::AppContext;
use crate::shared::alerts::{notify, AlertKind};
use crate::shared::config::{MSG_ERRO_FILTROS, MSG_FILTROS_OBRIGATORIOS, MSG_SEM_DADOS, MSG_SEM_DADOS_EXPORTAR};
use crate::shared::export::{export_element_png, export_to_csv, export_to_xlsx, XlsxSheet};
use crate::shared::format::period_label;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::report::api::{exportar_relatorio, fetch_filtros, gerar_relatorio};
use crate::shared::report::config::ReportModuleConfig;
use crate::shared::report::controller::{Completion, Phase, ReportController};
use crate::shared::report::filters::{validate_selection, FiltersController};
use crate::shared::report::integration::{NoopIntegration, ReportIntegration};
use crate::shared::report::view_model::{
    build_rows, sheet_headers, table_state, to_sheet_row, RowFilter, TableState,
};
use crate::shared::storage::{LocalStorage, MemoryStore, SelectionStore};
use crate::shared::utils::export_filename;
use chrono::{Datelike, Utc};
use contracts::reports::relatorio::{ExportarRelatorioParams, NIVEL_MAXIMO};
use contracts::shared::filters::FiltrosResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

type IntegrationFactory = fn() -> Vec<Box<dyn ReportIntegration>>;
type SharedStore = StoredValue<Box<dyn SelectionStore + Send + Sync>>;

fn selection_store() -> Box<dyn SelectionStore + Send + Sync> {
    if LocalStorage::is_available() {
        Box::new(LocalStorage)
    } else {
        log::warn!("localStorage unavailable, filter selection will not survive a reload");
        Box::new(MemoryStore::new())
    }
}

/// Fills the form from a filters response and restores the stored selection.
///
/// Returns whether the report should be generated right away, or `None` when
/// the page was unmounted while the request was in flight.
fn apply_filtros(
    filters: RwSignal<FiltersController>,
    controller: RwSignal<ReportController>,
    store: SharedStore,
    filtros: &FiltrosResponse,
) -> Option<bool> {
    filters.try_update(|f| {
        f.populate(filtros);
        store.try_with_value(|s| f.restore(s.as_ref()));
    })?;
    controller.try_update(|c| c.filters_loaded())?;
    filters.try_with_untracked(|f| f.should_auto_generate())
}

/// Applies a debounced search value, unless the box was reset since it was typed
fn apply_search(controller: RwSignal<ReportController>, search_text: RwSignal<String>, texto: String) {
    if !search_text.with_untracked(|current| *current == texto) {
        return;
    }
    controller.update(|c| {
        let filter = RowFilter {
            texto,
            ..c.row_filter().clone()
        };
        c.apply_row_filter(filter);
    });
}

fn reset_page(
    controller: RwSignal<ReportController>,
    filters: RwSignal<FiltersController>,
    search_text: RwSignal<String>,
) {
    controller.update(|c| c.clear());
    filters.update(|f| f.clear());
    search_text.set(String::new());
}

const NIVEL_OPTIONS: [(u8, &str); 5] = [
    (0, "Somente total"),
    (1, "Nível 1"),
    (2, "Nível 2"),
    (3, "Nível 3"),
    (NIVEL_MAXIMO, "Todos os níveis"),
];

#[component]
pub fn ReportView(
    config: &'static ReportModuleConfig,
    /// Builds the integrations fed with every generated report
    #[prop(optional)]
    integrations: Option<IntegrationFactory>,
    /// Called with `(cofonte, coalinea)` when a drill-down row is clicked
    #[prop(optional)]
    on_row_click: Option<Callback<(String, String)>>,
) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let mut initial = ReportController::new();
    let integrations = integrations
        .map(|build| build())
        .unwrap_or_else(|| vec![Box::new(NoopIntegration) as Box<dyn ReportIntegration>]);
    for integration in integrations {
        initial = initial.with_integration(integration);
    }
    let controller = RwSignal::new(initial);
    let filters = RwSignal::new(FiltersController::new(config.storage_key, config.tipo_policy));
    let store: SharedStore = StoredValue::new(selection_store());
    let search_text = RwSignal::new(String::new());
    let (exporting, set_exporting) = signal(false);

    let phase = Memo::new(move |_| controller.with(|c| c.phase()));
    let generating = Signal::derive(move || phase.get() == Phase::GeneratingReport);
    let loading_filters = Signal::derive(move || phase.get() == Phase::LoadingFilters);

    let generate = move || {
        let Some((selection, validated)) =
            filters.try_with_untracked(|f| (f.selection().clone(), f.validate()))
        else {
            return;
        };
        let valid = match validated {
            Ok(valid) => valid,
            Err(_) => {
                notify(ctx.alerts, AlertKind::Warning, MSG_FILTROS_OBRIGATORIOS);
                return;
            }
        };
        store.try_with_value(|s| filters.try_with_untracked(|f| f.persist(s.as_ref())));

        let Some(token) = controller
            .try_update(|c| c.begin_generation(&selection))
            .flatten()
        else {
            return;
        };
        let params = valid.to_params();
        log::info!("{}: generating report {:?}", config.key, params);

        spawn_local(async move {
            let result = gerar_relatorio(&config.endpoints, &params).await;
            let Some(completion) = controller.try_update(|c| c.complete_generation(token, result))
            else {
                return;
            };
            match completion {
                Completion::Applied => {
                    let Some((Some(report), Some(selection))) = controller
                        .try_with_untracked(|c| (c.report().cloned(), c.applied_selection().cloned()))
                    else {
                        return;
                    };
                    if !report.tem_dados {
                        notify(ctx.alerts, AlertKind::Info, MSG_SEM_DADOS);
                    }
                    ctx.set_filters(config.key, selection);
                    ctx.set_report(config.key, report);
                }
                Completion::Failed(message) => notify(ctx.alerts, AlertKind::Error, message),
                Completion::Stale => {}
            }
        });
    };

    // Load filter options on mount, then restore or default the selection
    Effect::new(move |_| {
        controller.update(|c| c.begin_loading_filters());
        spawn_local(async move {
            match fetch_filtros(&config.endpoints).await {
                Ok(filtros) => {
                    if apply_filtros(filters, controller, store, &filtros) == Some(true) {
                        generate();
                    }
                }
                Err(err) => {
                    if controller.try_update(|c| c.filters_failed(&err)).is_none() {
                        return;
                    }
                    notify(ctx.alerts, AlertKind::Error, format!("{} {}", MSG_ERRO_FILTROS, err));
                }
            }
        });
    });

    let clear = move || {
        reset_page(controller, filters, search_text);
        ctx.clear_module(config.key);
    };

    let download_name = move |ext: &str| {
        let periodo = controller.with_untracked(|c| c.report().and_then(|r| r.periodo.clone()));
        export_filename(config.file_prefix, periodo.as_ref(), Utc::now().year(), ext)
    };

    let export_csv = move || {
        let rows = controller.with_untracked(|c| c.visible_rows().to_vec());
        if rows.is_empty() {
            notify(ctx.alerts, AlertKind::Warning, MSG_SEM_DADOS_EXPORTAR);
            return;
        }
        match export_to_csv(&rows, &download_name("csv")) {
            Ok(()) => notify(ctx.alerts, AlertKind::Success, "CSV exportado com sucesso."),
            Err(e) => notify(ctx.alerts, AlertKind::Error, e.to_string()),
        }
    };

    let export_xlsx = move || {
        // the spreadsheet follows the selection that produced the table
        let Some(selection) = controller.with_untracked(|c| c.applied_selection().cloned()) else {
            notify(ctx.alerts, AlertKind::Warning, MSG_SEM_DADOS_EXPORTAR);
            return;
        };
        let valid = match validate_selection(&selection, config.tipo_policy) {
            Ok(valid) => valid,
            Err(e) => {
                notify(ctx.alerts, AlertKind::Warning, e.to_string());
                return;
            }
        };
        let filename = download_name("xlsx");
        set_exporting.set(true);
        spawn_local(async move {
            let params = ExportarRelatorioParams::excel(valid.to_params());
            match exportar_relatorio(&config.endpoints, &params).await {
                Ok(export) if export.dados.is_empty() => {
                    notify(ctx.alerts, AlertKind::Warning, MSG_SEM_DADOS_EXPORTAR);
                }
                Ok(export) => {
                    let mut sheet =
                        XlsxSheet::new(config.sheet_name, config.column_widths, &sheet_headers());
                    for row in &export.dados {
                        sheet.push_row(to_sheet_row(row));
                    }
                    match export_to_xlsx(&sheet, &filename) {
                        Ok(()) => {
                            notify(ctx.alerts, AlertKind::Success, "Planilha exportada com sucesso.")
                        }
                        Err(e) => notify(ctx.alerts, AlertKind::Error, e.to_string()),
                    }
                }
                Err(e) => notify(ctx.alerts, AlertKind::Error, e.to_string()),
            }
            set_exporting.set(false);
        });
    };

    let export_png = move || {
        if controller.with_untracked(|c| c.report().is_none()) {
            notify(ctx.alerts, AlertKind::Warning, MSG_SEM_DADOS_EXPORTAR);
            return;
        }
        let filename = download_name("png");
        set_exporting.set(true);
        spawn_local(async move {
            match export_element_png(config.container_id, &filename).await {
                Ok(()) => notify(ctx.alerts, AlertKind::Success, "Imagem exportada com sucesso."),
                Err(e) => notify(ctx.alerts, AlertKind::Error, e.to_string()),
            }
            set_exporting.set(false);
        });
    };

    let on_search = Callback::new(move |texto: String| apply_search(controller, search_text, texto));

    let on_level_change = move |value: String| {
        let nivel_maximo = value.parse().unwrap_or(NIVEL_MAXIMO);
        controller.update(|c| {
            let filter = RowFilter {
                nivel_maximo,
                ..c.row_filter().clone()
            };
            c.apply_row_filter(filter);
        });
    };

    let state = Memo::new(move |_| {
        controller.with(|c| {
            table_state(
                c.is_generating(),
                c.report().is_some(),
                build_rows(c.visible_rows(), &config.level_classes),
                MSG_SEM_DADOS,
            )
        })
    });
    let has_report = Signal::derive(move || !matches!(state.get(), TableState::Initial | TableState::Loading));
    let export_disabled = Signal::derive(move || !has_report.get() || exporting.get());
    let periodo_label = move || {
        controller.with(|c| {
            c.report()
                .and_then(|r| r.periodo.as_ref())
                .map(|p| p.descricao.clone().unwrap_or_else(|| period_label(p.ano, p.mes)))
        })
    };
    let panels = Signal::derive(move || controller.with(|c| c.panels()));
    let filters_error = move || {
        controller.with(|c| {
            (c.phase() == Phase::Error)
                .then(|| c.last_error().map(str::to_string))
                .flatten()
        })
    };
    let row_count = move || {
        controller.with(|c| {
            (c.report().is_some() && !c.row_filter().is_identity()).then(|| {
                format!(
                    "Exibindo {} de {} linhas",
                    c.visible_rows().len(),
                    c.baseline().len()
                )
            })
        })
    };

    view! {
        <div class="report-page" id=format!("{}--page", config.key)>
            <div class="report-page__header">
                <h1 class="report-page__title">{config.title}</h1>
                <p class="report-page__subtitle">{config.subtitle}</p>
            </div>

            {move || filters_error().map(|message| view! {
                <div class="report-page__error">
                    <span>{message}</span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            if let Some(w) = web_sys::window() {
                                let _ = w.location().reload();
                            }
                        }
                    >
                        "Recarregar página"
                    </Button>
                </div>
            })}

            <FilterBar
                filters=filters
                generating=generating
                loading=loading_filters
                on_generate=Callback::new(move |_| generate())
                on_clear=Callback::new(move |_| clear())
            />

            <div class="report-toolbar">
                <SearchInput
                    on_change=on_search
                    value=search_text
                    placeholder="Filtrar por código ou descrição..."
                />
                <select
                    class="form__select report-toolbar__level"
                    on:change=move |ev| on_level_change(event_target_value(&ev))
                >
                    {NIVEL_OPTIONS
                        .iter()
                        .map(|(nivel, label)| {
                            let nivel = *nivel;
                            view! {
                                <option
                                    value=nivel.to_string()
                                    selected=move || controller.with(|c| c.row_filter().nivel_maximo == nivel)
                                >
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <div class="report-toolbar__exports">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=export_disabled
                        on_click=move |_| export_csv()
                    >
                        {icon("download")}
                        " CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=export_disabled
                        on_click=move |_| export_xlsx()
                    >
                        {icon("excel")}
                        " Excel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=export_disabled
                        on_click=move |_| export_png()
                    >
                        {icon("image")}
                        " Imagem"
                    </Button>
                </div>
            </div>

            <div id=config.container_id class="report-container">
                {move || periodo_label().map(|label| view! { <p class="report-container__period">{label}</p> })}
                {move || row_count().map(|text| view! { <p class="report-container__count">{text}</p> })}
                <ReportTable
                    state=state
                    table_id=config.table_id
                    description_header=config.description_header
                    on_row_click=on_row_click
                />
            </div>

            <IntegrationPanels panels=panels />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report::filters::TipoPolicy;

    fn filtros() -> FiltrosResponse {
        FiltrosResponse {
            anos: vec![2024, 2023],
            ano_atual: Some(2024),
            ultimo_mes: Some(6),
            ..Default::default()
        }
    }

    fn page_state() -> (RwSignal<FiltersController>, RwSignal<ReportController>, SharedStore) {
        let filters = RwSignal::new(FiltersController::new("test_report_view_v1", TipoPolicy::NotUsed));
        let mut ctrl = ReportController::new();
        ctrl.begin_loading_filters();
        let controller = RwSignal::new(ctrl);
        let store: SharedStore = StoredValue::new(
            Box::new(MemoryStore::new()) as Box<dyn SelectionStore + Send + Sync>
        );
        (filters, controller, store)
    }

    #[test]
    fn test_filters_response_fills_form() {
        let owner = Owner::new();
        owner.set();

        let (filters, controller, store) = page_state();
        assert_eq!(apply_filtros(filters, controller, store, &filtros()), Some(true));
        assert_eq!(filters.with_untracked(|f| f.selection().mes), Some(6));
        assert_eq!(controller.with_untracked(|c| c.phase()), Phase::FiltersReady);
    }

    #[test]
    fn test_filters_response_after_unmount_is_dropped() {
        let owner = Owner::new();
        owner.set();

        let page = owner.child();
        let (filters, controller, store) = page.with(page_state);
        page.cleanup();

        assert_eq!(apply_filtros(filters, controller, store, &filtros()), None);
    }

    #[test]
    fn test_clear_resets_search_box_and_drops_late_search() {
        let owner = Owner::new();
        owner.set();

        let (filters, controller, _) = page_state();
        let search_text = RwSignal::new("ipva".to_string());
        apply_search(controller, search_text, "ipva".to_string());
        assert_eq!(controller.with_untracked(|c| c.row_filter().texto.clone()), "ipva");

        reset_page(controller, filters, search_text);
        assert_eq!(search_text.get_untracked(), "");
        assert!(controller.with_untracked(|c| c.row_filter().is_identity()));

        // debounced value typed before the reset
        apply_search(controller, search_text, "ipva".to_string());
        assert!(controller.with_untracked(|c| c.row_filter().is_identity()));
    }
}
