use crate::shared::icons::icon;
use crate::shared::report::filters::{FiltersController, TipoPolicy};
use contracts::reports::relatorio::TipoRelatorio;
use leptos::prelude::*;
use thaw::*;

/// Select bound to one field of the filter form
#[component]
fn FilterSelect(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    on_change: Callback<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

/// Year / month / UG (and report type, when the module has one) plus the
/// generate and clear actions
#[component]
pub fn FilterBar(
    filters: RwSignal<FiltersController>,
    on_generate: Callback<()>,
    on_clear: Callback<()>,
    /// A generation is in flight
    #[prop(into)]
    generating: Signal<bool>,
    /// The filter options are not loaded yet
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let show_tipo = matches!(
        filters.with_untracked(|f| f.tipo_policy()),
        TipoPolicy::DefaultTo(_)
    );

    let placeholder = || (String::new(), "Selecione".to_string());

    let ano_options = Signal::derive(move || {
        let mut options = vec![placeholder()];
        options.extend(
            filters
                .with(|f| f.anos().to_vec())
                .into_iter()
                .map(|ano| (ano.to_string(), ano.to_string())),
        );
        options
    });
    let mes_options = Signal::derive(move || {
        let mut options = vec![placeholder()];
        options.extend(
            filters
                .with(|f| f.meses())
                .into_iter()
                .map(|m| (m.value.to_string(), m.label.to_string())),
        );
        options
    });
    let ug_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "Todas".to_string())];
        options.extend(filters.with(|f| {
            f.ugs()
                .iter()
                .map(|ug| (ug.coug.clone(), format!("{} - {}", ug.coug, ug.nome)))
                .collect::<Vec<_>>()
        }));
        options
    });
    let tipo_options = Signal::derive(|| {
        TipoRelatorio::all()
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>()
    });

    let ano_value = Signal::derive(move || {
        filters.with(|f| f.selection().ano.map(|a| a.to_string()).unwrap_or_default())
    });
    let mes_value = Signal::derive(move || {
        filters.with(|f| f.selection().mes.map(|m| m.to_string()).unwrap_or_default())
    });
    let ug_value =
        Signal::derive(move || filters.with(|f| f.selection().coug.clone().unwrap_or_default()));
    let tipo_value = Signal::derive(move || {
        filters.with(|f| {
            f.selection()
                .tipo
                .map(|t| t.as_str().to_string())
                .unwrap_or_default()
        })
    });

    let inputs_disabled = Signal::derive(move || loading.get() || generating.get());
    let generate_disabled =
        Signal::derive(move || loading.get() || generating.get() || !filters.with(|f| f.is_valid()));

    view! {
        <div class="report-filters">
            {show_tipo.then(|| view! {
                <FilterSelect
                    label="Tipo"
                    value=tipo_value
                    options=tipo_options
                    disabled=inputs_disabled
                    on_change=Callback::new(move |v: String| {
                        filters.update(|f| f.select_tipo(TipoRelatorio::parse(&v)))
                    })
                />
            })}
            <FilterSelect
                label="Ano"
                value=ano_value
                options=ano_options
                disabled=inputs_disabled
                on_change=Callback::new(move |v: String| {
                    filters.update(|f| f.select_year(v.parse().ok()))
                })
            />
            <FilterSelect
                label="Mês"
                value=mes_value
                options=mes_options
                disabled=inputs_disabled
                on_change=Callback::new(move |v: String| {
                    filters.update(|f| f.select_month(v.parse().ok()))
                })
            />
            <FilterSelect
                label="Unidade Gestora"
                value=ug_value
                options=ug_options
                disabled=inputs_disabled
                on_change=Callback::new(move |v: String| {
                    filters.update(|f| f.select_ug(Some(v)))
                })
            />
            <div class="report-filters__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=generate_disabled
                    loading=generating
                    on_click=move |_| on_generate.run(())
                >
                    {icon("play")}
                    " Gerar relatório"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=inputs_disabled
                    on_click=move |_| on_clear.run(())
                >
                    {icon("eraser")}
                    " Limpar"
                </Button>
            </div>
        </div>
    }
}
