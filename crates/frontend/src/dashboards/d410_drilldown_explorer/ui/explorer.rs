use contracts::dashboards::d410_drilldown::{DrillPathEntry, DrilldownFilters};
use contracts::enums::AnalysisMode;
use leptos::prelude::*;
use thaw::*;

use super::bar_chart::DrilldownBarChart;
use super::breadcrumbs::DrilldownBreadcrumbs;
use super::detail_table::DetailTable;
use super::treemap::DrilldownTreemap;
use crate::dashboards::d410_drilldown_explorer::api::RpcClient;
use crate::dashboards::d410_drilldown_explorer::binding::{
    spawn_request, BindingKey, BindingPhase, RemoteBinding,
};
use crate::dashboards::d410_drilldown_explorer::navigator::HierarchyNavigator;
use crate::dashboards::d410_drilldown_explorer::state::{create_state, ChartType};
use crate::dashboards::d410_drilldown_explorer::view_sync::{
    chart_series, table_page, visible_columns, Totals,
};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{CardAnimated, PaginationControls};
use crate::shared::config::{load_config, Config};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

/// Что показывать в теле дашборда
#[derive(Debug, Clone, PartialEq)]
enum ViewStatus {
    /// Нет периода: запрос не выполняется
    Idle,
    Loading,
    Failed(String),
    Empty,
    Ready,
}

fn view_status(binding: &RemoteBinding) -> ViewStatus {
    match binding.phase() {
        BindingPhase::Idle => ViewStatus::Idle,
        BindingPhase::Loading => ViewStatus::Loading,
        BindingPhase::Failure(e) => ViewStatus::Failed(e.to_string()),
        BindingPhase::Success(rows) if rows.is_empty() => ViewStatus::Empty,
        BindingPhase::Success(_) => ViewStatus::Ready,
    }
}

/// D410: иерархический drill-down по агрегатам продаж.
///
/// Внешние фильтры берутся из [`AppGlobalContext`] (если он есть) и
/// перекрывают `initial_filters`.
#[component]
pub fn DrilldownExplorer(
    /// Режим анализа (по умолчанию "Por Supervisor")
    #[prop(optional, into)]
    analysis_mode: MaybeProp<AnalysisMode>,
    /// Имя RPC-функции; по умолчанию из конфигурации
    #[prop(optional, into)]
    endpoint_name: Option<String>,
    #[prop(optional)]
    initial_filters: DrilldownFilters,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>();
    let external_filters: Signal<DrilldownFilters> = match ctx {
        Some(ctx) => ctx.filters.into(),
        None => Signal::stored(DrilldownFilters::default()),
    };
    let config = match ctx {
        Some(ctx) => ctx.config.get_value(),
        None => load_config().unwrap_or_else(|e| {
            log::warn!("Config fallback to defaults: {}", e);
            Config::default()
        }),
    };

    let endpoint = StoredValue::new(
        endpoint_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| config.drilldown.endpoint.clone()),
    );
    let page_size = config.drilldown.page_size.max(1);
    let chart_limit = config.drilldown.chart_limit;
    let client = StoredValue::new(RpcClient::new(&config.remote));

    // ---------- навигация ----------
    let mode = Memo::new(move |_| analysis_mode.get().unwrap_or_default());
    let navigator = RwSignal::new(HierarchyNavigator::new(mode.get_untracked()));

    Effect::new(move |_| {
        let mode = mode.get();
        if navigator.with_untracked(|n| n.mode()) != mode {
            log::debug!("analysis mode changed to {}, path reset", mode.code());
            navigator.update(|n| n.set_mode(mode));
        }
    });

    // ---------- параметры запроса ----------
    let initial_filters = StoredValue::new(initial_filters);
    let effective_filters = Memo::new(move |_| {
        external_filters.with(|ext| {
            initial_filters.with_value(|defaults| DrilldownFilters::merge(defaults, ext))
        })
    });

    // Режим берётся из `mode`: путь старого режима в запрос не попадает
    let params = Memo::new(move |_| {
        let mode = mode.get();
        effective_filters.with(|filters| navigator.with(|n| n.query_params(filters, mode)))
    });

    let view_state = create_state();

    // Новый уровень или фильтры: снова первая страница
    Effect::new(move |_| {
        params.track();
        view_state.update(|s| s.reset_page());
    });

    // ---------- загрузка ----------
    let binding = RwSignal::new(RemoteBinding::default());

    Effect::new(move |_| {
        let params = params.get();
        let enabled = params.is_ready();
        let key = BindingKey {
            endpoint: endpoint.get_value(),
            params,
        };
        let ticket = binding
            .try_update(|b| b.request(key.clone(), enabled))
            .flatten();
        if let Some(ticket) = ticket {
            spawn_request(binding, client.get_value(), ticket, key);
        }
    });

    let on_retry = move |_| {
        if let Some((ticket, key)) = binding.try_update(|b| b.retry()).flatten() {
            log::debug!("retry {}", key.endpoint);
            spawn_request(binding, client.get_value(), ticket, key);
        }
    };

    // ---------- производные представления ----------
    let status = Memo::new(move |_| binding.with(view_status));
    let rows = Memo::new(move |_| binding.with(|b| b.data()).unwrap_or_default());
    let chart = Memo::new(move |_| rows.with(|r| chart_series(r, chart_limit)));
    let totals = Memo::new(move |_| rows.with(|r| Totals::compute(r, page_size)));
    let columns = Memo::new(move |_| rows.with(|r| visible_columns(r)));

    let current_page = Memo::new(move |_| view_state.with(|s| s.current_page));
    let sort = Memo::new(move |_| view_state.with(|s| s.sort.clone()));
    let page_rows = Memo::new(move |_| {
        let page = current_page.get();
        sort.with(|sort| rows.with(|r| table_page(r, sort, page, page_size)))
    });

    let total_value = Signal::derive(move || totals.with(|t| t.total_value));
    let total_pages = Signal::derive(move || totals.with(|t| t.total_pages));
    let total_items = Signal::derive(move || totals.with(|t| t.total_items));
    let rank_offset = Signal::derive(move || current_page.get().saturating_sub(1) * page_size);

    let can_drill = Memo::new(move |_| navigator.with(|n| n.can_drill()));
    let is_root = Memo::new(move |_| navigator.with(|n| n.is_root()));
    let level_label = Signal::derive(move || navigator.with(|n| n.current_label().to_string()));
    let path = Signal::derive(move || navigator.with(|n| n.path().to_vec()));

    let chart_type = Signal::derive(move || view_state.with(|s| s.chart_type));
    let show_chart = Signal::derive(move || view_state.with(|s| s.show_chart));
    let expanded = Signal::derive(move || view_state.with(|s| s.is_expanded));

    // ---------- действия ----------
    let on_select = Callback::new(move |entry: DrillPathEntry| {
        navigator.maybe_update(|n| n.drill_into(entry));
    });
    let on_reset = Callback::new(move |_: ()| {
        log::debug!("drilldown reset to root");
        navigator.update(|n| n.reset());
    });
    let on_navigate = Callback::new(move |index: usize| {
        navigator.maybe_update(|n| n.ascend_to(index));
    });
    let on_back = move |_| {
        navigator.maybe_update(|n| n.ascend_one());
    };
    let on_sort = Callback::new(move |field: String| {
        view_state.update(|s| s.sort.toggle(&field));
    });
    let on_page_change = Callback::new(move |page: usize| {
        let total = totals.with_untracked(|t| t.total_pages);
        view_state.update(|s| s.set_page(page, total));
    });

    let chart_view = move || {
        if !show_chart.get() {
            return view! { <></> }.into_any();
        }
        match chart_type.get() {
            ChartType::Treemap => view! {
                <DrilldownTreemap
                    series=chart
                    total_value=total_value
                    expanded=expanded
                    can_drill=can_drill
                    on_select=on_select
                />
            }
            .into_any(),
            ChartType::Bar => view! {
                <DrilldownBarChart
                    series=chart
                    total_value=total_value
                    can_drill=can_drill
                    on_select=on_select
                />
            }
            .into_any(),
        }
    };

    let body = move || match status.get() {
        ViewStatus::Idle => view! {
            <div class="drilldown-explorer__placeholder">
                "Selecione um período para carregar os dados."
            </div>
        }
        .into_any(),
        ViewStatus::Loading => view! {
            <div class="drilldown-explorer__loading">
                <Spinner />
                <span>"Carregando dados..."</span>
            </div>
        }
        .into_any(),
        ViewStatus::Failed(message) => view! {
            <div class="drilldown-explorer__error">
                {icon("alert")}
                <strong>"Erro ao carregar dados: "</strong>
                <span>{message}</span>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    on_click=on_retry
                >
                    "Tentar novamente"
                </Button>
            </div>
        }
        .into_any(),
        ViewStatus::Empty => view! {
            <div class="drilldown-explorer__empty">
                "Nenhum dado encontrado para os filtros selecionados."
            </div>
        }
        .into_any(),
        ViewStatus::Ready => view! {
            <CardAnimated delay_ms=0>
                <div class="drilldown-explorer__chart">{chart_view}</div>
            </CardAnimated>
            <CardAnimated delay_ms=80>
                <DetailTable
                    rows=page_rows
                    columns=columns
                    totals=totals
                    sort=sort
                    rank_offset=rank_offset
                    level_label=level_label
                    can_drill=can_drill
                    on_sort=on_sort
                    on_select=on_select
                />
                <PaginationControls
                    current_page=current_page
                    total_pages=total_pages
                    total_count=total_items
                    on_page_change=on_page_change
                />
            </CardAnimated>
        }
        .into_any(),
    };

    view! {
        <PageFrame page_id="d410_drilldown_explorer--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("bar-chart")}
                    <h1 class="page__title">
                        {move || format!("Detalhamento por {}", level_label.get())}
                    </h1>
                    <span class="page__subtitle">{move || mode.get().display_name()}</span>
                </div>
                <div class="page__header-right">
                    <Show when=move || !is_root.get()>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=on_back
                        >
                            {icon("arrow-left")}
                            " Voltar"
                        </Button>
                    </Show>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| view_state.update(|s| {
                            s.chart_type = match s.chart_type {
                                ChartType::Treemap => ChartType::Bar,
                                ChartType::Bar => ChartType::Treemap,
                            };
                        })
                    >
                        {move || match chart_type.get() {
                            ChartType::Treemap => icon("bar-chart"),
                            ChartType::Bar => icon("treemap"),
                        }}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| view_state.update(|s| s.show_chart = !s.show_chart)
                    >
                        {move || if show_chart.get() { icon("eye-off") } else { icon("eye") }}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| view_state.update(|s| s.is_expanded = !s.is_expanded)
                    >
                        {move || if expanded.get() { icon("minimize") } else { icon("maximize") }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <DrilldownBreadcrumbs path=path on_reset=on_reset on_navigate=on_navigate />
                {body}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_drilldown_explorer::error::DrilldownError;
    use contracts::dashboards::d410_drilldown::{build_params, AggregationRow, DateRangeInput};

    fn key() -> BindingKey {
        let filters = DrilldownFilters {
            date_range: Some(DateRangeInput::new("2024-03-01", "2024-03-31")),
            ..Default::default()
        };
        BindingKey {
            endpoint: "get_drilldown_data".into(),
            params: build_params(&filters, AnalysisMode::Region, 1, &[]),
        }
    }

    #[test]
    fn test_view_status_follows_binding() {
        let mut binding = RemoteBinding::default();
        assert_eq!(view_status(&binding), ViewStatus::Idle);

        let ticket = binding.request(key(), true).unwrap();
        assert_eq!(view_status(&binding), ViewStatus::Loading);

        binding.resolve(ticket, Ok(vec![]));
        assert_eq!(view_status(&binding), ViewStatus::Empty);

        let (ticket, _) = binding.retry().unwrap();
        binding.resolve(
            ticket,
            Ok(vec![AggregationRow {
                value: 10.0,
                ..Default::default()
            }]),
        );
        assert_eq!(view_status(&binding), ViewStatus::Ready);
    }

    #[test]
    fn test_view_status_shows_remote_message_verbatim() {
        let mut binding = RemoteBinding::default();
        let ticket = binding.request(key(), true).unwrap();
        binding.resolve(
            ticket,
            Err(DrilldownError::Remote("function get_drilldown_data does not exist".into())),
        );
        assert_eq!(
            view_status(&binding),
            ViewStatus::Failed("function get_drilldown_data does not exist".into())
        );
    }
}
