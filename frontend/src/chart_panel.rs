//! Line and pie chart widgets with their own filter bar.

use futures::{StreamExt, select};
use shared::{
    AxisBounds, ChartAdapter, ChartKind, ChartRequest, FetchError, NamedSeries, PieData,
    RequestToken, SeriesResult, min_max_values,
};
use zoon::*;

use crate::api_client::ApiClient;
use crate::dataflow::{Actor, Relay, relay};
use crate::error_display::{ErrorAlert, log_error_console_only};
use crate::filter_bar::FilterBar;
use crate::views::{MUTED_TEXT_COLOR, card, muted_text, series_color};

const PLOT_HEIGHT: u32 = 160;
const BAR_WIDTH: u32 = 14;
const PIE_BAR_WIDTH: f64 = 240.0;

type SeriesLoaded = (RequestToken, Result<SeriesResult, FetchError>);

#[derive(Clone)]
pub struct ChartPanel {
    kind: ChartKind,
    filters: FilterBar,
    chart: Actor<ChartAdapter>,
    unmounted_relay: Relay<()>,
}

impl ChartPanel {
    pub fn new(kind: ChartKind, api: ApiClient) -> Self {
        let filters = FilterBar::new(kind.title(), kind.filter_layout(), kind.sku_default(), api.clone());

        let (unmounted_relay, mut unmounted_stream) = relay();
        let (series_loaded_relay, mut series_loaded_stream) = relay::<SeriesLoaded>();

        let selection_signal = filters.ready_selection_signal();
        let chart = Actor::new(ChartAdapter::new(kind), async move |state| {
            let mut selections = Box::pin(selection_signal.to_stream()).fuse();

            loop {
                let request = select! {
                    selection = selections.next() => match selection {
                        Some(Some(selection)) => state.lock_mut().request_for(&selection),
                        Some(None) => {
                            state.lock_mut().suspend();
                            None
                        }
                        None => break,
                    },
                    loaded = series_loaded_stream.next() => {
                        if let Some((token, result)) = loaded {
                            state.lock_mut().commit(token, result);
                        }
                        None
                    }
                    _ = unmounted_stream.next() => {
                        state.lock_mut().teardown();
                        break;
                    }
                    complete => break,
                };
                if let Some(request) = request {
                    spawn_series_load(kind, &api, request, &series_loaded_relay);
                }
            }
        });

        Self {
            kind,
            filters,
            chart,
            unmounted_relay,
        }
    }

    pub fn view(&self) -> impl Element {
        let panel = self.clone();
        card(
            self.kind.title(),
            Column::new()
                .s(Width::fill())
                .s(Gap::new().y(12))
                .item(self.filters.view())
                .item(
                    El::new()
                        .s(Width::fill())
                        .child_signal(self.chart.signal().map(|chart| render(&chart))),
                )
                .after_remove(move |_| panel.unmounted_relay.send(())),
        )
    }
}

fn render(chart: &ChartAdapter) -> RawElOrText {
    if chart.series().is_empty() {
        let message = if chart.is_loading() {
            "Loading..."
        } else {
            "No data"
        };
        return muted_text(message).unify();
    }
    match chart.series() {
        SeriesResult::Lines(series) => {
            let bounds = chart
                .options()
                .y_axis
                .bounds()
                .or_else(|| min_max_values(&chart.series().raw_values()));
            match bounds {
                Some(bounds) => line_plot(series, bounds).unify(),
                None => muted_text("No data").unify(),
            }
        }
        SeriesResult::Pie(pie) => pie_shares(pie, &chart.options().labels).unify(),
    }
}

/// One bar row per series, bar heights scaled to the y-axis bounds.
fn line_plot(series: &[NamedSeries], bounds: AxisBounds) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Gap::new().y(16))
        .item(
            El::new()
                .s(Font::new().size(11).color(MUTED_TEXT_COLOR))
                .child(Text::new(&format!("y: {:.0} to {:.0}", bounds.min, bounds.max))),
        )
        .items(series.iter().enumerate().map(move |(index, series)| {
            let color = series_color(index);
            Column::new()
                .s(Gap::new().y(4))
                .item(
                    El::new()
                        .s(Font::new().size(12).color(color))
                        .child(Text::new(&series.name)),
                )
                .item(
                    Row::new()
                        .s(Height::exact(PLOT_HEIGHT))
                        .s(Gap::new().x(2))
                        .items(series.data.iter().map(move |point| {
                            let height = point
                                .y
                                .map(|y| (bounds.fraction(y) * f64::from(PLOT_HEIGHT)).round() as u32)
                                .unwrap_or(0);
                            let tooltip = match point.y {
                                Some(y) => format!("{}: {y}", point.x),
                                None => point.x.to_string(),
                            };
                            El::new()
                                .s(Width::exact(BAR_WIDTH))
                                .s(Height::exact(height))
                                .s(Align::new().bottom())
                                .s(Background::new().color(color))
                                .update_raw_el(move |raw_el| raw_el.attr("title", &tooltip))
                        })),
                )
        }))
}

/// Horizontal share bars, one per pie label.
fn pie_shares(pie: &PieData, labels: &[String]) -> impl Element {
    let shares = pie.shares();
    Column::new()
        .s(Gap::new().y(6))
        .items(shares.into_iter().enumerate().map(|(index, (label, value, share))| {
            let label = labels.get(index).map(String::as_str).unwrap_or(label);
            Row::new()
                .s(Gap::new().x(8))
                .s(Align::new().center_y())
                .item(
                    El::new()
                        .s(Width::exact(120))
                        .s(Font::new().size(13))
                        .child(Text::new(label)),
                )
                .item(
                    El::new()
                        .s(Width::exact((share * PIE_BAR_WIDTH).round() as u32))
                        .s(Height::exact(12))
                        .s(RoundedCorners::all(2))
                        .s(Background::new().color(series_color(index))),
                )
                .item(
                    El::new()
                        .s(Font::new().size(12).color(MUTED_TEXT_COLOR))
                        .child(Text::new(&format!("{value} ({:.1}%)", share * 100.0))),
                )
        }))
}

fn spawn_series_load(
    kind: ChartKind,
    api: &ApiClient,
    request: ChartRequest,
    series_loaded_relay: &Relay<SeriesLoaded>,
) {
    let api = api.clone();
    let series_loaded_relay = series_loaded_relay.clone();
    Task::start(async move {
        let result = api
            .series(request.endpoint, &request.query, kind.shape())
            .await;
        if let Err(error) = &result {
            log_error_console_only(ErrorAlert::new_fetch_error(
                kind.title(),
                &api.describe(request.endpoint, &request.query),
                error,
            ));
        }
        series_loaded_relay.send((request.token, result));
    });
}
