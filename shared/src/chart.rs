//! Turns filter selections into chart requests and chart responses into
//! render-ready series and axis options.

use crate::api::{ApiQuery, ChartKind, Endpoint, PARAM_SKU, PARAM_WAREHOUSE, PARAM_YEAR, SeriesResult};
use crate::axis::{ChartOptions, min_max_values};
use crate::error::FetchError;
use crate::filters::FilterSelection;
use crate::request::{RequestSlot, RequestToken};

#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
    pub token: RequestToken,
    pub endpoint: Endpoint,
    pub query: ApiQuery,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartAdapter {
    kind: ChartKind,
    requested: Option<FilterSelection>,
    series: SeriesResult,
    options: ChartOptions,
    last_error: Option<FetchError>,
    slot: RequestSlot,
    torn_down: bool,
}

impl ChartAdapter {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            requested: None,
            series: SeriesResult::empty(kind.shape()),
            options: ChartOptions::titled(kind.title()),
            last_error: None,
            slot: RequestSlot::default(),
            torn_down: false,
        }
    }

    /// Request for `selection`, or `None` when a dimension the chart needs is
    /// still empty or nothing relevant changed since the last request.
    pub fn request_for(&mut self, selection: &FilterSelection) -> Option<ChartRequest> {
        if self.torn_down {
            return None;
        }
        let Some(relevant) = self.relevant(selection) else {
            self.requested = None;
            self.slot.retire();
            return None;
        };
        if self.requested.as_ref() == Some(&relevant) {
            return None;
        }

        let query = ApiQuery::new()
            .repeated(PARAM_WAREHOUSE, &relevant.warehouses)
            .repeated(PARAM_YEAR, &relevant.years)
            .repeated(PARAM_SKU, &relevant.skus);
        self.requested = Some(relevant);
        Some(ChartRequest {
            token: self.slot.issue(),
            endpoint: Endpoint::Chart(self.kind),
            query,
        })
    }

    /// Upstream filters are changing: drop the request in flight and forget
    /// the last requested selection. The last good series stays on screen.
    pub fn suspend(&mut self) {
        self.requested = None;
        self.slot.retire();
    }

    /// The part of `selection` this chart is keyed on, if complete.
    fn relevant(&self, selection: &FilterSelection) -> Option<FilterSelection> {
        let layout = self.kind.filter_layout();
        if selection.warehouses.is_empty()
            || (layout.has_sku() && selection.skus.is_empty())
            || (layout.has_year() && selection.years.is_empty())
        {
            return None;
        }
        Some(FilterSelection {
            warehouses: selection.warehouses.clone(),
            skus: if layout.has_sku() {
                selection.skus.clone()
            } else {
                Vec::new()
            },
            years: if layout.has_year() {
                selection.years.clone()
            } else {
                Vec::new()
            },
        })
    }

    /// Store the response for `token`. Failures keep the last good series.
    pub fn commit(&mut self, token: RequestToken, result: Result<SeriesResult, FetchError>) -> bool {
        if self.torn_down || !self.slot.settle(token) {
            return false;
        }
        let series = match result {
            Ok(series) => series,
            Err(error) => {
                self.last_error = Some(error);
                return true;
            }
        };

        match &series {
            SeriesResult::Lines(_) => {
                if let Some(bounds) = min_max_values(&series.raw_values()) {
                    self.options = self.options.with_y_bounds(bounds);
                }
            }
            SeriesResult::Pie(pie) => {
                self.options = self.options.with_labels(pie.labels.clone());
            }
        }
        self.series = series;
        self.last_error = None;
        true
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.slot.retire();
    }

    pub fn series(&self) -> &SeriesResult {
        &self.series
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_pending()
    }
}
