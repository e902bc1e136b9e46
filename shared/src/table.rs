//! Paginated table fetching with latest-request-wins commits.

use crate::api::{
    ApiQuery, CellFormat, Column, Endpoint, PARAM_PAGE, PARAM_PAGE_SIZE, PARAM_SKU,
    PARAM_WAREHOUSE, PageResult, Row, TableKind,
};
use crate::error::FetchError;
use crate::request::{RequestSlot, RequestToken};

#[derive(Clone, Debug, PartialEq)]
pub struct TableRequest {
    pub token: RequestToken,
    pub endpoint: Endpoint,
    pub query: ApiQuery,
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableFetcher {
    kind: TableKind,
    warehouses: Vec<String>,
    skus: Vec<String>,
    filters_set: bool,
    page: u32,
    page_size: Option<u32>,
    result: PageResult,
    error: Option<FetchError>,
    slot: RequestSlot,
    torn_down: bool,
}

impl TableFetcher {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            warehouses: Vec::new(),
            skus: Vec::new(),
            filters_set: false,
            page: 1,
            page_size: None,
            result: PageResult::default(),
            error: None,
            slot: RequestSlot::default(),
            torn_down: false,
        }
    }

    /// Rows per page to ask for; the API default applies otherwise.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Apply new upstream filters and go back to the first page.
    ///
    /// Unchanged filters produce no request. Tables that are not keyed by SKU
    /// ignore `skus`.
    pub fn set_filters(&mut self, warehouses: &[String], skus: &[String]) -> Option<TableRequest> {
        if self.torn_down {
            return None;
        }
        let skus = if self.kind.filters_by_sku() {
            skus.to_vec()
        } else {
            Vec::new()
        };
        if self.filters_set && self.warehouses == warehouses && self.skus == skus {
            return None;
        }

        self.filters_set = true;
        self.warehouses = warehouses.to_vec();
        self.skus = skus;
        self.page = 1;
        self.request()
    }

    /// Request for the current filters and page; `None` without a warehouse.
    pub fn request(&mut self) -> Option<TableRequest> {
        if self.torn_down || self.warehouses.is_empty() {
            self.slot.retire();
            return None;
        }
        let mut query = ApiQuery::new()
            .repeated(PARAM_WAREHOUSE, &self.warehouses)
            .repeated(PARAM_SKU, &self.skus)
            .param(PARAM_PAGE, self.page.to_string());
        if let Some(page_size) = self.page_size {
            query = query.param(PARAM_PAGE_SIZE, page_size.to_string());
        }
        Some(TableRequest {
            token: self.slot.issue(),
            endpoint: Endpoint::Table(self.kind),
            query,
            page: self.page,
        })
    }

    /// Upstream filters are changing: drop the request in flight so nothing
    /// commits until the next `set_filters`, which always issues a request.
    pub fn suspend(&mut self) {
        self.filters_set = false;
        self.slot.retire();
    }

    pub fn next_page(&mut self) -> Option<TableRequest> {
        if !self.can_next() {
            return None;
        }
        self.page += 1;
        self.request()
    }

    pub fn prev_page(&mut self) -> Option<TableRequest> {
        if !self.can_prev() {
            return None;
        }
        self.page -= 1;
        self.request()
    }

    pub fn can_prev(&self) -> bool {
        self.error.is_none() && self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.error.is_none() && self.page < self.result.total_pages
    }

    /// Store the response for `token`. Returns `false` when it was stale.
    pub fn commit(&mut self, token: RequestToken, result: Result<PageResult, FetchError>) -> bool {
        if self.torn_down || !self.slot.settle(token) {
            return false;
        }
        match result {
            Ok(page) => {
                self.result = page;
                self.error = None;
            }
            Err(error) => self.error = Some(error),
        }
        true
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.slot.retire();
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn result(&self) -> &PageResult {
        &self.result
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.result.total_pages)
    }
}

// ===== CELLS =====

/// ABC class of a SKU, shown as a coloured badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    A,
    B,
    C,
    Other,
}

impl From<&str> for Classification {
    fn from(value: &str) -> Self {
        match value.trim() {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            _ => Self::Other,
        }
    }
}

/// Display text of one cell. Missing and null values render empty;
/// fractional numbers get two decimals.
pub fn cell_text(row: &Row, column: &Column) -> String {
    use serde_json::Value;

    match row.get(column.key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => match (column.format, number.as_f64()) {
            (CellFormat::Number, Some(value)) if value.fract() != 0.0 => format!("{value:.2}"),
            _ => number.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterController, FilterEffect, FilterEvent};
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn page(page: u32, total_pages: u32, sku: &str) -> PageResult {
        serde_json::from_value(json!({
            "data": [{ "sku": sku }],
            "total": 20,
            "page": page,
            "total_pages": total_pages,
        }))
        .unwrap()
    }

    fn options_loaded(effect: &FilterEffect, values: &[&str]) -> FilterEvent {
        FilterEvent::OptionsLoaded {
            dimension: effect.dimension(),
            token: effect.token(),
            result: Ok(strings(values)),
        }
    }

    /// Feed the filter state into the fetcher the way the table widget does.
    fn follow(fetcher: &mut TableFetcher, filters: &FilterController) -> Option<TableRequest> {
        if filters.is_ready() {
            let selection = filters.selection();
            fetcher.set_filters(&selection.warehouses, &selection.skus)
        } else {
            fetcher.suspend();
            None
        }
    }

    fn rows_of(warehouse: &str) -> PageResult {
        serde_json::from_value(json!({
            "data": [{ "sku": "S1", "bodega": warehouse }],
            "total": 1,
            "page": 1,
            "total_pages": 1,
        }))
        .unwrap()
    }

    /// Table keyed by SKU, filters mounted with W1/W2 and W1's SKUs loaded.
    fn mounted_table() -> (FilterController, TableFetcher, TableRequest) {
        let kind = TableKind::Consumption;
        let mut filters = FilterController::new(kind.filter_layout(), kind.sku_default());
        let mut fetcher = TableFetcher::new(kind);

        let mount = filters.mount();
        let skus = filters.apply(options_loaded(&mount[0], &["W1", "W2"]));
        filters.apply(options_loaded(&skus[0], &["S1"]));
        let request = follow(&mut fetcher, &filters).unwrap();
        (filters, fetcher, request)
    }

    #[test]
    fn warehouse_change_rejects_page_of_previous_warehouse() {
        let (mut filters, mut fetcher, w1) = mounted_table();
        assert_eq!(w1.query.values(PARAM_WAREHOUSE), vec!["W1"]);

        let skus = filters.apply(FilterEvent::WarehouseSelected(Some("W2".to_string())));
        assert!(follow(&mut fetcher, &filters).is_none());

        assert!(!fetcher.commit(w1.token, Ok(rows_of("W1"))));
        assert!(fetcher.result().data.is_empty());
        assert!(!fetcher.is_loading());

        filters.apply(options_loaded(&skus[0], &["S9"]));
        let w2 = follow(&mut fetcher, &filters).unwrap();
        assert_eq!(w2.query.values(PARAM_WAREHOUSE), vec!["W2"]);
        assert!(fetcher.commit(w2.token, Ok(rows_of("W2"))));
        assert_eq!(fetcher.result().data[0]["bodega"], "W2");
    }

    #[test]
    fn returning_to_previous_warehouse_fetches_again() {
        let (mut filters, mut fetcher, w1) = mounted_table();

        filters.apply(FilterEvent::WarehouseSelected(Some("W2".to_string())));
        assert!(follow(&mut fetcher, &filters).is_none());
        let skus = filters.apply(FilterEvent::WarehouseSelected(Some("W1".to_string())));
        assert!(follow(&mut fetcher, &filters).is_none());
        filters.apply(options_loaded(&skus[0], &["S1"]));

        let again = follow(&mut fetcher, &filters).unwrap();
        assert_ne!(again.token, w1.token);
        assert!(!fetcher.commit(w1.token, Ok(rows_of("W1"))));
        assert!(fetcher.commit(again.token, Ok(rows_of("W1"))));
    }

    #[test]
    fn query_encodes_filters_then_page() {
        let mut fetcher = TableFetcher::new(TableKind::Consumption);
        let request = fetcher
            .set_filters(&strings(&["B1", "B2"]), &strings(&["S1"]))
            .unwrap();

        assert_eq!(request.endpoint.path(), "/api/table-2");
        assert_eq!(request.query.to_string(), "bodega=B1&bodega=B2&sku=S1&page=1");
    }

    #[test]
    fn warehouse_only_tables_drop_skus() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let request = fetcher
            .set_filters(&strings(&["B1"]), &strings(&["S1"]))
            .unwrap();

        assert_eq!(request.query.to_string(), "bodega=B1&page=1");
    }

    #[test]
    fn page_size_follows_page() {
        let mut fetcher = TableFetcher::new(TableKind::Replenishment).with_page_size(25);
        let request = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();

        assert_eq!(request.query.to_string(), "bodega=B1&page=1&page_size=25");
    }

    #[test]
    fn no_request_without_warehouse() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        assert_eq!(fetcher.set_filters(&[], &[]), None);
        assert!(!fetcher.is_loading());
    }

    #[test]
    fn unchanged_filters_are_deduplicated() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        assert!(fetcher.set_filters(&strings(&["B1"]), &[]).is_some());
        assert!(fetcher.set_filters(&strings(&["B1"]), &[]).is_none());
    }

    #[test]
    fn out_of_order_responses_keep_newest() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let first = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();
        let second = fetcher.set_filters(&strings(&["B2"]), &[]).unwrap();

        assert!(fetcher.commit(second.token, Ok(page(1, 3, "new"))));
        assert!(!fetcher.commit(first.token, Ok(page(1, 1, "old"))));

        assert_eq!(fetcher.result().data[0]["sku"], "new");
        assert_eq!(fetcher.result().total_pages, 3);
    }

    #[test]
    fn pagination_respects_bounds() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let request = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();
        fetcher.commit(request.token, Ok(page(1, 2, "S1")));

        assert!(!fetcher.can_prev());
        assert!(fetcher.prev_page().is_none());

        let request = fetcher.next_page().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.query.values(PARAM_PAGE), vec!["2"]);
        fetcher.commit(request.token, Ok(page(2, 2, "S2")));

        assert!(!fetcher.can_next());
        assert!(fetcher.next_page().is_none());
        assert_eq!(fetcher.page_label(), "Page 2 of 2");
    }

    #[test]
    fn new_filters_reset_page() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let request = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();
        fetcher.commit(request.token, Ok(page(1, 5, "S1")));
        fetcher.next_page();

        let request = fetcher.set_filters(&strings(&["B2"]), &[]).unwrap();

        assert_eq!(request.page, 1);
        assert_eq!(fetcher.page(), 1);
    }

    #[test]
    fn error_disables_pagination_until_next_success() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let request = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();
        fetcher.commit(request.token, Ok(page(1, 3, "S1")));

        let request = fetcher.next_page().unwrap();
        fetcher.commit(request.token, Err(FetchError::Status { status: 500 }));
        assert!(!fetcher.can_next());
        assert!(!fetcher.can_prev());

        let request = fetcher.request().unwrap();
        fetcher.commit(request.token, Ok(page(2, 3, "S2")));
        assert!(fetcher.error().is_none());
        assert!(fetcher.can_next());
    }

    #[test]
    fn teardown_drops_inflight_response() {
        let mut fetcher = TableFetcher::new(TableKind::Classification);
        let request = fetcher.set_filters(&strings(&["B1"]), &[]).unwrap();
        fetcher.teardown();

        assert!(!fetcher.commit(request.token, Ok(page(1, 1, "S1"))));
        assert!(fetcher.result().data.is_empty());
    }

    #[test]
    fn cells_format_by_column() {
        let row: Row = serde_json::from_value(json!({
            "sku": "S1",
            "mean": 12.3456,
            "T": 7,
            "politica": null,
        }))
        .unwrap();
        let columns = TableKind::ReviewPolicy.columns();
        let cell = |key: &str| {
            let column = columns.iter().find(|column| column.key == key).unwrap();
            cell_text(&row, column)
        };

        assert_eq!(cell("sku"), "S1");
        assert_eq!(cell("mean"), "12.35");
        assert_eq!(cell("T"), "7");
        assert_eq!(cell("politica"), "");
        assert_eq!(cell("costo"), "");
    }

    #[test]
    fn classification_badges() {
        assert_eq!(Classification::from("A"), Classification::A);
        assert_eq!(Classification::from(" C "), Classification::C);
        assert_eq!(Classification::from("Z"), Classification::Other);
    }
}
