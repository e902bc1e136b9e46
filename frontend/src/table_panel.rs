//! Paginated table widget with its own filter bar.

use futures::{StreamExt, select};
use shared::{
    CellFormat, FetchError, PageResult, RequestToken, TableFetcher, TableKind,
    TableRequest, cell_text,
};
use zoon::*;

use crate::api_client::ApiClient;
use crate::dataflow::{Actor, Relay, relay};
use crate::filter_bar::FilterBar;
use crate::views::{
    BORDER_COLOR, MUTED_TEXT_COLOR, card, classification_badge, error_text, muted_text, text_button,
};

type PageLoaded = (RequestToken, Result<PageResult, FetchError>);

#[derive(Clone)]
pub struct TablePanel {
    kind: TableKind,
    filters: FilterBar,
    table: Actor<TableFetcher>,
    previous_page_clicked_relay: Relay<()>,
    next_page_clicked_relay: Relay<()>,
    unmounted_relay: Relay<()>,
}

impl TablePanel {
    pub fn new(kind: TableKind, api: ApiClient) -> Self {
        let filters = FilterBar::new(kind.title(), kind.filter_layout(), kind.sku_default(), api.clone());

        let (previous_page_clicked_relay, mut previous_page_clicked_stream) = relay();
        let (next_page_clicked_relay, mut next_page_clicked_stream) = relay();
        let (unmounted_relay, mut unmounted_stream) = relay();
        let (page_loaded_relay, mut page_loaded_stream) = relay::<PageLoaded>();

        let selection_signal = filters.ready_selection_signal();
        let fetcher = TableFetcher::new(kind).with_page_size(api.config().api.page_size);
        let table = Actor::new(fetcher, async move |state| {
            let mut selections = Box::pin(selection_signal.to_stream()).fuse();

            loop {
                let request = select! {
                    selection = selections.next() => match selection {
                        Some(Some(selection)) => state
                            .lock_mut()
                            .set_filters(&selection.warehouses, &selection.skus),
                        Some(None) => {
                            state.lock_mut().suspend();
                            None
                        }
                        None => break,
                    },
                    click = previous_page_clicked_stream.next() => {
                        click.and_then(|()| state.lock_mut().prev_page())
                    }
                    click = next_page_clicked_stream.next() => {
                        click.and_then(|()| state.lock_mut().next_page())
                    }
                    loaded = page_loaded_stream.next() => {
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
                    spawn_page_load(&api, request, &page_loaded_relay);
                }
            }
        });

        Self {
            kind,
            filters,
            table,
            previous_page_clicked_relay,
            next_page_clicked_relay,
            unmounted_relay,
        }
    }

    fn previous_page(&self) {
        self.previous_page_clicked_relay.send(());
    }

    fn next_page(&self) {
        self.next_page_clicked_relay.send(());
    }

    pub fn view(&self) -> impl Element {
        let panel = self.clone();
        let panel_for_removal = self.clone();
        card(
            self.kind.title(),
            Column::new()
                .s(Width::fill())
                .s(Gap::new().y(12))
                .item(self.filters.view())
                .item(
                    El::new()
                        .s(Width::fill())
                        .child_signal(self.table.signal().map(move |table| panel.render(&table))),
                )
                .after_remove(move |_| panel_for_removal.unmounted_relay.send(())),
        )
    }

    fn render(&self, table: &TableFetcher) -> RawElOrText {
        if let Some(error) = table.error() {
            return error_text(&format!("Error: {error}")).unify();
        }
        if table.result().data.is_empty() {
            let message = if table.is_loading() {
                "Loading..."
            } else {
                "No data"
            };
            return muted_text(message).unify();
        }

        let columns = self.kind.columns();
        let header = Row::new()
            .s(Width::fill())
            .s(Padding::new().y(6))
            .s(Borders::new().bottom(Border::new().width(1).color(BORDER_COLOR)))
            .s(Font::new().size(12).weight(FontWeight::SemiBold).color(MUTED_TEXT_COLOR))
            .items(columns.iter().map(|column| {
                El::new()
                    .s(Width::fill())
                    .child(Text::new(column.header))
            }));

        let rows = table.result().data.iter().map(|row| {
            Row::new()
                .s(Width::fill())
                .s(Padding::new().y(6))
                .s(Borders::new().bottom(Border::new().width(1).color(BORDER_COLOR)))
                .s(Font::new().size(13))
                .items(columns.iter().map(|column| {
                    let text = cell_text(row, column);
                    let cell = match column.format {
                        CellFormat::Classification => classification_badge(&text).unify(),
                        CellFormat::Text | CellFormat::Number => Text::new(&text).unify(),
                    };
                    El::new().s(Width::fill()).child(cell)
                }))
        });

        let previous = {
            let panel = self.clone();
            text_button("Previous", table.can_prev(), move || panel.previous_page())
        };
        let next = {
            let panel = self.clone();
            text_button("Next", table.can_next(), move || panel.next_page())
        };
        let pagination = Row::new()
            .s(Gap::new().x(12))
            .s(Align::new().center_y())
            .item(previous)
            .item(muted_text(&table.page_label()))
            .item(next);

        Column::new()
            .s(Width::fill())
            .item(header)
            .items(rows)
            .item(El::new().s(Padding::new().top(12)).child(pagination))
            .unify()
    }
}

fn spawn_page_load(api: &ApiClient, request: TableRequest, page_loaded_relay: &Relay<PageLoaded>) {
    let api = api.clone();
    let page_loaded_relay = page_loaded_relay.clone();
    Task::start(async move {
        let result = api.page(request.endpoint, &request.query).await;
        if let Err(error) = &result {
            zoon::eprintln!(
                "Error fetching {}: {}",
                api.describe(request.endpoint, &request.query),
                error
            );
        }
        page_loaded_relay.send((request.token, result));
    });
}
