//! Warehouse / SKU / year selectors of one widget.

use futures::{StreamExt, select};
use shared::{
    Dimension, FilterController, FilterEffect, FilterEvent, FilterLayout, FilterSelection,
    SelectOption, SkuDefault,
};
use zoon::*;

use crate::api_client::ApiClient;
use crate::dataflow::{Actor, Relay, relay};
use crate::error_display::{ErrorAlert, log_error_console_only};
use crate::views::{ChipState, chip, error_text, muted_text, text_button};

#[derive(Clone)]
pub struct FilterBar {
    pub controller: Actor<FilterController>,
    pub warehouse_selected_relay: Relay<Option<String>>,
    pub skus_changed_relay: Relay<Option<Vec<SelectOption>>>,
    pub year_selected_relay: Relay<Option<String>>,
    pub unmounted_relay: Relay<()>,
}

impl FilterBar {
    pub fn new(
        widget: &'static str,
        layout: FilterLayout,
        sku_default: SkuDefault,
        api: ApiClient,
    ) -> Self {
        let (warehouse_selected_relay, mut warehouse_selected_stream) = relay();
        let (skus_changed_relay, mut skus_changed_stream) = relay();
        let (year_selected_relay, mut year_selected_stream) = relay();
        let (unmounted_relay, mut unmounted_stream) = relay();
        let (options_loaded_relay, mut options_loaded_stream) = relay::<FilterEvent>();

        let initial = FilterController::new(layout, sku_default);
        let controller = Actor::new(initial, async move |state| {
            let effects = state.lock_mut().mount();
            spawn_option_loads(widget, &api, effects, &options_loaded_relay);

            loop {
                let event = select! {
                    loaded = options_loaded_stream.next() => loaded,
                    warehouse = warehouse_selected_stream.next() => {
                        warehouse.map(FilterEvent::WarehouseSelected)
                    }
                    skus = skus_changed_stream.next() => skus.map(FilterEvent::SkusChanged),
                    year = year_selected_stream.next() => year.map(FilterEvent::YearSelected),
                    _ = unmounted_stream.next() => {
                        state.lock_mut().teardown();
                        break;
                    }
                    complete => break,
                };
                if let Some(event) = event {
                    let effects = state.lock_mut().apply(event);
                    spawn_option_loads(widget, &api, effects, &options_loaded_relay);
                }
            }
        });

        Self {
            controller,
            warehouse_selected_relay,
            skus_changed_relay,
            year_selected_relay,
            unmounted_relay,
        }
    }

    /// Current selection once every required dimension is settled, `None`
    /// while dependent option lists are still loading.
    pub fn ready_selection_signal(&self) -> impl Signal<Item = Option<FilterSelection>> + Send {
        self.controller
            .signal_ref(|controller| controller.is_ready().then(|| controller.selection()))
            .dedupe_cloned()
    }

    fn change_skus(&self, change: Option<Vec<SelectOption>>) {
        self.skus_changed_relay.send(change);
    }

    fn unmount(&self) {
        self.unmounted_relay.send(());
    }

    pub fn view(&self) -> impl Element {
        let bar = self.clone();
        let bar_for_removal = self.clone();
        El::new()
            .s(Width::fill())
            .child_signal(
                self.controller
                    .signal()
                    .map(move |controller| bar.render(&controller)),
            )
            .after_remove(move |_| bar_for_removal.unmount())
    }

    fn render(&self, controller: &FilterController) -> impl Element {
        let layout = controller.layout();
        Column::new()
            .s(Gap::new().y(8))
            .item(self.warehouse_row(controller))
            .item(layout.has_sku().then(|| self.sku_row(controller)))
            .item(layout.has_year().then(|| self.year_row(controller)))
    }

    fn warehouse_row(&self, controller: &FilterController) -> impl Element {
        let selected = controller.selected(Dimension::Warehouse).clone();
        let chips = controller.options(Dimension::Warehouse).iter().map(|warehouse| {
            let state = if selected.contains(warehouse) {
                ChipState::Selected
            } else {
                ChipState::Idle
            };
            let relay = self.warehouse_selected_relay.clone();
            let value = warehouse.clone();
            chip(warehouse, state, move || relay.send(Some(value.clone())))
        });
        labeled_row("Bodega", Dimension::Warehouse, controller, chips.collect())
    }

    fn sku_row(&self, controller: &FilterController) -> impl Element {
        let selected = controller.selected(Dimension::Sku).clone();
        let mut items: Vec<RawElOrText> = controller
            .options(Dimension::Sku)
            .iter()
            .map(|sku| {
                let state = if selected.contains(sku) {
                    ChipState::Selected
                } else if controller.is_sku_option_disabled(sku) {
                    ChipState::Disabled
                } else {
                    ChipState::Idle
                };
                let bar = self.clone();
                let next = toggled(&selected.to_options(), sku);
                chip(sku, state, move || bar.change_skus(Some(next.clone()))).unify()
            })
            .collect();

        if selected.is_empty() {
            items.insert(0, muted_text(controller.sku_placeholder()).unify());
        } else if controller.sku_clearable() {
            let bar = self.clone();
            items.push(text_button("Clear", true, move || bar.change_skus(None)).unify());
        }
        labeled_row("SKU", Dimension::Sku, controller, items)
    }

    fn year_row(&self, controller: &FilterController) -> impl Element {
        let selected = controller.selected(Dimension::Year).clone();
        let chips = controller.options(Dimension::Year).iter().map(|year| {
            let state = if selected.contains(year) {
                ChipState::Selected
            } else {
                ChipState::Idle
            };
            let relay = self.year_selected_relay.clone();
            let value = year.clone();
            chip(year, state, move || relay.send(Some(value.clone())))
        });
        labeled_row("Año", Dimension::Year, controller, chips.collect())
    }
}

/// SKU selection after pressing `sku`: removed when selected, appended otherwise.
fn toggled(selected: &[SelectOption], sku: &str) -> Vec<SelectOption> {
    if selected.iter().any(|option| option.value == sku) {
        selected
            .iter()
            .filter(|option| option.value != sku)
            .cloned()
            .collect()
    } else {
        let mut next = selected.to_vec();
        next.push(SelectOption::new(sku));
        next
    }
}

fn labeled_row(
    label: &str,
    dimension: Dimension,
    controller: &FilterController,
    items: Vec<impl Element>,
) -> impl Element {
    let status = if let Some(error) = controller.error(dimension) {
        Some(error_text(error).unify())
    } else if controller.is_loading(dimension) {
        Some(muted_text("Loading...").unify())
    } else {
        None
    };
    Row::new()
        .s(Gap::new().x(8).y(6))
        .multiline()
        .item(
            El::new()
                .s(Width::exact(64))
                .s(Font::new().size(13).weight(FontWeight::Medium))
                .child(Text::new(label)),
        )
        .items(items)
        .item(status)
}

fn spawn_option_loads(
    widget: &'static str,
    api: &ApiClient,
    effects: Vec<FilterEffect>,
    options_loaded_relay: &Relay<FilterEvent>,
) {
    for effect in effects {
        let api = api.clone();
        let options_loaded_relay = options_loaded_relay.clone();
        Task::start(async move {
            let endpoint = effect.endpoint();
            let query = effect.query();
            let result = api.list(endpoint, &query).await;
            if let Err(error) = &result {
                log_error_console_only(ErrorAlert::new_fetch_error(
                    widget,
                    &api.describe(endpoint, &query),
                    error,
                ));
            }
            options_loaded_relay.send(FilterEvent::OptionsLoaded {
                dimension: effect.dimension(),
                token: effect.token(),
                result,
            });
        });
    }
}
