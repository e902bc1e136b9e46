//! Cascading filter controller: warehouse → SKU (→ year).
//!
//! The controller is a plain state struct driven by [`FilterController::apply`].
//! It never performs I/O itself; it returns [`FilterEffect`]s describing the
//! option lists that must be fetched, and the runtime feeds the responses back
//! as [`FilterEvent::OptionsLoaded`] together with the token they were issued
//! with. Responses for superseded tokens are dropped, so a slow reply for an
//! old warehouse can never overwrite the SKU list of the current one.

use crate::api::{ApiQuery, Endpoint, PARAM_WAREHOUSE};
use crate::error::FetchError;
use crate::request::{RequestSlot, RequestToken};
use crate::selection::{
    MAX_SKU_SELECTION, SelectOption, SelectionSet, is_clearable, is_option_disabled,
    prevent_deletion,
};

/// Identifiers offered for one dimension; each value doubles as its label.
pub type OptionList = Vec<String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterLayout {
    WarehouseOnly,
    WarehouseSku,
    WarehouseSkuYear,
}

impl FilterLayout {
    pub fn has_sku(self) -> bool {
        matches!(self, Self::WarehouseSku | Self::WarehouseSkuYear)
    }

    pub fn has_year(self) -> bool {
        matches!(self, Self::WarehouseSkuYear)
    }
}

/// What the SKU selection becomes once a fresh option list arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkuDefault {
    /// Stay empty, meaning "all SKUs".
    #[default]
    All,
    /// Select the first available SKU.
    First,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterPhase {
    Uninitialized,
    WarehousesLoaded,
    DependentsLoading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Warehouse,
    Sku,
    Year,
}

impl Dimension {
    pub fn label(self) -> &'static str {
        match self {
            Self::Warehouse => "bodegas",
            Self::Sku => "SKUs",
            Self::Year => "years",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterEffect {
    LoadWarehouses { token: RequestToken },
    LoadYears { token: RequestToken },
    LoadSkus { warehouses: Vec<String>, token: RequestToken },
}

impl FilterEffect {
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::LoadWarehouses { .. } => Dimension::Warehouse,
            Self::LoadYears { .. } => Dimension::Year,
            Self::LoadSkus { .. } => Dimension::Sku,
        }
    }

    pub fn token(&self) -> RequestToken {
        match self {
            Self::LoadWarehouses { token }
            | Self::LoadYears { token }
            | Self::LoadSkus { token, .. } => *token,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::LoadWarehouses { .. } => Endpoint::AvailableWarehouses,
            Self::LoadYears { .. } => Endpoint::AvailableYears,
            Self::LoadSkus { .. } => Endpoint::AvailableSkus,
        }
    }

    pub fn query(&self) -> ApiQuery {
        match self {
            Self::LoadSkus { warehouses, .. } => {
                ApiQuery::new().repeated(PARAM_WAREHOUSE, warehouses)
            }
            Self::LoadWarehouses { .. } | Self::LoadYears { .. } => ApiQuery::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterEvent {
    OptionsLoaded {
        dimension: Dimension,
        token: RequestToken,
        result: Result<OptionList, FetchError>,
    },
    WarehouseSelected(Option<String>),
    /// Payload of the SKU multi-select; `None` when the input was cleared.
    SkusChanged(Option<Vec<SelectOption>>),
    YearSelected(Option<String>),
}

/// Snapshot of the selections downstream fetchers key their requests on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub warehouses: Vec<String>,
    pub skus: Vec<String>,
    pub years: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct DimensionState {
    options: OptionList,
    selected: SelectionSet,
    error: Option<String>,
    slot: RequestSlot,
}

impl DimensionState {
    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterController {
    layout: FilterLayout,
    sku_default: SkuDefault,
    allow_clear_all: bool,
    warehouse: DimensionState,
    sku: DimensionState,
    year: DimensionState,
    warehouses_loaded: bool,
    phase: FilterPhase,
    torn_down: bool,
}

impl FilterController {
    /// Widgets that default to "all SKUs" may also clear back to it; widgets
    /// that need explicit SKUs keep at least one selected.
    pub fn new(layout: FilterLayout, sku_default: SkuDefault) -> Self {
        Self {
            layout,
            sku_default,
            allow_clear_all: sku_default == SkuDefault::All,
            warehouse: DimensionState::default(),
            sku: DimensionState::default(),
            year: DimensionState::default(),
            warehouses_loaded: false,
            phase: FilterPhase::Uninitialized,
            torn_down: false,
        }
    }

    /// Issue the initial option-list requests. Calling it again is a no-op.
    pub fn mount(&mut self) -> Vec<FilterEffect> {
        if self.torn_down || self.warehouses_loaded || self.warehouse.slot.is_pending() {
            return Vec::new();
        }
        let mut effects = vec![FilterEffect::LoadWarehouses {
            token: self.warehouse.slot.issue(),
        }];
        if self.layout.has_year() {
            effects.push(FilterEffect::LoadYears {
                token: self.year.slot.issue(),
            });
        }
        effects
    }

    pub fn apply(&mut self, event: FilterEvent) -> Vec<FilterEffect> {
        if self.torn_down {
            return Vec::new();
        }
        let effects = match event {
            FilterEvent::OptionsLoaded {
                dimension,
                token,
                result,
            } => self.options_loaded(dimension, token, result),
            FilterEvent::WarehouseSelected(warehouse) => self.select_warehouse(warehouse),
            FilterEvent::SkusChanged(change) => {
                self.change_skus(change.as_deref());
                Vec::new()
            }
            FilterEvent::YearSelected(year) => {
                self.select_year(year);
                Vec::new()
            }
        };
        self.refresh_phase();
        effects
    }

    /// Stop accepting responses; anything still in flight is ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.warehouse.slot.retire();
        self.sku.slot.retire();
        self.year.slot.retire();
    }

    fn options_loaded(
        &mut self,
        dimension: Dimension,
        token: RequestToken,
        result: Result<OptionList, FetchError>,
    ) -> Vec<FilterEffect> {
        let state = self.dimension_mut(dimension);
        if !state.slot.settle(token) {
            return Vec::new();
        }

        let options = match result {
            Ok(options) => options,
            Err(error) => {
                state.error = Some(format!("Error fetching {}: {error}", dimension.label()));
                return Vec::new();
            }
        };
        state.error = None;
        state.options = options;

        match dimension {
            Dimension::Warehouse => {
                self.warehouses_loaded = true;
                let first = self.warehouse.options.first().cloned();
                self.select_warehouse(first)
            }
            Dimension::Sku => {
                let sku = &mut self.sku;
                let options = &sku.options;
                sku.selected.retain(|value| options.iter().any(|option| option == value));
                if self.sku_default == SkuDefault::First && sku.selected.is_empty() {
                    if let Some(first) = sku.options.first() {
                        sku.selected = SelectionSet::single(first.clone());
                    }
                }
                Vec::new()
            }
            Dimension::Year => {
                let year = &mut self.year;
                let keep = year.selected.first().is_some_and(|selected| year.has_option(selected));
                if !keep {
                    year.selected = year
                        .options
                        .first()
                        .map(|first| SelectionSet::single(first.clone()))
                        .unwrap_or_default();
                }
                Vec::new()
            }
        }
    }

    fn select_warehouse(&mut self, warehouse: Option<String>) -> Vec<FilterEffect> {
        let Some(warehouse) = warehouse else {
            self.warehouse.selected.clear();
            self.sku.selected.clear();
            self.sku.options.clear();
            self.sku.slot.retire();
            return Vec::new();
        };

        if !self.warehouse.has_option(&warehouse) {
            return Vec::new();
        }
        if self.warehouse.selected.len() == 1 && self.warehouse.selected.contains(&warehouse) {
            return Vec::new();
        }

        self.warehouse.selected = SelectionSet::single(warehouse);
        if !self.layout.has_sku() {
            return Vec::new();
        }

        self.sku.selected.clear();
        self.sku.options.clear();
        self.sku.error = None;
        vec![FilterEffect::LoadSkus {
            warehouses: self.warehouse.selected.values().to_vec(),
            token: self.sku.slot.issue(),
        }]
    }

    fn change_skus(&mut self, change: Option<&[SelectOption]>) {
        if !self.layout.has_sku() {
            return;
        }

        let current = self.sku.selected.values().to_vec();
        let mut next = None;
        prevent_deletion(&current, |values| next = Some(values), self.allow_clear_all)(change);
        let Some(next) = next else {
            return;
        };

        let candidate = SelectionSet::from(next);
        let known = candidate
            .values()
            .iter()
            .all(|value| self.sku.has_option(value));
        if known && candidate.len() <= MAX_SKU_SELECTION {
            self.sku.selected = candidate;
        }
    }

    fn select_year(&mut self, year: Option<String>) {
        if !self.layout.has_year() {
            return;
        }
        match year {
            Some(year) if self.year.has_option(&year) => {
                self.year.selected = SelectionSet::single(year);
            }
            Some(_) => {}
            None => self.year.selected.clear(),
        }
    }

    fn refresh_phase(&mut self) {
        self.phase = if !self.warehouses_loaded {
            FilterPhase::Uninitialized
        } else if (self.layout.has_sku() && self.sku.slot.is_pending())
            || (self.layout.has_year() && self.year.slot.is_pending())
        {
            FilterPhase::DependentsLoading
        } else if self.is_ready() {
            FilterPhase::Ready
        } else {
            FilterPhase::WarehousesLoaded
        };
    }

    fn dimension_mut(&mut self, dimension: Dimension) -> &mut DimensionState {
        match dimension {
            Dimension::Warehouse => &mut self.warehouse,
            Dimension::Sku => &mut self.sku,
            Dimension::Year => &mut self.year,
        }
    }

    fn dimension(&self, dimension: Dimension) -> &DimensionState {
        match dimension {
            Dimension::Warehouse => &self.warehouse,
            Dimension::Sku => &self.sku,
            Dimension::Year => &self.year,
        }
    }

    // ===== QUERIES =====

    pub fn layout(&self) -> FilterLayout {
        self.layout
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    pub fn options(&self, dimension: Dimension) -> &[String] {
        &self.dimension(dimension).options
    }

    pub fn selected(&self, dimension: Dimension) -> &SelectionSet {
        &self.dimension(dimension).selected
    }

    pub fn error(&self, dimension: Dimension) -> Option<&str> {
        self.dimension(dimension).error.as_deref()
    }

    pub fn is_loading(&self, dimension: Dimension) -> bool {
        self.dimension(dimension).slot.is_pending()
    }

    /// Every required dimension has options and a usable selection.
    pub fn is_ready(&self) -> bool {
        if !self.warehouses_loaded || self.warehouse.selected.is_empty() {
            return false;
        }
        let sku_ready = !self.layout.has_sku()
            || (!self.sku.slot.is_pending()
                && (self.sku_default == SkuDefault::All || !self.sku.selected.is_empty()));
        let year_ready = !self.layout.has_year() || !self.year.selected.is_empty();
        sku_ready && year_ready
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            warehouses: self.warehouse.selected.values().to_vec(),
            skus: self.sku.selected.values().to_vec(),
            years: self.year.selected.values().to_vec(),
        }
    }

    pub fn sku_clearable(&self) -> bool {
        is_clearable(self.sku.selected.values(), self.allow_clear_all)
    }

    pub fn is_sku_option_disabled(&self, option: &str) -> bool {
        is_option_disabled(self.sku.selected.values(), option, MAX_SKU_SELECTION)
    }

    pub fn sku_placeholder(&self) -> &'static str {
        match (self.sku.selected.is_empty(), self.sku_default) {
            (true, SkuDefault::All) => "All SKUs (default)",
            _ => "Select SKUs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn loaded(effect: &FilterEffect, values: &[&str]) -> FilterEvent {
        FilterEvent::OptionsLoaded {
            dimension: effect.dimension(),
            token: effect.token(),
            result: Ok(strings(values)),
        }
    }

    /// Mounted controller with warehouses `W1`, `W2` loaded.
    fn mounted(layout: FilterLayout, sku_default: SkuDefault) -> (FilterController, Vec<FilterEffect>) {
        let mut controller = FilterController::new(layout, sku_default);
        let mount = controller.mount();
        let effects = controller.apply(loaded(&mount[0], &["W1", "W2"]));
        (controller, effects)
    }

    #[test]
    fn mount_requests_warehouses_and_years() {
        let mut controller =
            FilterController::new(FilterLayout::WarehouseSkuYear, SkuDefault::First);
        let effects = controller.mount();

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].endpoint(), Endpoint::AvailableWarehouses);
        assert_eq!(effects[1].endpoint(), Endpoint::AvailableYears);
        assert_eq!(controller.phase(), FilterPhase::Uninitialized);
        assert!(controller.mount().is_empty());
    }

    #[test]
    fn first_warehouse_is_auto_selected_and_skus_requested() {
        let (controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);

        assert_eq!(controller.selected(Dimension::Warehouse).values(), strings(&["W1"]));
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].query().values(PARAM_WAREHOUSE), vec!["W1"]);
        assert_eq!(controller.phase(), FilterPhase::DependentsLoading);
    }

    #[test]
    fn changing_warehouse_resets_skus_and_fetches_once() {
        let (mut controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);
        controller.apply(loaded(&effects[0], &["S1", "S2"]));
        controller.apply(FilterEvent::SkusChanged(Some(vec![SelectOption::new("S2")])));
        assert_eq!(controller.selected(Dimension::Sku).values(), strings(&["S2"]));

        let effects = controller.apply(FilterEvent::WarehouseSelected(Some("W2".to_string())));

        assert!(controller.selected(Dimension::Sku).is_empty());
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            FilterEffect::LoadSkus { warehouses, .. } => assert_eq!(warehouses, &strings(&["W2"])),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(controller.selected(Dimension::Warehouse).values(), strings(&["W2"]));
    }

    #[test]
    fn stale_sku_list_is_discarded() {
        let (mut controller, first) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);
        let second = controller.apply(FilterEvent::WarehouseSelected(Some("W2".to_string())));

        controller.apply(loaded(&second[0], &["W2-SKU"]));
        controller.apply(loaded(&first[0], &["W1-SKU"]));

        assert_eq!(controller.options(Dimension::Sku), strings(&["W2-SKU"]).as_slice());
        assert_eq!(controller.phase(), FilterPhase::Ready);
    }

    #[test]
    fn sku_changes_never_touch_warehouse() {
        let (mut controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);
        controller.apply(loaded(&effects[0], &["S1", "S2"]));

        let effects = controller.apply(FilterEvent::SkusChanged(Some(vec![SelectOption::new("S1")])));

        assert!(effects.is_empty());
        assert_eq!(controller.selected(Dimension::Warehouse).values(), strings(&["W1"]));
    }

    #[test]
    fn sku_selection_is_capped() {
        let (mut controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);
        controller.apply(loaded(&effects[0], &["S1", "S2", "S3", "S4", "S5"]));

        let four: Vec<SelectOption> = ["S1", "S2", "S3", "S4"].into_iter().map(SelectOption::new).collect();
        controller.apply(FilterEvent::SkusChanged(Some(four.clone())));
        assert!(controller.is_sku_option_disabled("S5"));
        assert!(!controller.is_sku_option_disabled("S1"));

        let mut five = four;
        five.push(SelectOption::new("S5"));
        controller.apply(FilterEvent::SkusChanged(Some(five)));

        assert_eq!(controller.selected(Dimension::Sku).len(), MAX_SKU_SELECTION);
        assert!(!controller.selected(Dimension::Sku).contains("S5"));
    }

    #[test]
    fn first_sku_default_keeps_last_sku() {
        let (mut controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::First);
        controller.apply(loaded(&effects[0], &["S1", "S2"]));
        assert_eq!(controller.selected(Dimension::Sku).values(), strings(&["S1"]));
        assert!(!controller.sku_clearable());

        controller.apply(FilterEvent::SkusChanged(None));

        assert_eq!(controller.selected(Dimension::Sku).values(), strings(&["S1"]));
    }

    #[test]
    fn all_sku_default_clears_to_all() {
        let (mut controller, effects) = mounted(FilterLayout::WarehouseSku, SkuDefault::All);
        controller.apply(loaded(&effects[0], &["S1", "S2"]));
        controller.apply(FilterEvent::SkusChanged(Some(vec![SelectOption::new("S1")])));
        assert!(controller.sku_clearable());

        controller.apply(FilterEvent::SkusChanged(None));

        assert!(controller.selected(Dimension::Sku).is_empty());
        assert_eq!(controller.sku_placeholder(), "All SKUs (default)");
        assert!(controller.is_ready());
    }

    #[test]
    fn years_default_to_first_option() {
        let mut controller =
            FilterController::new(FilterLayout::WarehouseSkuYear, SkuDefault::First);
        let mount = controller.mount();
        let skus = controller.apply(loaded(&mount[0], &["W1"]));
        controller.apply(loaded(&mount[1], &["2023", "2024"]));
        controller.apply(loaded(&skus[0], &["S1"]));

        assert_eq!(controller.selected(Dimension::Year).values(), strings(&["2023"]));
        assert_eq!(
            controller.selection(),
            FilterSelection {
                warehouses: strings(&["W1"]),
                skus: strings(&["S1"]),
                years: strings(&["2023"]),
            }
        );
        assert_eq!(controller.phase(), FilterPhase::Ready);

        controller.apply(FilterEvent::YearSelected(Some("2024".to_string())));
        assert_eq!(controller.selected(Dimension::Year).values(), strings(&["2024"]));
    }

    #[test]
    fn failed_option_load_records_error() {
        let mut controller = FilterController::new(FilterLayout::WarehouseOnly, SkuDefault::All);
        let mount = controller.mount();
        controller.apply(FilterEvent::OptionsLoaded {
            dimension: Dimension::Warehouse,
            token: mount[0].token(),
            result: Err(FetchError::Status { status: 500 }),
        });

        assert!(controller.error(Dimension::Warehouse).is_some());
        assert_eq!(controller.phase(), FilterPhase::Uninitialized);
    }

    #[test]
    fn teardown_ignores_late_responses() {
        let mut controller = FilterController::new(FilterLayout::WarehouseOnly, SkuDefault::All);
        let mount = controller.mount();
        controller.teardown();

        controller.apply(loaded(&mount[0], &["W1"]));

        assert!(controller.options(Dimension::Warehouse).is_empty());
        assert!(controller.mount().is_empty());
    }

    #[test]
    fn unknown_warehouse_is_rejected() {
        let (mut controller, _) = mounted(FilterLayout::WarehouseOnly, SkuDefault::All);
        let effects = controller.apply(FilterEvent::WarehouseSelected(Some("W9".to_string())));

        assert!(effects.is_empty());
        assert_eq!(controller.selected(Dimension::Warehouse).values(), strings(&["W1"]));
        assert_eq!(controller.phase(), FilterPhase::Ready);
    }
}
