use serde::{Deserialize, Serialize};

pub mod api;
pub mod axis;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod request;
pub mod selection;
pub mod table;

pub use api::{
    ApiQuery, CellFormat, ChartKind, ChartShape, Column, Endpoint, LineChartResponse, ListResponse,
    NamedSeries, PageResult, PieChartResponse, PieData, Point, Row, SeriesResult, TableKind, XValue,
};
pub use axis::{AxisBounds, AxisOptions, ChartOptions, min_max_values};
pub use chart::{ChartAdapter, ChartRequest};
pub use config::{ApiSection, AppSection, DashboardConfig};
pub use dashboard::{PanelKind, Section};
pub use error::{ConfigError, FetchError};
pub use filters::{
    Dimension, FilterController, FilterEffect, FilterEvent, FilterLayout, FilterPhase,
    FilterSelection, OptionList, SkuDefault,
};
pub use request::{RequestSlot, RequestToken};
pub use selection::{
    MAX_SKU_SELECTION, SelectOption, SelectionSet, is_clearable, is_option_disabled,
    prevent_deletion, resolve_deletion,
};
pub use table::{Classification, TableFetcher, TableRequest, cell_text};

// ===== MESSAGE TYPES =====

#[derive(Serialize, Deserialize, Debug)]
pub enum UpMsg {
    LoadConfig,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum DownMsg {
    ConfigLoaded(DashboardConfig),
    ConfigError(String),
}
