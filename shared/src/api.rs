//! REST contract of the data API: endpoints, query encoding and the wire
//! shapes of every response.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filters::{FilterLayout, SkuDefault};

pub const PARAM_WAREHOUSE: &str = "bodega";
pub const PARAM_SKU: &str = "sku";
pub const PARAM_YEAR: &str = "anio";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "page_size";

// ===== ENDPOINTS =====

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AvailableWarehouses,
    AvailableSkus,
    AvailableYears,
    Table(TableKind),
    Chart(ChartKind),
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::AvailableWarehouses => "/api/available-bodegas",
            Self::AvailableSkus => "/api/available-skus",
            Self::AvailableYears => "/api/available-years",
            Self::Table(kind) => kind.path(),
            Self::Chart(kind) => kind.path(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// ABC classification per SKU (`table-1`).
    Classification,
    /// Consumption mean, variance and variability (`table-2`).
    Consumption,
    /// Review period, safety stock and target level (`table-3`).
    ReviewPolicy,
    /// Economic order quantity and reorder point (`table-4`).
    OrderQuantity,
    /// Coverage and quantities to request (`table-5`).
    Replenishment,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        Self::Classification,
        Self::Consumption,
        Self::ReviewPolicy,
        Self::OrderQuantity,
        Self::Replenishment,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Classification => "/api/table-1",
            Self::Consumption => "/api/table-2",
            Self::ReviewPolicy => "/api/table-3",
            Self::OrderQuantity => "/api/table-4",
            Self::Replenishment => "/api/table-5",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Classification => "Clasificación ABC",
            Self::Consumption => "Detalle de SKUs",
            Self::ReviewPolicy => "Política de revisión periódica",
            Self::OrderQuantity => "Cantidad económica de pedido",
            Self::Replenishment => "Reposición sugerida",
        }
    }

    pub fn filter_layout(self) -> FilterLayout {
        match self {
            Self::Classification | Self::Replenishment => FilterLayout::WarehouseOnly,
            Self::Consumption | Self::ReviewPolicy | Self::OrderQuantity => {
                FilterLayout::WarehouseSku
            }
        }
    }

    pub fn filters_by_sku(self) -> bool {
        self.filter_layout().has_sku()
    }

    /// Tables list every SKU of the bodega until the user narrows them.
    pub fn sku_default(self) -> SkuDefault {
        SkuDefault::All
    }

    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Classification => CLASSIFICATION_COLUMNS,
            Self::Consumption => CONSUMPTION_COLUMNS,
            Self::ReviewPolicy => REVIEW_POLICY_COLUMNS,
            Self::OrderQuantity => ORDER_QUANTITY_COLUMNS,
            Self::Replenishment => REPLENISHMENT_COLUMNS,
        }
    }
}

const CLASSIFICATION_COLUMNS: &[Column] = &[
    Column::new("sku", "SKU", CellFormat::Text),
    Column::new("clase_abc", "Classification", CellFormat::Classification),
    Column::new("bodega", "Bodega", CellFormat::Text),
];

const CONSUMPTION_COLUMNS: &[Column] = &[
    Column::new("sku", "SKU", CellFormat::Text),
    Column::new("mean", "Consumo Promedio", CellFormat::Number),
    Column::new("std", "Varianza", CellFormat::Number),
    Column::new("clase_abc", "Clasificación", CellFormat::Classification),
    Column::new("bodega", "Bodega", CellFormat::Text),
    Column::new("variabilidad", "Variabilidad", CellFormat::Text),
];

const REVIEW_POLICY_COLUMNS: &[Column] = &[
    Column::new("sku", "SKU", CellFormat::Text),
    Column::new("bodega", "Bodega", CellFormat::Text),
    Column::new("clase_abc", "Clasificación", CellFormat::Classification),
    Column::new("mean", "Consumo Promedio", CellFormat::Number),
    Column::new("costo", "Costo", CellFormat::Number),
    Column::new("lead_time", "Lead Time", CellFormat::Number),
    Column::new("T", "Periodo (T)", CellFormat::Number),
    Column::new("SS", "Stock Seguridad", CellFormat::Number),
    Column::new("nivel_objetivo", "Nivel Objetivo", CellFormat::Number),
    Column::new("politica", "Política", CellFormat::Text),
];

const ORDER_QUANTITY_COLUMNS: &[Column] = &[
    Column::new("sku", "SKU", CellFormat::Text),
    Column::new("bodega", "Bodega", CellFormat::Text),
    Column::new("mean", "Consumo Promedio", CellFormat::Number),
    Column::new("costo", "Costo", CellFormat::Number),
    Column::new("h", "Costo Mantención", CellFormat::Number),
    Column::new("demanda_anual", "Demanda Anual", CellFormat::Number),
    Column::new("R", "Punto de Reorden", CellFormat::Number),
    Column::new("EOQ", "EOQ", CellFormat::Number),
];

const REPLENISHMENT_COLUMNS: &[Column] = &[
    Column::new("sku", "SKU", CellFormat::Text),
    Column::new("bodega", "Bodega", CellFormat::Text),
    Column::new("inventario_total", "Inventario Total", CellFormat::Number),
    Column::new("SS", "Stock Seguridad", CellFormat::Number),
    Column::new("cobertura_dias", "Cobertura (días)", CellFormat::Number),
    Column::new("cobertura_meses", "Cobertura (meses)", CellFormat::Number),
    Column::new("solicitar", "Solicitar", CellFormat::Number),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    Number,
    Classification,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub format: CellFormat,
}

impl Column {
    pub const fn new(key: &'static str, header: &'static str, format: CellFormat) -> Self {
        Self { key, header, format }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartShape {
    Line,
    Pie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Monthly consumption per SKU (`line-chart-1`).
    MonthlyConsumption,
    /// Weekly consumption per SKU (`line-chart-2`).
    WeeklyConsumption,
    /// Last six months plus forecast (`line-chart-3`).
    Forecast,
    /// SKU count per ABC class (`pie-chart-1`).
    AbcDistribution,
    /// SKU count per best forecasting model (`pie-chart-2`).
    ForecastModels,
    /// SKU count per inventory policy (`pie-chart-3`).
    PolicyDistribution,
}

impl ChartKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::MonthlyConsumption => "/api/line-chart-1",
            Self::WeeklyConsumption => "/api/line-chart-2",
            Self::Forecast => "/api/line-chart-3",
            Self::AbcDistribution => "/api/pie-chart-1",
            Self::ForecastModels => "/api/pie-chart-2",
            Self::PolicyDistribution => "/api/pie-chart-3",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::MonthlyConsumption => "Consumo histórico mensual",
            Self::WeeklyConsumption => "Consumo histórico semanal",
            Self::Forecast => "Pronóstico de consumo",
            Self::AbcDistribution => "Distribución ABC",
            Self::ForecastModels => "Distribución de pronósticos",
            Self::PolicyDistribution => "Distribución de políticas",
        }
    }

    pub fn shape(self) -> ChartShape {
        match self {
            Self::MonthlyConsumption | Self::WeeklyConsumption | Self::Forecast => ChartShape::Line,
            Self::AbcDistribution | Self::ForecastModels | Self::PolicyDistribution => {
                ChartShape::Pie
            }
        }
    }

    pub fn filter_layout(self) -> FilterLayout {
        match self {
            Self::MonthlyConsumption | Self::WeeklyConsumption => FilterLayout::WarehouseSkuYear,
            Self::Forecast => FilterLayout::WarehouseSku,
            Self::AbcDistribution | Self::ForecastModels | Self::PolicyDistribution => {
                FilterLayout::WarehouseOnly
            }
        }
    }

    /// Time-series charts plot explicit SKUs, so they never run on "all".
    pub fn sku_default(self) -> SkuDefault {
        match self.shape() {
            ChartShape::Line => SkuDefault::First,
            ChartShape::Pie => SkuDefault::All,
        }
    }
}

// ===== QUERY =====

/// Query parameters in insertion order; repeated keys encode multi-valued
/// filters (`bodega=A&bodega=B`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiQuery {
    params: Vec<(&'static str, String)>,
}

impl ApiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn repeated(mut self, key: &'static str, values: &[String]) -> Self {
        self.params
            .extend(values.iter().map(|value| (key, value.clone())));
        self
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn values(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(param, _)| *param == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for ApiQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

// ===== WIRE TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListResponse {
    pub data: Vec<String>,
}

/// One table row as sent by the API; columns are looked up by key.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageResult {
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for PageResult {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: first_page(),
            total_pages: 0,
        }
    }
}

/// Category of a line-chart point: month strings or week numbers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum XValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    pub x: XValue,
    /// `None` for gaps, e.g. the forecast line before the forecast starts.
    pub y: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub data: Vec<Point>,
}

impl NamedSeries {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().filter_map(|point| point.y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineChartResponse {
    pub data: Vec<NamedSeries>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PieData {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

impl PieData {
    pub fn total(&self) -> f64 {
        self.series.iter().sum()
    }

    /// Labels paired with their share of the total, in `0.0..=1.0`.
    pub fn shares(&self) -> Vec<(&str, f64, f64)> {
        let total = self.total();
        self.labels
            .iter()
            .zip(&self.series)
            .map(|(label, value)| {
                let share = if total > 0.0 { value / total } else { 0.0 };
                (label.as_str(), *value, share)
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PieChartResponse {
    pub data: PieData,
}

/// Data of one chart, replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResult {
    Lines(Vec<NamedSeries>),
    Pie(PieData),
}

impl SeriesResult {
    pub fn empty(shape: ChartShape) -> Self {
        match shape {
            ChartShape::Line => Self::Lines(Vec::new()),
            ChartShape::Pie => Self::Pie(PieData::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Lines(series) => series.iter().all(|series| series.data.is_empty()),
            Self::Pie(pie) => pie.series.is_empty(),
        }
    }

    /// Every plotted y value, null points excluded.
    pub fn raw_values(&self) -> Vec<f64> {
        match self {
            Self::Lines(series) => series.iter().flat_map(NamedSeries::values).collect(),
            Self::Pie(pie) => pie.series.clone(),
        }
    }
}
