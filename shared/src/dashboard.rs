//! Which widgets the dashboard shows and how they are grouped.

use crate::api::{ChartKind, TableKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Table(TableKind),
    Chart(ChartKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Consumptions,
    Forecasts,
    InventoryPolicies,
}

impl Section {
    pub const ALL: [Section; 3] = [Self::Consumptions, Self::Forecasts, Self::InventoryPolicies];

    pub fn title(self) -> &'static str {
        match self {
            Self::Consumptions => "Consumos",
            Self::Forecasts => "Pronósticos",
            Self::InventoryPolicies => "Políticas de inventario",
        }
    }

    pub fn panels(self) -> &'static [PanelKind] {
        match self {
            Self::Consumptions => &[
                PanelKind::Chart(ChartKind::MonthlyConsumption),
                PanelKind::Chart(ChartKind::WeeklyConsumption),
                PanelKind::Chart(ChartKind::AbcDistribution),
                PanelKind::Table(TableKind::Classification),
            ],
            Self::Forecasts => &[
                PanelKind::Chart(ChartKind::Forecast),
                PanelKind::Chart(ChartKind::ForecastModels),
                PanelKind::Table(TableKind::Consumption),
            ],
            Self::InventoryPolicies => &[
                PanelKind::Table(TableKind::ReviewPolicy),
                PanelKind::Table(TableKind::OrderQuantity),
                PanelKind::Table(TableKind::Replenishment),
                PanelKind::Chart(ChartKind::PolicyDistribution),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_appears_once() {
        let tables: Vec<TableKind> = Section::ALL
            .iter()
            .flat_map(|section| section.panels())
            .filter_map(|panel| match panel {
                PanelKind::Table(kind) => Some(*kind),
                PanelKind::Chart(_) => None,
            })
            .collect();

        assert_eq!(tables.len(), TableKind::ALL.len());
        for kind in TableKind::ALL {
            assert!(tables.contains(&kind), "{kind:?} missing");
        }
    }
}
