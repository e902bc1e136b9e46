//! DashboardApp: config loading and the stacked dashboard sections.

use shared::{PanelKind, Section};
use zoon::*;

use crate::api_client::ApiClient;
use crate::chart_panel::ChartPanel;
use crate::connection::ConnectionAdapter;
use crate::table_panel::TablePanel;
use crate::views::{PAGE_BACKGROUND, TEXT_COLOR};

pub struct DashboardApp {
    pub api: ApiClient,
}

impl DashboardApp {
    pub async fn new() -> Self {
        let (connection, mut down_msgs) = ConnectionAdapter::new();
        let config = crate::config::load_config(&connection, &mut down_msgs).await;
        zoon::println!("Data API: {}", config.api.base_url);

        Self {
            api: ApiClient::new(config),
        }
    }

    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Height::screen())
            .s(Padding::all(24))
            .s(Gap::new().y(32))
            .s(Background::new().color(PAGE_BACKGROUND))
            .s(Font::new().color(TEXT_COLOR).family([
                FontFamily::new("Inter"),
                FontFamily::new("system-ui"),
                FontFamily::new("Segoe UI"),
                FontFamily::new("Arial"),
                FontFamily::SansSerif,
            ]))
            .s(Scrollbars::y_and_clip_x())
            .item(
                El::new()
                    .s(Font::new().size(24).weight(FontWeight::Bold))
                    .child(Text::new("Stock Dashboard")),
            )
            .items(Section::ALL.map(|section| self.section(section)))
    }

    fn section(&self, section: Section) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Gap::new().y(16))
            .item(
                El::new()
                    .s(Font::new().size(20).weight(FontWeight::SemiBold))
                    .child(Text::new(section.title())),
            )
            .items(section.panels().iter().map(|panel| self.panel(*panel)))
    }

    fn panel(&self, panel: PanelKind) -> RawElOrText {
        match panel {
            PanelKind::Table(kind) => TablePanel::new(kind, self.api.clone()).view().unify(),
            PanelKind::Chart(kind) => ChartPanel::new(kind, self.api.clone()).view().unify(),
        }
    }
}
