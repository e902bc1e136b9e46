//! Stock Dashboard entry point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod api_client;
mod app;
mod chart_panel;
mod config;
mod connection;
mod dataflow;
mod error_display;
mod filter_bar;
mod table_panel;
mod views;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::DashboardApp::new().await;
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
