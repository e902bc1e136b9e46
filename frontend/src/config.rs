//! Dashboard configuration as served by the backend.

use futures::future::{self, Either};
use futures::stream::{Stream, StreamExt};
use shared::{DashboardConfig, DownMsg, UpMsg};
use zoon::Timer;

use crate::connection::ConnectionAdapter;
use crate::error_display::{ErrorAlert, log_error_console_only};

/// Base URL baked in at build time, used when the backend has no answer.
pub const DEFAULT_API_URL: &str = env!("DASHBOARD_DEFAULT_API_URL");

const CONFIG_TIMEOUT_MS: u32 = 3000;

pub fn fallback_config() -> DashboardConfig {
    DashboardConfig::default().with_base_url_override(Some(DEFAULT_API_URL.to_string()))
}

/// Ask the backend for the config; falls back to the build-time default when
/// the request fails or stays unanswered.
pub async fn load_config(
    connection: &ConnectionAdapter,
    down_msgs: &mut (impl Stream<Item = DownMsg> + Unpin),
) -> DashboardConfig {
    if !connection.send_up_msg(UpMsg::LoadConfig).await {
        return fallback_config();
    }

    let answer = Box::pin(wait_for_config(down_msgs));
    let timeout = Box::pin(Timer::sleep(CONFIG_TIMEOUT_MS));
    match future::select(answer, timeout).await {
        Either::Left((config, _)) => config,
        Either::Right(_) => {
            zoon::eprintln!("Config: no answer from backend, using {DEFAULT_API_URL}");
            fallback_config()
        }
    }
}

async fn wait_for_config(down_msgs: &mut (impl Stream<Item = DownMsg> + Unpin)) -> DashboardConfig {
    while let Some(down_msg) = down_msgs.next().await {
        match down_msg {
            DownMsg::ConfigLoaded(mut config) => {
                for warning in config.validate_and_fix() {
                    zoon::println!("Config: {warning}");
                }
                return config;
            }
            DownMsg::ConfigError(error) => {
                log_error_console_only(ErrorAlert::new_config_error(error));
                return fallback_config();
            }
        }
    }
    fallback_config()
}
