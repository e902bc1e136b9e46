use moon::*;
use shared::{DownMsg, UpMsg};
use std::path::Path;

mod config;

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Stock Dashboard")
        .index_by_robots(false)
}

async fn up_msg_handler(req: UpMsgRequest<UpMsg>) {
    let (session_id, cor_id) = (req.session_id, req.cor_id);

    match req.up_msg {
        UpMsg::LoadConfig => {
            let loaded = tokio::task::spawn_blocking(|| {
                config::load_config(Path::new(config::CONFIG_FILE_PATH))
            })
            .await
            .map_err(anyhow::Error::from)
            .and_then(|result| result);

            let down_msg = match loaded {
                Ok(loaded) => DownMsg::ConfigLoaded(config::apply_env_override(
                    loaded,
                    std::env::var(config::API_URL_ENV).ok(),
                )),
                Err(error) => {
                    log::error!("{error:#}");
                    DownMsg::ConfigError(format!("{error:#}"))
                }
            };
            send_down_msg(down_msg, session_id, cor_id).await;
        }
    }
}

async fn send_down_msg(msg: DownMsg, session_id: SessionId, cor_id: CorId) {
    if let Some(session) = sessions::by_session_id().wait_for(session_id).await {
        session.send_down_msg(&msg, cor_id).await;
    } else {
        log::debug!("Session {session_id:?} disconnected before reply");
    }
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("BACKEND PANIC: {panic_info}");
    }));

    start(frontend, up_msg_handler, |_error| {}).await
}
