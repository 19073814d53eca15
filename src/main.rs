use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use vocabvault::api::VocabApi;
use vocabvault::auth::GoogleOAuth;
use vocabvault::cli::Args;
use vocabvault::config::{Config, ConfigStore};
use vocabvault::effects::{command_channel, run_worker, Services};
use vocabvault::logging::init_tracing;
use vocabvault::session::Session;
use vocabvault::shutdown::ShutdownCoordinator;
use vocabvault::store::LocalAuthStore;
use vocabvault::ui::events::{AppEvent, EventHandler};
use vocabvault::ui::runtime;

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?.with_base_url(args.base_url.clone())?;
    if let Some(database) = args.database.clone() {
        config.storage.database_path = Some(database);
    }
    let config = ConfigStore::new(config, config_path);
    tracing::info!(path = %config.path().display(), "configuration loaded");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let api = VocabApi::new(&config.api())?;
    let storage = config.storage();

    let store = match rt.block_on(LocalAuthStore::open(&storage.database_path())) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "local account store unavailable, password reset disabled");
            None
        }
    };

    let session_path = storage.session_path();
    let session = Session::restore(&session_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unreadable session");
        Session::fresh_at(&session_path)
    });

    let google_config = config.google();
    let google = if google_config.is_enabled() {
        match GoogleOAuth::new(&google_config) {
            Ok(google) => Some(google),
            Err(e) => {
                tracing::warn!(error = %e, "google sign-in disabled");
                None
            }
        }
    } else {
        None
    };

    let coordinator = ShutdownCoordinator::new();
    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate, coordinator.handle());

    let services = Services {
        api,
        session: session.clone(),
        store: store.clone(),
        google,
    };
    let (command_tx, command_rx) = command_channel();
    rt.spawn(run_worker(services, command_rx, events.sender()));

    let signal_events = events.sender();
    let signal_handle = coordinator.handle();
    rt.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_handle.signal();
            let _ = signal_events.send(AppEvent::Shutdown);
        }
    });

    let result = runtime::run(session, command_tx, events);
    coordinator.handle().signal();

    if let Some(store) = store {
        rt.block_on(store.close());
    }
    rt.shutdown_timeout(Duration::from_secs(1));

    result.context("terminal UI failed")
}
