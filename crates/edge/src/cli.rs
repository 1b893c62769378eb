// crates/edge/src/cli.rs

use crate::{
    router::{build_router, AppState},
    settings::load_settings,
    Error,
};
use adapt::{ContentGateway, ContentstackGateway, LiveEditChannel};
use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use domain::setting::Settings;
use serve::render::PageShell;
use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// Storefront CLI
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Storefront stopped with an error: {}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("Storefront shut down cleanly");
            ExitCode::SUCCESS
        },
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    let then = Utc::now();
    let process = StartProcess::<CommandIssued>::parse_settings_file(start)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    let process = process.build_services()?;
    info!(
        "Services built in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    let process = process.bind().await?;
    info!(
        "Listener bound in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    process.serve().await
}

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Server-rendered storefront for Contentstack content")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the storefront using the settings in the specified directory
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Directory holding `settings.toml` (or set STOREFRONT_DIR)
    ///
    /// Must exist and be a directory.
    #[arg(
        value_name = "DIR",
        env = "STOREFRONT_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────────────
// Start process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    settings: Arc<Settings>,
}

struct ServicesBuilt {
    settings: Arc<Settings>,
    state: AppState,
}

struct Bound {
    listener: TcpListener,
    state: AppState,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for ServicesBuilt {}
impl ProcessState for Bound {}

struct StartProcess<S: ProcessState> {
    state: S,
}

impl StartProcess<CommandIssued> {
    /// Load settings from `<dir>/settings.toml` plus environment overrides.
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(command: StartCmd) -> Result<StartProcess<SettingsLoaded>> {
        let settings = load_settings(&command.dir)?;
        info!(
            "stack environment `{}`, live preview {}",
            settings.stack.environment,
            if settings.editing_enabled() { "on" } else { "off" }
        );
        Ok(StartProcess {
            state: SettingsLoaded {
                settings: Arc::new(settings),
            },
        })
    }
}

impl StartProcess<SettingsLoaded> {
    /// Gateway, live-edit channel and page shell, all built from the one
    /// settings value.
    #[tracing::instrument(skip_all)]
    fn build_services(self) -> Result<StartProcess<ServicesBuilt>> {
        let settings = self.state.settings;
        let gateway: Arc<dyn ContentGateway> = Arc::new(ContentstackGateway::new(&settings)?);
        let live = LiveEditChannel::new(Arc::clone(&settings));
        let shell = Arc::new(PageShell::new()?);

        Ok(StartProcess {
            state: ServicesBuilt {
                settings,
                state: AppState::new(gateway, live, shell),
            },
        })
    }
}

impl StartProcess<ServicesBuilt> {
    #[tracing::instrument(skip_all)]
    async fn bind(self) -> Result<StartProcess<Bound>> {
        let server = &self.state.settings.server;
        let addr = SocketAddr::new(server.ip, server.port);
        let listener = TcpListener::bind(addr).await?;
        info!("listening on http://{}", addr);

        Ok(StartProcess {
            state: Bound {
                listener,
                state: self.state.state,
            },
        })
    }
}

impl StartProcess<Bound> {
    #[tracing::instrument(skip_all)]
    async fn serve(self) -> Result<()> {
        let app = build_router(self.state.state);
        axum::serve(self.state.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        futures::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
