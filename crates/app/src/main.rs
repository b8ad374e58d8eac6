use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, CatalogService, CredentialSource, EnvCredentials, SessionService,
    TestCaseService, TokenFileCredentials,
};
use storage::ApiConfig;
use testdesk_core::model::{CurrentUser, UserId};
use ui::vm::SessionErrorPolicy;
use ui::{App, UiApp, build_app_context};

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Desktop client for managing test cases and test sessions.
#[derive(Parser, Debug)]
#[command(name = "testdesk", version)]
struct Args {
    /// Base URL of the test-management service.
    #[arg(long, env = "TESTDESK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File holding the bearer token; re-read on every request.
    /// Without it the token comes from `TESTDESK_TOKEN`.
    #[arg(long, env = "TESTDESK_TOKEN_FILE", value_name = "PATH")]
    token_file: Option<PathBuf>,

    /// Id of the signed-in technician. Editing is disabled without one.
    #[arg(long, env = "TESTDESK_USER_ID", value_name = "ID")]
    user_id: Option<UserId>,

    /// Grant the signed-in technician admin actions (delete).
    #[arg(long, requires = "user_id")]
    admin: bool,

    /// Request timeout in seconds. The HTTP client default applies when unset.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Do not show session start failures to the user, only log them.
    #[arg(long)]
    log_only_session_errors: bool,
}

impl Args {
    fn api_config(&self) -> Result<ApiConfig, storage::ApiConfigError> {
        let config = ApiConfig::new(&self.api_url)?;
        Ok(match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    fn credentials(&self) -> Arc<dyn CredentialSource> {
        match &self.token_file {
            Some(path) => Arc::new(TokenFileCredentials::new(path.clone())),
            None => Arc::new(EnvCredentials::default()),
        }
    }

    fn current_user(&self) -> Option<CurrentUser> {
        self.user_id
            .clone()
            .map(|id| CurrentUser::new(id, self.admin))
    }

    fn session_error_policy(&self) -> SessionErrorPolicy {
        if self.log_only_session_errors {
            SessionErrorPolicy::LogOnly
        } else {
            SessionErrorPolicy::NotifyUser
        }
    }
}

struct DesktopApp {
    user: Option<CurrentUser>,
    session_error_policy: SessionErrorPolicy,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }

    fn session_error_policy(&self) -> SessionErrorPolicy {
        self.session_error_policy
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn test_cases(&self) -> Arc<TestCaseService> {
        self.services.test_cases()
    }

    fn sessions(&self) -> Arc<SessionService> {
        self.services.sessions()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.api_config()?;
    tracing::info!(api = %config.base_url(), user = ?args.user_id, "starting testdesk");
    let services = AppServices::new_http(config, args.credentials())?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        user: args.current_user(),
        session_error_policy: args.session_error_policy(),
        services,
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Testdesk")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(err) = run(args) {
        // At this layer (binary glue), printing once is fine.
        tracing::error!(error = %err, "testdesk failed to start");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
