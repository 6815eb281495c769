//! Command-line client for the HR portal backend.

mod render;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use hrportal_rs::config::{LayeredConfigOptions, PortalConfig};
use hrportal_rs::core::{
    AnnouncementBoard, AssistantHost, AssistantSession, CareerDashboard, DocumentCenter,
    DocumentFilter, FilterState, HttpAssistant, HttpTransport, LoadState, NotificationFeed,
    NotificationFilter, PageContext, PortalApi, ProfileForm, Selection, ToastCenter,
    TurnOutcome, Verification, validate,
};
use hrportal_rs::protocol::{
    AnalyticsRange, AssistantAction, AssistantContext, DocumentUpload, User, UserRole,
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Command-line options for the portal client.
#[derive(Parser)]
#[command(name = "hrportal", version)]
struct Cli {
    /// Optional path to an hrportal.json5 file, applied as the highest layer
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Signed-in user id; enables per-user actions
    #[arg(long, global = true)]
    user_id: Option<i64>,
    /// Role of the signed-in user (admin, hr, manager, employee)
    #[arg(long, global = true, default_value = "employee")]
    role: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a profile form stored as JSON
    Validate { path: PathBuf },
    /// List announcements
    Announcements {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        priority: String,
        /// Show or hide expired items; `--show-expired` alone means true.
        /// Defaults to `announcements.show_expired` from config.
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        show_expired: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List your documents
    Documents {
        #[arg(long = "type", default_value = "all")]
        document_type: String,
        #[arg(long)]
        verified: Option<bool>,
    },
    /// Upload a document
    Upload {
        file: PathBuf,
        #[arg(long = "type")]
        document_type: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List onboarding notifications
    Notifications {
        #[arg(long)]
        unread: bool,
    },
    /// Show skills assessment and, for admin/hr, career analytics
    Career {
        /// Onboarding analytics window: 7d, 30d, or 90d
        #[arg(long, default_value = "30d")]
        range: AnalyticsRange,
    },
    /// Chat with the onboarding assistant
    Chat {
        #[arg(long, default_value_t = 1)]
        phase: u32,
        #[arg(long)]
        employee_id: i64,
        #[arg(long)]
        name: String,
    },
}

/// Prints assistant actions; a terminal has no forms or panels to open.
struct TerminalHost;

impl AssistantHost for TerminalHost {
    fn typing_changed(&self, typing: bool) {
        if typing {
            println!("assistant is typing...");
        }
    }

    fn perform(&self, action: AssistantAction) {
        println!("[action] {}", action.as_str());
    }
}

/// Entry point for the portal CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hrportal_rs::init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(
        "starting hrportal (base_url={}, user_set={})",
        config.api.base_url,
        cli.user_id.is_some()
    );

    let user = signed_in_user(&cli)?;
    let transport = Arc::new(HttpTransport::new(&config.api).context("failed to build client")?);
    let toasts = ToastCenter::new(&config.toasts);
    let ctx = PageContext::new(PortalApi::new(transport.clone()), toasts.clone(), user);

    match cli.command {
        Command::Validate { path } => validate_file(&path)?,
        Command::Announcements {
            category,
            priority,
            show_expired,
            search,
            page,
        } => {
            let board = AnnouncementBoard::new(ctx, &config.announcements);
            ensure_loaded(board.refresh().await)?;
            let mut filters = FilterState::default()
                .with_category(&category)
                .with_priority(&priority)
                .with_show_expired(show_expired.unwrap_or(config.announcements.show_expired));
            if let Some(search) = search {
                filters = filters.with_search(search);
            }
            board.set_filters(filters);
            render::announcements(&board.page(page, Utc::now()));
        }
        Command::Documents {
            document_type,
            verified,
        } => {
            let center = DocumentCenter::new(ctx);
            ensure_loaded(center.refresh().await)?;
            let filter = DocumentFilter {
                document_type: Selection::parse(&document_type),
                verification: Verification::from_flag(verified),
            };
            render::documents(&center.filtered(&filter));
        }
        Command::Upload {
            file,
            document_type,
            description,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let center = DocumentCenter::new(ctx);
            let outcome = center
                .upload(DocumentUpload {
                    file_name,
                    bytes,
                    document_type,
                    description,
                })
                .await?;
            render::upload(&outcome);
        }
        Command::Notifications { unread } => {
            let feed = NotificationFeed::new(ctx);
            ensure_loaded(feed.refresh().await)?;
            render::notifications(
                &feed.visible(NotificationFilter {
                    unread_only: unread,
                }),
                feed.unread_count(),
            );
        }
        Command::Career { range } => {
            let privileged = ctx.user.as_ref().is_some_and(User::is_privileged);
            let dashboard = CareerDashboard::new(ctx);
            dashboard.refresh().await;
            ensure_loaded(dashboard.skills_state())?;
            render::skills(&dashboard.skill_rows());
            if let Some(analytics) = dashboard.analytics() {
                render::career_analytics(&analytics);
            }
            if privileged {
                let onboarding = dashboard
                    .onboarding_analytics(range)
                    .await?;
                render::onboarding_analytics(&onboarding);
            }
        }
        Command::Chat {
            phase,
            employee_id,
            name,
        } => {
            let session = AssistantSession::new(
                AssistantContext::new(phase, employee_id, name),
                Arc::new(HttpAssistant::new(transport)),
                Arc::new(TerminalHost),
                &config.assistant,
            );
            session.load_suggestions().await;
            chat(&session).await?;
        }
    }

    for toast in toasts.active() {
        render::toast(&toast);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<PortalConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        info!("adding runtime config layer (path={})", path.display());
        options = options.with_runtime_path(path);
    }
    let layered =
        PortalConfig::load_layered_with_options(options).context("failed to load config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let mut config = layered.config;
    if let Some(base_url) = cli.base_url.as_ref() {
        config.api.base_url = base_url.clone();
    }
    if config.api.token.is_none() {
        config.api.token = std::env::var("HRPORTAL_TOKEN").ok();
    }
    config.validate().context("invalid config")?;
    Ok(config)
}

fn signed_in_user(cli: &Cli) -> anyhow::Result<Option<User>> {
    let Some(id) = cli.user_id else {
        return Ok(None);
    };
    let role: UserRole = serde_json::from_value(serde_json::Value::String(
        cli.role.to_ascii_lowercase(),
    ))
    .with_context(|| format!("unknown role: {}", cli.role))?;
    Ok(Some(User {
        id,
        email: String::new(),
        role,
        first_name: None,
    }))
}

fn ensure_loaded(state: LoadState) -> anyhow::Result<()> {
    match state {
        LoadState::Failed(message) => bail!("failed to load: {message}"),
        _ => Ok(()),
    }
}

fn validate_file(path: &Path) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let form: ProfileForm = serde_json::from_str(&contents).context("invalid profile JSON")?;
    let outcome = validate(&form);
    if outcome.is_valid {
        println!("profile is valid");
        return Ok(());
    }
    for (field, message) in &outcome.errors {
        println!("{field}: {message}");
    }
    bail!("{} field(s) failed validation", outcome.errors.len())
}

async fn chat(session: &AssistantSession) -> anyhow::Result<()> {
    for message in session.transcript() {
        render::transcript_message(&message);
    }
    render::suggestions(&session.suggestions());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        match session.send(line).await {
            Ok(TurnOutcome::Applied { .. }) => {
                if let Some(reply) = session.transcript().last() {
                    render::transcript_message(reply);
                }
                render::suggestions(&session.suggestions());
            }
            Ok(TurnOutcome::Stale) => {}
            Err(err) => println!("! {err}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use hrportal_rs::protocol::AnalyticsRange;
    use pretty_assertions::assert_eq;

    fn show_expired(args: &[&str]) -> Option<bool> {
        let cli = Cli::try_parse_from(args).expect("args");
        match cli.command {
            Command::Announcements { show_expired, .. } => show_expired,
            _ => panic!("expected announcements"),
        }
    }

    #[test]
    fn show_expired_overrides_config_either_way() {
        assert_eq!(show_expired(&["hrportal", "announcements"]), None);
        assert_eq!(
            show_expired(&["hrportal", "announcements", "--show-expired"]),
            Some(true)
        );
        assert_eq!(
            show_expired(&["hrportal", "announcements", "--show-expired", "false"]),
            Some(false)
        );
    }

    #[test]
    fn career_range_must_be_known() {
        let cli = Cli::try_parse_from(["hrportal", "career", "--range", "7d"]).expect("args");
        match cli.command {
            Command::Career { range } => assert_eq!(range, AnalyticsRange::Week),
            _ => panic!("expected career"),
        }
        assert!(Cli::try_parse_from(["hrportal", "career", "--range", "1y"]).is_err());
    }
}
