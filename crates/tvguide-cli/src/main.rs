//! tvguide - TV guide schedule management CLI.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use tvguide_db::shows::NewShow;
use tvguide_db::{delete_show, get_show, insert_show, load_shows, open_db, update_show};
use tvguide_schedule::{RenderOptions, parse_time_of_day, render_unavailable, schedule_fragment};
use tvguide_update::{GithubClient, check_for_update};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Manage show records.
    Show(ShowCommand),
    /// Render the schedule fragment.
    Schedule(ScheduleCommand),
    /// Check the release feed for a newer version.
    Update(UpdateCommand),
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowCommand {
    /// Show subcommand to run.
    #[command(subcommand)]
    command: ShowSubcommands,
}

/// Available show subcommands.
#[derive(Subcommand)]
enum ShowSubcommands {
    /// Add a new show.
    Add(ShowAddArgs),
    /// Update fields of an existing show.
    Set(ShowSetArgs),
    /// List all shows.
    List,
    /// Remove a show.
    Remove(ShowRemoveArgs),
}

/// Arguments for the `show add` subcommand.
#[derive(clap::Args)]
struct ShowAddArgs {
    /// Display name.
    #[arg(long, required = true)]
    title: String,

    /// Description body.
    #[arg(long, default_value = "")]
    description: String,

    /// Thumbnail image URL.
    #[arg(long)]
    thumbnail: Option<String>,

    /// Start time-of-day (e.g. "19:00"). Shows without one are never scheduled.
    #[arg(long)]
    start_time: Option<String>,

    /// End time-of-day (e.g. "20:00").
    #[arg(long)]
    end_time: Option<String>,
}

/// Arguments for the `show set` subcommand.
#[derive(clap::Args)]
struct ShowSetArgs {
    /// Show id to update.
    #[arg(long, required = true)]
    id: i64,

    /// New display name.
    #[arg(long)]
    title: Option<String>,

    /// New description body.
    #[arg(long)]
    description: Option<String>,

    /// New thumbnail image URL.
    #[arg(long)]
    thumbnail: Option<String>,

    /// New start time-of-day (e.g. "19:00").
    #[arg(long)]
    start_time: Option<String>,

    /// New end time-of-day (e.g. "20:00").
    #[arg(long)]
    end_time: Option<String>,

    /// Clear both schedule times (removes the show from the schedule).
    #[arg(long, conflicts_with_all = ["start_time", "end_time"])]
    clear_schedule: bool,
}

/// Arguments for the `show remove` subcommand.
#[derive(clap::Args)]
struct ShowRemoveArgs {
    /// Show id to remove.
    #[arg(long, required = true)]
    id: i64,
}

/// Arguments for the `schedule` subcommand.
#[derive(clap::Args)]
struct ScheduleCommand {
    /// Schedule subcommand to run.
    #[command(subcommand)]
    command: ScheduleSubcommands,
}

/// Available schedule subcommands.
#[derive(Subcommand)]
enum ScheduleSubcommands {
    /// Produce today's schedule fragment.
    Render(ScheduleRenderArgs),
}

/// Arguments for the `schedule render` subcommand.
#[derive(clap::Args)]
struct ScheduleRenderArgs {
    /// Write the fragment to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the configured heading.
    #[arg(long)]
    heading: Option<String>,
}

/// Arguments for the `update` subcommand.
#[derive(clap::Args)]
struct UpdateCommand {
    /// Update subcommand to run.
    #[command(subcommand)]
    command: UpdateSubcommands,
}

/// Available update subcommands.
#[derive(Subcommand)]
enum UpdateSubcommands {
    /// Compare the installed version against the release feed.
    Check(UpdateCheckArgs),
}

/// Arguments for the `update check` subcommand.
#[derive(clap::Args)]
struct UpdateCheckArgs {
    /// Release feed repository as "owner/repo". Falls back to config.
    #[arg(long)]
    repository: Option<String>,

    /// Version to compare instead of the built-in one.
    #[arg(long)]
    current: Option<String>,
}

/// Validates a time-of-day flag value before it is written to the store.
fn validate_time_flag(flag: &str, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        parse_time_of_day(v).with_context(|| format!("invalid {flag} value: {v:?}"))?;
    }
    Ok(())
}

/// Runs the `show add` subcommand.
///
/// Time flags are validated before the insert (parse-on-write); the store
/// itself keeps the fields as text.
///
/// # Errors
///
/// Returns an error if validation or the store write fails.
#[instrument(skip_all)]
fn run_show_add(args: &ShowAddArgs, dir: Option<&PathBuf>) -> Result<()> {
    validate_time_flag("--start-time", args.start_time.as_deref())?;
    validate_time_flag("--end-time", args.end_time.as_deref())?;

    let conn = open_db(dir).context("failed to open database")?;
    let show = NewShow {
        title: args.title.clone(),
        description: args.description.clone(),
        thumbnail: args.thumbnail.clone(),
        start_time: args.start_time.clone(),
        end_time: args.end_time.clone(),
    };
    let id = insert_show(&conn, &show).context("failed to insert show")?;

    tracing::info!(id, title = %args.title, "Show added");
    Ok(())
}

/// Runs the `show set` subcommand.
///
/// # Errors
///
/// Returns an error if the show does not exist, validation fails, or the
/// store write fails.
#[instrument(skip_all)]
fn run_show_set(args: &ShowSetArgs, dir: Option<&PathBuf>) -> Result<()> {
    validate_time_flag("--start-time", args.start_time.as_deref())?;
    validate_time_flag("--end-time", args.end_time.as_deref())?;

    let conn = open_db(dir).context("failed to open database")?;
    let Some(mut show) = get_show(&conn, args.id).context("failed to load show")? else {
        bail!("show {} not found", args.id);
    };

    if let Some(title) = &args.title {
        show.title = title.clone();
    }
    if let Some(description) = &args.description {
        show.description = description.clone();
    }
    if let Some(thumbnail) = &args.thumbnail {
        show.thumbnail = Some(thumbnail.clone());
    }
    if let Some(start_time) = &args.start_time {
        show.start_time = Some(start_time.clone());
    }
    if let Some(end_time) = &args.end_time {
        show.end_time = Some(end_time.clone());
    }
    if args.clear_schedule {
        show.start_time = None;
        show.end_time = None;
    }

    update_show(&conn, &show).context("failed to update show")?;
    tracing::info!(id = args.id, "Show updated");
    Ok(())
}

/// Runs the `show list` subcommand.
///
/// # Errors
///
/// Returns an error if the store query fails.
#[instrument(skip_all)]
fn run_show_list(dir: Option<&PathBuf>) -> Result<()> {
    let conn = open_db(dir).context("failed to open database")?;
    let shows = load_shows(&conn).context("failed to load shows")?;

    tracing::info!("ID\tStart\tEnd\tTitle");
    for show in &shows {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            show.show_id,
            show.start_time.as_deref().unwrap_or("-"),
            show.end_time.as_deref().unwrap_or("-"),
            show.title,
        );
    }
    tracing::info!("Total: {} shows", shows.len());

    Ok(())
}

/// Runs the `show remove` subcommand.
///
/// # Errors
///
/// Returns an error if the show does not exist or the store write fails.
#[instrument(skip_all)]
fn run_show_remove(args: &ShowRemoveArgs, dir: Option<&PathBuf>) -> Result<()> {
    let conn = open_db(dir).context("failed to open database")?;
    let deleted = delete_show(&conn, args.id).context("failed to delete show")?;
    if deleted == 0 {
        bail!("show {} not found", args.id);
    }

    tracing::info!(id = args.id, "Show removed");
    Ok(())
}

/// Opens the store and produces today's fragment.
fn render_fragment(dir: Option<&PathBuf>, opts: &RenderOptions) -> Result<String> {
    let conn = open_db(dir).context("failed to open database")?;
    schedule_fragment(&conn, opts).context("failed to produce schedule fragment")
}

/// Writes the fragment to the given file, or to stdout for the embedding
/// host when no file is given.
#[allow(clippy::print_stdout)]
fn emit_fragment(out: Option<&Path>, fragment: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, fragment)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{fragment}");
            Ok(())
        }
    }
}

/// Runs the `schedule render` subcommand.
///
/// A store failure emits the "temporarily unavailable" fragment and exits
/// nonzero; it is never conflated with an empty schedule.
///
/// # Errors
///
/// Returns an error if config loading or the store query fails.
#[instrument(skip_all)]
fn run_schedule_render(args: &ScheduleRenderArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let heading = args
        .heading
        .clone()
        .unwrap_or(config.schedule.heading);
    let opts = RenderOptions { heading };

    let today = Local::now().date_naive();
    tracing::info!(%today, "Rendering schedule");

    match render_fragment(dir, &opts) {
        Ok(fragment) => emit_fragment(args.out.as_deref(), &fragment),
        Err(e) => {
            tracing::error!("Store unavailable: {e:#}");
            emit_fragment(args.out.as_deref(), &render_unavailable())?;
            Err(e)
        }
    }
}

/// Runs the `update check` subcommand.
///
/// # Errors
///
/// Returns an error if the repository is not configured, the client fails
/// to build, or the feed request fails.
#[instrument(skip_all)]
async fn run_update_check(args: &UpdateCheckArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let repository = args
        .repository
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or(config.update.repository);
    if repository.is_empty() {
        bail!("update.repository is not configured; set it in config.toml or pass --repository");
    }
    let Some((owner, repo)) = repository.split_once('/') else {
        bail!("invalid repository {repository:?}, expected \"owner/repo\"");
    };

    let client = GithubClient::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build release feed client")?;

    let installed = args.current.as_deref().unwrap_or(env!("CARGO_PKG_VERSION"));
    tracing::info!(%repository, installed, "Checking release feed");

    match check_for_update(&client, owner, repo, installed).await? {
        Some(update) => {
            tracing::info!(
                "Update available: {} -> {} ({})",
                update.installed,
                update.latest,
                update.tag_name,
            );
            tracing::info!("Release page: {}", update.release_url);
            if let Some(package_url) = &update.package_url {
                tracing::info!("Package: {package_url}");
            }
        }
        None => {
            tracing::info!("Already up to date ({installed})");
        }
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for the schedule fragment.
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Show(show) => match show.command {
            ShowSubcommands::Add(args) => run_show_add(&args, cli.dir.as_ref()),
            ShowSubcommands::Set(args) => run_show_set(&args, cli.dir.as_ref()),
            ShowSubcommands::List => run_show_list(cli.dir.as_ref()),
            ShowSubcommands::Remove(args) => run_show_remove(&args, cli.dir.as_ref()),
        },
        Commands::Schedule(schedule) => match schedule.command {
            ScheduleSubcommands::Render(args) => run_schedule_render(&args, cli.dir.as_ref()),
        },
        Commands::Update(update) => match update.command {
            UpdateSubcommands::Check(args) => run_update_check(&args, cli.dir.as_ref()).await,
        },
    }
}
