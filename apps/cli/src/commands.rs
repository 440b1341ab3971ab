//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use qgroups_content::{FsAuthorRegistry, FsContentSource, FsGuideRegistry};
use qgroups_core::QuestionGroups;
use qgroups_shared::{AppConfig, AssembleOptions, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// qgroups — resolve question-group content into a normalized model.
#[derive(Parser)]
#[command(
    name = "qgroups",
    version,
    about = "Aggregate question-group markdown documents into resolved JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.qgroups/qgroups.toml).
    #[arg(long, global = true, env = "QGROUPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Question-group root directory.
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Author records directory.
    #[arg(long, global = true)]
    pub authors: Option<String>,

    /// Guide records directory.
    #[arg(long, global = true)]
    pub guides: Option<String>,

    /// Fail when an author or related-guide id matches nothing.
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List all question groups in display order.
    List {
        /// Print the fully resolved groups as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print one resolved question group as JSON.
    Show {
        /// Group id (source filename without extension).
        id: String,
    },

    /// Print id, title, and question count for the given groups.
    Summary {
        /// Group ids.
        ids: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "qgroups=info",
        1 => "qgroups=debug",
        _ => "qgroups=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so JSON on stdout stays pipeable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Load the config file and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(root) = &cli.root {
        config.content.root = root.clone();
    }
    if let Some(authors) = &cli.authors {
        config.content.authors_dir = authors.clone();
    }
    if let Some(guides) = &cli.guides {
        config.content.guides_dir = guides.clone();
    }
    if cli.strict {
        config.references.strict = true;
    }
}

/// Build the query facade over the filesystem content tree.
fn build_facade(config: &AppConfig) -> QuestionGroups {
    QuestionGroups::new(
        Arc::new(FsContentSource::new(&config.content.root)),
        Arc::new(FsAuthorRegistry::new(&config.content.authors_dir)),
        Arc::new(FsGuideRegistry::new(&config.content.guides_dir)),
    )
    .with_options(AssembleOptions::from(config))
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::List { json } => cmd_list(&config, json).await,
        Command::Show { id } => cmd_show(&config, &id).await,
        Command::Summary { ids } => cmd_summary(&config, &ids).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

async fn cmd_list(config: &AppConfig, json: bool) -> Result<()> {
    info!(root = %config.content.root, "listing question groups");
    let groups = build_facade(config).get_all_question_groups().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for group in &groups {
        let marker = if group.frontmatter.is_new { " (new)" } else { "" };
        println!(
            "{:>4}  {:<24} {}{marker}  [{} questions, {} topics]",
            group.frontmatter.order,
            group.id,
            group.frontmatter.brief_title,
            group.questions.len(),
            group.all_topics.len(),
        );
    }
    Ok(())
}

async fn cmd_show(config: &AppConfig, id: &str) -> Result<()> {
    let group = build_facade(config)
        .get_question_group_by_id(id)
        .await?
        .ok_or_else(|| eyre!("no question group with id '{id}'"))?;

    println!("{}", serde_json::to_string_pretty(&group)?);
    Ok(())
}

async fn cmd_summary(config: &AppConfig, ids: &[String]) -> Result<()> {
    let summaries = build_facade(config).get_question_groups_by_ids(ids).await?;
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
