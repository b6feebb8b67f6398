//! crosspost: turn one piece of content into posts for every platform

mod bundle_file;
mod client;
mod cmd;
mod context;
mod credential_store;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use crosspost_core::common::Platform;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd::generate::SourceArgs;
use crate::context::CliContext;
use crate::credential_store::CredentialStore;

#[derive(Parser)]
#[command(name = "crosspost", version, about = "Generate and publish social posts from one source")]
struct Cli {
    /// Local bundle file
    #[arg(long, global = true, default_value = bundle_file::DEFAULT_BUNDLE_FILE)]
    bundle: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Generate content for every (or the selected) platform
    Generate {
        #[command(flatten)]
        source: SourceOpts,

        /// Platform ids (x, instagram, note, threads, html); default all
        #[arg(short, long, value_delimiter = ',')]
        platforms: Vec<Platform>,
    },

    /// Regenerate one platform and patch it into the bundle
    Regenerate {
        platform: Platform,

        #[command(flatten)]
        source: SourceOpts,
    },

    /// Replace a platform's text, or one carousel slide, in the bundle
    Edit {
        platform: Platform,

        /// 1-based slide number (carousel only)
        #[arg(long)]
        slide: Option<usize>,

        text: String,
    },

    /// Publish bundle content through the server's adapters
    Publish {
        /// Platform ids; default everything in the bundle
        #[arg(value_delimiter = ',')]
        platforms: Vec<Platform>,

        /// Title for note and html
        #[arg(short, long)]
        title: Option<String>,

        /// X session token
        #[arg(long, env = "TWITTER_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Where HTML pages are saved
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Save the bundle's page as a standalone HTML file
    ExportHtml {
        #[arg(short, long)]
        title: String,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key (prompts when omitted)
    Set { key: Option<String> },
    /// Show the stored key, masked
    Show,
    /// Remove the stored key
    Clear,
}

#[derive(Args)]
struct SourceOpts {
    /// Text to adapt, or a URL with --url
    content: Option<String>,

    /// Treat the content as a URL to fetch
    #[arg(long)]
    url: bool,

    /// Read the content from a file
    #[arg(long, conflicts_with = "content")]
    file: Option<PathBuf>,

    /// Overrides GEMINI_API_KEY and the stored key
    #[arg(long)]
    api_key: Option<String>,
}

impl SourceOpts {
    fn into_source(self) -> Result<(SourceArgs, Option<String>)> {
        let content = match (self.content, self.file) {
            (Some(content), _) => content,
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => anyhow::bail!("Provide content, a URL with --url, or --file"),
        };
        Ok((
            SourceArgs {
                content,
                is_url: self.url,
            },
            self.api_key,
        ))
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::new(cli.bundle, cli.yes);
    let mut store = CredentialStore::open_default()?;

    match cli.command {
        Commands::Key { action } => match action {
            KeyAction::Set { key } => cmd::key::set(&ctx, &mut store, key),
            KeyAction::Show => {
                cmd::key::show(&store);
                Ok(())
            }
            KeyAction::Clear => cmd::key::clear(&ctx, &mut store),
        },

        Commands::Generate { source, platforms } => {
            let (source, key_flag) = source.into_source()?;
            let key = cmd::generate::resolve_key(key_flag, store.api_key())?;
            cmd::generate::generate(&ctx, &source, &key, &platforms).await
        }

        Commands::Regenerate { platform, source } => {
            let (source, key_flag) = source.into_source()?;
            let key = cmd::generate::resolve_key(key_flag, store.api_key())?;
            cmd::generate::regenerate(&ctx, &source, &key, platform).await
        }

        Commands::Edit {
            platform,
            slide,
            text,
        } => cmd::edit::edit(&ctx, platform, slide, text),

        Commands::Publish {
            platforms,
            title,
            access_token,
            out_dir,
        } => {
            cmd::publish::publish(
                &ctx,
                &platforms,
                title.as_deref(),
                access_token.as_deref(),
                &out_dir,
            )
            .await
        }

        Commands::ExportHtml { title, out_dir } => cmd::publish::export_html(&ctx, &title, &out_dir),
    }
}
