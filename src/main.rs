use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use template_catalog::{api, config::AppConfig, load_catalog, render};

#[derive(Parser)]
#[command(name = "tcat")]
#[command(about = "Browse, search and copy template snippets")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog over HTTP
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// List templates for one owner, optionally narrowed by a search term
    List {
        /// Owner to show (defaults to the configured default owner)
        #[arg(short, long)]
        owner: Option<String>,

        /// Case-insensitive text matched against name, category and content
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print a template's raw content (pipe it into your clipboard tool)
    Show {
        /// Template id, as printed by `list`
        id: String,
    },
    /// List the owners present in the catalog
    Owners,
}

/// Initialize tracing with output to stderr (for commands that print to stdout) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| "template_catalog=info,catalog_core=info,tower_http=info".into(),
    ));

    if use_stderr {
        // Printing commands keep stdout for their output
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: &AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting template catalog server on port {}", port);

    let outcome = load_catalog(config).await?;
    let app = api::create_router(outcome.catalog);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Template catalog listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { port }) => serve(&config, port).await?,
        Some(Commands::List { owner, search }) => {
            let catalog = load_catalog(&config).await?.catalog;
            let owner = owner.as_deref().unwrap_or(catalog.default_owner());
            let entries = catalog.filter(owner, search.as_deref().unwrap_or(""));
            print!("{}", render::render_list(&entries));
        }
        Some(Commands::Show { id }) => {
            let catalog = load_catalog(&config).await?.catalog;
            let entry = catalog
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Template not found: {}", id))?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(entry.content.as_bytes())?;
            stdout.flush()?;
        }
        Some(Commands::Owners) => {
            let catalog = load_catalog(&config).await?.catalog;
            for owner in catalog.owners() {
                println!("{}", owner);
            }
        }
        None => serve(&config, 3000).await?,
    }

    Ok(())
}
