//! CLI entry point for mot

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mot::config::InitOptions;

#[derive(Parser)]
#[command(name = "mot")]
#[command(version)]
#[command(about = "Just an ordinary static blog engine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to the base directory)
        #[arg(default_value = ".")]
        folder: PathBuf,

        /// Site name
        #[arg(long)]
        sitename: Option<String>,

        /// Site payoff line
        #[arg(long)]
        payoff: Option<String>,

        /// Site owner
        #[arg(long)]
        author: Option<String>,

        /// Theme directory name under _themes
        #[arg(long)]
        theme: Option<String>,

        /// GitHub user name
        #[arg(long)]
        github: Option<String>,

        /// Twitter handle
        #[arg(long)]
        twitter: Option<String>,

        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// Post management
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },

    /// Build the static site into dist/
    #[command(alias = "g", alias = "generate")]
    Build,

    /// Serve dist/ over HTTP
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Build the site before serving
        #[arg(short, long)]
        build: bool,
    },

    /// Delete dist/
    Clean,

    /// List posts
    List,
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a new post
    New {
        /// Title of the new post
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Post date, YYYY-MM-DD [HH:MM[:SS]] (defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Author (defaults to the configured author)
        #[arg(long)]
        author: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "mot=debug,info" } else { "mot=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init {
            folder,
            sitename,
            payoff,
            author,
            theme,
            github,
            twitter,
            force,
        } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            let options = InitOptions {
                sitename,
                payoff,
                author,
                theme,
                github,
                twitter,
            };
            mot::commands::init::init_site(&target_dir, options, force)?;
            println!("Initialized empty blog in {:?}", target_dir);
        }

        Commands::Post { action } => match action {
            PostCommands::New {
                title,
                date,
                author,
            } => {
                let site = mot::Mot::new(&base_dir)?;
                let path =
                    mot::commands::new::run(&site, &title, date.as_deref(), author.as_deref())?;
                println!("Created: {:?}", path);
            }
        },

        Commands::Build => {
            let site = mot::Mot::new(&base_dir)?;
            tracing::info!("Building site...");
            let summary = mot::commands::generate::run(&site)?;
            println!(
                "Built {} posts and {} extra pages into {:?}",
                summary.posts, summary.extra_pages, site.dist_dir
            );
        }

        Commands::Server { port, ip, build } => {
            let site = mot::Mot::new(&base_dir)?;
            if build {
                tracing::info!("Building site...");
                mot::commands::generate::run(&site)?;
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mot::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = mot::Mot::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            mot::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = mot::Mot::new(&base_dir)?;
            mot::commands::list::run(&site)?;
        }
    }

    Ok(())
}
