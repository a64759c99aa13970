use std::fs;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stolarija::config::{ServerConfig, db_path_in};
use stolarija::seed::{seed_admin_user, seed_defaults};
use stolarija::server::{AppState, create_router};
use stolarija::store::{SqliteStore, Store};
use stolarija::uploads::UploadStorage;

#[derive(Parser)]
#[command(name = "stolarija")]
#[command(about = "Backend for a carpentry business website", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for database and uploaded images
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the database and seed the admin account plus default content
    Init {
        /// Data directory for database and uploaded images
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Admin email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Admin password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Admin display name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Skip interactive prompts; requires --email, --password and --name
        #[arg(long)]
        non_interactive: bool,
    },
}

struct InitArgs {
    data_dir: String,
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    non_interactive: bool,
}

fn prompt_email() -> anyhow::Result<String> {
    let email = inquire::Text::new("Admin email:")
        .with_validator(|input: &str| {
            if stolarija::server::validation::is_valid_email(input.trim()) {
                Ok(inquire::validator::Validation::Valid)
            } else {
                Err("Enter a valid email address".into())
            }
        })
        .prompt()?;
    Ok(email)
}

fn prompt_password() -> anyhow::Result<String> {
    let password = inquire::Password::new("Admin password:")
        .with_validator(|input: &str| {
            if input.len() < 8 {
                Err("Password must be at least 8 characters".into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    Ok(password)
}

fn prompt_name() -> anyhow::Result<String> {
    let name = inquire::Text::new("Admin name:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Err("Name cannot be empty".into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    Ok(name)
}

fn run_init(args: InitArgs) -> anyhow::Result<()> {
    let data_path: std::path::PathBuf = args.data_dir.into();
    fs::create_dir_all(&data_path)?;

    let store = SqliteStore::new(db_path_in(&data_path))?;
    store.initialize()?;

    if store.has_admin_user()? {
        println!("Admin account already exists, keeping it.");
    } else {
        let (email, password, name) = if args.non_interactive {
            match (args.email, args.password, args.name) {
                (Some(e), Some(p), Some(n)) => (e, p, n),
                _ => bail!("--non-interactive requires --email, --password and --name"),
            }
        } else {
            let email = match args.email {
                Some(e) => e,
                None => prompt_email()?,
            };
            let password = match args.password {
                Some(p) => p,
                None => prompt_password()?,
            };
            let name = match args.name {
                Some(n) => n,
                None => prompt_name()?,
            };
            (email, password, name)
        };

        let user = seed_admin_user(&store, &email, &password, &name)?;
        match user {
            Some(user) => println!("Admin account created: {}", user.email),
            None => println!("Admin account already exists, keeping it."),
        }
    }

    seed_defaults(&store)?;
    println!("Default services and settings installed.");
    println!("Run 'stolarija serve' to start the server.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("stolarija=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                email,
                password,
                name,
                non_interactive,
            } => {
                run_init(InitArgs {
                    data_dir,
                    email,
                    password,
                    name,
                    non_interactive,
                })?;
            }
        },
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
            };

            let store = SqliteStore::new(config.db_path())?;
            store.initialize()?;
            if !store.has_admin_user()? {
                bail!(
                    "Server not initialized. Run 'stolarija admin init' first to create the database and admin account."
                );
            }

            let state = Arc::new(AppState {
                store: Arc::new(store),
                uploads: UploadStorage::new(&config.data_dir),
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
