//! Portal CLI
//!
//! Command-line interface for the positions/auth backend:
//! - Sign in, register, sign out
//! - Show the decoded session token
//! - List, create, update and delete positions

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use portal::api::{ApiClient, Position, PositionInput};
use portal::config::{generate_default_config, Config, LoggingConfig};
use portal::session::{decode_claims, token_preview, SessionStore};
use portal::views::{greeting, DashboardView, LoginView, Navigate, PositionsBoard, RegisterView};

#[derive(Parser)]
#[command(name = "portal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sign in and manage job positions on the portal backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and PORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ./portal.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the landing greeting
    Home,

    /// Sign in and store the access token
    Login {
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show the claims in the stored token
    Whoami {
        /// Print the whole token instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Show the dashboard
    Dashboard {
        /// Print the whole token instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Manage positions
    Positions {
        #[command(subcommand)]
        action: PositionsCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PositionsCommand {
    /// List all positions
    List,

    /// Create a position
    Create {
        /// Position code (e.g. DEV)
        code: String,
        /// Position name
        name: String,
    },

    /// Update a position; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a position
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Portal v{} using backend {}", env!("CARGO_PKG_VERSION"), config.api.url);

    let store = SessionStore::new(&config.session.file);
    let mut client = ApiClient::new(config.api.client_config()).context("building HTTP client")?;

    match cli.command {
        Commands::Home => {
            let token = store.load_token()?;
            println!("{}", greeting(token.as_deref()));
            if token.is_none() {
                println!();
                println!("Sign in with:        portal login <username>");
                println!("Create an account:   portal register <username>");
            }
        }

        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let mut view = LoginView::new(username, password);
            match view.submit(&client, &store).await {
                Some(Navigate::Dashboard) => {
                    let token = store.load_token()?;
                    print_dashboard(&DashboardView::new(token), cli.format)?;
                }
                _ => fail(view.error),
            }
        }

        Commands::Register { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let mut view = RegisterView::new(username.clone(), password);
            match view.submit(&client).await {
                Some(_) => {
                    println!("Account created. Sign in with:");
                    println!("  portal login {}", username);
                }
                None => fail(view.error),
            }
        }

        Commands::Logout => {
            store.clear()?;
            println!("Signed out");
        }

        Commands::Whoami { full } => {
            let Some(token) = store.load_token()? else {
                fail(Some("Not signed in".to_string()));
            };

            match decode_claims(&token) {
                Ok(claims) if cli.format == OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&claims)?);
                }
                Ok(claims) => {
                    let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
                    println!("Username:   {}", show(claims.username.clone()));
                    println!("Subject:    {}", show(claims.sub.as_ref().map(|s| s.to_string())));
                    println!("Role:       {}", show(claims.role.clone()));
                    println!("Issued at:  {}", show(claims.issued_at().map(|t| t.to_rfc3339())));
                    println!("Expires at: {}", show(claims.expires_at().map(|t| t.to_rfc3339())));
                    if claims.is_expired(chrono::Utc::now()) {
                        println!("            (expired)");
                    }
                    println!();
                    println!("Token: {}", token_preview(&token, full));
                }
                Err(e) => fail(Some(format!("Token decoding failed: {}", e))),
            }
        }

        Commands::Dashboard { full } => {
            let mut view = DashboardView::new(store.load_token()?);
            view.show_full = full;
            print_dashboard(&view, cli.format)?;
        }

        Commands::Positions { action } => {
            client.set_token(store.load_token()?);
            let mut board = PositionsBoard::new(client);

            let ok = match action {
                PositionsCommand::List => board.refresh().await,
                PositionsCommand::Create { code, name } => {
                    board.form = PositionInput::new(code, name);
                    board.submit().await
                }
                PositionsCommand::Update { id, code, name } => {
                    board.refresh().await && board.begin_edit(id) && {
                        if let Some(code) = code {
                            board.form.position_code = code;
                        }
                        if let Some(name) = name {
                            board.form.position_name = name;
                        }
                        board.submit().await
                    }
                }
                PositionsCommand::Delete { id } => board.delete(id).await,
            };

            if !ok {
                fail(board.error.take());
            }
            print_positions(&board.positions, cli.format)?;
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("portal={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print the view's message and exit non-zero
fn fail(message: Option<String>) -> ! {
    eprintln!("{}", message.unwrap_or_else(|| "Request failed".to_string()));
    std::process::exit(1);
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}", label)?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_dashboard(view: &DashboardView, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "username": view.username(),
            "claims": view.claims(),
            "token": view.token_display(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", view.heading());
    println!();

    if let Some(token) = view.token_display() {
        println!("Your Bearer Token:");
        println!("  {}", token);
        println!();
    }

    for card in view.cards() {
        println!("{:<10} {}", card.title, card.description);
    }
    Ok(())
}

fn print_positions(positions: &[Position], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(positions)?);
        return Ok(());
    }

    if positions.is_empty() {
        println!("No positions yet.");
        println!();
        println!("Create one with:");
        println!("  portal positions create DEV \"Software Developer\"");
        return Ok(());
    }

    println!("{:<6} {:<12} {}", "ID", "Code", "Name");
    println!("{}", "-".repeat(50));
    for position in positions {
        let id = position
            .position_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<12} {}", id, position.position_code, position.position_name);
    }
    Ok(())
}
