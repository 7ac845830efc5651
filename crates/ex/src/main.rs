mod config;

use clap::{Parser, Subcommand};
use config::Config;
use ex_core::booking::{payment_prompt, quote, PaymentGateway, TicketQuantity};
use ex_core::error::{SessionError, StorefrontError};
use ex_core::format::{format_date, initials};
use ex_core::metrics::{EventListing, listings};
use ex_core::types::criteria::{FilterCriteria, RawFilter};
use ex_core::types::enums::{Role, TierColor};
use ex_core::types::io::RegisterInput;
use ex_core::SessionStore;
use ex_db::util::DbError;
use ex_db::SqliteStorage;
use ex_events::bus::NotificationBus;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ex", about = "College event discovery and booking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// List events, optionally filtered.
    Events {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        college: Option<String>,
        /// free, under500, 500to1000 or above1000
        #[arg(long)]
        price: Option<String>,
    },
    /// Show one event with its availability and a payment quote.
    Show {
        id: String,
        /// Tickets to quote, clamped to the seats left.
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    Login { email: String, password: String },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student", value_parser = parse_role)]
        role: Role,
    },
    Logout,
    Whoami,
    /// Print the OpenAPI document.
    Openapi,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("logger init failed: {0}")]
    Logger(String),
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<ex_core::error::CatalogError> for CliError {
    fn from(err: ex_core::error::CatalogError) -> Self {
        Self::Storefront(err.into())
    }
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role: {value} (student or organizer)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logger() {
        eprintln!("{err}");
    }
    match run(cli.command, Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_logger() -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()
        .map_err(|err| CliError::Logger(err.to_string()))
}

async fn run(command: Command, config: Config) -> Result<(), CliError> {
    match command {
        Command::Serve => serve(config).await,
        Command::Events {
            search,
            category,
            college,
            price,
        } => {
            let catalog = config.load_catalog()?;
            let criteria = FilterCriteria::from(RawFilter {
                search,
                category,
                college,
                price,
            });
            let found = listings(catalog.filter(&criteria));
            if found.is_empty() {
                println!("{}", "No events found".dimmed());
            }
            for listing in &found {
                print_listing(listing);
            }
            Ok(())
        }
        Command::Show { id, quantity } => {
            let catalog = config.load_catalog()?;
            let event = catalog.find(&id).ok_or_else(|| {
                StorefrontError::from(ex_core::error::CatalogError::EventNotFound { id })
            })?;
            let listing = EventListing::new(event.clone());
            print_listing(&listing);
            println!("  {}", listing.event.description);
            println!(
                "  {} at {}, {}",
                listing.event.time, listing.event.location, listing.event.college
            );
            println!("  Organized by {}", listing.event.organizer_name);
            let quantity = TicketQuantity::clamp(quantity, listing.event.seats.available);
            match quote(&listing.event, quantity.get()) {
                Ok(quote) => println!("  {}", payment_prompt(&quote)),
                Err(err) => println!("  {}", err.to_string().red()),
            }
            Ok(())
        }
        Command::Login { email, password } => {
            let mut session = open_session(&config)?;
            match session.login(&email, &password).await? {
                Some(identity) => println!(
                    "Signed in as {} ({})",
                    identity.name.bold(),
                    identity.role.label()
                ),
                None => println!("{}", "Please fill in all fields".yellow()),
            }
            Ok(())
        }
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            let mut session = open_session(&config)?;
            let input = RegisterInput {
                name,
                email,
                password,
                role,
            };
            match session.register(&input).await? {
                Some(identity) => println!(
                    "Account created for {} ({})",
                    identity.name.bold(),
                    identity.role.label()
                ),
                None => println!("{}", "Please fill in all fields".yellow()),
            }
            Ok(())
        }
        Command::Logout => {
            open_session(&config)?.logout()?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            let session = open_session(&config)?;
            match session.current() {
                Some(identity) => {
                    println!(
                        "[{}] {} <{}>",
                        initials(&identity.name),
                        identity.name.bold(),
                        identity.email
                    );
                    println!("  {}", identity.role.label().dimmed());
                    if let Some(college) = &identity.college {
                        println!("  {college}");
                    }
                }
                None => println!("{}", "Not signed in".dimmed()),
            }
            Ok(())
        }
        Command::Openapi => {
            println!("{}", ex_serve::openapi::generate_spec());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), CliError> {
    let catalog = config.load_catalog()?;
    let bus = NotificationBus::new(1024);
    let session = open_session(&config)?
        .with_auth_delay(config.auth_delay)
        .with_notifications(bus.clone());
    let payments = PaymentGateway::new(bus.clone()).with_delay(config.payment_delay);
    let state = ex_serve::AppState::new(catalog, session, payments, bus);
    ex_serve::serve(state, config.addr()).await?;
    Ok(())
}

fn open_session(config: &Config) -> Result<SessionStore<SqliteStorage>, CliError> {
    let storage = SqliteStorage::open(&config.db_path)?;
    Ok(SessionStore::init(storage).with_auth_delay(config.auth_delay))
}

fn print_listing(listing: &EventListing) {
    let event = &listing.event;
    let metrics = &listing.metrics;
    let seats = format!(
        "{}/{} seats ({}%)",
        event.seats.available, event.seats.total, metrics.availability_rounded
    );
    let seats = match metrics.color {
        TierColor::Red => seats.red().to_string(),
        TierColor::Yellow => seats.yellow().to_string(),
        TierColor::Green => seats.green().to_string(),
    };
    let marker = if event.featured { "*" } else { " " };
    println!(
        "{marker} {:<10} {} {}",
        event.id.as_str().dimmed(),
        event.title.bold(),
        format!("[{}]", event.category).cyan()
    );
    println!(
        "  {}  {}  {}",
        format_date(event.date),
        metrics.price_label,
        seats
    );
}
