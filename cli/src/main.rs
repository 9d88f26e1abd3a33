//! CLI entrypoint for AskEdith
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use askedith_application::{
    ConnectMailboxUseCase, ConnectionStatus, CredentialStore, DeliveryLogger, DeliveryPolicy,
    FetchResourcesUseCase, NoDeliveryLogger, ResourceCatalog, SendOutreachUseCase,
    WizardController, WizardStateStore,
};
use askedith_domain::questionnaire::Questionnaire;
use askedith_domain::resource::{CatalogFilter, Category, Resource};
use askedith_infrastructure::{
    CatalogSource, ConfigLoader, DispatchingMailer, FileConfig, FileCredentialStore,
    FileWizardStore, HttpCatalog, JsonlDeliveryLog, MailboxClient, MailboxTransport, SeedCatalog,
    Severity, SimulationTransport, TransactionalTransport, TransportAdapter,
};
use askedith_presentation::{Cli, Commands, ConsoleFormatter, ListFormat, WizardRepl};
use clap::Parser;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let _guard = init_logging(&cli);

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => eprintln!("{} {}", "Warning:".yellow(), issue.message),
            Severity::Error => eprintln!("{} {}", "Error:".red(), issue.message),
        }
    }

    info!("Starting AskEdith");

    match &cli.command {
        None => run_wizard(&cli, &config).await,
        Some(Commands::Connect { email }) => run_connect(&config, email).await,
        Some(Commands::Status) => run_status(&config).await,
        Some(Commands::Resources {
            category,
            postal_code,
            radius,
            output,
        }) => {
            run_resources(
                &config,
                category.as_deref(),
                postal_code.as_deref(),
                *radius,
                *output,
            )
            .await
        }
    }
}

/// Initialize tracing based on verbosity level.
///
/// The wizard owns the terminal, so its logs go to a file; one-shot
/// subcommands log to stderr. The returned guard must stay alive for
/// the file writer to flush.
fn init_logging(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let runs_wizard = cli.command.is_none() && !cli.reset;
    if runs_wizard {
        if let Some(log_dir) = dirs::data_dir().map(|p| p.join("askedith").join("logs")) {
            let _ = std::fs::create_dir_all(&log_dir);
            let appender = tracing_appender::rolling::daily(log_dir, "askedith.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            return Some(guard);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    None
}

/// Run the interactive questionnaire wizard (the default command).
async fn run_wizard(cli: &Cli, config: &FileConfig) -> Result<()> {
    let store = Arc::new(
        FileWizardStore::in_data_dir()
            .context("could not determine a data directory for session state")?,
    );

    if cli.reset {
        if store.clear()? {
            println!("Saved session cleared.");
        } else {
            println!("No saved session to clear.");
        }
        return Ok(());
    }

    let controller = if cli.resume {
        WizardController::resume(Questionnaire::intake(), store.clone())
            .context("could not resume the saved session (try 'askedith --reset')")?
    } else {
        if let Ok(Some(_)) = store.load() {
            eprintln!(
                "{}",
                "A saved session exists; run 'askedith --resume' to continue it instead."
                    .yellow()
            );
        }
        WizardController::start(Questionnaire::intake(), store.clone())
    };

    // === Dependency Injection ===
    // One delivery log serves both the send pipeline and the simulation
    // transport.
    let delivery_log: Arc<dyn DeliveryLogger> = match JsonlDeliveryLog::in_data_dir() {
        Some(log) => Arc::new(log),
        None => Arc::new(NoDeliveryLogger),
    };

    let mailbox = Arc::new(MailboxClient::from_config(&config.mailbox));
    let credentials = Arc::new(
        FileCredentialStore::in_data_dir()
            .context("could not determine a data directory for credentials")?,
    );

    // Transport order is the fallback order: the caregiver's own mailbox,
    // then the transactional provider, then simulation.
    let mut transports: Vec<Arc<dyn TransportAdapter>> = Vec::new();
    if mailbox.is_configured() {
        transports.push(Arc::new(MailboxTransport::new(mailbox, credentials)));
    }
    transports.push(Arc::new(TransactionalTransport::from_config(
        &config.transactional,
    )));
    transports.push(Arc::new(SimulationTransport::new(delivery_log.clone())));
    let mailer = Arc::new(DispatchingMailer::new(transports));

    let policy = DeliveryPolicy::from_timeout_seconds(config.delivery.send_timeout_seconds);
    let outreach = SendOutreachUseCase::new(mailer, policy).with_delivery_log(delivery_log);

    let show_progress = !cli.quiet && config.wizard.show_progress;
    let history_file = config.wizard.history_file.clone().map(PathBuf::from);

    match http_base_url(config) {
        Some(base_url) => {
            drive_wizard(
                controller,
                Arc::new(HttpCatalog::new(base_url)),
                outreach,
                show_progress,
                history_file,
            )
            .await
        }
        None => {
            drive_wizard(
                controller,
                Arc::new(SeedCatalog::new()),
                outreach,
                show_progress,
                history_file,
            )
            .await
        }
    }
}

async fn drive_wizard<C: ResourceCatalog + 'static>(
    controller: WizardController<FileWizardStore>,
    catalog: Arc<C>,
    outreach: SendOutreachUseCase<DispatchingMailer>,
    show_progress: bool,
    history_file: Option<PathBuf>,
) -> Result<()> {
    WizardRepl::new(controller, FetchResourcesUseCase::new(catalog), outreach)
        .with_progress(show_progress)
        .with_history_file(history_file)
        .run()
        .await?;
    Ok(())
}

/// Authorize the caregiver's mailbox and store the credential.
async fn run_connect(config: &FileConfig, email: &str) -> Result<()> {
    let client = Arc::new(MailboxClient::from_config(&config.mailbox));
    if !client.is_configured() {
        bail!(
            "the mailbox provider is not configured; set mailbox.api_key in the config \
             (or the NYLAS_API_KEY environment variable) and try again"
        );
    }
    let credentials = Arc::new(
        FileCredentialStore::in_data_dir()
            .context("could not determine a data directory for credentials")?,
    );
    let use_case = ConnectMailboxUseCase::new(client, credentials);

    let start = use_case.begin(email).await?;
    println!();
    println!("Open this URL in your browser to authorize {}:", email);
    println!();
    println!("  {}", start.auth_url);
    println!();

    print!("Paste the one-time code here: ");
    std::io::stdout().flush()?;
    let mut code = String::new();
    std::io::stdin().lock().read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        bail!("no code entered; run 'askedith connect {}' to try again", email);
    }

    let credential = use_case.complete(email, code).await?;
    println!();
    println!(
        "{} {} is connected. Outreach now goes out from your own mailbox.",
        "Done:".green().bold(),
        credential.email
    );
    Ok(())
}

/// Report whether a mailbox is connected.
async fn run_status(config: &FileConfig) -> Result<()> {
    let client = Arc::new(MailboxClient::from_config(&config.mailbox));
    let credentials = Arc::new(
        FileCredentialStore::in_data_dir()
            .context("could not determine a data directory for credentials")?,
    );

    // Without provider configuration there is nothing to probe; report the
    // stored address, if any, as not connected.
    let status = if client.is_configured() {
        ConnectMailboxUseCase::new(client, credentials)
            .status()
            .await?
    } else {
        ConnectionStatus {
            connected: false,
            address: credentials.load()?.map(|c| c.email),
        }
    };

    print!("{}", ConsoleFormatter::format_status(&status));
    Ok(())
}

/// List catalog resources without running the wizard.
async fn run_resources(
    config: &FileConfig,
    category: Option<&str>,
    postal_code: Option<&str>,
    radius: f64,
    output: ListFormat,
) -> Result<()> {
    let mut filter = CatalogFilter::all();
    if let Some(name) = category {
        filter.category = Some(name.parse::<Category>()?);
    }
    if let Some(zip) = postal_code {
        filter.postal_code = Some(zip.to_string());
        filter.radius_miles = Some(radius);
    }

    let resources = match http_base_url(config) {
        Some(base_url) => fetch_resources(Arc::new(HttpCatalog::new(base_url)), &filter).await?,
        None => fetch_resources(Arc::new(SeedCatalog::new()), &filter).await?,
    };

    match output {
        ListFormat::Full => print!("{}", ConsoleFormatter::format_resource_list(&resources)),
        ListFormat::Json => println!("{}", ConsoleFormatter::format_json(&resources)),
    }
    Ok(())
}

async fn fetch_resources<C: ResourceCatalog + 'static>(
    catalog: Arc<C>,
    filter: &CatalogFilter,
) -> Result<Vec<Resource>> {
    Ok(FetchResourcesUseCase::new(catalog).execute(filter).await?)
}

/// The catalog base URL when the config selects the HTTP source.
///
/// A missing URL was already reported by validate(); callers fall back
/// to the seed catalog.
fn http_base_url(config: &FileConfig) -> Option<String> {
    match config.catalog.source {
        CatalogSource::Http => config.catalog.base_url.clone(),
        CatalogSource::Seed => None,
    }
}
