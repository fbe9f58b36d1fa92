//! Subcommand implementations.
//!
//! Every command except `reset` restores the session from the state
//! directory before it runs.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use sauti_client::{HttpTransport, StaticToken};
use sauti_model::{Currency, DateRange, Dimension, FilterValues};
use sauti_persistence::FileStore;
use sauti_query::ApiEndpoints;
use sauti_session::{
    Action, BusyReason, FetchOutcome, Session, SessionController, SessionError,
};

use sauti_cli::config::GridConfig;
use sauti_cli::render::{filters_table, options_table, rows_table, spinner, write_page_csv};

use crate::cli::{Command, FilterArgs, PageCsvArgs};

type Controller = SessionController<FileStore, HttpTransport<StaticToken>>;

pub async fn run(command: Command, config: &GridConfig, token: Option<String>) -> Result<()> {
    if matches!(command, Command::Reset) {
        return reset(config);
    }
    let mut controller = open(config, token).await?;
    match command {
        Command::Show => show(&controller),
        Command::Update(args) => {
            apply_filters(&mut controller, &args)?;
            paginate(&mut controller, Paging::Update).await
        }
        Command::Next => paginate(&mut controller, Paging::Next).await,
        Command::Prev => paginate(&mut controller, Paging::Prev).await,
        Command::Reset => reset(config),
        Command::Export(args) => {
            apply_filters(&mut controller, &args)?;
            export(&mut controller).await
        }
        Command::PageCsv(args) => page_csv(&controller, &args),
        Command::Options => options(&mut controller).await,
    }
}

/// Open the state directory and restore the session.
async fn open(config: &GridConfig, token: Option<String>) -> Result<Controller> {
    let state_dir = config.state_dir();
    tracing::debug!(state_dir = %state_dir.display(), api_base = %config.api_base, "opening session");

    let store = FileStore::open(&state_dir).map_err(SessionError::from)?;
    let endpoints = ApiEndpoints::new(&config.api_base).map_err(SessionError::from)?;
    let auth = token.map_or_else(|| StaticToken::from_env(&config.token_env), StaticToken::new);
    if !auth.is_present() {
        tracing::warn!(env = %config.token_env, "no API token configured");
    }
    let transport = HttpTransport::with_timeout(auth, config.timeout())
        .map_err(SessionError::from)
        .context("create HTTP client")?;

    let bar = spinner(BusyReason::GettingData);
    let controller = SessionController::init(store, endpoints, transport).await;
    bar.finish_and_clear();
    Ok(controller?)
}

/// Wipe the stored session without restoring it, so a corrupt state
/// directory can always be cleared.
fn reset(config: &GridConfig) -> Result<()> {
    let store = FileStore::open(config.state_dir()).map_err(SessionError::from)?;
    let endpoints = ApiEndpoints::new(&config.api_base).map_err(SessionError::from)?;
    Session::new(store, endpoints).reset()?;
    println!("Session reset.");
    Ok(())
}

/// Turn filter flags into reducer actions.
fn filter_actions(args: &FilterArgs) -> std::result::Result<Vec<Action>, SessionError> {
    let mut actions = Vec::new();
    if args.clear_filters {
        for dimension in Dimension::ALL {
            actions.push(Action::SetDimension(
                dimension,
                FilterValues::Many(Vec::new()),
            ));
        }
    }
    let dimensions = [
        (Dimension::Countries, &args.countries),
        (Dimension::Markets, &args.markets),
        (Dimension::Sources, &args.sources),
        (Dimension::ProductCategories, &args.categories),
        (Dimension::ProductAggregators, &args.aggregators),
        (Dimension::Products, &args.products),
    ];
    for (dimension, values) in dimensions {
        if !values.is_empty() {
            actions.push(Action::SetDimension(dimension, values.clone().into()));
        }
    }
    if let Some(code) = &args.currency {
        actions.push(Action::SetCurrency(Currency::new(code)?));
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        actions.push(Action::SetDateRange(Some(DateRange::parse(from, to)?)));
    } else if args.clear_dates {
        actions.push(Action::SetDateRange(None));
    }
    Ok(actions)
}

fn apply_filters(controller: &mut Controller, args: &FilterArgs) -> Result<()> {
    for action in filter_actions(args)? {
        controller.dispatch(action)?;
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Paging {
    Update,
    Next,
    Prev,
}

async fn paginate(controller: &mut Controller, paging: Paging) -> Result<()> {
    let bar = spinner(BusyReason::GettingData);
    let outcome = match paging {
        Paging::Update => controller.update().await,
        Paging::Next => controller.go_next().await,
        Paging::Prev => controller.go_prev().await,
    };
    bar.finish_and_clear();

    if let FetchOutcome::Applied { rows } = outcome? {
        tracing::info!(rows, "page loaded");
    }
    show(controller)
}

fn show(controller: &Controller) -> Result<()> {
    let session = controller.session();
    println!("{}", filters_table(session.filters()));

    let tracker = session.tracker();
    match tracker.page_label() {
        Some(label) => println!("Page {label} ({})", tracker.state()),
        None => println!("No page loaded ({})", tracker.state()),
    }
    if let Some(message) = session.error() {
        eprintln!("warning: {message}");
    }
    if session.rows().is_empty() {
        println!("No rows cached. Run `sauti-grid update` to fetch data.");
    } else {
        println!("{}", rows_table(session.rows()));
    }
    Ok(())
}

async fn export(controller: &mut Controller) -> Result<()> {
    let bar = spinner(BusyReason::Exporting);
    let link = controller.export_all().await;
    bar.finish_and_clear();
    println!("{}", link?.url);
    Ok(())
}

fn page_csv(controller: &Controller, args: &PageCsvArgs) -> Result<()> {
    let rows = controller.session().rows();
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_page_csv(rows, file).with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => write_page_csv(rows, io::stdout().lock()).context("write CSV to stdout")?,
    }
    Ok(())
}

async fn options(controller: &mut Controller) -> Result<()> {
    let bar = spinner(BusyReason::LoadingOptions);
    let catalogue = controller.load_options().await;
    bar.finish_and_clear();
    let catalogue = catalogue?;
    for dimension in Dimension::ALL {
        println!("{}", options_table(&catalogue, dimension));
    }
    Ok(())
}
