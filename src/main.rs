mod app;
mod cli;
mod error;
mod model;
mod msg;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Args;
use error::TrackerError;
use model::catalogue::{self, CatalogueEntry, Platform};
use model::config::AppConfig;
use model::display::{self, DisplayItem};
use model::reconcile::{ReconcileReport, reconcile};
use model::record::InstallRecord;
use model::store::StateStore;
use msg::Msg;

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging goes to a file; stdout belongs to the terminal UI.
    let _guard = match init_logging(args.log_level.as_deref()) {
        Ok(guard) => guard,
        Err(err) => return fail(&err),
    };
    tracing::info!("nk-apps starting");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            fail(&err)
        }
    }
}

fn fail(err: &anyhow::Error) -> ExitCode {
    eprintln!("nk-apps: {err:#}");
    ExitCode::from(error::exit_code_for(err))
}

/// Catalogue and install records after reconciliation, ready to show.
struct Session {
    store: StateStore,
    catalogue: Vec<CatalogueEntry>,
    records: Vec<InstallRecord>,
    report: ReconcileReport,
}

impl Session {
    fn open(config: &AppConfig) -> Result<Self, TrackerError> {
        let catalogue = catalogue::load(&config.catalogue_path())?;

        let store = StateStore::new(config.state_dir(), &config.general.state_file);
        store.prepare()?;
        let mut records = store.load()?;

        let report = reconcile(&catalogue, &mut records);

        Ok(Self {
            store,
            catalogue,
            records,
            report,
        })
    }

    fn items(&self) -> Vec<DisplayItem> {
        display::items(&self.records, &self.catalogue, Platform::current())
    }

    fn save(&self) -> Result<(), TrackerError> {
        self.store.save(&self.records)
    }
}

fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(&args)?;
    let session = Session::open(&config)?;

    if args.print {
        print_records(&session.records);
    } else {
        run_ui(&config, session.items())?;
    }

    // Written only once the list view has closed; an interrupted run loses
    // this pass.
    session.save()?;

    println!(
        "{} updated ({} new, {} total)",
        session.store.path().display(),
        session.report.added.len(),
        session.records.len()
    );
    Ok(())
}

fn init_logging(level: Option<&str>) -> Result<WorkerGuard> {
    let filter = log_filter(level)?;

    let log_dir = directories::ProjectDirs::from("", "", "nk-apps")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir).map_err(|source| TrackerError::Io {
        path: log_dir.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "nk-apps.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .init();

    Ok(guard)
}

/// `--log-level` wins over `RUST_LOG`, which wins over the `info` default.
fn log_filter(level: Option<&str>) -> Result<EnvFilter, TrackerError> {
    if let Some(level) = level {
        return EnvFilter::try_new(format!("nk_apps={level}")).map_err(|source| {
            TrackerError::LogLevel {
                level: level.to_string(),
                source,
            }
        });
    }

    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nk_apps=info")))
}

fn print_records(records: &[InstallRecord]) {
    for record in records {
        println!("{}\t{}\t{}", record.name, record.installed, record.version);
    }
}

fn run_ui(config: &AppConfig, items: Vec<DisplayItem>) -> Result<()> {
    // Terminal setup
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, App::new(config, items));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let size = terminal.size()?;
    app.update(Msg::Resize(size.width, size.height))?;

    while !app.should_quit {
        terminal.draw(|f| app.view(f))?;

        let msg = match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => Msg::Key(k),
            Event::Resize(w, h) => Msg::Resize(w, h),
            _ => continue,
        };
        app.update(msg)?;
    }

    match app.list.selected_item() {
        Some(item) => tracing::info!("list view closed on {}", item.title()),
        None => tracing::info!("list view closed"),
    }
    Ok(())
}
