use std::{
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use crate::{
    report::build_report,
    session::{
        editor::{ExternalEditor, StreamEditor, TextEditor},
        shutdown::wait_for_interrupt,
        TrackingSession,
    },
    storage::task_storage::TaskStorageImpl,
    terminal::{ConsoleTerminal, Terminal},
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
        time::parse_report_date,
    },
};

#[derive(Parser, Debug)]
#[command(name = "task-tracker", version, long_about = None)]
#[command(
    about = "Time tasks of your projects and report the hours spent per day",
    long_about = None
)]
pub struct Args {
    #[arg(help = "Directory with one sub-directory per project. Created if it doesn't exist")]
    pub tasks_dir: PathBuf,
    #[arg(
        long,
        value_name = "DD.MM.YYYY",
        value_parser = parse_report_date,
        help = "Show the report of a day instead of tracking a task. For example 05.01.2024"
    )]
    pub reporting: Option<NaiveDate>,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let log_dir = create_application_default_path()?.join("logs");
    enable_logging(CLI_PREFIX, &log_dir, None)?;
    info!("Starting with {args:?}");

    let mut terminal = ConsoleTerminal::stdio();
    terminal.heading("Task Tracker")?;

    let storage = TaskStorageImpl::new(args.tasks_dir.clone())
        .with_context(|| format!("Can't use {:?} as the tasks directory", args.tasks_dir))?;

    match args.reporting {
        Some(date) => show_report(&storage, &mut terminal, date),
        None => track_time(storage, Box::new(terminal)).await,
    }
}

/// Prints every record of `date` across all projects together with the day's total.
pub fn show_report(
    storage: &TaskStorageImpl,
    terminal: &mut dyn Terminal,
    date: NaiveDate,
) -> Result<()> {
    let report = build_report(storage, date)?;
    info!(
        "Report for {date} has {} rows, {} minutes in total",
        report.rows.len(),
        report.total_minutes()
    );
    terminal.print_report(&report)
}

/// Runs an interactive tracking session, stopped with Ctrl-C.
async fn track_time(storage: TaskStorageImpl, terminal: Box<dyn Terminal>) -> Result<()> {
    let editor = choose_editor(
        io::stdin().is_terminal(),
        ExternalEditor::from_env(),
        io::stdin(),
    );

    TrackingSession::new(storage, terminal, editor, Box::new(DefaultClock))
        .run(wait_for_interrupt())
        .await?;
    Ok(())
}

/// Without a terminal there's nobody to drive an editor, the description is read from `input`.
fn choose_editor<R: Read + 'static>(
    interactive: bool,
    external: ExternalEditor,
    input: R,
) -> Box<dyn TextEditor> {
    if interactive {
        Box::new(external)
    } else {
        Box::new(StreamEditor::new(input))
    }
}
