use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{ControllerOptions, HttpSpoolApi, SpoolAssignmentController, Step};
use shared::domain::PrinterId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod navigator;
mod progress;
mod render;
mod scan;

use config::{load_settings, resolve_server_url};
use navigator::TerminalNavigator;
use progress::next_confirming;
use render::{parse_command, printer_label, render_state, PickerCommand};
use scan::parse_scan;

#[derive(Parser, Debug)]
#[command(about = "Assign a filament spool to a printer")]
struct Args {
    /// Spool id, or the URL from the spool's QR/NFC tag.
    spool: String,
    #[arg(long)]
    server_url: Option<String>,
    /// Pick this printer instead of prompting.
    #[arg(long)]
    printer: Option<String>,
    /// Confirm the preselected printer without prompting.
    #[arg(long)]
    yes: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let scanned = parse_scan(&args.spool)?;
    let server_url =
        resolve_server_url(args.server_url.as_deref(), &settings, scanned.origin.as_ref())?;
    info!(%server_url, spool_id = %scanned.spool_id, "starting spool picker");

    let api = HttpSpoolApi::with_timeout(server_url.clone(), settings.request_timeout())
        .context("failed to build http client")?;
    let controller = SpoolAssignmentController::with_options(
        scanned.spool_id,
        Arc::new(api),
        Arc::new(TerminalNavigator::new(server_url)),
        ControllerOptions {
            redirect_delay: settings.redirect_delay(),
        },
    );
    let color = !args.no_color;

    println!("{}", render_state(&controller.snapshot().await, color));
    if controller.init().await == Step::Error {
        let state = controller.snapshot().await;
        bail!(state.error.unwrap_or_default());
    }

    let watcher = spawn_progress_watcher(Arc::clone(&controller), color);
    let outcome = match args.printer {
        Some(printer_id) => assign_to(&controller, &PrinterId::new(printer_id)).await,
        None if args.yes => confirm_preselected(&controller).await,
        None => prompt_until_assigned(&controller, color).await,
    };
    watcher.abort();
    outcome?;

    println!("{}", render_state(&controller.snapshot().await, color));
    controller.wait_for_redirect().await;
    Ok(())
}

/// Prints the busy view while the assignment request is in flight.
fn spawn_progress_watcher(
    controller: Arc<SpoolAssignmentController>,
    color: bool,
) -> tokio::task::JoinHandle<()> {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        while next_confirming(&mut events).await {
            println!("{}", render_state(&controller.snapshot().await, color));
        }
    })
}

async fn assign_to(controller: &SpoolAssignmentController, printer_id: &PrinterId) -> Result<()> {
    let state = controller.snapshot().await;
    let Some(printer) = state.printers.iter().find(|p| &p.id == printer_id) else {
        bail!("unknown printer '{printer_id}'");
    };
    if !printer.is_selectable() {
        bail!("{} is busy printing", printer_label(printer));
    }
    controller.select_printer(printer.clone()).await;
    confirm_once(controller).await
}

async fn confirm_preselected(controller: &SpoolAssignmentController) -> Result<()> {
    if controller.snapshot().await.selected_printer.is_none() {
        bail!("no printer preselected; pass --printer or pick one interactively");
    }
    confirm_once(controller).await
}

async fn confirm_once(controller: &SpoolAssignmentController) -> Result<()> {
    if controller.confirm_assignment().await == Step::Success {
        return Ok(());
    }
    let error = controller.snapshot().await.error.unwrap_or_default();
    bail!(error)
}

async fn prompt_until_assigned(controller: &SpoolAssignmentController, color: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let state = controller.snapshot().await;
        print!("{}> ", render_state(&state, color));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            bail!("input closed before a printer was confirmed");
        };

        match parse_command(&line) {
            PickerCommand::Select(number) => match state.printers.get(number - 1) {
                Some(printer) if printer.is_selectable() => {
                    controller.select_printer(printer.clone()).await;
                }
                Some(printer) => println!("{} is busy printing", printer_label(printer)),
                None => println!("No printer #{number}"),
            },
            PickerCommand::Confirm => {
                if controller.confirm_assignment().await == Step::Success {
                    return Ok(());
                }
            }
            PickerCommand::Cancel => bail!("cancelled"),
            PickerCommand::Unknown(input) => {
                warn!(%input, "unrecognized picker command");
                println!("Type a printer number, 'c' to confirm or 'q' to cancel");
            }
        }
    }
}
