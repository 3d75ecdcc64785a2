//! Text rendering of the picker screen, one view per step.

use std::fmt::Write as _;

use client_core::{
    format_weight, printer_status_color, printer_status_emoji, AssignmentState, Step,
};
use shared::domain::{Printer, Spool};

fn ansi_code(color: &str) -> &'static str {
    match color {
        "green" => "32",
        "orange" => "33",
        "red" => "31",
        _ => "90",
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{text}\x1b[0m", ansi_code(color))
    } else {
        text.to_string()
    }
}

pub fn printer_label(printer: &Printer) -> &str {
    if printer.name.is_empty() {
        printer.id.as_str()
    } else {
        &printer.name
    }
}

pub fn render_state(state: &AssignmentState, color: bool) -> String {
    let mut out = String::new();
    match state.step {
        Step::Loading => out.push_str("Loading spool information...\n"),
        Step::Error => {
            let _ = writeln!(
                out,
                "Error: {}",
                state.error.as_deref().unwrap_or_default()
            );
        }
        Step::SelectPrinter => {
            if let Some(spool) = &state.spool {
                render_spool(&mut out, spool);
            }
            render_printers(&mut out, state, color);
        }
        Step::Confirming => {
            if let Some(spool) = &state.spool {
                render_spool(&mut out, spool);
            }
            let name = state
                .selected_printer
                .as_ref()
                .map(printer_label)
                .unwrap_or_default();
            let _ = writeln!(out, "Assigning spool to {name}...");
        }
        Step::Success => render_success(&mut out, state.selected_printer.as_ref()),
    }
    out
}

fn render_spool(out: &mut String, spool: &Spool) {
    let _ = writeln!(out, "{} ({})", spool.display_name(), spool.display_color());
    if let Some(vendor) = spool.vendor.as_deref().filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "  {vendor}");
    }
    let _ = writeln!(
        out,
        "  Total Weight: {}  Used: {}  Remaining: {}",
        format_weight(spool.weight),
        format_weight(spool.used),
        format_weight(spool.remaining)
    );
    out.push('\n');
}

fn render_printers(out: &mut String, state: &AssignmentState, color: bool) {
    out.push_str("Select Printer:\n");
    let selected_id = state.selected_printer.as_ref().map(|p| &p.id);

    for (index, printer) in state.printers.iter().enumerate() {
        let marker = if selected_id == Some(&printer.id) { ">" } else { " " };
        let status = paint(
            printer.status.as_str(),
            printer_status_color(&printer.status),
            color,
        );
        let busy = if printer.is_selectable() { "" } else { " (busy)" };
        let _ = writeln!(
            out,
            "{marker} {}. {} {} [{status}]{busy}",
            index + 1,
            printer_status_emoji(&printer.status),
            printer_label(printer)
        );
        if let Some(current) = &printer.current_spool {
            let _ = writeln!(out, "      Current: {}", current.name);
        }
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "{}", paint(error, "red", color));
    }
    out.push_str("[number] select  [c] confirm  [q] cancel\n");
}

fn render_success(out: &mut String, printer: Option<&Printer>) {
    out.push_str("Success!\n");
    let name = printer.map(printer_label).unwrap_or_default();
    let _ = writeln!(out, "Spool has been assigned to {name}");
    match printer.and_then(Printer::redirect_url) {
        Some(url) => {
            let _ = writeln!(out, "Redirecting to OctoPrint... ({url})");
        }
        None => out.push_str("Redirecting...\n"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCommand {
    Select(usize),
    Confirm,
    Cancel,
    Unknown(String),
}

pub fn parse_command(line: &str) -> PickerCommand {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "c" | "confirm" => PickerCommand::Confirm,
        "q" | "quit" | "cancel" => PickerCommand::Cancel,
        other => match other.parse::<usize>() {
            Ok(number) if number > 0 => PickerCommand::Select(number),
            _ => PickerCommand::Unknown(line.to_string()),
        },
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
