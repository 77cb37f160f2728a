//! Terminal rendering of session snapshots and notifications.

use colored::Colorize;
use drafter_core::notification::{Notification, Severity};
use drafter_core::session::{MessageRole, SessionSnapshot, TranscriptMessage, VariableStatus};

use crate::commands::COMMANDS;

pub fn print_banner() {
    println!("{}", "=== Drafter ===".bright_magenta().bold());
    println!(
        "{}",
        "Describe the document you want to draft, then answer the questions. '/help' lists commands, 'quit' exits."
            .bright_black()
    );
    println!();
}

pub fn print_help() {
    for spec in COMMANDS {
        let synopsis = if spec.args.is_empty() {
            spec.name.to_string()
        } else {
            format!("{} {}", spec.name, spec.args)
        };
        println!(
            "  {} {}",
            format!("{synopsis:<30}").bright_cyan(),
            spec.description.bright_black()
        );
    }
}

/// Prints transcript entries from `from` onwards and returns the new length.
pub fn print_messages(snapshot: &SessionSnapshot, from: usize) -> usize {
    for (index, message) in snapshot.transcript.iter().enumerate().skip(from) {
        print_message(index, message);
    }
    snapshot.transcript.len()
}

fn print_message(index: usize, message: &TranscriptMessage) {
    match message.role {
        MessageRole::System => {
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        MessageRole::User => {
            println!("{}", message_line(index, message).green());
        }
    }
}

/// User messages are numbered 1-based so they can be addressed by `/edit`.
pub fn message_line(index: usize, message: &TranscriptMessage) -> String {
    match message.role {
        MessageRole::System => message.text.clone(),
        MessageRole::User => format!("[{}] > {}", index + 1, message.text),
    }
}

pub fn print_progress(snapshot: &SessionSnapshot) {
    if snapshot.question_count > 0 && !snapshot.is_complete() {
        println!(
            "{}",
            format!(
                "Question {} of {}",
                snapshot.question_number(),
                snapshot.question_count
            )
            .bright_black()
        );
    }
}

pub fn print_title(snapshot: &SessionSnapshot) {
    if let Some(title) = &snapshot.title {
        println!("{}", format!("Drafting: {title}").bright_magenta().bold());
    }
}

pub fn print_vars(snapshot: &SessionSnapshot) {
    if snapshot.variables.is_empty() {
        println!("{}", "No template variables.".bright_black());
        return;
    }

    println!("{}", "VARIABLES".bold());
    for status in &snapshot.variables {
        let line = variable_line(status);
        if status.is_filled() {
            println!("  {}", line.green());
        } else {
            println!("  {}", line.red());
        }
    }
}

pub fn variable_line(status: &VariableStatus) -> String {
    if status.is_filled() {
        format!(
            "{:<24} Filled   {}",
            status.key,
            status.value.as_deref().unwrap_or_default()
        )
    } else {
        format!("{:<24} Missing  No value provided", status.key)
    }
}

pub fn print_result(output: &str) {
    println!();
    println!("{}", "----- Drafted document -----".bright_magenta().bold());
    println!("{output}");
    println!("{}", "----------------------------".bright_magenta().bold());
    println!(
        "{}",
        "Use /save <file> to keep it, /edit to change an answer, /new to start over.".bright_black()
    );
}

pub fn print_notification(notification: &Notification) {
    let label = format!("[{}]", notification.severity);
    let text = format!("{label} {}", notification.message);
    let colored = match notification.severity {
        Severity::Info => text.bright_blue(),
        Severity::Success => text.bright_green(),
        Severity::Error => text.bright_red(),
        Severity::Warning => text.bright_yellow(),
    };
    println!("{colored}");
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}
