//! Slash command parsing for the REPL.

use std::path::PathBuf;

/// A slash command as offered by completion, hints and `/help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Argument synopsis, empty when the command takes none.
    pub args: &'static str,
    pub description: &'static str,
    /// Whether the argument is a file path.
    pub takes_path: bool,
}

const fn command(
    name: &'static str,
    args: &'static str,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        args,
        description,
        takes_path: false,
    }
}

const fn path_command(
    name: &'static str,
    args: &'static str,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        args,
        description,
        takes_path: true,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    command("/vars", "", "show template variables and which are still missing"),
    command(
        "/edit",
        "<number> <new answer>",
        "rewrite your answer number n from /transcript",
    ),
    command(
        "/generate",
        "",
        "send the answers for drafting (after a failure or edits)",
    ),
    command("/new", "[query]", "start a new draft"),
    path_command(
        "/upload",
        "<file.pdf|file.docx>",
        "upload a reference document to create a reusable template",
    ),
    path_command("/save", "<file>", "write the drafted document to a file"),
    command("/transcript", "", "show the whole conversation"),
    command("/dismiss", "[number]", "dismiss one notification, or all of them"),
    command("/health", "", "check the drafting service"),
    command("/help", "", "list commands"),
];

pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

fn usage(name: &str) -> String {
    match find_command(name) {
        Some(spec) => format!("Usage: {} {}", spec.name, spec.args),
        None => format!("Unknown command: {name}"),
    }
}

/// A parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free text: a draft query before a session exists, an answer afterwards.
    Text(String),
    /// Show the variable panel.
    Vars,
    /// Rewrite a transcript entry (1-based index as displayed).
    Edit { number: usize, text: String },
    /// Send the current answers for generation.
    Generate,
    /// Start over with a new query.
    New(Option<String>),
    /// Upload a reference document.
    Upload(PathBuf),
    /// Write the generated document to a file.
    Save(PathBuf),
    /// Print the whole transcript.
    Transcript,
    /// Dismiss one visible notification (1-based) or all of them.
    Dismiss(Option<usize>),
    Health,
    Help,
    Quit,
    /// A slash command that could not be parsed, with a usage message.
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Self::Quit;
        }
        if !trimmed.starts_with('/') {
            return Self::Text(line.to_string());
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "/vars" => Self::Vars,
            "/generate" => Self::Generate,
            "/transcript" => Self::Transcript,
            "/health" => Self::Health,
            "/help" => Self::Help,
            "/new" => Self::New(non_empty(rest)),
            "/edit" => parse_edit(rest),
            "/upload" => match non_empty(rest) {
                Some(path) => Self::Upload(PathBuf::from(path)),
                None => Self::Invalid(usage("/upload")),
            },
            "/save" => match non_empty(rest) {
                Some(path) => Self::Save(PathBuf::from(path)),
                None => Self::Invalid(usage("/save")),
            },
            "/dismiss" => match non_empty(rest) {
                None => Self::Dismiss(None),
                Some(n) => match n.parse::<usize>() {
                    Ok(n) if n > 0 => Self::Dismiss(Some(n)),
                    _ => Self::Invalid(usage("/dismiss")),
                },
            },
            other => Self::Invalid(format!("Unknown command: {other}")),
        }
    }
}

fn parse_edit(rest: &str) -> ReplCommand {
    let Some((number, text)) = rest.split_once(char::is_whitespace) else {
        return ReplCommand::Invalid(usage("/edit"));
    };
    match number.parse::<usize>() {
        Ok(number) if number > 0 && !text.trim().is_empty() => ReplCommand::Edit {
            number,
            text: text.trim().to_string(),
        },
        _ => ReplCommand::Invalid(usage("/edit")),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
