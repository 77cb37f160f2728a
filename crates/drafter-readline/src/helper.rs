use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::{COMMANDS, CommandSpec, find_command};

/// Rustyline helper for the drafter prompt.
///
/// Completes command names, and file paths after `/upload` and `/save`.
/// Hints the rest of a command name while it is typed and the argument
/// synopsis once it is followed by a space.
pub struct CliHelper {
    files: FilenameCompleter,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            files: FilenameCompleter::new(),
        }
    }
}

/// Splits `line` into the command word and whatever follows it.
fn split_command(line: &str) -> Option<(&str, Option<&str>)> {
    if !line.starts_with('/') {
        return None;
    }
    Some(match line.split_once(' ') {
        Some((name, rest)) => (name, Some(rest)),
        None => (line, None),
    })
}

fn matching(prefix: &str) -> impl Iterator<Item = &'static CommandSpec> + '_ {
    COMMANDS.iter().filter(move |c| c.name.starts_with(prefix))
}

fn command_hint(line: &str) -> Option<String> {
    match split_command(line)? {
        (prefix, None) => matching(prefix)
            .find(|c| c.name.len() > prefix.len())
            .map(|c| c.name[prefix.len()..].to_string()),
        (name, Some("")) => find_command(name)
            .filter(|c| !c.args.is_empty())
            .map(|c| c.args.to_string()),
        (_, Some(_)) => None,
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match split_command(&line[..pos]) {
            Some((prefix, None)) => {
                let candidates = matching(prefix)
                    .map(|c| Pair {
                        display: c.name.to_string(),
                        replacement: c.name.to_string(),
                    })
                    .collect();
                Ok((0, candidates))
            }
            Some((name, Some(_))) if find_command(name).is_some_and(|c| c.takes_path) => {
                self.files.complete(line, pos, ctx)
            }
            _ => Ok((0, vec![])),
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match split_command(line) {
            Some((name, rest)) if find_command(name).is_some() => {
                let rest = rest.map(|r| format!(" {r}")).unwrap_or_default();
                Owned(format!("{}{rest}", name.bright_cyan()))
            }
            Some(_) => Owned(line.yellow().to_string()),
            None => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        command_hint(line)
    }
}

impl Validator for CliHelper {}
