//! Line-oriented terminal front-end over the session service.
//!
//! # Responsibility
//! - Parse one command per input line.
//! - Drive draft navigation, editing, and lifecycle operations.
//! - Render prompts, progress, and saved sessions as plain text.
//!
//! # Invariants
//! - Invalid input is reported and never ends the loop.
//! - Only `quit` (or end of input) stops the loop.

use anyhow::Result;
use ghostscramble_core::{
    catalog, catalog_size, prompt_index, Clock, Cursor, DraftBuffer, ExportSink, SessionId,
    SessionRecord, SessionService, SessionServiceError, SnapshotStorage, UserPrompter,
    REFLECTION_PLACEHOLDER,
};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  prompts            list prompts with completion marks
  goto <n|key>       open prompt by number (1-13) or key
  next | prev        step through prompts
  shuffle            open a random prompt
  reflect            open the reflection
  write <text>       replace the text of the open prompt or reflection
  title <text>       set the session title
  show               show the open prompt or reflection
  progress           show completed prompt count
  save               save the session
  sessions           list saved sessions
  load <id>          continue a saved session as a copy
  delete <id>        delete a saved session
  new                start a new session
  export             write the session to a text file
  quit               leave";

/// Source of raw input lines.
///
/// Stdin is read one locked line at a time so confirmations can read too.
pub trait LineReader {
    /// Appends bytes up to and including the next `\n`; `Ok(0)` at end of input.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

impl LineReader for io::Stdin {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.lock().read_until(b'\n', buf)
    }
}

impl<T: AsRef<[u8]>> LineReader for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.read_until(b'\n', buf)
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Prompts,
    Goto(String),
    Next,
    Previous,
    Shuffle,
    Reflect,
    Write(String),
    Title(String),
    Show,
    Progress,
    Save,
    Sessions,
    Load(SessionId),
    Delete(SessionId),
    New,
    Export,
    Quit,
}

/// Parses one input line; `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };
    let argument = rest.trim();

    let command = match name.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "prompts" | "ls" => Command::Prompts,
        "goto" | "g" => {
            if argument.is_empty() {
                return Err("usage: goto <n|key>".to_string());
            }
            Command::Goto(argument.to_string())
        }
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Previous,
        "shuffle" => Command::Shuffle,
        "reflect" => Command::Reflect,
        // Text after the first separator is kept verbatim.
        "write" | "w" => Command::Write(rest.to_string()),
        "title" => Command::Title(rest.to_string()),
        "show" => Command::Show,
        "progress" => Command::Progress,
        "save" => Command::Save,
        "sessions" => Command::Sessions,
        "load" => Command::Load(parse_id(argument)?),
        "delete" | "rm" => Command::Delete(parse_id(argument)?),
        "new" => Command::New,
        "export" => Command::Export,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn parse_id(argument: &str) -> Result<SessionId, String> {
    argument
        .parse()
        .map_err(|_| format!("expected a session id, got `{argument}`"))
}

/// Resolves a 1-based prompt number or a prompt key to a catalog index.
pub fn resolve_prompt(target: &str) -> Option<usize> {
    if let Ok(number) = target.parse::<usize>() {
        return (1..=catalog_size()).contains(&number).then(|| number - 1);
    }
    prompt_index(target)
        .or_else(|_| prompt_index(&target.to_ascii_uppercase()))
        .ok()
}

pub fn render_prompt_list(draft: &DraftBuffer) -> String {
    let mut lines = Vec::with_capacity(catalog_size() + 1);
    for (index, prompt) in catalog().iter().enumerate() {
        let active = if draft.cursor() == Cursor::Prompt(index) {
            '>'
        } else {
            ' '
        };
        let done = if draft.is_prompt_completed(prompt.key) {
            '*'
        } else {
            ' '
        };
        lines.push(format!(
            "{active}{done} {:>2}. {} - {} ({})",
            index + 1,
            prompt.key,
            prompt.label_primary,
            prompt.label_secondary
        ));
    }
    let active = if draft.is_reflection_view() { '>' } else { ' ' };
    lines.push(format!("{active}      Reflection"));
    lines.join("\n")
}

pub fn render_current(draft: &DraftBuffer) -> String {
    match draft.current_prompt() {
        Some(prompt) => {
            let body = match draft.response(prompt.key) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => format!("({})", prompt.placeholder),
            };
            format!(
                "{} - {}\n{}\n\n{}",
                prompt.key, prompt.label_primary, prompt.label_secondary, body
            )
        }
        None => {
            let body = if draft.reflection().is_empty() {
                format!("({REFLECTION_PLACEHOLDER})")
            } else {
                draft.reflection().to_string()
            };
            format!("Reflection\nSynthesize your thoughts and feelings\n\n{body}")
        }
    }
}

pub fn render_progress(draft: &DraftBuffer) -> String {
    format!(
        "{} of {} prompts completed ({:.0}%)",
        draft.completed_count(),
        catalog_size(),
        draft.progress_fraction() * 100.0
    )
}

pub fn render_sessions(records: &[SessionRecord]) -> String {
    if records.is_empty() {
        return "no saved sessions".to_string();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}  {}  {}  {} words",
                record.id, record.date, record.title, record.word_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run<S, P, C>(
    service: &mut SessionService<S, P, C>,
    sink: &mut dyn ExportSink,
    input: &mut impl LineReader,
    out: &mut impl Write,
) -> Result<()>
where
    S: SnapshotStorage,
    P: UserPrompter,
    C: Clock,
{
    writeln!(out, "GHOST SCRAMBLE - type `help` for commands")?;
    writeln!(out, "{}", render_current(service.draft()))?;

    let mut raw = Vec::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        raw.clear();
        if input.read_line(&mut raw)? == 0 {
            return Ok(());
        }
        let Ok(line) = std::str::from_utf8(&raw) else {
            writeln!(out, "input is not valid UTF-8; line ignored")?;
            continue;
        };

        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        if command == Command::Quit {
            return Ok(());
        }

        if let Err(err) = execute(command, service, sink, out) {
            match err.downcast_ref::<SessionServiceError>() {
                // Already surfaced through the alert primitive.
                Some(SessionServiceError::MissingTitle) => {}
                _ => writeln!(out, "error: {err}")?,
            }
        }
    }
}

fn execute<S, P, C>(
    command: Command,
    service: &mut SessionService<S, P, C>,
    sink: &mut dyn ExportSink,
    out: &mut impl Write,
) -> Result<()>
where
    S: SnapshotStorage,
    P: UserPrompter,
    C: Clock,
{
    match command {
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Prompts => writeln!(out, "{}", render_prompt_list(service.draft()))?,
        Command::Goto(target) => {
            let index = resolve_prompt(&target)
                .ok_or_else(|| anyhow::anyhow!("no prompt `{target}`"))?;
            service
                .draft_mut()
                .select_prompt(index)
                .map_err(SessionServiceError::from)?;
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Next => {
            service.draft_mut().next_prompt();
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Previous => {
            service.draft_mut().previous_prompt();
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Shuffle => {
            service.draft_mut().shuffle();
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Reflect => {
            service.draft_mut().select_reflection();
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Write(text) => {
            service.draft_mut().set_current_response(text);
            writeln!(out, "{}", render_progress(service.draft()))?;
        }
        Command::Title(text) => service.draft_mut().set_title(text),
        Command::Show => writeln!(out, "{}", render_current(service.draft()))?,
        Command::Progress => writeln!(out, "{}", render_progress(service.draft()))?,
        Command::Save => {
            let id = service.save()?;
            writeln!(out, "saved as {id}")?;
        }
        Command::Sessions => writeln!(out, "{}", render_sessions(service.sessions()))?,
        Command::Load(id) => {
            service.load_for_editing(id)?;
            writeln!(out, "editing \"{}\"", service.draft().title())?;
            writeln!(out, "{}", render_current(service.draft()))?;
        }
        Command::Delete(id) => {
            if service.delete(id)? {
                writeln!(out, "deleted {id}")?;
            }
        }
        Command::New => {
            if service.start_new() {
                writeln!(out, "{}", render_current(service.draft()))?;
            }
        }
        Command::Export => match service.export_to(sink)? {
            Some(path) => writeln!(out, "exported to {}", path.display())?,
            None => writeln!(out, "exported")?,
        },
        Command::Quit => {}
    }
    Ok(())
}
