//! Plain-text export of drafts and saved sessions.
//!
//! # Responsibility
//! - Render a draft or stored session into a downloadable text document.
//! - Derive the suggested file name and hand the document to a sink.
//!
//! # Invariants
//! - Formatting is pure; only `ExportSink` implementations perform I/O.
//! - Prompt blocks follow catalog order, never response insertion order.
//! - Prompts without a non-empty response produce no block.

use crate::model::draft::DraftBuffer;
use crate::model::prompt::catalog;
use crate::model::session::SessionRecord;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// MIME type handed to the file delivery primitive.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

const UNTITLED: &str = "Untitled";
const FILE_NAME_FALLBACK: &str = "session";
const MAX_NAME_SUFFIX: u32 = 9_999;

static FILE_NAME_UNSAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("valid file name regex"));

/// A rendered export ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Error raised while delivering an export.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write export: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// "Save as downloadable file" primitive.
pub trait ExportSink {
    /// Delivers `document`; returns where it ended up, if meaningful.
    fn deliver(&mut self, document: &ExportDocument) -> Result<Option<PathBuf>, ExportError>;
}

/// Writes exports as files into one directory.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ExportSink for DirectoryExportSink {
    /// Writes a new file; an existing name gets a `-1`, `-2`, ... suffix.
    fn deliver(&mut self, document: &ExportDocument) -> Result<Option<PathBuf>, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let (mut file, path) = self.create_unique(&document.file_name)?;
        file.write_all(document.text.as_bytes())?;
        info!(
            "event=export_write module=export status=ok bytes={} path={}",
            document.text.len(),
            path.display()
        );
        Ok(Some(path))
    }
}

impl DirectoryExportSink {
    fn create_unique(&self, file_name: &str) -> io::Result<(File, PathBuf)> {
        let requested = Path::new(file_name);
        let stem = requested
            .file_stem()
            .map_or_else(|| file_name.into(), |stem| stem.to_string_lossy());
        let extension = requested.extension().map(|ext| ext.to_string_lossy());

        for suffix in 0..=MAX_NAME_SUFFIX {
            let candidate = match (suffix, &extension) {
                (0, _) => file_name.to_string(),
                (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
                (n, None) => format!("{stem}-{n}"),
            };
            let path = self.dir.join(candidate);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((file, path)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free export name for {file_name}"),
        ))
    }
}

/// Renders the current draft, stamped with `date`.
pub fn format_export(draft: &DraftBuffer, date: &str) -> String {
    render(draft.title(), date, draft.responses(), draft.reflection())
}

/// Renders a stored session with its saved date.
pub fn format_session_export(record: &SessionRecord) -> String {
    render(
        &record.title,
        &record.date,
        &record.responses,
        &record.reflection,
    )
}

/// Suggested file name: `ghost-scramble-<slug>.txt`.
///
/// The slug keeps ASCII alphanumerics, `-` and `_`; other runs collapse to `-`.
pub fn export_file_name(title: &str) -> String {
    let slug = FILE_NAME_UNSAFE_RE.replace_all(title.trim(), "-");
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() {
        FILE_NAME_FALLBACK
    } else {
        slug
    };
    format!("ghost-scramble-{slug}.txt")
}

/// Builds the full export document for a draft.
pub fn build_document(draft: &DraftBuffer, date: &str) -> ExportDocument {
    ExportDocument {
        file_name: export_file_name(draft.title()),
        mime_type: EXPORT_MIME_TYPE,
        text: format_export(draft, date),
    }
}

fn render(
    title: &str,
    date: &str,
    responses: &BTreeMap<String, String>,
    reflection: &str,
) -> String {
    let title = if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(out, "GHOST SCRAMBLE Session: {title}\nDate: {date}\n\n");

    for prompt in catalog() {
        let Some(text) = responses.get(prompt.key).filter(|text| !text.is_empty()) else {
            continue;
        };
        let _ = write!(
            out,
            "{} - {} ({}):\n{}\n\n",
            prompt.key, prompt.label_primary, prompt.label_secondary, text
        );
    }

    if !reflection.is_empty() {
        let _ = writeln!(out, "Reflection:\n{reflection}");
    }
    out
}
