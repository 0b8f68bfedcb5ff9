//! Batch driver: runs an [`Extractor`] over one export file.
//!
//! The run is strictly sequential: read, split, parse, then for every
//! record derive a stem, resolve it against the output namespace, render
//! and write. Structural problems abort the run before anything is
//! written; a record that fails to render or write is reported and the
//! batch moves on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::namespace::OutputNamespace;
use crate::error::{ChatsplitError, Result};
use crate::extractor::{Extractor, create_extractor};
use crate::format::ExportFormat;
use crate::progress::{ProgressCallback, SplitEvent, console_narrator};

/// A record that could not be rendered or written.
#[derive(Debug)]
pub struct RecordFailure {
    /// 1-based position of the record in the export.
    pub position: usize,

    /// The error that occurred.
    pub error: ChatsplitError,
}

/// Outcome of an extraction run.
#[derive(Debug, Default)]
pub struct SplitReport {
    /// Number of records in the export.
    pub total: usize,

    /// Paths written, in record order.
    pub written: Vec<PathBuf>,

    /// Positions of records skipped for lack of a title.
    pub skipped: Vec<usize>,

    /// Records that failed.
    pub failures: Vec<RecordFailure>,
}

impl SplitReport {
    /// Returns `true` if no record failed.
    ///
    /// Skipped records do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of records handled without error (written or skipped).
    pub fn processed(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Splits one export file into per-conversation documents in `output_dir`.
///
/// # Errors
///
/// Returns a fatal error if the input is missing or unreadable, the export
/// structure is not recognized, the payload is malformed, or the output
/// directory cannot be created. Per-record failures are returned in the
/// [`SplitReport`] instead.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "templated")]
/// # fn main() -> chatsplit::Result<()> {
/// use chatsplit::core::processor::split_export;
/// use chatsplit::extractors::TemplatedExtractor;
/// use std::path::Path;
///
/// let report = split_export(
///     &TemplatedExtractor::new(),
///     Path::new("chat.html"),
///     Path::new("split_chats"),
///     None,
/// )?;
/// println!("{}/{} written", report.written.len(), report.total);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "templated"))]
/// # fn main() {}
/// ```
pub fn split_export(
    extractor: &dyn Extractor,
    input: &Path,
    output_dir: &Path,
    progress: Option<&ProgressCallback>,
) -> Result<SplitReport> {
    emit(progress, &SplitEvent::Started {
        format: extractor.format(),
        input,
        output_dir,
    });

    if !input.exists() {
        return Err(ChatsplitError::input_not_found(input));
    }

    emit(progress, &SplitEvent::Reading);
    let content = fs::read_to_string(input)?;
    debug!(input = %input.display(), bytes = content.len(), "export read");

    emit(progress, &SplitEvent::Parsing);
    let export = extractor.split(&content)?;
    let records = extractor.parse(&export.payload)?;
    debug!(extractor = extractor.name(), records = records.len(), "payload parsed");
    emit(progress, &SplitEvent::Parsed {
        records: records.len(),
    });

    fs::create_dir_all(output_dir)?;
    let mut namespace = OutputNamespace::scan(output_dir)?;

    let mut report = SplitReport {
        total: records.len(),
        ..SplitReport::default()
    };

    for (idx, record) in records.iter().enumerate() {
        let position = idx + 1;

        let Some(stem) = extractor.stem(record, position) else {
            debug!(position, "record has no title, skipping");
            report.skipped.push(position);
            emit(progress, &SplitEvent::Skipped { position });
            continue;
        };

        let path = namespace.resolve(&stem);
        let written = extractor
            .render(record, &export)
            .and_then(|doc| fs::write(&path, doc).map_err(|e| ChatsplitError::record_write(&path, e)));

        match written {
            Ok(()) => {
                emit(progress, &SplitEvent::Written {
                    position,
                    path: &path,
                });
                report.written.push(path);
            }
            Err(error) => {
                debug!(position, path = %path.display(), %error, "failed to write record");
                emit(progress, &SplitEvent::Failed {
                    position,
                    error: &error,
                });
                report.failures.push(RecordFailure { position, error });
            }
        }
    }

    emit(progress, &SplitEvent::Finished { report: &report });
    Ok(report)
}

fn emit(progress: Option<&ProgressCallback>, event: &SplitEvent<'_>) {
    if let Some(callback) = progress {
        callback(event);
    }
}

/// Runs a full extraction for `format`, narrating to the console.
///
/// Returns `true` when every record was handled without error. Fatal
/// errors are printed to stderr and yield `false`. `verbose` only controls
/// progress narration.
pub fn run_split(format: ExportFormat, input: &Path, output_dir: &Path, verbose: bool) -> bool {
    let extractor = create_extractor(format);
    let narrator = console_narrator(verbose);

    match split_export(extractor.as_ref(), input, output_dir, Some(&narrator)) {
        Ok(report) => report.is_success(),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            false
        }
    }
}

/// Splits a templated HTML export (ChatGPT `chat.html`) into one file per
/// conversation.
#[cfg(feature = "templated")]
pub fn split_templated_export(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    verbose: bool,
) -> bool {
    run_split(
        ExportFormat::Templated,
        input.as_ref(),
        output_dir.as_ref(),
        verbose,
    )
}

/// Splits a plain JSON export (Claude `conversations.json`) into one file
/// per conversation.
#[cfg(feature = "plain")]
pub fn split_plain_export(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    verbose: bool,
) -> bool {
    run_split(ExportFormat::Plain, input.as_ref(), output_dir.as_ref(), verbose)
}
