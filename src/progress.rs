//! Progress reporting for extraction runs.
//!
//! The batch driver pushes a [`SplitEvent`] for every phase and every record
//! to an optional [`ProgressCallback`]. Front-ends decide how to present
//! them; [`console_narrator`] prints them to the terminal.
//!
//! # Example
//!
//! ```rust
//! use chatsplit::progress::{ProgressCallback, SplitEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let written = Arc::new(Mutex::new(0usize));
//! let counter = Arc::clone(&written);
//! let callback: ProgressCallback = Arc::new(move |event: &SplitEvent<'_>| {
//!     if let SplitEvent::Written { .. } = event {
//!         *counter.lock().unwrap() += 1;
//!     }
//! });
//!
//! callback(&SplitEvent::Written { position: 1, path: std::path::Path::new("out/a.html") });
//! assert_eq!(*written.lock().unwrap(), 1);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::core::processor::SplitReport;
use crate::error::ChatsplitError;
use crate::format::ExportFormat;

/// A step of an extraction run.
#[derive(Debug, Clone, Copy)]
pub enum SplitEvent<'a> {
    /// The run is starting.
    Started {
        format: ExportFormat,
        input: &'a Path,
        output_dir: &'a Path,
    },

    /// The export document is being read.
    Reading,

    /// The payload is being located and parsed.
    Parsing,

    /// The payload was parsed into `records` records.
    Parsed { records: usize },

    /// A record was written.
    Written { position: usize, path: &'a Path },

    /// A record was skipped because it has no title.
    Skipped { position: usize },

    /// A record could not be rendered or written.
    Failed {
        position: usize,
        error: &'a ChatsplitError,
    },

    /// All records were processed.
    Finished { report: &'a SplitReport },
}

/// Callback type for progress reporting.
pub type ProgressCallback = Arc<dyn Fn(&SplitEvent<'_>) + Send + Sync>;

/// Creates a callback that narrates a run on stdout.
///
/// Record failures are always reported on stderr; everything else is
/// printed only when `verbose` is set.
pub fn console_narrator(verbose: bool) -> ProgressCallback {
    Arc::new(move |event: &SplitEvent<'_>| match event {
        SplitEvent::Failed { position, error } => {
            eprintln!("❌ Record {}: {}", position, error);
        }
        _ if verbose => println!("{}", narration(event)),
        _ => {}
    })
}

/// Returns the narration text for an event.
pub fn narration(event: &SplitEvent<'_>) -> String {
    match event {
        SplitEvent::Started {
            format,
            input,
            output_dir,
        } => format!(
            "📖 Format:  {}\n📂 Input:   {}\n💾 Output:  {}",
            format,
            input.display(),
            output_dir.display()
        ),
        SplitEvent::Reading => "⏳ Reading export...".to_string(),
        SplitEvent::Parsing => "🔍 Locating conversation data...".to_string(),
        SplitEvent::Parsed { records } => {
            format!("   Found {} conversations\n✍️  Writing conversation files...", records)
        }
        SplitEvent::Written { path, .. } => format!("   -> {}", path.display()),
        SplitEvent::Skipped { position } => format!("   ⏭️  Skipping untitled conversation #{}", position),
        SplitEvent::Failed { position, error } => format!("   ❌ #{}: {}", position, error),
        SplitEvent::Finished { report } => {
            let status = if report.is_success() {
                "✅ Done!"
            } else {
                "⚠️  Finished with errors."
            };
            format!(
                "{} {}/{} conversations written ({} skipped, {} failed).",
                status,
                report.written.len(),
                report.total,
                report.skipped.len(),
                report.failures.len()
            )
        }
    }
}
