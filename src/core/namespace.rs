//! Output filename collision resolution.
//!
//! [`OutputNamespace`] owns the set of file names already taken in an output
//! directory. It is seeded from the directory contents once per run and every
//! resolved name is claimed immediately, so no two records of a run can ever
//! resolve to the same path.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

/// Extension of every output document.
pub const OUTPUT_EXTENSION: &str = "html";

/// Claimed file names within one output directory.
///
/// Access is `&mut`-exclusive; a concurrent driver would have to share it
/// behind a mutex rather than rely on filesystem existence checks.
#[derive(Debug, Clone)]
pub struct OutputNamespace {
    dir: PathBuf,
    claimed: HashSet<String>,
}

impl OutputNamespace {
    /// Creates an empty namespace for `dir` without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            claimed: HashSet::new(),
        }
    }

    /// Creates a namespace pre-seeded with the entries already in `dir`.
    ///
    /// A missing directory yields an empty namespace.
    pub fn scan(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let mut namespace = Self::new(dir);
        let entries = match fs::read_dir(&namespace.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(namespace),
            Err(e) => return Err(e),
        };

        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                namespace.claimed.insert(name.to_string());
            }
        }
        debug!(
            dir = %namespace.dir.display(),
            existing = namespace.claimed.len(),
            "seeded output namespace"
        );
        Ok(namespace)
    }

    /// Marks a file name as taken.
    pub fn claim(&mut self, file_name: impl Into<String>) {
        self.claimed.insert(file_name.into());
    }

    /// Returns `true` if the file name is already taken.
    pub fn is_claimed(&self, file_name: &str) -> bool {
        self.claimed.contains(file_name)
    }

    /// Returns the number of claimed names.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Returns `true` if no name is claimed.
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// A name is taken once claimed or once something exists at its path,
    /// even if it appeared after the directory was scanned.
    fn is_taken(&self, file_name: &str) -> bool {
        self.claimed.contains(file_name) || fs::symlink_metadata(self.dir.join(file_name)).is_ok()
    }

    /// Resolves `stem` to a free path and claims it.
    ///
    /// Tries `stem.html`, then `stem_2.html`, `stem_3.html`, ...
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatsplit::core::namespace::OutputNamespace;
    /// use std::path::Path;
    ///
    /// let mut ns = OutputNamespace::new("out");
    /// assert_eq!(ns.resolve("Q&A"), Path::new("out/Q&A.html"));
    /// assert_eq!(ns.resolve("Q&A"), Path::new("out/Q&A_2.html"));
    /// assert_eq!(ns.resolve("Q&A"), Path::new("out/Q&A_3.html"));
    /// ```
    pub fn resolve(&mut self, stem: &str) -> PathBuf {
        let mut file_name = format!("{stem}.{OUTPUT_EXTENSION}");
        let mut counter = 1;
        while self.is_taken(&file_name) {
            counter += 1;
            file_name = format!("{stem}_{counter}.{OUTPUT_EXTENSION}");
        }

        if counter > 1 {
            debug!(stem, resolved = %file_name, "filename collision resolved");
        }

        let path = self.dir.join(&file_name);
        self.claimed.insert(file_name);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_resolution_is_plain_stem() {
        let mut ns = OutputNamespace::new("out");
        assert_eq!(ns.resolve("Hello_World"), PathBuf::from("out/Hello_World.html"));
        assert!(ns.is_claimed("Hello_World.html"));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_collisions_count_from_two() {
        let mut ns = OutputNamespace::new("out");
        let paths: Vec<PathBuf> = (0..4).map(|_| ns.resolve("chat")).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/chat.html"),
                PathBuf::from("out/chat_2.html"),
                PathBuf::from("out/chat_3.html"),
                PathBuf::from("out/chat_4.html"),
            ]
        );
    }

    #[test]
    fn test_suffixed_name_already_taken_is_skipped() {
        let mut ns = OutputNamespace::new("out");
        ns.claim("a.html");
        ns.claim("a_2.html");
        assert_eq!(ns.resolve("a"), PathBuf::from("out/a_3.html"));
    }

    #[test]
    fn test_stem_that_looks_suffixed_does_not_clash() {
        let mut ns = OutputNamespace::new("out");
        assert_eq!(ns.resolve("a_2"), PathBuf::from("out/a_2.html"));
        assert_eq!(ns.resolve("a"), PathBuf::from("out/a.html"));
        assert_eq!(ns.resolve("a"), PathBuf::from("out/a_3.html"));
    }

    #[test]
    fn test_scan_seeds_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Hello.html"), "old").unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        let mut ns = OutputNamespace::scan(dir.path()).unwrap();
        assert_eq!(ns.len(), 2);
        assert_eq!(ns.resolve("Hello"), dir.path().join("Hello_2.html"));
        assert_eq!(ns.resolve("notes"), dir.path().join("notes.html"));
    }

    #[test]
    fn test_file_created_after_scan_is_taken() {
        let dir = tempdir().unwrap();
        let mut ns = OutputNamespace::scan(dir.path()).unwrap();
        fs::write(dir.path().join("Late.html"), "external").unwrap();

        assert_eq!(ns.resolve("Late"), dir.path().join("Late_2.html"));
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let ns = OutputNamespace::scan(dir.path().join("does/not/exist")).unwrap();
        assert!(ns.is_empty());
    }
}
