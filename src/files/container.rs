//! File containers
//!
//! A file container is anything that can hold data files: a directory,
//! several directories, or nothing at all. Accessing a container usually
//! means touching the disk.

use std::fmt;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, trace};

use crate::errors::{
    Result, file_operation_error, glob_pattern_error, missing_data_directory_error,
};

/// Something that can be searched for data files
pub trait FileContainer: fmt::Debug {
    /// Every direct entry of the container (files and directories)
    fn iterate(&self) -> Result<Vec<PathBuf>>;

    /// Every direct entry whose name matches the shell-style `pattern`
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Short human readable description used in log lines
    fn describe(&self) -> String;
}

/// Compiles a shell-style pattern, keeping the pattern text in the error
pub(crate) fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| glob_pattern_error(e, pattern))
}

/// Container backed by a single directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Directory { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    fn entries(&self) -> Result<Vec<PathBuf>> {
        if !self.exists() {
            return Err(missing_data_directory_error(self.path.clone()));
        }

        let listing = read_dir(&self.path)
            .map_err(|e| file_operation_error(e, self.path.clone(), "list"))?
            .map(|entry| entry.map(|entry| entry.path()));
        let entries = collect_entries(&self.path, listing)?;

        trace!("Found {} entries in {}", entries.len(), self.path.display());

        Ok(entries)
    }
}

/// Sorted entries of a directory listing, failing on the first unreadable entry
fn collect_entries<I>(dir: &Path, listing: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut entries = listing
        .into_iter()
        .map(|entry| entry.map_err(|e| file_operation_error(e, dir.to_path_buf(), "list")))
        .collect::<Result<Vec<PathBuf>>>()?;
    entries.sort();
    Ok(entries)
}

impl FileContainer for Directory {
    fn iterate(&self) -> Result<Vec<PathBuf>> {
        self.entries()
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let compiled = compile_pattern(pattern)?;

        let matches: Vec<PathBuf> = self
            .entries()?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| compiled.matches(name))
            })
            .collect();

        debug!(
            "{} entries in {} match '{}'",
            matches.len(),
            self.path.display(),
            pattern
        );

        Ok(matches)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// A directory with no files
///
/// Stands in for a dataset whose directory was not given (or was allowed to
/// be missing), so downstream code never has to check for absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyDirectory;

impl FileContainer for EmptyDirectory {
    fn iterate(&self) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        // Still reject a broken pattern, whatever the container holds
        compile_pattern(pattern)?;
        Ok(Vec::new())
    }

    fn describe(&self) -> String {
        "<empty>".to_string()
    }
}

/// Unlabeled union of several directories, searched in the given order
#[derive(Debug, Clone, Default)]
pub struct MultiDirectory {
    directories: Vec<Directory>,
}

impl MultiDirectory {
    pub fn new(directories: Vec<Directory>) -> Self {
        MultiDirectory { directories }
    }

    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }
}

impl FileContainer for MultiDirectory {
    fn iterate(&self) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for directory in &self.directories {
            entries.extend(directory.iterate()?);
        }
        Ok(entries)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for directory in &self.directories {
            entries.extend(directory.glob(pattern)?);
        }
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.directories
            .iter()
            .map(Directory::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
