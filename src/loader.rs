//! Loads [`NewsRecord`]s from the file system into memory, either flat from a
//! single folder or grouped into [`Section`]s from its subfolders. See
//! [`load`] for the entry point.

use std::{
    fmt,
    fs::{self, read_dir},
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::news::{Content, Grouping, NewsRecord, Section};

const JSON_EXTENSION: &str = ".json";

/// Loads the contents of `dir` according to `grouping`. See [`load_records`]
/// and [`load_sections`] for the layout each grouping expects.
pub fn load(dir: &Path, grouping: Grouping) -> Result<Content> {
    let content = match grouping {
        Grouping::Flat => Content::Flat(load_records(dir)?),
        Grouping::Sectioned => Content::Sectioned(load_sections(dir)?),
    };
    match &content {
        Content::Flat(records) => {
            info!(count = records.len(), dir = %dir.display(), "loaded news records")
        }
        Content::Sectioned(sections) => info!(
            sections = sections.len(),
            count = content.record_count(),
            dir = %dir.display(),
            "loaded news sections"
        ),
    }
    Ok(content)
}

/// Searches `dir` for news files (file name ends in `.json`) and parses each
/// one into a [`NewsRecord`]. Records are returned in directory-listing
/// order, which is platform-dependent; they are *not* sorted. Entries that
/// don't end in `.json` are ignored.
///
/// The first unreadable or malformed file aborts the load. For example, this
/// is a valid news file:
///
/// ```json
/// {
///     "images": ["https://example.org/a.jpg"],
///     "title": "Hello, world!",
///     "summary": "Greetings.",
///     "actual_link": "https://example.org/hello"
/// }
/// ```
pub fn load_records(dir: &Path) -> Result<Vec<NewsRecord>> {
    let mut records = Vec::new();
    let entries = read_dir(dir).map_err(|err| Error::ReadDir {
        path: dir.to_owned(),
        err,
    })?;
    for result in entries {
        let entry = result.map_err(|err| Error::ReadDir {
            path: dir.to_owned(),
            err,
        })?;
        let os_file_name = entry.file_name();
        let file_name = os_file_name.to_string_lossy();
        if file_name.ends_with(JSON_EXTENSION) {
            records.push(load_record(&entry.path())?);
        }
    }
    Ok(records)
}

/// Treats every immediate subdirectory of `dir` as a [`Section`] named after
/// the subdirectory, and loads its records with [`load_records`]. Files
/// directly inside `dir` are ignored. Sections are returned in
/// directory-listing order.
pub fn load_sections(dir: &Path) -> Result<Vec<Section>> {
    let mut sections = Vec::new();
    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match result {
            Ok(entry) => entry,
            // A top-level entry that can't be followed (e.g. a dangling
            // symlink) isn't a section directory.
            Err(err) if err.depth() > 0 && err.path().is_some() => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::InvalidFileName(entry.path().to_owned()))?
            .to_owned();
        debug!(section = %name, "loading section");
        sections.push(Section {
            records: load_records(entry.path())?,
            name,
        });
    }
    Ok(sections)
}

/// Reads and parses a single news file.
fn load_record(path: &Path) -> Result<NewsRecord> {
    debug!(path = %path.display(), "loading news record");
    let contents = fs::read_to_string(path).map_err(|err| Error::Read {
        path: path.to_owned(),
        err,
    })?;
    serde_json::from_str(&contents).map_err(|err| Error::Deserialize {
        path: path.to_owned(),
        err,
    })
}

/// Represents the result of a load operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading news records. Every variant names the path
/// that caused it.
#[derive(Debug)]
pub enum Error {
    /// Returned when a data directory can't be listed.
    ReadDir { path: PathBuf, err: std::io::Error },

    /// Returned when a news file can't be read (including when it isn't
    /// valid UTF-8).
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when a news file isn't valid JSON or lacks a required key.
    Deserialize {
        path: PathBuf,
        err: serde_json::Error,
    },

    /// Returned for errors walking the section subdirectories.
    WalkDir(walkdir::Error),

    /// Returned when a section subdirectory's name isn't valid UTF-8.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ReadDir { path, err: _ } => {
                write!(f, "Listing directory '{}'", path.display())
            }
            Error::Read { path, err: _ } => {
                write!(f, "Reading news file '{}'", path.display())
            }
            Error::Deserialize { path, err: _ } => {
                write!(f, "Parsing news file '{}'", path.display())
            }
            Error::WalkDir(err) => err.fmt(f),
            Error::InvalidFileName(path) => {
                write!(f, "invalid section name: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`]. A
    /// [`walkdir::Error`] already displays its I/O error, so it reports no
    /// further source.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadDir { path: _, err } => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Deserialize { path: _, err } => Some(err),
            Error::WalkDir(_) => None,
            Error::InvalidFileName(_) => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while walking section directories.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
