//! The newsletter template: a plain HTML document with a [`MARKER`] comment
//! where the rendered news goes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The insertion point for rendered content. Every literal occurrence is
/// replaced; a template with no marker passes through unchanged.
pub const MARKER: &str = "<!-- Aquí se insertarán los artículos de noticias -->";

/// An HTML template loaded into memory.
#[derive(Clone, Debug)]
pub struct Template {
    contents: String,
}

impl Template {
    /// Wraps template text that is already in memory.
    pub fn new(contents: String) -> Template {
        Template { contents }
    }

    /// Reads a UTF-8 template file.
    pub fn from_file(path: &Path) -> Result<Template> {
        fs::read_to_string(path)
            .map(Template::new)
            .map_err(|err| Error::Read {
                path: path.to_owned(),
                err,
            })
    }

    /// The number of [`MARKER`]s in the template. Anything other than one is
    /// suspicious but not an error.
    pub fn marker_count(&self) -> usize {
        self.contents.matches(MARKER).count()
    }

    /// Returns the document with every [`MARKER`] replaced by `content`.
    pub fn compose(&self, content: &str) -> String {
        self.contents.replace(MARKER, content)
    }
}

/// Reads the template at `path` and composes it with `content`. See
/// [`Template::compose`].
pub fn compose_file(path: &Path, content: &str) -> Result<String> {
    Ok(Template::from_file(path)?.compose(content))
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when the template file can't be read.
    Read { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err: _ } => {
                write!(f, "Opening template file '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
        }
    }
}
