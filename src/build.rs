//! Exports the [`build_newsletter`] function which stitches together the
//! high-level steps of building the newsletter: loading the news records
//! ([`crate::loader`]), rendering them ([`crate::render`]), inserting them into
//! the template ([`crate::template`]), and writing the result to disk.

use crate::config::Config;
use crate::loader::{self, Error as LoadError};
use crate::render::{self, Error as RenderError};
use crate::template::{Error as TemplateError, Template};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, warn};

/// Builds the newsletter described by a [`Config`]. Everything is loaded and
/// rendered in memory before the output file is touched, and the output is
/// replaced atomically, so a failed build never leaves a partial newsletter
/// behind.
pub fn build_newsletter(config: &Config) -> Result<()> {
    let html = generate(config)?;
    write_output(&config.output, &html)?;
    info!(output = %config.output.display(), bytes = html.len(), "wrote newsletter");
    Ok(())
}

/// Produces the finished newsletter document without writing it anywhere.
pub fn generate(config: &Config) -> Result<String> {
    let content = loader::load(&config.data_directory, config.grouping)?;
    let template = Template::from_file(&config.template)?;

    match template.marker_count() {
        1 => {}
        0 => warn!(
            template = %config.template.display(),
            "template has no insertion marker; output will equal the template"
        ),
        n => warn!(
            template = %config.template.display(),
            markers = n,
            "template has more than one insertion marker; all will be replaced"
        ),
    }

    let rendered = render::render_content(&content, config.escape_html)?;
    debug!(bytes = rendered.len(), "rendered news content");
    Ok(template.compose(&rendered))
}

/// Writes `contents` to a temporary file next to `path` and renames it over
/// `path`.
fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |err: std::io::Error| Error::Write {
        path: path.to_owned(),
        err,
    };
    let existing = fs::metadata(path).ok().map(|m| m.permissions());
    let mut file = new_temp_file(dir).map_err(write_err)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Creates the temporary output file. On Unix it is opened with mode 0666 so
/// that a brand new output ends up with the umask default, like a plain
/// `File::create` would.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a newsletter. Errors can be during loading,
/// rendering, reading the template, or writing the output.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading news records.
    Load(LoadError),

    /// Returned for errors rendering news records.
    Render(RenderError),

    /// Returned for errors reading the template.
    Template(TemplateError),

    /// Returned for I/O problems while writing the output file.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::Template(err) => err.fmt(f),
            Error::Write { path, err: _ } => {
                write!(f, "Writing output file '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`]. The wrapping variants
    /// display as their inner error, so they skip straight to its source.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(err) => std::error::Error::source(err),
            Error::Render(err) => std::error::Error::source(err),
            Error::Template(err) => std::error::Error::source(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<LoadError> for Error {
    /// Converts [`LoadError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: LoadError) -> Error {
        Error::Load(err)
    }
}

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}
