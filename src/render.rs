//! Renders [`NewsRecord`]s and [`Section`]s into the HTML fragments that get
//! inserted into the newsletter template.
//!
//! Field values are embedded verbatim by default, exactly as they appear in
//! the source JSON. With `escape` set, text fields go through
//! [`escape_html`] and URL fields through [`escape_href`] first.

use pulldown_cmark::escape::{escape_href, escape_html};
use std::fmt;
use std::io;

use crate::news::{Content, NewsRecord, Section};

/// Renders every record in `content`, in order. Flat content renders as the
/// concatenation of its item fragments; sectioned content renders as the
/// concatenation of its section fragments (see [`render_section`]).
pub fn render_content(content: &Content, escape: bool) -> Result<String> {
    let mut out = String::new();
    match content {
        Content::Flat(records) => {
            for record in records {
                push_item(&mut out, record, escape)?;
            }
        }
        Content::Sectioned(sections) => {
            for section in sections {
                push_section(&mut out, section, escape)?;
            }
        }
    }
    Ok(out)
}

/// Renders a single record into its fixed-shape fragment. Fails with
/// [`Error::MissingImage`] if the record has no images.
pub fn render_item(record: &NewsRecord, escape: bool) -> Result<String> {
    let mut out = String::new();
    push_item(&mut out, record, escape)?;
    Ok(out)
}

/// Renders a section heading followed by each of the section's item
/// fragments in order.
pub fn render_section(section: &Section, escape: bool) -> Result<String> {
    let mut out = String::new();
    push_section(&mut out, section, escape)?;
    Ok(out)
}

fn push_section(out: &mut String, section: &Section, escape: bool) -> Result<()> {
    out.push_str("<h2 class='news-title-center'>");
    push_text(out, &section.name, escape)?;
    out.push_str("</h2>");
    for record in &section.records {
        push_item(out, record, escape)?;
    }
    Ok(())
}

fn push_item(out: &mut String, record: &NewsRecord, escape: bool) -> Result<()> {
    let image = record.first_image().ok_or_else(|| Error::MissingImage {
        title: record.title.clone(),
    })?;

    out.push_str("\n        <div class=\"news-item\">\n            <img src=\"");
    push_href(out, image, escape)?;
    out.push_str(
        "\" class=\"news-image\">\n            <div class=\"news-content\">\n                <div class=\"news-title\">",
    );
    push_text(out, &record.title, escape)?;
    out.push_str("</div>\n                <div class=\"news-summary\">");
    push_text(out, &record.summary, escape)?;
    out.push_str("</div>\n                <a href=\"");
    push_href(out, &record.actual_link, escape)?;
    out.push_str(
        "\" class=\"news-link\">Leer más</a>\n            </div>\n        </div>\n        ",
    );
    Ok(())
}

fn push_text(out: &mut String, s: &str, escape: bool) -> io::Result<()> {
    if escape {
        escape_html(out, s)
    } else {
        out.push_str(s);
        Ok(())
    }
}

fn push_href(out: &mut String, s: &str, escape: bool) -> io::Result<()> {
    if escape {
        escape_href(out, s)
    } else {
        out.push_str(s);
        Ok(())
    }
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a fragment.
#[derive(Debug)]
pub enum Error {
    /// Returned when a record's `images` list is empty.
    MissingImage { title: String },

    /// Returned when escaping a field fails.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for the escaping functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingImage { title } => {
                write!(f, "news item '{}' has no images", title)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingImage { .. } => None,
            Error::Io(err) => std::error::Error::source(err),
        }
    }
}
