//! The library code for the `boletin` newsletter generator. The architecture
//! can be generally broken down into three distinct steps:
//!
//! 1. Loading news records from JSON files on disk ([`crate::loader`])
//! 2. Rendering the records into HTML fragments ([`crate::render`])
//! 3. Inserting the fragments into a template and writing the result to disk
//!    ([`crate::template`] and [`crate::build`])
//!
//! Records are either flat (every `.json` file in one folder) or grouped into
//! sections (one subfolder per section). Both shapes flow through the same
//! [`crate::news::Content`] type, selected by a [`crate::news::Grouping`].
//!
//! The template is plain HTML containing the [`crate::template::MARKER`]
//! comment. There is no templating engine: every literal occurrence of the
//! marker is replaced by the rendered content and that's it.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod loader;
pub mod news;
pub mod render;
pub mod template;
