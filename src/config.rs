//! Configuration for a newsletter build. A [`Config`] can be built from the
//! defaults, from a `boletin.yaml` project file, or both, and is then
//! adjusted by the command line in `main`.

use crate::news::Grouping;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "boletin.yaml";

const DEFAULT_DATA_DIRECTORY: &str = "data";
const DEFAULT_TEMPLATE: &str = "template.html";
const DEFAULT_OUTPUT: &str = "sample_bulletin.html";

/// The on-disk shape of `boletin.yaml`. Every key is optional.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct Project {
    data_directory: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    grouping: Option<Grouping>,
    escape_html: Option<bool>,
}

/// Everything a newsletter build needs to know: where the news comes from,
/// which template it goes into, and where the result is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The folder holding the `.json` news files (or the section subfolders).
    pub data_directory: PathBuf,

    /// The HTML template containing the insertion marker.
    pub template: PathBuf,

    /// Where the finished newsletter is written. Overwritten on every run.
    pub output: PathBuf,

    /// Whether the data directory holds records directly or one subfolder
    /// per section.
    pub grouping: Grouping,

    /// Whether to HTML-escape record fields before embedding them. Off by
    /// default, which embeds them verbatim.
    pub escape_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            grouping: Grouping::default(),
            escape_html: false,
        }
    }
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its ancestors.
    /// The first one found is loaded with [`Config::from_project_file`]; if
    /// there is none, the defaults are returned.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        match find_project_file(dir) {
            Some(path) => match Config::from_project_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            },
            None => Ok(Config::default()),
        }
    }

    /// Loads a project file. Relative paths, including the defaults for
    /// missing keys, resolve against the project file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                let defaults = Config::default();
                Ok(Config {
                    data_directory: project_root
                        .join(project.data_directory.unwrap_or(defaults.data_directory)),
                    template: project_root
                        .join(project.template.unwrap_or(defaults.template)),
                    output: project_root.join(project.output.unwrap_or(defaults.output)),
                    grouping: project.grouping.unwrap_or(defaults.grouping),
                    escape_html: project.escape_html.unwrap_or(defaults.escape_html),
                })
            }
        }
    }
}

fn find_project_file(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(PROJECT_FILE))
        .find(|path| path.is_file())
}

fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}
