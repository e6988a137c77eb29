use boletin::build::build_newsletter;
use boletin::config::Config;
use boletin::news::Grouping;
use clap::{App, Arg, ArgMatches};
use std::path::{Path, PathBuf};
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

const SUCCESS_MESSAGE: &str = "Boletín generado con éxito.";

fn main() {
    let matches = App::new("boletin")
        .about("Generates a static HTML newsletter from a folder of JSON news items")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("Project file to load instead of searching for boletin.yaml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data")
                .long("data")
                .value_name("DIR")
                .help("Folder containing the .json news files [default: data]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("template")
                .long("template")
                .value_name("FILE")
                .help("HTML template containing the insertion marker [default: template.html]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FILE")
                .help("Where to write the newsletter [default: sample_bulletin.html]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sections")
                .long("sections")
                .help("Treat each subfolder of the data folder as a named section"),
        )
        .arg(
            Arg::with_name("escape")
                .long("escape")
                .help("HTML-escape news fields before inserting them"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increase log verbosity (-v for debug, -vv for trace)"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
    println!("{}", SUCCESS_MESSAGE);
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = configure(matches)?;
    build_newsletter(&config)?;
    Ok(())
}

/// Starts from the project file (or the defaults) and applies command-line
/// overrides on top.
fn configure(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_project_file(Path::new(path))?,
        None => Config::from_directory(&std::env::current_dir()?)?,
    };
    if let Some(data) = matches.value_of("data") {
        config.data_directory = PathBuf::from(data);
    }
    if let Some(template) = matches.value_of("template") {
        config.template = PathBuf::from(template);
    }
    if let Some(output) = matches.value_of("output") {
        config.output = PathBuf::from(output);
    }
    if matches.is_present("sections") {
        config.grouping = Grouping::Sectioned;
    }
    if matches.is_present("escape") {
        config.escape_html = true;
    }
    Ok(config)
}

/// Logs go to stderr so stdout only ever carries the success message.
/// `RUST_LOG` wins over `-v` when it is set.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boletin={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
