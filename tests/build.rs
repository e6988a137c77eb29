use boletin::build::{build_newsletter, generate, Error};
use boletin::config::Config;
use boletin::loader;
use boletin::news::{Content, Grouping};
use boletin::render::{render_item, render_section};
use boletin::template::MARKER;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn fixture(dir: &Path, grouping: Grouping) -> Result<Config> {
    let config = Config {
        data_directory: dir.join("data"),
        template: dir.join("template.html"),
        output: dir.join("sample_bulletin.html"),
        grouping,
        escape_html: false,
    };
    fs::create_dir(&config.data_directory)?;
    fs::write(&config.template, format!("<html>{}</html>", MARKER))?;
    Ok(config)
}

fn write_record(dir: &Path, file_name: &str, json: &str) -> Result<()> {
    fs::write(dir.join(file_name), json)?;
    Ok(())
}

#[test]
fn test_build_flat() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = fixture(dir.path(), Grouping::Flat)?;
    write_record(
        &config.data_directory,
        "one.json",
        r#"{"images":["a.jpg"],"title":"T1","summary":"S1","actual_link":"L1"}"#,
    )?;
    write_record(
        &config.data_directory,
        "two.json",
        r#"{"images":["b.jpg"],"title":"T2","summary":"S2","actual_link":"L2"}"#,
    )?;

    build_newsletter(&config)?;
    let output = fs::read_to_string(&config.output)?;

    // Directory-listing order is platform-dependent, so build the expected
    // document from whatever order the loader produced.
    let records = loader::load_records(&config.data_directory)?;
    assert_eq!(2, records.len());
    let mut wanted = String::from("<html>");
    for record in &records {
        wanted.push_str(&render_item(record, false)?);
    }
    wanted.push_str("</html>");

    assert_eq!(wanted, output);
    assert!(!output.contains(MARKER));
    for needle in &["a.jpg", "T1", "S1", "L1", "b.jpg", "T2", "S2", "L2"] {
        assert!(output.contains(needle), "missing {}", needle);
    }
    Ok(())
}

#[test]
fn test_build_sectioned() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = fixture(dir.path(), Grouping::Sectioned)?;
    let tech = config.data_directory.join("Tech");
    let sports = config.data_directory.join("Sports");
    fs::create_dir(&tech)?;
    fs::create_dir(&sports)?;
    write_record(
        &tech,
        "chips.json",
        r#"{"images":["chip.jpg"],"title":"Chips","summary":"Smaller","actual_link":"https://example.org/chips"}"#,
    )?;
    write_record(
        &sports,
        "goal.json",
        r#"{"images":["goal.jpg"],"title":"Goal","summary":"Late winner","actual_link":"https://example.org/goal"}"#,
    )?;
    write_record(
        &config.data_directory,
        "stray.json",
        r#"{"images":["stray.jpg"],"title":"Stray","summary":"S","actual_link":"L"}"#,
    )?;

    build_newsletter(&config)?;
    let output = fs::read_to_string(&config.output)?;

    let sections = match loader::load(&config.data_directory, Grouping::Sectioned)? {
        Content::Sectioned(sections) => sections,
        other => panic!("wanted sections, got {:?}", other),
    };
    let mut wanted = String::from("<html>");
    for section in &sections {
        wanted.push_str(&render_section(section, false)?);
    }
    wanted.push_str("</html>");
    assert_eq!(wanted, output);

    for section in &sections {
        let heading = format!("<h2 class='news-title-center'>{}</h2>", section.name);
        let start = output.find(&heading).unwrap() + heading.len();
        let end = output[start..]
            .find("<h2")
            .map(|i| start + i)
            .unwrap_or(output.len());
        let body = &output[start..end];
        let (own, other) = match section.name.as_str() {
            "Tech" => ("Chips", "Goal"),
            _ => ("Goal", "Chips"),
        };
        assert!(body.contains(own));
        assert!(!body.contains(other));
    }
    assert!(!output.contains("Stray"));
    Ok(())
}

#[test]
fn test_template_without_marker_passes_through() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = fixture(dir.path(), Grouping::Flat)?;
    fs::write(&config.template, "<html><body>static</body></html>")?;
    write_record(
        &config.data_directory,
        "one.json",
        r#"{"images":["a.jpg"],"title":"T1","summary":"S1","actual_link":"L1"}"#,
    )?;
    assert_eq!("<html><body>static</body></html>", generate(&config)?);
    Ok(())
}

#[test]
fn test_missing_link_fails_before_writing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = fixture(dir.path(), Grouping::Flat)?;
    write_record(
        &config.data_directory,
        "one.json",
        r#"{"images":["a.jpg"],"title":"T1","summary":"S1","actual_link":"L1"}"#,
    )?;
    write_record(
        &config.data_directory,
        "broken.json",
        r#"{"images":["b.jpg"],"title":"T2","summary":"S2"}"#,
    )?;
    match build_newsletter(&config) {
        Err(Error::Load(err)) => assert!(err.to_string().contains("broken.json")),
        other => panic!("wanted load error, got {:?}", other),
    }
    assert!(!config.output.exists());
    Ok(())
}

#[test]
fn test_missing_data_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = fixture(dir.path(), Grouping::Flat)?;
    fs::remove_dir(&config.data_directory)?;
    assert!(matches!(build_newsletter(&config), Err(Error::Load(_))));
    assert!(!config.output.exists());
    Ok(())
}

#[test]
fn test_build_escaped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = fixture(dir.path(), Grouping::Flat)?;
    config.escape_html = true;
    write_record(
        &config.data_directory,
        "one.json",
        r#"{"images":["a.jpg"],"title":"<i>Hola</i>","summary":"S","actual_link":"L"}"#,
    )?;
    build_newsletter(&config)?;
    let output = fs::read_to_string(&config.output)?;
    assert!(output.contains("&lt;i&gt;Hola&lt;/i&gt;"));
    assert!(!output.contains("<i>Hola</i>"));
    Ok(())
}
