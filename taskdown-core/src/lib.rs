pub mod error;
pub mod model;
mod service;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context;

pub use error::{ParseError, ParseResult};
use model::TaskCatalogue;
pub use service::parser::Parser;

/// Section name looked up when none is configured.
pub const DEFAULT_HEADING: &str = "Tasks";

/// Parse the tasks listed under the `heading` section of a Markdown document.
pub fn parse<R: BufRead>(reader: R, heading: &str) -> ParseResult<TaskCatalogue> {
    Parser::new(reader, heading)?.parse().map(TaskCatalogue::from)
}

pub fn load<P: AsRef<Path>>(path: P, heading: &str) -> anyhow::Result<TaskCatalogue> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let catalogue = parse(BufReader::new(file), heading)
        .with_context(|| format!("invalid task document {}", path.display()))?;
    log::info!("loaded {} tasks from {}", catalogue.len(), path.display());
    Ok(catalogue)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_from_reader() {
        const DOCUMENT: &str = include_str!("../testdata/example.md");

        let catalogue = parse(DOCUMENT.as_bytes(), DEFAULT_HEADING).unwrap();
        assert_eq!(
            vec!["list", "list2", "hello", "all-lists"],
            catalogue.get_all_task_names()
        );
    }

    #[test]
    fn test_load_reports_path() {
        let err = load("testdata/does-not-exist.md", DEFAULT_HEADING).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.md"));
    }

    #[test]
    fn test_load_missing_section() {
        let err = load(
            concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/notasks.md"),
            DEFAULT_HEADING,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::NoTasksHeading { .. })
        ));
    }
}
