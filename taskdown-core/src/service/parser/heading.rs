use std::sync::LazyLock;

use regex::Regex;

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid heading regex")
});

/// An ATX heading, `## text`.
#[derive(PartialEq, Debug)]
pub(crate) struct Heading<'a> {
    pub level: usize,
    pub text: &'a str,
}

impl<'a> Heading<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let captures = HEADING_REGEX.captures(line)?;
        let level = captures.get(1)?.as_str().len();
        let text = captures.get(2).map_or("", |text| text.as_str().trim());
        Some(Self { level, text })
    }

    /// Section names compare case-insensitively, ignoring surrounding whitespace.
    pub fn is_named(&self, name: &str) -> bool {
        self.text.to_lowercase() == name.trim().to_lowercase()
    }
}
