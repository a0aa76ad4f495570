use std::str::FromStr;

use serde::Serialize;

/// How often a task may run within a single invocation.
#[derive(Serialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum RequiredBehaviour {
    #[default]
    Default,
    Always,
    Once,
}

impl FromStr for RequiredBehaviour {
    type Err = String;

    /// Only the values a document may spell out are accepted, `default` is implicit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "once" => Ok(Self::Once),
            _ => Err(s.to_owned()),
        }
    }
}

#[derive(Serialize, Default, Clone, PartialEq, Debug)]
pub struct Task {
    pub name: String,
    pub description: Vec<String>,
    /// Body of the task's code block, every line newline-terminated.
    pub script: String,
    pub dir: Option<String>,
    pub required_behaviour: RequiredBehaviour,
    pub depends_on: Vec<String>,
    pub inputs: Vec<String>,
    /// Raw `KEY=value` pairs.
    pub env: Vec<String>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A task without a script only exists to pull in its dependencies.
    #[must_use]
    pub fn is_commandless(&self) -> bool {
        self.script.is_empty()
    }

    /// Check whether the task has anything to do once selected.
    #[must_use]
    pub fn is_runnable(&self) -> bool {
        !self.script.is_empty() || !self.depends_on.is_empty()
    }
}
