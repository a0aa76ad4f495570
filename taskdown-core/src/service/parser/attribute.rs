use std::fmt;

use itertools::Itertools;
use log::trace;

use crate::{
    error::{ParseError, ParseResult},
    model::RequiredBehaviour,
};

use super::{Line, TaskBlock};

/// Characters used for emphasis or inline code around attribute keys and values.
const MARKUP: [char; 3] = ['*', '_', '`'];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Attribute {
    Environment,
    Requires,
    Inputs,
    Directory,
    Run,
}

/// Canonical name, shortest accepted abbreviation.
const ATTRIBUTES: [(&str, &str, Attribute); 5] = [
    ("environment", "env", Attribute::Environment),
    ("requires", "req", Attribute::Requires),
    ("inputs", "inputs", Attribute::Inputs),
    ("directory", "dir", Attribute::Directory),
    ("run", "run", Attribute::Run),
];

impl Attribute {
    /// Keys match by case-insensitive abbreviation: `req`, `Requ` and `REQUIRES`
    /// are all `requires`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = strip_markup(key).to_lowercase();
        ATTRIBUTES
            .iter()
            .find(|(name, prefix, _)| key.starts_with(*prefix) && name.starts_with(key.as_str()))
            .map(|(_, _, attribute)| *attribute)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Requires => "requires",
            Self::Inputs => "inputs",
            Self::Directory => "directory",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drop surrounding whitespace and emphasis markup, `` _*`value`*_ `` becomes `value`.
pub(crate) fn strip_markup(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || MARKUP.contains(&c))
}

/// Split a comma separated value into its non-empty, stripped items.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    strip_markup(value)
        .split(',')
        .map(strip_markup)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect_vec()
}

impl TaskBlock {
    /// Apply `line` to the task if it reads `<attribute>: <value>`.
    ///
    /// Returns `Ok(false)` when the line is not an attribute, the caller then
    /// treats it as description.
    pub(crate) fn parse_attribute(&mut self, line: &Line) -> ParseResult<bool> {
        let Some((key, value)) = line.text.split_once(':') else {
            return Ok(false);
        };
        let Some(attribute) = Attribute::from_key(key) else {
            return Ok(false);
        };

        let task = &mut self.task;
        match attribute {
            Attribute::Environment => task.env.extend(split_list(value)),
            Attribute::Requires => task.depends_on.extend(split_list(value)),
            Attribute::Inputs => task.inputs.extend(split_list(value)),
            Attribute::Directory => {
                let dir = strip_markup(value);
                if !dir.is_empty() {
                    if task.dir.is_some() {
                        return Err(ParseError::DuplicateAttribute {
                            task: task.name.clone(),
                            attribute: attribute.name(),
                            line: line.number,
                        });
                    }
                    task.dir = Some(dir.to_owned());
                }
            }
            Attribute::Run => {
                let run = strip_markup(value);
                if !run.is_empty() {
                    task.required_behaviour = run.parse::<RequiredBehaviour>().map_err(
                        |value| ParseError::InvalidRunValue {
                            task: task.name.clone(),
                            value,
                            line: line.number,
                        },
                    )?;
                }
            }
        }

        trace!("task `{}`: {attribute} = `{}`", task.name, value.trim());
        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;
    use crate::model::Task;

    fn block() -> TaskBlock {
        TaskBlock::new(Task::new("a task"))
    }

    fn line(text: &str) -> Line {
        Line {
            number: 1,
            text: text.to_owned(),
        }
    }

    fn parsed(input: &str) -> Task {
        let mut block = block();
        assert!(block.parse_attribute(&line(input)).unwrap(), "{input}");
        block.task
    }

    #[test]
    fn test_key_abbreviations() {
        assert_eq!(Some(Attribute::Environment), Attribute::from_key("Env"));
        assert_eq!(Some(Attribute::Environment), Attribute::from_key("EnvIronMent"));
        assert_eq!(Some(Attribute::Requires), Attribute::from_key("REQ"));
        assert_eq!(Some(Attribute::Requires), Attribute::from_key("requ"));
        assert_eq!(Some(Attribute::Inputs), Attribute::from_key("InpUts"));
        assert_eq!(Some(Attribute::Directory), Attribute::from_key("dIrECTORY"));
        assert_eq!(Some(Attribute::Run), Attribute::from_key(" run "));
        assert_eq!(Some(Attribute::Requires), Attribute::from_key("**Requires**"));
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(None, Attribute::from_key("r"));
        assert_eq!(None, Attribute::from_key("requirement"));
        assert_eq!(None, Attribute::from_key("input"));
        assert_eq!(None, Attribute::from_key("note"));
        assert_eq!(None, Attribute::from_key(""));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!("my:attribute", strip_markup("_*`my:attribute_*`"));
        assert_eq!("once", strip_markup(" _*`once`*_ "));
        assert_eq!("FOO_BAR", strip_markup("``FOO_BAR``"));
        assert_eq!("", strip_markup("```"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(vec!["list", "list2"], split_list(" list, list2"));
        assert_eq!(vec!["a", "b"], split_list("`a`, `b`,"));
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_environment() {
        assert_eq!(vec!["my attribute"], parsed("Env: my attribute").env);
        assert_eq!(vec!["my attribute"], parsed("EnvIronMent: my attribute").env);
        assert_eq!(vec!["my:attribute"], parsed("Env: my:attribute").env);
        assert_eq!(vec!["my:attribute"], parsed("Env: _*`my:attribute_*`").env);
        assert_eq!(vec!["somevar=val"], parsed("Env: `somevar=val`").env);
    }

    #[test]
    fn test_requires() {
        assert_eq!(vec!["my attribute"], parsed("req: my attribute").depends_on);
        assert_eq!(vec!["my attribute"], parsed("ReqUiRES: my attribute").depends_on);
        assert_eq!(vec!["my:attribute"], parsed("req: my:attribute").depends_on);
        assert_eq!(vec!["my:attribute"], parsed("req: _*`my:attribute_*`").depends_on);
        assert_eq!(vec!["list", "list2"], parsed("Requires: list, list2").depends_on);
    }

    #[test]
    fn test_inputs() {
        assert_eq!(vec!["my attribute"], parsed("Inputs: my attribute").inputs);
        assert_eq!(vec!["my attribute"], parsed("InpUts: my attribute").inputs);
        assert_eq!(vec!["my:attribute"], parsed("Inputs: my:attribute").inputs);
        assert_eq!(vec!["my:attribute"], parsed("Inputs: _*`my:attribute_*`").inputs);
        assert_eq!(vec!["FOO", "BAR"], parsed("Inputs:FOO,BAR").inputs);
    }

    #[test]
    fn test_directory() {
        let expected = Some("my attribute".to_owned());
        assert_eq!(expected, parsed("dir: my attribute").dir);
        assert_eq!(expected, parsed("dIrECTORY: my attribute").dir);
        assert_eq!(Some("my:attribute".to_owned()), parsed("dir: my:attribute").dir);
        assert_eq!(
            Some("my:attribute".to_owned()),
            parsed("dir: _*`my:attribute_*`").dir
        );
        assert_eq!(None, parsed("dir:").dir);
    }

    #[test]
    fn test_run() {
        assert_eq!(RequiredBehaviour::Always, parsed("run: always").required_behaviour);
        assert_eq!(RequiredBehaviour::Once, parsed("run: once").required_behaviour);
        assert_eq!(RequiredBehaviour::Once, parsed("Run: _*`once`*_").required_behaviour);
        assert_eq!(RequiredBehaviour::Default, parsed("run:").required_behaviour);
    }

    #[test]
    fn test_lists_accumulate() {
        let mut block = block();
        block.parse_attribute(&line("requires: a, b")).unwrap();
        block.parse_attribute(&line("req: c")).unwrap();
        block.parse_attribute(&line("env: A=1")).unwrap();
        block.parse_attribute(&line("environment: B=2")).unwrap();
        assert_eq!(vec!["a", "b", "c"], block.task.depends_on);
        assert_eq!(vec!["A=1", "B=2"], block.task.env);
    }

    #[test]
    fn test_not_attributes() {
        let mut block = block();
        for input in [
            "env _*`my:attribute_*`",
            "dir _*`my:attribute_*`",
            "req _*`my:attribute_*`",
            "Note: this is prose",
            "Lists files",
        ] {
            assert!(!block.parse_attribute(&line(input)).unwrap(), "{input}");
        }
        assert_eq!(Task::new("a task"), block.task);
    }

    #[test]
    fn test_directory_set_twice() {
        let mut block = block();
        block.task.dir = Some("an existing dir".to_owned());
        assert_matches!(
            block.parse_attribute(&line("dir: some dir")),
            Err(ParseError::DuplicateAttribute { attribute: "directory", .. })
        );
    }

    #[test]
    fn test_invalid_run() {
        assert_matches!(
            block().parse_attribute(&line("run: never")),
            Err(ParseError::InvalidRunValue { value, .. }) if value == "never"
        );
    }
}
