use log::trace;

use crate::error::{ParseError, ParseResult};

use super::{Line, TaskBlock};

const FENCE: &str = "```";

/// A fence may open with an info string, ```` ```sh ````.
fn opens_fence(line: &str) -> bool {
    line.trim()
        .strip_prefix(FENCE)
        .is_some_and(|info| !info.contains('`'))
}

fn closes_fence(line: &str) -> bool {
    line.trim() == FENCE
}

impl TaskBlock {
    /// Feed `line` to the code block of the task, returns whether it was consumed.
    ///
    /// While a block is open every line belongs to the script verbatim. Task headings
    /// are checked by the caller before the line gets here.
    pub(crate) fn parse_code_block(&mut self, line: &Line) -> ParseResult<bool> {
        if self.fence.is_some() {
            if closes_fence(&line.text) {
                trace!("task `{}`: code block closed at line {}", self.task.name, line.number);
                self.fence = None;
            } else {
                self.task.script.push_str(&line.text);
                self.task.script.push('\n');
            }
            return Ok(true);
        }

        if !opens_fence(&line.text) {
            return Ok(false);
        }
        if !self.task.script.is_empty() {
            return Err(ParseError::MultipleCodeBlocks {
                task: self.task.name.clone(),
                line: line.number,
            });
        }

        trace!("task `{}`: code block opened at line {}", self.task.name, line.number);
        self.fence = Some(line.number);
        Ok(true)
    }

    pub(crate) fn in_code_block(&self) -> bool {
        self.fence.is_some()
    }
}
