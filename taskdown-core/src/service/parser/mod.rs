use std::io::{BufRead, Lines};

use log::debug;

use crate::{
    error::{ParseError, ParseResult},
    model::Task,
};

use heading::Heading;

mod attribute;
mod code_block;
mod heading;

/// One line of the document, numbered from 1.
#[derive(Debug)]
pub(crate) struct Line {
    pub number: usize,
    pub text: String,
}

/// Forward-only view of the document as numbered lines.
#[derive(Debug)]
struct LineScanner<R> {
    lines: Lines<R>,
    number: usize,
}

impl<R: BufRead> LineScanner<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }

    fn next_line(&mut self) -> ParseResult<Option<Line>> {
        let Some(text) = self.lines.next().transpose()? else {
            return Ok(None);
        };
        self.number += 1;
        Ok(Some(Line {
            number: self.number,
            text,
        }))
    }
}

/// The task being built from the lines following its heading.
#[derive(Debug)]
pub(crate) struct TaskBlock {
    task: Task,
    /// Line of the fence while a code block is open.
    fence: Option<usize>,
}

impl TaskBlock {
    fn new(task: Task) -> Self {
        Self {
            task,
            fence: None,
        }
    }

    /// Hand `line` to the code block, then attribute parsing, falling back to description.
    fn parse_line(&mut self, line: &Line) -> ParseResult<()> {
        if self.parse_code_block(line)? || self.parse_attribute(line)? {
            return Ok(());
        }
        let text = line.text.trim();
        if !text.is_empty() {
            self.task.description.push(text.to_owned());
        }
        Ok(())
    }

    fn finish(self) -> ParseResult<Task> {
        if let Some(line) = self.fence {
            return Err(ParseError::UnterminatedCodeBlock {
                task: self.task.name,
                line,
            });
        }
        if !self.task.is_runnable() {
            return Err(ParseError::CommandlessTask {
                task: self.task.name,
            });
        }
        debug!("parsed task `{}`", self.task.name);
        Ok(self.task)
    }
}

/// Single pass parser extracting tasks from the section of a Markdown document
/// introduced by a configured heading.
///
/// Each heading one level below the section heading starts a task. The lines
/// under it are its description, `key: value` attributes and one fenced code
/// block holding the script.
#[derive(Debug)]
pub struct Parser<R> {
    scanner: LineScanner<R>,
    section_level: usize,
    /// Name read from the heading that ended the previous task.
    next_task: Option<String>,
    section_done: bool,
}

impl<R: BufRead> Parser<R> {
    /// Position the parser right after the section heading named `heading`.
    pub fn new(reader: R, heading: &str) -> ParseResult<Self> {
        let mut scanner = LineScanner::new(reader);
        while let Some(line) = scanner.next_line()? {
            if let Some(found) = Heading::parse(&line.text)
                && found.is_named(heading)
            {
                debug!("found `{}` section at line {}", found.text, line.number);
                return Ok(Self {
                    scanner,
                    section_level: found.level,
                    next_task: None,
                    section_done: false,
                });
            }
        }
        Err(ParseError::NoTasksHeading {
            heading: heading.trim().to_owned(),
        })
    }

    /// Parse every remaining task of the section, in document order.
    pub fn parse(mut self) -> ParseResult<Vec<Task>> {
        std::iter::from_fn(|| self.parse_task().transpose()).collect()
    }

    /// Parse the next task of the section, `None` once the section is exhausted.
    pub fn parse_task(&mut self) -> ParseResult<Option<Task>> {
        // Prose between the section heading and its first task is skipped.
        while self.next_task.is_none() {
            if self.section_done {
                return Ok(None);
            }
            let Some(line) = self.scanner.next_line()? else {
                self.section_done = true;
                return Ok(None);
            };
            self.parse_heading(&line);
        }

        let mut block = TaskBlock::new(Task::new(self.next_task.take().unwrap_or_default()));
        while let Some(line) = self.scanner.next_line()? {
            if block.in_code_block() {
                // The next task heading ends the block, open fence or not.
                if self.parse_task_heading(&line) {
                    break;
                }
                block.parse_code_block(&line)?;
                continue;
            }
            if self.parse_heading(&line) {
                break;
            }
            block.parse_line(&line)?;
        }
        if self.next_task.is_none() {
            self.section_done = true;
        }

        block.finish().map(Some)
    }

    /// Handle a line ending the current task: either the next task heading or
    /// a heading closing the section.
    fn parse_heading(&mut self, line: &Line) -> bool {
        let Some(heading) = Heading::parse(&line.text) else {
            return false;
        };
        if heading.level <= self.section_level {
            debug!("`{}` ends the task section at line {}", heading.text, line.number);
            self.section_done = true;
            true
        } else {
            self.parse_task_heading(line)
        }
    }

    /// Record the name of the next task if `line` is a heading one level below the section.
    fn parse_task_heading(&mut self, line: &Line) -> bool {
        match Heading::parse(&line.text) {
            Some(heading) if heading.level == self.section_level + 1 => {
                self.next_task = Some(heading.text.to_owned());
                true
            }
            _ => false,
        }
    }
}
