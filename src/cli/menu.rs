//! Interactive menu
//!
//! Reads choices line by line and writes plain text, so it can be driven by
//! any `BufRead`/`Write` pair. Every command runs on its own; loading does
//! not print the catalog.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::cli::output::{render_course_detail, render_course_line, render_not_found};
use crate::infrastructure::{InfraError, InfraResult};

const MENU: &str = "Menu:
  1. Load Courses
  2. Display All Courses
  3. Find Course
  4. Remove Course
  9. Exit";

pub struct Menu<'a, R, W> {
    service: &'a mut CatalogService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut CatalogService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Run until the user picks 9 or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        loop {
            self.say(MENU)?;
            let Some(choice) = self.ask("Enter choice:")? else {
                debug!("input closed");
                break;
            };
            match choice.as_str() {
                "1" => self.load()?,
                "2" => self.display_all()?,
                "3" => self.find()?,
                "4" => self.remove()?,
                "9" => break,
                "" => {}
                other => self.say(format!("{} is not a valid option.", other))?,
            }
        }
        self.say("Good bye.")
    }

    /// Load a catalog and report the outcome.
    pub fn load_path(&mut self, path: &Path) -> InfraResult<()> {
        match self.service.load(path) {
            Ok(report) => {
                for skipped in &report.skipped {
                    self.say(format!("  line {} skipped: {}", skipped.line, skipped.reason))?;
                }
                self.say(format!("{} courses read", report.loaded))
            }
            Err(e) => self.say(format!("Could not load catalog: {}", e)),
        }
    }

    fn load(&mut self) -> InfraResult<()> {
        let default = self.default_path();
        let prompt = match &default {
            Some(path) => format!("Enter input file path [{}]:", path.display()),
            None => "Enter input file path:".to_string(),
        };
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(());
        };
        let path = if answer.is_empty() { default } else { Some(PathBuf::from(answer)) };
        match path {
            Some(path) => self.load_path(&path),
            None => self.say("No file given."),
        }
    }

    fn display_all(&mut self) -> InfraResult<()> {
        if self.service.is_empty() {
            return self.say("No courses loaded.");
        }
        let lines: Vec<String> = self.service.courses().map(render_course_line).collect();
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    fn find(&mut self) -> InfraResult<()> {
        let Some(id) = self.ask("Enter Course ID:")? else {
            return Ok(());
        };
        let text = match self.service.find(&id) {
            Some(course) => render_course_detail(course),
            None => render_not_found(&id),
        };
        self.say(text)
    }

    fn remove(&mut self) -> InfraResult<()> {
        let Some(id) = self.ask("Enter Course ID:")? else {
            return Ok(());
        };
        match self.service.remove(&id) {
            Some(course) => self.say(format!("Removed {}", course)),
            None => self.say(render_not_found(&id)),
        }
    }

    /// Previously loaded file, else the configured catalog.
    fn default_path(&self) -> Option<PathBuf> {
        self.service
            .source()
            .map(Path::to_path_buf)
            .or_else(|| self.service.settings().catalog.clone())
    }

    fn say(&mut self, text: impl Display) -> InfraResult<()> {
        writeln!(self.output, "{}", text).map_err(|e| InfraError::io("write menu output", e))
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> InfraResult<Option<String>> {
        write!(self.output, "{} ", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| InfraError::io("write prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read menu input", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
