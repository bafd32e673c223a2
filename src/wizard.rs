//! The two-question flow that collects a project name and a template source.

use anyhow::Result;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use regex::Regex;
use std::{
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing::debug;

use crate::{error::NameError, template::Template};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: String,
    pub template: Template,
}

/// Answers whether a name is already taken on disk.
pub trait PathLookup {
    fn exists(&self, name: &str) -> bool;
}

/// Resolves names against a fixed base directory.
#[derive(Debug, Clone)]
pub struct WorkingDir(PathBuf);

impl WorkingDir {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        WorkingDir(base.into())
    }

    pub fn current() -> io::Result<Self> {
        Ok(WorkingDir(std::env::current_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl PathLookup for WorkingDir {
    fn exists(&self, name: &str) -> bool {
        self.0.join(name).exists()
    }
}

fn illegal_characters() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9\x{4e00}-\x{9fa5}_-]").expect("name pattern is valid")
    })
}

/// Checks run in order: empty, illegal characters, already on disk.
pub fn validate_name(name: &str, lookup: &dyn PathLookup) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if illegal_characters().is_match(name) {
        return Err(NameError::IllegalCharacters);
    }
    if lookup.exists(name) {
        return Err(NameError::AlreadyExists);
    }
    Ok(())
}

pub type NameValidator<'a> = dyn Fn(&str) -> Result<(), NameError> + 'a;

/// Terminal interaction. `Ok(None)` means the user backed out.
pub trait Prompter {
    /// Asks until `validate` accepts the input.
    fn input_name(&self, validate: &NameValidator<'_>) -> Result<Option<String>>;

    fn select_template(&self, choices: &[Template]) -> Result<Option<Template>>;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn input_name(&self, validate: &NameValidator<'_>) -> Result<Option<String>> {
        (**self).input_name(validate)
    }

    fn select_template(&self, choices: &[Template]) -> Result<Option<Template>> {
        (**self).select_template(choices)
    }
}

#[derive(Default)]
pub struct DialoguerPrompt {
    theme: ColorfulTheme,
}

impl DialoguerPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for DialoguerPrompt {
    fn input_name(&self, validate: &NameValidator<'_>) -> Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt("project name")
            .allow_empty(true)
            .validate_with(|input: &String| validate(input))
            .interact_text();
        cancel_on_interrupt(answer.map(Some))
    }

    fn select_template(&self, choices: &[Template]) -> Result<Option<Template>> {
        let labels: Vec<&str> = choices.iter().map(|t| t.label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("select source")
            .items(&labels)
            .default(0)
            .interact_opt();
        let index = cancel_on_interrupt(selection)?;
        Ok(index.and_then(|i| choices.get(i).copied()))
    }
}

/// Ctrl-C surfaces as an `Interrupted` I/O error and counts as backing out.
fn cancel_on_interrupt<T>(answer: dialoguer::Result<Option<T>>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
            // `Select` hides the cursor and does not restore it on interrupt.
            Term::stderr().show_cursor()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub struct Wizard<'a, P> {
    prompt: &'a P,
    lookup: &'a dyn PathLookup,
}

impl<'a, P: Prompter> Wizard<'a, P> {
    pub fn new(prompt: &'a P, lookup: &'a dyn PathLookup) -> Self {
        Wizard { prompt, lookup }
    }

    /// `None` when either question was cancelled.
    pub fn ask(&self) -> Result<Option<Answers>> {
        let lookup = self.lookup;
        let Some(name) = self
            .prompt
            .input_name(&|input: &str| validate_name(input, lookup))?
        else {
            debug!("name prompt cancelled");
            return Ok(None);
        };
        let Some(template) = self.prompt.select_template(&Template::ALL)? else {
            debug!("template prompt cancelled");
            return Ok(None);
        };
        debug!(%name, %template, "wizard answered");
        Ok(Some(Answers { name, template }))
    }
}
