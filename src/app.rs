use anyhow::Result;
use std::{io::Write, path::PathBuf};
use tracing::{info, warn};

use crate::{
    cli::{self, Config},
    fetch::Fetch,
    report::Reporter,
    wizard::{Prompter, Wizard, WorkingDir},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help,
    Version,
    Cancelled,
    Created(PathBuf),
    /// Already reported to the user.
    Failed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed)
    }
}

/// Parser → help → wizard → fetch → report, once per invocation.
pub struct App<P, F, W, E> {
    prompt: P,
    fetcher: F,
    dir: WorkingDir,
    reporter: Reporter<W, E>,
}

impl<P, F, W, E> App<P, F, W, E>
where
    P: Prompter,
    F: Fetch,
    W: Write,
    E: Write,
{
    pub fn new(prompt: P, fetcher: F, dir: WorkingDir, reporter: Reporter<W, E>) -> Self {
        App {
            prompt,
            fetcher,
            dir,
            reporter,
        }
    }

    pub fn into_reporter(self) -> Reporter<W, E> {
        self.reporter
    }

    pub fn run(&mut self, config: &Config) -> Result<Outcome> {
        if config.help {
            self.reporter.print(&cli::usage())?;
            return Ok(Outcome::Help);
        }
        if config.version {
            self.reporter.print(&cli::version())?;
            return Ok(Outcome::Version);
        }

        let Some(answers) = Wizard::new(&self.prompt, &self.dir).ask()? else {
            return Ok(Outcome::Cancelled);
        };

        let reference = answers.template.direct_ref();
        let dest = self.dir.path().join(&answers.name);
        info!(%reference, dest = %dest.display(), "fetching template");

        let pb = self.reporter.start_download();
        match self.fetcher.fetch(&reference, &dest, &pb) {
            Ok(()) => {
                self.reporter.succeeded(&pb, &answers.name)?;
                Ok(Outcome::Created(dest))
            }
            Err(e) => {
                warn!(error = %e, "template download failed");
                self.reporter.failed(&pb, &e)?;
                Ok(Outcome::Failed)
            }
        }
    }
}
