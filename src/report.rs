//! Console feedback: the download spinner and the follow-up instructions.

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::{
    fmt::Display,
    io::{self, Stderr, Stdout, Write},
    time::Duration,
};

pub const DOWNLOADING: &str = "downloading template...";
pub const DOWNLOADED: &str = "template downloaded successfully!";
pub const DOWNLOAD_FAILED: &str = "template download failed";

pub struct Reporter<W, E> {
    out: W,
    err: E,
    hidden: bool,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Reporter {
            out: io::stdout(),
            err: io::stderr(),
            hidden: false,
        }
    }
}

impl<W: Write, E: Write> Reporter<W, E> {
    /// Writes to the given sinks and never draws the spinner.
    pub fn captured(out: W, err: E) -> Self {
        Reporter {
            out,
            err,
            hidden: true,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn start_download(&self) -> ProgressBar {
        let pb = if self.hidden {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {bytes:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(DOWNLOADING);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    pub fn succeeded(&mut self, pb: &ProgressBar, name: &str) -> io::Result<()> {
        pb.set_style(finished_style("{prefix:.green} {msg}"));
        pb.set_prefix("✔");
        pb.finish_with_message(style(DOWNLOADED).green().for_stderr().to_string());

        writeln!(self.out)?;
        writeln!(self.out, "Done. Now run:")?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", style(format!("cd {}", name)).green())?;
        writeln!(self.out, "{}", style("npm install").blue())?;
        writeln!(self.out, "npm run dev")?;
        writeln!(self.out)
    }

    pub fn failed(&mut self, pb: &ProgressBar, err: &dyn Display) -> io::Result<()> {
        pb.set_style(finished_style("{prefix:.red} {msg}"));
        pb.set_prefix("✖");
        pb.abandon_with_message(DOWNLOAD_FAILED);

        writeln!(
            self.err,
            "{} {}",
            style("error:").red().bold().for_stderr(),
            style(err).red().for_stderr()
        )
    }
}

fn finished_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}
