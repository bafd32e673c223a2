use clap::{command, Arg, ArgAction, ArgMatches, Command};
use console::style;
use std::ffi::OsString;

pub const NAME: &str = "cc-cli";
pub const ABOUT: &str = "a scaffold tool for quickly generating a development environment";

/// Flags recognised at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub help: bool,
    pub version: bool,
    pub init: bool,
}

fn app() -> Command {
    command!()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("init").long("init").action(ArgAction::SetTrue))
        .arg(
            Arg::new("rest")
                .num_args(0..)
                .action(ArgAction::Append)
                .hide(true),
        )
}

const LONG_FLAGS: [&str; 3] = ["--help", "--version", "--init"];
const SHORT_FLAGS: [char; 2] = ['h', 'v'];

/// Stray words go to the hidden positional; dashed tokens survive only when
/// they name one of our flags (short flags may be clustered, as in `-hv`).
fn recognised(arg: &OsString) -> bool {
    let Some(arg) = arg.to_str() else {
        return false;
    };
    if arg == "-" || !arg.starts_with('-') {
        return true;
    }
    match arg.strip_prefix("--") {
        Some(_) => LONG_FLAGS.contains(&arg),
        None => arg[1..].chars().all(|c| SHORT_FLAGS.contains(&c)),
    }
}

impl Config {
    /// Unknown arguments are ignored; this never fails.
    pub fn from_args<I, T>(args: I) -> Config
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args
            .into_iter()
            .map(Into::<OsString>::into)
            .enumerate()
            .filter(|(i, arg)| *i == 0 || recognised(arg))
            .map(|(_, arg)| arg);
        match app().try_get_matches_from(args) {
            Ok(matches) => Config::from_matches(&matches),
            Err(_) => Config::default(),
        }
    }

    fn from_matches(matches: &ArgMatches) -> Config {
        Config {
            help: matches.get_flag("help"),
            version: matches.get_flag("version"),
            init: matches.get_flag("init"),
        }
    }
}

pub fn version() -> String {
    format!("{} {}", NAME, env!("CARGO_PKG_VERSION"))
}

pub fn usage() -> String {
    let options = [
        ("--version", "version number"),
        ("--init", "initialize"),
    ];
    let width = options.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);

    let mut text = String::new();
    text.push('\n');
    text.push_str(&format!("{}\n\n", style(NAME).bold().underlined()));
    text.push_str(&format!("  {}\n\n", ABOUT));
    text.push_str(&format!("{}\n\n", style("Options").bold().underlined()));
    for (flag, description) in options {
        text.push_str(&format!(
            "  {:width$} {}   {}\n",
            style(flag).bold(),
            style("boolean").underlined(),
            description,
            width = width
        ));
    }
    text
}
