//! Scaffold a new project from one of the pinned vue3 template repositories.

pub mod app;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod report;
pub mod template;
pub mod wizard;

pub use app::{App, Outcome};
pub use cli::Config;
pub use error::{FetchError, NameError, RefError};
pub use fetch::{Fetch, HttpFetcher};
pub use report::Reporter;
pub use template::{DirectRef, Repository, Template, BRANCH};
pub use wizard::{validate_name, Answers, DialoguerPrompt, PathLookup, Prompter, Wizard, WorkingDir};
