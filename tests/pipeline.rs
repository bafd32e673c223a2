use cc_cli::{
    cli::Config, App, DirectRef, Fetch, FetchError, Outcome, Prompter,
    Reporter, Template, WorkingDir,
};
use indicatif::ProgressBar;
use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

struct Scripted {
    names: RefCell<Vec<&'static str>>,
    template: Option<Template>,
    rejections: RefCell<Vec<String>>,
}

impl Scripted {
    fn new(names: &[&'static str], template: Option<Template>) -> Self {
        Scripted {
            names: RefCell::new(names.to_vec()),
            template,
            rejections: RefCell::default(),
        }
    }
}

impl Prompter for Scripted {
    fn input_name(
        &self,
        validate: &cc_cli::wizard::NameValidator<'_>,
    ) -> anyhow::Result<Option<String>> {
        loop {
            let mut names = self.names.borrow_mut();
            // Running out of scripted input behaves like Ctrl-C.
            if names.is_empty() {
                return Ok(None);
            }
            let name = names.remove(0);
            match validate(name) {
                Ok(()) => return Ok(Some(name.to_string())),
                Err(e) => self.rejections.borrow_mut().push(e.to_string()),
            }
        }
    }

    fn select_template(&self, _choices: &[Template]) -> anyhow::Result<Option<Template>> {
        Ok(self.template)
    }
}

struct NoPrompt;

impl Prompter for NoPrompt {
    fn input_name(
        &self,
        _validate: &cc_cli::wizard::NameValidator<'_>,
    ) -> anyhow::Result<Option<String>> {
        panic!("prompted for a name")
    }

    fn select_template(&self, _choices: &[Template]) -> anyhow::Result<Option<Template>> {
        panic!("prompted for a template")
    }
}

#[derive(Default)]
struct Recorder {
    requests: RefCell<Vec<(String, PathBuf)>>,
    fail: bool,
}

impl Fetch for Recorder {
    fn fetch(
        &self,
        reference: &DirectRef,
        dest: &Path,
        _progress: &ProgressBar,
    ) -> Result<(), FetchError> {
        self.requests
            .borrow_mut()
            .push((reference.to_string(), dest.to_path_buf()));
        if self.fail {
            return Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "network unreachable",
            )));
        }
        fs::create_dir(dest)?;
        fs::write(dest.join("package.json"), "{}")?;
        Ok(())
    }
}

fn text(bytes: &[u8]) -> String {
    console::strip_ansi_codes(&String::from_utf8_lossy(bytes)).to_string()
}

#[test]
fn help_short_circuits_the_wizard() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Recorder::default();
    let mut app = App::new(
        NoPrompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    let config = Config::from_args(["cc-cli", "--help"]);
    assert_eq!(app.run(&config).unwrap(), Outcome::Help);

    let (out, _) = app.into_reporter().into_inner();
    let out = text(&out);
    assert!(out.contains("cc-cli"));
    assert!(out.contains("version number"));
    assert!(out.contains("initialize"));
    assert!(fetcher.requests.borrow().is_empty());
}

#[test]
fn creates_project_from_github() {
    let dir = tempfile::tempdir().unwrap();
    let prompt = Scripted::new(&["my-app"], Some(Template::Github));
    let fetcher = Recorder::default();
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    let outcome = app.run(&Config::default()).unwrap();

    let dest = dir.path().join("my-app");
    assert_eq!(outcome, Outcome::Created(dest.clone()));
    assert_eq!(
        *fetcher.requests.borrow(),
        [(
            "direct:https://github.com/BenjaminCCG/vue3-template-cli.git#main".to_string(),
            dest.clone()
        )]
    );
    assert!(dest.join("package.json").exists());

    let (out, err) = app.into_reporter().into_inner();
    let out = text(&out);
    let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        ["Done. Now run:", "cd my-app", "npm install", "npm run dev"]
    );
    assert!(err.is_empty());
}

#[test]
fn init_flag_runs_the_wizard() {
    let dir = tempfile::tempdir().unwrap();
    let prompt = Scripted::new(&["site"], Some(Template::Gitee));
    let fetcher = Recorder::default();
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    let config = Config::from_args(["cc-cli", "--init"]);
    assert!(app.run(&config).unwrap().is_success());
    assert_eq!(
        fetcher.requests.borrow()[0].0,
        "direct:https://gitee.com/theGreatWallCCG/vue3-template-cli.git#main"
    );
}

#[test]
fn empty_name_is_reprompted_and_nothing_is_fetched() {
    let dir = tempfile::tempdir().unwrap();
    let prompt = Scripted::new(&[""], Some(Template::Github));
    let fetcher = Recorder::default();
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    assert_eq!(app.run(&Config::default()).unwrap(), Outcome::Cancelled);
    assert_eq!(
        *prompt.rejections.borrow(),
        ["template name must not be empty"]
    );
    assert!(fetcher.requests.borrow().is_empty());

    let (out, err) = app.into_reporter().into_inner();
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn existing_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("my-app")).unwrap();
    let prompt = Scripted::new(&["my-app", "my-app-2"], Some(Template::Github));
    let fetcher = Recorder::default();
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    assert_eq!(
        app.run(&Config::default()).unwrap(),
        Outcome::Created(dir.path().join("my-app-2"))
    );
    assert_eq!(*prompt.rejections.borrow(), ["project name already exists"]);
}

#[test]
fn cancelled_template_choice_fetches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let prompt = Scripted::new(&["my-app"], None);
    let fetcher = Recorder::default();
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    assert_eq!(app.run(&Config::default()).unwrap(), Outcome::Cancelled);
    assert!(fetcher.requests.borrow().is_empty());
    assert!(!dir.path().join("my-app").exists());
}

#[test]
fn download_failure_is_reported_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let prompt = Scripted::new(&["my-app"], Some(Template::Github));
    let fetcher = Recorder {
        fail: true,
        ..Recorder::default()
    };
    let mut app = App::new(
        &prompt,
        &fetcher,
        WorkingDir::new(dir.path()),
        Reporter::captured(Vec::new(), Vec::new()),
    );

    let outcome = app.run(&Config::default()).unwrap();

    assert_eq!(outcome, Outcome::Failed);
    assert!(!outcome.is_success());
    let (out, err) = app.into_reporter().into_inner();
    assert!(!text(&out).contains("npm run dev"));
    let err = text(&err);
    assert!(err.contains("error:"), "{err}");
    assert!(err.contains("network unreachable"), "{err}");
}
