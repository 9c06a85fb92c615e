//! Submission flow: request → record → estimate → rendered text.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;

use petrocost_ai::{Estimate, Estimator, InferenceError, OutputMode, SharedModel, registry};
use petrocost_core::{DomainError, FeatureRecord, PredictionRequest, column_names};

use crate::args::{Args, Commands, OutputArgs, PredictArgs};
use crate::display;
use crate::error::{CliError, CliResult};
use crate::form::{Prompter, request_from_args};
use crate::settings::Settings;

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Estimated(Estimate),
    /// The form itself was invalid; the model was not called.
    Rejected(DomainError),
    /// The model could not produce an estimate.
    Failed(InferenceError),
}

impl Submission {
    pub fn is_success(&self) -> bool {
        matches!(self, Submission::Estimated(_))
    }
}

/// Everything a submission needs; the model outcome is fixed for the process.
pub struct Session {
    model: Result<SharedModel, InferenceError>,
    mode: OutputMode,
    json: bool,
}

impl Session {
    pub fn new(model: Result<SharedModel, InferenceError>, mode: OutputMode) -> Self {
        Self {
            model,
            mode,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn submit(&self, request: &PredictionRequest) -> Submission {
        if let Err(e) = request.validate() {
            return Submission::Rejected(e);
        }
        let record = FeatureRecord::assemble(request);
        self.submit_record(&record)
    }

    /// Run inference on an already-assembled record.
    pub fn submit_record(&self, record: &FeatureRecord) -> Submission {
        let model = match &self.model {
            Ok(model) => model.clone(),
            Err(e) => return Submission::Failed(e.clone()),
        };
        match Estimator::new(model, self.mode).estimate(record) {
            Ok(estimate) => Submission::Estimated(estimate),
            Err(e) => Submission::Failed(e),
        }
    }

    pub fn render(&self, submission: &Submission) -> String {
        match submission {
            Submission::Estimated(est) if self.json => display::render_json(est),
            Submission::Estimated(est) => display::render_estimate(est),
            Submission::Rejected(e) => format!("invalid form: {e}"),
            Submission::Failed(e) => display::render_inference_error(e),
        }
    }

    /// Interactive loop: fill, submit, show, and offer another round.
    ///
    /// Returns the number of successful estimates.
    pub fn run_form<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> CliResult<usize> {
        let mut defaults = PredictionRequest::default();
        let mut successes = 0;

        loop {
            let Some(request) = prompter.fill(&defaults)? else {
                break;
            };

            let submission = self.submit(&request);
            if submission.is_success() {
                successes += 1;
            }
            writeln!(prompter.output_mut(), "\n{}\n", self.render(&submission))?;

            defaults = request;
            if !prompter.confirm("New prediction?")? {
                break;
            }
        }

        Ok(successes)
    }
}

/// Entry point behind `main`.
pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut settings = Settings::load_from(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    settings.apply_args(&args);
    petrocost_observability::init(&settings.logging);

    tracing::debug!(?settings, "configuration loaded");

    match &args.command {
        Commands::Schema => {
            for name in column_names() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Predict(predict) => run_predict(&settings, predict),
        Commands::Form(output) => run_interactive(&settings, output),
    }
}

/// Install the process model; a failure is logged here and surfaces on each submission.
fn load_model(settings: &Settings) {
    if let Err(e) = registry::init(&settings.model.path) {
        tracing::error!(path = %settings.model.path.display(), error = %e, "model load failed");
    }
}

fn session(settings: &Settings, output: &OutputArgs) -> Session {
    load_model(settings);
    Session::new(registry::get(), settings.model.mode).with_json(output.json)
}

fn run_predict(settings: &Settings, args: &PredictArgs) -> anyhow::Result<ExitCode> {
    let session = session(settings, &args.output);

    let submission = match request_from_args(args) {
        Ok(request) => session.submit(&request),
        Err(CliError::Domain(e)) => Submission::Rejected(e),
        Err(e) => return Err(e.into()),
    };

    let rendered = session.render(&submission);
    if submission.is_success() {
        println!("{rendered}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{rendered}");
        Ok(ExitCode::FAILURE)
    }
}

fn run_interactive(settings: &Settings, output: &OutputArgs) -> anyhow::Result<ExitCode> {
    let session = session(settings, output);
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    let successes = session.run_form(&mut prompter)?;
    tracing::info!(successes, "form session finished");
    Ok(ExitCode::SUCCESS)
}
