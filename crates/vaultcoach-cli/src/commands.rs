//! Command handlers

use std::path::{Path, PathBuf};

use tracing::debug;
use vaultcoach_act::{ChatMessage, CoachRequest, KnowledgeBase, SkillLevel};
use vaultcoach_app::app::{analyze_run_up, preview_advice, request_advice};
use vaultcoach_app::config::Config;
use vaultcoach_domain::model::MeasurementInput;
use vaultcoach_infra::CsvReferenceRepository;
use vaultcoach_types::{Locale, OutputFormat, Result};

use crate::cli::{AnalyzeArgs, Cli, Commands};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    if let Commands::Config {
        show,
        set_locale,
        set_output,
        set_reference_dir,
        set_model,
        reset,
    } = &cli.command
    {
        return cmd_config(
            *show,
            *set_locale,
            *set_output,
            set_reference_dir.clone(),
            set_model.clone(),
            *reset,
        );
    }

    let config = effective_config(Config::load()?, &cli);
    debug!(locale = %config.locale, reference_dir = %config.reference_dir().display(), "configuration resolved");

    match &cli.command {
        Commands::Analyze(args) => cmd_analyze(&config, args),
        Commands::Phases { best } => cmd_phases(&config, *best),
        Commands::Coach {
            phases,
            best,
            questions,
            label,
            dry_run,
        } => {
            let request = coach_request(&config, phases.clone(), *best, questions, label.clone());
            if *dry_run {
                let completion = preview_advice(&config, &request)?;
                output::output_completion(config.output_format, &completion)
            } else {
                let reply = request_advice(&config, &request)?;
                output::output_advice(config.output_format, &reply)
            }
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Per-invocation flags win over the stored config
fn effective_config(mut config: Config, cli: &Cli) -> Config {
    if let Some(locale) = cli.lang {
        config.locale = locale;
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if let Some(dir) = &cli.reference_dir {
        config.reference_dir = Some(dir.clone());
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    config
}

fn load_input(path: &Path) -> Result<MeasurementInput> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn cmd_analyze(config: &Config, args: &AnalyzeArgs) -> Result<()> {
    let mut input = match &args.input {
        Some(path) => load_input(path)?,
        None => MeasurementInput::default(),
    };
    input.merge(args.to_input());

    let repository = CsvReferenceRepository::new(config.reference_dir());
    let report = analyze_run_up(&input, &repository, config.locale)?;
    output::output_report(config.output_format, &report)
}

fn cmd_phases(config: &Config, best: Option<u32>) -> Result<()> {
    let kb = KnowledgeBase::embedded()?;
    let level = best.map(SkillLevel::from_best_record);
    output::output_phases(config.output_format, &kb, level, config.locale)
}

fn coach_request(
    config: &Config,
    phases: Vec<u8>,
    best: u32,
    questions: &[String],
    label: Option<String>,
) -> CoachRequest {
    questions
        .iter()
        .fold(CoachRequest::new(phases, best), |req, q| req.with_message(ChatMessage::user(q.as_str())))
        .with_locale(config.locale)
        .with_phase_label(label)
}

fn cmd_config(
    show: bool,
    set_locale: Option<Locale>,
    set_output: Option<OutputFormat>,
    set_reference_dir: Option<PathBuf>,
    set_model: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(locale) = set_locale {
        config.locale = locale;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(dir) = set_reference_dir {
        config.reference_dir = Some(dir);
        modified = true;
    }

    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
