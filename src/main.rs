//! Resume scorer: score PDF and DOCX resumes from the command line

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_scorer::batch::evaluate_batch;
use resume_scorer::cli::{self, Cli, Commands, ConfigAction, KeywordsAction};
use resume_scorer::config::Config;
use resume_scorer::output::{
    save_report_to_file, BatchReport, EvaluationReport, ReportGenerator, ReportMetadata,
};
use resume_scorer::Evaluator;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Evaluate {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            grammar,
        } => {
            if let Some(backend) = grammar {
                config.grammar.backend = cli::parse_grammar_backend(&backend).map_err(anyhow::Error::msg)?;
            }
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let (job_description, job_source) = load_job_description(job.as_deref(), job_text)?;

            // stdout is reserved for the report
            info!("Evaluating resume {}", resume.display());
            if let Some(source) = &job_source {
                info!("Job description: {}", source);
            }

            let evaluator = Evaluator::from_config(&config).context("Failed to build evaluator")?;
            let result = evaluator.evaluate(&resume, job_description.as_deref())?;

            let metadata = ReportMetadata::new(
                evaluator.grammar_backend(),
                evaluator.lexicon().version(),
                job_source,
            );
            let report = EvaluationReport::new(metadata, &resume, result);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator.generate_report(&report, &output_format)?;
            emit(&content, save.as_deref())?;

            info!("Evaluation complete, overall score {:.1}", report.result.overall_score);
        }

        Commands::Batch {
            resumes,
            job,
            output,
            save,
        } => {
            let output_format = cli::parse_output_format(&output).map_err(anyhow::Error::msg)?;
            let (job_description, job_source) = load_job_description(job.as_deref(), None)?;
            info!("Starting batch evaluation of {} resumes", resumes.len());

            let evaluator = Arc::new(Evaluator::from_config(&config).context("Failed to build evaluator")?);

            let bar = ProgressBar::new(resumes.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .context("Invalid progress bar template")?
                    .progress_chars("=> "),
            );
            let entries = evaluate_batch(
                Arc::clone(&evaluator),
                &resumes,
                job_description.map(Arc::from),
                Some(&bar),
            )
            .await?;
            bar.finish_with_message("done");

            let metadata = ReportMetadata::new(
                evaluator.grammar_backend(),
                evaluator.lexicon().version(),
                job_source,
            );
            let batch = BatchReport::new(metadata, entries);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                false,
                true,
                true,
            );
            let content = generator.generate_batch(&batch, &output_format)?;
            emit(&content, save.as_deref())?;

            info!(
                "Batch complete: {} evaluated, {} failed",
                batch.succeeded(),
                batch.failed()
            );
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", config.to_toml_string()?);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }

        Commands::Keywords { action } => {
            let evaluator = Evaluator::from_config(&config).context("Failed to load keyword tables")?;
            let tables = evaluator.lexicon().tables();
            match action {
                Some(KeywordsAction::Show) | None => {
                    println!("🔤 Keyword tables v{}\n", tables.version);
                    println!("Technical keywords: {}", tables.technical.len());
                    println!("Soft skills: {}", tables.soft_skills.len());
                    println!("Action verbs: {}", tables.action_verbs.len());
                    println!("ATS headers: {}", tables.ats_headers.join(", "));
                    println!("Section headers: {}", tables.section_headers.len());
                    println!("\nRoles:");
                    for role in &tables.roles {
                        println!("  • {} ({} keywords)", role.name, role.keywords.len());
                    }
                }

                Some(KeywordsAction::Export { path }) => {
                    save_report_to_file(&tables.to_toml_string()?, &path)?;
                    println!("✅ Keyword tables written to {}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Job description text and a label for where it came from.
fn load_job_description(
    job: Option<&Path>,
    job_text: Option<String>,
) -> anyhow::Result<(Option<String>, Option<String>)> {
    match (job, job_text) {
        (Some(path), _) => {
            if let Err(e) = cli::validate_file_extension(path, &["txt", "md"]) {
                bail!("Job description file: {}", e);
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            Ok((Some(text), Some(path.display().to_string())))
        }
        (None, Some(text)) => Ok((Some(text), Some("inline".to_string()))),
        (None, None) => Ok((None, None)),
    }
}

fn emit(content: &str, save: Option<&Path>) -> anyhow::Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
