//! Concurrent evaluation of many resumes on the blocking pool

use crate::error::{EvaluationFailure, Result};
use crate::output::report::BatchEntry;
use crate::processing::{EvaluationResult, Evaluator};
use indicatif::ProgressBar;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Outcome = std::result::Result<EvaluationResult, EvaluationFailure>;

/// Evaluate every resume against the same job description.
///
/// Each file runs on its own blocking task; entries come back in input
/// order. A file that cannot be evaluated, or whose task panics, becomes an
/// entry with an error and does not fail the batch.
pub async fn evaluate_batch(
    evaluator: Arc<Evaluator>,
    resumes: &[PathBuf],
    job_description: Option<Arc<str>>,
    progress: Option<&ProgressBar>,
) -> Result<Vec<BatchEntry>> {
    run_batch(resumes, progress, move |path| {
        evaluator.evaluate(path, job_description.as_deref())
    })
    .await
}

async fn run_batch<F>(
    resumes: &[PathBuf],
    progress: Option<&ProgressBar>,
    evaluate: F,
) -> Result<Vec<BatchEntry>>
where
    F: Fn(&Path) -> Outcome + Send + Sync + 'static,
{
    let evaluate = Arc::new(evaluate);
    let handles: Vec<_> = resumes
        .iter()
        .cloned()
        .map(|path| {
            let evaluate = Arc::clone(&evaluate);
            tokio::task::spawn_blocking(move || evaluate(&path))
        })
        .collect();

    let mut entries = Vec::with_capacity(handles.len());
    for (path, handle) in resumes.iter().zip(handles) {
        let entry = match handle.await {
            Ok(outcome) => {
                match &outcome {
                    Ok(result) => debug!("{}: overall {:.2}", path.display(), result.overall_score),
                    Err(failure) => warn!("{}: {}", path.display(), failure),
                }
                BatchEntry::from_outcome(path, outcome)
            }
            Err(e) => {
                warn!("{}: evaluation task failed: {}", path.display(), e);
                BatchEntry::failed(path, format!("evaluation task failed: {}", e))
            }
        };

        if let Some(bar) = progress {
            bar.inc(1);
        }
        entries.push(entry);
    }

    Ok(entries)
}
