//! End-to-end evaluation driver.

use crate::ground_truth::GroundTruthMap;
use crate::prediction::PredictionParser;
use crate::report::{Evaluation, Reporter};
use crate::scorer::score_image;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Evaluate a predictions file against a ground-truth file.
///
/// Loads the ground truth fully into memory, then streams the predictions
/// file line by line: each parseable line is scored and reported to `out`
/// immediately, followed by the aggregate summary.
///
/// # Arguments
/// * `gt_path` - Path to the ground-truth JSON file
/// * `predictions_path` - Path to the predictions text file
/// * `out` - Sink for per-image diagnostics and the summary
///
/// # Returns
/// The accumulated [`Evaluation`] totals.
pub fn evaluate_files<P1, P2, W>(gt_path: P1, predictions_path: P2, out: W) -> Result<Evaluation>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    W: Write,
{
    let gt = GroundTruthMap::load(gt_path)?;

    let file = File::open(&predictions_path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!(
                "failed to open predictions file '{}': {}",
                predictions_path.as_ref().display(),
                e
            ),
        ))
    })?;

    let parser = PredictionParser::new();
    let mut reporter = Reporter::new(out);
    for line_result in BufReader::new(file).lines() {
        let line = line_result?;
        let Some((image, pred)) = parser.parse_line(&line) else {
            continue; // skipped lines are not counted
        };
        let record = gt.get(image);
        let score = score_image(record, &pred);
        reporter.record(image, record, &pred, &score)?;
    }
    reporter.finish()
}
