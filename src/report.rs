//! Streaming per-image reporting and score aggregation.
//!
//! Output is written as each image is scored, not batched, and matches the
//! reference evaluation script format line for line: a diagnostic header per
//! image, an indented line per IoU comparison, an indented line per awarded
//! bonus, and a final summary.

use crate::ground_truth::GroundTruthRecord;
use crate::prediction::Prediction;
use crate::scorer::{ImageScore, IOU_BONUS};
use crate::Result;
use std::io::Write;

/// Aggregate totals over one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluation {
    /// Sum of all per-image totals, bonuses included.
    pub total_score: i64,
    /// Number of prediction lines that were scored (skipped lines excluded).
    pub count: u64,
}

impl Evaluation {
    /// Average score per scored image; 0.0 when nothing was scored.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_score as f64 / self.count as f64
        }
    }
}

/// Writes per-image diagnostics to a sink while accumulating totals.
pub struct Reporter<W: Write> {
    out: W,
    totals: Evaluation,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            totals: Evaluation::default(),
        }
    }

    /// Report one scored image and fold it into the running totals.
    ///
    /// The header shows the base classification score; each bonus line then
    /// shows the image score as it stood after that bonus was applied.
    pub fn record(
        &mut self,
        image: &str,
        gt: &GroundTruthRecord,
        pred: &Prediction,
        score: &ImageScore,
    ) -> Result<()> {
        let mut gt_classes: Vec<&str> = gt.classes.iter().map(String::as_str).collect();
        gt_classes.sort_unstable();
        writeln!(
            self.out,
            "{}: GT={}, Pred={}, Score={}",
            image,
            quoted_list(&gt_classes),
            quoted_list(&pred.classes),
            score.base
        )?;

        let mut running = score.base;
        for check in &score.checks {
            writeln!(self.out, "    IoU ({}): {:.4}", check.class, check.iou)?;
            if check.awards_bonus() {
                running += IOU_BONUS;
                writeln!(
                    self.out,
                    "    +{} bonus for IoU>0 → Updated Score: {}",
                    IOU_BONUS, running
                )?;
            }
        }

        self.totals.total_score += score.total();
        self.totals.count += 1;
        Ok(())
    }

    /// Write the summary lines and return the accumulated totals.
    pub fn finish(mut self) -> Result<Evaluation> {
        writeln!(
            self.out,
            "Total Score: {}, Average Score per image: {:.2}",
            self.totals.total_score,
            self.totals.average()
        )?;
        // Kept for output compatibility with the reference script, whose MSE
        // accumulator is never incremented.
        writeln!(
            self.out,
            "No BBox MSE computed (no valid preds or no GT bboxes)."
        )?;
        Ok(self.totals)
    }

    /// Totals accumulated so far.
    pub fn totals(&self) -> Evaluation {
        self.totals
    }
}

/// Format strings as a Python-repr style list: `['a', 'b']`, `[]` if empty.
fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
