//! # Detscore - Detection Prediction Scoring
//!
//! Scores a set of model-produced object-detection predictions against a
//! ground-truth annotation set.
//!
//! Ground truth is a JSON file of conversation records whose assistant reply
//! embeds a `detections` list. Predictions are a plain-text file with one
//! line per image, holding free-form (possibly truncated or malformed) model
//! output. Per image, each predicted class scores +1 if present in the
//! ground truth and -1 otherwise, and every predicted box that overlaps a
//! ground-truth box of the same class earns a flat +5 bonus.
//!
//! ## Example
//!
//! ```rust,ignore
//! use detscore::evaluate_files;
//!
//! let stdout = std::io::stdout();
//! let evaluation = evaluate_files("validation.json", "message.txt", stdout.lock())?;
//! println!("average: {:.2}", evaluation.average());
//! ```

pub mod bbox;
pub mod evaluation;
pub mod ground_truth;
pub mod literal;
pub mod prediction;
pub mod report;
pub mod scorer;

// Re-exports for convenience
pub use bbox::BoundingBox;
pub use evaluation::evaluate_files;
pub use ground_truth::{GroundTruthMap, GroundTruthRecord, GtBox};
pub use prediction::{Prediction, PredictionParser};
pub use report::{Evaluation, Reporter};
pub use scorer::{score_image, ImageScore, IouCheck};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while loading inputs or streaming results.
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid ground truth document: {0}")]
        GroundTruth(#[from] serde_json::Error),

        #[error("Literal parse error: {0}")]
        Literal(String),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for detscore operations
    pub type Result<T> = std::result::Result<T, Error>;
}
