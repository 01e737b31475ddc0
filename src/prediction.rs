//! Best-effort prediction extraction from raw model output.
//!
//! Each prediction line is `<image_id><space><payload>` where the payload is
//! whatever the model produced, including truncated or unbalanced text.
//! Extraction therefore never parses the payload as a whole: classes, bbox
//! blocks, and the numeric fields inside a block are each found by
//! independent pattern scans, so one broken field never disqualifies the
//! rest of the line.

use crate::BoundingBox;
use regex::Regex;

/// Bounding-box field names, in the order they fill a [`BoundingBox`].
const BBOX_FIELDS: [&str; 4] = ["center_x", "center_y", "size_x", "size_y"];

/// Classes and boxes extracted from one prediction line.
///
/// Both sequences preserve order of appearance in the payload. They are
/// aligned positionally (the i-th class pairs with the i-th box) and their
/// lengths may differ: a dropped malformed box shortens `bboxes` and shifts
/// the alignment for everything after it. That quirk is part of the scoring
/// contract and is deliberately not corrected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    pub classes: Vec<String>,
    pub bboxes: Vec<BoundingBox>,
}

/// Regex-based parser for prediction lines.
///
/// Compile the patterns once and reuse the parser across lines.
#[derive(Debug)]
pub struct PredictionParser {
    class_re: Regex,
    bbox_re: Regex,
    field_res: [Regex; 4],
}

impl Default for PredictionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionParser {
    /// Create a parser with the extraction patterns compiled.
    pub fn new() -> Self {
        let field_re = |name: &str| {
            Regex::new(&format!(r"'{}'\s*:\s*([0-9.+\-eE,]+)", name)).expect("hard-coded pattern")
        };
        Self {
            class_re: Regex::new(r"'class'\s*:\s*'([^']+)'").expect("hard-coded pattern"),
            bbox_re: Regex::new(r"'bbox'\s*:\s*\{[^}]*\}").expect("hard-coded pattern"),
            field_res: BBOX_FIELDS.map(field_re),
        }
    }

    /// Split a raw line into its image identifier and extracted prediction.
    ///
    /// Returns `None` for lines that are empty after trimming or that hold
    /// no space separator; such lines are skipped entirely and must not be
    /// counted by the caller.
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<(&'a str, Prediction)> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (image, payload) = line.split_once(' ')?;
        Some((image, self.parse_payload(payload)))
    }

    /// Extract classes and boxes from a payload, in order of appearance.
    pub fn parse_payload(&self, payload: &str) -> Prediction {
        let classes = self
            .class_re
            .captures_iter(payload)
            .map(|c| c[1].to_string())
            .collect();
        let bboxes = self
            .bbox_re
            .find_iter(payload)
            .filter_map(|m| self.parse_bbox_block(m.as_str()))
            .collect();
        Prediction { classes, bboxes }
    }

    /// Extract the four numeric fields from one `'bbox': {...}` substring.
    ///
    /// Only the first occurrence of each field is considered; a trailing
    /// comma after the number is tolerated. Returns `None` (dropping the
    /// box) unless all four fields are present and parse as floats.
    fn parse_bbox_block(&self, block: &str) -> Option<BoundingBox> {
        let mut fields = [0.0_f64; 4];
        for (slot, re) in fields.iter_mut().zip(&self.field_res) {
            let captures = re.captures(block)?;
            let raw = captures[1].trim_end_matches(',');
            *slot = raw.parse().ok()?;
        }
        let [center_x, center_y, size_x, size_y] = fields;
        Some(BoundingBox::new(center_x, center_y, size_x, size_y))
    }
}
