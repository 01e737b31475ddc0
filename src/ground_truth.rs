//! Ground-truth annotation loading.
//!
//! The ground-truth file is a JSON array of conversation records. Each
//! record names an image and carries a list of conversation turns; the first
//! turn attributed to the assistant role embeds a `detections` list as a
//! Python-style literal, which goes through [`crate::literal`] rather than a
//! strict JSON parse.
//!
//! A malformed reply payload degrades that single image to an empty record;
//! it never aborts the load. Only an unreadable file or an unparseable
//! outer JSON document is fatal.

use crate::literal::{self, Value};
use crate::{BoundingBox, Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

/// Role string marking the assistant reply in a conversation record.
pub const ASSISTANT_ROLE: &str = "gpt";

/// A ground-truth bounding box together with its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct GtBox {
    pub class: String,
    pub bbox: BoundingBox,
}

/// Expected detections for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruthRecord {
    /// Deduplicated set of expected class labels.
    pub classes: HashSet<String>,
    /// One entry per detection that has both a class and a bounding box.
    pub bboxes: Vec<GtBox>,
}

impl GroundTruthRecord {
    /// Parse one assistant reply payload into a record.
    ///
    /// The payload must be a dict literal with a `detections` list. Any
    /// parse failure or shape violation (a non-dict detection, a bbox that
    /// is not a four-field numeric dict) degrades the whole payload to an
    /// empty record.
    pub fn from_payload(payload: &str) -> Self {
        parse_payload(payload).unwrap_or_default()
    }
}

fn parse_payload(payload: &str) -> Result<GroundTruthRecord> {
    let value = literal::parse(payload)?;
    let mut record = GroundTruthRecord::default();
    let detections = match value.get("detections") {
        Some(v) => v
            .as_list()
            .ok_or_else(|| Error::Literal("'detections' is not a list".to_string()))?,
        None => return Ok(record),
    };
    for det in detections {
        let class = match det.get("class") {
            Some(v) => v
                .as_str()
                .ok_or_else(|| Error::Literal("'class' is not a string".to_string()))?,
            None => continue,
        };
        record.classes.insert(class.to_string());
        if let Some(bbox_value) = det.get("bbox") {
            record.bboxes.push(GtBox {
                class: class.to_string(),
                bbox: bbox_from_value(bbox_value)?,
            });
        }
    }
    Ok(record)
}

fn bbox_from_value(value: &Value) -> Result<BoundingBox> {
    let field = |name: &str| -> Result<f64> {
        value
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::Literal(format!("bbox is missing numeric '{}'", name)))
    };
    Ok(BoundingBox::new(
        field("center_x")?,
        field("center_y")?,
        field("size_x")?,
        field("size_y")?,
    ))
}

/// Raw JSON shape of the ground-truth file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    image: Option<String>,
    #[serde(default)]
    conversations: Vec<RawTurn>,
}

#[derive(Debug, Deserialize)]
struct RawTurn {
    #[serde(default)]
    from: String,
    #[serde(default)]
    value: String,
}

/// Ground-truth records keyed by image identifier.
#[derive(Debug, Default)]
pub struct GroundTruthMap {
    records: HashMap<String, GroundTruthRecord>,
}

impl GroundTruthMap {
    /// Load the ground-truth map from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to open ground truth file '{}': {}",
                    path.as_ref().display(),
                    e
                ),
            ))
        })?;
        let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_raw(raw))
    }

    /// Load the ground-truth map from an in-memory JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: Vec<RawRecord>) -> Self {
        let mut records = HashMap::new();
        for rec in raw {
            let Some(image) = rec.image else { continue };
            // first assistant turn wins; records without one stay absent
            if let Some(turn) = rec.conversations.iter().find(|t| t.from == ASSISTANT_ROLE) {
                records.insert(image, GroundTruthRecord::from_payload(&turn.value));
            }
        }
        Self { records }
    }

    /// Look up the record for an image, defaulting to the empty record.
    pub fn get(&self, image: &str) -> &GroundTruthRecord {
        static EMPTY: OnceLock<GroundTruthRecord> = OnceLock::new();
        self.records
            .get(image)
            .unwrap_or_else(|| EMPTY.get_or_init(GroundTruthRecord::default))
    }

    /// Number of images with a ground-truth record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
