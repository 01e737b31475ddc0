//! Per-image scoring of extracted predictions against ground truth.

use crate::bbox::iou;
use crate::ground_truth::GroundTruthRecord;
use crate::prediction::Prediction;

/// Flat bonus awarded for every overlapping same-class box pair.
pub const IOU_BONUS: i64 = 5;

/// One IoU comparison between a predicted box and a same-class ground-truth
/// box, recorded in comparison order for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct IouCheck {
    pub class: String,
    pub iou: f64,
}

impl IouCheck {
    /// Whether this comparison earns the flat bonus.
    pub fn awards_bonus(&self) -> bool {
        self.iou > 0.0
    }
}

/// The scoring outcome for a single image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageScore {
    /// Classification score: +1 per predicted class present in the ground
    /// truth, -1 per absent one, duplicates counted individually.
    pub base: i64,
    /// Every same-class box comparison performed, in order.
    pub checks: Vec<IouCheck>,
}

impl ImageScore {
    /// Number of comparisons that earned the bonus.
    pub fn bonus_count(&self) -> usize {
        self.checks.iter().filter(|c| c.awards_bonus()).count()
    }

    /// Base score plus all bonuses.
    pub fn total(&self) -> i64 {
        self.base + IOU_BONUS * self.bonus_count() as i64
    }
}

/// Score one image's prediction against its ground-truth record.
///
/// Predicted classes and boxes are paired positionally (the zip stops at the
/// shorter sequence). Each pair is compared against every ground-truth box
/// of the same class; every comparison is recorded, and each one with
/// IoU > 0 contributes an independent +5.
pub fn score_image(gt: &GroundTruthRecord, pred: &Prediction) -> ImageScore {
    let base = pred
        .classes
        .iter()
        .map(|c| if gt.classes.contains(c) { 1 } else { -1 })
        .sum();

    let mut checks = Vec::new();
    for (class, pred_box) in pred.classes.iter().zip(&pred.bboxes) {
        for gt_box in gt.bboxes.iter().filter(|g| &g.class == class) {
            checks.push(IouCheck {
                class: class.clone(),
                iou: iou(pred_box, &gt_box.bbox),
            });
        }
    }

    ImageScore { base, checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_truth::GtBox;
    use crate::BoundingBox;
    use approx::assert_relative_eq;

    fn gt_with(classes: &[&str], boxes: &[(&str, BoundingBox)]) -> GroundTruthRecord {
        GroundTruthRecord {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            bboxes: boxes
                .iter()
                .map(|(class, bbox)| GtBox {
                    class: class.to_string(),
                    bbox: *bbox,
                })
                .collect(),
        }
    }

    fn pred_with(classes: &[&str], boxes: &[BoundingBox]) -> Prediction {
        Prediction {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            bboxes: boxes.to_vec(),
        }
    }

    #[test]
    fn test_base_score_hits_and_misses() {
        let gt = gt_with(&["cat", "dog"], &[]);
        let score = score_image(&gt, &pred_with(&["cat", "bird", "dog"], &[]));
        assert_eq!(score.base, 1);
        assert_eq!(score.total(), 1);
    }

    #[test]
    fn test_duplicate_predictions_count_individually() {
        let gt = gt_with(&["cat"], &[]);
        let score = score_image(&gt, &pred_with(&["cat", "cat", "cat"], &[]));
        assert_eq!(score.base, 3);
        let score = score_image(&gt, &pred_with(&["dog", "dog"], &[]));
        assert_eq!(score.base, -2);
    }

    #[test]
    fn test_empty_prediction_scores_zero() {
        let gt = gt_with(&["cat"], &[]);
        let score = score_image(&gt, &Prediction::default());
        assert_eq!(score.base, 0);
        assert!(score.checks.is_empty());
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_exact_match_earns_bonus() {
        let b = BoundingBox::new(10.0, 10.0, 4.0, 4.0);
        let gt = gt_with(&["cat"], &[("cat", b)]);
        let score = score_image(&gt, &pred_with(&["cat"], &[b]));
        assert_eq!(score.base, 1);
        assert_eq!(score.checks.len(), 1);
        assert_relative_eq!(score.checks[0].iou, 1.0);
        assert_eq!(score.total(), 6);
    }

    #[test]
    fn test_disjoint_boxes_record_check_without_bonus() {
        let gt = gt_with(
            &["cat"],
            &[("cat", BoundingBox::new(100.0, 100.0, 4.0, 4.0))],
        );
        let score = score_image(
            &gt,
            &pred_with(&["cat"], &[BoundingBox::new(0.0, 0.0, 4.0, 4.0)]),
        );
        assert_eq!(score.checks.len(), 1);
        assert_relative_eq!(score.checks[0].iou, 0.0);
        assert_eq!(score.total(), 1);
    }

    #[test]
    fn test_multiple_gt_boxes_each_award_bonus() {
        let b = BoundingBox::new(10.0, 10.0, 4.0, 4.0);
        let gt = gt_with(&["cat"], &[("cat", b), ("cat", b)]);
        let score = score_image(&gt, &pred_with(&["cat"], &[b]));
        assert_eq!(score.bonus_count(), 2);
        assert_eq!(score.total(), 1 + 10);
    }

    #[test]
    fn test_positional_misalignment_limits_bonus() {
        // Two classes but one extracted box: only the first class is
        // eligible for a bonus, the second gets base scoring only.
        let b = BoundingBox::new(10.0, 10.0, 4.0, 4.0);
        let gt = gt_with(&["cat", "dog"], &[("cat", b), ("dog", b)]);
        let score = score_image(&gt, &pred_with(&["cat", "dog"], &[b]));
        assert_eq!(score.base, 2);
        assert_eq!(score.checks.len(), 1);
        assert_eq!(score.checks[0].class, "cat");
        assert_eq!(score.total(), 7);
    }

    #[test]
    fn test_class_mismatch_skips_gt_box() {
        let b = BoundingBox::new(10.0, 10.0, 4.0, 4.0);
        let gt = gt_with(&["dog"], &[("dog", b)]);
        let score = score_image(&gt, &pred_with(&["cat"], &[b]));
        assert_eq!(score.base, -1);
        assert!(score.checks.is_empty());
    }
}
