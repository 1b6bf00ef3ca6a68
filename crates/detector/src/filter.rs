use crate::{
    error::{DetectorError, Result},
    types::Detection,
};

/// Keeps detections of one class whose score is at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionFilter {
    pub threshold: f32,
    pub target_label: i64,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            target_label: 1,
        }
    }
}

impl DetectionFilter {
    /// `threshold` must lie in `[0, 1]`; NaN is rejected.
    pub fn new(threshold: f32, target_label: i64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DetectorError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold, target_label })
    }

    pub fn accepts(&self, detection: &Detection) -> bool {
        detection.score >= self.threshold && detection.label == self.target_label
    }

    /// Filter in detector order.
    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|detection| self.accepts(detection))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask::ProbabilityMask;
    use proptest::prelude::*;

    fn detection(score: f32, label: i64) -> Detection {
        Detection::new(score, label, ProbabilityMask::new(2, 2))
    }

    fn scores(detections: &[Detection]) -> Vec<f32> {
        detections.iter().map(|d| d.score).collect()
    }

    #[test]
    fn defaults_match_two_class_model() {
        let filter = DetectionFilter::default();
        assert_eq!(filter.threshold, 0.6);
        assert_eq!(filter.target_label, 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let filter = DetectionFilter::default();
        assert!(filter.accepts(&detection(0.6, 1)));
        assert!(!filter.accepts(&detection(0.59, 1)));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(matches!(DetectionFilter::new(f32::NAN, 1), Err(DetectorError::InvalidThreshold(_))));
        assert!(DetectionFilter::new(1.2, 1).is_err());
        assert!(DetectionFilter::new(-0.1, 1).is_err());
        assert_eq!(DetectionFilter::new(0.0, 1).expect("lower bound").threshold, 0.0);
        assert_eq!(DetectionFilter::new(1.0, 1).expect("upper bound").threshold, 1.0);
    }

    #[test]
    fn keeps_detector_order() {
        let filter = DetectionFilter::default();
        let kept = filter.apply(vec![
            detection(0.7, 1),
            detection(0.95, 1),
            detection(0.3, 1),
            detection(0.8, 2),
            detection(0.65, 1),
        ]);
        assert_eq!(scores(&kept), vec![0.7, 0.95, 0.65]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(DetectionFilter::default().apply(Vec::new()).is_empty());
        assert!(DetectionFilter::default().apply(vec![detection(0.1, 1), detection(0.4, 1)]).is_empty());
    }

    fn arb_detections() -> impl Strategy<Value = Vec<(f32, i64)>> {
        prop::collection::vec((0.0f32..=1.0, 0i64..4), 0..32)
    }

    proptest! {
        #[test]
        fn raising_threshold_never_adds_detections(
            raw in arb_detections(),
            low in 0.0f32..=1.0,
            delta in 0.0f32..=1.0,
        ) {
            let high = (low + delta).min(1.0);
            let build = || raw.iter().map(|&(s, l)| detection(s, l)).collect::<Vec<_>>();

            let loose = scores(&DetectionFilter::new(low, 1).expect("valid threshold").apply(build()));
            let strict = scores(&DetectionFilter::new(high, 1).expect("valid threshold").apply(build()));

            prop_assert!(strict.len() <= loose.len());
            // Every survivor of the stricter filter also survives the looser one.
            let mut remaining = loose.iter();
            for score in &strict {
                prop_assert!(remaining.any(|s| s == score));
            }
        }

        #[test]
        fn other_labels_never_pass(raw in arb_detections(), threshold in 0.0f32..=1.0) {
            let detections = raw.iter().map(|&(s, l)| detection(s, l)).collect();
            let kept = DetectionFilter::new(threshold, 1).expect("valid threshold").apply(detections);
            prop_assert!(kept.iter().all(|d| d.label == 1 && d.score >= threshold));
        }
    }
}
