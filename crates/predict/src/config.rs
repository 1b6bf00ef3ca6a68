use mask::AreaConvention;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::report::ObjectResult;

/// Knobs of the post-processing pipeline. Every field has a default, so a
/// partial TOML/JSON table is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum detection confidence (inclusive)
    pub threshold: f32,
    /// Class id to keep
    pub target_label: i64,
    /// Mask probability above which a pixel is foreground
    pub mask_threshold: f32,
    pub area: AreaConvention,
    /// Drop contours smaller than this many pixels; off when unset
    pub min_area: Option<f32>,
    pub order: ResultOrder,
    pub annotation: AnnotationStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            target_label: 1,
            mask_threshold: 0.5,
            area: AreaConvention::default(),
            min_area: None,
            order: ResultOrder::default(),
            annotation: AnnotationStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// RGB
    pub color: [u8; 3],
    pub line_width: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 255],
            line_width: 2,
        }
    }
}

/// Order in which results are reported.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResultOrder {
    /// Detector order, then contour tracer order
    #[default]
    Native,
    /// Highest score first; ties keep their native order
    ScoreDescending,
}

impl ResultOrder {
    pub fn apply(&self, results: &mut [ObjectResult]) {
        match self {
            ResultOrder::Native => {}
            ResultOrder::ScoreDescending => {
                results.sort_by(|a, b| b.score.total_cmp(&a.score));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.threshold, 0.6);
        assert_eq!(config.target_label, 1);
        assert_eq!(config.mask_threshold, 0.5);
        assert_eq!(config.min_area, None);
        assert_eq!(config.order, ResultOrder::Native);
        assert_eq!(config.annotation.color, [0, 0, 255]);
        assert_eq!(config.annotation.line_width, 2);
    }

    #[test]
    fn score_descending_is_stable() {
        let mut results = vec![
            ObjectResult { score: 0.7, area: 1.0 },
            ObjectResult { score: 0.9, area: 2.0 },
            ObjectResult { score: 0.7, area: 3.0 },
            ObjectResult { score: 0.9, area: 4.0 },
        ];
        ResultOrder::ScoreDescending.apply(&mut results);

        let areas: Vec<f32> = results.iter().map(|r| r.area).collect();
        assert_eq!(areas, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn native_order_is_untouched() {
        let mut results = vec![
            ObjectResult { score: 0.6, area: 1.0 },
            ObjectResult { score: 0.9, area: 2.0 },
        ];
        ResultOrder::Native.apply(&mut results);
        assert_eq!(results[0].score, 0.6);
    }

    #[test]
    fn order_parses_from_kebab_case() {
        assert_eq!("score-descending".parse::<ResultOrder>().ok(), Some(ResultOrder::ScoreDescending));
        assert_eq!(ResultOrder::Native.to_string(), "native");
    }
}
