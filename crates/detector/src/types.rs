use mask::ProbabilityMask;

/// One candidate object instance produced by a [`Detector`](crate::Detector).
#[derive(Debug, Clone)]
pub struct Detection {
    /// Confidence in `[0, 1]`
    pub score: f32,
    /// Class id; 0 is background for two-class models
    pub label: i64,
    /// Foreground probability per image pixel
    pub mask: ProbabilityMask,
}

impl Detection {
    pub fn new(score: f32, label: i64, mask: ProbabilityMask) -> Self {
        Self { score, label, mask }
    }
}
