#[derive(Debug, Clone, Copy)]
pub struct MaintainabilityInputs {
    pub halstead_volume: f64,
    pub complexity: u32,
    pub logical_lines: u64,
    /// Comment lines as a percentage of source lines.
    pub comment_percent: f64,
}

/// Maintainability index rescaled to `[0, 100]`.
///
/// Sources without operators or without logical lines score 100.
pub fn compute(inputs: MaintainabilityInputs) -> f64 {
    if inputs.halstead_volume <= 0.0 || inputs.logical_lines == 0 {
        return 100.0;
    }
    let volume_scale = inputs.halstead_volume.ln();
    let lines_scale = (inputs.logical_lines as f64).ln();
    let comments_scale = (2.46 * inputs.comment_percent.to_radians()).sqrt();

    let raw = 171.0 - 5.2 * volume_scale - 0.23 * f64::from(inputs.complexity) - 16.2 * lines_scale
        + 50.0 * comments_scale.sin();
    (raw * 100.0 / 171.0).clamp(0.0, 100.0)
}
