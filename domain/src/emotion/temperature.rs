use super::EmotionVector;

pub const MIN_TEMPERATURE: f64 = 0.2;
pub const MAX_TEMPERATURE: f64 = 0.95;

const BASE: f64 = 0.5;

/// Sampling temperature for the response to this emotional state.
///
/// More aroused, more polarized and more confidently classified states get a
/// livelier response. Always within `[0.2, 0.95]`.
pub fn modulate(vector: &EmotionVector) -> f64 {
    let magnitude = vector.valence.abs();

    let intensity_bonus = if magnitude + vector.arousal > 1.2 {
        0.1
    } else if magnitude + vector.arousal < 0.3 {
        -0.1
    } else {
        0.0
    };

    let temperature = BASE
        + vector.arousal * 0.4
        + magnitude * 0.3
        + (vector.confidence - 0.5) * 0.4
        + intensity_bonus;

    temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}
