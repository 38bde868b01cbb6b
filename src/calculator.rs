use crate::models::Gender;

pub const WIDMARK_FACTOR_MALE: f64 = 0.68;
pub const WIDMARK_FACTOR_FEMALE: f64 = 0.55;
pub const WIDMARK_FACTOR_OTHER: f64 = (WIDMARK_FACTOR_MALE + WIDMARK_FACTOR_FEMALE) / 2.0;
/// Percent.
pub const TARGET_BAC: f64 = 0.1;
pub const ALCOHOL_GRAMS_PER_DRINK: f64 = 14.0;
/// Percent per hour.
pub const METABOLISM_RATE: f64 = 0.015;

pub fn widmark_factor(gender: &str) -> f64 {
    match Gender::parse(&gender.to_ascii_lowercase()) {
        Some(Gender::Male) => WIDMARK_FACTOR_MALE,
        Some(Gender::Female) => WIDMARK_FACTOR_FEMALE,
        _ => WIDMARK_FACTOR_OTHER,
    }
}

/// Additional standard drinks needed to reach [`TARGET_BAC`]. Weight in kg.
pub fn drinks_to_target(weight_kg: f64, gender: &str, current_drinks: i64) -> f64 {
    let r = widmark_factor(gender);
    let weight_grams = weight_kg * 1000.0;
    let total_alcohol_grams = (TARGET_BAC / 100.0) * weight_grams * r;
    let total_drinks = total_alcohol_grams / ALCOHOL_GRAMS_PER_DRINK;

    let additional = total_drinks - current_drinks as f64;
    if additional < 0.0 {
        return 0.0;
    }
    round_tenth(additional)
}

/// Hours until BAC returns to zero. Weight in kg.
pub fn time_to_sober(current_drinks: i64, weight_kg: f64, gender: &str) -> f64 {
    if current_drinks <= 0 {
        return 0.0;
    }

    let r = widmark_factor(gender);
    let weight_grams = weight_kg * 1000.0;
    let total_alcohol_grams = current_drinks as f64 * ALCOHOL_GRAMS_PER_DRINK;
    let current_bac = (total_alcohol_grams / (weight_grams * r)) * 100.0;

    round_tenth(current_bac / METABOLISM_RATE)
}

/// Rounds the exact binary value to one decimal, so 6.05 (stored just
/// below) becomes 6.0 rather than 6.1.
fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_gender_uses_mean_factor() {
        assert_eq!(widmark_factor("male"), 0.68);
        assert_eq!(widmark_factor("FEMALE"), 0.55);
        assert!((widmark_factor("other") - 0.615).abs() < 1e-12);
        assert!((widmark_factor("unknown") - 0.615).abs() < 1e-12);
    }

    #[test]
    fn drinks_to_target_for_sober_male() {
        // 80 kg * 1000 * 0.001 * 0.68 / 14 = 3.885...
        assert_eq!(drinks_to_target(80.0, "male", 0), 3.9);
        assert_eq!(drinks_to_target(80.0, "male", 2), 1.9);
    }

    #[test]
    fn rounding_follows_the_stored_value_not_the_scaled_one() {
        // 154 * 0.55 / 14 = 6.05, held as 6.0499...
        assert_eq!(drinks_to_target(154.0, "female", 0), 6.0);
        assert_eq!(round_tenth(3.8857), 3.9);
    }

    #[test]
    fn drinks_to_target_clamps_at_zero() {
        assert_eq!(drinks_to_target(50.0, "female", 10), 0.0);
    }

    #[test]
    fn time_to_sober_is_zero_without_drinks() {
        assert_eq!(time_to_sober(0, 70.0, "male"), 0.0);
        assert_eq!(time_to_sober(-3, 70.0, "male"), 0.0);
    }

    #[test]
    fn time_to_sober_scales_with_drinks() {
        // 3 * 14 / (70000 * 0.68) * 100 = 0.0882...; / 0.015 = 5.88
        assert_eq!(time_to_sober(3, 70.0, "male"), 5.9);
        assert!(time_to_sober(3, 70.0, "female") > time_to_sober(3, 70.0, "male"));
    }
}
