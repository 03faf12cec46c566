// ABOUTME: Body mass index and body-fat percentage estimates with category labels
// ABOUTME: Uses the Deurenberg adult formula; values are rounded to two decimals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use companion_core::constants::error_messages::INCOMPLETE_HEALTH_DATA;
use companion_core::errors::{AppError, AppResult};
use serde::Serialize;

/// Profile values the calculation needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMeasurements {
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Age in years
    pub age: u32,
    /// Free-text gender; `male` (any case) selects the male formula and ranges
    pub gender: String,
}

impl BodyMeasurements {
    fn is_male(&self) -> bool {
        self.gender.eq_ignore_ascii_case("male")
    }

    fn is_complete(&self) -> bool {
        self.weight > 0.0 && self.height > 0.0 && self.age > 0 && !self.gender.trim().is_empty()
    }
}

/// BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 to below 25
    #[serde(rename = "Normal weight")]
    NormalWeight,
    /// 25 to below 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Body-fat classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyFatCategory {
    /// Minimum physiological fat
    #[serde(rename = "Essential fat")]
    EssentialFat,
    /// Athletic range
    Athletes,
    /// Fit range
    Fitness,
    /// Typical range
    Average,
    /// Above typical range
    Obese,
}

impl BodyFatCategory {
    /// Classify a body-fat percentage using sex-specific thresholds
    #[must_use]
    pub fn from_percentage(bfp: f64, male: bool) -> Self {
        let [essential, athletes, fitness, average] = if male {
            [6.0, 14.0, 18.0, 25.0]
        } else {
            [14.0, 21.0, 25.0, 32.0]
        };
        if bfp < essential {
            Self::EssentialFat
        } else if bfp < athletes {
            Self::Athletes
        } else if bfp < fitness {
            Self::Fitness
        } else if bfp < average {
            Self::Average
        } else {
            Self::Obese
        }
    }
}

/// Computed metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMetrics {
    /// Body mass index, two decimals
    pub bmi: f64,
    /// Estimated body-fat percentage, two decimals
    pub bfp: f64,
    /// BMI classification
    pub bmi_category: BmiCategory,
    /// Body-fat classification
    pub bfp_category: BodyFatCategory,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate BMI and body-fat percentage
///
/// # Errors
///
/// Returns `InvalidInput` when weight or height is not positive, age is zero,
/// or gender is blank.
pub fn calculate(measurements: &BodyMeasurements) -> AppResult<HealthMetrics> {
    if !measurements.is_complete() {
        return Err(AppError::invalid_input(INCOMPLETE_HEALTH_DATA));
    }

    let height_m = measurements.height / 100.0;
    let bmi = measurements.weight / (height_m * height_m);
    let male = measurements.is_male();
    let sex_term = if male { 10.8 } else { 0.0 };
    let bfp = 1.20f64.mul_add(bmi, 0.23 * f64::from(measurements.age)) - sex_term - 5.4;

    // Categories use unrounded values
    Ok(HealthMetrics {
        bmi: round2(bmi),
        bfp: round2(bfp),
        bmi_category: BmiCategory::from_bmi(bmi),
        bfp_category: BodyFatCategory::from_percentage(bfp, male),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::errors::ErrorCode;

    fn measurements(weight: f64, height: f64, age: u32, gender: &str) -> BodyMeasurements {
        BodyMeasurements {
            weight,
            height,
            age,
            gender: gender.to_owned(),
        }
    }

    #[test]
    fn test_male_metrics() {
        let metrics = calculate(&measurements(70.0, 175.0, 30, "Male")).unwrap();
        assert!((metrics.bmi - 22.86).abs() < 1e-9);
        // 1.2 * 22.857 + 6.9 - 10.8 - 5.4
        assert!((metrics.bfp - 18.13).abs() < 1e-9);
        assert_eq!(metrics.bmi_category, BmiCategory::NormalWeight);
        assert_eq!(metrics.bfp_category, BodyFatCategory::Average);
    }

    #[test]
    fn test_female_metrics() {
        let metrics = calculate(&measurements(60.0, 165.0, 25, "female")).unwrap();
        assert!((metrics.bmi - 22.04).abs() < 1e-9);
        assert!((metrics.bfp - 26.8).abs() < 0.01);
        assert_eq!(metrics.bfp_category, BodyFatCategory::Average);
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_category_labels_serialize_for_display() {
        let json = serde_json::to_value(BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, "Normal weight");
        let json = serde_json::to_value(BodyFatCategory::EssentialFat).unwrap();
        assert_eq!(json, "Essential fat");
    }

    #[test]
    fn test_incomplete_data_is_rejected() {
        for incomplete in [
            measurements(0.0, 175.0, 30, "male"),
            measurements(70.0, 0.0, 30, "male"),
            measurements(70.0, 175.0, 0, "male"),
            measurements(70.0, 175.0, 30, " "),
        ] {
            let err = calculate(&incomplete).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
    }
}
