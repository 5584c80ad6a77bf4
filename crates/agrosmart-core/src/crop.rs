//! Crop yield prediction.

use tracing::debug;

use agrosmart_types::{CropPrediction, ValidationError};

use crate::error::Result;
use crate::sampler::Sampler;
use crate::util::round_to;

/// Yield (t/ha) used for crops missing from the table.
pub const DEFAULT_BASE_YIELD: f64 = 5.0;

pub const WEATHER_FACTOR: (f64, f64) = (0.85, 1.15);
pub const SOIL_FACTOR: (f64, f64) = (0.9, 1.1);
pub const CONFIDENCE: (f64, f64) = (78.0, 92.0);

const DRY_WEATHER_BELOW: f64 = 0.95;
const POOR_SOIL_BELOW: f64 = 0.98;

pub const IRRIGATION_ADVICE: &str = "Consider additional irrigation due to dry weather";
pub const SOIL_ADVICE: &str = "Soil analysis recommended for nutrient correction";
pub const PEST_ADVICE: &str = "Monitor pests and diseases weekly";

/// Base yield per hectare for `crop_type`.
///
/// Matching ignores case and surrounding whitespace, and accepts both the
/// Portuguese and English crop names.
///
/// ```
/// use agrosmart_core::crop::base_yield;
///
/// assert_eq!(base_yield("Milho"), 8.5);
/// assert_eq!(base_yield("soybean"), 3.2);
/// assert_eq!(base_yield("xyz"), 5.0);
/// ```
pub fn base_yield(crop_type: &str) -> f64 {
    match crop_type.trim().to_lowercase().as_str() {
        "milho" | "corn" | "maize" => 8.5,
        "soja" | "soy" | "soybean" | "soybeans" => 3.2,
        "trigo" | "wheat" => 4.8,
        "arroz" | "rice" => 6.1,
        "feijao" | "feijão" | "beans" | "bean" => 2.8,
        _ => DEFAULT_BASE_YIELD,
    }
}

fn validate(crop_type: &str, area_hectares: f64) -> std::result::Result<(), ValidationError> {
    if crop_type.trim().is_empty() {
        return Err(ValidationError::new("crop_type", "must not be empty"));
    }
    if !area_hectares.is_finite() || area_hectares <= 0.0 {
        return Err(ValidationError::new(
            "area_hectares",
            format!("must be a positive number, got {}", area_hectares),
        ));
    }
    Ok(())
}

/// Predict the yield of `crop_type` over `area_hectares`.
///
/// Draws a weather factor, a soil factor and a confidence, in that order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) for an empty
/// crop type or a non-positive area.
pub fn predict(
    crop_type: &str,
    area_hectares: f64,
    sampler: &mut dyn Sampler,
) -> Result<CropPrediction> {
    validate(crop_type, area_hectares)?;

    let weather_factor = sampler.uniform(WEATHER_FACTOR.0, WEATHER_FACTOR.1);
    let soil_factor = sampler.uniform(SOIL_FACTOR.0, SOIL_FACTOR.1);
    let confidence = sampler.uniform(CONFIDENCE.0, CONFIDENCE.1);

    let predicted_yield =
        round_to(base_yield(crop_type) * weather_factor * soil_factor * area_hectares, 2);
    debug!(
        crop_type,
        area_hectares, weather_factor, soil_factor, predicted_yield, "Predicted crop yield"
    );

    let mut recommendations = Vec::new();
    if weather_factor < DRY_WEATHER_BELOW {
        recommendations.push(IRRIGATION_ADVICE.to_string());
    }
    if soil_factor < POOR_SOIL_BELOW {
        recommendations.push(SOIL_ADVICE.to_string());
    }
    recommendations.push(PEST_ADVICE.to_string());

    Ok(CropPrediction {
        crop_type: crop_type.to_string(),
        area_hectares,
        predicted_yield,
        confidence: round_to(confidence, 1),
        recommendations,
    })
}
