//! Input validation for the space model.
//!
//! Every record is checked here before it reaches a presentation consumer:
//! on publish, on edit (against the merged result), and after every fetch,
//! so a malformed document in the store surfaces as a validation error
//! instead of leaking into the UI.

use crate::error::{Error, Result};
use crate::models::spaces::Space;

/// Validates every invariant a [`Space`] must satisfy.
///
/// # Returns
/// * `Ok(())` if the record is well formed
/// * `Err(Error::Validation)` naming the first violated invariant
pub fn validate_space(space: &Space) -> Result<()> {
    validate_non_empty("name", &space.name)?;
    validate_non_empty("address", &space.address)?;
    validate_non_empty("geoAddress", &space.geo_address)?;
    validate_non_empty("contactLine", &space.contact_line)?;

    if space.working_time.start >= space.working_time.end {
        return Err(Error::Validation(format!(
            "Working time start must precede end (got {})",
            space.working_time
        )));
    }

    if space.min_duration < 1 {
        return Err(Error::Validation(
            "Minimum booking duration must be at least 1 minute".to_string(),
        ));
    }

    if space.min_duration > space.max_duration {
        return Err(Error::Validation(format!(
            "Minimum duration ({} min) exceeds maximum duration ({} min)",
            space.min_duration, space.max_duration
        )));
    }

    if space.min_charge < 0.0 || space.max_charge < 0.0 {
        return Err(Error::Validation(
            "Charges cannot be negative".to_string(),
        ));
    }

    if space.min_charge > space.max_charge {
        return Err(Error::Validation(format!(
            "Minimum charge ({}) exceeds maximum charge ({})",
            space.min_charge, space.max_charge
        )));
    }

    if let (Some(created_at), Some(updated_at)) = (space.created_at, space.updated_at) {
        if created_at > updated_at {
            return Err(Error::Validation(
                "Created timestamp cannot follow updated timestamp".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}
