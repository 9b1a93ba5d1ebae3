use super::ApiError;

pub fn validate_location_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid location ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(f64, f64), ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation(format!(
            "Invalid latitude: {}. Latitude must be between -90 and 90",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation(format!(
            "Invalid longitude: {}. Longitude must be between -180 and 180",
            longitude
        )));
    }

    Ok((latitude, longitude))
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location_id() {
        assert!(validate_location_id(1).is_ok());
        assert!(validate_location_id(12345).is_ok());
        assert!(validate_location_id(0).is_err());
        assert!(validate_location_id(-1).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(47.6, -122.3).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  seattle  ").unwrap(), "seattle");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
        assert_eq!(validate_search_query(&"a".repeat(500)).unwrap().len(), 500);
    }
}
