//! Decoding of the `data` query parameter carried by every resource route.
//!
//! Browsers send the location either as bracketed form fields
//! (`data[id]=1&data[latitude]=47.6`) or as one JSON document
//! (`data={"id":1,"latitude":47.6}`). Both decode to the same [`Location`].

use std::collections::HashMap;
use std::str::FromStr;

use serde_json::Value;

use super::ApiError;
use super::validation::{validate_coordinates, validate_location_id};
use crate::models::Location;

pub fn location_from_query(raw: Option<&str>) -> Result<Location, ApiError> {
    let fields = collect_fields(raw.unwrap_or_default())?;
    if fields.is_empty() {
        return Err(ApiError::validation("Missing `data` query parameter"));
    }

    let id = validate_location_id(parse_field(&fields, "id")?)?;
    let (latitude, longitude) = validate_coordinates(
        parse_field(&fields, "latitude")?,
        parse_field(&fields, "longitude")?,
    )?;

    Ok(Location {
        id,
        search_query: fields.get("search_query").cloned().unwrap_or_default(),
        formatted_query: fields.get("formatted_query").cloned().unwrap_or_default(),
        latitude,
        longitude,
        created_at: fields
            .get("created_at")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
    })
}

fn collect_fields(raw: &str) -> Result<HashMap<String, String>, ApiError> {
    let mut fields = HashMap::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if key == "data" {
            let Value::Object(map) = serde_json::from_str(&value)
                .map_err(|e| ApiError::validation(format!("`data` is not valid JSON: {e}")))?
            else {
                return Err(ApiError::validation("`data` must be a JSON object"));
            };

            for (name, value) in map {
                let text = match value {
                    Value::String(s) => s,
                    Value::Null => continue,
                    other => other.to_string(),
                };
                fields.insert(name, text);
            }
        } else if let Some(name) = key
            .strip_prefix("data[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            fields.insert(name.to_string(), value.into_owned());
        }
    }

    Ok(fields)
}

fn parse_field<T: FromStr>(fields: &HashMap<String, String>, name: &str) -> Result<T, ApiError> {
    let raw = fields
        .get(name)
        .ok_or_else(|| ApiError::validation(format!("Location is missing `{name}`")))?;

    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Location field `{name}` is invalid: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_fields() {
        let location = location_from_query(Some(
            "data%5Bid%5D=7&data%5Bsearch_query%5D=seattle&data%5Bformatted_query%5D=Seattle%2C+WA%2C+USA&data%5Blatitude%5D=47.6062095&data%5Blongitude%5D=-122.3320708",
        ))
        .unwrap();

        assert_eq!(location.id, 7);
        assert_eq!(location.search_query, "seattle");
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
        assert!((location.latitude - 47.606_209_5).abs() < 1e-9);
    }

    #[test]
    fn json_document() {
        let location = location_from_query(Some(
            "data=%7B%22id%22%3A3%2C%22latitude%22%3A47.6%2C%22longitude%22%3A-122.3%2C%22search_query%22%3A%22seattle%22%7D",
        ))
        .unwrap();

        assert_eq!(location.id, 3);
        assert_eq!(location.search_query, "seattle");
        assert_eq!(location.formatted_query, "");
    }

    #[test]
    fn missing_data_is_rejected() {
        assert!(matches!(
            location_from_query(None),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(
            location_from_query(Some("other=1")),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_or_bad_fields_are_rejected() {
        let missing_id = location_from_query(Some("data[latitude]=1&data[longitude]=2"));
        assert!(matches!(missing_id, Err(ApiError::ValidationError(m)) if m.contains("`id`")));

        let bad_lat = location_from_query(Some("data[id]=1&data[latitude]=north&data[longitude]=2"));
        assert!(matches!(bad_lat, Err(ApiError::ValidationError(m)) if m.contains("latitude")));

        let not_object = location_from_query(Some("data=%5B1%2C2%5D"));
        assert!(matches!(not_object, Err(ApiError::ValidationError(_))));
    }
}
