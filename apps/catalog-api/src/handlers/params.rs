//! Query string and path parsing shared by the handlers.

use std::collections::HashMap;

use catalog_core::validation::parse_id;
use catalog_core::{SearchParams, SortDirection, ValidationError};

/// Builds [`SearchParams`] from raw query pairs.
///
/// Empty values count as absent. Missing `limit`/`offset` get defaults and
/// the result is bounds-checked.
///
/// ## Recognized Keys
/// | Key      | Type    |
/// |----------|---------|
/// | `sort`   | asc/desc|
/// | `title`  | text    |
/// | `name`   | text    |
/// | `limit`  | integer |
/// | `offset` | integer |
/// | `min`    | float   |
/// | `max`    | float   |
pub fn parse_search_params(
    raw: &HashMap<String, String>,
    default_limit: i64,
) -> Result<SearchParams, ValidationError> {
    let value = |key: &str| raw.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let params = SearchParams {
        sort: value("sort").map(str::parse::<SortDirection>).transpose()?,
        title: value("title").map(str::to_string),
        name: value("name").map(str::to_string),
        limit: value("limit").map(|v| parse_integer("limit", v)).transpose()?,
        offset: value("offset").map(|v| parse_integer("offset", v)).transpose()?,
        min: value("min").map(|v| parse_float("min", v)).transpose()?,
        max: value("max").map(|v| parse_float("max", v)).transpose()?,
    }
    .with_defaults(default_limit);

    params.validate()?;
    Ok(params)
}

/// Parses a product id path segment.
pub fn product_id(raw: &str) -> Result<i64, ValidationError> {
    parse_id("product", raw)
}

/// Parses a category id path segment.
pub fn category_id(raw: &str) -> Result<i64, ValidationError> {
    parse_id("category", raw)
}

fn parse_integer(field: &str, value: &str) -> Result<i64, ValidationError> {
    value.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        expected: "an integer",
        value: value.to_string(),
    })
}

fn parse_float(field: &str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: field.to_string(),
            expected: "a float",
            value: value.to_string(),
        })
}
