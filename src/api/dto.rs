use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Student as exposed over HTTP.
///
/// The name limit (50) is tighter than the column limit (150). Rows written by
/// other tools can hold names this shape rejects. Missing text fields become empty and
/// fail validation; a missing `dob` is a parse error since there is no sensible default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Student Name is required and must be at most 50 characters"))]
    pub student_name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "The Email field is required."),
        email(message = "Enter Valid Email")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "The Address field is required."))]
    pub address: String,

    #[serde(deserialize_with = "date_or_datetime")]
    pub dob: NaiveDateTime,
}

/// Accepts `2000-12-12T00:00:00` as well as a bare `2000-12-12`.
fn date_or_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginDto {
    #[serde(alias = "Username")]
    #[validate(length(min = 1))]
    pub username: String,

    #[serde(alias = "Password")]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub username: String,
    pub token: String,
}
