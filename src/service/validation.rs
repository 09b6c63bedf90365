//! Request validation: turn a JSON object into a typed insert, or say which field is wrong.

use crate::error::AppError;
use crate::model::{NewAdoptionRequest, NewPet};
use regex::Regex;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate an add-pet body. Any `status` in the body is ignored.
    pub fn new_pet(body: &Map<String, Value>) -> Result<NewPet, AppError> {
        Ok(NewPet {
            name: required_text(body, "name")?,
            kind: required_text(body, "type")?,
            breed: required_text(body, "breed")?,
            age: required_count(body, "age")?,
            gender: required_enum(body, "gender")?,
            size: required_text(body, "size")?,
            weight: required_count(body, "weight")?,
            color: required_text(body, "color")?,
            vaccinated: required_enum(body, "vaccinated")?,
            personality: required_text(body, "personality")?,
            training: optional_text(body, "training")?,
            compatibility_pets: optional_text(body, "compatibility_pets")?,
            compatibility_kids: optional_text(body, "compatibility_kids")?,
            special_needs: required_text(body, "special_needs")?,
            image: required_text(body, "image")?,
        })
    }

    /// Validate an adoption request body. Any `status` in the body is ignored.
    pub fn new_adoption(body: &Map<String, Value>) -> Result<NewAdoptionRequest, AppError> {
        let req = NewAdoptionRequest {
            name: required_text(body, "name")?,
            email: required_text(body, "email")?,
            phone: required_text(body, "phone")?,
            address: required_text(body, "address")?,
            pet_id: required_id(body, "pet_id")?,
        };
        if !email_regex().is_match(&req.email) {
            return Err(AppError::Validation(format!(
                "email '{}' is not a valid address",
                req.email
            )));
        }
        Ok(req)
    }
}

/// Parse a path segment as a row id.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Absent and `null` both count as missing.
fn required<'a>(body: &'a Map<String, Value>, field: &str) -> Result<&'a Value, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(AppError::MissingField(field.to_string())),
        Some(v) => Ok(v),
    }
}

fn required_text(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    required(body, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", field)))
}

fn optional_text(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AppError::Validation(format!("{} must be a string", field))),
    }
}

fn required_count(body: &Map<String, Value>, field: &str) -> Result<i64, AppError> {
    required(body, field)?
        .as_i64()
        .filter(|n| *n >= 0)
        .ok_or_else(|| AppError::Validation(format!("{} must be a non-negative integer", field)))
}

fn required_id(body: &Map<String, Value>, field: &str) -> Result<i64, AppError> {
    required(body, field)?
        .as_i64()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::Validation(format!("{} must be a positive integer", field)))
}

fn required_enum<T>(body: &Map<String, Value>, field: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    required_text(body, field)?
        .parse::<T>()
        .map_err(|e| AppError::Validation(format!("{}: {}", field, e)))
}
