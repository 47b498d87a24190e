//! Request payload validation
//!
//! Bodies are checked field by field in declaration order and the first
//! failure is reported. Messages quote the offending field path, e.g.
//! `"fullName.firstName" is required`.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::{
    Order,
    user::{Address, FullName, UserPayload},
};

const USER_FIELDS: &[&str] = &[
    "userId", "username", "password", "fullName", "age", "email", "isActive", "hobbies", "address",
];
const FULL_NAME_FIELDS: &[&str] = &["firstName", "lastName"];
const ADDRESS_FIELDS: &[&str] = &["street", "city", "country"];
const ORDER_FIELDS: &[&str] = &["productName", "price", "quantity"];

/// First structural problem found in a request payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{description}")]
pub struct ValidationError {
    description: String,
}

impl ValidationError {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    fn at(path: &str, problem: &str) -> Self {
        Self::new(format!("\"{}\" {}", path, problem))
    }

    /// Human-readable description of the failure
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Parse a raw request body; an empty body counts as `{}`
pub fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|_| ValidationError::new("Request body must be valid JSON"))
}

/// Validate a user create/update body
pub fn validate_user_payload(body: &Value) -> Result<UserPayload, ValidationError> {
    let object = as_object(body, "value")?;

    let user_id = required(object, "userId", integer)?;
    let username = required(object, "username", string)?;
    let password = required(object, "password", string)?;
    let full_name = optional(object, "fullName", full_name)?;
    let age = required(object, "age", integer)?;
    let email = required(object, "email", email)?;
    let is_active = optional(object, "isActive", boolean)?;
    let hobbies = optional(object, "hobbies", strings)?;
    let address = optional(object, "address", address)?;
    reject_unknown(object, None, USER_FIELDS)?;

    Ok(UserPayload {
        user_id,
        username,
        password,
        full_name,
        age,
        email,
        is_active,
        hobbies,
        address,
    })
}

/// Validate an order body
pub fn validate_order_payload(body: &Value) -> Result<Order, ValidationError> {
    let object = as_object(body, "value")?;

    let product_name = required(object, "productName", string)?;
    let price = required(object, "price", number)?;
    let quantity = required(object, "quantity", number)?;
    reject_unknown(object, None, ORDER_FIELDS)?;

    Ok(Order {
        product_name,
        price,
        quantity,
    })
}

fn required<T>(
    object: &Map<String, Value>,
    path: &str,
    check: fn(&Value, &str) -> Result<T, ValidationError>,
) -> Result<T, ValidationError> {
    match object.get(leaf(path)) {
        Some(value) => check(value, path),
        None => Err(ValidationError::at(path, "is required")),
    }
}

fn optional<T>(
    object: &Map<String, Value>,
    path: &str,
    check: fn(&Value, &str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    object.get(leaf(path)).map(|value| check(value, path)).transpose()
}

fn leaf(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn reject_unknown(
    object: &Map<String, Value>,
    parent: Option<&str>,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => {
            let path = match parent {
                Some(parent) => format!("{}.{}", parent, key),
                None => key.clone(),
            };
            Err(ValidationError::at(&path, "is not allowed"))
        }
        None => Ok(()),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::at(path, "must be of type object"))
}

fn string(value: &Value, path: &str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) if s.is_empty() => Err(ValidationError::at(path, "is not allowed to be empty")),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::at(path, "must be a string")),
    }
}

/// Numbers, or strings holding a finite decimal number
fn number(value: &Value, path: &str) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };

    parsed.ok_or_else(|| ValidationError::at(path, "must be a number"))
}

fn integer(value: &Value, path: &str) -> Result<i64, ValidationError> {
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }

    let n = number(value, path)?;
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(ValidationError::at(path, "must be an integer"))
    }
}

/// Booleans, or the strings `"true"` / `"false"` in any case
fn boolean(value: &Value, path: &str) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(ValidationError::at(path, "must be a boolean")),
    }
}

fn email(value: &Value, path: &str) -> Result<String, ValidationError> {
    let email = string(value, path)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if email.len() > 254 || !regex.is_match(&email) {
        return Err(ValidationError::at(path, "must be a valid email"));
    }

    Ok(email)
}

fn strings(value: &Value, path: &str) -> Result<Vec<String>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::at(path, "must be an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| string(item, &format!("{}[{}]", path, index)))
        .collect()
}

fn full_name(value: &Value, path: &str) -> Result<FullName, ValidationError> {
    let object = as_object(value, path)?;

    let first_name = required(object, &format!("{}.firstName", path), string)?;
    let last_name = required(object, &format!("{}.lastName", path), string)?;
    reject_unknown(object, Some(path), FULL_NAME_FIELDS)?;

    Ok(FullName {
        first_name,
        last_name,
    })
}

fn address(value: &Value, path: &str) -> Result<Address, ValidationError> {
    let object = as_object(value, path)?;

    let street = required(object, &format!("{}.street", path), string)?;
    let city = required(object, &format!("{}.city", path), string)?;
    let country = required(object, &format!("{}.country", path), string)?;
    reject_unknown(object, Some(path), ADDRESS_FIELDS)?;

    Ok(Address {
        street,
        city,
        country,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_user() -> Value {
        json!({
            "userId": 1,
            "username": "ada",
            "password": "secret",
            "fullName": { "firstName": "Ada", "lastName": "Lovelace" },
            "age": 36,
            "email": "ada@example.com",
            "isActive": false,
            "hobbies": ["maths", "poetry"],
            "address": { "street": "1 St James's Sq", "city": "London", "country": "UK" }
        })
    }

    fn user_error(body: Value) -> String {
        validate_user_payload(&body)
            .expect_err("payload should be rejected")
            .description()
            .to_string()
    }

    #[test]
    fn test_valid_user_payload() {
        let payload = validate_user_payload(&valid_user()).unwrap();
        assert_eq!(payload.user_id, 1);
        assert_eq!(payload.is_active, Some(false));
        assert_eq!(payload.hobbies, Some(vec!["maths".to_string(), "poetry".to_string()]));
        assert_eq!(payload.address.unwrap().city, "London");
    }

    #[test]
    fn test_optional_user_fields_may_be_omitted() {
        let payload = validate_user_payload(&json!({
            "userId": 2,
            "username": "bob",
            "password": "pw",
            "age": 20,
            "email": "bob@example.com"
        }))
        .unwrap();
        assert!(payload.full_name.is_none());
        assert!(payload.is_active.is_none());
        assert!(payload.hobbies.is_none());
        assert!(payload.address.is_none());
    }

    #[test]
    fn test_missing_email_is_reported() {
        let mut body = valid_user();
        body.as_object_mut().unwrap().remove("email");
        assert_eq!(user_error(body), "\"email\" is required");
    }

    #[test]
    fn test_only_first_failure_is_reported() {
        let body = json!({ "username": 5, "email": "nope" });
        assert_eq!(user_error(body), "\"userId\" is required");
    }

    #[test]
    fn test_type_mismatches() {
        let mut body = valid_user();
        body["age"] = json!("thirty");
        assert_eq!(user_error(body), "\"age\" must be a number");

        let mut body = valid_user();
        body["userId"] = json!(1.5);
        assert_eq!(user_error(body), "\"userId\" must be an integer");

        let mut body = valid_user();
        body["isActive"] = json!("yes");
        assert_eq!(user_error(body), "\"isActive\" must be a boolean");

        let mut body = valid_user();
        body["username"] = json!(null);
        assert_eq!(user_error(body), "\"username\" must be a string");
    }

    #[test]
    fn test_numeric_and_boolean_strings_are_converted() {
        let mut body = valid_user();
        body["age"] = json!("30");
        body["userId"] = json!(" 12 ");
        body["isActive"] = json!("FALSE");
        let payload = validate_user_payload(&body).unwrap();
        assert_eq!(payload.age, 30);
        assert_eq!(payload.user_id, 12);
        assert_eq!(payload.is_active, Some(false));

        let order = validate_order_payload(&json!({
            "productName": "Pen",
            "price": "2.5",
            "quantity": "4"
        }))
        .unwrap();
        assert_eq!(order.price, 2.5);
        assert_eq!(order.quantity, 4.0);
    }

    #[test]
    fn test_unconvertible_strings_are_rejected() {
        let mut body = valid_user();
        body["age"] = json!("30.5");
        assert_eq!(user_error(body), "\"age\" must be an integer");

        let mut body = valid_user();
        body["age"] = json!("");
        assert_eq!(user_error(body), "\"age\" must be a number");

        let mut body = valid_user();
        body["isActive"] = json!("1");
        assert_eq!(user_error(body), "\"isActive\" must be a boolean");
    }

    #[test]
    fn test_integral_float_is_accepted_as_integer() {
        let mut body = valid_user();
        body["age"] = json!(36.0);
        assert_eq!(validate_user_payload(&body).unwrap().age, 36);
    }

    #[test]
    fn test_invalid_email() {
        let mut body = valid_user();
        body["email"] = json!("not-an-email");
        assert_eq!(user_error(body), "\"email\" must be a valid email");
    }

    #[test]
    fn test_empty_string_is_rejected() {
        let mut body = valid_user();
        body["password"] = json!("");
        assert_eq!(user_error(body), "\"password\" is not allowed to be empty");
    }

    #[test]
    fn test_nested_paths_are_reported() {
        let mut body = valid_user();
        body["fullName"] = json!({ "firstName": "Ada" });
        assert_eq!(user_error(body), "\"fullName.lastName\" is required");

        let mut body = valid_user();
        body["address"] = json!("London");
        assert_eq!(user_error(body), "\"address\" must be of type object");

        let mut body = valid_user();
        body["hobbies"] = json!(["maths", 3]);
        assert_eq!(user_error(body), "\"hobbies[1]\" must be a string");

        let mut body = valid_user();
        body["address"]["zip"] = json!("SW1");
        assert_eq!(user_error(body), "\"address.zip\" is not allowed");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut body = valid_user();
        body["orders"] = json!([]);
        assert_eq!(user_error(body), "\"orders\" is not allowed");
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(user_error(json!([1, 2])), "\"value\" must be of type object");
    }

    #[test]
    fn test_valid_order_payload() {
        let order = validate_order_payload(&json!({
            "productName": "Pen",
            "price": 2.5,
            "quantity": 4
        }))
        .unwrap();
        assert_eq!(order.product_name, "Pen");
        assert_eq!(order.price, 2.5);
        assert_eq!(order.quantity, 4.0);
    }

    #[test]
    fn test_invalid_order_payloads() {
        let error = validate_order_payload(&json!({ "price": 1, "quantity": 1 })).unwrap_err();
        assert_eq!(error.description(), "\"productName\" is required");

        let error =
            validate_order_payload(&json!({ "productName": "Pen", "price": "one", "quantity": 1 }))
                .unwrap_err();
        assert_eq!(error.description(), "\"price\" must be a number");

        let error =
            validate_order_payload(&json!({ "productName": "Pen", "price": "NaN", "quantity": 1 }))
                .unwrap_err();
        assert_eq!(error.description(), "\"price\" must be a number");

        let error = validate_order_payload(&json!({ "productName": "Pen", "price": 1 })).unwrap_err();
        assert_eq!(error.description(), "\"quantity\" is required");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
        assert_eq!(parse_body(br#"{"a":1}"#).unwrap(), json!({ "a": 1 }));
        assert_eq!(
            parse_body(b"{not json").unwrap_err().description(),
            "Request body must be valid JSON"
        );
    }
}
