//! User model and related functionality

use common::error::{DatabaseError, DatabaseResult};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Order;

/// First and last name of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullName {
    pub first_name: String,
    pub last_name: String,
}

/// Postal address of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
}

fn default_active() -> bool {
    true
}

/// User document as stored in the `users` collection
///
/// `password` holds the Argon2 hash, never the plaintext. `fullName` and
/// `address` are required. Documents written without `isActive`, `hobbies`
/// or `orders` read back with the schema defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub full_name: FullName,
    pub age: i64,
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub hobbies: Vec<String>,
    pub address: Address,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl UserDocument {
    /// Build a new document from a validated payload and the hash of its password
    ///
    /// The payload may omit `fullName` or `address`, but the collection
    /// cannot store a user without them.
    pub fn new(payload: UserPayload, password_hash: String) -> DatabaseResult<Self> {
        let full_name = payload.full_name.ok_or_else(|| {
            DatabaseError::DocumentValidation("fullName.firstName is required".to_string())
        })?;
        let address = payload.address.ok_or_else(|| {
            DatabaseError::DocumentValidation("address.street is required".to_string())
        })?;

        Ok(Self {
            id: None,
            user_id: payload.user_id,
            username: payload.username,
            password_hash,
            full_name,
            age: payload.age,
            email: payload.email,
            is_active: payload.is_active.unwrap_or(true),
            hobbies: payload.hobbies.unwrap_or_default(),
            address,
            orders: Vec::new(),
        })
    }
}

/// Validated user payload for create and update requests
#[derive(Debug, Clone, PartialEq)]
pub struct UserPayload {
    pub user_id: i64,
    pub username: String,
    pub password: String,
    pub full_name: Option<FullName>,
    pub age: i64,
    pub email: String,
    pub is_active: Option<bool>,
    pub hobbies: Option<Vec<String>>,
    pub address: Option<Address>,
}

/// Fields written by an update
///
/// Optional fields that were not supplied are left untouched in storage,
/// as are the user's orders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<FullName>,
    pub age: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl UserChanges {
    /// Build the change set from a validated payload and the hash of its password
    pub fn new(payload: UserPayload, password_hash: String) -> Self {
        Self {
            user_id: payload.user_id,
            username: payload.username,
            password_hash,
            full_name: payload.full_name,
            age: payload.age,
            email: payload.email,
            is_active: payload.is_active,
            hobbies: payload.hobbies,
            address: payload.address,
        }
    }
}

/// Full user profile returned by create, fetch and update
///
/// Has no password field, so it can be read straight from a projection
/// that excludes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    pub full_name: FullName,
    pub age: i64,
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub hobbies: Vec<String>,
    pub address: Address,
}

impl From<UserDocument> for UserProfile {
    fn from(user: UserDocument) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            full_name: user.full_name,
            age: user.age,
            email: user.email,
            is_active: user.is_active,
            hobbies: user.hobbies,
            address: user.address,
        }
    }
}

/// Narrow user entry returned by the user listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub username: String,
    pub full_name: FullName,
    pub age: i64,
    pub email: String,
    pub address: Address,
}

impl From<UserProfile> for UserSummary {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.username,
            full_name: profile.full_name,
            age: profile.age,
            email: profile.email,
            address: profile.address,
        }
    }
}
