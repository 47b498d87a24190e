//! Storage seam between the HTTP handlers and the document store

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    Order,
    user::{UserChanges, UserDocument, UserProfile},
};

#[cfg(test)]
pub mod memory;
pub mod user;

pub use user::MongoUserStore;

/// Persistence operations on users and their embedded orders
///
/// Every operation touches at most one user document, addressed by its
/// external `userId`. Results never include the password hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return its profile
    async fn insert(&self, user: UserDocument) -> DatabaseResult<UserProfile>;

    /// All users, in storage order
    async fn list(&self) -> DatabaseResult<Vec<UserProfile>>;

    /// Find a user by `userId`
    async fn find_by_user_id(&self, user_id: i64) -> DatabaseResult<Option<UserProfile>>;

    /// Apply `changes` to the user and return the updated profile, `None` if absent
    async fn update(&self, user_id: i64, changes: UserChanges)
    -> DatabaseResult<Option<UserProfile>>;

    /// Remove a user; `false` if absent
    async fn delete(&self, user_id: i64) -> DatabaseResult<bool>;

    /// Atomically append an order to the user's orders; `false` if absent
    async fn push_order(&self, user_id: i64, order: Order) -> DatabaseResult<bool>;

    /// The user's orders in insertion order, `None` if the user is absent
    async fn orders(&self, user_id: i64) -> DatabaseResult<Option<Vec<Order>>>;
}
