//! In-memory user store used by the handler tests

use std::sync::RwLock;

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};

use super::UserStore;
use crate::models::{
    Order,
    user::{UserChanges, UserDocument, UserProfile},
};

/// User store over a vector, mirroring the unique indexes of the real collection
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserDocument>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored password hash of a user, for assertions only
    pub fn password_hash(&self, user_id: i64) -> Option<String> {
        self.read()
            .ok()?
            .iter()
            .find(|user| user.user_id == user_id)
            .map(|user| user.password_hash.clone())
    }

    pub fn user_count(&self) -> usize {
        self.read().map(|users| users.len()).unwrap_or_default()
    }

    fn read(&self) -> DatabaseResult<std::sync::RwLockReadGuard<'_, Vec<UserDocument>>> {
        self.users
            .read()
            .map_err(|_| DatabaseError::Configuration("user store lock poisoned".to_string()))
    }

    fn write(&self) -> DatabaseResult<std::sync::RwLockWriteGuard<'_, Vec<UserDocument>>> {
        self.users
            .write()
            .map_err(|_| DatabaseError::Configuration("user store lock poisoned".to_string()))
    }
}

fn check_unique(
    users: &[UserDocument],
    user_id: i64,
    username: &str,
    skip: Option<usize>,
) -> DatabaseResult<()> {
    let clash = users
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find(|(_, user)| user.user_id == user_id || user.username == username);

    match clash {
        Some(_) => Err(DatabaseError::DuplicateKey(format!(
            "userId {} or username {} already exists",
            user_id, username
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: UserDocument) -> DatabaseResult<UserProfile> {
        let mut users = self.write()?;
        check_unique(&users, user.user_id, &user.username, None)?;
        users.push(user.clone());
        Ok(user.into())
    }

    async fn list(&self) -> DatabaseResult<Vec<UserProfile>> {
        Ok(self.read()?.iter().cloned().map(UserProfile::from).collect())
    }

    async fn find_by_user_id(&self, user_id: i64) -> DatabaseResult<Option<UserProfile>> {
        Ok(self
            .read()?
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned()
            .map(UserProfile::from))
    }

    async fn update(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> DatabaseResult<Option<UserProfile>> {
        let mut users = self.write()?;
        let Some(index) = users.iter().position(|user| user.user_id == user_id) else {
            return Ok(None);
        };
        check_unique(&users, changes.user_id, &changes.username, Some(index))?;

        let user = &mut users[index];
        user.user_id = changes.user_id;
        user.username = changes.username;
        user.password_hash = changes.password_hash;
        user.age = changes.age;
        user.email = changes.email;
        if let Some(full_name) = changes.full_name {
            user.full_name = full_name;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        if let Some(hobbies) = changes.hobbies {
            user.hobbies = hobbies;
        }
        if let Some(address) = changes.address {
            user.address = address;
        }

        Ok(Some(user.clone().into()))
    }

    async fn delete(&self, user_id: i64) -> DatabaseResult<bool> {
        let mut users = self.write()?;
        let before = users.len();
        users.retain(|user| user.user_id != user_id);
        Ok(users.len() < before)
    }

    async fn push_order(&self, user_id: i64, order: Order) -> DatabaseResult<bool> {
        let mut users = self.write()?;
        match users.iter_mut().find(|user| user.user_id == user_id) {
            Some(user) => {
                user.orders.push(order);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn orders(&self, user_id: i64) -> DatabaseResult<Option<Vec<Order>>> {
        Ok(self
            .read()?
            .iter()
            .find(|user| user.user_id == user_id)
            .map(|user| user.orders.clone()))
    }
}

/// Store whose every operation fails, for exercising the 500 path
pub struct FailingUserStore;

fn unavailable<T>() -> DatabaseResult<T> {
    Err(DatabaseError::Configuration(
        "connection refused: mongodb://10.0.0.5:27017".to_string(),
    ))
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn insert(&self, _user: UserDocument) -> DatabaseResult<UserProfile> {
        unavailable()
    }

    async fn list(&self) -> DatabaseResult<Vec<UserProfile>> {
        unavailable()
    }

    async fn find_by_user_id(&self, _user_id: i64) -> DatabaseResult<Option<UserProfile>> {
        unavailable()
    }

    async fn update(
        &self,
        _user_id: i64,
        _changes: UserChanges,
    ) -> DatabaseResult<Option<UserProfile>> {
        unavailable()
    }

    async fn delete(&self, _user_id: i64) -> DatabaseResult<bool> {
        unavailable()
    }

    async fn push_order(&self, _user_id: i64, _order: Order) -> DatabaseResult<bool> {
        unavailable()
    }

    async fn orders(&self, _user_id: i64) -> DatabaseResult<Option<Vec<Order>>> {
        unavailable()
    }
}
