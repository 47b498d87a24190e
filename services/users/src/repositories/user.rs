//! MongoDB-backed user store

use async_trait::async_trait;
use common::{
    database::ensure_unique_indexes,
    error::{DatabaseError, DatabaseResult},
};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc},
    options::ReturnDocument,
};
use serde::Deserialize;
use tracing::info;

use super::UserStore;
use crate::models::{
    Order,
    user::{UserChanges, UserDocument, UserProfile},
};

/// Name of the collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// User store over the `users` collection
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

#[derive(Deserialize)]
struct OrdersOnly {
    #[serde(default)]
    orders: Vec<Order>,
}

fn by_user_id(user_id: i64) -> Document {
    doc! { "userId": user_id }
}

fn without_password() -> Document {
    doc! { "password": 0 }
}

fn listing_projection() -> Document {
    doc! { "password": 0, "orders": 0 }
}

impl MongoUserStore {
    /// Create a new store on `database`
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    /// Create the unique indexes on `userId` and `username`
    pub async fn ensure_indexes(&self) -> DatabaseResult<()> {
        ensure_unique_indexes(&self.collection, &["userId", "username"]).await
    }

    fn profiles(&self) -> Collection<UserProfile> {
        self.collection.clone_with_type()
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: UserDocument) -> DatabaseResult<UserProfile> {
        info!("Inserting user {}", user.user_id);

        self.collection
            .insert_one(&user)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(user.into())
    }

    async fn list(&self) -> DatabaseResult<Vec<UserProfile>> {
        let cursor = self
            .profiles()
            .find(doc! {})
            .projection(listing_projection())
            .await
            .map_err(DatabaseError::from_query)?;

        cursor.try_collect().await.map_err(DatabaseError::from_query)
    }

    async fn find_by_user_id(&self, user_id: i64) -> DatabaseResult<Option<UserProfile>> {
        self.profiles()
            .find_one(by_user_id(user_id))
            .projection(without_password())
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn update(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> DatabaseResult<Option<UserProfile>> {
        info!("Updating user {}", user_id);

        let update = doc! { "$set": bson::to_document(&changes)? };

        self.profiles()
            .find_one_and_update(by_user_id(user_id), update)
            .return_document(ReturnDocument::After)
            .projection(without_password())
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn delete(&self, user_id: i64) -> DatabaseResult<bool> {
        info!("Deleting user {}", user_id);

        let deleted = self
            .collection
            .clone_with_type::<Document>()
            .find_one_and_delete(by_user_id(user_id))
            .projection(doc! { "_id": 1 })
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(deleted.is_some())
    }

    async fn push_order(&self, user_id: i64, order: Order) -> DatabaseResult<bool> {
        info!("Appending order for user {}", user_id);

        let order = bson::to_bson(&order)?;
        let result = self
            .collection
            .update_one(by_user_id(user_id), doc! { "$push": { "orders": order } })
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(result.matched_count > 0)
    }

    async fn orders(&self, user_id: i64) -> DatabaseResult<Option<Vec<Order>>> {
        let user = self
            .collection
            .clone_with_type::<OrdersOnly>()
            .find_one(by_user_id(user_id))
            .projection(doc! { "_id": 0, "orders": 1 })
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(user.map(|user| user.orders))
    }
}
