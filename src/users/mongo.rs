//! MongoDB-backed user store.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::MongoConfig;
use crate::users::model::{NewUser, User, UserId};
use crate::users::store::{StoreError, UserStore};

/// Stored document shape: `{_id, name, email}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.map(UserId::from),
            name: doc.name,
            email: doc.email,
        }
    }
}

/// User store over a single MongoDB collection.
///
/// The driver's client owns the connection pool; cloning the store shares it.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Connect using the configured URI and verify the deployment answers a ping.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(config.app_name.clone());
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

fn by_id(id: &UserId) -> Document {
    doc! { "_id": *id.as_object_id() }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, StoreError> {
        let document = UserDocument {
            id: None,
            name: user.name.clone(),
            email: user.email.clone(),
        };
        let result = self.collection.insert_one(&document).await?;

        result
            .inserted_id
            .as_object_id()
            .map(UserId::from)
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError> {
        self.collection
            .find_one(by_id(id))
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }

    async fn replace_fields(&self, id: &UserId, name: &str, email: &str) -> Result<u64, StoreError> {
        let result = self
            .collection
            .update_one(
                by_id(id),
                doc! { "$set": { "name": name, "email": email } },
            )
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: &UserId) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_one(by_id(id))
            .await?;
        Ok(result.deleted_count)
    }
}
