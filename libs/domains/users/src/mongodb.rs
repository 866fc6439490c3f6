//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::{Collation, CollationStrength, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "User";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    email: String,
    nickname: String,
    hashed_password: String,
    #[serde(default = "active_by_default")]
    is_active: bool,
    #[serde(default)]
    is_superuser: bool,
    #[serde(default)]
    is_verified: bool,
}

fn active_by_default() -> bool {
    true
}

impl UserDocument {
    fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            id: ObjectId::parse_str(&user.id).ok()?,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            hashed_password: user.hashed_password.clone(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        })
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id.to_hex(),
            email: doc.email,
            nickname: doc.nickname,
            hashed_password: doc.hashed_password,
            is_active: doc.is_active,
            is_superuser: doc.is_superuser,
            is_verified: doc.is_verified,
        }
    }
}

/// Strength 2 compares ignoring case, matching how e-mails are looked up.
fn email_collation() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

fn duplicate_or(err: mongodb::error::Error) -> UserError {
    if is_duplicate_key(&err) {
        UserError::Duplicate
    } else {
        UserError::Database(err)
    }
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Unique indexes on e-mail (case-insensitive) and nickname.
    pub async fn create_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .collation(email_collation())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "nickname": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = COLLECTION, "User indexes ensured");
        Ok(())
    }

    async fn find_one(&self, filter: Document, collation: Option<Collation>) -> UserResult<Option<User>> {
        let document = match collation {
            Some(collation) => self.collection.find_one(filter).collation(collation).await?,
            None => self.collection.find_one(filter).await?,
        };
        Ok(document.map(User::from))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, new_user), fields(nickname = %new_user.nickname))]
    async fn create(&self, new_user: NewUser) -> UserResult<User> {
        let user = User::new(ObjectId::new().to_hex(), new_user);
        let document = UserDocument::from_user(&user)
            .ok_or_else(|| UserError::Internal(format!("invalid generated id {}", user.id)))?;

        self.collection
            .insert_one(&document)
            .await
            .map_err(duplicate_or)?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> UserResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.find_one(doc! { "_id": object_id }, None).await
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_one(doc! { "email": email }, Some(email_collation()))
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_nickname(&self, nickname: &str) -> UserResult<Option<User>> {
        self.find_one(doc! { "nickname": nickname }, None).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> UserResult<bool> {
        let Some(document) = UserDocument::from_user(user) else {
            return Ok(false);
        };
        let result = self
            .collection
            .replace_one(doc! { "_id": document.id }, &document)
            .await
            .map_err(duplicate_or)?;

        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
