//! User record and identifier types.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier could not be parsed from its external form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid user id {0:?}")]
pub struct InvalidUserId(pub String);

/// Store-assigned user identifier.
///
/// Wraps a document ObjectId. The external form is the 24-character lowercase
/// hex string, which is also how the id appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(ObjectId);

impl UserId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the external hex form.
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidUserId(raw.to_string()))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<UserId> for ObjectId {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Omitted from the wire until the store has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
}

/// Request body for create and update.
///
/// Missing fields decode as empty strings and unknown fields (including any
/// client-supplied `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id: Some(id),
            name: self.name,
            email: self.email,
        }
    }
}

impl From<UserPayload> for NewUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
        }
    }
}
