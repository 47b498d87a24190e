//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use mongodb::bson;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while establishing the client or reaching the server
    #[error("Database connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred during a read or write against a collection
    #[error("Database query error: {0}")]
    Query(#[source] MongoError),

    /// A write collided with a unique index
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A record is missing a field the collection requires
    #[error("Document validation failed: {0}")]
    DocumentValidation(String),

    /// A record could not be converted to a BSON document
    #[error("Database serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

const DUPLICATE_KEY_CODE: i32 = 11000;

impl DatabaseError {
    /// Classify a driver error raised by a collection operation
    pub fn from_query(error: MongoError) -> Self {
        let duplicate = match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
            ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
            _ => false,
        };

        if duplicate {
            Self::DuplicateKey(error.to_string())
        } else {
            Self::Query(error)
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
