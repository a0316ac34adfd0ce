//! # quizdb
//!
//! PostgreSQL storage for quiz questions, built around typed partial updates.
//!
//! ## Features
//!
//! - **Ordered partial updates**: a declared [`FieldSchema`] decides which keys of a
//!   client document become `column = $N` assignments, in a fixed order
//! - **Typed conversion**: every value is checked by its field's converter and bound as a
//!   parameter, never interpolated
//! - **Transaction-friendly**: repository functions take any [`GenericClient`]
//! - **Embedded migrations** for `quiz_table` (feature `migrate`)
//! - **Injected refresh-token store** instead of process-wide state
//!
//! ## Partial update
//!
//! ```ignore
//! use quizdb::{PatchDocument, quiz};
//!
//! let doc = PatchDocument::from_json_str(r#"{"question": "New Q?", "unknown": 1}"#)?;
//! quiz::update_quiz(&client, 42, &doc).await?;
//! // UPDATE quiz_table SET question = $1 WHERE id = $2
//! ```

pub mod client;
pub mod error;
pub mod ident;
pub mod patch;
pub mod quiz;
pub mod response;
pub mod row;
pub mod token;

pub use client::GenericClient;
pub use error::{QuizError, QuizResult};
pub use ident::Ident;
pub use patch::{
    Assignments, BoundValue, BuildError, BuildOutcome, ConvertError, Converter, FieldError,
    FieldSchema, PatchDocument, PatchValue,
};
pub use quiz::{NewQuiz, Quiz};
pub use response::{ApiError, ApiMessage, ApiResponse};
pub use row::{FromRow, RowExt};
pub use token::{MemoryTokenStore, RefreshTokenStore};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "migrate")]
pub mod migrate;
