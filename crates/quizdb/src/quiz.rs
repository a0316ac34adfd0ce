//! Quiz storage: `quiz_table` rows and the CRUD operations over them.

use crate::client::GenericClient;
use crate::error::{QuizError, QuizResult};
use crate::patch::{self, Assignments, BuildOutcome, FieldSchema, PatchDocument, convert};
use crate::row::{FromRow, RowExt};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

pub const QUIZ_TABLE: &str = "quiz_table";

const SELECT_QUIZ: &str = "SELECT id, question, options, answers FROM quiz_table";

static UPDATE_SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
    FieldSchema::new()
        .field("question", convert::string)
        .field("options", convert::string_array)
        .field("answers", convert::string_array)
});

/// Fields a client may change with [`update_quiz`], in assignment order.
pub fn update_schema() -> &'static FieldSchema {
    &UPDATE_SCHEMA
}

/// A stored quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub answers: Vec<String>,
}

impl FromRow for Quiz {
    fn from_row(row: &Row) -> QuizResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            question: row.try_get_column("question")?,
            options: row.try_get_column("options")?,
            answers: row.try_get_column("answers")?,
        })
    }
}

/// Body of a create request. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub question: String,
    pub options: Vec<String>,
    pub answers: Vec<String>,
}

impl NewQuiz {
    pub fn from_json_str(body: &str) -> QuizResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Render the full UPDATE for a set of assignments; the row id binds to the
/// first placeholder after them.
pub fn update_statement(set: &Assignments) -> String {
    format!(
        "UPDATE {QUIZ_TABLE} SET {} WHERE id = ${}",
        set.set_clause(),
        set.next_index()
    )
}

#[cfg(feature = "tracing")]
fn trace_sql(op: &'static str, sql: &str, param_count: usize) {
    tracing::debug!(target: "quizdb.sql", op, param_count, sql = %sql);
}

#[cfg(not(feature = "tracing"))]
fn trace_sql(_op: &'static str, _sql: &str, _param_count: usize) {}

#[cfg(feature = "tracing")]
fn trace_affected(op: &'static str, affected: u64) {
    tracing::debug!(target: "quizdb.sql", op, affected, "statement executed");
}

#[cfg(not(feature = "tracing"))]
fn trace_affected(_op: &'static str, _affected: u64) {}

/// All quizzes ordered by id.
pub async fn list_quizzes(conn: &impl GenericClient) -> QuizResult<Vec<Quiz>> {
    let sql = format!("{SELECT_QUIZ} ORDER BY id");
    trace_sql("list", &sql, 0);
    let rows = conn.query(&sql, &[]).await?;
    rows.iter().map(Quiz::from_row).collect()
}

pub async fn get_quiz(conn: &impl GenericClient, id: i32) -> QuizResult<Quiz> {
    let sql = format!("{SELECT_QUIZ} WHERE id = $1");
    trace_sql("get", &sql, 1);
    match conn.query_opt(&sql, &[&id]).await? {
        Some(row) => Quiz::from_row(&row),
        None => Err(QuizError::not_found("quiz not found")),
    }
}

/// Insert a quiz and return it with its assigned id.
pub async fn create_quiz(conn: &impl GenericClient, new: &NewQuiz) -> QuizResult<Quiz> {
    let sql = format!(
        "INSERT INTO {QUIZ_TABLE} (question, options, answers) VALUES ($1, $2, $3) RETURNING id"
    );
    trace_sql("create", &sql, 3);
    let row = conn
        .query_one(&sql, &[&new.question, &new.options, &new.answers])
        .await?;
    Ok(Quiz {
        id: row.try_get_column("id")?,
        question: new.question.clone(),
        options: new.options.clone(),
        answers: new.answers.clone(),
    })
}

/// Apply a partial update to one quiz.
///
/// Only the keys of [`update_schema`] are written; others are ignored. Fails
/// with [`QuizError::InvalidField`] on a wrongly typed value,
/// [`QuizError::NothingToUpdate`] when no updatable key is present, and
/// [`QuizError::NotFound`] when no row has this id. No statement is sent in
/// the first two cases.
pub async fn update_quiz(
    conn: &impl GenericClient,
    id: i32,
    doc: &PatchDocument,
) -> QuizResult<u64> {
    let set = match patch::build(doc, update_schema(), 1)? {
        BuildOutcome::Assignments(set) => set,
        BuildOutcome::NothingToUpdate => return Err(QuizError::NothingToUpdate),
    };

    let sql = update_statement(&set);
    let mut params: Vec<&(dyn ToSql + Sync)> = set.params();
    params.push(&id);
    trace_sql("update", &sql, params.len());

    let affected = conn.execute(&sql, &params).await?;
    trace_affected("update", affected);
    if affected == 0 {
        return Err(QuizError::not_found("quiz not found"));
    }
    Ok(affected)
}

pub async fn delete_quiz(conn: &impl GenericClient, id: i32) -> QuizResult<()> {
    let sql = format!("DELETE FROM {QUIZ_TABLE} WHERE id = $1");
    trace_sql("delete", &sql, 1);
    let affected = conn.execute(&sql, &[&id]).await?;
    trace_affected("delete", affected);
    if affected == 0 {
        return Err(QuizError::not_found("quiz not found"));
    }
    Ok(())
}
