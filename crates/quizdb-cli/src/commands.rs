use crate::cli::Command;
use crate::config::ProjectConfig;
use anyhow::Context;
use quizdb::quiz;
use quizdb::response::{ApiResponse, MSG_DELETED, MSG_UPDATED};
use quizdb::{NewQuiz, PatchDocument, QuizError, QuizResult};

pub async fn run(config: &ProjectConfig, command: Command) -> anyhow::Result<()> {
    let db = &config.file.database;
    tracing::debug!(
        config = ?config.config_path,
        max_connections = db.max_connections,
        "connecting"
    );
    let pool = quizdb::create_pool_with_config(&db.url, db.max_connections)
        .context("failed to create connection pool")?;

    if command == Command::Migrate {
        let report = quizdb::migrate::run_pool(&pool)
            .await
            .context("failed to apply migrations")?;
        for m in report.applied_migrations() {
            println!("applied V{}__{}", m.version(), m.name());
        }
        if report.applied_migrations().is_empty() {
            println!("database is up to date");
        }
        return Ok(());
    }

    let client = pool.get().await.context("failed to get a database connection")?;

    let response = match command {
        Command::List => ApiResponse::ok(&quiz::list_quizzes(&client).await),
        Command::Show { id } => ApiResponse::ok(&quiz::get_quiz(&client, id).await),
        Command::Create { body } => {
            let result = match NewQuiz::from_json_str(&body.read()?) {
                Ok(new) => quiz::create_quiz(&client, &new).await,
                Err(e) => Err(e),
            };
            ApiResponse::created(&result)
        }
        Command::Update { id, body } => {
            let result = match decode_patch(&body.read()?) {
                Ok(doc) => quiz::update_quiz(&client, id, &doc).await,
                Err(e) => Err(e),
            };
            ApiResponse::message(&result, MSG_UPDATED)
        }
        Command::Delete { id } => {
            ApiResponse::message(&quiz::delete_quiz(&client, id).await, MSG_DELETED)
        }
        Command::Help | Command::Migrate => return Ok(()),
    };

    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if !response.is_success() {
        tracing::warn!(status = response.status, "request failed");
        anyhow::bail!("request failed with status {}", response.status);
    }
    Ok(())
}

fn decode_patch(body: &str) -> QuizResult<PatchDocument> {
    PatchDocument::from_json_str(body).map_err(QuizError::from)
}
