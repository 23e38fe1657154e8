use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    quiz::{next_question, QuizScope},
    server::{
        app::AppState,
        deserializers::NumberOrString,
        error::{ApiError, StorageResultExt},
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: NumberOrString,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizTurn {
    previous_questions: Vec<i64>,
    quiz_category: NumberOrString,
    question: Option<Question>,
}

async fn play(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizTurn>> {
    let category_id = request.quiz_category.as_i64().ok_or_else(|| {
        ApiError::Unprocessable(format!("invalid quiz category {:?}", request.quiz_category))
    })?;
    let scope = QuizScope::from(category_id);
    let eligible = match &scope {
        QuizScope::All => get_all_questions(&pool).await,
        QuizScope::Category(id) => get_questions_for_category(&pool, id).await,
    }
    .on_read()?;

    let question = next_question(&eligible, &request.previous_questions).cloned();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[scope.label()])
                .inc();
            tracing::debug!("Serving question {} for quiz {}", q.id, scope.label());
        }
        None => tracing::debug!("Quiz {} has no questions left", scope.label()),
    }

    Ok(Json(QuizTurn {
        previous_questions: request.previous_questions,
        quiz_category: request.quiz_category,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new().route("/quizzes", post(play)).with_state(state)
}
