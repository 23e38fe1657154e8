use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{category_map, get_all_categories, CategoryMap},
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    pagination::PageQuery,
    server::{
        app::AppState,
        deserializers::deserialize_optional_category,
        error::{ApiError, StorageResultExt},
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct CreateQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_category")]
    category: Option<String>,
    difficulty: Option<i64>,
}

impl From<CreateQuestionBody> for NewQuestion {
    fn from(body: CreateQuestionBody) -> Self {
        NewQuestion {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    total_questions: usize,
    questions: Vec<Question>,
    categories: CategoryMap,
    current_category: String,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    total_questions: usize,
    questions: Vec<Question>,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let all_questions = get_all_questions(&pool).await.on_read()?;
    let questions = page.page_of(&all_questions);
    let categories = category_map(get_all_categories(&pool).await.on_read()?);

    // the label shown is the one of the first question on the page, so an
    // empty page has none
    let current_category = questions
        .first()
        .and_then(|q| q.category.trim().parse::<i64>().ok())
        .and_then(|id| categories.get(&id))
        .cloned()
        .ok_or(ApiError::NotFound)?;

    Ok(Json(QuestionsPage {
        total_questions: all_questions.len(),
        questions,
        categories,
        current_category,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<CreateQuestionBody>,
) -> ApiResponse<Json<CreatedBody>> {
    let id = questions::create_question(&pool, body.into())
        .await
        .on_write()?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {id}");

    let all_questions = get_all_questions(&pool).await.on_write()?;
    Ok(Json(CreatedBody {
        success: true,
        total_questions: all_questions.len(),
        questions: page.page_of(&all_questions),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<DeletedBody>> {
    // a missing question is reported like any other failed write
    if questions::delete_question(&pool, id).await.on_write()? == 0 {
        return Err(ApiError::Unprocessable(format!("question {id} does not exist")));
    }
    QUESTIONS_DELETED.inc();
    tracing::info!("Deleted question {id}");

    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = match body.search_term.as_deref() {
        None | Some("") => return Err(ApiError::NotFound),
        Some(term) => term,
    };
    let matches = search_questions(&pool, term).await.on_read()?;
    let questions = page.page_of(&matches);

    Ok(Json(SearchResults {
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/search", post(search))
        .with_state(state)
}
