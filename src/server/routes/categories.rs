use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{category_map, get_all_categories, get_category, CategoryMap},
            questions::get_questions_for_category,
        },
        Question,
    },
    pagination::PageQuery,
    server::{
        app::AppState,
        error::{ApiError, StorageResultExt},
        extract::{ApiPath, ApiQuery},
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesBody {
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_all_categories(&pool).await.on_read()?;
    Ok(Json(CategoriesBody {
        categories: category_map(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let matching = get_questions_for_category(&pool, &id.to_string())
        .await
        .on_read()?;
    let questions = page.page_of(&matching);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let category = get_category(&pool, id)
        .await
        .on_read()?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(CategoryQuestionsBody {
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
