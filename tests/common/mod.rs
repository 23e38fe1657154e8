#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;
use trivia_api::{
    db::{
        queries::{categories::import_categories, questions::import_questions},
        run_migrations, Category, Question,
    },
    server::app::{build_router, AppState},
};

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

/// Migrated, empty database behind the full router.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("trivia.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    TestApp {
        router: build_router(AppState::new(pool.clone())),
        pool,
        _dir: dir,
    }
}

pub fn categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History"]
        .into_iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_owned(),
        })
        .collect()
}

/// Questions 1..=23: 1-12 are Science, 13-20 Art, 21-23 Geography. History
/// has none. Every fifth question mentions a title.
pub fn questions() -> Vec<Question> {
    (1..=23)
        .map(|id| {
            let category = match id {
                1..=12 => "1",
                13..=20 => "2",
                _ => "3",
            };
            let question = match id {
                5 => format!("Question {id}: what is the TITLE of this book?"),
                n if n % 5 == 0 => format!("Question {id}: what is the title of this film?"),
                _ => format!("Question {id}: how many?"),
            };
            Question {
                id,
                question,
                answer: format!("Answer {id}"),
                category: category.to_owned(),
                difficulty: id % 5 + 1,
            }
        })
        .collect()
}

pub async fn seeded_app() -> TestApp {
    let app = spawn_app().await;
    import_categories(&app.pool, categories()).await.unwrap();
    import_questions(&app.pool, questions()).await.unwrap();
    app
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}
