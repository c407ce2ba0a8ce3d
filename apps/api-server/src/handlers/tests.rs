//! Handler flow tests against in-memory stores.

use std::sync::{Arc, Mutex};

use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use bookstack_core::domain::{Book, NewBook, NewUser, User, ensure_owner};
use bookstack_core::error::DomainError;
use bookstack_core::ports::{
    BookRepository, PasswordService, TokenService, UserRepository,
};
use bookstack_infra::auth::{Argon2PasswordService, JwtTokenService, PasswordConfig, SigningKey};

use crate::state::AppState;

#[derive(Default)]
struct MemUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn create(&self, candidate: NewUser) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|u| u.username == candidate.username) {
            return Err(DomainError::UsernameTaken);
        }
        if rows.iter().any(|u| u.email == candidate.email) {
            return Err(DomainError::EmailTaken);
        }
        if rows.iter().any(|u| u.phone_number == candidate.phone_number) {
            return Err(DomainError::PhoneTaken);
        }

        let user = User {
            id: rows.len() as i32 + 1,
            username: candidate.username,
            email: candidate.email,
            password_hash: candidate.password_hash,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            phone_number: candidate.phone_number,
            gender: candidate.gender,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        let rows = self.rows.lock().unwrap();
        let matches: Vec<&User> = rows.iter().filter(|u| u.username == username).collect();
        match matches.as_slice() {
            [user] => Ok((*user).clone()),
            _ => Err(DomainError::UserNotFound),
        }
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|u| u.username == username))
    }
}

struct MemBooks {
    rows: Mutex<Vec<Book>>,
    users: Arc<MemUsers>,
}

impl MemBooks {
    fn new(users: Arc<MemUsers>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
        }
    }

    fn owner_of(&self, id: i32) -> Result<i32, DomainError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|b| b.id == id)
            .map(|b| b.user_id)
            .ok_or(DomainError::BookNotFound)
    }
}

#[async_trait]
impl BookRepository for MemBooks {
    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let book = Book {
            id: rows.len() as i32 + 1,
            name: book.name,
            category: book.category,
            volume: book.volume,
            published_at: book.published_at,
            summary: book.summary,
            publisher: book.publisher,
            author: book.author,
            user_id: book.user_id,
            contents: book.contents,
        };
        rows.push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: i32) -> Result<Book, DomainError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(DomainError::BookNotFound)
    }

    async fn list_all(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        name: &str,
        category: &str,
    ) -> Result<(), DomainError> {
        let owner_id = self.owner_of(id)?;
        let actor = self.users.find_by_username(username).await?;
        ensure_owner(owner_id, actor.id)?;

        let mut rows = self.rows.lock().unwrap();
        if let Some(book) = rows.iter_mut().find(|b| b.id == id) {
            book.name = name.to_owned();
            book.category = category.to_owned();
        }
        Ok(())
    }

    async fn delete_owned(&self, username: &str, id: i32) -> Result<(), DomainError> {
        let owner_id = self.owner_of(id)?;
        let actor = self.users.find_by_username(username).await?;
        ensure_owner(owner_id, actor.id)?;

        self.rows.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}

struct TestCtx {
    state: AppState,
    token_service: Arc<dyn TokenService>,
    password_service: Arc<dyn PasswordService>,
}

impl TestCtx {
    fn new() -> Self {
        let users = Arc::new(MemUsers::default());
        let books = Arc::new(MemBooks::new(users.clone()));
        Self {
            state: AppState::with_repos(users, books),
            token_service: Arc::new(JwtTokenService::new(&SigningKey::generate(), 10)),
            password_service: Arc::new(
                Argon2PasswordService::new(&PasswordConfig::default()).unwrap(),
            ),
        }
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .app_data(web::Data::new($ctx.token_service.clone()))
                .app_data(web::Data::new($ctx.password_service.clone()))
                .app_data(
                    web::JsonConfig::default()
                        .error_handler(crate::middleware::error::json_error_handler),
                )
                .app_data(
                    web::PathConfig::default()
                        .error_handler(crate::middleware::error::path_error_handler),
                )
                .configure(crate::handlers::configure_routes),
        )
        .await
    };
}

fn signup_body(username: &str, email: &str, phone: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "opensesame",
        "first_name": "Test",
        "last_name": "User",
        "phone_number": phone,
        "gender": "other",
    })
}

fn book_body(name: &str, contents: &[&str]) -> Value {
    json!({
        "name": name,
        "category": "sci-fi",
        "volume": 1,
        "published_at": "1965-08-01",
        "summary": "Desert planet",
        "publisher": "Chilton",
        "author": {
            "first_name": "Frank",
            "last_name": "Herbert",
            "birthday": "1920-10-08",
            "nationality": "US",
        },
        "table_of_contents": contents,
    })
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri($uri)
                .set_json(&$body)
                .to_request(),
        )
        .await
    };
    ($app:expr, $uri:expr, $body:expr, $token:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri($uri)
                .insert_header(("Authorization", format!("Bearer {}", $token)))
                .set_json(&$body)
                .to_request(),
        )
        .await
    };
}

macro_rules! get_authed {
    ($app:expr, $uri:expr, $token:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::get()
                .uri($uri)
                .insert_header(("Authorization", format!("Bearer {}", $token)))
                .to_request(),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {{
        let res = post_json!(
            $app,
            "/api/auth/login",
            json!({"username": $username, "password": $password})
        );
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        body["access_token"].as_str().unwrap().to_owned()
    }};
}

#[actix_web::test]
async fn signup_rejects_duplicate_username() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    let res = post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    assert_eq!(res.status(), 201);

    // Same username, different email and phone.
    let res = post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "other@x.com", "09876543210")
    );
    assert_eq!(res.status(), 409);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "username is in use by another account");
}

#[actix_web::test]
async fn login_with_wrong_password_yields_no_token() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );

    let res = post_json!(
        app,
        "/api/auth/login",
        json!({"username": "alice", "password": "wrong"})
    );
    assert_eq!(res.status(), 401);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "incorrect password");
    assert!(body.get("access_token").is_none());
}

#[actix_web::test]
async fn login_with_unknown_username_is_rejected() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    let res = post_json!(
        app,
        "/api/auth/login",
        json!({"username": "ghost", "password": "whatever"})
    );
    assert_eq!(res.status(), 401);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "no such username exists");
}

#[actix_web::test]
async fn book_contents_round_trip_in_order() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    let token = login!(app, "alice", "opensesame");

    let res = post_json!(app, "/api/books", book_body("Dune", &["ch1", "ch2"]), token);
    assert_eq!(res.status(), 201);

    let res = get_authed!(app, "/api/books/1", token);
    assert_eq!(res.status(), 200);
    let first: Value = test::read_body_json(res).await;
    assert_eq!(first["table_of_contents"], json!(["ch1", "ch2"]));
    assert_eq!(first["name"], "Dune");
    assert!(first.get("user_id").is_none());

    // Reading again without mutation yields identical field values.
    let res = get_authed!(app, "/api/books/1", token);
    let second: Value = test::read_body_json(res).await;
    assert_eq!(first, second);
}

#[actix_web::test]
async fn any_authenticated_user_may_read() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    post_json!(
        app,
        "/api/auth/signup",
        signup_body("bob", "b@x.com", "09876543210")
    );
    let alice = login!(app, "alice", "opensesame");
    let bob = login!(app, "bob", "opensesame");

    post_json!(app, "/api/books", book_body("Dune", &[]), alice);

    let res = get_authed!(app, "/api/books", bob);
    assert_eq!(res.status(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn non_owner_cannot_mutate() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    post_json!(
        app,
        "/api/auth/signup",
        signup_body("bob", "b@x.com", "09876543210")
    );
    let alice = login!(app, "alice", "opensesame");
    let bob = login!(app, "bob", "opensesame");

    post_json!(app, "/api/books", book_body("Dune", &[]), alice);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/books/1")
            .insert_header(("Authorization", format!("Bearer {bob}")))
            .set_json(json!({"name": "Hijacked", "category": "stolen"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 403);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "permission denied");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/books/1")
            .insert_header(("Authorization", format!("Bearer {bob}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 403);

    // The book is unchanged when re-fetched.
    let res = get_authed!(app, "/api/books/1", alice);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Dune");
}

#[actix_web::test]
async fn owner_may_update_and_delete() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    let token = login!(app, "alice", "opensesame");

    post_json!(app, "/api/books", book_body("Dune", &[]), token);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/books/1")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"name": "Dune Messiah", "category": ""}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);

    // Empty string is a valid overwrite value, not "unchanged".
    let res = get_authed!(app, "/api/books/1", token);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Dune Messiah");
    assert_eq!(body["category"], "");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/books/1")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 200);

    let res = get_authed!(app, "/api/books/1", token);
    assert_eq!(res.status(), 404);
}

#[actix_web::test]
async fn catalog_requires_a_token() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/books").to_request(),
    )
    .await;
    assert_eq!(res.status(), 401);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "empty token string");

    let res = get_authed!(app, "/api/books", "garbage");
    assert_eq!(res.status(), 401);
}

#[actix_web::test]
async fn non_numeric_book_id_is_a_client_error() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    post_json!(
        app,
        "/api/auth/signup",
        signup_body("alice", "a@x.com", "01234567890")
    );
    let token = login!(app, "alice", "opensesame");

    let res = get_authed!(app, "/api/books/abc", token);
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert!(body.get("message").is_some());
}

#[actix_web::test]
async fn malformed_body_is_a_client_error() {
    let ctx = TestCtx::new();
    let app = init_app!(ctx);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/signup")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert!(body.get("message").is_some());
}
