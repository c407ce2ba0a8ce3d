//! Catalog handlers. Reads are open to any authenticated user; mutations
//! go through the ownership-checked store operations.

use actix_web::{HttpResponse, web};

use bookstack_core::domain::{Author, Book, NewBook};
use bookstack_shared::MessageResponse;
use bookstack_shared::dto::{AuthorDto, BookResponse, CreateBookRequest, UpdateBookRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(book: Book) -> BookResponse {
    let Author {
        first_name,
        last_name,
        birthday,
        nationality,
    } = book.author;

    BookResponse {
        id: book.id,
        name: book.name,
        category: book.category,
        volume: book.volume,
        published_at: book.published_at,
        table_of_contents: book.contents,
        summary: book.summary,
        publisher: book.publisher,
        author: AuthorDto {
            first_name,
            last_name,
            birthday,
            nationality,
        },
    }
}

/// POST /api/books
///
/// The owner is always the authenticated requester; the payload cannot
/// name one.
pub async fn create_book(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBookRequest>,
) -> AppResult<HttpResponse> {
    let account = state.users.find_by_username(&identity.username).await?;
    let req = body.into_inner();

    state
        .books
        .create(NewBook {
            name: req.name,
            category: req.category,
            volume: req.volume,
            published_at: req.published_at,
            summary: req.summary,
            publisher: req.publisher,
            author: Author {
                first_name: req.author.first_name,
                last_name: req.author.last_name,
                birthday: req.author.birthday,
                nationality: req.author.nationality,
            },
            user_id: account.id,
            contents: req.table_of_contents,
        })
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("book was created successfully")))
}

/// GET /api/books/{id} - any authenticated user may read any book.
pub async fn get_book(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let book = state.books.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(book)))
}

/// GET /api/books - the whole catalog, unbounded by design.
pub async fn get_all_books(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let books = state.books.list_all().await?;
    let response: Vec<BookResponse> = books.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/books/{id} - owner only; name and category both overwritten.
pub async fn update_book(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<UpdateBookRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state
        .books
        .update_owned(&identity.username, path.into_inner(), &req.name, &req.category)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("book was updated successfully")))
}

/// DELETE /api/books/{id} - owner only; contents cascade.
pub async fn delete_book(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state
        .books
        .delete_owned(&identity.username, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("book was deleted successfully")))
}
