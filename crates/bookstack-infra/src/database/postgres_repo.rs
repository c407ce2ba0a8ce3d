//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use bookstack_core::domain::{Book, NewBook, NewUser, User, ensure_owner};
use bookstack_core::error::{DomainError, RepoError};
use bookstack_core::ports::{BookRepository, UserRepository};

use super::entity::book::{self, Entity as BookEntity};
use super::entity::content::{self, Entity as ContentEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> DomainError {
    RepoError::Query(e.to_string()).into()
}

/// Map an insert failure, surfacing unique-index violations as constraint
/// errors. This is what actually holds the uniqueness invariants when two
/// signups race past the pre-checks.
fn insert_err(e: DbErr) -> DomainError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("record already exists".to_string()).into()
    } else {
        RepoError::Query(err_str).into()
    }
}

/// Resolve a username to exactly one row. Zero rows is a plain miss; more
/// than one means the unique index is broken, and we fail closed the same
/// way rather than pick an arbitrary account.
async fn find_user_row(db: &DbConn, username: &str) -> Result<user::Model, DomainError> {
    let mut rows = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .all(db)
        .await
        .map_err(query_err)?;

    if rows.len() == 1 {
        Ok(rows.remove(0))
    } else {
        Err(DomainError::UserNotFound)
    }
}

/// PostgreSQL user repository (credential store).
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, candidate: NewUser) -> Result<User, DomainError> {
        // Pre-checks exist to produce a friendly conflict kind, in priority
        // order; they are not atomic with the insert.
        if self.username_exists(&candidate.username).await? {
            return Err(DomainError::UsernameTaken);
        }

        let emails = UserEntity::find()
            .filter(user::Column::Email.eq(&candidate.email))
            .count(&self.db)
            .await
            .map_err(query_err)?;
        if emails > 0 {
            return Err(DomainError::EmailTaken);
        }

        let phones = UserEntity::find()
            .filter(user::Column::PhoneNumber.eq(&candidate.phone_number))
            .count(&self.db)
            .await
            .map_err(query_err)?;
        if phones > 0 {
            return Err(DomainError::PhoneTaken);
        }

        let active: user::ActiveModel = candidate.into();
        let model = active.insert(&self.db).await.map_err(insert_err)?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        find_user_row(&self.db, username).await.map(Into::into)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .map_err(query_err)?;

        Ok(count > 0)
    }
}

/// PostgreSQL book repository (catalog store).
pub struct PostgresBookRepository {
    db: DbConn,
}

impl PostgresBookRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// The shared authorization path for mutations: book by id, actor by
    /// username, then the owner predicate. Runs on every call - the verdict
    /// is never cached across requests.
    async fn find_owned(&self, username: &str, id: i32) -> Result<book::Model, DomainError> {
        let book = BookEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(DomainError::BookNotFound)?;

        let actor = find_user_row(&self.db, username).await?;

        ensure_owner(book.user_id, actor.id)?;
        Ok(book)
    }

    async fn contents_of(&self, book_id: i32) -> Result<Vec<String>, DomainError> {
        let rows = ContentEntity::find()
            .filter(content::Column::BookId.eq(book_id))
            .order_by_asc(content::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|row| row.label).collect())
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let labels = book.contents.clone();

        // The book and its contents land together or not at all.
        let txn = self.db.begin().await.map_err(query_err)?;

        let active: book::ActiveModel = book.into();
        let model = active.insert(&txn).await.map_err(insert_err)?;

        if !labels.is_empty() {
            let rows = labels.iter().map(|label| content::ActiveModel {
                id: sea_orm::ActiveValue::NotSet,
                label: Set(label.clone()),
                book_id: Set(model.id),
            });
            ContentEntity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(insert_err)?;
        }

        txn.commit().await.map_err(query_err)?;

        Ok(model.into_domain(labels))
    }

    async fn find_by_id(&self, id: i32) -> Result<Book, DomainError> {
        let model = BookEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(DomainError::BookNotFound)?;

        let labels = self.contents_of(id).await?;
        Ok(model.into_domain(labels))
    }

    async fn list_all(&self) -> Result<Vec<Book>, DomainError> {
        let models = BookEntity::find()
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let rows = ContentEntity::find()
            .order_by_asc(content::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let mut by_book: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            by_book.entry(row.book_id).or_default().push(row.label);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let labels = by_book.remove(&model.id).unwrap_or_default();
                model.into_domain(labels)
            })
            .collect())
    }

    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        name: &str,
        category: &str,
    ) -> Result<(), DomainError> {
        let book = self.find_owned(username, id).await?;

        // Both fields always overwritten; empty strings are valid values.
        BookEntity::update_many()
            .col_expr(book::Column::Name, Expr::value(name))
            .col_expr(book::Column::Category, Expr::value(category))
            .filter(book::Column::Id.eq(book.id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }

    async fn delete_owned(&self, username: &str, id: i32) -> Result<(), DomainError> {
        let book = self.find_owned(username, id).await?;

        // Content rows cascade at the database level.
        BookEntity::delete_by_id(book.id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}
