//! Book entity for SeaORM. The author sub-record is flattened into
//! `author_*` columns; table-of-contents rows live in the `contents` table.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use bookstack_core::domain::{Author, Book, NewBook};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    pub volume: i32,
    pub published_at: Date,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub publisher: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub author_birthday: Date,
    pub author_nationality: String,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::content::Entity")]
    Content,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Content.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain Book from this row plus its flattened contents.
    pub fn into_domain(self, contents: Vec<String>) -> Book {
        Book {
            id: self.id,
            name: self.name,
            category: self.category,
            volume: self.volume,
            published_at: self.published_at,
            summary: self.summary,
            publisher: self.publisher,
            author: Author {
                first_name: self.author_first_name,
                last_name: self.author_last_name,
                birthday: self.author_birthday,
                nationality: self.author_nationality,
            },
            user_id: self.user_id,
            contents,
        }
    }
}

/// Conversion from a domain NewBook to an insertable ActiveModel. Content
/// rows are inserted separately by the repository.
impl From<NewBook> for ActiveModel {
    fn from(book: NewBook) -> Self {
        Self {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(book.name),
            category: Set(book.category),
            volume: Set(book.volume),
            published_at: Set(book.published_at),
            summary: Set(book.summary),
            publisher: Set(book.publisher),
            author_first_name: Set(book.author.first_name),
            author_last_name: Set(book.author.last_name),
            author_birthday: Set(book.author.birthday),
            author_nationality: Set(book.author.nationality),
            user_id: Set(book.user_id),
        }
    }
}
