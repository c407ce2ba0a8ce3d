//! Create the users, books, and contents tables.
//!
//! The unique indexes on username/email/phone are the real enforcement of
//! signup uniqueness; application pre-checks only shape the error message.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Users::PhoneNumber)
                            .string_len(11)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Gender).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Books::Category).string_len(255).not_null())
                    .col(ColumnDef::new(Books::Volume).integer().not_null())
                    .col(ColumnDef::new(Books::PublishedAt).date().not_null())
                    .col(ColumnDef::new(Books::Summary).text().not_null())
                    .col(ColumnDef::new(Books::Publisher).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Books::AuthorFirstName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Books::AuthorLastName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Books::AuthorBirthday).date().not_null())
                    .col(
                        ColumnDef::new(Books::AuthorNationality)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Books::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_books_user_id")
                            .from(Books::Table, Books::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contents::Label).string_len(255).not_null())
                    .col(ColumnDef::new(Contents::BookId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contents_book_id")
                            .from(Contents::Table, Contents::BookId)
                            .to(Books::Table, Books::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    PhoneNumber,
    Gender,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    Name,
    Category,
    Volume,
    PublishedAt,
    Summary,
    Publisher,
    AuthorFirstName,
    AuthorLastName,
    AuthorBirthday,
    AuthorNationality,
    UserId,
}

#[derive(DeriveIden)]
enum Contents {
    Table,
    Id,
    Label,
    BookId,
}
