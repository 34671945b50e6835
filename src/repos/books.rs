//! Recipe books

use std::sync::Arc;

use super::Repository;
use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::{Book, BookDraft};

/// Access to `api/books`
pub struct BookRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> BookRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Books belonging to a user
    pub async fn by_user(&self, user_id: i64) -> Option<Vec<Book>> {
        settle(
            "load user books",
            self.api
                .authorized(Method::Get, &format!("api/books/user/{user_id}"))
                .fetch()
                .await,
        )
    }

    /// Books authored by a user
    pub async fn by_author(&self, user_id: i64) -> Option<Vec<Book>> {
        settle(
            "load author books",
            self.api
                .authorized(Method::Get, &format!("api/books/author/{user_id}"))
                .fetch()
                .await,
        )
    }

    /// Books of the logged-in user, using the cached user id
    pub async fn current_user_books(&self) -> Option<Vec<Book>> {
        let Some(user_id) = self.api.credentials().user_id() else {
            tracing::warn!("Cannot load books: no cached user id");
            return None;
        };
        self.by_user(user_id).await
    }

    /// Every public book
    pub async fn public_books(&self) -> Option<Vec<Book>> {
        settle(
            "load public books",
            self.api.authorized(Method::Get, "api/books/public").fetch().await,
        )
    }

    /// One public book
    pub async fn public_book(&self, id: i64) -> Option<Book> {
        settle(
            "load public book",
            self.api
                .authorized(Method::Get, &format!("api/books/public/{id}"))
                .fetch()
                .await,
        )
    }

    /// Add a recipe to a book
    pub async fn add_recipe(&self, book_id: i64, recipe_id: i64) -> bool {
        settle_ok(
            "add recipe to book",
            self.api
                .authorized(Method::Post, &format!("api/books/{book_id}/recipes/{recipe_id}"))
                .execute()
                .await,
        )
    }

    /// Remove a recipe from one book
    pub async fn remove_recipe(&self, book_id: i64, recipe_id: i64) -> bool {
        settle_ok(
            "remove recipe from book",
            self.api
                .authorized(Method::Delete, &format!("api/books/{book_id}/recipes/{recipe_id}"))
                .execute()
                .await,
        )
    }

    /// Remove a recipe from every book of the logged-in user.
    ///
    /// Each affected book is rewritten without the recipe, one update at a
    /// time. Updates continue after a failure and applied ones are not
    /// reverted, so a `false` result can leave some books already updated.
    /// Returns `true` when no book references the recipe.
    pub async fn remove_recipe_from_all_books(&self, recipe_id: i64) -> bool {
        let Some(user_id) = self.api.credentials().user_id() else {
            tracing::warn!("Cannot remove recipe {recipe_id} from books: no cached user id");
            return false;
        };
        let Some(books) = self.by_user(user_id).await else {
            return false;
        };

        let mut all_updated = true;
        for book in books.iter().filter(|b| b.contains_recipe(recipe_id)) {
            let Some(book_id) = book.id else {
                continue;
            };
            let draft = book.to_draft(user_id).without_recipe(recipe_id);
            if self.update(book_id, &draft).await.is_none() {
                tracing::warn!("Book {book_id} still references recipe {recipe_id}");
                all_updated = false;
            }
        }
        all_updated
    }
}

impl<T: Transport> Repository for BookRepository<T> {
    type Item = Book;
    type Id = i64;
    type Draft = BookDraft;

    async fn list(&self) -> Option<Vec<Book>> {
        settle(
            "load books",
            self.api.authorized(Method::Get, "api/books").fetch().await,
        )
    }

    async fn get_by_id(&self, id: i64) -> Option<Book> {
        settle(
            "load book",
            self.api
                .authorized(Method::Get, &format!("api/books/{id}"))
                .fetch()
                .await,
        )
    }

    async fn create(&self, draft: &BookDraft) -> Option<Book> {
        settle(
            "create book",
            self.api
                .authorized(Method::Post, "api/books")
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn update(&self, id: i64, draft: &BookDraft) -> Option<Book> {
        settle(
            "update book",
            self.api
                .authorized(Method::Put, &format!("api/books/{id}"))
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn delete(&self, id: i64) -> bool {
        settle_ok(
            "delete book",
            self.api
                .authorized(Method::Delete, &format!("api/books/{id}"))
                .execute()
                .await,
        )
    }
}
