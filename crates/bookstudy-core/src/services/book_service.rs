// ============================================================================
// Book Study Core - Book Service
// File: crates/bookstudy-core/src/services/book_service.rs
// ============================================================================
//! Book CRUD

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Book, BookChanges};
use crate::error::DomainError;
use crate::repositories::BookRepository;

pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn list(&self) -> Result<Vec<Book>, DomainError> {
        self.books.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Book, DomainError> {
        self.books
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::BookNotFound(id))
    }

    pub async fn create(
        &self,
        title: &str,
        author: Option<&str>,
        language: Option<&str>,
    ) -> Result<Book, DomainError> {
        let book = Book::new(title, author, language)?;
        let created = self.books.create(&book).await?;
        info!("Created book {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, changes: BookChanges) -> Result<Book, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::ValidationError("No fields to update".to_string()));
        }
        self.books
            .update(&id, &changes)
            .await?
            .ok_or(DomainError::BookNotFound(id))
    }

    /// Delete a book together with its sections and chunks.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.books.delete(&id).await? {
            return Err(DomainError::BookNotFound(id));
        }
        info!("Deleted book {}", id);
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.books.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockBookRepository;
    use mockall::predicate::eq;

    fn sample_book() -> Book {
        Book::new("Rust in Action", Some("Tim"), None).expect("valid book")
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let id = Uuid::new_v4();
        let mut repo = MockBookRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repo));
        let result = service.get(id).await;

        assert!(matches!(result, Err(DomainError::BookNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_create_applies_language_default() {
        let mut repo = MockBookRepository::new();
        repo.expect_create()
            .withf(|book| book.title == "Dune" && book.language == "ko" && book.author.is_none())
            .times(1)
            .returning(|book| Ok(book.clone()));

        let service = BookService::new(Arc::new(repo));
        let book = service.create("  Dune ", Some("  "), None).await.expect("created");

        assert_eq!(book.title, "Dune");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_without_touching_storage() {
        let mut repo = MockBookRepository::new();
        repo.expect_create().times(0);

        let service = BookService::new(Arc::new(repo));
        let result = service.create("   ", None, None).await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_returns_changed_book() {
        let book = sample_book();
        let id = book.id;
        let mut repo = MockBookRepository::new();
        repo.expect_update()
            .withf(move |book_id, changes| *book_id == id && changes.title.as_deref() == Some("New"))
            .times(1)
            .returning(move |_, changes| {
                let mut updated = book.clone();
                changes.apply(&mut updated);
                Ok(Some(updated))
            });

        let service = BookService::new(Arc::new(repo));
        let changes = BookChanges::new(Some("New"), None, None, None).expect("valid changes");
        let updated = service.update(id, changes).await.expect("updated");

        assert_eq!(updated.title, "New");
        assert_eq!(updated.author.as_deref(), Some("Tim"));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_changes() {
        let mut repo = MockBookRepository::new();
        repo.expect_update().times(0);

        let service = BookService::new(Arc::new(repo));
        let result = service.update(Uuid::new_v4(), BookChanges::default()).await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let mut repo = MockBookRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = BookService::new(Arc::new(repo));

        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(DomainError::BookNotFound(_))
        ));
    }
}
