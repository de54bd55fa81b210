use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use marquee_catalog::{Session, SoldSeat};
use marquee_core::blob::{BlobError, BlobStore};
use marquee_core::repository::{
    ClaimError, Document, DocumentStore, SessionRepository, StoreError,
};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

const WATCH_CAPACITY: usize = 16;

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Shelf<T> {
    docs: HashMap<String, T>,
    watchers: HashMap<String, broadcast::Sender<Option<T>>>,
}

/// In-memory stand-in for one collection of the hosted document store.
/// Backs the test suite and local development.
pub struct InMemoryStore<T> {
    inner: Mutex<Shelf<T>>,
}

impl<T: Document + Serialize> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Shelf {
                docs: HashMap::new(),
                watchers: HashMap::new(),
            }),
        }
    }

    fn notify(shelf: &Shelf<T>, id: &str, value: Option<T>) {
        if let Some(tx) = shelf.watchers.get(id) {
            // No receivers is fine; observe streams are best-effort.
            let _ = tx.send(value);
        }
    }
}

impl<T: Document + Serialize> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document + Serialize> DocumentStore<T> for InMemoryStore<T> {
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(relock(&self.inner).docs.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(relock(&self.inner).docs.values().cloned().collect())
    }

    async fn add(&self, mut item: T) -> Result<T, StoreError> {
        let mut shelf = relock(&self.inner);
        if item.id().is_empty() {
            item.set_id(Uuid::new_v4().to_string());
        }
        let id = item.id().to_string();
        if shelf.docs.contains_key(&id) {
            return Err(StoreError::Backend(format!("document {id} already exists")));
        }
        shelf.docs.insert(id.clone(), item.clone());
        Self::notify(&shelf, &id, Some(item.clone()));
        debug!(%id, "document added");
        Ok(item)
    }

    async fn update(&self, id: &str, mut item: T) -> Result<T, StoreError> {
        let mut shelf = relock(&self.inner);
        if !shelf.docs.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        item.set_id(id.to_string());
        shelf.docs.insert(id.to_string(), item.clone());
        Self::notify(&shelf, id, Some(item.clone()));
        Ok(item)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut shelf = relock(&self.inner);
        if shelf.docs.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Self::notify(&shelf, id, None);
        Ok(())
    }

    async fn query(&self, field: &str, value: Value) -> Result<Vec<T>, StoreError> {
        let shelf = relock(&self.inner);
        let mut matches = Vec::new();
        for doc in shelf.docs.values() {
            let serialized =
                serde_json::to_value(doc).map_err(|err| StoreError::Backend(err.to_string()))?;
            if serialized.get(field) == Some(&value) {
                matches.push(doc.clone());
            }
        }
        Ok(matches)
    }

    async fn observe(&self, id: &str) -> Result<broadcast::Receiver<Option<T>>, StoreError> {
        let mut shelf = relock(&self.inner);
        let tx = shelf
            .watchers
            .entry(id.to_string())
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0);
        Ok(tx.subscribe())
    }
}

/// In-memory session repository. `claim_seat` is compare-and-append under
/// one lock, which is what prevents two racing purchasers from both
/// claiming a stale-read seat.
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, session: Session) {
        relock(&self.sessions).insert(session.id.clone(), session);
    }

    /// Current state of a session, for assertions and UI refresh.
    pub fn snapshot(&self, id: &str) -> Option<Session> {
        relock(&self.sessions).get(id).cloned()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &str) -> Result<Session, StoreError> {
        relock(&self.sessions)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn claim_seat(
        &self,
        session_id: &str,
        row: u32,
        seat: u32,
        ticket_id: &str,
    ) -> Result<(), ClaimError> {
        let mut sessions = relock(&self.sessions);
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;

        if let Some(holder) = session.sold_seats.iter().find(|s| s.covers(row, seat)) {
            return Err(ClaimError::SeatTaken {
                row,
                seat,
                ticket_id: holder.ticket_id.clone(),
            });
        }

        session.sold_seats.push(SoldSeat {
            row,
            seat,
            ticket_id: ticket_id.to_string(),
        });
        debug!(session = %session_id, row, seat, ticket = %ticket_id, "seat claimed");
        Ok(())
    }

    async fn release_seat(
        &self,
        session_id: &str,
        row: u32,
        seat: u32,
    ) -> Result<(), StoreError> {
        let mut sessions = relock(&self.sessions);
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;
        session.remove_sold_seat(row, seat);
        debug!(session = %session_id, row, seat, "seat released");
        Ok(())
    }
}

/// In-memory blob storage for image bytes.
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, bytes: &[u8], path: &str) -> Result<String, BlobError> {
        let url = format!("mem://{path}");
        relock(&self.blobs).insert(url.clone(), bytes.to_vec());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        relock(&self.blobs)
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| BlobError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marquee_catalog::Review;

    fn review(id: &str, movie_id: &str) -> Review {
        Review {
            id: id.into(),
            user_id: "u1".into(),
            user_name: "Dana".into(),
            movie_id: Some(movie_id.into()),
            cinema_id: None,
            rating: 4.0,
            comment: "Great".into(),
            date: Utc::now(),
            likes: 0,
            photo_urls: vec![],
        }
    }

    #[tokio::test]
    async fn add_assigns_id_and_rejects_duplicates() {
        let store = InMemoryStore::new();
        let added = store.add(review("", "m1")).await.unwrap();
        assert!(!added.id.is_empty());

        let dup = store.add(added.clone()).await;
        assert!(matches!(dup, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn query_matches_serialized_field() {
        let store = InMemoryStore::new();
        store.add(review("r1", "m1")).await.unwrap();
        store.add(review("r2", "m2")).await.unwrap();
        store.add(review("r3", "m1")).await.unwrap();

        let mut found = store
            .query("movie_id", serde_json::json!("m1"))
            .await
            .unwrap();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "r1");
        assert_eq!(found[1].id, "r3");
    }

    #[tokio::test]
    async fn update_and_delete_enforce_existence() {
        let store = InMemoryStore::new();
        let missing = store.update("r9", review("r9", "m1")).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));

        store.add(review("r1", "m1")).await.unwrap();
        store.delete("r1").await.unwrap();
        assert!(matches!(
            store.delete("r1").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn observe_sees_subsequent_writes_and_deletes() {
        let store = InMemoryStore::new();
        store.add(review("r1", "m1")).await.unwrap();

        let mut watch = store.observe("r1").await.unwrap();
        let mut edited = review("r1", "m1");
        edited.comment = "Edited".into();
        store.update("r1", edited).await.unwrap();
        store.delete("r1").await.unwrap();

        let first = watch.recv().await.unwrap();
        assert_eq!(first.unwrap().comment, "Edited");
        let second = watch.recv().await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn claim_seat_is_first_writer_wins() {
        let repo = InMemorySessionRepository::new();
        repo.insert(Session {
            id: "s1".into(),
            movie_id: "m1".into(),
            cinema_id: "c1".into(),
            hall_id: "h1".into(),
            date: Utc::now(),
            price: 300.0,
            format: marquee_catalog::MovieFormat::TwoD,
            is_active: true,
            sold_seats: vec![],
        });

        repo.claim_seat("s1", 1, 1, "t1").await.unwrap();
        let err = repo.claim_seat("s1", 1, 1, "t2").await.unwrap_err();
        assert!(matches!(
            err,
            ClaimError::SeatTaken { ticket_id, .. } if ticket_id == "t1"
        ));

        repo.release_seat("s1", 1, 1).await.unwrap();
        repo.claim_seat("s1", 1, 1, "t2").await.unwrap();
        let snapshot = repo.snapshot("s1").unwrap();
        assert_eq!(snapshot.sold_seats.len(), 1);
        assert_eq!(snapshot.sold_seats[0].ticket_id, "t2");
    }

    #[tokio::test]
    async fn blob_upload_round_trips_url() {
        let blobs = InMemoryBlobStore::new();
        let url = blobs.upload(b"png-bytes", "avatars/u1.png").await.unwrap();
        assert_eq!(url, "mem://avatars/u1.png");
        blobs.delete(&url).await.unwrap();
        assert!(matches!(
            blobs.delete(&url).await,
            Err(BlobError::NotFound(_))
        ));
    }
}
