//! In-memory collaborators for unit tests.

use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    classifier::{client::CompletionRequest, CompletionClient},
    config::test_config,
    error::AppError,
    line::{Message, MessagingClient},
    meals::{Location, MealRecord, MealStore, NewMealRecord},
    state::AppState,
};

#[derive(Default)]
pub struct MemoryMealStore {
    rows: Mutex<Vec<MealRecord>>,
    token_ids: Mutex<HashSet<String>>,
    fail_writes: AtomicBool,
}

impl MemoryMealStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    /// Index of the newest row for `user_id`; later inserts win timestamp ties.
    fn latest_index(rows: &[MealRecord], user_id: &str) -> Option<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, r)| r.user_id == user_id)
            .max_by(|(ia, a), (ib, b)| a.created_at.cmp(&b.created_at).then(ia.cmp(ib)))
            .map(|(i, _)| i)
    }
}

fn apply(record: &mut MealRecord, location: &Location) {
    record.latitude = Some(location.latitude);
    record.longitude = Some(location.longitude);
    record.location_name = location.name.clone();
}

#[async_trait]
impl MealStore for MemoryMealStore {
    async fn insert(&self, record: NewMealRecord) -> Result<Option<Uuid>, AppError> {
        self.check_writable()?;
        if let Some(token_id) = &record.token_id {
            if !self.token_ids.lock().unwrap().insert(token_id.clone()) {
                return Ok(None);
            }
        }
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(MealRecord {
            id,
            user_id: record.user_id,
            food_name: record.food_name,
            protein: record.protein,
            carbohydrate: record.carbohydrate,
            fat: record.fat,
            sodium: record.sodium,
            calories: record.calories,
            materials: record.materials,
            details: record.details,
            latitude: None,
            longitude: None,
            location_name: None,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(Some(id))
    }

    async fn update_location(
        &self,
        user_id: &str,
        location: &Location,
    ) -> Result<Option<Uuid>, AppError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(i) = Self::latest_index(&rows, user_id) else {
            return Ok(None);
        };
        apply(&mut rows[i], location);
        Ok(Some(rows[i].id))
    }

    async fn update_location_for(
        &self,
        user_id: &str,
        id: Uuid,
        location: &Location,
    ) -> Result<bool, AppError> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id && r.user_id == user_id) {
            Some(r) => {
                apply(r, location);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<MealRecord>, AppError> {
        let rows = self.rows.lock().unwrap();
        let mut mine: Vec<(usize, &MealRecord)> =
            rows.iter().enumerate().filter(|(_, r)| r.user_id == user_id).collect();
        mine.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));
        Ok(mine
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(_, r)| r.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    replies: Mutex<Vec<(String, Vec<Message>)>>,
    pushes: Mutex<Vec<(String, Vec<Message>)>>,
    downloads: Mutex<Vec<String>>,
}

impl RecordingMessenger {
    pub fn replies(&self) -> Vec<(String, Vec<Message>)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn pushes(&self) -> Vec<(String, Vec<Message>)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingClient for RecordingMessenger {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), AppError> {
        self.replies.lock().unwrap().push((reply_token.to_string(), messages));
        Ok(())
    }

    async fn push(&self, user_id: &str, messages: Vec<Message>) -> Result<(), AppError> {
        self.pushes.lock().unwrap().push((user_id.to_string(), messages));
        Ok(())
    }

    async fn get_content(&self, message_id: &str) -> Result<Bytes, AppError> {
        self.downloads.lock().unwrap().push(message_id.to_string());
        Ok(Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]))
    }
}

/// Answers completions from a fixed script, in order.
pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(script: Vec<Result<String, AppError>>) -> Self {
        Self { script: Mutex::new(script.into()), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Upstream { status: 500, body: "script exhausted".into() }))
    }
}

pub struct Fakes {
    pub meals: Arc<MemoryMealStore>,
    pub messaging: Arc<RecordingMessenger>,
    pub completion: Arc<ScriptedCompletion>,
}

pub fn fake_state(script: Vec<Result<String, AppError>>) -> (AppState, Fakes) {
    let fakes = Fakes {
        meals: Arc::new(MemoryMealStore::default()),
        messaging: Arc::new(RecordingMessenger::default()),
        completion: Arc::new(ScriptedCompletion::new(script)),
    };
    let state = AppState::from_parts(
        Arc::new(test_config()),
        fakes.meals.clone(),
        fakes.messaging.clone(),
        fakes.completion.clone(),
    );
    (state, fakes)
}

/// Behaviour every `MealStore` must share; run against the in-memory store here
/// and against Postgres in `meals::repo`.
pub mod store_contract {
    use super::*;

    pub fn meal(user: &str, name: &str) -> NewMealRecord {
        NewMealRecord {
            user_id: user.into(),
            food_name: name.into(),
            protein: None,
            carbohydrate: None,
            fat: None,
            sodium: None,
            calories: Some(100.0),
            materials: None,
            details: None,
            token_id: None,
        }
    }

    async fn insert(store: &dyn MealStore, record: NewMealRecord) -> Uuid {
        store.insert(record).await.unwrap().expect("fresh record")
    }

    pub async fn list_recent_is_capped_and_newest_first(store: &dyn MealStore) {
        for n in [0usize, 1, 4, 5, 8] {
            let user = format!("U{n}");
            for i in 0..n {
                insert(store, meal(&user, &format!("meal {i}"))).await;
            }
            insert(store, meal("someone-else", "other")).await;

            let recent = store.list_recent(&user, 5).await.unwrap();
            assert_eq!(recent.len(), n.min(5));
            if n > 0 {
                assert_eq!(recent[0].food_name, format!("meal {}", n - 1));
            }
            assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            assert!(recent.iter().all(|r| r.user_id == user));
        }
    }

    pub async fn update_location_is_last_write_wins(store: &dyn MealStore) {
        insert(store, meal("U1", "first")).await;
        let latest = insert(store, meal("U1", "second")).await;

        let a = Location { latitude: 1.0, longitude: 2.0, name: Some("A".into()) };
        let b = Location { latitude: 3.0, longitude: 4.0, name: None };
        assert_eq!(store.update_location("U1", &a).await.unwrap(), Some(latest));
        assert_eq!(store.update_location("U1", &b).await.unwrap(), Some(latest));

        let all = store.list_recent("U1", 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, latest);
        assert_eq!((all[0].latitude, all[0].longitude), (Some(3.0), Some(4.0)));
        assert_eq!(all[0].location_name, None);
        assert_eq!(all[1].latitude, None);
    }

    pub async fn update_location_for_targets_owned_record_only(store: &dyn MealStore) {
        let first = insert(store, meal("U1", "first")).await;
        insert(store, meal("U1", "second")).await;
        let loc = Location { latitude: 5.0, longitude: 6.0, name: Some("Home".into()) };

        assert!(!store.update_location_for("U2", first, &loc).await.unwrap());
        assert!(store.update_location_for("U1", first, &loc).await.unwrap());

        let all = store.list_recent("U1", 10).await.unwrap();
        assert_eq!(all[1].id, first);
        assert_eq!(all[1].location_name.as_deref(), Some("Home"));
        assert_eq!(all[0].location_name, None);
    }

    pub async fn no_records_means_nothing_to_locate(store: &dyn MealStore) {
        let loc = Location { latitude: 0.0, longitude: 0.0, name: None };
        assert_eq!(store.update_location("nobody", &loc).await.unwrap(), None);
    }

    pub async fn same_token_inserts_once(store: &dyn MealStore) {
        let mut first = meal("U1", "Pad Thai");
        first.token_id = Some("jti-1".into());
        assert!(store.insert(first.clone()).await.unwrap().is_some());
        assert_eq!(store.insert(first).await.unwrap(), None);

        let mut other = meal("U1", "Pad Thai");
        other.token_id = Some("jti-2".into());
        assert!(store.insert(other).await.unwrap().is_some());
        // Untokened records never collide.
        insert(store, meal("U1", "manual")).await;
        insert(store, meal("U1", "manual")).await;

        assert_eq!(store.list_recent("U1", 10).await.unwrap().len(), 4);
    }

    mod memory {
        use super::*;

        #[tokio::test]
        async fn list_recent_is_capped_and_newest_first() {
            super::list_recent_is_capped_and_newest_first(&MemoryMealStore::default()).await;
        }

        #[tokio::test]
        async fn update_location_is_last_write_wins() {
            super::update_location_is_last_write_wins(&MemoryMealStore::default()).await;
        }

        #[tokio::test]
        async fn update_location_for_targets_owned_record_only() {
            super::update_location_for_targets_owned_record_only(&MemoryMealStore::default())
                .await;
        }

        #[tokio::test]
        async fn no_records_means_nothing_to_locate() {
            super::no_records_means_nothing_to_locate(&MemoryMealStore::default()).await;
        }

        #[tokio::test]
        async fn same_token_inserts_once() {
            super::same_token_inserts_once(&MemoryMealStore::default()).await;
        }
    }
}
