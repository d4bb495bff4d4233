// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use crate::api::Scheduler;
use crate::error::Fallible;
use crate::queue::SessionQueue;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// A study session over one deck: the queue plus the scheduler it reports to.
///
/// Transitions call the scheduler first and only touch the queue on success,
/// so a failed call leaves the session exactly as it was and the same action
/// can be retried. Callers serialize transitions by holding the session
/// behind a lock across the call.
pub struct StudySession {
    deck_id: String,
    scheduler: Arc<dyn Scheduler>,
    queue: SessionQueue,
}

impl StudySession {
    pub fn new(deck_id: String, scheduler: Arc<dyn Scheduler>, queue: SessionQueue) -> Self {
        Self {
            deck_id,
            scheduler,
            queue,
        }
    }

    pub fn queue(&self) -> &SessionQueue {
        &self.queue
    }

    /// Rate the card on display and advance the queue.
    ///
    /// No-op when the queue is empty.
    pub async fn rate_current(&mut self, rating: Rating, now: Timestamp) -> Fallible<()> {
        let Some(card) = self.queue.current() else {
            return Ok(());
        };
        let card_id = card.id.clone();
        let updated = self
            .scheduler
            .submit_rating(&card_id, &self.deck_id, rating)
            .await?;
        self.queue.apply_rating(updated, now);
        Ok(())
    }

    /// Delete the card on display from the server and drop it from the queue.
    ///
    /// No-op when the queue is empty.
    pub async fn delete_current(&mut self) -> Fallible<()> {
        let Some(card) = self.queue.current() else {
            return Ok(());
        };
        let card_id = card.id.clone();
        self.scheduler.delete_card(&card_id).await?;
        self.queue.remove(&card_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::Map;

    use super::*;
    use crate::error::fail;
    use crate::types::card::Card;
    use crate::types::state::CardState;

    fn fixed_now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap())
    }

    fn card(id: &str, state: CardState, due: Timestamp) -> Card {
        Card {
            id: id.to_string(),
            word: format!("word-{id}"),
            sentence: None,
            reading: format!("reading-{id}"),
            meaning: format!("meaning-{id}"),
            state,
            due,
            extra: Map::new(),
        }
    }

    /// Deterministic scheduler double: returns a canned update, or fails.
    struct FakeScheduler {
        updated: Option<Card>,
        failing: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeScheduler {
        fn returning(updated: Card) -> Self {
            Self {
                updated: Some(updated),
                failing: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                updated: None,
                failing: true,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Scheduler for FakeScheduler {
        async fn submit_rating(
            &self,
            card_id: &str,
            deck_id: &str,
            rating: Rating,
        ) -> Fallible<Card> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("rate {card_id} {deck_id} {}", rating.as_str()));
            if self.failing {
                return fail("scheduler unavailable");
            }
            Ok(self.updated.clone().unwrap())
        }

        async fn delete_card(&self, card_id: &str) -> Fallible<()> {
            self.calls.lock().unwrap().push(format!("delete {card_id}"));
            if self.failing {
                return fail("scheduler unavailable");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_rating_applies_scheduler_update() {
        let now = fixed_now();
        let cards = vec![
            card("a", CardState::Learning, now),
            card("b", CardState::New, now),
        ];
        let scheduler = Arc::new(FakeScheduler::returning(card("a", CardState::Learning, now)));
        let queue = SessionQueue::new(cards, now);
        let mut session = StudySession::new("d1".to_string(), scheduler.clone(), queue);
        session.rate_current(Rating::Again, now).await.unwrap();
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.queue().current().unwrap().id, "b");
        assert_eq!(
            *scheduler.calls.lock().unwrap(),
            vec!["rate a d1 again".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_rating_leaves_queue_unchanged() {
        let now = fixed_now();
        let cards = vec![
            card("a", CardState::Learning, now),
            card("b", CardState::New, now),
        ];
        let queue = SessionQueue::new(cards, now);
        let mut session =
            StudySession::new("d1".to_string(), Arc::new(FakeScheduler::failing()), queue);
        let result = session.rate_current(Rating::Good, now).await;
        assert!(result.is_err());
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.queue().current().unwrap().id, "a");
    }

    #[tokio::test]
    async fn test_rating_empty_queue_is_a_no_op() {
        let now = fixed_now();
        let scheduler = Arc::new(FakeScheduler::failing());
        let queue = SessionQueue::new(Vec::new(), now);
        let mut session = StudySession::new("d1".to_string(), scheduler.clone(), queue);
        session.rate_current(Rating::Good, now).await.unwrap();
        assert!(scheduler.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_current_card() {
        let now = fixed_now();
        let cards = vec![
            card("a", CardState::Learning, now),
            card("b", CardState::Learning, now),
        ];
        let updated = card("unused", CardState::New, now);
        let scheduler = Arc::new(FakeScheduler::returning(updated));
        let queue = SessionQueue::new(cards, now);
        let mut session = StudySession::new("d1".to_string(), scheduler.clone(), queue);
        session.delete_current().await.unwrap();
        assert_eq!(session.queue().len(), 1);
        assert_eq!(session.queue().current().unwrap().id, "b");
        assert_eq!(
            *scheduler.calls.lock().unwrap(),
            vec!["delete a".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_queue_unchanged() {
        let now = fixed_now();
        let cards = vec![card("a", CardState::Learning, now)];
        let queue = SessionQueue::new(cards, now);
        let mut session =
            StudySession::new("d1".to_string(), Arc::new(FakeScheduler::failing()), queue);
        let result = session.delete_current().await;
        assert!(result.is_err());
        assert_eq!(session.queue().len(), 1);
    }
}
