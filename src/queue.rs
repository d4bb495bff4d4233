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

use serde::Serialize;

use crate::types::card::Card;
use crate::types::state::CardState;
use crate::types::timestamp::Timestamp;

/// Cards taken from the learning bucket per round.
const LEARNING_RUN: usize = 5;

/// Cards taken from the review bucket per round.
const REVIEW_RUN: usize = 5;

/// Cards taken from the fresh bucket per round.
const FRESH_RUN: usize = 1;

/// The three disjoint partitions of a study queue, each in input order.
pub struct Buckets {
    pub learning: Vec<Card>,
    pub review: Vec<Card>,
    pub fresh: Vec<Card>,
}

/// Partition cards into learning, review-due-today, and fresh buckets.
///
/// Review cards due after the end of the local day are dropped entirely:
/// they are not part of today's session.
pub fn classify(cards: Vec<Card>, now: Timestamp) -> Buckets {
    let horizon = now.end_of_local_day();
    let mut learning = Vec::new();
    let mut review = Vec::new();
    let mut fresh = Vec::new();
    for card in cards {
        if card.state.is_learning() {
            learning.push(card);
        } else if card.state == CardState::Review {
            if card.due <= horizon {
                review.push(card);
            }
        } else {
            fresh.push(card);
        }
    }
    Buckets {
        learning,
        review,
        fresh,
    }
}

/// Interleave the buckets into a single study ordering.
///
/// Each round takes up to 5 learning cards, then up to 5 review cards, then 1
/// fresh card, until a round takes nothing. Learning and review material is
/// cleared in blocks while fresh cards trickle in one per round.
pub fn merge(buckets: Buckets) -> Vec<Card> {
    let Buckets {
        learning,
        review,
        fresh,
    } = buckets;
    let mut out = Vec::with_capacity(learning.len() + review.len() + fresh.len());
    let mut learning = learning.into_iter();
    let mut review = review.into_iter();
    let mut fresh = fresh.into_iter();
    loop {
        let before = out.len();
        out.extend(learning.by_ref().take(LEARNING_RUN));
        out.extend(review.by_ref().take(REVIEW_RUN));
        out.extend(fresh.by_ref().take(FRESH_RUN));
        if out.len() == before {
            break;
        }
    }
    out
}

/// Aggregate counts shown on the card front.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Counts {
    /// Cards never studied.
    pub fresh: usize,
    /// Cards in the learning or relearning steps.
    pub learning: usize,
    /// Review cards due by the end of the local day.
    pub due: usize,
}

/// The ordered list of cards being studied right now, plus the index of the
/// card on display.
///
/// The queue holds no duplicate identifiers and owns no scheduling state: it
/// is discarded when the session ends.
pub struct SessionQueue {
    cards: Vec<Card>,
    index: usize,
}

impl SessionQueue {
    /// Seed a queue from a deck's card list: classify, then merge.
    pub fn new(cards: Vec<Card>, now: Timestamp) -> Self {
        let cards = merge(classify(cards, now));
        Self { cards, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card on display, or None when nothing is left to study.
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    pub fn counts(&self, now: Timestamp) -> Counts {
        let horizon = now.end_of_local_day();
        let mut counts = Counts {
            fresh: 0,
            learning: 0,
            due: 0,
        };
        for card in &self.cards {
            if card.state.is_learning() {
                counts.learning += 1;
            } else if card.state == CardState::Review {
                if card.due <= horizon {
                    counts.due += 1;
                }
            } else {
                counts.fresh += 1;
            }
        }
        counts
    }

    /// Ingest the scheduler's updated record for a just-rated card.
    ///
    /// The rated card is removed; the updated record re-enters only if it is
    /// still due today, otherwise it leaves the session. The remaining cards
    /// are re-classified and re-merged. The display index is kept if still in
    /// bounds (wrapping to 0 otherwise), then nudged forward one slot if it
    /// would land on the card that was just rated.
    pub fn apply_rating(&mut self, updated: Card, now: Timestamp) {
        let rated_id = updated.id.clone();
        let mut next: Vec<Card> = self
            .cards
            .drain(..)
            .filter(|card| card.id != rated_id)
            .collect();
        if updated.due <= now.end_of_local_day() {
            next.push(updated);
        }
        self.cards = merge(classify(next, now));
        if self.index >= self.cards.len() {
            self.index = 0;
        }
        if self.cards.len() > 1 {
            if let Some(current) = self.cards.get(self.index) {
                if current.id == rated_id {
                    self.index = (self.index + 1) % self.cards.len();
                }
            }
        }
    }

    /// Remove a deleted card without reordering the rest.
    ///
    /// Relative state is unchanged by a deletion, so there is no re-merge;
    /// the index is clamped to 0 if it falls off the end.
    pub fn remove(&mut self, card_id: &str) {
        self.cards.retain(|card| card.id != card_id);
        if self.index >= self.cards.len() {
            self.index = 0;
        }
    }
}
