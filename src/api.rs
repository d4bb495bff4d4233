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

use async_trait::async_trait;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Serialize;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::deck::DeckSummary;
use crate::types::rating::Rating;

/// The remote spaced-repetition scheduler.
///
/// The scheduling math lives server-side; the client treats it as a black
/// box. Ratings are never retried here: a failed call leaves the session
/// queue untouched and the error surfaces to the caller.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Report a rating and receive the card's updated scheduling record.
    async fn submit_rating(&self, card_id: &str, deck_id: &str, rating: Rating) -> Fallible<Card>;

    /// Delete a card from the server.
    async fn delete_card(&self, card_id: &str) -> Fallible<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRequest<'a> {
    card_id: &'a str,
    deck_id: &'a str,
    rating: Rating,
}

#[derive(Deserialize)]
struct ReviewResponse {
    card: Card,
}

/// HTTP client for the flashcard service.
pub struct RemoteScheduler {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl RemoteScheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str, segment: Option<&str>) -> String {
        match segment {
            Some(segment) => {
                let segment = utf8_percent_encode(segment, NON_ALPHANUMERIC);
                format!("{}{}/{}", self.base_url, path, segment)
            }
            None => format!("{}{}", self.base_url, path),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: reqwest::Response) -> Fallible<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            fail(&format!("server returned {status}"))
        }
    }

    /// List the user's decks with their aggregate counts.
    pub async fn list_decks(&self) -> Fallible<Vec<DeckSummary>> {
        let request = self.authorize(self.client.get(self.url("/decks", None)));
        let response = Self::check(request.send().await?).await?;
        let decks: Vec<DeckSummary> = response.json().await?;
        Ok(decks)
    }

    /// Fetch a deck's full card list.
    pub async fn deck_cards(&self, deck_id: &str) -> Fallible<Vec<Card>> {
        let request = self.authorize(self.client.get(self.url("/cards", Some(deck_id))));
        let response = Self::check(request.send().await?).await?;
        let cards: Vec<Card> = response.json().await?;
        Ok(cards)
    }
}

#[async_trait]
impl Scheduler for RemoteScheduler {
    async fn submit_rating(&self, card_id: &str, deck_id: &str, rating: Rating) -> Fallible<Card> {
        log::debug!("submitting rating {} for card {card_id}", rating.as_str());
        let body = ReviewRequest {
            card_id,
            deck_id,
            rating,
        };
        let request = self
            .authorize(self.client.post(self.url("/reviews", None)))
            .json(&body);
        let response = Self::check(request.send().await?).await?;
        let review: ReviewResponse = response.json().await?;
        Ok(review.card)
    }

    async fn delete_card(&self, card_id: &str) -> Fallible<()> {
        log::debug!("deleting card {card_id}");
        let request = self.authorize(self.client.delete(self.url("/cards", Some(card_id))));
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let config = Config {
            server_url: "http://localhost:3000/".to_string(),
            access_token: None,
        };
        let scheduler = RemoteScheduler::new(&config);
        assert_eq!(scheduler.url("/decks", None), "http://localhost:3000/decks");
        assert_eq!(
            scheduler.url("/cards", Some("abc 123")),
            "http://localhost:3000/cards/abc%20123"
        );
    }

    #[test]
    fn test_review_request_wire_form() {
        let body = ReviewRequest {
            card_id: "c1",
            deck_id: "d1",
            rating: Rating::Good,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cardId": "c1", "deckId": "d1", "rating": "good"})
        );
    }
}
