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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::types::state::CardState;
use crate::types::timestamp::Timestamp;

/// A unit of study material, as stored by the remote service.
///
/// The scheduling fields (`state`, `due`) are owned by the remote scheduler:
/// the client reads them to build the study queue but never changes them
/// itself. Scheduling metrics this client does not interpret (stability,
/// difficulty, repetition counts, and so on) ride along in `extra` and are
/// sent back unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    /// The vocabulary word being studied.
    pub word: String,
    /// An example sentence using the word, if the card has one.
    #[serde(default)]
    pub sentence: Option<String>,
    /// The phonetic reading of the word.
    pub reading: String,
    pub meaning: String,
    pub state: CardState,
    /// The next scheduled study time. Meaningful when `state` is Review.
    pub due: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
