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

/// A card's scheduling state, as assigned by the remote scheduler.
///
/// The wire encoding is a small integer, 0 through 3.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CardState {
    /// Never studied.
    New,
    /// In the short-interval learning steps.
    Learning,
    /// On a long-interval schedule, surfaced only when due.
    Review,
    /// Lapsed out of review, back in the learning steps.
    Relearning,
}

impl CardState {
    /// Whether the card belongs in the learning bucket of the study queue.
    ///
    /// Learning and Relearning are distinct states to the scheduler, but the
    /// queue treats them identically.
    pub fn is_learning(self) -> bool {
        matches!(self, CardState::Learning | CardState::Relearning)
    }

    pub fn code(self) -> u8 {
        u8::from(self)
    }
}

impl From<CardState> for u8 {
    fn from(state: CardState) -> u8 {
        match state {
            CardState::New => 0,
            CardState::Learning => 1,
            CardState::Review => 2,
            CardState::Relearning => 3,
        }
    }
}

impl TryFrom<u8> for CardState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CardState::New),
            1 => Ok(CardState::Learning),
            2 => Ok(CardState::Review),
            3 => Ok(CardState::Relearning),
            other => Err(format!("unknown card state code: {other}")),
        }
    }
}
