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

/// A deck as listed by the server, with its server-side aggregate counts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "new")]
    pub new_count: usize,
    #[serde(rename = "learn")]
    pub learn_count: usize,
    #[serde(rename = "due")]
    pub due_count: usize,
    pub total: usize,
}
