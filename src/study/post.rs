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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::study::state::ServerState;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Reveal,
    Delete,
    End,
    Again,
    Hard,
    Good,
    Easy,
}

impl Action {
    pub fn rating(&self) -> Rating {
        match self {
            Action::Again => Rating::Again,
            Action::Hard => Rating::Hard,
            Action::Good => Rating::Good,
            Action::Easy => Rating::Easy,
            _ => panic!("Action does not correspond to a rating"),
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form.action).await {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

async fn action_handler(state: ServerState, action: Action) -> Fallible<()> {
    let mut mutable = state.mutable.lock().await;
    match action {
        Action::Reveal => {
            if !mutable.reveal {
                mutable.reveal = true;
            }
        }
        Action::Again | Action::Hard | Action::Good | Action::Easy => {
            if mutable.reveal {
                let rating = action.rating();
                mutable.session.rate_current(rating, Timestamp::now()).await?;
                mutable.reveal = false;
                if mutable.session.queue().is_empty() {
                    log::debug!("Session completed");
                    mutable.finished = true;
                }
            }
        }
        Action::Delete => {
            mutable.session.delete_current().await?;
            mutable.reveal = false;
            if mutable.session.queue().is_empty() {
                log::debug!("Session completed");
                mutable.finished = true;
            }
        }
        Action::End => {
            log::debug!("Session ended");
            mutable.finished = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_rating() {
        assert_eq!(Action::Again.rating(), Rating::Again);
        assert_eq!(Action::Hard.rating(), Rating::Hard);
        assert_eq!(Action::Good.rating(), Rating::Good);
        assert_eq!(Action::Easy.rating(), Rating::Easy);
    }
}
