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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::queue::Counts;
use crate::study::state::ServerState;
use crate::study::template::page_template;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().await;
    let body = match mutable.session.queue().current() {
        None => completion(),
        Some(_) if mutable.finished => completion(),
        Some(card) => {
            let counts = mutable.session.queue().counts(Timestamp::now());
            session_page(&state.deck_name, card, counts, mutable.reveal)
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn completion() -> Markup {
    html! {
        div.finished {
            h1 {
                "Session Completed"
            }
        }
    }
}

fn session_page(deck_name: &str, card: &Card, counts: Counts, reveal: bool) -> Markup {
    let card_content = if reveal {
        html! {
            div.content {
                div.reading {
                    (card.reading)
                }
                div.sentence {
                    @match &card.sentence {
                        Some(sentence) => {
                            (sentence)
                        }
                        None => {
                            "No example sentence."
                        }
                    }
                }
                div.meaning {
                    (card.meaning)
                }
            }
        }
    } else {
        html! {
            div.content {
                div.word {
                    (card.word)
                }
                div.counts {
                    span.count-fresh title="New" { (counts.fresh) }
                    span.count-learning title="Learning" { (counts.learning) }
                    span.count-due title="Due" { (counts.due) }
                }
            }
        }
    };
    let card_controls = if reveal {
        html! {
            form action="/" method="post" {
                input id="delete" type="submit" name="action" value="Delete";
                div.spacer {}
                input id="again" type="submit" name="action" value="Again";
                input id="hard" type="submit" name="action" value="Hard";
                input id="good" type="submit" name="action" value="Good";
                input id="easy" type="submit" name="action" value="Easy";
                div.spacer {}
                input id="end" type="submit" name="action" value="End";
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                input id="delete" type="submit" name="action" value="Delete";
                div.spacer {}
                input id="reveal" type="submit" name="action" value="Reveal";
                div.spacer {}
                input id="end" type="submit" name="action" value="End";
            }
        }
    };
    html! {
        div.root {
            div.card {
                div.header {
                    h1 {
                        (deck_name)
                    }
                }
                (card_content)
                div.controls {
                    (card_controls)
                }
            }
        }
    }
}
