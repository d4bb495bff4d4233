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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::api::RemoteScheduler;
use crate::config::Config;
use crate::error::Fallible;
use crate::queue::SessionQueue;
use crate::session::StudySession;
use crate::study::get::get_handler;
use crate::study::post::post_handler;
use crate::study::state::ServerState;
use crate::study::state::SessionState;
use crate::types::timestamp::Timestamp;

pub async fn start_server(config: Config, deck_id: String, port: u16) -> Fallible<()> {
    let scheduler = Arc::new(RemoteScheduler::new(&config));

    let deck_name = scheduler
        .list_decks()
        .await?
        .into_iter()
        .find(|deck| deck.id == deck_id)
        .map(|deck| deck.name)
        .unwrap_or_else(|| deck_id.clone());

    log::debug!("Loading deck...");
    let cards = scheduler.deck_cards(&deck_id).await?;
    log::debug!("Loaded {} cards.", cards.len());

    let queue = SessionQueue::new(cards, Timestamp::now());
    if queue.is_empty() {
        println!("No cards due today.");
        return Ok(());
    }

    let session = StudySession::new(deck_id, scheduler, queue);
    let state = ServerState {
        deck_name,
        mutable: Arc::new(Mutex::new(SessionState {
            reveal: false,
            finished: false,
            session,
        })),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{port}");

    // Start a separate task to open the browser.
    let url = format!("http://{bind}/");
    let probe = bind.clone();
    tokio::spawn(async move {
        loop {
            if let Ok(stream) = TcpStream::connect(&probe).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        let _ = open::that(url);
    });

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
