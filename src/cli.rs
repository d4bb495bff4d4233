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

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::api::RemoteScheduler;
use crate::config::Config;
use crate::error::Fallible;
use crate::queue::SessionQueue;
use crate::study::server::start_server;
use crate::types::timestamp::Timestamp;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study a deck.
    Study {
        /// The deck to study.
        deck_id: String,
        /// Optional path to the config file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Port for the local study interface.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// List decks on the server.
    Decks {
        /// Optional path to the config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a deck's study queue statistics as JSON.
    Stats {
        /// The deck to inspect.
        deck_id: String,
        /// Optional path to the config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study {
            deck_id,
            config,
            port,
        } => {
            let config = Config::load(config.as_deref())?;
            start_server(config, deck_id, port).await
        }
        Command::Decks { config } => {
            let config = Config::load(config.as_deref())?;
            let scheduler = RemoteScheduler::new(&config);
            let decks = scheduler.list_decks().await?;
            if decks.is_empty() {
                println!("No decks.");
                return Ok(());
            }
            for deck in decks {
                println!(
                    "{}  {} (new {}, learning {}, due {}, {} total)",
                    deck.id, deck.name, deck.new_count, deck.learn_count, deck.due_count, deck.total
                );
            }
            Ok(())
        }
        Command::Stats { deck_id, config } => {
            let config = Config::load(config.as_deref())?;
            let scheduler = RemoteScheduler::new(&config);
            let now = Timestamp::now();
            let cards = scheduler.deck_cards(&deck_id).await?;
            let total = cards.len();
            let queue = SessionQueue::new(cards, now);
            let stats = Stats {
                deck_id,
                card_count: total,
                queue_count: queue.len(),
                counts: queue.counts(now),
            };
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    deck_id: String,
    /// All cards in the deck.
    card_count: usize,
    /// Cards in today's study queue.
    queue_count: usize,
    counts: crate::queue::Counts,
}
