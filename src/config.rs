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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

const CONFIG_FILE_NAME: &str = "kotoba.toml";

/// Client configuration: where the flashcard service lives and how to
/// authenticate against it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server_url: String,
    pub access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            access_token: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist. Otherwise `kotoba.toml` in the
    /// working directory is used if present, else defaults. The
    /// `KOTOBA_SERVER_URL` and `KOTOBA_ACCESS_TOKEN` environment variables
    /// override file values.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return fail("config file does not exist.");
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        if let Ok(url) = std::env::var("KOTOBA_SERVER_URL") {
            config.server_url = url;
        }
        if let Ok(token) = std::env::var("KOTOBA_ACCESS_TOKEN") {
            config.access_token = Some(token);
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Fallible<Self> {
        let content = read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
