//! Session settings
//!
//! Read from key/value pairs: the page query string on the web
//! (`?name=Alice&seed=7`), `BLOB_ARENA_*` environment variables natively.
//! Nothing is persisted; every reload starts from these.

use serde::{Deserialize, Serialize};

/// Session settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Name drawn on the player's circle
    pub player_name: String,
    /// Draw the player's name at all
    pub show_name: bool,
    /// Fixed RNG seed; a time-based seed is used when unset
    pub seed: Option<u64>,
    /// Stop a headless run after this many frames
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "You".to_string(),
            show_name: true,
            seed: None,
            max_ticks: None,
        }
    }
}

/// Longest player name that is drawn in full
pub const MAX_NAME_CHARS: usize = 16;

impl Settings {
    /// Environment variable prefix for native runs
    pub const ENV_PREFIX: &'static str = "BLOB_ARENA_";

    /// Build settings from `(key, value)` pairs. Unknown keys are ignored and
    /// malformed values keep their defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            settings.apply(key.as_ref(), value.as_ref());
        }
        settings
    }

    /// Parse a raw URL query string such as `?name=Big+Blob&seed=7`.
    ///
    /// The string is split on `&` and `=` before anything is decoded, so
    /// encoded delimiters (`%26`, `%3D`, `%2B`) survive inside values. Each
    /// key and value has `+` turned into a space and is then handed to
    /// `decode` for percent-decoding. A part that fails to decode is kept raw.
    pub fn from_query<D>(query: &str, decode: D) -> Self
    where
        D: Fn(&str) -> Option<String>,
    {
        let decode_part = |part: &str| {
            let spaced = part.replace('+', " ");
            decode(&spaced).unwrap_or_else(|| {
                log::warn!("Could not decode query part {:?}", part);
                spaced
            })
        };
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(query.split('&').filter(|p| !p.is_empty()).map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_part(key), decode_part(value))
        }))
    }

    /// Read `BLOB_ARENA_NAME`, `BLOB_ARENA_SEED`, ... from the environment
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars().filter_map(|(key, value)| {
            key.strip_prefix(Self::ENV_PREFIX)
                .map(|k| (k.to_ascii_lowercase(), value))
        }))
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key.to_ascii_lowercase().as_str() {
            "name" => {
                let name = value.trim();
                if name.is_empty() {
                    log::warn!("Ignoring empty player name");
                } else {
                    self.player_name = name.chars().take(MAX_NAME_CHARS).collect();
                }
            }
            "show_name" => match parse_bool(value) {
                Some(show) => self.show_name = show,
                None => log::warn!("Ignoring invalid show_name: {:?}", value),
            },
            "seed" => match value.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid seed: {:?}", value),
            },
            "ticks" | "max_ticks" => match value.trim().parse() {
                Ok(ticks) => self.max_ticks = Some(ticks),
                Err(_) => log::warn!("Ignoring invalid tick limit: {:?}", value),
            },
            _ => {}
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
