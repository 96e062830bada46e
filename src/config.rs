use std::{fs::File, io::Read};

use camino::Utf8PathBuf;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub api: Api,
    pub session: Session,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Api {
    /// The songs resource itself, e.g. `https://example.org/api/songs`
    pub base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/songs".into(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Session {
    /// JSON key-value file holding the session token
    pub store: Utf8PathBuf,
    pub key: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            store: "session.json".into(),
            key: songdesk_core::TOKEN_KEY.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

const DEFAULT_CFG: &str = "songdesk.toml";
impl Config {
    pub fn new(path: Option<String>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path,
            None if !std::path::Path::new(DEFAULT_CFG).exists() => {
                info!("no config file found, using built-in defaults");
                return Ok(Self::default());
            }
            None => {
                info!("no config file path provided, using default ({DEFAULT_CFG})");
                DEFAULT_CFG.to_string()
            }
        };

        let mut fh = File::open(path)?;
        let mut data = String::new();
        fh.read_to_string(&mut data)?;

        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, Error> {
        Ok(toml::from_str(data)?)
    }
}
