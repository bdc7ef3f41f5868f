use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use url::Url;


pub const DEFAULT_SERVER_ADDRESS: &str = "localhost:8000";

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // `host:port` of the game server; both HTTP and WebSocket endpoints live there.
    pub server_address: String,
    // Logs go to stderr if not set.
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_address: DEFAULT_SERVER_ADDRESS.to_owned(),
            log_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Cannot parse config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> { Ok(serde_yaml::from_str(contents)?) }

    pub fn new_game_url(&self) -> anyhow::Result<Url> {
        let url = format!("http://{}/new_game/", self.server_address);
        Url::parse(&url).with_context(|| format!("Invalid server address: {}", self.server_address))
    }

    pub fn ws_url(&self, game_id: &str) -> anyhow::Result<Url> {
        let base = format!("ws://{}/", self.server_address);
        let mut url =
            Url::parse(&base).with_context(|| format!("Invalid server address: {}", self.server_address))?;
        url.path_segments_mut()
            .map_err(|()| anyhow!("Server address cannot be a base: {}", self.server_address))?
            .pop_if_empty()
            .extend(["ws", game_id]);
        Ok(url)
    }
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.new_game_url().unwrap().as_str(), "http://localhost:8000/new_game/");
        assert_eq!(config.ws_url("7f3a").unwrap().as_str(), "ws://localhost:8000/ws/7f3a");
    }

    #[test]
    fn parse_yaml() {
        let config = ClientConfig::from_yaml(indoc! {"
            server_address: games.example.org:9000
            log_file: /tmp/game_hub.log
        "})
        .unwrap();
        assert_eq!(config.server_address, "games.example.org:9000");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/game_hub.log")));
        assert_eq!(config.ws_url("g1").unwrap().as_str(), "ws://games.example.org:9000/ws/g1");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = ClientConfig::from_yaml("log_file: hub.log").unwrap();
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
    }

    #[test]
    fn game_id_is_escaped() {
        let config = ClientConfig::default();
        assert_eq!(config.ws_url("a b/c").unwrap().as_str(), "ws://localhost:8000/ws/a%20b%2Fc");
    }
}
