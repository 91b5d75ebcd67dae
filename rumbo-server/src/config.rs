use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// CSV of street nodes (`id,lat,lon`)
    pub nodes: PathBuf,
    /// CSV of street edges (`source,target,name,length_m,bearing_deg`)
    pub edges: PathBuf,
    /// CSV of geocodable places (`name,lat,lon`)
    pub places: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            nodes = "data/nodes.csv"
            edges = "data/edges.csv"
            places = "data/places.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }
}
