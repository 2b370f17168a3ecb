use fci_crawler::CrawlerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiderConfig {
    /// Keep groups, sections and breed links between calls
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Site root that relative links are resolved against
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    #[serde(default = "default_groups_uri")]
    pub groups_uri: String,

    #[serde(default = "default_provisional_uri")]
    pub provisional_uri: String,

    #[serde(default)]
    pub crawler: CrawlerConfig,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            cache: default_cache(),
            base_uri: default_base_uri(),
            groups_uri: default_groups_uri(),
            provisional_uri: default_provisional_uri(),
            crawler: CrawlerConfig::default(),
        }
    }
}

fn default_cache() -> bool {
    true
}

fn default_base_uri() -> String {
    String::from("http://fci.be")
}

fn default_groups_uri() -> String {
    String::from("http://fci.be/en/Nomenclature/")
}

fn default_provisional_uri() -> String {
    String::from("http://fci.be/en/nomenclature/provisoire.aspx")
}
