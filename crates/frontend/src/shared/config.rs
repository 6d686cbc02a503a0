use serde::Deserialize;

use super::api_utils::api_base;
use super::locale::PageLocale;

/// id элемента `<script type="application/toml">`, которым страница
/// может переопределить настройки по умолчанию
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PageConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub page: PageSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ApiConfig {
    /// Пустая строка — адрес вычисляется из window.location
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PageSettings {
    #[serde(default)]
    pub locale: PageLocale,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_root_selector")]
    pub root_selector: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            locale: PageLocale::default(),
            currency: default_currency(),
            root_selector: default_root_selector(),
        }
    }
}

fn default_currency() -> String {
    "₽".to_string()
}

fn default_root_selector() -> String {
    "#transactions-page".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r##"
[api]
base_url = ""

[page]
locale = "en"
currency = "₽"
root_selector = "#transactions-page"
"##;

impl PageConfig {
    pub fn api_base_url(&self) -> String {
        if self.api.base_url.trim().is_empty() {
            api_base()
        } else {
            self.api.base_url.trim().to_string()
        }
    }
}

pub fn parse_config(text: &str) -> Result<PageConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load configuration
///
/// Search order:
/// 1. `<script id="page-config">` in the host page
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<PageConfig, toml::de::Error> {
    if let Some(text) = read_config_element() {
        log::info!("Loading config from #{}", CONFIG_ELEMENT_ID);
        return parse_config(&text);
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn read_config_element() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|t| !t.trim().is_empty())
}
