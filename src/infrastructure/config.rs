// Configuration - Dashboard settings from file and environment
use crate::application::dashboard_composer::{DEFAULT_HEADROOM, DashboardStyle};
use crate::domain::sales::SalesSeries;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub presentation: PresentationSettings,
    pub sales: SalesSeries,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PresentationSettings {
    /// Page heading and browser title
    pub title: String,
    /// Caption above the bar chart
    pub bar_title: String,
    pub height: u32,
    pub headroom: f64,
    pub background: String,
    pub plotly_js: String,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        let style = DashboardStyle::default();
        Self {
            title: "Actual VS Target".to_string(),
            bar_title: style.bar_title,
            height: style.height,
            headroom: DEFAULT_HEADROOM,
            background: style.background,
            plotly_js: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

impl PresentationSettings {
    pub fn dashboard_style(&self) -> DashboardStyle {
        DashboardStyle {
            bar_title: self.bar_title.clone(),
            height: self.height,
            background: self.background.clone(),
        }
    }
}

/// Loads `config/dashboard.*`, then `DASHBOARD__SECTION__KEY` overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .try_parsing(true)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
pub fn parse_dashboard_config(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
