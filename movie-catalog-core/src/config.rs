/* This file is part of the Movie Catalog project - https://github.com/movie-catalog/movie-catalog
*
*  Copyright (C) 2025 Movie Catalog contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use cloneable_errors::{ErrorContext, ResContext};
use reqwest::Url;
use strum::{Display, EnumString, IntoStaticStr};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/";

/// Where the catalog comes from
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataMode {
    /// Talk to the REST API, keeping a local copy of what it returns
    #[strum(to_string = "api", serialize = "true", serialize = "1")]
    Api,
    /// Work purely from the bundled sample data and local storage
    #[default]
    #[strum(to_string = "sample", serialize = "false", serialize = "0")]
    Sample,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CatalogConfig {
    pub api_base_url: Url,
    pub mode: DataMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL should be valid"),
            mode: DataMode::default(),
        }
    }
}

impl CatalogConfig {
    /// Builds a config from optional raw values, empty values count as missing
    pub fn from_values(api_url: Option<&str>, mode: Option<&str>) -> Result<CatalogConfig, ErrorContext> {
        let mut config = CatalogConfig::default();
        if let Some(url) = api_url.map(str::trim).filter(|s| !s.is_empty()) {
            config.api_base_url = Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
        }
        if let Some(mode) = mode.map(str::trim).filter(|s| !s.is_empty()) {
            config.mode = mode.parse().with_context(|| format!("Invalid data mode: {mode}"))?;
        }
        Ok(config)
    }

    pub fn use_api(&self) -> bool {
        self.mode == DataMode::Api
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CatalogConfig::from_values(None, Some("  ")).unwrap();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.mode, DataMode::Sample);
        assert!(!config.use_api());
    }

    #[test]
    fn mode_flags() {
        for (raw, mode) in [("api", DataMode::Api), ("TRUE", DataMode::Api), ("sample", DataMode::Sample), ("false", DataMode::Sample)] {
            assert_eq!(CatalogConfig::from_values(None, Some(raw)).unwrap().mode, mode, "{raw}");
        }
        assert!(CatalogConfig::from_values(None, Some("maybe")).is_err());
    }

    #[test]
    fn api_url() {
        let config = CatalogConfig::from_values(Some("https://films.example.com/v2/"), Some("api")).unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("films.example.com"));
        assert!(CatalogConfig::from_values(Some("not a url"), None).is_err());
    }
}
