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
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use gloo_console::error;
use movie_catalog_core::CatalogConfig;

use crate::built_info;

pub const SEARCH_DEBOUNCE_MS: u32 = 400;
pub const BANNER_DISMISS_MS: u32 = 3_000;
pub const HOME_GENRE_ROWS: usize = 6;
pub const SETTINGS_KEY: &str = "movie_catalog_settings";
pub const RATING_SCORES: std::ops::RangeInclusive<u8> = movie_catalog_core::SCORE_RANGE;

// Configuration, fixed at build time

pub static CONFIG: LazyLock<CatalogConfig> = LazyLock::new(|| {
    CatalogConfig::from_values(option_env!("MOVIE_CATALOG_API_URL"), option_env!("MOVIE_CATALOG_USE_API"))
        .unwrap_or_else(|e| {
            error!(format!("Invalid build-time configuration, falling back to defaults: {e:?}"));
            CatalogConfig::default()
        })
});

// Data based on build-time constants

pub static VERSION_STRING: LazyLock<&'static str>                  = LazyLock::new(create_version_string);
pub static COMMIT_LINK:    LazyLock<Option<&'static str>>          = LazyLock::new(create_commit_link);
pub static BUILD_TIME:     LazyLock<Option<DateTime<FixedOffset>>> = LazyLock::new(|| DateTime::parse_from_rfc2822(built_info::BUILT_TIME_UTC).ok());
pub static COMMIT_TIME:    LazyLock<Option<DateTime<FixedOffset>>> = LazyLock::new(|| built_info::GIT_COMMIT_TIMESTAMP.and_then(|t| DateTime::parse_from_rfc3339(t).ok()));

fn create_version_string() -> &'static str {
    match (built_info::GIT_COMMIT_HASH_SHORT, built_info::GIT_DIRTY) {
        (Some(hash), Some(true)) => format!("{}+g{hash}-dirty", built_info::PKG_VERSION).leak(),
        (Some(hash), _) => format!("{}+g{hash}", built_info::PKG_VERSION).leak(),
        _ => built_info::PKG_VERSION,
    }
}

fn create_commit_link() -> Option<&'static str> {
    let hash = built_info::GIT_COMMIT_HASH?;
    Some(format!("{}/commit/{hash}", built_info::PKG_REPOSITORY).leak())
}
