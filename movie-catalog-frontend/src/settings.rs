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

use std::num::NonZeroUsize;

use cloneable_errors::{ErrorContext, ResContext};
use log::warn;
use movie_catalog_core::Storage;
use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_KEY;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Settings {
    /// Entries per page in listings and admin tables
    pub entries_per_page: NonZeroUsize,
    /// Movies per row on the home page
    pub home_row_size: NonZeroUsize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entries_per_page: NonZeroUsize::new(24).expect("24 is not zero"),
            home_row_size: NonZeroUsize::new(10).expect("10 is not zero"),
        }
    }
}

impl Settings {
    pub fn load<S: Storage>(storage: &S) -> Settings {
        match storage.get(SETTINGS_KEY) {
            Ok(None) => Settings::default(),
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding stored settings: {e}");
                Settings::default()
            }),
            Err(e) => {
                warn!("Failed to read stored settings: {e:?}");
                Settings::default()
            },
        }
    }

    pub fn save<S: Storage>(&self, storage: &S) -> Result<(), ErrorContext> {
        let raw = serde_json::to_string(self).context("Failed to serialize settings")?;
        storage.set(SETTINGS_KEY, &raw)
    }
}
