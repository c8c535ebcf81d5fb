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

use std::collections::BTreeMap;

use cloneable_errors::{ErrorContext, ResContext};
use log::{debug, warn};
use movie_catalog_api::{Actor, Country, Genre, Movie, User};
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, Result};
use crate::storage::{Storage, DATA_KEY};

/// Everything the client keeps about the catalog, persisted as a single JSON blob
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AppData {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub actors: Vec<Actor>,
    pub countries: Vec<Country>,
    pub users: Vec<User>,
    pub current_user_id: Option<String>,
    /// user id -> unix millis of the last accepted comment
    pub last_comment_at: BTreeMap<String, i64>,
    /// user id -> unix millis of the last accepted rating
    pub last_rating_at: BTreeMap<String, i64>,
    /// counter used for generating record ids
    pub id_counter: u64,
}

/// In-memory mirror of the persisted [`AppData`] blob
///
/// Every mutation is applied to a copy of the blob, which is written to storage
/// in full and only then becomes the current state.
pub struct PersistedStore<S: Storage> {
    storage: S,
    data: AppData,
}

fn read_blob<S: Storage>(storage: &S) -> std::result::Result<Option<AppData>, ErrorContext> {
    match storage.get(DATA_KEY).context("Failed to read the stored catalog data")? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .context("Stored catalog data is not valid"),
    }
}

impl<S: Storage> PersistedStore<S> {
    /// Loads the blob from storage, falling back to an empty one if it's missing or unreadable
    pub fn load(storage: S) -> PersistedStore<S> {
        let data = match read_blob(&storage) {
            Ok(Some(data)) => {
                debug!("Loaded catalog data: {} movies, {} users", data.movies.len(), data.users.len());
                data
            },
            Ok(None) => AppData::default(),
            Err(e) => {
                warn!("Discarding stored catalog data: {e:?}");
                AppData::default()
            },
        };
        PersistedStore { storage, data }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self, data: &AppData) -> Result<()> {
        let serialized = serde_json::to_string(data)
            .context("Failed to serialize catalog data")
            .map_err(CatalogError::Storage)?;
        self.storage.set(DATA_KEY, &serialized).map_err(|e| {
            warn!("Failed to persist catalog data: {e:?}");
            CatalogError::Storage(e)
        })
    }

    /// Applies `patch` to a copy of the blob, persists the copy and makes it current
    ///
    /// If the patch fails or the write fails, the current state is left untouched.
    pub fn mutate<T, F>(&mut self, patch: F) -> Result<T>
    where
        F: FnOnce(&mut AppData) -> Result<T>,
    {
        let mut next = self.data.clone();
        let result = patch(&mut next)?;
        self.persist(&next)?;
        self.data = next;
        Ok(result)
    }

    /// Replaces the whole blob
    pub fn replace(&mut self, data: AppData) -> Result<()> {
        self.persist(&data)?;
        self.data = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cloneable_errors::bail;

    use super::*;
    use crate::errors::EntityKind;
    use crate::storage::MemoryStorage;

    #[test]
    fn missing_blob_loads_defaults() {
        let store = PersistedStore::load(MemoryStorage::new());
        assert_eq!(store.data(), &AppData::default());
    }

    #[test]
    fn corrupt_blob_loads_defaults() {
        let storage = MemoryStorage::new();
        storage.set(DATA_KEY, "{\"movies\": [oops").unwrap();
        let store = PersistedStore::load(storage);
        assert!(store.data().movies.is_empty());
    }

    #[test]
    fn mutations_are_written_through() {
        let storage = MemoryStorage::new();
        let mut store = PersistedStore::load(storage.clone());
        store
            .mutate(|data| {
                data.genres.push(Genre { id: "g1".into(), name: "Drama".into(), slug: "drama".into() });
                Ok(())
            })
            .unwrap();

        let reloaded = PersistedStore::load(storage);
        assert_eq!(reloaded.data().genres.len(), 1);
        assert_eq!(reloaded.data().genres[0].name, "Drama");
    }

    #[test]
    fn failed_patch_leaves_state_alone() {
        let mut store = PersistedStore::load(MemoryStorage::new());
        let result: Result<()> = store.mutate(|data| {
            data.genres.push(Genre::default());
            Err(CatalogError::not_found(EntityKind::Genre, "nope"))
        });
        assert!(result.is_err());
        assert!(store.data().genres.is_empty());
    }

    #[derive(Clone)]
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, ErrorContext> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), ErrorContext> {
            bail!("quota exceeded")
        }
        fn remove(&self, _key: &str) -> std::result::Result<(), ErrorContext> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_leaves_state_alone() {
        let mut store = PersistedStore::load(ReadOnlyStorage);
        let result = store.mutate(|data| {
            data.current_user_id = Some("u1".into());
            Ok(())
        });
        assert!(matches!(result, Err(CatalogError::Storage(_))));
        assert_eq!(store.data().current_user_id, None);
    }
}
