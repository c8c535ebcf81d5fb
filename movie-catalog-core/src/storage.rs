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

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use cloneable_errors::ErrorContext;

/// Key holding the serialized [`crate::AppData`] blob
pub const DATA_KEY: &str = "movie_catalog_data";
/// Key holding the raw bearer token string
pub const TOKEN_KEY: &str = "movie_catalog_token";

/// Persistent string key/value storage, shaped after the browser's `localStorage`
///
/// Handles are expected to be cheap to clone and to share the same underlying storage.
pub trait Storage: Clone {
    fn get(&self, key: &str) -> Result<Option<String>, ErrorContext>;
    fn set(&self, key: &str, value: &str) -> Result<(), ErrorContext>;
    fn remove(&self, key: &str) -> Result<(), ErrorContext>;

    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).ok().flatten().filter(|t| !t.is_empty())
    }
}

/// Storage that lives only as long as the process, used outside the browser and in tests
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ErrorContext> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ErrorContext> {
        self.inner.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ErrorContext> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}
