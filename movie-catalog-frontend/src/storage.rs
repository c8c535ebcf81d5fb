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
use cloneable_errors::{anyhow, ErrorContext, ResContext};
use movie_catalog_core::Storage;
use wasm_bindgen::JsValue;
use web_sys::window;

/// The browser's `window.localStorage`, looked up on every access
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalStorage;

fn js_error(context: &str, err: &JsValue) -> ErrorContext {
    anyhow!("{context}: {err:?}")
}

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, ErrorContext> {
        window()
            .context("No window object")?
            .local_storage()
            .map_err(|e| js_error("Failed to access localStorage", &e))?
            .context("localStorage is not available")
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ErrorContext> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| js_error("Failed to read from localStorage", &e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ErrorContext> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| js_error("Failed to write to localStorage", &e))
    }

    fn remove(&self, key: &str) -> Result<(), ErrorContext> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| js_error("Failed to remove from localStorage", &e))
    }
}
