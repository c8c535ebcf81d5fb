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
use std::cell::Ref;
use std::rc::Rc;

use movie_catalog_api::User;
use movie_catalog_core::{ApiClient, AppData, DataMode, DataProvider};
use yew::prelude::*;

use crate::settings::Settings;
use crate::storage::LocalStorage;

pub type Api = ApiClient<LocalStorage>;
pub type Provider = DataProvider<LocalStorage, Api>;

/// Access to the catalog, re-provided every time the catalog changes
#[derive(Clone)]
pub struct CatalogContext {
    pub provider: Rc<Provider>,
    /// Bumped on every change, used for change detection
    pub revision: u64,
    /// Whether the startup sync has finished
    pub loaded: bool,
}

impl PartialEq for CatalogContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.provider, &other.provider) && self.revision == other.revision && self.loaded == other.loaded
    }
}

impl CatalogContext {
    pub fn data(&self) -> Ref<'_, AppData> {
        self.provider.data()
    }

    pub fn current_user(&self) -> Option<User> {
        self.provider.current_user()
    }

    pub fn is_admin(&self) -> bool {
        self.data().current_user().is_some_and(User::is_admin)
    }

    pub fn use_api(&self) -> bool {
        self.provider.mode() == DataMode::Api
    }

    pub fn api(&self) -> &Api {
        self.provider.backend()
    }
}

#[derive(Clone, PartialEq)]
pub struct SettingsContext {
    settings: Rc<Settings>,
    pub default: Rc<Settings>,
    update: Callback<Settings>,
}

impl SettingsContext {
    pub fn new(settings: Rc<Settings>, update: Callback<Settings>) -> SettingsContext {
        SettingsContext {
            settings,
            default: Rc::default(),
            update,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update(&self, settings: Settings) {
        self.update.emit(settings);
    }
}
