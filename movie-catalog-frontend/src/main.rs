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
use std::rc::Rc;

use gloo_console::error;
use movie_catalog_core::ApiClient;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod constants;
mod contexts;
mod hooks;
mod logging;
mod pages;
mod settings;
mod storage;
mod utils;

mod built_info {
    // Contents generated by buildscript, using built
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

use constants::CONFIG;
use contexts::{CatalogContext, Provider, SettingsContext};
use pages::{render_main_route, MainRoute};
use settings::Settings;
use storage::LocalStorage;

/// Counts changes reported by the data provider
#[derive(Default, PartialEq)]
struct Revision(u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, (): Self::Action) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

#[function_component]
fn App() -> Html {
    let provider: Rc<Provider> = use_memo((), |()| {
        let api = ApiClient::new(CONFIG.api_base_url.clone(), LocalStorage);
        Provider::new(LocalStorage, api, CONFIG.mode)
    });
    let revision = use_reducer(Revision::default);
    let loaded = use_state_eq(|| false);

    {
        let provider = provider.clone();
        let dispatcher = revision.dispatcher();
        let loaded = loaded.setter();
        use_effect_with((), move |()| {
            provider.set_listener(Rc::new(move || dispatcher.dispatch(())));
            spawn_local(async move {
                if let Err(e) = provider.bootstrap().await {
                    error!(format!("Failed to load the catalog: {e:?}"));
                }
                loaded.set(true);
            });
        });
    }

    let settings = use_state(|| Rc::new(Settings::load(&LocalStorage)));
    let update_settings = use_callback(settings.setter(), |new: Settings, setter| {
        if let Err(e) = new.save(&LocalStorage) {
            error!(format!("Failed to save settings: {e:?}"));
        }
        setter.set(Rc::new(new));
    });
    let settings_context = use_memo(((*settings).clone(), update_settings), |(settings, update)| {
        SettingsContext::new(settings.clone(), update.clone())
    });

    let catalog_context = CatalogContext {
        provider,
        revision: revision.0,
        loaded: *loaded,
    };

    html! {
        <ContextProvider<CatalogContext> context={catalog_context}>
            <ContextProvider<SettingsContext> context={(*settings_context).clone()}>
                <BrowserRouter>
                    <Switch<MainRoute> render={render_main_route} />
                </BrowserRouter>
            </ContextProvider<SettingsContext>>
        </ContextProvider<CatalogContext>>
    }
}

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
