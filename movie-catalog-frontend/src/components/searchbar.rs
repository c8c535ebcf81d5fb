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
use gloo_console::error;
use serde::{Deserialize, Serialize};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::pages::MainRoute;

/// Query string of the search page
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[function_component]
pub fn Searchbar() -> Html {
    let navigator = use_navigator().expect("navigator should exist");

    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            let input: HtmlInputElement = e.target_unchecked_into();
            let query = SearchQuery { q: input.value().trim().to_owned() };
            if let Err(e) = navigator.push_with_query(&MainRoute::Search, &query) {
                error!(format!("Failed to open search results: {e:?}"));
            }
        }
    });

    html! {
        <div id="searchbar">
            <label for="movie_search">{"Search movies"}</label>
            <input id="movie_search" type="search" placeholder="Title" {onkeydown} />
        </div>
    }
}
