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

use movie_catalog_api::Movie;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_hooks::use_debounce_state;
use yew_router::prelude::*;

use crate::components::movie_card::MovieGrid;
use crate::components::searchbar::SearchQuery;
use crate::constants::SEARCH_DEBOUNCE_MS;
use crate::contexts::Provider;
use crate::hooks::{use_async_suspension, use_catalog};
use crate::utils::matches_keyword;

#[derive(Properties, PartialEq)]
struct RemoteResultsProps {
    keyword: AttrValue,
}

#[function_component]
fn RemoteResults(props: &RemoteResultsProps) -> HtmlResult {
    let provider: Rc<Provider> = use_catalog().provider;
    let result = use_async_suspension(
        move |keyword: AttrValue| async move { provider.backend().search(&keyword, 1).await },
        props.keyword.clone(),
    )?;

    Ok(match *result {
        Ok(ref page) => html! { <MovieGrid movies={page.items.clone()} /> },
        Err(ref e) => html! { <b>{format!("Search failed: {e}")}</b> },
    })
}

#[function_component]
pub fn SearchPage() -> Html {
    let catalog = use_catalog();
    let query = use_location()
        .and_then(|l| l.query::<SearchQuery>().ok())
        .unwrap_or_default();
    let input = use_state_eq(|| query.q.clone());
    let keyword = {
        let initial = query.q.clone();
        use_debounce_state(move || initial, SEARCH_DEBOUNCE_MS)
    };

    // follow searches started from the header
    {
        let input = input.clone();
        let keyword = keyword.clone();
        use_effect_with(query.q.clone(), move |q| {
            input.set(q.clone());
            keyword.set(q.clone());
        });
    }

    let oninput = {
        let input = input.clone();
        let keyword = keyword.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            input.set(target.value());
            keyword.set(target.value());
        })
    };

    let trimmed = keyword.trim().to_owned();
    let local_results: Vec<Movie> = if catalog.use_api() || trimmed.is_empty() {
        Vec::new()
    } else {
        catalog.data().movies.iter().filter(|m| matches_keyword(m, &trimmed)).cloned().collect()
    };

    let fallback = html! {
        <center><b>{"Searching..."}</b></center>
    };

    html! {
        <>
            <div class="page-details">
                <h2>{"Search"}</h2>
                <input type="search" placeholder="Movie title" value={(*input).clone()} {oninput} />
            </div>
            if trimmed.is_empty() {
                <center><em>{"Type a title to start searching"}</em></center>
            } else if catalog.use_api() {
                <Suspense {fallback}>
                    <RemoteResults keyword={AttrValue::from(trimmed)} />
                </Suspense>
            } else {
                <MovieGrid movies={local_results} empty_text={format!("No movies matching \"{trimmed}\"")} />
            }
        </>
    }
}
