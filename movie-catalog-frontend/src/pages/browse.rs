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

use cloneable_errors::ErrorContext;
use movie_catalog_api::{Movie, MovieQuery, Page};
use movie_catalog_core::{AppData, CatalogBackend};
use yew::prelude::*;

use crate::components::movie_card::MovieGrid;
use crate::contexts::Provider;
use crate::hooks::{use_async_suspension, use_catalog};

/// What a browse page lists
#[derive(Clone, PartialEq, Eq, Debug)]
enum BrowseTarget {
    Genre(AttrValue),
    Year(u16),
    Country(AttrValue),
}

impl BrowseTarget {
    fn heading(&self, data: &AppData) -> String {
        match self {
            BrowseTarget::Genre(ref id) => match data.genre(id) {
                Some(genre) => format!("Genre: {}", genre.name),
                None => format!("Genre: {id}"),
            },
            BrowseTarget::Year(year) => format!("Movies from {year}"),
            BrowseTarget::Country(ref id) => match country_name(data, id) {
                Some(name) => format!("Country: {name}"),
                None => format!("Country: {id}"),
            },
        }
    }

    fn local_movies(&self, data: &AppData) -> Vec<Movie> {
        let matches: Box<dyn Fn(&Movie) -> bool> = match self {
            BrowseTarget::Genre(ref id) => {
                let genre_id = data.genre(id).map_or_else(|| id.to_string(), |g| g.id.clone());
                Box::new(move |m| m.genres.contains(&genre_id))
            },
            BrowseTarget::Year(year) => {
                let year = *year;
                Box::new(move |m| m.year == Some(year))
            },
            BrowseTarget::Country(ref id) => {
                let name = country_name(data, id).unwrap_or(id.as_str()).to_lowercase();
                let id = id.to_lowercase();
                Box::new(move |m| {
                    let country = m.country.to_lowercase();
                    country == name || country == id
                })
            },
        };
        data.movies.iter().filter(|m| matches(m)).cloned().collect()
    }

    async fn fetch(&self, provider: &Provider) -> Result<Page<Movie>, ErrorContext> {
        let api = provider.backend();
        match self {
            BrowseTarget::Genre(ref id) => {
                let slug = provider.data().genre(id).map_or_else(|| id.to_string(), |g| g.slug.clone());
                api.genre_movies(&slug, 1).await
            },
            BrowseTarget::Year(year) => api.year_movies(*year, 1).await,
            BrowseTarget::Country(ref id) => {
                let query = MovieQuery {
                    country: Some(id.to_string()),
                    ..MovieQuery::page(1, 100)
                };
                Ok(api.list_movies(&query).await?.page)
            },
        }
    }
}

fn country_name<'a>(data: &'a AppData, id: &'a str) -> Option<&'a str> {
    data.countries
        .iter()
        .find(|c| c.id == id || c.slug == id)
        .map(|c| c.name.as_str())
}

#[derive(Properties, PartialEq)]
struct RemoteBrowseProps {
    target: BrowseTarget,
}

#[function_component]
fn RemoteBrowse(props: &RemoteBrowseProps) -> HtmlResult {
    let provider: Rc<Provider> = use_catalog().provider;
    let result = use_async_suspension(
        move |target: BrowseTarget| async move { target.fetch(&provider).await },
        props.target.clone(),
    )?;

    Ok(match *result {
        Ok(ref page) => html! { <MovieGrid movies={page.items.clone()} /> },
        Err(ref e) => html! { <b>{format!("Failed to load movies: {e}")}</b> },
    })
}

#[derive(Properties, PartialEq)]
struct BrowseProps {
    target: BrowseTarget,
}

#[function_component]
fn Browse(props: &BrowseProps) -> Html {
    let catalog = use_catalog();
    let (heading, movies) = {
        let data = catalog.data();
        (props.target.heading(&data), props.target.local_movies(&data))
    };

    let fallback = html! {
        <center><b>{"Loading..."}</b></center>
    };

    html! {
        <>
            <div class="page-details">
                <h2>{heading}</h2>
            </div>
            if catalog.use_api() {
                <Suspense {fallback}>
                    <RemoteBrowse target={props.target.clone()} />
                </Suspense>
            } else {
                <MovieGrid {movies} />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct GenrePageProps {
    pub id: AttrValue,
}

#[function_component]
pub fn GenrePage(props: &GenrePageProps) -> Html {
    html! { <Browse target={BrowseTarget::Genre(props.id.clone())} /> }
}

#[derive(Properties, PartialEq)]
pub struct YearPageProps {
    pub year: u16,
}

#[function_component]
pub fn YearPage(props: &YearPageProps) -> Html {
    html! { <Browse target={BrowseTarget::Year(props.year)} /> }
}

#[derive(Properties, PartialEq)]
pub struct CountryPageProps {
    pub id: AttrValue,
}

#[function_component]
pub fn CountryPage(props: &CountryPageProps) -> Html {
    html! { <Browse target={BrowseTarget::Country(props.id.clone())} /> }
}
