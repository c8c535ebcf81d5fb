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

use futures::future::join_all;
use futures::join;
use gloo_console::warn;
use movie_catalog_api::{Genre, Movie, MovieQuery};
use movie_catalog_core::CatalogBackend;
use yew::prelude::*;

use crate::components::movie_card::MovieRow;
use crate::constants::HOME_GENRE_ROWS;
use crate::contexts::{Api, Provider};
use crate::hooks::{use_async_suspension, use_catalog, use_settings};
use crate::pages::MainRoute;

#[derive(Clone, PartialEq)]
struct Section {
    title: AttrValue,
    more: Option<MainRoute>,
    movies: Vec<Movie>,
}

fn top_n<F, K>(movies: &[Movie], n: usize, key: F) -> Vec<Movie>
where
    F: Fn(&Movie) -> K,
    K: Ord,
{
    let mut sorted: Vec<&Movie> = movies.iter().collect();
    sorted.sort_by_key(|m| std::cmp::Reverse(key(m)));
    sorted.into_iter().take(n).cloned().collect()
}

fn local_genre_sections(movies: &[Movie], genres: &[Genre], row_size: usize) -> Vec<Section> {
    genres.iter()
        .map(|genre| Section {
            title: genre.name.clone().into(),
            more: Some(MainRoute::Genre { id: genre.slug.clone().into() }),
            movies: movies.iter().filter(|m| m.genres.contains(&genre.id)).take(row_size).cloned().collect(),
        })
        .filter(|s| !s.movies.is_empty())
        .collect()
}

/// Fetches the remote home sections concurrently, skipping the ones that fail
async fn fetch_sections(api: &Api, row_size: usize, genres: &[Genre]) -> Vec<Section> {
    let limit = u32::try_from(row_size).unwrap_or(u32::MAX);
    let latest_query = MovieQuery {
        sort_field: Some("modified.time".to_owned()),
        ..MovieQuery::page(1, limit)
    };
    let genres: Vec<&Genre> = genres.iter().take(HOME_GENRE_ROWS).collect();
    let (latest, collections, genre_pages) = join!(
        api.list_movies(&latest_query),
        api.list_collections(),
        join_all(genres.iter().map(|g| api.genre_movies(&g.slug, 1))),
    );

    let mut sections = Vec::new();
    match latest {
        Ok(listing) => sections.push(Section {
            title: "Latest updates".into(),
            more: None,
            movies: listing.page.items.into_iter().take(row_size).collect(),
        }),
        Err(e) => warn!(format!("Failed to fetch the latest movies: {e:?}")),
    }
    match collections {
        Ok(collections) => sections.extend(collections.into_iter().map(|c| Section {
            title: c.name.into(),
            more: None,
            movies: c.movies.into_iter().take(row_size).collect(),
        })),
        Err(e) => warn!(format!("Failed to fetch collections: {e:?}")),
    }
    for (genre, page) in genres.into_iter().zip(genre_pages) {
        match page {
            Ok(page) => sections.push(Section {
                title: genre.name.clone().into(),
                more: Some(MainRoute::Genre { id: genre.slug.clone().into() }),
                movies: page.items.into_iter().take(row_size).collect(),
            }),
            Err(e) => warn!(format!("Failed to fetch movies of genre {}: {e:?}", genre.name)),
        }
    }
    sections
}

fn render_sections(sections: &[Section]) -> Html {
    html! {
        <>
            {for sections.iter().enumerate().map(|(i, s)| html! {
                <MovieRow key={i} title={s.title.clone()} movies={s.movies.clone()} more={s.more.clone()} />
            })}
        </>
    }
}

#[derive(Properties, PartialEq)]
struct RemoteSectionsProps {
    row_size: usize,
    genres: Vec<Genre>,
}

#[function_component]
fn RemoteSections(props: &RemoteSectionsProps) -> HtmlResult {
    let provider: Rc<Provider> = use_catalog().provider;
    let sections = use_async_suspension(
        move |(row_size, genres): (usize, Vec<Genre>)| async move {
            fetch_sections(provider.backend(), row_size, &genres).await
        },
        (props.row_size, props.genres.clone()),
    )?;

    Ok(render_sections(&sections))
}

#[function_component]
pub fn HomePage() -> Html {
    let catalog = use_catalog();
    let settings_context = use_settings();
    let row_size: usize = settings_context.settings().home_row_size.into();

    let (most_viewed, newest, genre_sections, genres) = {
        let data = catalog.data();
        (
            top_n(&data.movies, row_size, |m| m.views),
            top_n(&data.movies, row_size, |m| m.created_at),
            local_genre_sections(&data.movies, &data.genres, row_size),
            data.genres.clone(),
        )
    };

    let fallback = html! {
        <center><b>{"Loading..."}</b></center>
    };

    html! {
        <>
            <MovieRow title="Most viewed" movies={most_viewed} />
            if !catalog.loaded {
                {fallback}
            } else if catalog.use_api() {
                <Suspense {fallback}>
                    <RemoteSections {row_size} {genres} />
                </Suspense>
            } else {
                <MovieRow title="Newest" movies={newest} />
                {render_sections(&genre_sections)}
            }
        </>
    }
}
