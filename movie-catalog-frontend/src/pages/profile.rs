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

use gloo_console::warn;
use movie_catalog_api::Movie;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::banner::{Banner, ErrorLine};
use crate::components::links::movie_link;
use crate::components::movie_card::MovieGrid;
use crate::contexts::Provider;
use crate::hooks::{use_async_suspension, use_banner, use_catalog, use_error};
use crate::pages::MainRoute;
use crate::utils::render_millis;

fn login_required() -> Html {
    html! {
        <>
            <h2>{"You need to log in to see this page"}</h2>
            <Link<MainRoute> to={MainRoute::Login}>{"Log in"}</Link<MainRoute>>
        </>
    }
}

#[function_component]
pub fn ProfilePage() -> Html {
    let catalog = use_catalog();
    let error = use_error();
    let banner = use_banner();

    let refresh = {
        let provider = catalog.provider.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |_| {
            let provider = provider.clone();
            let error = error.clone();
            let banner = banner.clone();
            spawn_local(async move {
                match provider.refresh_profile().await {
                    Ok(_) => {
                        error.set(None);
                        banner.show("Profile refreshed");
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
            });
        })
    };

    let data = catalog.data();
    let Some(user) = data.current_user() else {
        return login_required();
    };
    let history: Vec<(String, String, i64)> = user.history
        .iter()
        .map(|entry| match data.movie(&entry.movie_id) {
            Some(movie) => (movie.slug.clone(), movie.title.clone(), entry.viewed_at),
            None => (entry.movie_id.clone(), entry.movie_id.clone(), entry.viewed_at),
        })
        .collect();
    let user = user.clone();
    drop(data);

    html! {
        <div class="profile">
            <h2>{user.username.clone()}</h2>
            <table>
                <tr><th>{"Email"}</th><td>{user.email.clone()}</td></tr>
                <tr><th>{"Role"}</th><td>{user.role.to_string()}</td></tr>
                if user.created_at > 0 {
                    <tr><th>{"Member since"}</th><td>{render_millis(user.created_at)}</td></tr>
                }
                <tr><th>{"Favorites"}</th><td><Link<MainRoute> to={MainRoute::Favorites}>{user.favorites.len()}</Link<MainRoute>></td></tr>
            </table>
            if catalog.use_api() {
                <button onclick={refresh}>{"Refresh from server"}</button>
            }
            <ErrorLine error={(*error).clone()} />
            <Banner handle={banner} />
            <h3>{"Recently viewed"}</h3>
            if history.is_empty() {
                <em>{"Nothing here yet"}</em>
            } else {
                <table class="history">
                    {for history.iter().map(|(slug, title, viewed_at)| html! {
                        <tr key={slug.clone()}>
                            <td>{movie_link(slug, title)}</td>
                            <td>{render_millis(*viewed_at)}</td>
                        </tr>
                    })}
                </table>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ServerFavoritesProps {
    /// Movies known locally, used to resolve the slugs the server returns
    known: Vec<Movie>,
}

#[function_component]
fn ServerFavorites(props: &ServerFavoritesProps) -> HtmlResult {
    let provider: Rc<Provider> = use_catalog().provider;
    let slugs = use_async_suspension(move |()| async move { provider.backend().favorites().await }, ())?;

    Ok(match *slugs {
        Ok(ref slugs) => {
            let movies: Vec<Movie> = props.known.iter().filter(|m| slugs.contains(&m.slug)).cloned().collect();
            html! { <MovieGrid {movies} empty_text="Nothing saved to your account yet" /> }
        },
        Err(ref e) => {
            warn!(format!("Failed to load server favorites: {e:?}"));
            html! { <b>{format!("Failed to load favorites saved on the server: {e}")}</b> }
        },
    })
}

#[function_component]
pub fn FavoritesPage() -> Html {
    let catalog = use_catalog();
    let (favorites, known) = {
        let data = catalog.data();
        let Some(user) = data.current_user() else {
            return login_required();
        };
        let favorites: Vec<Movie> = user.favorites.iter().filter_map(|id| data.movie(id)).cloned().collect();
        (favorites, data.movies.clone())
    };

    let fallback = html! {
        <center><b>{"Loading..."}</b></center>
    };

    html! {
        <>
            <div class="page-details">
                <h2>{"Your favorites"}</h2>
            </div>
            <MovieGrid movies={favorites} empty_text="You haven't added any favorites yet" />
            if catalog.use_api() {
                <h2>{"Saved to your account"}</h2>
                <Suspense {fallback}>
                    <ServerFavorites {known} />
                </Suspense>
            }
        </>
    }
}
