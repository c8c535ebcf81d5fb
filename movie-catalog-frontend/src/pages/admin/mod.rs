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
use movie_catalog_core::CatalogError;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::links::movie_link;
use crate::hooks::{use_catalog, BannerHandle};
use crate::pages::MainRoute;
use crate::utils::{render_rating, RenderNumber};

mod actors;
mod comments;
mod genres;
mod movies;
mod upload;
mod users;

pub use actors::AdminActorsPage;
pub use comments::AdminCommentsPage;
pub use genres::AdminGenresPage;
pub use movies::AdminMoviesPage;
pub use upload::UploadWizardPage;
pub use users::AdminUsersPage;

/// Shows the outcome of an admin action, returns whether it succeeded
fn report<T, F>(result: Result<T, CatalogError>, error: &UseStateHandle<Option<AttrValue>>, banner: &BannerHandle, success: F) -> bool
where
    F: FnOnce(T) -> String,
{
    match result {
        Ok(value) => {
            error.set(None);
            banner.show(success(value));
            true
        },
        Err(e) => {
            error.set(Some(e.to_string().into()));
            false
        },
    }
}

/// Case-insensitive filter used by the admin tables
fn filter_matches(filter: &str, values: &[&str]) -> bool {
    let filter = filter.trim().to_lowercase();
    filter.is_empty() || values.iter().any(|v| v.to_lowercase().contains(&filter))
}

#[derive(Properties, PartialEq)]
pub struct AdminOnlyProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children for administrators, redirects everyone else
#[function_component]
pub fn AdminOnly(props: &AdminOnlyProps) -> Html {
    let catalog = use_catalog();
    if !catalog.loaded {
        return html! { <center><b>{"Loading..."}</b></center> };
    }
    match catalog.current_user() {
        None => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        Some(user) if !user.is_admin() => html! { <Redirect<MainRoute> to={MainRoute::Home} /> },
        Some(_) => html! {
            <div class="admin">
                <AdminNav />
                {props.children.clone()}
            </div>
        },
    }
}

#[function_component]
fn AdminNav() -> Html {
    html! {
        <nav class="admin-nav">
            <Link<MainRoute> to={MainRoute::Admin}>{"Dashboard"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminMovies}>{"Movies"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminUpload}>{"Upload"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminGenres}>{"Genres"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminActors}>{"Actors"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminUsers}>{"Users"}</Link<MainRoute>>
            <Link<MainRoute> to={MainRoute::AdminComments}>{"Comments"}</Link<MainRoute>>
        </nav>
    }
}

#[function_component]
pub fn DashboardPage() -> Html {
    let catalog = use_catalog();
    let stats = use_memo(catalog.revision, |_| catalog.provider.stats());

    html! {
        <>
            <h2>{"Dashboard"}</h2>
            <div class="stat-cards">
                <div class="stat-card"><span>{"Movies"}</span><b>{stats.movies.render_int()}</b></div>
                <div class="stat-card"><span>{"Genres"}</span><b>{stats.genres.render_int()}</b></div>
                <div class="stat-card"><span>{"Actors"}</span><b>{stats.actors.render_int()}</b></div>
                <div class="stat-card"><span>{"Users"}</span><b>{stats.users.render_int()}</b></div>
                <div class="stat-card"><span>{"Comments"}</span><b>{stats.comments.render_int()}</b></div>
                <div class="stat-card" title={stats.total_views.render_int()}><span>{"Total views"}</span><b>{stats.total_views.abbreviate_int()}</b></div>
                <div class="stat-card"><span>{"Average rating"}</span><b>{render_rating(stats.average_rating)}</b></div>
            </div>
            <h3>{"Most viewed"}</h3>
            <table class="admin-table">
                <tr><th>{"Title"}</th><th>{"Views"}</th><th>{"Rating"}</th></tr>
                {for stats.top_movies.iter().map(|m| html! {
                    <tr key={m.id.clone()}>
                        <td>{movie_link(&m.slug, &m.title)}</td>
                        <td>{m.views.render_int()}</td>
                        <td>{render_rating(m.rating)}</td>
                    </tr>
                })}
            </table>
        </>
    }
}
