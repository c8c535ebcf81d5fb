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

use strum::IntoStaticStr;
use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::header_footer::*;
use crate::components::modals::ModalLayer;

mod admin;
mod auth;
mod browse;
mod home;
mod movie;
mod profile;
mod search;

use admin::{AdminActorsPage, AdminCommentsPage, AdminGenresPage, AdminMoviesPage, AdminOnly, AdminUsersPage, DashboardPage, UploadWizardPage};
use auth::{LoginPage, RegisterPage};
use browse::{CountryPage, GenrePage, YearPage};
use home::HomePage;
use movie::MoviePage;
use profile::{FavoritesPage, ProfilePage};
use search::SearchPage;

#[derive(Clone, Routable, PartialEq, IntoStaticStr)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/search")]
    Search,
    #[at("/genre/:id")]
    Genre { id: AttrValue },
    #[at("/year/:year")]
    Year { year: u16 },
    #[at("/country/:id")]
    Country { id: AttrValue },
    #[at("/movie/:id")]
    Movie { id: AttrValue },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/profile")]
    Profile,
    #[at("/favorites")]
    Favorites,
    #[at("/admin")]
    Admin,
    #[at("/admin/movies")]
    AdminMovies,
    #[at("/admin/movies/new")]
    AdminUpload,
    #[at("/admin/genres")]
    AdminGenres,
    #[at("/admin/actors")]
    AdminActors,
    #[at("/admin/users")]
    AdminUsers,
    #[at("/admin/comments")]
    AdminComments,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn page_title(route: &MainRoute) -> String {
    match route {
        MainRoute::Home => "Movie Catalog".to_string(),
        MainRoute::Search => "Search - Movie Catalog".to_string(),
        MainRoute::Genre { ref id } => format!("Genre {id} - Movie Catalog"),
        MainRoute::Year { year } => format!("Movies from {year} - Movie Catalog"),
        MainRoute::Country { ref id } => format!("Country {id} - Movie Catalog"),
        MainRoute::Movie { ref id } => format!("{id} - Movie Catalog"),
        MainRoute::Login => "Log in - Movie Catalog".to_string(),
        MainRoute::Register => "Register - Movie Catalog".to_string(),
        MainRoute::Profile => "Profile - Movie Catalog".to_string(),
        MainRoute::Favorites => "Favorites - Movie Catalog".to_string(),
        MainRoute::Admin => "Dashboard - Movie Catalog".to_string(),
        MainRoute::AdminMovies => "Manage movies - Movie Catalog".to_string(),
        MainRoute::AdminUpload => "Upload a movie - Movie Catalog".to_string(),
        MainRoute::AdminGenres => "Manage genres - Movie Catalog".to_string(),
        MainRoute::AdminActors => "Manage actors - Movie Catalog".to_string(),
        MainRoute::AdminUsers => "Manage users - Movie Catalog".to_string(),
        MainRoute::AdminComments => "Manage comments - Movie Catalog".to_string(),
        MainRoute::NotFound => "Page not found - Movie Catalog".to_string(),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn render_main_route(route: MainRoute) -> Html {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(&page_title(&route));
    }
    let route_html = match route {
        MainRoute::Home => html! {<HomePage/>},
        MainRoute::Search => html! {<SearchPage/>},
        MainRoute::Genre { ref id } => html! {<GenrePage id={id.clone()} />},
        MainRoute::Year { year } => html! {<YearPage {year} />},
        MainRoute::Country { ref id } => html! {<CountryPage id={id.clone()} />},
        MainRoute::Movie { ref id } => html! {<MoviePage id={id.clone()} />},
        MainRoute::Login => html! {<LoginPage/>},
        MainRoute::Register => html! {<RegisterPage/>},
        MainRoute::Profile => html! {<ProfilePage/>},
        MainRoute::Favorites => html! {<FavoritesPage/>},
        MainRoute::Admin => html! {<AdminOnly><DashboardPage/></AdminOnly>},
        MainRoute::AdminMovies => html! {<AdminOnly><AdminMoviesPage/></AdminOnly>},
        MainRoute::AdminUpload => html! {<AdminOnly><UploadWizardPage/></AdminOnly>},
        MainRoute::AdminGenres => html! {<AdminOnly><AdminGenresPage/></AdminOnly>},
        MainRoute::AdminActors => html! {<AdminOnly><AdminActorsPage/></AdminOnly>},
        MainRoute::AdminUsers => html! {<AdminOnly><AdminUsersPage/></AdminOnly>},
        MainRoute::AdminComments => html! {<AdminOnly><AdminCommentsPage/></AdminOnly>},
        MainRoute::NotFound => html! {
            <>
                <h2>{"404 - Not found"}</h2>
                <h3>{"Looks like you've entered an invalid URL"}</h3>
                <Link<MainRoute> to={MainRoute::Home}>{"Return to home page"}</Link<MainRoute>>
            </>
        },
    };
    let route_name: &'static str = (&route).into();
    html! {
        <ModalLayer>
            <Header />
            <div id="content" data-route={route_name}>
                {route_html}
            </div>
            <Footer />
        </ModalLayer>
    }
}
