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
use movie_catalog_api::Movie;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::icon::{Icon, IconType};
use crate::components::page_select::PageSelect;
use crate::hooks::use_settings;
use crate::pages::MainRoute;
use crate::utils::{paginate, render_rating, RenderNumber};

#[derive(Properties, PartialEq)]
pub struct MovieCardProps {
    pub movie: Movie,
}

#[function_component]
pub fn MovieCard(props: &MovieCardProps) -> Html {
    let movie = &props.movie;
    let route = MainRoute::Movie { id: AttrValue::from(movie.slug.clone()) };

    html! {
        <div class="movie-card">
            <Link<MainRoute> to={route.clone()}>
                if movie.poster.is_empty() {
                    <div class="poster placeholder" />
                } else {
                    <img class="poster" src={movie.poster.clone()} alt={movie.title.clone()} loading="lazy" />
                }
            </Link<MainRoute>>
            <div class="movie-card-info">
                <Link<MainRoute> to={route} classes={classes!("movie-title")}>{movie.title.clone()}</Link<MainRoute>>
                <span class="movie-meta">
                    if let Some(year) = movie.year {
                        {year}{" · "}
                    }
                    <Icon r#type={IconType::Star} />{render_rating(movie.rating)}
                    {" · "}
                    <span title={movie.views.render_int()}><Icon r#type={IconType::Views} />{movie.views.abbreviate_int()}</span>
                </span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MovieRowProps {
    pub title: AttrValue,
    pub movies: Vec<Movie>,
    /// Where the "see all" link points to
    #[prop_or_default]
    pub more: Option<MainRoute>,
}

/// A titled, horizontally scrolled row of movie cards
#[function_component]
pub fn MovieRow(props: &MovieRowProps) -> Html {
    if props.movies.is_empty() {
        return html! {};
    }
    html! {
        <section class="movie-row">
            <h3>
                {props.title.clone()}
                if let Some(ref more) = props.more {
                    {" "}<Link<MainRoute> to={more.clone()} classes={classes!("see-all")}>{"See all"}</Link<MainRoute>>
                }
            </h3>
            <div class="movie-row-items">
                {for props.movies.iter().map(|movie| html! {
                    <MovieCard key={movie.id.clone()} movie={movie.clone()} />
                })}
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct MovieGridProps {
    pub movies: Vec<Movie>,
    #[prop_or(AttrValue::Static("No movies found"))]
    pub empty_text: AttrValue,
}

/// A paginated grid of movie cards, sized by the entries per page setting
#[function_component]
pub fn MovieGrid(props: &MovieGridProps) -> Html {
    let settings_context = use_settings();
    let per_page: usize = settings_context.settings().entries_per_page.into();
    let page = use_state_eq(|| 0usize);
    {
        let page = page.clone();
        use_effect_with(props.movies.len(), move |_| page.set(0));
    }

    if props.movies.is_empty() {
        return html! { <center><em>{props.empty_text.clone()}</em></center> };
    }
    let (items, current, page_count) = paginate(&props.movies, *page, per_page);
    let onchange = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    html! {
        <>
            <div class="movie-grid">
                {for items.iter().map(|movie| html! {
                    <MovieCard key={movie.id.clone()} movie={movie.clone()} />
                })}
            </div>
            <PageSelect page={current} {page_count} {onchange} />
        </>
    }
}
