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
use movie_catalog_api::{Actor, Genre, Movie, MovieDraft};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::{filter_matches, report};
use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::links::movie_link;
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::components::page_select::PageSelect;
use crate::hooks::{use_banner, use_catalog, use_error, use_settings};
use crate::pages::MainRoute;
use crate::utils::{bind_input, paginate, render_rating, split_list, RenderNumber};

/// Generator macro for an `oninput` callback writing a text field of the draft
macro_rules! draft_input {
    ($draft:expr, $field:ident) => {{
        let draft = $draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.$field = input.value();
            draft.set(next);
        })
    }};
    ($draft:expr, $field:ident, $parse:expr) => {{
        let draft = $draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.$field = $parse(&input.value());
            draft.set(next);
        })
    }};
}

fn parse_optional<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

fn toggle_id(list: &mut Vec<String>, id: &str) {
    if let Some(pos) = list.iter().position(|x| x == id) {
        list.remove(pos);
    } else {
        list.push(id.to_owned());
    }
}

#[derive(Properties, PartialEq)]
pub struct MovieFormProps {
    pub initial: MovieDraft,
    pub genres: Vec<Genre>,
    pub actors: Vec<Actor>,
    pub onsubmit: Callback<MovieDraft>,
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub oncancel: Option<Callback<()>>,
}

#[function_component]
pub fn MovieForm(props: &MovieFormProps) -> Html {
    let draft = use_state(|| props.initial.clone());
    let directors = use_state(|| props.initial.directors.join(", "));

    let onsubmit = {
        let draft = draft.clone();
        let directors = directors.clone();
        let callback = props.onsubmit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut submitted = (*draft).clone();
            submitted.directors = split_list(&directors);
            callback.emit(submitted);
        })
    };
    let description_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.description = area.value();
            draft.set(next);
        })
    };
    let toggle = |genre: bool, id: String| {
        let draft = draft.clone();
        Callback::from(move |_: Event| {
            let mut next = (*draft).clone();
            toggle_id(if genre { &mut next.genres } else { &mut next.cast }, &id);
            draft.set(next);
        })
    };
    let cancel = props.oncancel.clone().map(|oncancel| Callback::from(move |_: MouseEvent| oncancel.emit(())));

    html! {
        <form class="movie-form" {onsubmit}>
            <label for="movie_title">{"Title"}</label>
            <input id="movie_title" required=true value={draft.title.clone()} oninput={draft_input!(draft, title)} />
            <label for="movie_original_title">{"Original title"}</label>
            <input id="movie_original_title" value={draft.original_title.clone()} oninput={draft_input!(draft, original_title)} />
            <label for="movie_slug">{"Slug"}</label>
            <input id="movie_slug" placeholder="Generated from the title if empty" value={draft.slug.clone()} oninput={draft_input!(draft, slug)} />
            <label for="movie_description">{"Description"}</label>
            <textarea id="movie_description" value={draft.description.clone()} oninput={description_input} />
            <label for="movie_year">{"Year"}</label>
            <input id="movie_year" type="number" min=1888 max=2100 value={draft.year.map(|y| y.to_string()).unwrap_or_default()} oninput={draft_input!(draft, year, parse_optional::<u16>)} />
            <label for="movie_duration">{"Duration (minutes)"}</label>
            <input id="movie_duration" type="number" min=0 value={draft.duration.map(|d| d.to_string()).unwrap_or_default()} oninput={draft_input!(draft, duration, parse_optional::<u32>)} />
            <label for="movie_country">{"Country"}</label>
            <input id="movie_country" value={draft.country.clone()} oninput={draft_input!(draft, country)} />
            <label for="movie_language">{"Language"}</label>
            <input id="movie_language" value={draft.language.clone()} oninput={draft_input!(draft, language)} />
            <label for="movie_quality">{"Quality"}</label>
            <input id="movie_quality" value={draft.quality.clone()} oninput={draft_input!(draft, quality)} />
            <label for="movie_status">{"Status"}</label>
            <input id="movie_status" value={draft.status.clone()} oninput={draft_input!(draft, status)} />
            <label for="movie_directors">{"Directors (comma separated)"}</label>
            <input id="movie_directors" value={(*directors).clone()} oninput={bind_input(&directors)} />
            <label for="movie_poster">{"Poster URL"}</label>
            <input id="movie_poster" type="url" value={draft.poster.clone()} oninput={draft_input!(draft, poster)} />
            <label for="movie_banner">{"Banner URL"}</label>
            <input id="movie_banner" type="url" value={draft.banner.clone()} oninput={draft_input!(draft, banner)} />
            <label for="movie_trailer">{"Trailer URL"}</label>
            <input id="movie_trailer" type="url" value={draft.trailer.clone()} oninput={draft_input!(draft, trailer)} />
            <fieldset>
                <legend>{"Genres"}</legend>
                {for props.genres.iter().map(|g| html! {
                    <label key={g.id.clone()}>
                        <input type="checkbox" checked={draft.genres.contains(&g.id)} onchange={toggle(true, g.id.clone())} />
                        {g.name.clone()}
                    </label>
                })}
            </fieldset>
            <fieldset>
                <legend>{"Cast"}</legend>
                {for props.actors.iter().map(|a| html! {
                    <label key={a.id.clone()}>
                        <input type="checkbox" checked={draft.cast.contains(&a.id)} onchange={toggle(false, a.id.clone())} />
                        {a.name.clone()}
                    </label>
                })}
            </fieldset>
            <div class="button-row">
                <button type="submit" disabled={props.busy}>{props.submit_label.clone()}</button>
                if let Some(cancel) = cancel {
                    <button type="button" onclick={cancel}>{"Cancel"}</button>
                }
            </div>
        </form>
    }
}

#[function_component]
pub fn AdminMoviesPage() -> Html {
    let catalog = use_catalog();
    let settings_context = use_settings();
    let modal_controls: ModalControls = use_context().expect("AdminMoviesPage should be placed inside a ModalLayer");
    let filter = use_state(String::new);
    let page = use_state_eq(|| 0usize);
    let editing: UseStateHandle<Option<String>> = use_state(|| None);
    let busy = use_state_eq(|| false);
    let error = use_error();
    let banner = use_banner();

    let (movies, genres, actors): (Vec<Movie>, Vec<Genre>, Vec<Actor>) = {
        let data = catalog.data();
        let mut movies: Vec<Movie> = data.movies
            .iter()
            .filter(|m| filter_matches(&filter, &[m.title.as_str(), m.original_title.as_str(), m.slug.as_str()]))
            .cloned()
            .collect();
        movies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        (movies, data.genres.clone(), data.actors.clone())
    };
    let per_page: usize = settings_context.settings().entries_per_page.into();
    let (visible, current_page, page_count) = paginate(&movies, *page, per_page);

    let save = {
        let provider = catalog.provider.clone();
        let editing = editing.clone();
        let busy = busy.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |draft: MovieDraft| {
            let Some(id) = (*editing).clone() else {
                return;
            };
            let provider = provider.clone();
            let editing = editing.clone();
            let busy = busy.clone();
            let error = error.clone();
            let banner = banner.clone();
            busy.set(true);
            spawn_local(async move {
                let result = provider.update_movie(&id, &draft).await;
                if report(result, &error, &banner, |m| format!("Saved \"{}\"", m.title)) {
                    editing.set(None);
                }
                busy.set(false);
            });
        })
    };
    let cancel = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };
    let change_page = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let render_row = |movie: &Movie| {
        let start_edit = {
            let editing = editing.clone();
            let id = movie.id.clone();
            Callback::from(move |_| editing.set(Some(id.clone())))
        };
        let delete = {
            let provider = catalog.provider.clone();
            let modal_controls = modal_controls.clone();
            let error = error.clone();
            let banner = banner.clone();
            let id = movie.id.clone();
            let title = movie.title.clone();
            Callback::from(move |_| {
                let provider = provider.clone();
                let error = error.clone();
                let banner = banner.clone();
                let id = id.clone();
                let on_confirm = Callback::from(move |()| {
                    let provider = provider.clone();
                    let error = error.clone();
                    let banner = banner.clone();
                    let id = id.clone();
                    spawn_local(async move {
                        let result = provider.delete_movie(&id).await;
                        report(result, &error, &banner, |m| format!("Deleted \"{}\"", m.title));
                    });
                });
                modal_controls.emit(ModalAction::Show(Modal::confirm(format!("Delete \"{title}\"? It will also disappear from every user's favorites and history."), on_confirm)));
            })
        };
        html! {
            <tr key={movie.id.clone()}>
                <td>{movie_link(&movie.slug, &movie.title)}</td>
                <td>{movie.year.map(|y| y.to_string()).unwrap_or_default()}</td>
                <td>{movie.views.render_int()}</td>
                <td>{render_rating(movie.rating)}</td>
                <td>{movie.comments.len()}</td>
                <td>
                    <span class="clickable" onclick={start_edit}><Icon r#type={IconType::Edit} tooltip="Edit" /></span>
                    <span class="clickable" onclick={delete}><Icon r#type={IconType::Delete} tooltip="Delete" /></span>
                </td>
            </tr>
        }
    };

    let edited = (*editing).as_ref().and_then(|id| movies.iter().find(|m| m.id == *id));

    html! {
        <>
            <h2>{"Movies"}</h2>
            <Banner handle={banner.clone()} />
            <ErrorLine error={(*error).clone()} />
            if let Some(movie) = edited {
                <h3>{format!("Editing \"{}\"", movie.title)}</h3>
                <MovieForm
                    key={movie.id.clone()}
                    initial={MovieDraft::from(movie)}
                    genres={genres.clone()}
                    actors={actors.clone()}
                    onsubmit={save}
                    submit_label="Save changes"
                    busy={*busy}
                    oncancel={Some(cancel)}
                />
            }
            <div class="button-row">
                <Link<MainRoute> to={MainRoute::AdminUpload} classes={classes!("button")}>{"Upload a new movie"}</Link<MainRoute>>
                <input type="search" placeholder="Filter movies" value={(*filter).clone()} oninput={bind_input(&filter)} />
            </div>
            <table class="admin-table">
                <tr><th>{"Title"}</th><th>{"Year"}</th><th>{"Views"}</th><th>{"Rating"}</th><th>{"Comments"}</th><th>{"Actions"}</th></tr>
                {for visible.iter().map(render_row)}
            </table>
            <PageSelect page={current_page} {page_count} onchange={change_page} />
        </>
    }
}
