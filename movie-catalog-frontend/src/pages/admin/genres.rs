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
use movie_catalog_api::Genre;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{filter_matches, report};
use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::links::genre_link;
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::hooks::{use_banner, use_catalog, use_error};
use crate::utils::bind_input;

#[function_component]
pub fn AdminGenresPage() -> Html {
    let catalog = use_catalog();
    let modal_controls: ModalControls = use_context().expect("AdminGenresPage should be placed inside a ModalLayer");
    let filter = use_state(String::new);
    let new_name = use_state(String::new);
    let editing: UseStateHandle<Option<(String, String)>> = use_state(|| None);
    let error = use_error();
    let banner = use_banner();

    let add = {
        let provider = catalog.provider.clone();
        let new_name = new_name.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let provider = provider.clone();
            let new_name = new_name.clone();
            let error = error.clone();
            let banner = banner.clone();
            spawn_local(async move {
                let result = provider.add_genre(&new_name).await;
                if report(result, &error, &banner, |g| format!("Added genre \"{}\"", g.name)) {
                    new_name.set(String::new());
                }
            });
        })
    };

    let save_edit = {
        let provider = catalog.provider.clone();
        let editing = editing.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |_| {
            let Some((id, name)) = (*editing).clone() else {
                return;
            };
            let provider = provider.clone();
            let editing = editing.clone();
            let error = error.clone();
            let banner = banner.clone();
            spawn_local(async move {
                let result = provider.update_genre(&id, &name).await;
                if report(result, &error, &banner, |g| format!("Renamed genre to \"{}\"", g.name)) {
                    editing.set(None);
                }
            });
        })
    };
    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };
    let edit_input = {
        let editing = editing.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Some((id, _)) = (*editing).clone() {
                editing.set(Some((id, input.value())));
            }
        })
    };

    let rows: Vec<(Genre, usize)> = {
        let data = catalog.data();
        data.genres
            .iter()
            .filter(|g| filter_matches(&filter, &[g.name.as_str(), g.slug.as_str()]))
            .map(|g| (g.clone(), data.movies.iter().filter(|m| m.genres.contains(&g.id)).count()))
            .collect()
    };

    let render_row = |(genre, count): &(Genre, usize)| {
        let is_editing = (*editing).as_ref().is_some_and(|(id, _)| *id == genre.id);
        let start_edit = {
            let editing = editing.clone();
            let genre = genre.clone();
            Callback::from(move |_| editing.set(Some((genre.id.clone(), genre.name.clone()))))
        };
        let delete = {
            let provider = catalog.provider.clone();
            let modal_controls = modal_controls.clone();
            let error = error.clone();
            let banner = banner.clone();
            let genre = genre.clone();
            Callback::from(move |_| {
                let provider = provider.clone();
                let error = error.clone();
                let banner = banner.clone();
                let id = genre.id.clone();
                let on_confirm = Callback::from(move |()| {
                    let provider = provider.clone();
                    let error = error.clone();
                    let banner = banner.clone();
                    let id = id.clone();
                    spawn_local(async move {
                        let result = provider.delete_genre(&id).await;
                        report(result, &error, &banner, |g| format!("Deleted genre \"{}\"", g.name));
                    });
                });
                modal_controls.emit(ModalAction::Show(Modal::confirm(format!("Delete genre \"{}\"? It will be removed from every movie.", genre.name), on_confirm)));
            })
        };
        html! {
            <tr key={genre.id.clone()}>
                if is_editing {
                    <td>
                        <input value={(*editing).as_ref().map(|(_, name)| name.clone()).unwrap_or_default()} oninput={edit_input.clone()} />
                    </td>
                    <td>{*count}</td>
                    <td>
                        <button onclick={save_edit.clone()}>{"Save"}</button>
                        <button onclick={cancel_edit.clone()}>{"Cancel"}</button>
                    </td>
                } else {
                    <td>{genre_link(&genre.slug, &genre.name)}</td>
                    <td>{*count}</td>
                    <td>
                        <span class="clickable" onclick={start_edit}><Icon r#type={IconType::Edit} tooltip="Rename" /></span>
                        <span class="clickable" onclick={delete}><Icon r#type={IconType::Delete} tooltip="Delete" /></span>
                    </td>
                }
            </tr>
        }
    };

    html! {
        <>
            <h2>{"Genres"}</h2>
            <Banner handle={banner.clone()} />
            <ErrorLine error={(*error).clone()} />
            <form class="inline-form" onsubmit={add}>
                <input placeholder="New genre name" value={(*new_name).clone()} oninput={bind_input(&new_name)} />
                <button type="submit">{"Add genre"}</button>
            </form>
            <input type="search" placeholder="Filter genres" value={(*filter).clone()} oninput={bind_input(&filter)} />
            <table class="admin-table">
                <tr><th>{"Name"}</th><th>{"Movies"}</th><th>{"Actions"}</th></tr>
                {for rows.iter().map(render_row)}
            </table>
        </>
    }
}
