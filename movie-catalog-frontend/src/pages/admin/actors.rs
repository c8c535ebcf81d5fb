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
use movie_catalog_api::Actor;
use yew::prelude::*;

use super::{filter_matches, report};
use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::hooks::{use_banner, use_catalog, use_error};
use crate::utils::bind_input;

/// An actor being edited in place
#[derive(Clone, PartialEq)]
struct ActorEdit {
    id: String,
    name: UseStateHandle<String>,
    country: UseStateHandle<String>,
}

#[function_component]
pub fn AdminActorsPage() -> Html {
    let catalog = use_catalog();
    let modal_controls: ModalControls = use_context().expect("AdminActorsPage should be placed inside a ModalLayer");
    let filter = use_state(String::new);
    let new_name = use_state(String::new);
    let new_country = use_state(String::new);
    let edit_name = use_state(String::new);
    let edit_country = use_state(String::new);
    let editing: UseStateHandle<Option<String>> = use_state(|| None);
    let error = use_error();
    let banner = use_banner();

    let add = {
        let provider = catalog.provider.clone();
        let new_name = new_name.clone();
        let new_country = new_country.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = new_name.trim().to_owned();
            let result = provider.add_actor(&name, &new_country);
            if report(result, &error, &banner, |()| format!("Added actor \"{name}\"")) {
                new_name.set(String::new());
                new_country.set(String::new());
            }
        })
    };

    let edit = (*editing).as_ref().map(|id| ActorEdit {
        id: id.clone(),
        name: edit_name.clone(),
        country: edit_country.clone(),
    });
    let save_edit = {
        let provider = catalog.provider.clone();
        let editing = editing.clone();
        let error = error.clone();
        let banner = banner.clone();
        let edit = edit.clone();
        Callback::from(move |_| {
            let Some(ref edit) = edit else {
                return;
            };
            let result = provider.update_actor(&edit.id, &edit.name, &edit.country);
            if report(result, &error, &banner, |()| format!("Updated actor \"{}\"", edit.name.trim())) {
                editing.set(None);
            }
        })
    };
    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let rows: Vec<(Actor, usize)> = {
        let data = catalog.data();
        data.actors
            .iter()
            .filter(|a| filter_matches(&filter, &[a.name.as_str(), a.country.as_str()]))
            .map(|a| (a.clone(), data.movies.iter().filter(|m| m.cast.contains(&a.id)).count()))
            .collect()
    };

    let render_row = |(actor, count): &(Actor, usize)| {
        let start_edit = {
            let editing = editing.clone();
            let edit_name = edit_name.clone();
            let edit_country = edit_country.clone();
            let actor = actor.clone();
            Callback::from(move |_| {
                edit_name.set(actor.name.clone());
                edit_country.set(actor.country.clone());
                editing.set(Some(actor.id.clone()));
            })
        };
        let delete = {
            let provider = catalog.provider.clone();
            let modal_controls = modal_controls.clone();
            let error = error.clone();
            let banner = banner.clone();
            let actor = actor.clone();
            Callback::from(move |_| {
                let provider = provider.clone();
                let error = error.clone();
                let banner = banner.clone();
                let id = actor.id.clone();
                let name = actor.name.clone();
                let on_confirm = Callback::from(move |()| {
                    let result = provider.delete_actor(&id);
                    report(result, &error, &banner, |()| format!("Deleted actor \"{name}\""));
                });
                modal_controls.emit(ModalAction::Show(Modal::confirm(format!("Delete actor \"{}\"? They will be removed from every cast.", actor.name), on_confirm)));
            })
        };
        match edit {
            Some(ref edit) if edit.id == actor.id => html! {
                <tr key={actor.id.clone()}>
                    <td><input value={(*edit.name).clone()} oninput={bind_input(&edit.name)} /></td>
                    <td><input value={(*edit.country).clone()} oninput={bind_input(&edit.country)} /></td>
                    <td>{*count}</td>
                    <td>
                        <button onclick={save_edit.clone()}>{"Save"}</button>
                        <button onclick={cancel_edit.clone()}>{"Cancel"}</button>
                    </td>
                </tr>
            },
            _ => html! {
                <tr key={actor.id.clone()}>
                    <td>{actor.name.clone()}</td>
                    <td>{actor.country.clone()}</td>
                    <td>{*count}</td>
                    <td>
                        <span class="clickable" onclick={start_edit}><Icon r#type={IconType::Edit} tooltip="Edit" /></span>
                        <span class="clickable" onclick={delete}><Icon r#type={IconType::Delete} tooltip="Delete" /></span>
                    </td>
                </tr>
            },
        }
    };

    html! {
        <>
            <h2>{"Actors"}</h2>
            <Banner handle={banner.clone()} />
            <ErrorLine error={(*error).clone()} />
            <form class="inline-form" onsubmit={add}>
                <input placeholder="Name" value={(*new_name).clone()} oninput={bind_input(&new_name)} />
                <input placeholder="Country" value={(*new_country).clone()} oninput={bind_input(&new_country)} />
                <button type="submit">{"Add actor"}</button>
            </form>
            <input type="search" placeholder="Filter actors" value={(*filter).clone()} oninput={bind_input(&filter)} />
            <table class="admin-table">
                <tr><th>{"Name"}</th><th>{"Country"}</th><th>{"Movies"}</th><th>{"Actions"}</th></tr>
                {for rows.iter().map(render_row)}
            </table>
        </>
    }
}
