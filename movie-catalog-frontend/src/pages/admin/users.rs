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
use std::str::FromStr;

use movie_catalog_api::{Role, User};
use strum::IntoEnumIterator;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::{filter_matches, report};
use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::hooks::{use_banner, use_catalog, use_error};
use crate::utils::{bind_input, render_millis};

#[function_component]
pub fn AdminUsersPage() -> Html {
    let catalog = use_catalog();
    let modal_controls: ModalControls = use_context().expect("AdminUsersPage should be placed inside a ModalLayer");
    let filter = use_state(String::new);
    let error = use_error();
    let banner = use_banner();

    let (users, me): (Vec<User>, Option<String>) = {
        let data = catalog.data();
        (
            data.users.iter().filter(|u| filter_matches(&filter, &[u.username.as_str(), u.email.as_str()])).cloned().collect(),
            data.current_user_id.clone(),
        )
    };

    let render_row = |user: &User| {
        let change_role = {
            let provider = catalog.provider.clone();
            let error = error.clone();
            let banner = banner.clone();
            let user = user.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                let Ok(role) = Role::from_str(&select.value()) else {
                    return;
                };
                let result = provider.set_user_role(&user.id, role);
                if !report(result, &error, &banner, |()| format!("{} is now {role}", user.username)) {
                    // put the select back in line with the stored role
                    select.set_value(user.role.into());
                }
            })
        };
        let delete = {
            let provider = catalog.provider.clone();
            let modal_controls = modal_controls.clone();
            let error = error.clone();
            let banner = banner.clone();
            let user = user.clone();
            Callback::from(move |_| {
                let provider = provider.clone();
                let error = error.clone();
                let banner = banner.clone();
                let id = user.id.clone();
                let username = user.username.clone();
                let on_confirm = Callback::from(move |()| {
                    let result = provider.delete_user(&id);
                    report(result, &error, &banner, |()| format!("Deleted user {username}"));
                });
                modal_controls.emit(ModalAction::Show(Modal::confirm(format!("Delete the account of {}?", user.username), on_confirm)));
            })
        };
        let is_me = me.as_deref() == Some(user.id.as_str());

        html! {
            <tr key={user.id.clone()}>
                <td>
                    {user.username.clone()}
                    if is_me {
                        {" "}<em>{"(you)"}</em>
                    }
                </td>
                <td>{user.email.clone()}</td>
                <td>
                    <select onchange={change_role}>
                        {for Role::iter().map(|role| {
                            let name: &'static str = role.into();
                            html! { <option value={name} selected={role == user.role}>{name}</option> }
                        })}
                    </select>
                </td>
                <td>{user.favorites.len()}</td>
                <td>{if user.created_at > 0 { render_millis(user.created_at) } else { String::new() }}</td>
                <td>
                    <span class="clickable" onclick={delete}><Icon r#type={IconType::Delete} tooltip="Delete" /></span>
                </td>
            </tr>
        }
    };

    html! {
        <>
            <h2>{"Users"}</h2>
            <Banner handle={banner.clone()} />
            <ErrorLine error={(*error).clone()} />
            <input type="search" placeholder="Filter by username or email" value={(*filter).clone()} oninput={bind_input(&filter)} />
            <table class="admin-table">
                <tr><th>{"Username"}</th><th>{"Email"}</th><th>{"Role"}</th><th>{"Favorites"}</th><th>{"Joined"}</th><th>{"Actions"}</th></tr>
                {for users.iter().map(render_row)}
            </table>
        </>
    }
}
