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
use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::icon::{Icon, IconType};
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::components::searchbar::Searchbar;
use crate::constants::{CONFIG, VERSION_STRING};
use crate::hooks::use_catalog;
use crate::pages::MainRoute;

#[function_component]
pub fn Header() -> Html {
    let catalog = use_catalog();
    let navigator = use_navigator().expect("navigator should exist");
    let modal_controls: ModalControls = use_context().expect("Header should be placed inside a ModalLayer");
    let open_settings_modal = use_callback(modal_controls, |_, modal_controls| {
        modal_controls.emit(ModalAction::Show(Modal::Settings));
    });
    let logout = {
        let provider = catalog.provider.clone();
        Callback::from(move |_| {
            let provider = provider.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if let Err(e) = provider.logout().await {
                    error!(format!("Failed to log out: {e:?}"));
                }
                navigator.push(&MainRoute::Home);
            });
        })
    };

    let user = catalog.current_user();

    html! {
        <div id="header">
            <Link<MainRoute> to={MainRoute::Home}><Icon r#type={IconType::Logo} /></Link<MainRoute>>
            <h1 class="undecorated-link"><Link<MainRoute> to={MainRoute::Home}>{"Movie Catalog"}</Link<MainRoute>></h1>
            <nav>
                <Link<MainRoute> to={MainRoute::Home}>{"Home"}</Link<MainRoute>>
                if user.is_some() {
                    <Link<MainRoute> to={MainRoute::Favorites}>{"Favorites"}</Link<MainRoute>>
                }
                if catalog.is_admin() {
                    <Link<MainRoute> to={MainRoute::Admin}>{"Admin"}</Link<MainRoute>>
                }
            </nav>
            <Searchbar />
            <div id="user-menu">
                if let Some(user) = user {
                    <Link<MainRoute> to={MainRoute::Profile}>{user.username}</Link<MainRoute>>
                    <span class="clickable" onclick={logout}>{"Log out"}</span>
                } else {
                    <Link<MainRoute> to={MainRoute::Login}>{"Log in"}</Link<MainRoute>>
                    <Link<MainRoute> to={MainRoute::Register}>{"Register"}</Link<MainRoute>>
                }
                <span id="settings-button" class="clickable" onclick={open_settings_modal}><Icon r#type={IconType::Settings} tooltip={"Open settings"} /></span>
            </div>
        </div>
    }
}

#[function_component]
pub fn Footer() -> Html {
    let catalog = use_catalog();
    let modal_controls: ModalControls = use_context().expect("Footer should be placed inside a ModalLayer");
    let open_about_modal = use_callback(modal_controls, |_, modal_controls| {
        modal_controls.emit(ModalAction::Show(Modal::About));
    });

    html! {
        <div id="footer">
            <table class="clickable" onclick={open_about_modal}>
                <tr>
                    <td>{"Version:"}</td>
                    <td>{*VERSION_STRING}</td>
                </tr>
                <tr>
                    <td>{"Data source:"}</td>
                    <td>
                        if CONFIG.use_api() {
                            {"API"}
                        } else {
                            {"Sample data"}
                        }
                        if !catalog.loaded {
                            <b>{", loading..."}</b>
                        }
                    </td>
                </tr>
            </table>
            <span>
                {"Movie Catalog, licensed under "}
                <a href="https://www.gnu.org/licenses/agpl-3.0.en.html">{"AGPL v3"}</a>
            </span>
        </div>
    }
}
