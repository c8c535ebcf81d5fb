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
use gloo_console::info;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::banner::ErrorLine;
use crate::hooks::{use_catalog, use_error};
use crate::pages::MainRoute;
use crate::utils::bind_input;

#[function_component]
pub fn LoginPage() -> Html {
    let catalog = use_catalog();
    let navigator = use_navigator().expect("navigator should exist");
    let identifier = use_state(String::new);
    let password = use_state(String::new);
    let error = use_error();
    let busy = use_state_eq(|| false);

    let onsubmit = {
        let provider = catalog.provider.clone();
        let identifier = identifier.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if identifier.trim().is_empty() || password.is_empty() {
                error.set(Some("Please enter your username and password".into()));
                return;
            }
            let provider = provider.clone();
            let navigator = navigator.clone();
            let identifier = identifier.trim().to_owned();
            let password = (*password).clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match provider.login(&identifier, &password).await {
                    Ok(user) => {
                        info!(format!("Logged in as {}", user.username));
                        error.set(None);
                        navigator.push(&if user.is_admin() { MainRoute::Admin } else { MainRoute::Home });
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
                busy.set(false);
            });
        })
    };

    if let Some(user) = catalog.current_user() {
        return html! {
            <div class="auth-form">
                <h2>{format!("You're logged in as {}", user.username)}</h2>
                <Link<MainRoute> to={MainRoute::Home}>{"Return to home page"}</Link<MainRoute>>
            </div>
        };
    }

    html! {
        <form class="auth-form" {onsubmit}>
            <h2>{"Log in"}</h2>
            <label for="login_identifier">{"Username or email"}</label>
            <input id="login_identifier" autocomplete="username" value={(*identifier).clone()} oninput={bind_input(&identifier)} />
            <label for="login_password">{"Password"}</label>
            <input id="login_password" type="password" autocomplete="current-password" value={(*password).clone()} oninput={bind_input(&password)} />
            <ErrorLine error={(*error).clone()} />
            <button type="submit" disabled={*busy}>{if *busy { "Logging in..." } else { "Log in" }}</button>
            <span>{"No account yet? "}<Link<MainRoute> to={MainRoute::Register}>{"Register"}</Link<MainRoute>></span>
        </form>
    }
}

#[function_component]
pub fn RegisterPage() -> Html {
    let catalog = use_catalog();
    let navigator = use_navigator().expect("navigator should exist");
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let error = use_error();
    let busy = use_state_eq(|| false);

    let onsubmit = {
        let provider = catalog.provider.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *password != *confirm {
                error.set(Some("Passwords do not match".into()));
                return;
            }
            let provider = provider.clone();
            let navigator = navigator.clone();
            let username = username.trim().to_owned();
            let email = email.trim().to_owned();
            let password = (*password).clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match provider.register(&username, &email, &password).await {
                    Ok(user) => {
                        info!(format!("Registered as {}", user.username));
                        error.set(None);
                        navigator.push(&MainRoute::Home);
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <form class="auth-form" {onsubmit}>
            <h2>{"Create an account"}</h2>
            <label for="register_username">{"Username"}</label>
            <input id="register_username" autocomplete="username" value={(*username).clone()} oninput={bind_input(&username)} />
            <label for="register_email">{"Email"}</label>
            <input id="register_email" type="email" autocomplete="email" value={(*email).clone()} oninput={bind_input(&email)} />
            <label for="register_password">{"Password"}</label>
            <input id="register_password" type="password" autocomplete="new-password" value={(*password).clone()} oninput={bind_input(&password)} />
            <label for="register_confirm">{"Repeat password"}</label>
            <input id="register_confirm" type="password" autocomplete="new-password" value={(*confirm).clone()} oninput={bind_input(&confirm)} />
            <ErrorLine error={(*error).clone()} />
            <button type="submit" disabled={*busy}>{if *busy { "Registering..." } else { "Register" }}</button>
            <span>{"Already registered? "}<Link<MainRoute> to={MainRoute::Login}>{"Log in"}</Link<MainRoute>></span>
        </form>
    }
}
