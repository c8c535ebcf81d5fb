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

use std::{num::NonZeroUsize, str::FromStr};

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::SettingsContext;
use crate::hooks::use_settings;

/// Generator macro for a revert callback (Esc key pressed)
///
/// Takes in the name of the settings field and a function to verify the input field's value
macro_rules! revert_callback {
    ($name:ident, $verify_func:ident) => {
        move |e: KeyboardEvent, settings_context: &SettingsContext| {
            if e.key() == "Escape" {
                let settings = settings_context.settings();
                let target: HtmlInputElement = e.target_unchecked_into();
                target.set_value(&settings.$name.to_string());
                if $verify_func(&target).is_none() {
                    target.set_value(&settings_context.default.$name.to_string());
                }
            }
        }
    };
}

/// Generator macro for a save callback (change committed)
macro_rules! save_callback {
    ($name:ident, $verify_func:ident) => {
        move |e: Event, settings_context: &SettingsContext| {
            let target: HtmlInputElement = e.target_unchecked_into();
            if let Some(v) = $verify_func(&target) {
                let mut settings = settings_context.settings().clone();
                settings.$name = v;
                settings_context.update(settings);
            }
        }
    };
}

/// Generator macro for input field validation & parsing functions
macro_rules! verify_fn {
    ($name:ident: $target:ident -> $type:ty => $check:block) => {
        fn $name($target: &HtmlInputElement) -> Option<$type> {
            let mut res = None;
            $target.set_custom_validity("");
            if $target.validity().valid() {
                res = match $check {
                    Err(e) => {
                        $target.set_custom_validity(&format!("{e}"));
                        None
                    },
                    Ok(v) => Some(v),
                }
            }
            if $target.report_validity() {
                res
            } else {
                None
            }
        }
    };
}

macro_rules! setting_class {
    ($initial_settings:expr, $current_settings:expr, $name:ident) => {
        if $initial_settings.$name == $current_settings.$name {
            classes!()
        } else {
            classes!("setting-changed")
        }
    };
}

verify_fn!(nonzerousize_verify: target -> NonZeroUsize => {
    NonZeroUsize::from_str(&target.value())
});

#[function_component]
pub fn SettingsModal() -> Html {
    let settings_context = use_settings();
    let initial_settings = use_memo((), |()| settings_context.settings().clone());
    let current_settings = settings_context.settings();

    let nonzerousize_oninput = use_callback((), move |e: InputEvent, ()| {
        nonzerousize_verify(&e.target_unchecked_into());
    });
    let entries_per_page_revert = use_callback(settings_context.clone(), revert_callback!(entries_per_page, nonzerousize_verify));
    let home_row_size_revert = use_callback(settings_context.clone(), revert_callback!(home_row_size, nonzerousize_verify));
    let entries_per_page_save = use_callback(settings_context.clone(), save_callback!(entries_per_page, nonzerousize_verify));
    let home_row_size_save = use_callback(settings_context.clone(), save_callback!(home_row_size, nonzerousize_verify));

    html! {
        <div id="settings-modal">
            <h2>{"Movie Catalog Settings"}</h2>
            <fieldset>
                <legend>{"Listings"}</legend>
                <label for="entries_per_page">{"Movies per page: "}</label>
                <input
                    class={setting_class!(initial_settings, current_settings, entries_per_page)}
                    id="entries_per_page"
                    type="number" step=1 min=1 required=true
                    oninput={nonzerousize_oninput.clone()}
                    onkeydown={entries_per_page_revert}
                    onchange={entries_per_page_save}
                    ~value={current_settings.entries_per_page.to_string()}
                />
            </fieldset>
            <fieldset>
                <legend>{"Home page"}</legend>
                <label for="home_row_size">{"Movies per row: "}</label>
                <input
                    class={setting_class!(initial_settings, current_settings, home_row_size)}
                    id="home_row_size"
                    type="number" step=1 min=1 required=true
                    oninput={nonzerousize_oninput}
                    onkeydown={home_row_size_revert}
                    onchange={home_row_size_save}
                    ~value={current_settings.home_row_size.to_string()}
                />
            </fieldset>
        </div>
    }
}
