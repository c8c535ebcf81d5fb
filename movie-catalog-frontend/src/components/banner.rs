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
use yew::prelude::*;

use crate::hooks::BannerHandle;

#[derive(Properties, PartialEq)]
pub struct BannerProps {
    pub handle: BannerHandle,
}

/// Success message, hidden again by [`crate::hooks::use_banner`]
#[function_component]
pub fn Banner(props: &BannerProps) -> Html {
    let onclick = {
        let handle = props.handle.clone();
        Callback::from(move |_| handle.clear())
    };
    match props.handle.message() {
        None => html! {},
        Some(message) => html! {
            <div class="banner success clickable" {onclick}>{message}</div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorLineProps {
    pub error: Option<AttrValue>,
}

#[function_component]
pub fn ErrorLine(props: &ErrorLineProps) -> Html {
    match props.error {
        None => html! {},
        Some(ref error) => html! {
            <div class="inline-error">{error.clone()}</div>
        },
    }
}
