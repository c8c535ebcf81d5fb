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

use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageSelectProps {
    /// Zero-based index of the current page
    pub page: usize,
    pub page_count: usize,
    pub onchange: Callback<usize>,
}

#[function_component]
pub fn PageSelect(props: &PageSelectProps) -> Html {
    if props.page_count <= 1 {
        return html! {};
    }
    let max_page = props.page_count - 1;

    let prev_page = {
        let onchange = props.onchange.clone();
        let page = props.page;
        Callback::from(move |_| onchange.emit(page.saturating_sub(1)))
    };
    let next_page = {
        let onchange = props.onchange.clone();
        let page = props.page;
        Callback::from(move |_| onchange.emit(max_page.min(page + 1)))
    };
    let input_changed = {
        let onchange = props.onchange.clone();
        let page_count = props.page_count;
        let page = props.page;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match usize::from_str(&input.value()) {
                Err(_) => input.set_value(&format!("{}", page + 1)),
                Ok(new_page) => onchange.emit(new_page.clamp(1, page_count) - 1),
            }
        })
    };

    html! {
        <div class="page-select">
            <div class="button" onclick={prev_page}>{"prev"}</div>
            <div>
                {"page"}
                <input type="number" min=1 max={format!("{}", props.page_count)} ~value={format!("{}", props.page + 1)} onchange={input_changed} />
                {format!("/{}", props.page_count)}
            </div>
            <div class="button" onclick={next_page}>{"next"}</div>
        </div>
    }
}
