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

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Asks before running a destructive action
#[function_component]
pub fn ConfirmModal(props: &ConfirmModalProps) -> Html {
    let confirm = {
        let on_close = props.on_close.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| {
            on_close.emit(());
            on_confirm.emit(());
        })
    };
    let cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div id="confirm-modal">
            <h3>{props.message.clone()}</h3>
            <div class="button-row">
                <button class="danger" onclick={confirm}>{"Yes, do it"}</button>
                <button onclick={cancel}>{"Cancel"}</button>
            </div>
        </div>
    }
}
