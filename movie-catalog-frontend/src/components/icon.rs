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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconType {
    Logo,
    Settings,
    Favorite,
    NotFavorite,
    Star,
    Views,
    Edit,
    Delete,
    Hidden,
    Wait,
    Done,
    Close,
}

#[derive(Properties, PartialEq)]
pub struct IconProps {
    pub r#type: IconType,
    #[prop_or_default]
    pub tooltip: Option<AttrValue>,
}

#[function_component]
pub fn Icon(props: &IconProps) -> Html {
    let class = match props.r#type {
        IconType::Logo        => classes!("icon", "icon-logo"),
        IconType::Settings    => classes!("icon", "icon-settings"),
        IconType::Favorite    => classes!("icon", "icon-favorite"),
        IconType::NotFavorite => classes!("icon", "icon-favorite", "grayscale"),
        IconType::Star        => classes!("icon", "icon-star"),
        IconType::Views       => classes!("icon", "icon-views"),
        IconType::Edit        => classes!("icon", "icon-edit"),
        IconType::Delete      => classes!("icon", "icon-delete"),
        IconType::Hidden      => classes!("icon", "icon-hidden"),
        IconType::Wait        => classes!("icon", "icon-wait"),
        IconType::Done        => classes!("icon", "icon-done"),
        IconType::Close       => classes!("icon", "icon-delete", "grayscale"),
    };

    html! {
        <span {class} title={props.tooltip.clone()}></span>
    }
}
