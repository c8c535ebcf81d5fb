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
use yew_router::prelude::*;

use crate::pages::MainRoute;

pub fn movie_link(id_or_slug: &str, title: &str) -> Html {
    html! {
        <Link<MainRoute> to={MainRoute::Movie { id: AttrValue::from(id_or_slug.to_owned()) }}>{title.to_owned()}</Link<MainRoute>>
    }
}

pub fn genre_link(id: &str, name: &str) -> Html {
    html! {
        <Link<MainRoute> classes={classes!("tag")} to={MainRoute::Genre { id: AttrValue::from(id.to_owned()) }}>{name.to_owned()}</Link<MainRoute>>
    }
}

pub fn country_link(id: &str, name: &str) -> Html {
    html! {
        <Link<MainRoute> classes={classes!("tag")} to={MainRoute::Country { id: AttrValue::from(id.to_owned()) }}>{name.to_owned()}</Link<MainRoute>>
    }
}

pub fn year_link(year: u16) -> Html {
    html! {
        <Link<MainRoute> to={MainRoute::Year { year }}>{year}</Link<MainRoute>>
    }
}
