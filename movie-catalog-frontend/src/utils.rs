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
use chrono::{DateTime, Utc};
use movie_catalog_api::Movie;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render_datetime(dt: DateTime<Utc>) -> String {
    format!("{}", dt.format(TIME_FORMAT))
}

/// Renders a unix millisecond timestamp, or an empty string if it's out of range
pub fn render_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map(render_datetime).unwrap_or_default()
}

pub fn render_duration(minutes: Option<u32>) -> Option<String> {
    match minutes? {
        0 => None,
        m if m < 60 => Some(format!("{m} min")),
        m => Some(format!("{}h {:02}min", m / 60, m % 60)),
    }
}

pub fn render_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}/10")
    } else {
        "Not rated".to_owned()
    }
}

pub trait RenderNumber {
    /// Render a large integer in a human-readable way:
    /// Digits will be arranged in groups of 3, with spaces in between
    fn render_int(&self) -> String;
    /// Render a large integer in an abbreviated form:
    /// for example: 21370 will become 21K
    fn abbreviate_int(&self) -> String;
}

macro_rules! define_render_number {
    ($type: ident) => {
        impl RenderNumber for $type {
            fn render_int(&self) -> String {
                let string_n = format!("{self}");
                let chunks = string_n.as_bytes() // digits are ASCII = 1B each
                    .rchunks(3)
                    .rev()
                    .map(|chunk| chunk.iter().map(|b| char::from(*b)).collect::<String>())
                    .collect::<Vec<_>>();
                chunks.join(" ")
            }

            fn abbreviate_int(&self) -> String {
                match *self {
                    0..=999 => format!("{self}"),
                    1_000..=999_999 => format!("{}K", self / 1_000),
                    1_000_000..=999_999_999 => format!("{}M", self / 1_000_000),
                    _ => format!("{}B", (self / 1_000_000_000).render_int()),
                }
            }
        }
    };
}

define_render_number!(u64);
define_render_number!(usize);

/// Case-insensitive substring match against the title and original title
pub fn matches_keyword(movie: &Movie, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    keyword.is_empty()
        || movie.title.to_lowercase().contains(&keyword)
        || movie.original_title.to_lowercase().contains(&keyword)
}

/// Splits a comma separated input field into trimmed, non-empty values
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(ToOwned::to_owned).collect()
}

/// Returns the requested page of `items`, clamping the page index
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> (&[T], usize, usize) {
    let page_count = items.len().div_ceil(per_page).max(1);
    let page = page.min(page_count - 1);
    let start = (page * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    (&items[start..end], page, page_count)
}

/// `oninput` callback writing the input's value into `state`
pub fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}
