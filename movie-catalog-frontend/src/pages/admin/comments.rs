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
use movie_catalog_api::Comment;
use yew::prelude::*;

use super::{filter_matches, report};
use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::links::movie_link;
use crate::components::modals::{Modal, ModalAction, ModalControls};
use crate::hooks::{use_banner, use_catalog, use_error};
use crate::utils::{bind_input, render_millis};

#[derive(Clone, PartialEq)]
struct CommentRow {
    movie_id: String,
    movie_slug: String,
    movie_title: String,
    comment: Comment,
}

#[function_component]
pub fn AdminCommentsPage() -> Html {
    let catalog = use_catalog();
    let modal_controls: ModalControls = use_context().expect("AdminCommentsPage should be placed inside a ModalLayer");
    let filter = use_state(String::new);
    let hidden_only = use_state_eq(|| false);
    let error = use_error();
    let banner = use_banner();

    let rows: Vec<CommentRow> = {
        let data = catalog.data();
        let mut rows: Vec<CommentRow> = data.movies
            .iter()
            .flat_map(|m| m.comments.iter().map(move |c| CommentRow {
                movie_id: m.id.clone(),
                movie_slug: m.slug.clone(),
                movie_title: m.title.clone(),
                comment: c.clone(),
            }))
            .filter(|r| !*hidden_only || r.comment.hidden)
            .filter(|r| filter_matches(&filter, &[r.comment.text.as_str(), r.comment.author.as_str(), r.movie_title.as_str()]))
            .collect();
        rows.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
        rows
    };

    let toggle_hidden_only = {
        let hidden_only = hidden_only.clone();
        Callback::from(move |_| hidden_only.set(!*hidden_only))
    };

    let render_row = |row: &CommentRow| {
        let toggle_hidden = {
            let provider = catalog.provider.clone();
            let error = error.clone();
            let banner = banner.clone();
            let row = row.clone();
            Callback::from(move |_| {
                let result = provider.toggle_comment_hidden(&row.movie_id, &row.comment.id);
                report(result, &error, &banner, |hidden| {
                    if hidden { "Comment hidden".to_owned() } else { "Comment is visible again".to_owned() }
                });
            })
        };
        let delete = {
            let provider = catalog.provider.clone();
            let modal_controls = modal_controls.clone();
            let error = error.clone();
            let banner = banner.clone();
            let row = row.clone();
            Callback::from(move |_| {
                let provider = provider.clone();
                let error = error.clone();
                let banner = banner.clone();
                let row = row.clone();
                let on_confirm = Callback::from(move |()| {
                    let result = provider.delete_comment(&row.movie_id, &row.comment.id);
                    report(result, &error, &banner, |()| "Comment deleted".to_owned());
                });
                modal_controls.emit(ModalAction::Show(Modal::confirm("Delete this comment permanently?", on_confirm)));
            })
        };

        html! {
            <tr key={row.comment.id.clone()} class={classes!(row.comment.hidden.then_some("hidden-comment"))}>
                <td>{movie_link(&row.movie_slug, &row.movie_title)}</td>
                <td>{row.comment.author.clone()}</td>
                <td>{row.comment.text.clone()}</td>
                <td>{render_millis(row.comment.created_at)}</td>
                <td>
                    <span class="clickable" onclick={toggle_hidden}>
                        if row.comment.hidden {
                            <Icon r#type={IconType::Hidden} tooltip="Hidden, click to show" />
                        } else {
                            <Icon r#type={IconType::Views} tooltip="Visible, click to hide" />
                        }
                    </span>
                    <span class="clickable" onclick={delete}><Icon r#type={IconType::Delete} tooltip="Delete" /></span>
                </td>
            </tr>
        }
    };

    html! {
        <>
            <h2>{"Comments"}</h2>
            <Banner handle={banner.clone()} />
            <ErrorLine error={(*error).clone()} />
            <input type="search" placeholder="Filter by text, author or movie" value={(*filter).clone()} oninput={bind_input(&filter)} />
            <label>
                <input type="checkbox" checked={*hidden_only} onchange={toggle_hidden_only} />
                {"Hidden only"}
            </label>
            if rows.is_empty() {
                <center><em>{"No comments"}</em></center>
            } else {
                <table class="admin-table">
                    <tr><th>{"Movie"}</th><th>{"Author"}</th><th>{"Comment"}</th><th>{"Posted"}</th><th>{"Actions"}</th></tr>
                    {for rows.iter().map(render_row)}
                </table>
            }
        </>
    }
}
