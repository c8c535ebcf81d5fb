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

use crate::built_info;
use crate::constants::{BUILD_TIME, COMMIT_LINK, COMMIT_TIME, CONFIG, VERSION_STRING};
use crate::hooks::use_catalog;
use crate::utils::{render_datetime, RenderNumber};

#[function_component]
pub fn AboutModal() -> Html {
    let catalog = use_catalog();
    let stats = use_memo(catalog.revision, |_| catalog.provider.stats());

    html! {
        <div id="about-modal">
            <h2>{"About Movie Catalog"}</h2>
            <h3>{"Build info"}</h3>
            <table>
                <tr>
                    <th>{"Version"}</th>
                    <td>{*VERSION_STRING}</td>
                </tr>
                <tr>
                    <th>{"Git hash"}</th>
                    <td>
                        if let (Some(link), Some(hash)) = (*COMMIT_LINK, built_info::GIT_COMMIT_HASH_SHORT) {
                            <a href={link} target="_blank">{hash}</a>
                            if built_info::GIT_DIRTY == Some(true) {
                                {" "}<b>{"+ uncommitted changes"}</b>
                            }
                        } else {
                            <em>{"Unknown"}</em>
                        }
                    </td>
                </tr>
                <tr>
                    <th>{"Commit date"}</th>
                    <td>
                        if let Some(dt) = *COMMIT_TIME {
                            {render_datetime(dt.into())}
                        } else {
                            <em>{"Unknown"}</em>
                        }
                    </td>
                </tr>
                <tr>
                    <th>{"Build date"}</th>
                    <td>
                        if let Some(dt) = *BUILD_TIME {
                            {render_datetime(dt.into())}
                        } else {
                            <em>{"Unknown"}</em>
                        }
                    </td>
                </tr>
            </table>
            <h3>{"Data source"}</h3>
            <table>
                <tr>
                    <th>{"Mode"}</th>
                    <td>{CONFIG.mode.to_string()}</td>
                </tr>
                if CONFIG.use_api() {
                    <tr>
                        <th>{"API"}</th>
                        <td>{CONFIG.api_base_url.to_string()}</td>
                    </tr>
                }
                <tr>
                    <th>{"Movies"}</th>
                    <td>{stats.movies.render_int()}</td>
                </tr>
                <tr>
                    <th>{"Total views"}</th>
                    <td>{stats.total_views.render_int()}</td>
                </tr>
            </table>
        </div>
    }
}
