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

//! Movie upload wizard
//!
//! Each step is its own request. A failed step leaves whatever the previous
//! steps created in place, the admin can retry or skip it.

use cloneable_errors::{anyhow, ErrorContext};
use movie_catalog_api::{Episode, EpisodeDraft, Movie, MovieDraft};
use movie_catalog_core::{CatalogError, Upload};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::Uint8Array;
use web_sys::{File, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::movies::MovieForm;
use crate::components::banner::{Banner, ErrorLine};
use crate::contexts::CatalogContext;
use crate::hooks::{use_banner, use_catalog, use_error, BannerHandle};
use crate::pages::MainRoute;
use crate::utils::bind_input;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    Details,
    Poster,
    Episodes,
}

impl Step {
    fn title(self) -> &'static str {
        match self {
            Step::Details => "1. Movie details",
            Step::Poster => "2. Poster",
            Step::Episodes => "3. Episodes",
        }
    }
}

async fn read_upload(file: &File) -> Result<Upload, ErrorContext> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow!("Failed to read {}: {e:?}", file.name()))?;
    Ok(Upload {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}

fn selected_file(e: &Event) -> Option<File> {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.files().and_then(|files| files.get(0))
}

#[function_component]
pub fn UploadWizardPage() -> Html {
    let catalog = use_catalog();
    let step = use_state_eq(|| Step::Details);
    let created: UseStateHandle<Option<Movie>> = use_state(|| None);
    let busy = use_state_eq(|| false);
    let error = use_error();
    let banner = use_banner();

    let (genres, actors) = {
        let data = catalog.data();
        (data.genres.clone(), data.actors.clone())
    };

    let create = {
        let provider = catalog.provider.clone();
        let step = step.clone();
        let created = created.clone();
        let busy = busy.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |draft: MovieDraft| {
            let provider = provider.clone();
            let step = step.clone();
            let created = created.clone();
            let busy = busy.clone();
            let error = error.clone();
            let banner = banner.clone();
            busy.set(true);
            spawn_local(async move {
                match provider.add_movie(&draft).await {
                    Ok(movie) => {
                        error.set(None);
                        banner.show(format!("Created \"{}\"", movie.title));
                        created.set(Some(movie));
                        step.set(Step::Poster);
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
                busy.set(false);
            });
        })
    };

    let body = match (*step, (*created).clone()) {
        (Step::Details, _) | (_, None) => html! {
            <MovieForm
                initial={MovieDraft::default()}
                {genres}
                {actors}
                onsubmit={create}
                submit_label="Create movie"
                busy={*busy}
            />
        },
        (Step::Poster, Some(movie)) => html! {
            <PosterStep {movie} step={step.clone()} created={created.clone()} />
        },
        (Step::Episodes, Some(movie)) => html! {
            <EpisodesStep {movie} />
        },
    };

    html! {
        <>
            <h2>{"Upload a movie"}</h2>
            <ol class="wizard-steps">
                {for [Step::Details, Step::Poster, Step::Episodes].into_iter().map(|s| html! {
                    <li class={classes!((s == *step).then_some("current"))}>{s.title()}</li>
                })}
            </ol>
            <Banner handle={banner} />
            <ErrorLine error={(*error).clone()} />
            {body}
        </>
    }
}

#[derive(Properties, PartialEq)]
struct PosterStepProps {
    movie: Movie,
    step: UseStateHandle<Step>,
    created: UseStateHandle<Option<Movie>>,
}

/// Uploads the poster and points the movie at it
async fn attach_poster(catalog: &CatalogContext, movie: &Movie, file: &File) -> Result<Movie, CatalogError> {
    let upload = read_upload(file).await?;
    let url = catalog.api().upload_image(upload).await?;
    let mut draft = MovieDraft::from(movie);
    draft.poster = url;
    catalog.provider.update_movie(&movie.id, &draft).await
}

#[function_component]
fn PosterStep(props: &PosterStepProps) -> Html {
    let catalog = use_catalog();
    let file: UseStateHandle<Option<File>> = use_state(|| None);
    let busy = use_state_eq(|| false);
    let error = use_error();

    let onchange = {
        let file = file.clone();
        Callback::from(move |e: Event| file.set(selected_file(&e)))
    };
    let skip = {
        let step = props.step.clone();
        Callback::from(move |_| step.set(Step::Episodes))
    };
    let upload = {
        let catalog = catalog.clone();
        let movie = props.movie.clone();
        let step = props.step.clone();
        let created = props.created.clone();
        let file = file.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let Some(selected) = (*file).clone() else {
                error.set(Some("Pick an image first".into()));
                return;
            };
            let catalog = catalog.clone();
            let movie = movie.clone();
            let step = step.clone();
            let created = created.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            spawn_local(async move {
                match attach_poster(&catalog, &movie, &selected).await {
                    Ok(updated) => {
                        error.set(None);
                        created.set(Some(updated));
                        step.set(Step::Episodes);
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
                busy.set(false);
            });
        })
    };

    if !catalog.use_api() {
        return html! {
            <div class="wizard-step">
                <p>{"Uploads need the API. Set a poster URL from the movie list instead."}</p>
                <button onclick={skip}>{"Continue"}</button>
            </div>
        };
    }

    html! {
        <div class="wizard-step">
            if !props.movie.poster.is_empty() {
                <img class="poster" src={props.movie.poster.clone()} />
            }
            <input type="file" accept="image/*" {onchange} />
            <ErrorLine error={(*error).clone()} />
            <div class="button-row">
                <button onclick={upload} disabled={*busy}>{if *busy { "Uploading..." } else { "Upload poster" }}</button>
                <button onclick={skip}>{"Skip"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct EpisodesStepProps {
    movie: Movie,
}

/// Uploads the optional video file, then creates the episode
async fn add_episode(catalog: &CatalogContext, slug: &str, mut draft: EpisodeDraft, video: Option<File>) -> Result<Episode, CatalogError> {
    if let Some(ref video) = video {
        let upload = read_upload(video).await?;
        draft.video_url = catalog.api().upload_video(upload).await?;
    }
    Ok(catalog.api().create_episode(slug, &draft).await?)
}

fn episode_done(banner: &BannerHandle, episodes: &UseStateHandle<Vec<Episode>>, episode: Episode) {
    banner.show(format!("Added episode \"{}\"", episode.name));
    let mut next = (**episodes).clone();
    next.push(episode);
    episodes.set(next);
}

#[function_component]
fn EpisodesStep(props: &EpisodesStepProps) -> Html {
    let catalog = use_catalog();
    let navigator = use_navigator().expect("navigator should exist");
    let name = use_state(String::new);
    let server_name = use_state(String::new);
    let embed_url = use_state(String::new);
    let video: UseStateHandle<Option<File>> = use_state(|| None);
    let episodes: UseStateHandle<Vec<Episode>> = use_state(Vec::new);
    let busy = use_state_eq(|| false);
    let error = use_error();
    let banner = use_banner();

    let finish = {
        let slug = props.movie.slug.clone();
        Callback::from(move |_| navigator.push(&MainRoute::Movie { id: slug.clone().into() }))
    };
    let pick_video = {
        let video = video.clone();
        Callback::from(move |e: Event| video.set(selected_file(&e)))
    };
    let onsubmit = {
        let catalog = catalog.clone();
        let slug = props.movie.slug.clone();
        let name = name.clone();
        let server_name = server_name.clone();
        let embed_url = embed_url.clone();
        let video = video.clone();
        let episodes = episodes.clone();
        let busy = busy.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if name.trim().is_empty() {
                error.set(Some("Episode name is required".into()));
                return;
            }
            let draft = EpisodeDraft {
                name: name.trim().to_owned(),
                server_name: server_name.trim().to_owned(),
                embed_url: embed_url.trim().to_owned(),
                video_url: String::new(),
            };
            let catalog = catalog.clone();
            let slug = slug.clone();
            let video_file = (*video).clone();
            let name = name.clone();
            let episodes = episodes.clone();
            let busy = busy.clone();
            let error = error.clone();
            let banner = banner.clone();
            busy.set(true);
            spawn_local(async move {
                match add_episode(&catalog, &slug, draft, video_file).await {
                    Ok(episode) => {
                        error.set(None);
                        name.set(String::new());
                        episode_done(&banner, &episodes, episode);
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
                busy.set(false);
            });
        })
    };

    if !catalog.use_api() {
        return html! {
            <div class="wizard-step">
                <p>{"Episodes are stored on the server and need the API."}</p>
                <button onclick={finish}>{"Finish"}</button>
            </div>
        };
    }

    html! {
        <div class="wizard-step">
            if !episodes.is_empty() {
                <ul>
                    {for episodes.iter().map(|e| html! { <li key={e.id.clone()}>{e.name.clone()}</li> })}
                </ul>
            }
            <form class="episode-form" {onsubmit}>
                <label for="episode_name">{"Name"}</label>
                <input id="episode_name" placeholder="Episode 1" value={(*name).clone()} oninput={bind_input(&name)} />
                <label for="episode_server">{"Server name"}</label>
                <input id="episode_server" value={(*server_name).clone()} oninput={bind_input(&server_name)} />
                <label for="episode_embed">{"Embed URL"}</label>
                <input id="episode_embed" type="url" value={(*embed_url).clone()} oninput={bind_input(&embed_url)} />
                <label for="episode_video">{"Video file"}</label>
                <input id="episode_video" type="file" accept="video/*" onchange={pick_video} />
                <Banner handle={banner} />
                <ErrorLine error={(*error).clone()} />
                <div class="button-row">
                    <button type="submit" disabled={*busy}>{if *busy { "Uploading..." } else { "Add episode" }}</button>
                    <button type="button" onclick={finish}>{"Finish"}</button>
                </div>
            </form>
        </div>
    }
}
