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
use std::rc::Rc;

use gloo_console::warn;
use movie_catalog_api::{Comment, Episode, Movie};
use movie_catalog_core::{CatalogError, MAX_COMMENT_LENGTH};
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::banner::{Banner, ErrorLine};
use crate::components::icon::{Icon, IconType};
use crate::components::links::{country_link, genre_link, year_link};
use crate::constants::RATING_SCORES;
use crate::contexts::Provider;
use crate::hooks::{use_async_suspension, use_banner, use_catalog, use_error};
use crate::pages::MainRoute;
use crate::utils::{render_duration, render_millis, render_rating, RenderNumber};

#[derive(Properties, PartialEq)]
pub struct MoviePageProps {
    pub id: AttrValue,
}

#[function_component]
pub fn MoviePage(props: &MoviePageProps) -> Html {
    let catalog = use_catalog();
    let known_id = catalog.data().movie(&props.id).map(|m| m.id.clone());

    let fallback = html! {
        <center><b>{"Loading..."}</b></center>
    };

    match known_id {
        Some(id) => html! { <MovieDetails key={id.clone()} movie_id={AttrValue::from(id.clone())} /> },
        None if !catalog.loaded => fallback,
        None if catalog.use_api() => html! {
            <Suspense {fallback}>
                <RemoteMovieLoader id={props.id.clone()} />
            </Suspense>
        },
        None => movie_not_found(),
    }
}

fn movie_not_found() -> Html {
    html! {
        <>
            <h2>{"Movie not found"}</h2>
            <Link<MainRoute> to={MainRoute::Home}>{"Return to home page"}</Link<MainRoute>>
        </>
    }
}

async fn load_remote_movie(provider: Rc<Provider>, id: AttrValue) -> Result<(), CatalogError> {
    let movie = provider.backend().get_movie(&id).await?;
    provider.remember_movie(movie)
}

/// Fetches a movie the store doesn't know yet, the page re-renders once it's stored
#[function_component]
fn RemoteMovieLoader(props: &MoviePageProps) -> HtmlResult {
    let provider = use_catalog().provider;
    let result = use_async_suspension(move |id: AttrValue| load_remote_movie(provider, id), props.id.clone())?;

    Ok(match *result {
        Ok(()) => html! {},
        Err(ref e) => {
            warn!(format!("Failed to load movie: {e:?}"));
            movie_not_found()
        },
    })
}

#[derive(Properties, PartialEq)]
struct MovieDetailsProps {
    movie_id: AttrValue,
}

#[function_component]
fn MovieDetails(props: &MovieDetailsProps) -> Html {
    let catalog = use_catalog();
    let favorite_error = use_error();

    // one view per visit
    {
        let provider = catalog.provider.clone();
        use_effect_with(props.movie_id.clone(), move |id| {
            if let Err(e) = provider.record_view(id) {
                warn!(format!("Failed to record a view: {e:?}"));
            }
        });
    }

    let toggle_favorite = {
        let provider = catalog.provider.clone();
        let id = props.movie_id.clone();
        let error = favorite_error.clone();
        Callback::from(move |_| match provider.toggle_favorite(&id) {
            Ok(_) => error.set(None),
            Err(e) => error.set(Some(e.to_string().into())),
        })
    };

    let data = catalog.data();
    let Some(movie) = data.movie(&props.movie_id) else {
        return movie_not_found();
    };
    let genres: Vec<Html> = movie.genres
        .iter()
        .map(|id| match data.genre(id) {
            Some(genre) => genre_link(&genre.slug, &genre.name),
            None => html! { <span class="tag">{id.clone()}</span> },
        })
        .collect();
    let country = data.countries
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(&movie.country))
        .map_or_else(|| html! { {movie.country.clone()} }, |c| country_link(&c.slug, &c.name));
    let cast = data.cast_names(movie).join(", ");
    let is_favorite = data.is_favorite(&movie.id);
    let logged_in = data.current_user().is_some();
    let comments: Vec<Comment> = movie.visible_comments().cloned().collect();
    let movie: Movie = movie.clone();
    drop(data);

    html! {
        <div class="movie-details">
            if !movie.banner.is_empty() {
                <img class="movie-banner" src={movie.banner.clone()} />
            }
            <div class="movie-summary">
                if !movie.poster.is_empty() {
                    <img class="poster" src={movie.poster.clone()} alt={movie.title.clone()} />
                }
                <div>
                    <h2>{movie.title.clone()}</h2>
                    if !movie.original_title.is_empty() && movie.original_title != movie.title {
                        <h3>{movie.original_title.clone()}</h3>
                    }
                    <table class="movie-facts">
                        if let Some(year) = movie.year {
                            <tr><th>{"Year"}</th><td>{year_link(year)}</td></tr>
                        }
                        if !movie.country.is_empty() {
                            <tr><th>{"Country"}</th><td>{country}</td></tr>
                        }
                        if let Some(duration) = render_duration(movie.duration) {
                            <tr><th>{"Duration"}</th><td>{duration}</td></tr>
                        }
                        if !movie.quality.is_empty() {
                            <tr><th>{"Quality"}</th><td>{movie.quality.clone()}</td></tr>
                        }
                        if !movie.language.is_empty() {
                            <tr><th>{"Language"}</th><td>{movie.language.clone()}</td></tr>
                        }
                        if !movie.status.is_empty() {
                            <tr><th>{"Status"}</th><td>{movie.status.clone()}</td></tr>
                        }
                        if !genres.is_empty() {
                            <tr><th>{"Genres"}</th><td>{for genres}</td></tr>
                        }
                        if !cast.is_empty() {
                            <tr><th>{"Cast"}</th><td>{cast}</td></tr>
                        }
                        if !movie.directors.is_empty() {
                            <tr><th>{"Directors"}</th><td>{movie.directors.join(", ")}</td></tr>
                        }
                        <tr><th>{"Rating"}</th><td><Icon r#type={IconType::Star} />{render_rating(movie.rating)}{format!(" ({} votes)", movie.ratings.len())}</td></tr>
                        <tr><th>{"Views"}</th><td><Icon r#type={IconType::Views} />{movie.views.render_int()}</td></tr>
                    </table>
                    if logged_in {
                        <span class="clickable favorite-toggle" onclick={toggle_favorite}>
                            if is_favorite {
                                <Icon r#type={IconType::Favorite} />{"Remove from favorites"}
                            } else {
                                <Icon r#type={IconType::NotFavorite} />{"Add to favorites"}
                            }
                        </span>
                        if catalog.use_api() {
                            <ServerFavoriteButton slug={AttrValue::from(movie.slug.clone())} />
                        }
                        <ErrorLine error={(*favorite_error).clone()} />
                    }
                </div>
            </div>
            if !movie.description.is_empty() {
                <p class="movie-description">{movie.description.clone()}</p>
            }
            if !movie.trailer.is_empty() {
                <iframe class="movie-trailer" src={movie.trailer.clone()} allowfullscreen={true} />
            }
            if catalog.use_api() {
                <Suspense fallback={html! {<em>{"Loading episodes..."}</em>}}>
                    <EpisodeList slug={AttrValue::from(movie.slug.clone())} />
                </Suspense>
            }
            if logged_in {
                <RatingForm movie_id={props.movie_id.clone()} />
            } else {
                <p><Link<MainRoute> to={MainRoute::Login}>{"Log in"}</Link<MainRoute>>{" to rate this movie and leave comments"}</p>
            }
            <CommentSection movie_id={props.movie_id.clone()} {comments} {logged_in} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ServerFavoriteButtonProps {
    slug: AttrValue,
}

/// Favorite flag stored on the server, separate from the local favorites list
#[function_component]
fn ServerFavoriteButton(props: &ServerFavoriteButtonProps) -> Html {
    let provider = use_catalog().provider;
    let saved: UseStateHandle<Option<bool>> = use_state_eq(|| None);
    let error = use_error();

    {
        let provider = provider.clone();
        let saved = saved.clone();
        let error = error.clone();
        use_effect_with(props.slug.clone(), move |slug| {
            let slug = slug.clone();
            spawn_local(async move {
                match provider.backend().favorites().await {
                    Ok(slugs) => saved.set(Some(slugs.iter().any(|s| *s == *slug))),
                    Err(e) => error.set(Some(format!("Failed to load server favorites: {e}").into())),
                }
            });
        });
    }

    let onclick = {
        let saved = saved.clone();
        let error = error.clone();
        let slug = props.slug.clone();
        Callback::from(move |_| {
            let Some(was_saved) = *saved else {
                return;
            };
            let provider = provider.clone();
            let saved = saved.clone();
            let error = error.clone();
            let slug = slug.clone();
            spawn_local(async move {
                let result = if was_saved {
                    provider.backend().remove_favorite(&slug).await
                } else {
                    provider.backend().add_favorite(&slug).await
                };
                match result {
                    Ok(()) => {
                        saved.set(Some(!was_saved));
                        error.set(None);
                    },
                    Err(e) => error.set(Some(e.to_string().into())),
                }
            });
        })
    };

    let label = match *saved {
        None => html! { <><Icon r#type={IconType::Wait} />{"Checking server favorites..."}</> },
        Some(true) => html! { <><Icon r#type={IconType::Done} />{"Saved to your account"}</> },
        Some(false) => html! { <><Icon r#type={IconType::NotFavorite} />{"Save to your account"}</> },
    };

    html! {
        <>
            <span class="clickable favorite-toggle" {onclick}>
                {label}
            </span>
            <ErrorLine error={(*error).clone()} />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct EpisodeListProps {
    slug: AttrValue,
}

#[function_component]
fn EpisodeList(props: &EpisodeListProps) -> HtmlResult {
    let provider = use_catalog().provider;
    let playing: UseStateHandle<Option<Episode>> = use_state_eq(|| None);
    let episodes = use_async_suspension(
        move |slug: AttrValue| async move { provider.backend().list_episodes(&slug).await },
        props.slug.clone(),
    )?;

    let episodes = match *episodes {
        Ok(ref episodes) => episodes,
        Err(ref e) => {
            warn!(format!("Failed to load episodes: {e:?}"));
            return Ok(html! { <em>{"Episodes are unavailable right now"}</em> });
        },
    };
    if episodes.is_empty() {
        return Ok(html! {});
    }

    Ok(html! {
        <section class="episodes">
            <h3>{"Episodes"}</h3>
            if let Some(ref episode) = *playing {
                if !episode.embed_url.is_empty() {
                    <iframe class="episode-player" src={episode.embed_url.clone()} allowfullscreen={true} />
                } else {
                    <video class="episode-player" src={episode.video_url.clone()} controls=true />
                }
            }
            <div class="episode-list">
                {for episodes.iter().map(|episode| {
                    let onclick = {
                        let playing = playing.clone();
                        let episode = episode.clone();
                        Callback::from(move |_| playing.set(Some(episode.clone())))
                    };
                    let class = if (*playing).as_ref().is_some_and(|p| p.id == episode.id) {
                        classes!("button", "selected")
                    } else {
                        classes!("button")
                    };
                    html! {
                        <div key={episode.id.clone()} {class} {onclick} title={episode.server_name.clone()}>{episode.name.clone()}</div>
                    }
                })}
            </div>
        </section>
    })
}

#[derive(Properties, PartialEq)]
struct RatingFormProps {
    movie_id: AttrValue,
}

#[function_component]
fn RatingForm(props: &RatingFormProps) -> Html {
    let catalog = use_catalog();
    let current = catalog.data().user_rating(&props.movie_id);
    let score = use_state_eq(|| current.unwrap_or(*RATING_SCORES.end()));
    let error = use_error();
    let banner = use_banner();

    let onchange = {
        let score = score.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse() {
                score.set(value);
            }
        })
    };
    let onsubmit = {
        let provider = catalog.provider.clone();
        let movie_id = props.movie_id.clone();
        let score = score.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match provider.rate_movie(&movie_id, *score) {
                Ok(average) => {
                    error.set(None);
                    banner.show(format!("Thanks for rating! The average is now {average:.1}"));
                },
                Err(e) => error.set(Some(e.to_string().into())),
            }
        })
    };

    html! {
        <form class="rating-form" {onsubmit}>
            <h3>{"Your rating"}</h3>
            if let Some(current) = current {
                <span>{format!("You rated this movie {current}/10. ")}</span>
            }
            <select {onchange}>
                {for RATING_SCORES.rev().map(|s| html! {
                    <option value={s.to_string()} selected={s == *score}>{s}</option>
                })}
            </select>
            <button type="submit">{"Rate"}</button>
            <ErrorLine error={(*error).clone()} />
            <Banner handle={banner} />
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct CommentSectionProps {
    movie_id: AttrValue,
    comments: Vec<Comment>,
    logged_in: bool,
}

#[function_component]
fn CommentSection(props: &CommentSectionProps) -> Html {
    let provider = use_catalog().provider;
    let text = use_state(String::new);
    let error = use_error();
    let banner = use_banner();

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(area.value());
        })
    };
    let onsubmit = {
        let movie_id = props.movie_id.clone();
        let text = text.clone();
        let error = error.clone();
        let banner = banner.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match provider.add_comment(&movie_id, &text) {
                Ok(()) => {
                    text.set(String::new());
                    error.set(None);
                    banner.show("Comment posted");
                },
                Err(e) => error.set(Some(e.to_string().into())),
            }
        })
    };
    let length = text.chars().count();

    html! {
        <section class="comments">
            <h3>{format!("Comments ({})", props.comments.len())}</h3>
            if props.logged_in {
                <form {onsubmit}>
                    <textarea placeholder="Share your thoughts" value={(*text).clone()} {oninput} />
                    <span class={classes!("char-count", (length > MAX_COMMENT_LENGTH).then_some("over-limit"))}>
                        {format!("{length}/{MAX_COMMENT_LENGTH}")}
                    </span>
                    <button type="submit">{"Post"}</button>
                    <ErrorLine error={(*error).clone()} />
                    <Banner handle={banner} />
                </form>
            }
            if props.comments.is_empty() {
                <em>{"No comments yet"}</em>
            }
            {for props.comments.iter().map(|c| html! {
                <div class="comment" key={c.id.clone()}>
                    <b>{c.author.clone()}</b>{" "}<span class="comment-time">{render_millis(c.created_at)}</span>
                    <p>{c.text.clone()}</p>
                </div>
            })}
        </section>
    }
}
