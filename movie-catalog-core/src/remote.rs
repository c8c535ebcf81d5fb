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

//! Client for the catalog REST API.
//!
//! Responses come in a handful of envelope shapes and field namings, so
//! bodies are read as [`serde_json::Value`] and handed to
//! [`movie_catalog_api::normalize`].

use cloneable_errors::{anyhow, ErrorContext, ResContext};
use log::debug;
use movie_catalog_api::envelope::{error_message, page_of, unwrap_list, unwrap_object};
use movie_catalog_api::{
    normalize, ApiEpisodeBody, ApiMovieBody, Collection, Country, Episode, EpisodeDraft, FavoriteBody, Genre, GenreBody,
    LoginBody, Movie, MovieDraft, MovieQuery, Page, RegisterBody, Session, User,
};
use reqwest::{multipart, Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::storage::Storage;

type RemoteResult<T> = Result<T, ErrorContext>;

/// The part of the API the [`crate::DataProvider`] relies on
#[allow(async_fn_in_trait)]  // single-threaded front-end, futures are never sent
pub trait CatalogBackend {
    async fn list_movies(&self, query: &MovieQuery) -> RemoteResult<MovieListing>;
    async fn create_movie(&self, draft: &MovieDraft) -> RemoteResult<Movie>;
    async fn update_movie(&self, id: &str, draft: &MovieDraft) -> RemoteResult<Movie>;
    async fn delete_movie(&self, id: &str) -> RemoteResult<()>;
    async fn list_genres(&self) -> RemoteResult<Vec<Genre>>;
    async fn create_genre(&self, name: &str) -> RemoteResult<Genre>;
    async fn update_genre(&self, id: &str, name: &str) -> RemoteResult<Genre>;
    async fn delete_genre(&self, id: &str) -> RemoteResult<()>;
    async fn list_countries(&self) -> RemoteResult<Vec<Country>>;
    async fn login(&self, identifier: &str, password: &str) -> RemoteResult<Session>;
    async fn register(&self, username: &str, email: &str, password: &str) -> RemoteResult<Session>;
    async fn logout(&self) -> RemoteResult<()>;
    async fn profile(&self) -> RemoteResult<User>;
}

/// A page of movies, along with the genres the server embedded in them
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MovieListing {
    pub page: Page<Movie>,
    pub genres: Vec<Genre>,
}

/// A file picked for upload
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Message for a failed response, taken from the body when it says anything useful
pub fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

trait ReqwestResponseExt: Sized {
    async fn check_status(self) -> RemoteResult<Self>;
}

impl ReqwestResponseExt for reqwest::Response {
    async fn check_status(self) -> RemoteResult<Self> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let body = self.text().await.unwrap_or_default();
        debug!("API request failed with status {status}: {body}");
        Err(anyhow!("{}", failure_message(status.as_u16(), &body)))
    }
}

#[derive(Clone)]
pub struct ApiClient<S: Storage> {
    client: Client,
    base_url: Url,
    storage: S,
}

impl<S: Storage> ApiClient<S> {
    pub fn new(base_url: Url, storage: S) -> ApiClient<S> {
        ApiClient {
            client: Client::new(),
            base_url,
            storage,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `api/<segments...>` onto the base URL, escaping each segment
    pub fn endpoint(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("The API base URL {} cannot have a path", self.base_url))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url).header("Accept", "application/json");
        // read on every call so logins and logouts take effect immediately
        match self.storage.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> RemoteResult<Value> {
        let response = builder
            .send().await.context("Failed to send the request")?
            .check_status().await?;
        let body = response.text().await.context("Failed to read the response")?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).context("Failed to deserialize response")
    }

    async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> RemoteResult<Value> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::GET, url).query(query)).await
    }

    async fn send_json<B: Serialize>(&self, method: Method, segments: &[&str], body: &B) -> RemoteResult<Value> {
        let url = self.endpoint(segments)?;
        self.send(self.request(method, url).json(body)).await
    }

    async fn delete(&self, segments: &[&str]) -> RemoteResult<Value> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::DELETE, url)).await
    }

    async fn upload(&self, kind: &str, file: Upload) -> RemoteResult<String> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .context("Invalid file type")?;
        let form = multipart::Form::new().part("file", part);
        let url = self.endpoint(&["upload", kind])?;
        let value = self.send(self.request(Method::POST, url).multipart(form)).await?;
        normalize::upload_url(&value).context("The server did not return the uploaded file's URL")
    }

    pub async fn get_movie(&self, id_or_slug: &str) -> RemoteResult<Movie> {
        let value = self.get(&["movies", id_or_slug], &[]).await?;
        normalize::movie(unwrap_object(&value)).with_context(|| format!("The server returned an unreadable movie for {id_or_slug}"))
    }

    pub async fn list_episodes(&self, movie: &str) -> RemoteResult<Vec<Episode>> {
        let value = self.get(&["movies", movie, "episodes"], &[]).await?;
        Ok(normalize::episodes(&value))
    }

    pub async fn create_episode(&self, movie: &str, episode: &EpisodeDraft) -> RemoteResult<Episode> {
        let value = self.send_json(Method::POST, &["movies", movie, "episodes"], &ApiEpisodeBody::from(episode)).await?;
        normalize::episode(unwrap_object(&value)).context("The server returned an unreadable episode")
    }

    pub async fn genre_movies(&self, genre: &str, page: u32) -> RemoteResult<Page<Movie>> {
        let value = self.get(&["genres", genre, "movies"], &[("page", page.to_string())]).await?;
        Ok(page_of(&value, normalize::movie))
    }

    pub async fn year_movies(&self, year: u16, page: u32) -> RemoteResult<Page<Movie>> {
        let value = self.get(&["years", year.to_string().as_str()], &[("page", page.to_string())]).await?;
        Ok(page_of(&value, normalize::movie))
    }

    pub async fn search(&self, keyword: &str, page: u32) -> RemoteResult<Page<Movie>> {
        let value = self.get(&["search"], &[("keyword", keyword.to_owned()), ("page", page.to_string())]).await?;
        Ok(page_of(&value, normalize::movie))
    }

    pub async fn list_collections(&self) -> RemoteResult<Vec<Collection>> {
        let value = self.get(&["collections"], &[]).await?;
        Ok(unwrap_list(&value).iter().filter_map(normalize::collection).collect())
    }

    /// Slugs of the movies in the server-side favorites list
    pub async fn favorites(&self) -> RemoteResult<Vec<String>> {
        let value = self.get(&["auth", "favorites"], &[]).await?;
        Ok(normalize::favorite_slugs(&value))
    }

    pub async fn add_favorite(&self, slug: &str) -> RemoteResult<()> {
        self.send_json(Method::POST, &["auth", "favorites"], &FavoriteBody { slug }).await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, slug: &str) -> RemoteResult<()> {
        self.delete(&["auth", "favorites", slug]).await?;
        Ok(())
    }

    pub async fn upload_image(&self, file: Upload) -> RemoteResult<String> {
        self.upload("image", file).await
    }

    pub async fn upload_video(&self, file: Upload) -> RemoteResult<String> {
        self.upload("video", file).await
    }
}

impl<S: Storage> CatalogBackend for ApiClient<S> {
    async fn list_movies(&self, query: &MovieQuery) -> RemoteResult<MovieListing> {
        let value = self.get(&["movies"], &query.pairs()).await?;
        Ok(MovieListing {
            page: page_of(&value, normalize::movie),
            genres: normalize::embedded_genres(unwrap_list(&value)),
        })
    }

    async fn create_movie(&self, draft: &MovieDraft) -> RemoteResult<Movie> {
        let value = self.send_json(Method::POST, &["movies"], &ApiMovieBody::from(draft)).await?;
        normalize::movie(unwrap_object(&value)).context("The server returned an unreadable movie")
    }

    async fn update_movie(&self, id: &str, draft: &MovieDraft) -> RemoteResult<Movie> {
        let value = self.send_json(Method::PUT, &["movies", id], &ApiMovieBody::from(draft)).await?;
        // some deployments answer updates with a bare status message
        Ok(normalize::movie(unwrap_object(&value)).unwrap_or_else(|| {
            let mut movie = Movie { id: id.to_owned(), ..Movie::default() };
            draft.apply_to(&mut movie);
            movie
        }))
    }

    async fn delete_movie(&self, id: &str) -> RemoteResult<()> {
        self.delete(&["movies", id]).await?;
        Ok(())
    }

    async fn list_genres(&self) -> RemoteResult<Vec<Genre>> {
        let value = self.get(&["genres"], &[]).await?;
        Ok(unwrap_list(&value).iter().filter_map(normalize::genre).collect())
    }

    async fn create_genre(&self, name: &str) -> RemoteResult<Genre> {
        let slug = normalize::slugify(name);
        let value = self.send_json(Method::POST, &["genres"], &GenreBody { name, slug: &slug }).await?;
        normalize::genre(unwrap_object(&value)).context("The server returned an unreadable genre")
    }

    async fn update_genre(&self, id: &str, name: &str) -> RemoteResult<Genre> {
        let slug = normalize::slugify(name);
        let value = self.send_json(Method::PUT, &["genres", id], &GenreBody { name, slug: &slug }).await?;
        Ok(normalize::genre(unwrap_object(&value)).unwrap_or_else(|| Genre {
            id: id.to_owned(),
            name: name.to_owned(),
            slug,
        }))
    }

    async fn delete_genre(&self, id: &str) -> RemoteResult<()> {
        self.delete(&["genres", id]).await?;
        Ok(())
    }

    async fn list_countries(&self) -> RemoteResult<Vec<Country>> {
        let value = self.get(&["countries"], &[]).await?;
        Ok(unwrap_list(&value).iter().filter_map(normalize::country).collect())
    }

    async fn login(&self, identifier: &str, password: &str) -> RemoteResult<Session> {
        let value = self.send_json(Method::POST, &["auth", "login"], &LoginBody { login: identifier, password }).await?;
        normalize::session(&value).context("The server did not return a session")
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> RemoteResult<Session> {
        let value = self.send_json(Method::POST, &["auth", "register"], &RegisterBody { username, email, password }).await?;
        normalize::session(&value).context("The server did not return a session")
    }

    async fn logout(&self) -> RemoteResult<()> {
        self.send_json(Method::POST, &["auth", "logout"], &serde_json::json!({})).await?;
        Ok(())
    }

    async fn profile(&self) -> RemoteResult<User> {
        let value = self.get(&["auth", "profile"], &[]).await?;
        normalize::user(unwrap_object(&value)).context("The server returned an unreadable profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TOKEN_KEY};

    fn client(base: &str) -> ApiClient<MemoryStorage> {
        ApiClient::new(Url::parse(base).unwrap(), MemoryStorage::new())
    }

    #[test]
    fn endpoints_join_under_the_base() {
        assert_eq!(client("http://localhost:5000/").endpoint(&["movies"]).unwrap().as_str(), "http://localhost:5000/api/movies");
        assert_eq!(client("http://localhost:5000").endpoint(&["genres", "g1"]).unwrap().as_str(), "http://localhost:5000/api/genres/g1");
        assert_eq!(
            client("https://example.com/catalog/").endpoint(&["auth", "favorites", "a b/c"]).unwrap().as_str(),
            "https://example.com/catalog/api/auth/favorites/a%20b%2Fc",
        );
    }

    #[test]
    fn failure_messages() {
        assert_eq!(failure_message(400, r#"{"message": "Title is required"}"#), "Title is required");
        assert_eq!(failure_message(401, r#"{"error": "Invalid token"}"#), "Invalid token");
        assert_eq!(failure_message(422, r#"{"detail": [{"msg": "field required"}]}"#), "field required");
        assert_eq!(failure_message(502, "<html>Bad Gateway</html>"), "Request failed with status 502");
        assert_eq!(failure_message(500, r#"{"status": "error"}"#), "Request failed with status 500");
    }

    #[test]
    fn token_is_read_at_call_time() {
        let storage = MemoryStorage::new();
        let api = ApiClient::new(Url::parse("http://localhost:5000/").unwrap(), storage.clone());
        let url = api.endpoint(&["auth", "profile"]).unwrap();

        let request = api.request(Method::GET, url.clone()).build().unwrap();
        assert!(request.headers().get("Authorization").is_none());

        storage.set(TOKEN_KEY, "abc.def").unwrap();
        let request = api.request(Method::GET, url).build().unwrap();
        assert_eq!(request.headers().get("Authorization").unwrap(), "Bearer abc.def");
    }
}
