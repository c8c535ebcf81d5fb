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

//! The [`DataProvider`] owns the in-memory catalog and is the only thing that
//! changes it.
//!
//! Actions that involve the server await the request first and only then
//! borrow the store for the synchronous patch, so no borrow of the store is
//! ever held across an `.await`.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use futures::join;
use log::{info, warn};
use movie_catalog_api::{Genre, Movie, MovieDraft, MovieQuery, Role, Session, User};

use crate::config::DataMode;
use crate::credentials::validate_registration;
use crate::errors::{CatalogError, EntityKind, Result};
use crate::remote::CatalogBackend;
use crate::sample::sample_data;
use crate::stats::Stats;
use crate::storage::{Storage, TOKEN_KEY};
use crate::store::{AppData, PersistedStore};

/// How many movies are requested from the server on startup
pub const STARTUP_MOVIE_LIMIT: u32 = 100;

/// Returns the current time as unix milliseconds
pub type Clock = fn() -> i64;

pub fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Token stored for sessions that only exist locally
fn local_token(user_id: &str) -> String {
    format!("local.{user_id}")
}

pub struct DataProvider<S: Storage, B: CatalogBackend> {
    store: RefCell<PersistedStore<S>>,
    storage: S,
    backend: B,
    mode: DataMode,
    clock: Clock,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<S: Storage, B: CatalogBackend> DataProvider<S, B> {
    pub fn new(storage: S, backend: B, mode: DataMode) -> DataProvider<S, B> {
        DataProvider {
            store: RefCell::new(PersistedStore::load(storage.clone())),
            storage,
            backend,
            mode,
            clock: system_clock,
            listener: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Registers the callback invoked after every change to the catalog
    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        *self.listener.borrow_mut() = Some(listener);
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn data(&self) -> Ref<'_, AppData> {
        Ref::map(self.store.borrow(), PersistedStore::data)
    }

    pub fn current_user(&self) -> Option<User> {
        self.data().current_user().cloned()
    }

    pub fn stats(&self) -> Stats {
        self.data().stats()
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.data().is_favorite(movie_id)
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// Applies a patch to the store and tells the listener about it
    fn mutate<T, F>(&self, patch: F) -> Result<T>
    where
        F: FnOnce(&mut AppData) -> Result<T>,
    {
        let result = self.store.borrow_mut().mutate(patch)?;
        self.notify();
        Ok(result)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token).map_err(CatalogError::Storage)
    }

    fn clear_token(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY).map_err(CatalogError::Storage)
    }

    // startup

    /// Fills the store on startup
    ///
    /// In api mode the catalog is fetched from the server and merged in. If the
    /// movie list can't be fetched, the bundled sample data is used instead.
    pub async fn bootstrap(&self) -> Result<()> {
        if self.mode == DataMode::Sample {
            return self.seed_sample();
        }

        let query = MovieQuery::page(1, STARTUP_MOVIE_LIMIT);
        let (movies, genres, countries) = join!(
            self.backend.list_movies(&query),
            self.backend.list_genres(),
            self.backend.list_countries(),
        );
        let listing = match movies {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Failed to fetch movies from the API, falling back to sample data: {e:?}");
                return self.seed_sample();
            },
        };
        let genres = genres.unwrap_or_else(|e| {
            warn!("Failed to fetch genres from the API: {e:?}");
            Vec::new()
        });
        let countries = countries.unwrap_or_else(|e| {
            warn!("Failed to fetch countries from the API: {e:?}");
            Vec::new()
        });

        let now = self.now();
        let added = self.mutate(|data| {
            data.merge_genres(listing.genres);
            data.merge_genres(genres);
            data.merge_countries(countries);
            Ok(data.merge_movies(listing.page.items, now))
        })?;
        info!("Synced catalog with the API, {added} new movies");

        if self.storage.token().is_some() {
            if let Err(e) = self.refresh_profile().await {
                warn!("Failed to refresh the stored session: {e:?}");
            }
        }
        Ok(())
    }

    fn seed_sample(&self) -> Result<()> {
        let sample = sample_data().map_err(CatalogError::Storage)?;
        let seeded = self.mutate(|data| Ok(data.seed_missing(&sample)))?;
        if seeded {
            info!("Loaded the bundled sample catalog");
        }
        Ok(())
    }

    // sessions

    fn start_session(&self, session: Session) -> Result<User> {
        self.set_token(&session.token)?;
        let now = self.now();
        self.mutate(|data| {
            let id = data.upsert_user(session.user, now);
            data.sign_in(&id)?;
            data.require_user().cloned()
        })
    }

    pub async fn login(&self, identifier: &str, password: &str) -> Result<User> {
        let user = match self.mode {
            DataMode::Api => {
                let session = self.backend.login(identifier, password).await?;
                self.start_session(session)?
            },
            DataMode::Sample => {
                let id = self.data().authenticate_local(identifier, password)?.id.clone();
                self.set_token(&local_token(&id))?;
                self.mutate(|data| {
                    data.sign_in(&id)?;
                    data.require_user().cloned()
                })?
            },
        };
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        match self.mode {
            DataMode::Api => {
                validate_registration(username.trim(), email.trim(), password)?;
                let session = self.backend.register(username.trim(), email.trim(), password).await?;
                self.start_session(session)
            },
            DataMode::Sample => {
                let now = self.now();
                let user = self.mutate(|data| {
                    let user = data.register_local(username, email, password, now)?;
                    data.sign_in(&user.id)?;
                    Ok(user)
                })?;
                self.set_token(&local_token(&user.id))?;
                Ok(user)
            },
        }
    }

    /// Ends the session; a failing server logout is logged and the local session is cleared anyway
    pub async fn logout(&self) -> Result<()> {
        if self.mode == DataMode::Api {
            if let Err(e) = self.backend.logout().await {
                warn!("Server-side logout failed: {e:?}");
            }
        }
        self.clear_token()?;
        self.mutate(|data| {
            data.sign_out();
            Ok(())
        })
    }

    /// Re-reads the signed in account from the server
    pub async fn refresh_profile(&self) -> Result<Option<User>> {
        if self.mode == DataMode::Sample || self.storage.token().is_none() {
            return Ok(self.current_user());
        }
        let profile = self.backend.profile().await?;
        let now = self.now();
        self.mutate(|data| {
            let id = data.upsert_user(profile, now);
            data.sign_in(&id)?;
            Ok(data.current_user().cloned())
        })
    }

    /// Merges a movie fetched on demand into the store
    pub fn remember_movie(&self, movie: Movie) -> Result<()> {
        let now = self.now();
        self.mutate(|data| {
            data.merge_movies(vec![movie], now);
            Ok(())
        })
    }

    // user actions

    pub fn toggle_favorite(&self, movie_id: &str) -> Result<bool> {
        self.mutate(|data| data.toggle_favorite(movie_id))
    }

    pub fn rate_movie(&self, movie_id: &str, score: u8) -> Result<f64> {
        let now = self.now();
        self.mutate(|data| data.rate_movie(movie_id, score, now))
    }

    pub fn add_comment(&self, movie_id: &str, text: &str) -> Result<()> {
        let now = self.now();
        self.mutate(|data| data.add_comment(movie_id, text, now).map(|_| ()))
    }

    pub fn record_view(&self, movie_id: &str) -> Result<u64> {
        let now = self.now();
        self.mutate(|data| data.record_view(movie_id, now))
    }

    // admin: movies and genres go through the server in api mode

    pub async fn add_movie(&self, draft: &MovieDraft) -> Result<Movie> {
        let now = self.now();
        match self.mode {
            DataMode::Api => {
                self.data().require_admin()?;
                AppData::validate_draft(draft)?;
                let movie = self.backend.create_movie(draft).await?;
                self.mutate(|data| data.insert_movie(movie, now))
            },
            DataMode::Sample => self.mutate(|data| data.add_movie(draft, now)),
        }
    }

    pub async fn update_movie(&self, id: &str, draft: &MovieDraft) -> Result<Movie> {
        if self.mode == DataMode::Api {
            {
                let data = self.data();
                data.require_admin()?;
                if data.movie(id).is_none() {
                    return Err(CatalogError::not_found(EntityKind::Movie, id));
                }
            }
            AppData::validate_draft(draft)?;
            self.backend.update_movie(id, draft).await?;
        }
        self.mutate(|data| data.update_movie(id, draft))
    }

    pub async fn delete_movie(&self, id: &str) -> Result<Movie> {
        if self.mode == DataMode::Api {
            self.data().require_admin()?;
            self.backend.delete_movie(id).await?;
        }
        self.mutate(|data| data.delete_movie(id))
    }

    pub async fn add_genre(&self, name: &str) -> Result<Genre> {
        let now = self.now();
        match self.mode {
            DataMode::Api => {
                let name = {
                    let data = self.data();
                    data.require_admin()?;
                    data.check_genre_name(name, None)?
                };
                let genre = self.backend.create_genre(&name).await?;
                self.mutate(|data| data.insert_genre(genre))
            },
            DataMode::Sample => self.mutate(|data| data.add_genre(name, now)),
        }
    }

    pub async fn update_genre(&self, id: &str, name: &str) -> Result<Genre> {
        if self.mode == DataMode::Api {
            let name = {
                let data = self.data();
                data.require_admin()?;
                data.check_genre_name(name, Some(id))?
            };
            self.backend.update_genre(id, &name).await?;
        }
        self.mutate(|data| data.update_genre(id, name))
    }

    pub async fn delete_genre(&self, id: &str) -> Result<Genre> {
        if self.mode == DataMode::Api {
            self.data().require_admin()?;
            self.backend.delete_genre(id).await?;
        }
        self.mutate(|data| data.delete_genre(id))
    }

    // admin: local only

    pub fn add_actor(&self, name: &str, country: &str) -> Result<()> {
        let now = self.now();
        self.mutate(|data| data.add_actor(name, country, now).map(|_| ()))
    }

    pub fn update_actor(&self, id: &str, name: &str, country: &str) -> Result<()> {
        self.mutate(|data| data.update_actor(id, name, country).map(|_| ()))
    }

    pub fn delete_actor(&self, id: &str) -> Result<()> {
        self.mutate(|data| data.delete_actor(id).map(|_| ()))
    }

    pub fn set_user_role(&self, user_id: &str, role: Role) -> Result<()> {
        self.mutate(|data| data.set_user_role(user_id, role).map(|_| ()))
    }

    pub fn delete_user(&self, user_id: &str) -> Result<()> {
        self.mutate(|data| data.delete_user(user_id).map(|_| ()))
    }

    pub fn toggle_comment_hidden(&self, movie_id: &str, comment_id: &str) -> Result<bool> {
        self.mutate(|data| data.toggle_comment_hidden(movie_id, comment_id))
    }

    pub fn delete_comment(&self, movie_id: &str, comment_id: &str) -> Result<()> {
        self.mutate(|data| data.delete_comment(movie_id, comment_id).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use cloneable_errors::{anyhow, ErrorContext};
    use futures::executor::block_on;
    use movie_catalog_api::normalize::slugify;
    use movie_catalog_api::{Country, Page};

    use super::*;
    use crate::remote::MovieListing;
    use crate::storage::MemoryStorage;

    type RemoteResult<T> = std::result::Result<T, ErrorContext>;

    const T0: i64 = 1_700_000_000_000;

    fn clock() -> i64 {
        T0
    }

    #[derive(Default)]
    struct FakeBackend {
        offline: Cell<bool>,
        movies: Vec<Movie>,
        genres: Vec<Genre>,
        session: Option<Session>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeBackend {
        fn call(&self, name: &'static str) -> RemoteResult<()> {
            self.calls.borrow_mut().push(name);
            if self.offline.get() {
                Err(anyhow!("Failed to send the request"))
            } else {
                Ok(())
            }
        }

        fn session(&self) -> RemoteResult<Session> {
            self.session.clone().ok_or_else(|| anyhow!("Invalid username or password"))
        }
    }

    impl CatalogBackend for FakeBackend {
        async fn list_movies(&self, _query: &MovieQuery) -> RemoteResult<MovieListing> {
            self.call("list_movies")?;
            Ok(MovieListing {
                page: Page { items: self.movies.clone(), pagination: None },
                genres: Vec::new(),
            })
        }

        async fn create_movie(&self, draft: &MovieDraft) -> RemoteResult<Movie> {
            self.call("create_movie")?;
            let mut movie = Movie { id: "srv-movie".into(), ..Movie::default() };
            draft.apply_to(&mut movie);
            movie.slug = slugify(&movie.title);
            Ok(movie)
        }

        async fn update_movie(&self, id: &str, draft: &MovieDraft) -> RemoteResult<Movie> {
            self.call("update_movie")?;
            let mut movie = Movie { id: id.to_owned(), ..Movie::default() };
            draft.apply_to(&mut movie);
            Ok(movie)
        }

        async fn delete_movie(&self, _id: &str) -> RemoteResult<()> {
            self.call("delete_movie")
        }

        async fn list_genres(&self) -> RemoteResult<Vec<Genre>> {
            self.call("list_genres")?;
            Ok(self.genres.clone())
        }

        async fn create_genre(&self, name: &str) -> RemoteResult<Genre> {
            self.call("create_genre")?;
            Ok(Genre { id: "srv-genre".into(), name: name.to_owned(), slug: slugify(name) })
        }

        async fn update_genre(&self, id: &str, name: &str) -> RemoteResult<Genre> {
            self.call("update_genre")?;
            Ok(Genre { id: id.to_owned(), name: name.to_owned(), slug: slugify(name) })
        }

        async fn delete_genre(&self, _id: &str) -> RemoteResult<()> {
            self.call("delete_genre")
        }

        async fn list_countries(&self) -> RemoteResult<Vec<Country>> {
            self.call("list_countries")?;
            Ok(vec![Country { id: "c1".into(), name: "Japan".into(), slug: "japan".into() }])
        }

        async fn login(&self, _identifier: &str, _password: &str) -> RemoteResult<Session> {
            self.call("login")?;
            self.session()
        }

        async fn register(&self, _username: &str, _email: &str, _password: &str) -> RemoteResult<Session> {
            self.call("register")?;
            self.session()
        }

        async fn logout(&self) -> RemoteResult<()> {
            self.call("logout")
        }

        async fn profile(&self) -> RemoteResult<User> {
            self.call("profile")?;
            self.session().map(|s| s.user)
        }
    }

    fn remote_movie(id: &str, title: &str) -> Movie {
        Movie { id: id.into(), slug: slugify(title), title: title.into(), genres: vec!["g-action".into()], ..Movie::default() }
    }

    fn session(role: Role) -> Session {
        Session {
            token: "tok-1".into(),
            user: User {
                id: "srv-7".into(),
                username: "trinity".into(),
                email: "trinity@zion.io".into(),
                role,
                ..User::default()
            },
        }
    }

    fn api_backend(role: Role) -> FakeBackend {
        FakeBackend {
            movies: vec![remote_movie("m1", "The One"), remote_movie("m2", "Zion")],
            genres: vec![Genre { id: "g-action".into(), name: "Action".into(), slug: "action".into() }],
            session: Some(session(role)),
            ..FakeBackend::default()
        }
    }

    fn provider(storage: &MemoryStorage, backend: FakeBackend, mode: DataMode) -> DataProvider<MemoryStorage, FakeBackend> {
        DataProvider::new(storage.clone(), backend, mode).with_clock(clock)
    }

    #[test]
    fn login_stores_token_and_views_go_to_history() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        assert_eq!(provider.data().movies.len(), 2);

        let user = block_on(provider.login("trinity", "secret")).unwrap();
        assert_eq!(storage.token().as_deref(), Some("tok-1"));
        assert_eq!(provider.current_user().unwrap().id, user.id);

        assert_eq!(provider.record_view("m1").unwrap(), 1);
        assert_eq!(provider.record_view("zion").unwrap(), 1);
        assert_eq!(provider.record_view("m1").unwrap(), 2);
        let history = provider.current_user().unwrap().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].movie_id, "m1");
        assert_eq!(history[0].viewed_at, T0);
    }

    #[test]
    fn sample_mode_checks_local_credentials() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, FakeBackend::default(), DataMode::Sample);
        block_on(provider.bootstrap()).unwrap();
        assert!(!provider.data().movies.is_empty());

        let err = block_on(provider.login("admin", "hunter2")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));
        assert!(storage.token().is_none());

        let admin = block_on(provider.login("admin", "admin123")).unwrap();
        assert!(admin.is_admin());
        assert_eq!(storage.token(), Some(format!("local.{}", admin.id)));
        assert!(provider.backend().calls.borrow().is_empty());
    }

    #[test]
    fn sample_mode_registration() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, FakeBackend::default(), DataMode::Sample);
        let user = block_on(provider.register("morpheus", "morpheus@zion.io", "redpill")).unwrap();
        assert_eq!(provider.current_user().unwrap().id, user.id);
        assert!(storage.token().is_some());
    }

    #[test]
    fn startup_failure_falls_back_to_sample_data() {
        let storage = MemoryStorage::new();
        let backend = api_backend(Role::User);
        backend.offline.set(true);
        let provider = provider(&storage, backend, DataMode::Api);
        block_on(provider.bootstrap()).unwrap();

        let sample = sample_data().unwrap();
        assert_eq!(provider.data().movies, sample.movies);
        assert_eq!(provider.data().users.len(), sample.users.len());
    }

    #[test]
    fn bootstrap_merges_into_stored_data() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        provider.record_view("m1").unwrap();

        // a second startup keeps local view counts
        let provider = self::provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        let data = provider.data();
        assert_eq!(data.movies.len(), 2);
        assert_eq!(data.movie("m1").unwrap().views, 1);
        assert_eq!(data.genre("g-action").unwrap().name, "Action");
        assert_eq!(data.countries.len(), 1);
    }

    #[test]
    fn movies_fetched_later_are_remembered() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();

        provider.remember_movie(remote_movie("m3", "Revolutions")).unwrap();
        assert_eq!(provider.data().movie("revolutions").unwrap().created_at, T0);
        provider.remember_movie(remote_movie("m3", "Revolutions")).unwrap();
        assert_eq!(provider.data().movies.len(), 3);
    }

    #[test]
    fn admin_checks_happen_before_remote_calls() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.login("trinity", "secret")).unwrap();
        provider.backend().calls.borrow_mut().clear();

        let draft = MovieDraft { title: "Reloaded".into(), ..MovieDraft::default() };
        assert!(matches!(block_on(provider.add_movie(&draft)), Err(CatalogError::Forbidden)));
        assert!(matches!(block_on(provider.add_genre("Drama")), Err(CatalogError::Forbidden)));
        assert!(provider.backend().calls.borrow().is_empty());
    }

    #[test]
    fn admin_actions_call_the_server_first() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::Admin), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        block_on(provider.login("trinity", "secret")).unwrap();

        let draft = MovieDraft { title: "Reloaded".into(), year: Some(2003), ..MovieDraft::default() };
        let movie = block_on(provider.add_movie(&draft)).unwrap();
        assert_eq!(movie.id, "srv-movie");
        assert!(provider.data().movie("reloaded").is_some());

        let genre = block_on(provider.add_genre("  Drama ")).unwrap();
        assert_eq!(genre.name, "Drama");
        assert!(matches!(block_on(provider.add_genre("drama")), Err(CatalogError::Duplicate { .. })));

        block_on(provider.delete_genre("g-action")).unwrap();
        assert!(provider.data().movie("m1").unwrap().genres.is_empty());

        let calls = provider.backend().calls.borrow();
        assert!(calls.contains(&"create_movie"));
        assert_eq!(calls.iter().filter(|c| **c == "create_genre").count(), 1);
        assert!(calls.contains(&"delete_genre"));
    }

    #[test]
    fn remote_errors_leave_local_state_alone() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::Admin), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        block_on(provider.login("trinity", "secret")).unwrap();
        provider.backend().offline.set(true);

        let before = provider.data().clone();
        assert!(matches!(block_on(provider.add_genre("Drama")), Err(CatalogError::Remote(_))));
        assert!(matches!(block_on(provider.delete_movie("m1")), Err(CatalogError::Remote(_))));
        assert_eq!(*provider.data(), before);
    }

    #[test]
    fn logout_clears_the_session_when_the_server_fails() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, api_backend(Role::User), DataMode::Api);
        block_on(provider.login("trinity", "secret")).unwrap();
        provider.backend().offline.set(true);

        block_on(provider.logout()).unwrap();
        assert!(storage.token().is_none());
        assert!(provider.current_user().is_none());
    }

    #[test]
    fn stored_token_refreshes_the_profile_on_startup() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        let provider = provider(&storage, api_backend(Role::Admin), DataMode::Api);
        block_on(provider.bootstrap()).unwrap();
        assert_eq!(provider.current_user().unwrap().username, "trinity");
        assert!(provider.backend().calls.borrow().contains(&"profile"));
    }

    #[test]
    fn listener_is_notified_of_changes() {
        let storage = MemoryStorage::new();
        let provider = provider(&storage, FakeBackend::default(), DataMode::Sample);
        block_on(provider.bootstrap()).unwrap();

        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        provider.set_listener(Rc::new(move || counter.set(counter.get() + 1)));

        provider.record_view("the-matrix").unwrap();
        assert_eq!(hits.get(), 1);
        // failed actions don't notify
        assert!(provider.rate_movie("the-matrix", 5).is_err());
        assert_eq!(hits.get(), 1);
    }
}
