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

//! Every change that can be made to an [`AppData`] blob.
//!
//! These are plain synchronous patches. Timestamps are passed in as unix
//! milliseconds so the caller decides what "now" is.

use movie_catalog_api::normalize::slugify;
use movie_catalog_api::{Actor, Comment, Country, Genre, HistoryEntry, Movie, MovieDraft, Rating, Role, User};

use crate::credentials::{hash_password, validate_registration};
use crate::errors::{CatalogError, EntityKind, Result, SelfProtection, ThrottledAction};
use crate::store::AppData;
use crate::throttle;

pub const HISTORY_LIMIT: usize = 50;
pub const COMMENT_LIMIT: usize = 100;
pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;
pub const YEAR_RANGE: std::ops::RangeInclusive<u16> = 1888..=2100;

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(char::from(DIGITS[(n % 36) as usize]));
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Id prefix of accounts created without the server
const LOCAL_USER_PREFIX: &str = "user";

fn is_local_account(user: &User) -> bool {
    user.id.strip_prefix(LOCAL_USER_PREFIX).is_some_and(|rest| rest.starts_with('-'))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn clean_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation("Name cannot be empty"));
    }
    Ok(name.to_owned())
}

/// Genres and countries: records known by an id, a slug and a display name
trait Taxon {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
    fn name(&self) -> &str;

    /// Whether `reference` (an id or slug stored on a movie) points at this record
    fn is_referenced_by(&self, reference: &str) -> bool {
        self.id() == reference || (!self.slug().is_empty() && self.slug() == reference) || slugify(self.name()) == reference
    }

    fn same_as(&self, other: &impl Taxon) -> bool {
        self.id() == other.id()
            || (!other.slug().is_empty() && self.slug() == other.slug())
            || (!other.name().trim().is_empty() && same_name(self.name(), other.name()))
    }
}

impl Taxon for Genre {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Taxon for Country {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Puts `incoming` in place of every record it matches, returns the ids and slugs that went away
fn merge_taxon<T: Taxon>(records: &mut Vec<T>, incoming: T) -> Vec<String> {
    let pos = records.iter().position(|r| r.same_as(&incoming));
    let mut replaced = Vec::new();
    records.retain(|r| {
        let hit = r.same_as(&incoming);
        if hit {
            replaced.extend([r.id().to_owned(), r.slug().to_owned()]);
        }
        !hit
    });
    replaced.retain(|old| !old.is_empty() && old != incoming.id());
    records.insert(pos.unwrap_or(records.len()), incoming);
    replaced
}

/// Replaces every reference in `old` with `new`, dropping repeats
fn repoint(references: &mut Vec<String>, old: &[String], new: &str) {
    let mut seen = Vec::with_capacity(references.len());
    for reference in references.drain(..) {
        let reference = if old.contains(&reference) { new.to_owned() } else { reference };
        if !seen.contains(&reference) {
            seen.push(reference);
        }
    }
    *references = seen;
}

/// Rejects `name` if any record other than `exclude_id` already uses it, ignoring case
fn ensure_unique<'a, I>(kind: EntityKind, name: &str, exclude_id: Option<&str>, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let taken = records
        .into_iter()
        .any(|(id, other)| Some(id) != exclude_id && same_name(other, name));
    if taken {
        Err(CatalogError::Duplicate { kind, name: name.to_owned() })
    } else {
        Ok(())
    }
}

fn average(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|r| f64::from(r.score)).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg = sum / ratings.len() as f64;
    (avg * 10.0).round() / 10.0
}

impl AppData {
    /// Generates a new record id of the form `<prefix>-<base36 millis>-<counter>`
    pub fn generate_id(&mut self, prefix: &str, now: i64) -> String {
        self.id_counter += 1;
        format!("{prefix}-{}-{}", base36(u64::try_from(now).unwrap_or(0)), self.id_counter)
    }

    // lookups

    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user_id.as_deref()?;
        self.user(id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn movie(&self, id_or_slug: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.is(id_or_slug))
    }

    fn movie_mut(&mut self, id_or_slug: &str) -> Result<&mut Movie> {
        self.movies
            .iter_mut()
            .find(|m| m.is(id_or_slug))
            .ok_or_else(|| CatalogError::not_found(EntityKind::Movie, id_or_slug))
    }

    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id || g.slug == id)
    }

    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Display names of a movie's genres, falling back to the raw id for unknown ones
    pub fn genre_names<'a>(&'a self, movie: &'a Movie) -> Vec<&'a str> {
        movie.genres
            .iter()
            .map(|id| self.genre(id).map_or(id.as_str(), |g| g.name.as_str()))
            .collect()
    }

    /// Display names of a movie's cast, falling back to the raw entry for unknown actors
    pub fn cast_names<'a>(&'a self, movie: &'a Movie) -> Vec<&'a str> {
        movie.cast
            .iter()
            .map(|id| self.actor(id).map_or(id.as_str(), |a| a.name.as_str()))
            .collect()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.current_user().ok_or(CatalogError::Unauthenticated)
    }

    pub fn require_admin(&self) -> Result<&User> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(CatalogError::Forbidden)
        }
    }

    fn require_user_id(&self) -> Result<String> {
        self.require_user().map(|u| u.id.clone())
    }

    fn require_admin_id(&self) -> Result<String> {
        self.require_admin().map(|u| u.id.clone())
    }

    // sessions

    /// Merges an account record received from the server into the local cache
    ///
    /// Matches by id. An account created offline has no server id yet, so it
    /// is also matched by email or username. Local favorites, history and
    /// cached password hash are kept. Returns the id of the local record.
    pub fn upsert_user(&mut self, incoming: User, now: i64) -> String {
        let pos = self.users.iter().position(|u| u.id == incoming.id).or_else(|| {
            self.users.iter().position(|u| {
                is_local_account(u)
                    && ((!incoming.email.is_empty() && same_name(&u.email, &incoming.email))
                        || (!incoming.username.is_empty() && same_name(&u.username, &incoming.username)))
            })
        });
        match pos.map(|pos| &mut self.users[pos]) {
            Some(user) => {
                if !incoming.username.is_empty() {
                    user.username = incoming.username;
                }
                if !incoming.email.is_empty() {
                    user.email = incoming.email;
                }
                if incoming.password_hash.is_some() {
                    user.password_hash = incoming.password_hash;
                }
                if incoming.avatar.is_some() {
                    user.avatar = incoming.avatar;
                }
                user.role = incoming.role;
                user.id.clone()
            },
            None => {
                let mut user = incoming;
                if user.created_at == 0 {
                    user.created_at = now;
                }
                let id = user.id.clone();
                self.users.push(user);
                id
            },
        }
    }

    pub fn sign_in(&mut self, user_id: &str) -> Result<()> {
        if self.user(user_id).is_none() {
            return Err(CatalogError::not_found(EntityKind::User, user_id));
        }
        self.current_user_id = Some(user_id.to_owned());
        Ok(())
    }

    pub fn sign_out(&mut self) {
        self.current_user_id = None;
    }

    /// Creates a local account, used when running without the API
    pub fn register_local(&mut self, username: &str, email: &str, password: &str, now: i64) -> Result<User> {
        let username = username.trim();
        let email = email.trim();
        validate_registration(username, email, password)?;
        if let Some(taken) = self.users.iter().find(|u| same_name(&u.username, username) || same_name(&u.email, email)) {
            let name = if same_name(&taken.username, username) { username } else { email };
            return Err(CatalogError::Duplicate { kind: EntityKind::User, name: name.to_owned() });
        }
        let user = User {
            id: self.generate_id(LOCAL_USER_PREFIX, now),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: Some(hash_password(password)),
            role: Role::User,
            created_at: now,
            ..User::default()
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Checks a username/email and password against the locally cached accounts
    pub fn authenticate_local(&self, identifier: &str, password: &str) -> Result<&User> {
        let identifier = identifier.trim();
        let hash = hash_password(password);
        self.users
            .iter()
            .find(|u| same_name(&u.username, identifier) || (!u.email.is_empty() && same_name(&u.email, identifier)))
            .filter(|u| u.password_hash.as_deref() == Some(hash.as_str()))
            .ok_or(CatalogError::InvalidCredentials)
    }

    // actions of the signed in user

    /// Adds or removes a movie from the current user's favorites, returns whether it's now a favorite
    pub fn toggle_favorite(&mut self, movie_id: &str) -> Result<bool> {
        let user_id = self.require_user_id()?;
        let movie_id = self.movie_mut(movie_id)?.id.clone();
        let user = self.users.iter_mut().find(|u| u.id == user_id).ok_or(CatalogError::Unauthenticated)?;
        if let Some(pos) = user.favorites.iter().position(|f| *f == movie_id) {
            user.favorites.remove(pos);
            Ok(false)
        } else {
            user.favorites.insert(0, movie_id);
            Ok(true)
        }
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        let Some(user) = self.current_user() else {
            return false;
        };
        self.movie(movie_id).is_some_and(|m| user.favorites.contains(&m.id))
    }

    /// Stores the current user's score for a movie, returns the new average
    pub fn rate_movie(&mut self, movie_id: &str, score: u8, now: i64) -> Result<f64> {
        let user_id = self.require_user_id()?;
        if !SCORE_RANGE.contains(&score) {
            return Err(CatalogError::Validation("Ratings must be between 1 and 10"));
        }
        throttle::check(&self.last_rating_at, &user_id, ThrottledAction::Rating, now)?;
        let movie = self.movie_mut(movie_id)?;
        match movie.ratings.iter_mut().find(|r| r.user_id == user_id) {
            Some(rating) => {
                rating.score = score;
                rating.rated_at = now;
            },
            None => movie.ratings.push(Rating { user_id: user_id.clone(), score, rated_at: now }),
        }
        movie.rating = average(&movie.ratings);
        let rating = movie.rating;
        self.last_rating_at.insert(user_id, now);
        Ok(rating)
    }

    pub fn user_rating(&self, movie_id: &str) -> Option<u8> {
        let user = self.current_user()?;
        self.movie(movie_id)?
            .ratings
            .iter()
            .find(|r| r.user_id == user.id)
            .map(|r| r.score)
    }

    pub fn add_comment(&mut self, movie_id: &str, text: &str, now: i64) -> Result<Comment> {
        let user = self.require_user()?;
        let (user_id, author) = (user.id.clone(), user.username.clone());
        let text = text.trim();
        if text.is_empty() {
            return Err(CatalogError::Validation("Comments cannot be empty"));
        }
        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(CatalogError::Validation("Comments cannot be longer than 1000 characters"));
        }
        throttle::check(&self.last_comment_at, &user_id, ThrottledAction::Comment, now)?;
        self.movie_mut(movie_id)?;
        let comment = Comment {
            id: self.generate_id("comment", now),
            user_id: user_id.clone(),
            author,
            text: text.to_owned(),
            created_at: now,
            hidden: false,
        };
        let movie = self.movie_mut(movie_id)?;
        movie.comments.insert(0, comment.clone());
        movie.comments.truncate(COMMENT_LIMIT);
        self.last_comment_at.insert(user_id, now);
        Ok(comment)
    }

    /// Counts a view of a movie and, if someone is signed in, puts it at the top of their history
    ///
    /// Returns the new view count.
    pub fn record_view(&mut self, movie_id: &str, now: i64) -> Result<u64> {
        let movie = self.movie_mut(movie_id)?;
        movie.views += 1;
        let (movie_id, views) = (movie.id.clone(), movie.views);
        let Some(user_id) = self.current_user_id.clone() else {
            return Ok(views);
        };
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.history.retain(|h| h.movie_id != movie_id);
            user.history.insert(0, HistoryEntry { movie_id, viewed_at: now });
            user.history.truncate(HISTORY_LIMIT);
        }
        Ok(views)
    }

    // admin: movies

    pub fn validate_draft(draft: &MovieDraft) -> Result<()> {
        if draft.title.trim().is_empty() {
            return Err(CatalogError::Validation("Movies need a title"));
        }
        if draft.year.is_some_and(|y| !YEAR_RANGE.contains(&y)) {
            return Err(CatalogError::Validation("Release year must be between 1888 and 2100"));
        }
        if draft.duration == Some(0) {
            return Err(CatalogError::Validation("Duration must be a positive number of minutes"));
        }
        Ok(())
    }

    pub fn add_movie(&mut self, draft: &MovieDraft, now: i64) -> Result<Movie> {
        self.require_admin()?;
        Self::validate_draft(draft)?;
        let mut movie = Movie {
            id: self.generate_id("movie", now),
            created_at: now,
            ..Movie::default()
        };
        draft.apply_to(&mut movie);
        if movie.slug.is_empty() {
            movie.slug = slugify(&movie.title);
        }
        if self.movies.iter().any(|m| m.slug == movie.slug) {
            movie.slug = format!("{}-{}", movie.slug, self.id_counter);
        }
        self.movies.insert(0, movie.clone());
        Ok(movie)
    }

    /// Stores a movie that was created on the server
    pub fn insert_movie(&mut self, movie: Movie, now: i64) -> Result<Movie> {
        self.require_admin()?;
        self.merge_movies(vec![movie.clone()], now);
        Ok(self.movie(&movie.id).cloned().unwrap_or(movie))
    }

    pub fn update_movie(&mut self, id: &str, draft: &MovieDraft) -> Result<Movie> {
        self.require_admin()?;
        Self::validate_draft(draft)?;
        let movie = self.movie_mut(id)?;
        draft.apply_to(movie);
        Ok(movie.clone())
    }

    /// Removes a movie along with every user's favorite and history entries for it
    pub fn delete_movie(&mut self, id: &str) -> Result<Movie> {
        self.require_admin()?;
        let pos = self
            .movies
            .iter()
            .position(|m| m.is(id))
            .ok_or_else(|| CatalogError::not_found(EntityKind::Movie, id))?;
        let movie = self.movies.remove(pos);
        for user in &mut self.users {
            user.favorites.retain(|f| *f != movie.id);
            user.history.retain(|h| h.movie_id != movie.id);
        }
        Ok(movie)
    }

    // admin: genres

    /// Trims a genre name and checks that no genre other than `exclude_id` uses it
    pub fn check_genre_name(&self, name: &str, exclude_id: Option<&str>) -> Result<String> {
        let name = clean_name(name)?;
        ensure_unique(EntityKind::Genre, &name, exclude_id, self.genres.iter().map(|g| (g.id.as_str(), g.name.as_str())))?;
        Ok(name)
    }

    pub fn add_genre(&mut self, name: &str, now: i64) -> Result<Genre> {
        self.require_admin()?;
        let name = self.check_genre_name(name, None)?;
        let genre = Genre {
            id: self.generate_id("genre", now),
            slug: slugify(&name),
            name,
        };
        self.genres.push(genre.clone());
        Ok(genre)
    }

    /// Stores a genre that was created on the server
    pub fn insert_genre(&mut self, genre: Genre) -> Result<Genre> {
        self.require_admin()?;
        self.check_genre_name(&genre.name, Some(genre.id.as_str()))?;
        self.merge_genres(vec![genre.clone()]);
        Ok(genre)
    }

    pub fn update_genre(&mut self, id: &str, name: &str) -> Result<Genre> {
        self.require_admin()?;
        let name = self.check_genre_name(name, Some(id))?;
        let genre = self
            .genres
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Genre, id))?;
        let old_slug = std::mem::replace(&mut genre.slug, slugify(&name));
        genre.name = name;
        let genre = genre.clone();
        if old_slug != genre.slug {
            for movie in &mut self.movies {
                repoint(&mut movie.genres, std::slice::from_ref(&old_slug), &genre.id);
            }
        }
        Ok(genre)
    }

    /// Removes a genre and strips it from every movie, whether referenced by id or slug
    pub fn delete_genre(&mut self, id: &str) -> Result<Genre> {
        self.require_admin()?;
        let pos = self
            .genres
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Genre, id))?;
        let genre = self.genres.remove(pos);
        for movie in &mut self.movies {
            movie.genres.retain(|g| !genre.is_referenced_by(g));
        }
        Ok(genre)
    }

    // admin: actors

    pub fn add_actor(&mut self, name: &str, country: &str, now: i64) -> Result<Actor> {
        self.require_admin()?;
        let name = clean_name(name)?;
        ensure_unique(EntityKind::Actor, &name, None, self.actors.iter().map(|a| (a.id.as_str(), a.name.as_str())))?;
        let actor = Actor {
            id: self.generate_id("actor", now),
            name,
            country: country.trim().to_owned(),
        };
        self.actors.push(actor.clone());
        Ok(actor)
    }

    pub fn update_actor(&mut self, id: &str, name: &str, country: &str) -> Result<Actor> {
        self.require_admin()?;
        let name = clean_name(name)?;
        ensure_unique(EntityKind::Actor, &name, Some(id), self.actors.iter().map(|a| (a.id.as_str(), a.name.as_str())))?;
        let actor = self
            .actors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Actor, id))?;
        actor.name = name;
        actor.country = country.trim().to_owned();
        Ok(actor.clone())
    }

    /// Removes an actor and strips them from every movie's cast
    pub fn delete_actor(&mut self, id: &str) -> Result<Actor> {
        self.require_admin()?;
        let pos = self
            .actors
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Actor, id))?;
        let actor = self.actors.remove(pos);
        for movie in &mut self.movies {
            movie.cast.retain(|c| *c != actor.id);
        }
        Ok(actor)
    }

    // admin: users

    pub fn set_user_role(&mut self, user_id: &str, role: Role) -> Result<User> {
        let admin_id = self.require_admin_id()?;
        if user_id == admin_id && role != Role::Admin {
            return Err(CatalogError::SelfProtection(SelfProtection::Demote));
        }
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::User, user_id))?;
        user.role = role;
        Ok(user.clone())
    }

    /// Removes an account; their comments and ratings stay on the movies
    pub fn delete_user(&mut self, user_id: &str) -> Result<User> {
        let admin_id = self.require_admin_id()?;
        if user_id == admin_id {
            return Err(CatalogError::SelfProtection(SelfProtection::Delete));
        }
        let pos = self
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::User, user_id))?;
        let user = self.users.remove(pos);
        self.last_comment_at.remove(&user.id);
        self.last_rating_at.remove(&user.id);
        Ok(user)
    }

    // admin: comments

    /// Hides or unhides a comment, returns whether it's now hidden
    pub fn toggle_comment_hidden(&mut self, movie_id: &str, comment_id: &str) -> Result<bool> {
        self.require_admin()?;
        let comment = self
            .movie_mut(movie_id)?
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Comment, comment_id))?;
        comment.hidden = !comment.hidden;
        Ok(comment.hidden)
    }

    pub fn delete_comment(&mut self, movie_id: &str, comment_id: &str) -> Result<Comment> {
        self.require_admin()?;
        let comments = &mut self.movie_mut(movie_id)?.comments;
        let pos = comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Comment, comment_id))?;
        Ok(comments.remove(pos))
    }

    // merging remote data

    /// Merges movies fetched from the server into the local list
    ///
    /// Known movies get their descriptive fields refreshed while keeping local
    /// ratings, comments and the higher of the two view counts. Returns the
    /// number of movies that were not known before.
    pub fn merge_movies(&mut self, remote: Vec<Movie>, now: i64) -> usize {
        let mut added = 0;
        for mut incoming in remote {
            let genres = std::mem::take(&mut incoming.genres);
            incoming.genres = self.known_genre_ids(genres);
            let existing = self
                .movies
                .iter_mut()
                .find(|m| m.id == incoming.id || (!incoming.slug.is_empty() && m.slug == incoming.slug));
            match existing {
                Some(movie) => {
                    MovieDraft::from(&incoming).apply_to(movie);
                    movie.views = movie.views.max(incoming.views);
                    if movie.ratings.is_empty() {
                        movie.rating = incoming.rating;
                    }
                },
                None => {
                    let mut movie = incoming;
                    if movie.created_at == 0 {
                        movie.created_at = now;
                    }
                    self.movies.push(movie);
                    added += 1;
                },
            }
        }
        added
    }

    /// Maps genre references onto the ids of known genres, leaving unknown ones as they are
    fn known_genre_ids(&self, references: Vec<String>) -> Vec<String> {
        let mut ids = Vec::with_capacity(references.len());
        for reference in references {
            let id = self
                .genres
                .iter()
                .find(|g| g.is_referenced_by(&reference))
                .map_or(reference, |g| g.id.clone());
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Merges genres fetched from the server
    ///
    /// An incoming genre replaces every local one with the same id, slug or
    /// name (ignoring case), and movies pointing at a replaced record are
    /// pointed at the incoming id.
    pub fn merge_genres(&mut self, remote: Vec<Genre>) {
        for incoming in remote {
            let id = incoming.id.clone();
            let replaced = merge_taxon(&mut self.genres, incoming);
            if !replaced.is_empty() {
                for movie in &mut self.movies {
                    repoint(&mut movie.genres, &replaced, &id);
                }
            }
        }
    }

    /// Merges countries fetched from the server, matched like genres
    pub fn merge_countries(&mut self, remote: Vec<Country>) {
        for incoming in remote {
            merge_taxon(&mut self.countries, incoming);
        }
    }

    /// Fills in the catalog and account lists from `sample` where they are empty
    ///
    /// Returns whether anything was added.
    pub fn seed_missing(&mut self, sample: &AppData) -> bool {
        let mut changed = false;
        if self.movies.is_empty() {
            self.movies.clone_from(&sample.movies);
            self.genres.clone_from(&sample.genres);
            self.actors.clone_from(&sample.actors);
            self.countries.clone_from(&sample.countries);
            changed = true;
        }
        if self.users.is_empty() {
            self.users.clone_from(&sample.users);
            changed = true;
        }
        self.id_counter = self.id_counter.max(sample.id_counter);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            slug: slugify(title),
            title: title.into(),
            ..Movie::default()
        }
    }

    fn user(id: &str, name: &str, role: Role) -> User {
        User {
            id: id.into(),
            username: name.into(),
            email: format!("{name}@example.com"),
            password_hash: Some(hash_password("password")),
            role,
            ..User::default()
        }
    }

    /// A small catalog with an admin signed in
    fn catalog() -> AppData {
        let mut data = AppData {
            movies: vec![movie("m1", "Alien"), movie("m2", "Heat"), movie("m3", "Ran")],
            genres: vec![
                Genre { id: "g1".into(), name: "Horror".into(), slug: "horror".into() },
                Genre { id: "g2".into(), name: "Crime".into(), slug: "crime".into() },
            ],
            actors: vec![Actor { id: "a1".into(), name: "Sigourney Weaver".into(), country: "USA".into() }],
            users: vec![user("admin", "root", Role::Admin), user("u1", "ripley", Role::User), user("u2", "hicks", Role::User)],
            ..AppData::default()
        };
        data.movies[0].genres = vec!["g1".into()];
        data.movies[0].cast = vec!["a1".into()];
        data.movies[1].genres = vec!["g2".into(), "g1".into()];
        data.sign_in("admin").unwrap();
        data
    }

    #[test]
    fn ids_are_unique_and_prefixed() {
        let mut data = AppData::default();
        let a = data.generate_id("actor", T0);
        let b = data.generate_id("actor", T0);
        assert_ne!(a, b);
        assert!(a.starts_with("actor-"));
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }

    #[test]
    fn actors_get_ids_and_reject_duplicates() {
        let mut data = catalog();
        let actor = data.add_actor("  Tom Skerritt ", "USA", T0).unwrap();
        assert!(!actor.id.is_empty());
        assert_eq!(actor.name, "Tom Skerritt");
        assert_eq!(data.actors.len(), 2);

        let err = data.add_actor("tom SKERRITT", "Canada", T0).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: EntityKind::Actor, .. }));
        assert_eq!(data.actors.len(), 2);

        assert!(matches!(data.add_actor("   ", "USA", T0), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn actor_update_may_keep_its_own_name() {
        let mut data = catalog();
        let updated = data.update_actor("a1", "SIGOURNEY WEAVER", "United States").unwrap();
        assert_eq!(updated.country, "United States");
    }

    #[test]
    fn genre_duplicates_exclude_the_edited_record() {
        let mut data = catalog();
        assert!(matches!(data.add_genre("horror", T0), Err(CatalogError::Duplicate { kind: EntityKind::Genre, .. })));
        assert!(matches!(data.update_genre("g2", "HORROR"), Err(CatalogError::Duplicate { .. })));
        let renamed = data.update_genre("g1", "HORROR").unwrap();
        assert_eq!(renamed.name, "HORROR");
        let added = data.add_genre("Sci-Fi", T0).unwrap();
        assert_eq!(added.slug, "sci-fi");
    }

    #[test]
    fn deleting_a_genre_strips_it_from_movies() {
        let mut data = catalog();
        data.delete_genre("g1").unwrap();
        assert!(data.movies.iter().all(|m| !m.genres.contains(&"g1".to_owned())));
        assert_eq!(data.movies[1].genres, vec!["g2".to_owned()]);
    }

    #[test]
    fn deleting_a_genre_strips_slug_references() {
        let mut data = catalog();
        data.movies[2].genres = vec!["horror".into(), "g2".into()];
        data.delete_genre("g1").unwrap();
        assert_eq!(data.movies[2].genres, vec!["g2".to_owned()]);

        data.movies[2].genres.push("crime".into());
        data.update_genre("g2", "Noir").unwrap();
        assert_eq!(data.movies[2].genres, vec!["g2".to_owned()]);
    }

    #[test]
    fn synced_genres_collapse_by_name() {
        use movie_catalog_api::normalize;
        use serde_json::json;

        let mut data = catalog();
        data.movies[2].genres = vec!["action".into()];
        let listing = [json!({"_id": "m9", "name": "Ronin", "genres": ["Action"]})];
        let server = json!({"_id": "g-action", "name": "Action", "slug": "action"});

        data.merge_genres(normalize::embedded_genres(&listing));
        data.merge_genres(vec![normalize::genre(&server).unwrap()]);
        data.merge_genres(vec![Genre { id: "g-9".into(), name: "horror".into(), slug: "scary".into() }]);
        data.merge_movies(listing.iter().filter_map(normalize::movie).collect(), T0);

        let names: Vec<_> = data.genres.iter().map(|g| (g.id.as_str(), g.name.as_str())).collect();
        assert_eq!(names, [("g-9", "horror"), ("g2", "Crime"), ("g-action", "Action")]);
        assert_eq!(data.movie("m1").unwrap().genres, vec!["g-9".to_owned()]);
        assert_eq!(data.movie("m3").unwrap().genres, vec!["g-action".to_owned()]);
        assert_eq!(data.movie("m9").unwrap().genres, vec!["g-action".to_owned()]);

        data.delete_genre("g-action").unwrap();
        assert!(data.movie("m3").unwrap().genres.is_empty());
        assert!(data.movie("m9").unwrap().genres.is_empty());
        assert!(data.genres.iter().all(|g| !g.name.eq_ignore_ascii_case("action")));
    }

    #[test]
    fn synced_countries_collapse_by_name() {
        let mut data = AppData {
            countries: vec![Country { id: "usa".into(), name: "USA".into(), slug: "usa".into() }],
            ..AppData::default()
        };
        data.merge_countries(vec![
            Country { id: "c-us".into(), name: "usa".into(), slug: "united-states".into() },
            Country { id: "c-fr".into(), name: "France".into(), slug: "france".into() },
        ]);
        let ids: Vec<_> = data.countries.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c-us", "c-fr"]);
    }

    #[test]
    fn deleting_an_actor_strips_them_from_casts() {
        let mut data = catalog();
        data.delete_actor("a1").unwrap();
        assert!(data.movies[0].cast.is_empty());
        assert!(matches!(data.delete_actor("a1"), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn deleting_a_movie_strips_favorites_and_history() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.toggle_favorite("m1").unwrap();
        data.toggle_favorite("m2").unwrap();
        data.record_view("m1", T0).unwrap();
        data.record_view("m2", T0 + 1).unwrap();
        data.sign_in("admin").unwrap();

        data.delete_movie("m1").unwrap();
        let ripley = data.user("u1").unwrap();
        assert_eq!(ripley.favorites, vec!["m2".to_owned()]);
        assert_eq!(ripley.history.len(), 1);
        assert_eq!(ripley.history[0].movie_id, "m2");
        assert!(data.movie("m1").is_none());
    }

    #[test]
    fn admin_actions_need_an_admin() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        assert!(matches!(data.add_genre("Drama", T0), Err(CatalogError::Forbidden)));
        data.sign_out();
        assert!(matches!(data.delete_movie("m1"), Err(CatalogError::Unauthenticated)));
    }

    #[test]
    fn ratings_are_throttled_and_averaged() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        assert_eq!(data.rate_movie("m1", 7, T0).unwrap(), 7.0);
        let err = data.rate_movie("m2", 9, T0 + 59_000).unwrap_err();
        assert!(matches!(err, CatalogError::Throttled { action: ThrottledAction::Rating, .. }));

        data.sign_in("u2").unwrap();
        assert_eq!(data.rate_movie("m1", 8, T0 + 1_000).unwrap(), 7.5);
        data.sign_in("admin").unwrap();
        // (7 + 8 + 10) / 3 = 8.333...
        assert_eq!(data.rate_movie("m1", 10, T0 + 2_000).unwrap(), 8.3);
        assert_eq!(data.movie("m1").unwrap().ratings.len(), 3);
    }

    #[test]
    fn rerating_replaces_the_previous_score() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.rate_movie("m1", 2, T0).unwrap();
        assert_eq!(data.rate_movie("m1", 9, T0 + 60_000).unwrap(), 9.0);
        assert_eq!(data.movie("m1").unwrap().ratings.len(), 1);
        assert_eq!(data.user_rating("m1"), Some(9));
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let mut data = catalog();
        assert!(matches!(data.rate_movie("m1", 0, T0), Err(CatalogError::Validation(_))));
        assert!(matches!(data.rate_movie("m1", 11, T0), Err(CatalogError::Validation(_))));
        assert!(data.last_rating_at.is_empty());
    }

    #[test]
    fn comments_are_throttled_and_validated() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        assert!(matches!(data.add_comment("m1", "   \n\t", T0), Err(CatalogError::Validation(_))));

        let comment = data.add_comment("m1", "  Game over, man  ", T0).unwrap();
        assert_eq!(comment.text, "Game over, man");
        assert_eq!(comment.author, "ripley");

        let err = data.add_comment("m2", "again", T0 + 29_999).unwrap_err();
        assert!(matches!(err, CatalogError::Throttled { action: ThrottledAction::Comment, retry_after_secs: 1 }));
        assert!(data.add_comment("m2", "again", T0 + 30_000).is_ok());
    }

    #[test]
    fn comments_are_capped_newest_first() {
        let mut data = catalog();
        for i in 0..(COMMENT_LIMIT as i64 + 5) {
            data.last_comment_at.clear();
            data.add_comment("m3", &format!("comment {i}"), T0 + i).unwrap();
        }
        let comments = &data.movie("m3").unwrap().comments;
        assert_eq!(comments.len(), COMMENT_LIMIT);
        assert_eq!(comments[0].text, "comment 104");
    }

    #[test]
    fn comment_moderation() {
        let mut data = catalog();
        let comment = data.add_comment("m1", "first", T0).unwrap();
        assert!(data.toggle_comment_hidden("m1", &comment.id).unwrap());
        assert_eq!(data.movie("m1").unwrap().visible_comments().count(), 0);
        assert!(!data.toggle_comment_hidden("m1", &comment.id).unwrap());
        data.delete_comment("m1", &comment.id).unwrap();
        assert!(data.movie("m1").unwrap().comments.is_empty());
    }

    #[test]
    fn admins_cannot_demote_or_delete_themselves() {
        let mut data = catalog();
        let err = data.set_user_role("admin", Role::User).unwrap_err();
        assert!(matches!(err, CatalogError::SelfProtection(SelfProtection::Demote)));
        let err = data.delete_user("admin").unwrap_err();
        assert!(matches!(err, CatalogError::SelfProtection(SelfProtection::Delete)));
        assert!(data.user("admin").unwrap().is_admin());

        assert_eq!(data.set_user_role("u1", Role::Admin).unwrap().role, Role::Admin);
        data.delete_user("u2").unwrap();
        assert!(data.user("u2").is_none());
    }

    #[test]
    fn views_and_history() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        assert_eq!(data.record_view("m1", T0).unwrap(), 1);
        assert_eq!(data.record_view("heat", T0 + 1).unwrap(), 1);
        assert_eq!(data.record_view("m1", T0 + 2).unwrap(), 2);
        let history = &data.user("u1").unwrap().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], HistoryEntry { movie_id: "m1".into(), viewed_at: T0 + 2 });
        assert_eq!(history[1].movie_id, "m2");
    }

    #[test]
    fn history_is_capped() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.movies = (0..60).map(|i| movie(&format!("m{i}"), &format!("Movie {i}"))).collect();
        for i in 0..60 {
            data.record_view(&format!("m{i}"), T0 + i).unwrap();
        }
        let history = &data.user("u1").unwrap().history;
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].movie_id, "m59");
        assert_eq!(history[HISTORY_LIMIT - 1].movie_id, "m10");
    }

    #[test]
    fn anonymous_views_still_count() {
        let mut data = catalog();
        data.sign_out();
        assert_eq!(data.record_view("m2", T0).unwrap(), 1);
        assert!(data.users.iter().all(|u| u.history.is_empty()));
        assert!(matches!(data.record_view("nope", T0), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn favorites_toggle() {
        let mut data = catalog();
        assert!(data.toggle_favorite("alien").unwrap());
        assert!(data.is_favorite("m1"));
        assert!(!data.toggle_favorite("m1").unwrap());
        assert!(!data.is_favorite("m1"));
    }

    #[test]
    fn movie_crud() {
        let mut data = catalog();
        let draft = MovieDraft { title: "Alien".into(), year: Some(1986), ..MovieDraft::default() };
        let created = data.add_movie(&draft, T0).unwrap();
        assert_ne!(created.slug, "alien");
        assert_eq!(data.movies[0].id, created.id);

        let bad = MovieDraft { title: "Trip".into(), year: Some(1700), ..MovieDraft::default() };
        assert!(matches!(data.add_movie(&bad, T0), Err(CatalogError::Validation(_))));
        assert!(matches!(data.add_movie(&MovieDraft::default(), T0), Err(CatalogError::Validation(_))));

        let mut edit = MovieDraft::from(data.movie("m2").unwrap());
        edit.description = "L.A. crime saga".into();
        let updated = data.update_movie("m2", &edit).unwrap();
        assert_eq!(updated.description, "L.A. crime saga");
        assert_eq!(updated.id, "m2");
    }

    #[test]
    fn local_accounts() {
        let mut data = AppData::default();
        let user = data.register_local("neo", "neo@matrix.io", "followthewhiterabbit", T0).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(matches!(
            data.register_local("NEO", "other@matrix.io", "password", T0),
            Err(CatalogError::Duplicate { kind: EntityKind::User, .. })
        ));
        assert_eq!(data.authenticate_local("Neo@Matrix.io", "followthewhiterabbit").unwrap().id, user.id);
        assert!(matches!(data.authenticate_local("neo", "wrong"), Err(CatalogError::InvalidCredentials)));
        assert!(matches!(data.authenticate_local("trinity", "followthewhiterabbit"), Err(CatalogError::InvalidCredentials)));
    }

    #[test]
    fn upserting_keeps_local_state() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.toggle_favorite("m3").unwrap();
        let from_server = User {
            id: "u1".into(),
            username: "ellen".into(),
            role: Role::User,
            ..User::default()
        };
        assert_eq!(data.upsert_user(from_server, T0), "u1");
        let user = data.user("u1").unwrap();
        assert_eq!(user.username, "ellen");
        assert_eq!(user.favorites, vec!["m3".to_owned()]);
        assert_eq!(user.email, "ripley@example.com");

        let new_id = data.upsert_user(User { id: "srv-9".into(), username: "bishop".into(), ..User::default() }, T0);
        assert_eq!(new_id, "srv-9");
        assert_eq!(data.user("srv-9").unwrap().created_at, T0);
    }

    #[test]
    fn server_accounts_only_adopt_offline_accounts_by_name() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.toggle_favorite("m3").unwrap();

        // same username as u1, different server account
        let impostor = User { id: "srv-1".into(), username: "Ripley".into(), email: "ripley@example.com".into(), ..User::default() };
        assert_eq!(data.upsert_user(impostor, T0), "srv-1");
        let stranger = data.user("srv-1").unwrap();
        assert!(stranger.favorites.is_empty());
        assert!(stranger.password_hash.is_none());
        assert_eq!(data.user("u1").unwrap().favorites, vec!["m3".to_owned()]);

        let offline = data.register_local("newt", "newt@hadleys.hope", "password", T0).unwrap();
        let from_server = User { id: "srv-2".into(), username: "NEWT".into(), role: Role::User, ..User::default() };
        assert_eq!(data.upsert_user(from_server, T0), offline.id);
        assert!(data.user("srv-2").is_none());
        assert!(data.user(&offline.id).unwrap().password_hash.is_some());
    }

    #[test]
    fn merging_remote_movies() {
        let mut data = catalog();
        data.sign_in("u1").unwrap();
        data.rate_movie("m1", 4, T0).unwrap();
        data.movies[0].views = 10;

        let mut refreshed = movie("m1", "Alien");
        refreshed.description = "In space no one can hear you scream".into();
        refreshed.views = 3;
        refreshed.rating = 9.9;
        let added = data.merge_movies(vec![refreshed, movie("m9", "Solaris")], T0);

        assert_eq!(added, 1);
        let alien = data.movie("m1").unwrap();
        assert_eq!(alien.description, "In space no one can hear you scream");
        assert_eq!(alien.views, 10);
        assert_eq!(alien.rating, 4.0);
        assert_eq!(data.movie("solaris").unwrap().created_at, T0);
    }

    #[test]
    fn seeding_only_fills_gaps() {
        let sample = catalog();
        let mut data = AppData { users: vec![user("me", "me", Role::User)], ..AppData::default() };
        assert!(data.seed_missing(&sample));
        assert_eq!(data.movies.len(), 3);
        assert_eq!(data.users.len(), 1);
        assert!(!data.seed_missing(&sample));
    }
}
