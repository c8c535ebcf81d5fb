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

//! Internal shapes shared by the data layer and the front-end.
//!
//! Everything here is what the rest of the workspace works with. Server
//! responses are converted into these types by [`crate::normalize`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub year: Option<u16>,
    pub country: String,
    /// Runtime in minutes
    pub duration: Option<u32>,
    pub quality: String,
    pub language: String,
    pub status: String,
    /// Genre ids
    pub genres: Vec<String>,
    /// Actor ids
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub poster: String,
    pub banner: String,
    pub trailer: String,
    /// Average of `ratings`, rounded to one decimal place
    pub rating: f64,
    pub views: u64,
    pub ratings: Vec<Rating>,
    /// Newest first
    pub comments: Vec<Comment>,
    pub created_at: i64,
}

impl Movie {
    /// Matches either the id or the slug
    pub fn is(&self, id_or_slug: &str) -> bool {
        self.id == id_or_slug || (!self.slug.is_empty() && self.slug == id_or_slug)
    }

    pub fn visible_comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(|c| !c.hidden)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: String,
    pub score: u8,
    pub rated_at: i64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub author: String,
    pub text: String,
    pub created_at: i64,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub country: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub movie_id: String,
    pub viewed_at: i64,
}

/// Locally cached account record.
///
/// The server owns the real credentials and session, this is only a
/// convenience copy and may drift from it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// hex-encoded sha-256 of the password, only set for locally registered accounts
    pub password_hash: Option<String>,
    pub role: Role,
    pub avatar: Option<String>,
    /// Movie ids
    pub favorites: Vec<String>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
    pub created_at: i64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub server_name: String,
    pub embed_url: String,
    pub video_url: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub movies: Vec<Movie>,
}

/// Editable part of a [`Movie`], used by the admin forms and the create/update requests
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieDraft {
    pub slug: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub year: Option<u16>,
    pub country: String,
    pub duration: Option<u32>,
    pub quality: String,
    pub language: String,
    pub status: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub poster: String,
    pub banner: String,
    pub trailer: String,
}

impl MovieDraft {
    /// Copies the draft's fields onto a movie, leaving identity and aggregates alone
    pub fn apply_to(&self, movie: &mut Movie) {
        if !self.slug.is_empty() {
            movie.slug.clone_from(&self.slug);
        }
        movie.title.clone_from(&self.title);
        movie.original_title.clone_from(&self.original_title);
        movie.description.clone_from(&self.description);
        movie.year = self.year;
        movie.country.clone_from(&self.country);
        movie.duration = self.duration;
        movie.quality.clone_from(&self.quality);
        movie.language.clone_from(&self.language);
        movie.status.clone_from(&self.status);
        movie.genres.clone_from(&self.genres);
        movie.cast.clone_from(&self.cast);
        movie.directors.clone_from(&self.directors);
        movie.poster.clone_from(&self.poster);
        movie.banner.clone_from(&self.banner);
        movie.trailer.clone_from(&self.trailer);
    }
}

impl From<&Movie> for MovieDraft {
    fn from(movie: &Movie) -> Self {
        Self {
            slug: movie.slug.clone(),
            title: movie.title.clone(),
            original_title: movie.original_title.clone(),
            description: movie.description.clone(),
            year: movie.year,
            country: movie.country.clone(),
            duration: movie.duration,
            quality: movie.quality.clone(),
            language: movie.language.clone(),
            status: movie.status.clone(),
            genres: movie.genres.clone(),
            cast: movie.cast.clone(),
            directors: movie.directors.clone(),
            poster: movie.poster.clone(),
            banner: movie.banner.clone(),
            trailer: movie.trailer.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeDraft {
    pub name: String,
    pub server_name: String,
    pub embed_url: String,
    pub video_url: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub per_page: u64,
}

/// A list response, with pagination info if the server provided any
#[derive(Clone, PartialEq, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new(), pagination: None }
    }
}

/// Result of a successful login or registration
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Session {
    pub token: String,
    pub user: User,
}
