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

// Request bodies, in the field naming the server expects.
// Responses are not modelled as structs, see crate::normalize.

use serde::Serialize;

use crate::types::{EpisodeDraft, MovieDraft};

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct LoginBody<'a> {
    /// username or email
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct GenreBody<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct FavoriteBody<'a> {
    pub slug: &'a str,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ApiMovieBody<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub slug: &'a str,
    pub origin_name: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    pub country: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    pub quality: &'a str,
    pub lang: &'a str,
    pub status: &'a str,
    pub category: &'a [String],
    pub actor: &'a [String],
    pub director: &'a [String],
    pub poster_url: &'a str,
    pub thumb_url: &'a str,
    pub trailer_url: &'a str,
}

impl<'a> From<&'a MovieDraft> for ApiMovieBody<'a> {
    fn from(draft: &'a MovieDraft) -> Self {
        Self {
            name: &draft.title,
            slug: &draft.slug,
            origin_name: &draft.original_title,
            content: &draft.description,
            year: draft.year,
            country: &draft.country,
            time: draft.duration,
            quality: &draft.quality,
            lang: &draft.language,
            status: &draft.status,
            category: &draft.genres,
            actor: &draft.cast,
            director: &draft.directors,
            poster_url: &draft.poster,
            thumb_url: &draft.banner,
            trailer_url: &draft.trailer,
        }
    }
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ApiEpisodeBody<'a> {
    pub name: &'a str,
    pub server_name: &'a str,
    pub link_embed: &'a str,
    pub link_m3u8: &'a str,
}

impl<'a> From<&'a EpisodeDraft> for ApiEpisodeBody<'a> {
    fn from(draft: &'a EpisodeDraft) -> Self {
        Self {
            name: &draft.name,
            server_name: &draft.server_name,
            link_embed: &draft.embed_url,
            link_m3u8: &draft.video_url,
        }
    }
}

/// Query parameters accepted by the movie listing endpoints
#[derive(Serialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct MovieQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl MovieQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self { page: Some(page), limit: Some(limit), ..Self::default() }
    }

    /// Flattens the query into `(key, value)` pairs for a URL query string
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref sort_field) = self.sort_field {
            pairs.push(("sort_field", sort_field.clone()));
        }
        if let Some(ref category) = self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(ref country) = self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_body_uses_server_field_names() {
        let draft = MovieDraft {
            title: "Heat".into(),
            year: Some(1995),
            duration: Some(170),
            genres: vec!["crime".into()],
            poster: "https://img/heat.jpg".into(),
            ..MovieDraft::default()
        };
        let body = serde_json::to_value(ApiMovieBody::from(&draft)).unwrap();
        assert_eq!(body["name"], "Heat");
        assert_eq!(body["time"], 170);
        assert_eq!(body["category"][0], "crime");
        assert_eq!(body["poster_url"], "https://img/heat.jpg");
        assert!(body.get("slug").is_none());
    }

    #[test]
    fn movie_query_only_emits_set_fields() {
        let mut query = MovieQuery::page(2, 24);
        query.year = Some(2020);
        assert_eq!(
            query.pairs(),
            vec![("page", "2".to_owned()), ("limit", "24".to_owned()), ("year", "2020".to_owned())]
        );
    }
}
