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

//! Conversion of server JSON into the internal shapes.
//!
//! The server is not consistent about field names (`name` vs `title`,
//! `poster_url` vs `poster`, ...) nor about how relations are encoded
//! (plain strings, ids, `{id, name, slug}` objects or lists of those),
//! so every field is looked up under all of its known names.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::envelope::unwrap_object;
use crate::types::{Collection, Country, Episode, Genre, Movie, Role, Session, User};

type Object = Map<String, Value>;

fn first<'a>(map: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
}

fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_string(map: &Object, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(string_of)
}

fn leading_int(s: &str) -> Option<u64> {
    let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

/// Lowercase, dash separated form of a name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// A reference to a genre/country/person as it appears inside a movie
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TaxonRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

fn taxon_of(value: &Value) -> Option<TaxonRef> {
    match value {
        Value::Object(map) => {
            let name = first_string(map, &["name", "title"]);
            let slug = first_string(map, &["slug"]).or_else(|| name.as_deref().map(slugify));
            let id = first_string(map, &["_id", "id"]).or_else(|| slug.clone())?;
            Some(TaxonRef {
                name: name.unwrap_or_else(|| id.clone()),
                slug: slug.unwrap_or_else(|| id.clone()),
                id,
            })
        },
        other => string_of(other).map(|name| TaxonRef {
            id: slugify(&name),
            slug: slugify(&name),
            name,
        }),
    }
}

/// Reads a relation that may be a single value or a list of values
pub fn taxa(value: Option<&Value>) -> Vec<TaxonRef> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(taxon_of).collect(),
        Some(Value::String(s)) if s.contains(',') => s
            .split(',')
            .filter_map(|part| taxon_of(&Value::String(part.to_owned())))
            .collect(),
        Some(other) => taxon_of(other).into_iter().collect(),
    }
}

fn names(value: Option<&Value>) -> Vec<String> {
    taxa(value)
        .into_iter()
        .map(|t| t.name)
        // placeholder values the server uses for unknown people
        .filter(|name| !matches!(name.to_lowercase().as_str(), "đang cập nhật" | "updating" | "n/a"))
        .collect()
}

/// Converts a server movie object into a [`Movie`]
///
/// Returns `None` if the object has neither an id nor a slug nor a title.
pub fn movie(value: &Value) -> Option<Movie> {
    let Value::Object(map) = unwrap_object(value) else {
        return None;
    };
    let title = first_string(map, &["name", "title"]);
    let slug = first_string(map, &["slug"]).or_else(|| title.as_deref().map(slugify));
    let id = first_string(map, &["_id", "id"]).or_else(|| slug.clone())?;

    let rating = first(map, &["tmdb", "imdb"])
        .and_then(|v| v.get("vote_average"))
        .and_then(number_of)
        .or_else(|| first(map, &["rating", "vote_average"]).and_then(number_of))
        .unwrap_or(0.0);

    Some(Movie {
        slug: slug.unwrap_or_else(|| id.clone()),
        title: title.unwrap_or_default(),
        original_title: first_string(map, &["origin_name", "original_title", "originalTitle"]).unwrap_or_default(),
        description: first_string(map, &["content", "description", "overview"]).unwrap_or_default(),
        year: first(map, &["year", "release_year"]).and_then(integer_of).and_then(|y| u16::try_from(y).ok()),
        country: taxa(first(map, &["country", "countries"]))
            .into_iter()
            .map(|t| t.name)
            .collect::<Vec<_>>()
            .join(", "),
        duration: first(map, &["time", "duration", "runtime"]).and_then(integer_of).and_then(|d| u32::try_from(d).ok()),
        quality: first_string(map, &["quality"]).unwrap_or_default(),
        language: first_string(map, &["lang", "language"]).unwrap_or_default(),
        status: first_string(map, &["status", "episode_current"]).unwrap_or_default(),
        genres: taxa(first(map, &["category", "genres", "genre"])).into_iter().map(|t| t.id).collect(),
        cast: names(first(map, &["actor", "actors", "cast"])),
        directors: names(first(map, &["director", "directors"])),
        poster: first_string(map, &["poster_url", "poster", "posterUrl"]).unwrap_or_default(),
        banner: first_string(map, &["thumb_url", "banner", "backdrop_url", "thumbnail"]).unwrap_or_default(),
        trailer: first_string(map, &["trailer_url", "trailer", "trailerUrl"]).unwrap_or_default(),
        rating: (rating * 10.0).round() / 10.0,
        views: first(map, &["view", "views", "view_count"]).and_then(integer_of).unwrap_or(0),
        ratings: Vec::new(),
        comments: Vec::new(),
        created_at: 0,
        id,
    })
}

/// Genres embedded inside a list of server movie objects, deduplicated by id in first-seen order
pub fn embedded_genres<'a, I>(movies: I) -> Vec<Genre>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut seen: IndexMap<String, Genre> = IndexMap::new();
    for value in movies {
        let Value::Object(map) = unwrap_object(value) else { continue };
        for taxon in taxa(first(map, &["category", "genres", "genre"])) {
            seen.entry(taxon.id.clone()).or_insert(Genre {
                id: taxon.id,
                name: taxon.name,
                slug: taxon.slug,
            });
        }
    }
    seen.into_values().collect()
}

pub fn genre(value: &Value) -> Option<Genre> {
    taxon_of(unwrap_object(value)).map(|t| Genre { id: t.id, name: t.name, slug: t.slug })
}

pub fn country(value: &Value) -> Option<Country> {
    taxon_of(unwrap_object(value)).map(|t| Country { id: t.id, name: t.name, slug: t.slug })
}

pub fn episode(value: &Value) -> Option<Episode> {
    let Value::Object(map) = unwrap_object(value) else {
        return None;
    };
    let name = first_string(map, &["name", "title", "filename"])?;
    let slug = first_string(map, &["slug"]).unwrap_or_else(|| slugify(&name));
    Some(Episode {
        id: first_string(map, &["_id", "id"]).unwrap_or_else(|| slug.clone()),
        slug,
        name,
        server_name: first_string(map, &["server_name", "serverName", "server"]).unwrap_or_default(),
        embed_url: first_string(map, &["link_embed", "embed_url", "embedUrl"]).unwrap_or_default(),
        video_url: first_string(map, &["link_m3u8", "video_url", "videoUrl", "url"]).unwrap_or_default(),
    })
}

/// Episodes may be a flat list or grouped by server as `[{server_name, server_data: [...]}]`
pub fn episodes(value: &Value) -> Vec<Episode> {
    let list = match value {
        Value::Object(map) => match first(map, &["episodes", "items", "data"]) {
            Some(inner) => inner,
            None => return Vec::new(),
        },
        other => other,
    };
    let Value::Array(entries) = list else {
        return Vec::new();
    };
    let mut result = Vec::new();
    for entry in entries {
        match entry.get("server_data") {
            Some(Value::Array(server_data)) => {
                let server = entry.get("server_name").and_then(string_of).unwrap_or_default();
                result.extend(server_data.iter().filter_map(episode).map(|mut ep| {
                    if ep.server_name.is_empty() {
                        ep.server_name.clone_from(&server);
                    }
                    ep
                }));
            },
            _ => result.extend(episode(entry)),
        }
    }
    result
}

pub fn collection(value: &Value) -> Option<Collection> {
    let Value::Object(map) = unwrap_object(value) else {
        return None;
    };
    let name = first_string(map, &["name", "title"])?;
    let slug = first_string(map, &["slug"]).unwrap_or_else(|| slugify(&name));
    let movies = match first(map, &["movies", "items"]) {
        Some(Value::Array(items)) => items.iter().filter_map(movie).collect(),
        _ => Vec::new(),
    };
    Some(Collection {
        id: first_string(map, &["_id", "id"]).unwrap_or_else(|| slug.clone()),
        name,
        slug,
        movies,
    })
}

pub fn user(value: &Value) -> Option<User> {
    let Value::Object(map) = unwrap_object(value) else {
        return None;
    };
    let email = first_string(map, &["email"]).unwrap_or_default();
    let username = first_string(map, &["username", "name", "displayName"])
        .or_else(|| email.split('@').next().filter(|s| !s.is_empty()).map(str::to_owned))?;
    let is_admin = map.get("isAdmin").and_then(Value::as_bool).unwrap_or(false);
    let role = match first_string(map, &["role"]) {
        Some(role) => role.parse().unwrap_or(Role::User),
        None if is_admin => Role::Admin,
        None => Role::User,
    };
    Some(User {
        id: first_string(map, &["_id", "id"]).unwrap_or_else(|| username.clone()),
        username,
        email,
        password_hash: None,
        role,
        avatar: first_string(map, &["avatar", "avatar_url"]),
        favorites: Vec::new(),
        history: Vec::new(),
        created_at: 0,
    })
}

/// Reads a login/register response: `{token, user}`, possibly wrapped in `data`
pub fn session(value: &Value) -> Option<Session> {
    let Value::Object(map) = unwrap_object(value) else {
        return None;
    };
    let token = first_string(map, &["token", "accessToken", "access_token"])?;
    let user = first(map, &["user", "profile"]).and_then(user)?;
    Some(Session { token, user })
}

/// Reads the uploaded file's URL from an upload response
pub fn upload_url(value: &Value) -> Option<String> {
    let Value::Object(map) = unwrap_object(value) else {
        return string_of(value);
    };
    first_string(map, &["url", "secure_url", "path", "location"])
}

/// Reads the server's favorites list, which may hold movie objects or plain slugs
pub fn favorite_slugs(value: &Value) -> Vec<String> {
    crate::envelope::unwrap_list(value)
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(_) => movie(entry).map(|m| m.slug),
            other => string_of(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn movie_from_ophim_style_object() {
        let value = json!({
            "status": true,
            "movie": {
                "_id": "64f0c",
                "name": "Người Nhện",
                "slug": "nguoi-nhen",
                "origin_name": "Spider-Man",
                "content": "<p>A boy gets bitten.</p>",
                "poster_url": "https://img/poster.jpg",
                "thumb_url": "https://img/thumb.jpg",
                "trailer_url": "https://youtube.com/watch?v=1",
                "time": "121 phút",
                "quality": "HD",
                "lang": "Vietsub",
                "year": 2002,
                "view": 1500,
                "actor": ["Tobey Maguire", "Kirsten Dunst"],
                "director": ["Đang cập nhật"],
                "category": [{"id": "c1", "name": "Hành Động", "slug": "hanh-dong"}],
                "country": [{"id": "u1", "name": "Âu Mỹ", "slug": "au-my"}],
                "tmdb": {"vote_average": 7.34}
            }
        });
        let movie = movie(&value).unwrap();
        assert_eq!(movie.id, "64f0c");
        assert_eq!(movie.title, "Người Nhện");
        assert_eq!(movie.original_title, "Spider-Man");
        assert_eq!(movie.duration, Some(121));
        assert_eq!(movie.year, Some(2002));
        assert_eq!(movie.views, 1500);
        assert_eq!(movie.genres, vec!["c1".to_owned()]);
        assert_eq!(movie.country, "Âu Mỹ");
        assert_eq!(movie.cast.len(), 2);
        assert!(movie.directors.is_empty());
        assert_eq!(movie.banner, "https://img/thumb.jpg");
        assert!((movie.rating - 7.3).abs() < f64::EPSILON);
    }

    #[test]
    fn movie_from_alternate_field_names() {
        let value = json!({
            "id": 42,
            "title": "Heat",
            "description": "Cops and robbers",
            "poster": "heat.jpg",
            "banner": "heat-wide.jpg",
            "duration": 170,
            "year": "1995",
            "views": 12,
            "genres": ["Crime", "Thriller"],
            "country": "USA",
            "rating": 8.3
        });
        let movie = movie(&value).unwrap();
        assert_eq!(movie.id, "42");
        assert_eq!(movie.slug, "heat");
        assert_eq!(movie.poster, "heat.jpg");
        assert_eq!(movie.year, Some(1995));
        assert_eq!(movie.genres, vec!["crime".to_owned(), "thriller".to_owned()]);
        assert_eq!(movie.country, "USA");
    }

    #[test]
    fn movie_without_identity_is_dropped() {
        assert_eq!(movie(&json!({"content": "nothing to name this by"})), None);
        assert_eq!(movie(&json!("just a string")), None);
    }

    #[test]
    fn slugs() {
        assert_eq!(slugify("  Science Fiction & Fantasy "), "science-fiction-fantasy");
        assert_eq!(slugify("Hành Động"), "hành-động");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn genres_collected_once() {
        let movies = [
            json!({"name": "A", "category": [{"id": "1", "name": "Drama"}, {"id": "2", "name": "War"}]}),
            json!({"name": "B", "category": [{"id": "2", "name": "War"}]}),
        ];
        let genres = embedded_genres(&movies);
        assert_eq!(genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), ["Drama", "War"]);
    }

    #[test]
    fn mongo_ids_win_for_movies_and_genres_alike() {
        let value = json!({
            "_id": "65a1",
            "id": 7,
            "name": "Heat",
            "category": [{"_id": "65g1", "id": 3, "name": "Crime", "slug": "crime"}]
        });
        let movie = movie(&value).unwrap();
        assert_eq!(movie.id, "65a1");
        assert_eq!(movie.genres, vec!["65g1".to_owned()]);
        assert_eq!(genre(&json!({"_id": "65g1", "id": 3, "name": "Crime"})).unwrap().id, "65g1");
        assert_eq!(embedded_genres([&value])[0].id, "65g1");
    }

    #[test]
    fn grouped_episodes() {
        let value = json!({
            "episodes": [
                {"server_name": "Vietsub #1", "server_data": [
                    {"name": "1", "slug": "tap-1", "link_embed": "https://e/1", "link_m3u8": "https://v/1.m3u8"},
                    {"name": "2", "slug": "tap-2", "link_embed": "https://e/2", "link_m3u8": ""}
                ]}
            ]
        });
        let episodes = episodes(&value);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].server_name, "Vietsub #1");
        assert_eq!(episodes[1].embed_url, "https://e/2");
    }

    #[test]
    fn sessions() {
        let value = json!({"data": {"token": "abc", "user": {"_id": "u1", "email": "neo@matrix.io", "role": "ADMIN"}}});
        let session = session(&value).unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.username, "neo");
        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(super::session(&json!({"user": {"id": "1"}})), None);
    }

    #[test]
    fn favorites_and_uploads() {
        let favorites = json!({"data": [{"name": "Heat", "slug": "heat"}, "alien"]});
        assert_eq!(favorite_slugs(&favorites), ["heat", "alien"]);
        assert_eq!(upload_url(&json!({"data": {"secure_url": "https://cdn/x.png"}})).as_deref(), Some("https://cdn/x.png"));
    }
}
