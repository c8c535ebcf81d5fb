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

use movie_catalog_api::Movie;

use crate::store::AppData;

pub const TOP_MOVIES: usize = 5;

/// Aggregate numbers shown on the admin dashboard
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Stats {
    pub movies: usize,
    pub genres: usize,
    pub actors: usize,
    pub users: usize,
    pub comments: usize,
    pub total_views: u64,
    /// Mean of the rated movies' averages, rounded to one decimal place
    pub average_rating: f64,
    /// Most viewed movies, highest first
    pub top_movies: Vec<Movie>,
}

impl AppData {
    pub fn stats(&self) -> Stats {
        let rated: Vec<f64> = self.movies.iter().map(|m| m.rating).filter(|r| *r > 0.0).collect();
        #[allow(clippy::cast_precision_loss)]
        let average_rating = if rated.is_empty() {
            0.0
        } else {
            (rated.iter().sum::<f64>() / rated.len() as f64 * 10.0).round() / 10.0
        };

        let mut top_movies: Vec<&Movie> = self.movies.iter().collect();
        top_movies.sort_by(|a, b| b.views.cmp(&a.views));
        top_movies.truncate(TOP_MOVIES);

        Stats {
            movies: self.movies.len(),
            genres: self.genres.len(),
            actors: self.actors.len(),
            users: self.users.len(),
            comments: self.movies.iter().map(|m| m.comments.len()).sum(),
            total_views: self.movies.iter().map(|m| m.views).sum(),
            average_rating,
            top_movies: top_movies.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_catalog_api::Comment;

    fn movie(id: &str, views: u64, rating: f64) -> Movie {
        Movie { id: id.into(), views, rating, ..Movie::default() }
    }

    #[test]
    fn empty_catalog() {
        assert_eq!(AppData::default().stats(), Stats::default());
    }

    #[test]
    fn counts_and_top_movies() {
        let mut data = AppData {
            movies: (1..=7).map(|i| movie(&format!("m{i}"), i * 10, 0.0)).collect(),
            ..AppData::default()
        };
        data.movies[0].rating = 8.0;
        data.movies[1].rating = 6.5;
        data.movies[2].comments.push(Comment {
            id: "c1".into(),
            user_id: "u1".into(),
            author: "someone".into(),
            text: "hi".into(),
            created_at: 0,
            hidden: true,
        });

        let stats = data.stats();
        assert_eq!(stats.movies, 7);
        assert_eq!(stats.comments, 1);
        assert_eq!(stats.total_views, 280);
        assert!((stats.average_rating - 7.3).abs() < f64::EPSILON);
        let top: Vec<&str> = stats.top_movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(top, ["m7", "m6", "m5", "m4", "m3"]);
    }
}
