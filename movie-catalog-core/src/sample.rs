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

//! Catalog bundled with the application, used when running without the API
//! and as a fallback when the API can't be reached.

use cloneable_errors::{ErrorContext, ResContext};

use crate::store::AppData;

const SAMPLE_DATA: &str = include_str!("../data/sample_data.json");

pub fn sample_data() -> Result<AppData, ErrorContext> {
    serde_json::from_str(SAMPLE_DATA).context("Bundled sample data is not valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::hash_password;

    #[test]
    fn sample_data_parses() {
        let data = sample_data().unwrap();
        assert!(!data.movies.is_empty());
        assert!(data.current_user_id.is_none());
        for movie in &data.movies {
            assert!(movie.genres.iter().all(|g| data.genre(g).is_some()), "{} has an unknown genre", movie.id);
            assert!(movie.cast.iter().all(|a| data.actor(a).is_some()), "{} has an unknown actor", movie.id);
        }
    }

    #[test]
    fn sample_accounts() {
        let data = sample_data().unwrap();
        let admin = data.authenticate_local("admin", "admin123").unwrap();
        assert!(admin.is_admin());
        let demo = data.authenticate_local("demo", "demo1234").unwrap();
        assert!(!demo.is_admin());
        assert_eq!(demo.password_hash.as_deref(), Some(hash_password("demo1234").as_str()));
    }
}
