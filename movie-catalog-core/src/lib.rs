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
mod config;
mod credentials;
mod errors;
mod mutations;
mod provider;
mod remote;
mod sample;
mod stats;
mod storage;
mod store;
mod throttle;

pub use config::*;
pub use credentials::{hash_password, validate_registration, MIN_PASSWORD_LENGTH};
pub use errors::*;
pub use mutations::{COMMENT_LIMIT, HISTORY_LIMIT, MAX_COMMENT_LENGTH, SCORE_RANGE, YEAR_RANGE};
pub use provider::*;
pub use remote::*;
pub use sample::sample_data;
pub use stats::*;
pub use storage::*;
pub use store::*;
pub use throttle::{COMMENT_COOLDOWN, RATING_COOLDOWN};
