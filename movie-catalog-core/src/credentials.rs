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
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::errors::{CatalogError, Result};

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub static EMAIL_REGEX:    LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX should be valid"));
pub static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.-]{3,30}$").expect("USERNAME_REGEX should be valid"));

/// Hex-encoded sha-256 of a password
///
/// Only used for the locally cached accounts, the server does its own thing.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password);
    let hash = hasher.finalize();
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<()> {
    if !USERNAME_REGEX.is_match(username) {
        return Err(CatalogError::Validation("Usernames must be 3-30 characters long and may only contain letters, digits, dots, dashes and underscores"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(CatalogError::Validation("Please enter a valid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CatalogError::Validation("Passwords must be at least 6 characters long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hash() {
        assert_eq!(hash_password("admin123"), "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9");
    }

    #[test]
    fn registration_rules() {
        assert!(validate_registration("neo", "neo@matrix.io", "zion-forever").is_ok());
        assert!(validate_registration("ne", "neo@matrix.io", "zion-forever").is_err());
        assert!(validate_registration("neo", "neo-at-matrix", "zion-forever").is_err());
        assert!(validate_registration("neo", "neo@matrix.io", "123").is_err());
    }
}
