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

use std::fmt::Display;

use cloneable_errors::ErrorContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum EntityKind {
    Movie,
    Genre,
    Actor,
    User,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThrottledAction {
    Comment,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfProtection {
    Demote,
    Delete,
}

#[derive(Debug, Clone)]
pub enum CatalogError {
    /// A submitted value was rejected, the message is meant for the user
    Validation(&'static str),
    Duplicate {
        kind: EntityKind,
        name: String,
    },
    Throttled {
        action: ThrottledAction,
        retry_after_secs: u64,
    },
    NotFound {
        kind: EntityKind,
        id: String,
    },
    Unauthenticated,
    Forbidden,
    SelfProtection(SelfProtection),
    InvalidCredentials,
    Remote(ErrorContext),
    Storage(ErrorContext),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound { kind, id: id.to_owned() }
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Remote(ref e) | Self::Storage(ref e) => Some(e),
            _ => None,
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Duplicate { kind, ref name } => write!(f, "{kind} \"{name}\" already exists"),
            Self::Throttled { action, retry_after_secs } => write!(f, "You're doing that too often, please wait {retry_after_secs}s before submitting another {action}"),
            Self::NotFound { kind, ref id } => write!(f, "{kind} {id} was not found"),
            Self::Unauthenticated => write!(f, "You need to log in first"),
            Self::Forbidden => write!(f, "Only administrators can do that"),
            Self::SelfProtection(SelfProtection::Demote) => write!(f, "You cannot remove your own administrator role"),
            Self::SelfProtection(SelfProtection::Delete) => write!(f, "You cannot delete your own account"),
            Self::InvalidCredentials => write!(f, "Invalid username or password"),
            Self::Remote(ref e) => write!(f, "{e}"),
            Self::Storage(ref e) => write!(f, "Failed to save data: {e}"),
        }
    }
}

impl From<ErrorContext> for CatalogError {
    fn from(value: ErrorContext) -> Self {
        Self::Remote(value)
    }
}
