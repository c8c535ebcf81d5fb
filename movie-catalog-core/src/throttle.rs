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

//! Per-user cooldowns for comments and ratings.
//!
//! These live entirely on the client and are trivially bypassed by clearing
//! storage, they only exist to slow down accidental double submissions.

use std::{collections::BTreeMap, time::Duration};

use crate::errors::{CatalogError, Result, ThrottledAction};

pub const COMMENT_COOLDOWN: Duration = Duration::from_secs(30);
pub const RATING_COOLDOWN: Duration = Duration::from_secs(60);

impl ThrottledAction {
    pub fn cooldown(self) -> Duration {
        match self {
            ThrottledAction::Comment => COMMENT_COOLDOWN,
            ThrottledAction::Rating => RATING_COOLDOWN,
        }
    }
}

/// Fails if `user_id` performed `action` less than its cooldown before `now` (unix millis)
pub fn check(last_actions: &BTreeMap<String, i64>, user_id: &str, action: ThrottledAction, now: i64) -> Result<()> {
    let Some(&last) = last_actions.get(user_id) else {
        return Ok(());
    };
    let cooldown_ms = i64::try_from(action.cooldown().as_millis()).unwrap_or(i64::MAX);
    let elapsed = now.saturating_sub(last);
    if elapsed >= cooldown_ms {
        return Ok(());
    }
    let remaining_ms = cooldown_ms - elapsed.max(0);
    Err(CatalogError::Throttled {
        action,
        retry_after_secs: u64::try_from(remaining_ms).unwrap_or(0).div_ceil(1000),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(user: &str, at: i64) -> BTreeMap<String, i64> {
        BTreeMap::from([(user.to_owned(), at)])
    }

    #[test]
    fn first_action_is_allowed() {
        assert!(check(&BTreeMap::new(), "u1", ThrottledAction::Comment, 1_000).is_ok());
    }

    #[test]
    fn comment_cooldown() {
        let map = last("u1", 100_000);
        let err = check(&map, "u1", ThrottledAction::Comment, 110_000).unwrap_err();
        assert!(matches!(err, CatalogError::Throttled { action: ThrottledAction::Comment, retry_after_secs: 20 }));
        assert!(check(&map, "u1", ThrottledAction::Comment, 130_000).is_ok());
        assert!(check(&map, "u2", ThrottledAction::Comment, 110_000).is_ok());
    }

    #[test]
    fn rating_cooldown_rounds_up() {
        let map = last("u1", 0);
        let err = check(&map, "u1", ThrottledAction::Rating, 59_500).unwrap_err();
        assert!(matches!(err, CatalogError::Throttled { retry_after_secs: 1, .. }));
        assert!(check(&map, "u1", ThrottledAction::Rating, 60_000).is_ok());
    }

    #[test]
    fn clock_going_backwards_still_throttles() {
        let map = last("u1", 50_000);
        let err = check(&map, "u1", ThrottledAction::Rating, 40_000).unwrap_err();
        assert!(matches!(err, CatalogError::Throttled { retry_after_secs: 60, .. }));
    }
}
