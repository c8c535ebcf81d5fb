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
use std::{cell::RefCell, future::Future, rc::Rc};

use yew::platform::spawn_local;
use yew::prelude::*;
use yew::suspense::{Suspension, SuspensionResult};
use yew_hooks::use_timeout;

use crate::constants::BANNER_DISMISS_MS;
use crate::contexts::{CatalogContext, SettingsContext};

enum UseAsyncSuspensionState<R>
where
    R: 'static,
{
    Reset,
    Running(Suspension),
    Finished(Rc<R>),
}

/// Runs `future` once per distinct `deps`, suspending the component until it resolves
#[hook]
pub fn use_async_suspension<FF, F, D, R>(future: FF, deps: D) -> SuspensionResult<Rc<R>>
where
    FF: 'static + FnOnce(D) -> F,
    F:  'static + Future<Output = R>,
    D:  'static + PartialEq + Clone,
    R:  'static,
{
    let state_ref: Rc<RefCell<UseAsyncSuspensionState<R>>> = use_memo(deps.clone(), |_| RefCell::new(UseAsyncSuspensionState::Reset));
    let mut state = state_ref.borrow_mut();
    match *state {
        UseAsyncSuspensionState::Running(ref sus) => Err(sus.clone()),
        UseAsyncSuspensionState::Finished(ref res) => Ok(res.clone()),
        UseAsyncSuspensionState::Reset => {
            let (sus, sus_handle) = Suspension::new();
            *state = UseAsyncSuspensionState::Running(sus.clone());
            drop(state);
            spawn_local(async move {
                let result = future(deps).await;
                *state_ref.borrow_mut() = UseAsyncSuspensionState::Finished(Rc::new(result));
                sus_handle.resume();
            });
            Err(sus)
        }
    }
}

#[hook]
pub fn use_catalog() -> CatalogContext {
    use_context().expect("CatalogContext should be provided")
}

#[hook]
pub fn use_settings() -> SettingsContext {
    use_context().expect("SettingsContext should be provided")
}

/// A short-lived success message
#[derive(Clone, PartialEq)]
pub struct BannerHandle {
    message: UseStateHandle<Option<AttrValue>>,
}

impl BannerHandle {
    pub fn show(&self, message: impl Into<AttrValue>) {
        self.message.set(Some(message.into()));
    }

    pub fn clear(&self) {
        self.message.set(None);
    }

    pub fn message(&self) -> Option<AttrValue> {
        (*self.message).clone()
    }
}

/// Holds a success banner that hides itself after a few seconds
#[hook]
pub fn use_banner() -> BannerHandle {
    let message: UseStateHandle<Option<AttrValue>> = use_state_eq(|| None);
    let timeout = {
        let message = message.clone();
        use_timeout(move || message.set(None), BANNER_DISMISS_MS)
    };
    {
        let timeout = timeout.clone();
        use_effect_with((*message).clone(), move |message| {
            if message.is_some() {
                timeout.reset();
            } else {
                timeout.cancel();
            }
        });
    }
    BannerHandle { message }
}

/// Holds an inline error message
#[hook]
pub fn use_error() -> UseStateHandle<Option<AttrValue>> {
    use_state_eq(|| None)
}
