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
//! The dialogs of the app and the layer that stacks them over the page

use std::mem::discriminant;
use std::rc::Rc;

use yew::prelude::*;

use crate::components::icon::{Icon, IconType};

pub mod about;
pub mod confirm;
pub mod settings;

use about::AboutModal;
use confirm::ConfirmModal;
use settings::SettingsModal;

#[derive(Clone, PartialEq)]
pub enum Modal {
    /// Asks before running a destructive admin action
    Confirm { message: AttrValue, on_confirm: Callback<()> },
    About,
    Settings,
}

impl Modal {
    pub fn confirm(message: impl Into<AttrValue>, on_confirm: Callback<()>) -> Self {
        Self::Confirm { message: message.into(), on_confirm }
    }

    /// Confirmations may pile up, the info dialogs are only ever open once
    fn stacks(&self) -> bool {
        matches!(self, Self::Confirm { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Confirm { .. } => "Confirm",
            Self::About => "About",
            Self::Settings => "Settings",
        }
    }

    fn view(&self, on_close: &Callback<()>) -> Html {
        match self {
            Self::Confirm { message, on_confirm } => html! {
                <ConfirmModal message={message.clone()} on_confirm={on_confirm.clone()} on_close={on_close.clone()} />
            },
            Self::About => html! {<AboutModal />},
            Self::Settings => html! {<SettingsModal />},
        }
    }
}

pub enum ModalAction {
    Show(Modal),
    Dismiss,
    DismissAll,
}

/// Open dialogs, the last one is on top
#[derive(Default, PartialEq)]
struct OpenModals(Vec<Modal>);

impl OpenModals {
    fn apply(&mut self, action: ModalAction) {
        match action {
            ModalAction::Show(modal) => {
                if !modal.stacks() {
                    self.0.retain(|open| discriminant(open) != discriminant(&modal));
                }
                self.0.push(modal);
            },
            ModalAction::Dismiss => {
                self.0.pop();
            },
            ModalAction::DismissAll => self.0.clear(),
        }
    }
}

impl Reducible for OpenModals {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: ModalAction) -> Rc<Self> {
        let mut next = Self(self.0.clone());
        next.apply(action);
        next.into()
    }
}

pub type ModalControls = Callback<ModalAction>;

#[derive(Properties, PartialEq)]
pub struct ModalLayerProps {
    #[prop_or_default]
    pub children: Html,
}

/// Provides [`ModalControls`] to the page and draws the open dialogs over it
#[function_component]
pub fn ModalLayer(props: &ModalLayerProps) -> Html {
    let open = use_reducer(OpenModals::default);
    let controls: ModalControls = {
        let open = open.clone();
        use_callback((), move |action, ()| open.dispatch(action))
    };
    let dismiss = use_callback(controls.clone(), |(), controls| controls.emit(ModalAction::Dismiss));
    let dismiss_click = dismiss.reform(|_: MouseEvent| ());

    let depth = open.0.len();
    html! {
        <ContextProvider<ModalControls> context={controls}>
            {props.children.clone()}
            {for open.0.iter().enumerate().map(|(i, modal)| {
                let on_top = i + 1 == depth;
                html! {
                    <div class="modal-container" style={format!("z-index: {};", i + 1)} key={i} aria-hidden={(!on_top).to_string()}>
                        <div class="modal-background" onclick={dismiss_click.clone()} />
                        <div class="modal-content" role="dialog" aria-label={modal.label()}>
                            <span class="modal-close clickable" onclick={dismiss_click.clone()}>
                                <Icon r#type={IconType::Close} tooltip={format!("Close {}", modal.label().to_lowercase())} />
                            </span>
                            {modal.view(&dismiss)}
                        </div>
                    </div>
                }
            })}
        </ContextProvider<ModalControls>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(actions: impl IntoIterator<Item = ModalAction>) -> Vec<&'static str> {
        let mut modals = OpenModals::default();
        for action in actions {
            modals.apply(action);
        }
        modals.0.iter().map(Modal::label).collect()
    }

    #[test]
    fn info_dialogs_are_not_duplicated() {
        let shown = open([
            ModalAction::Show(Modal::Settings),
            ModalAction::Show(Modal::About),
            ModalAction::Show(Modal::Settings),
        ]);
        assert_eq!(shown, ["About", "Settings"]);
    }

    #[test]
    fn confirmations_stack_and_dismiss_from_the_top() {
        let noop = Callback::from(|()| ());
        let shown = open([
            ModalAction::Show(Modal::About),
            ModalAction::Show(Modal::confirm("Delete genre \"Action\"?", noop.clone())),
            ModalAction::Show(Modal::confirm("Delete this comment permanently?", noop)),
            ModalAction::Dismiss,
        ]);
        assert_eq!(shown, ["About", "Confirm"]);

        assert!(open([ModalAction::Show(Modal::Settings), ModalAction::DismissAll]).is_empty());
        assert!(open([ModalAction::Dismiss]).is_empty());
    }
}
