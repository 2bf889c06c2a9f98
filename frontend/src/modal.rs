use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub type ActionFuture = Pin<Box<dyn Future<Output = ()>>>;
pub type ConfirmAction = Rc<dyn Fn() -> ActionFuture>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Warning,
}

impl ModalKind {
    fn accent(self) -> &'static str {
        match self {
            ModalKind::Info => "border-t-4 border-[#1D617A]",
            ModalKind::Warning => "border-t-4 border-amber-500",
        }
    }
}

#[derive(Clone)]
pub struct ModalConfig {
    pub title: String,
    pub message: String,
    pub kind: ModalKind,
    pub on_confirm: Option<ConfirmAction>,
}

impl ModalConfig {
    /// Informational modal with a single OK button.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: ModalKind::Info,
            on_confirm: None,
        }
    }

    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: ModalKind,
        action: ConfirmAction,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            on_confirm: Some(action),
        }
    }
}

impl PartialEq for ModalConfig {
    fn eq(&self, other: &Self) -> bool {
        let same_action = match (&self.on_confirm, &other.on_confirm) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_action
            && self.title == other.title
            && self.message == other.message
            && self.kind == other.kind
    }
}

impl fmt::Debug for ModalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalConfig")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("on_confirm", &self.on_confirm.is_some())
            .finish()
    }
}

/// The one confirmation modal of the page. A single slot: opening replaces
/// whatever is shown, so there is never more than one.
///
/// `generation` increases on every open, letting a finished confirm action
/// close its own modal without touching one opened in the meantime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub generation: u64,
    pub current: Option<ModalConfig>,
}

pub enum ModalAction {
    Open(ModalConfig),
    Close,
    Settle(u64),
}

impl ModalState {
    pub fn visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending(&self) -> Option<(u64, ConfirmAction)> {
        let action = self.current.as_ref()?.on_confirm.clone()?;
        Some((self.generation, action))
    }

    fn closed(&self) -> Self {
        Self {
            generation: self.generation,
            current: None,
        }
    }
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ModalAction::Open(config) => Rc::new(Self {
                generation: self.generation + 1,
                current: Some(config),
            }),
            ModalAction::Close if self.visible() => Rc::new(self.closed()),
            ModalAction::Settle(generation) if generation == self.generation && self.visible() => {
                Rc::new(self.closed())
            }
            ModalAction::Close | ModalAction::Settle(_) => self,
        }
    }
}

#[function_component(Modal)]
pub fn modal() -> Html {
    let modal = use_context::<UseReducerHandle<ModalState>>();
    let Some(modal) = modal else {
        return html! {};
    };
    let Some(config) = modal.current.clone() else {
        return html! {};
    };

    let on_close = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.dispatch(ModalAction::Close))
    };

    // Runs the guarded call to completion before closing, so the modal stays
    // up for as long as the request is in flight.
    let on_confirm = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some((generation, action)) = modal.pending() {
                let dispatcher = modal.dispatcher();
                spawn_local(async move {
                    action().await;
                    dispatcher.dispatch(ModalAction::Settle(generation));
                });
            }
        })
    };

    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-overlay show fixed inset-0 bg-black/40 flex items-center justify-center z-50" onclick={on_close.clone()}>
            <div class={classes!("modal", "show", "bg-white", "rounded-[10px]", "shadow-lg", "w-full", "max-w-md", config.kind.accent())} onclick={keep_open}>
                <div class="modal-header flex items-center justify-between px-5 py-4 border-b border-border">
                    <h3 class="font-bold text-[#173E63]">{ config.title.clone() }</h3>
                    <button class="modal-close text-xl text-slate-400 hover:text-[#173E63]" onclick={on_close.clone()}>{"×"}</button>
                </div>
                <div class="modal-body px-5 py-4 text-sm text-foreground">
                    <p>{ config.message.clone() }</p>
                </div>
                <div class="modal-footer flex justify-end gap-3 px-5 py-4">
                    if config.on_confirm.is_some() {
                        <>
                            <button class="btn btn-secondary bg-[#D8E1E8] text-[#173E63] px-4 py-2 rounded-[10px] text-xs font-bold" onclick={on_close.clone()}>{"Cancelar"}</button>
                            <button id="confirm-action-btn" class="btn btn-primary bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold" onclick={on_confirm}>{"Confirmar"}</button>
                        </>
                    } else {
                        <button class="btn btn-primary bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-xs font-bold" onclick={on_close.clone()}>{"OK"}</button>
                    }
                </div>
            </div>
        </div>
    }
}
