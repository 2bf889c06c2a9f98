use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

pub const ENTER_DELAY_MS: u32 = 10;
pub const HOLD_MS: u32 = 3_000;
pub const FADE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Info => "ℹ",
        }
    }

    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success bg-green-50 border-green-200 text-green-700",
            ToastKind::Error => "toast-error bg-red-50 border-red-200 text-red-700",
            ToastKind::Info => "toast-info bg-slate-50 border-slate-200 text-[#173E63]",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastState {
    next_id: u64,
    pub toasts: Vec<ToastMessage>,
}

pub enum ToastAction {
    Push { message: String, kind: ToastKind },
    Remove(u64),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push { message, kind } => {
                next.toasts.push(ToastMessage {
                    id: next.next_id,
                    message,
                    kind,
                });
                next.next_id += 1;
            }
            ToastAction::Remove(id) => next.toasts.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
    Gone,
}

/// Where a toast is in its lifecycle `elapsed_ms` after it was pushed.
pub fn phase_at(elapsed_ms: u32) -> ToastPhase {
    if elapsed_ms < ENTER_DELAY_MS {
        ToastPhase::Entering
    } else if elapsed_ms < HOLD_MS {
        ToastPhase::Shown
    } else if elapsed_ms < HOLD_MS + FADE_MS {
        ToastPhase::Leaving
    } else {
        ToastPhase::Gone
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    toast: ToastMessage,
    on_expire: Callback<u64>,
}

// Each toast owns its timers, so stacked toasts expire independently.
#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let phase = use_state(|| ToastPhase::Entering);

    {
        let phase = phase.clone();
        let on_expire = props.on_expire.clone();
        use_effect_with_deps(
            move |id: &u64| {
                let id = *id;
                let enter = {
                    let phase = phase.clone();
                    Timeout::new(ENTER_DELAY_MS, move || phase.set(phase_at(ENTER_DELAY_MS)))
                };
                let leave = {
                    let phase = phase.clone();
                    Timeout::new(HOLD_MS, move || phase.set(phase_at(HOLD_MS)))
                };
                let expire = Timeout::new(HOLD_MS + FADE_MS, move || on_expire.emit(id));
                move || {
                    drop(enter);
                    drop(leave);
                    drop(expire);
                }
            },
            props.toast.id,
        );
    }

    let visibility = if *phase == ToastPhase::Shown {
        "show opacity-100 translate-y-0"
    } else {
        "opacity-0 translate-y-2"
    };

    html! {
        <div class={classes!("toast", "border", "rounded-[10px]", "shadow-md", "px-4", "py-3", "transition-all", "duration-300", props.toast.kind.class(), visibility)}>
            <div class="toast-content flex items-center gap-2 text-sm font-semibold">
                <span class="toast-icon">{ props.toast.kind.icon() }</span>
                <span class="toast-message">{ props.toast.message.clone() }</span>
            </div>
        </div>
    }
}

#[function_component(ToastStack)]
pub fn toast_stack() -> Html {
    let toasts = use_context::<UseReducerHandle<ToastState>>();
    let Some(toasts) = toasts else {
        return html! {};
    };

    let on_expire = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| toasts.dispatch(ToastAction::Remove(id)))
    };

    html! {
        <div class="fixed bottom-6 right-6 flex flex-col gap-2 z-50">
            { for toasts.toasts.iter().map(|t| html! {
                <Toast key={t.id} toast={t.clone()} on_expire={on_expire.clone()} />
            }) }
        </div>
    }
}
