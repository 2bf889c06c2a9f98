use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::actions::{
    confirmation_modal, load_all, perform, Mutation, ViewSink, ViewState, ViewUpdate,
};
use crate::api::HttpApi;
use crate::config::API_BASE_URL;
use crate::forms::{DespesaForm, MetaForm, ReceitaForm, Submission};
use crate::icons::Icon;
use crate::modal::{Modal, ModalAction, ModalState};
use crate::models::{Meta, Parcela, Receita, Resumo};
use crate::sections::{section_shell, Dashboard, DespesasTable, MetasCards, ReceitasTable};
use crate::toast::{ToastAction, ToastKind, ToastStack, ToastState};

/// Component state the workflows render into.
#[derive(Clone)]
struct Screen {
    receitas: UseStateHandle<ViewState<Vec<Receita>>>,
    despesas: UseStateHandle<ViewState<Vec<Parcela>>>,
    metas: UseStateHandle<ViewState<Vec<Meta>>>,
    resumo: UseStateHandle<ViewState<Resumo>>,
    toasts: UseReducerDispatcher<ToastState>,
}

impl ViewSink for Screen {
    fn show(&self, update: ViewUpdate) {
        match update {
            ViewUpdate::Receitas(state) => self.receitas.set(state),
            ViewUpdate::Despesas(state) => self.despesas.set(state),
            ViewUpdate::Metas(state) => self.metas.set(state),
            ViewUpdate::Resumo(state) => self.resumo.set(state),
        }
    }

    fn notify(&self, message: String, kind: ToastKind) {
        self.toasts.dispatch(ToastAction::Push { message, kind });
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let api: Rc<HttpApi> = use_memo(|_| HttpApi::new(API_BASE_URL), ());

    let receitas = use_state(ViewState::<Vec<Receita>>::default);
    let despesas = use_state(ViewState::<Vec<Parcela>>::default);
    let metas = use_state(ViewState::<Vec<Meta>>::default);
    let resumo = use_state(ViewState::<Resumo>::default);
    let modal = use_reducer(ModalState::default);
    let toasts = use_reducer(ToastState::default);

    let screen = Screen {
        receitas: receitas.clone(),
        despesas: despesas.clone(),
        metas: metas.clone(),
        resumo: resumo.clone(),
        toasts: toasts.dispatcher(),
    };

    {
        let api = api.clone();
        let screen = screen.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    load_all(&*api, &screen).await;
                });
                || ()
            },
            (),
        );
    }

    // Deletes and payments wait behind the confirmation modal; the rest go
    // straight to the backend.
    let on_request = {
        let api = api.clone();
        let screen = screen.clone();
        let modal = modal.dispatcher();
        Callback::from(move |mutation: Mutation| {
            match confirmation_modal(api.clone(), mutation.clone(), screen.clone()) {
                Some(config) => modal.dispatch(ModalAction::Open(config)),
                None => {
                    let api = api.clone();
                    let screen = screen.clone();
                    spawn_local(async move {
                        let _ = perform(&*api, &mutation, &screen).await;
                    });
                }
            }
        })
    };

    let on_create = {
        let api = api.clone();
        let screen = screen.clone();
        Callback::from(move |submission: Submission| {
            let api = api.clone();
            let screen = screen.clone();
            spawn_local(async move {
                let accepted = perform(&*api, &submission.mutation, &screen).await.is_ok();
                submission.on_done.emit(accepted);
            });
        })
    };

    html! {
        <ContextProvider<UseReducerHandle<ModalState>> context={modal.clone()}>
            <ContextProvider<UseReducerHandle<ToastState>> context={toasts.clone()}>
                <div class="min-h-screen bg-background">
                    <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center gap-3 px-6">
                        <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Finanças Pessoais"}</span>
                    </header>
                    <main class="overflow-y-auto">
                        <Dashboard state={(*resumo).clone()} />
                        { section_shell("receitas", "Receitas", Icon::TrendingUp, html! {
                            <>
                                <ReceitaForm on_submit={on_create.clone()} />
                                <ReceitasTable state={(*receitas).clone()} on_request={on_request.clone()} />
                            </>
                        }) }
                        { section_shell("despesas", "Despesas", Icon::CreditCard, html! {
                            <>
                                <DespesaForm on_submit={on_create.clone()} />
                                <DespesasTable state={(*despesas).clone()} on_request={on_request.clone()} />
                            </>
                        }) }
                        { section_shell("metas", "Metas", Icon::Target, html! {
                            <>
                                <MetaForm on_submit={on_create.clone()} />
                                <MetasCards state={(*metas).clone()} on_request={on_request.clone()} />
                            </>
                        }) }
                    </main>
                    <Modal />
                    <ToastStack />
                </div>
            </ContextProvider<UseReducerHandle<ToastState>>>
        </ContextProvider<UseReducerHandle<ModalState>>>
    }
}
