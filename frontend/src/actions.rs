//! Fetch-and-render and mutation workflows.
//!
//! Nothing here touches the DOM: results are pushed into a [`ViewSink`],
//! which the app implements on top of its component state. Every mutation
//! refreshes from the server afterwards; nothing is applied optimistically.

use std::rc::Rc;

use crate::api::FinanceApi;
use crate::errors::ApiError;
use crate::modal::{ActionFuture, ConfirmAction, ModalConfig, ModalKind};
use crate::models::{Meta, NovaDespesa, NovaMeta, NovaReceita, Parcela, Receita, Resumo};
use crate::toast::ToastKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Receitas,
    Despesas,
    Metas,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Receitas, Section::Despesas, Section::Metas];

    pub fn name(self) -> &'static str {
        match self {
            Section::Receitas => "receitas",
            Section::Despesas => "despesas",
            Section::Metas => "metas",
        }
    }

    pub fn loading_text(self) -> String {
        format!("Carregando {}...", self.name())
    }

    pub fn failure_text(self, error: &ApiError) -> String {
        error.describe(&format!("Erro ao carregar {}", self.name()))
    }
}

/// What a section container currently shows. Each fetch replaces it whole.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Receitas(ViewState<Vec<Receita>>),
    Despesas(ViewState<Vec<Parcela>>),
    Metas(ViewState<Vec<Meta>>),
    Resumo(ViewState<Resumo>),
}

pub trait ViewSink {
    fn show(&self, update: ViewUpdate);
    fn notify(&self, message: String, kind: ToastKind);
}

fn settle<T>(
    label: &str,
    failure: impl FnOnce(&ApiError) -> String,
    result: Result<T, ApiError>,
) -> ViewState<T> {
    match result {
        Ok(value) => ViewState::Loaded(value),
        Err(e) => {
            if e.is_transport() {
                log::error!("Erro ao buscar {}: {}", label, e);
            } else {
                log::warn!("backend rejected {} listing: {}", label, e);
            }
            ViewState::Failed(failure(&e))
        }
    }
}

/// Shows the loading placeholder, fetches the whole collection and replaces
/// the placeholder with either the items or an error text.
pub async fn load_section<A, S>(api: &A, section: Section, sink: &S)
where
    A: FinanceApi + ?Sized,
    S: ViewSink + ?Sized,
{
    let label = section.name();
    let failure = |e: &ApiError| section.failure_text(e);
    match section {
        Section::Receitas => {
            sink.show(ViewUpdate::Receitas(ViewState::Loading));
            let state = settle(label, failure, api.list_receitas().await);
            sink.show(ViewUpdate::Receitas(state));
        }
        Section::Despesas => {
            sink.show(ViewUpdate::Despesas(ViewState::Loading));
            let state = settle(label, failure, api.list_despesas().await);
            sink.show(ViewUpdate::Despesas(state));
        }
        Section::Metas => {
            sink.show(ViewUpdate::Metas(ViewState::Loading));
            let state = settle(label, failure, api.list_metas().await);
            sink.show(ViewUpdate::Metas(state));
        }
    }
}

pub async fn load_dashboard<A, S>(api: &A, sink: &S)
where
    A: FinanceApi + ?Sized,
    S: ViewSink + ?Sized,
{
    sink.show(ViewUpdate::Resumo(ViewState::Loading));
    let state = settle(
        "resumo",
        |e| e.describe("Erro ao carregar resumo"),
        api.resumo().await,
    );
    sink.show(ViewUpdate::Resumo(state));
}

/// Initial page load: summary first, then every section in order.
pub async fn load_all<A, S>(api: &A, sink: &S)
where
    A: FinanceApi + ?Sized,
    S: ViewSink + ?Sized,
{
    load_dashboard(api, sink).await;
    for section in Section::ALL {
        load_section(api, section, sink).await;
    }
}

/// A state transition requested from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    DeleteReceita(i64),
    DeleteDespesa(i64),
    PayParcela(i64),
    AddToMeta { id: i64, valor: f64 },
    DeleteMeta(i64),
    CreateReceita(NovaReceita),
    CreateDespesa(NovaDespesa),
    CreateMeta(NovaMeta),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
    pub kind: ModalKind,
}

impl Mutation {
    pub fn section(&self) -> Section {
        match self {
            Mutation::DeleteReceita(_) | Mutation::CreateReceita(_) => Section::Receitas,
            Mutation::DeleteDespesa(_) | Mutation::PayParcela(_) | Mutation::CreateDespesa(_) => {
                Section::Despesas
            }
            Mutation::AddToMeta { .. } | Mutation::DeleteMeta(_) | Mutation::CreateMeta(_) => {
                Section::Metas
            }
        }
    }

    /// Destructive and status-changing mutations go through the modal first.
    pub fn confirmation(&self) -> Option<Confirmation> {
        let confirmation = match self {
            Mutation::DeleteReceita(_) => Confirmation {
                title: "Confirmar Exclusão",
                message: "Tem certeza que deseja excluir esta receita? Esta ação não pode ser desfeita.",
                kind: ModalKind::Warning,
            },
            Mutation::DeleteDespesa(_) => Confirmation {
                title: "Confirmar Exclusão",
                message: "Tem certeza que deseja excluir esta despesa?",
                kind: ModalKind::Warning,
            },
            Mutation::PayParcela(_) => Confirmation {
                title: "Confirmar Pagamento",
                message: "Tem certeza que deseja marcar esta parcela como paga?",
                kind: ModalKind::Info,
            },
            Mutation::DeleteMeta(_) => Confirmation {
                title: "Confirmar Exclusão",
                message: "Tem certeza que deseja excluir esta meta?",
                kind: ModalKind::Warning,
            },
            Mutation::AddToMeta { .. }
            | Mutation::CreateReceita(_)
            | Mutation::CreateDespesa(_)
            | Mutation::CreateMeta(_) => return None,
        };
        Some(confirmation)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::DeleteReceita(_) => "Receita excluída com sucesso!",
            Mutation::DeleteDespesa(_) => "Despesa excluída com sucesso!",
            Mutation::PayParcela(_) => "Parcela marcada como paga com sucesso!",
            Mutation::AddToMeta { .. } => "Valor adicionado à meta com sucesso!",
            Mutation::DeleteMeta(_) => "Meta excluída com sucesso!",
            Mutation::CreateReceita(_) => "Receita cadastrada com sucesso!",
            Mutation::CreateDespesa(_) => "Despesa cadastrada com sucesso!",
            Mutation::CreateMeta(_) => "Meta cadastrada com sucesso!",
        }
    }

    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Mutation::DeleteReceita(_) => "Erro ao excluir receita",
            Mutation::DeleteDespesa(_) => "Erro ao excluir despesa",
            Mutation::PayParcela(_) => "Erro ao marcar parcela como paga",
            Mutation::AddToMeta { .. } => "Erro ao adicionar valor à meta",
            Mutation::DeleteMeta(_) => "Erro ao excluir meta",
            Mutation::CreateReceita(_) => "Erro ao cadastrar receita",
            Mutation::CreateDespesa(_) => "Erro ao cadastrar despesa",
            Mutation::CreateMeta(_) => "Erro ao cadastrar meta",
        }
    }

    async fn send<A: FinanceApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        match self {
            Mutation::DeleteReceita(id) => api.delete_receita(*id).await,
            Mutation::DeleteDespesa(despesa_id) => api.delete_despesa(*despesa_id).await,
            Mutation::PayParcela(id) => api.pay_parcela(*id).await,
            Mutation::AddToMeta { id, valor } => api.add_to_meta(*id, *valor).await,
            Mutation::DeleteMeta(id) => api.delete_meta(*id).await,
            Mutation::CreateReceita(nova) => api.create_receita(nova).await,
            Mutation::CreateDespesa(nova) => api.create_despesa(nova).await,
            Mutation::CreateMeta(nova) => api.create_meta(nova).await,
        }
    }
}

/// Issues the mutation, then on success re-fetches the affected section and
/// the dashboard, strictly in that order. Failures end up in a toast and
/// leave the views as they were.
pub async fn perform<A, S>(api: &A, mutation: &Mutation, sink: &S) -> Result<(), ApiError>
where
    A: FinanceApi + ?Sized,
    S: ViewSink + ?Sized,
{
    match mutation.send(api).await {
        Ok(()) => {
            log::info!("{:?} accepted", mutation);
            sink.notify(mutation.success_message().to_string(), ToastKind::Success);
            load_section(api, mutation.section(), sink).await;
            load_dashboard(api, sink).await;
            Ok(())
        }
        Err(e) => {
            log::warn!("{:?} failed: {}", mutation, e);
            sink.notify(e.describe(mutation.failure_prefix()), ToastKind::Error);
            Err(e)
        }
    }
}

/// Wraps `perform` into the deferred action a confirmation modal runs.
/// Nothing is sent until the action is invoked.
pub fn confirm_action<A, S>(api: Rc<A>, mutation: Mutation, sink: S) -> ConfirmAction
where
    A: FinanceApi + ?Sized + 'static,
    S: ViewSink + Clone + 'static,
{
    Rc::new(move || {
        let api = api.clone();
        let mutation = mutation.clone();
        let sink = sink.clone();
        let future: ActionFuture = Box::pin(async move {
            let _ = perform(&*api, &mutation, &sink).await;
        });
        future
    })
}

/// The modal guarding `mutation`, or `None` when it submits directly.
pub fn confirmation_modal<A, S>(api: Rc<A>, mutation: Mutation, sink: S) -> Option<ModalConfig>
where
    A: FinanceApi + ?Sized + 'static,
    S: ViewSink + Clone + 'static,
{
    let confirmation = mutation.confirmation()?;
    let action = confirm_action(api, mutation, sink);
    Some(ModalConfig::confirm(
        confirmation.title,
        confirmation.message,
        confirmation.kind,
        action,
    ))
}
