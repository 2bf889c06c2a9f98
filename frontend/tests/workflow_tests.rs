// ═══════════════════════════════════════════════════════════════════
// Workflow Tests — fetch-and-render, mutations, refresh ordering
// ═══════════════════════════════════════════════════════════════════

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use financas_frontend::actions::*;
use financas_frontend::api::FinanceApi;
use financas_frontend::errors::ApiError;
use financas_frontend::modal::{ModalAction, ModalKind, ModalState};
use financas_frontend::models::*;
use financas_frontend::toast::ToastKind;
use yew::functional::Reducible;

// ── Fakes ───────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeApi {
    calls: RefCell<Vec<String>>,
    receitas: RefCell<Vec<Receita>>,
    despesas: RefCell<Vec<Parcela>>,
    metas: RefCell<Vec<Meta>>,
    list_error: RefCell<Option<ApiError>>,
    mutation_error: RefCell<Option<ApiError>>,
}

impl FakeApi {
    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn listing<T: Clone>(&self, call: &str, items: &RefCell<Vec<T>>) -> Result<Vec<T>, ApiError> {
        self.record(call);
        match self.list_error.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(items.borrow().clone()),
        }
    }

    fn mutate(&self, call: String, apply: impl FnOnce()) -> Result<(), ApiError> {
        self.record(call);
        match self.mutation_error.borrow().clone() {
            Some(e) => Err(e),
            None => {
                apply();
                Ok(())
            }
        }
    }
}

#[async_trait(?Send)]
impl FinanceApi for FakeApi {
    async fn list_receitas(&self) -> Result<Vec<Receita>, ApiError> {
        self.listing("GET /receitas", &self.receitas)
    }

    async fn create_receita(&self, nova: &NovaReceita) -> Result<(), ApiError> {
        self.mutate("POST /receitas".into(), || {
            let mut receitas = self.receitas.borrow_mut();
            let id = receitas.len() as i64 + 1;
            receitas.push(Receita {
                id,
                descricao: nova.descricao.clone(),
                valor: nova.valor,
                data: nova.data.clone(),
                categoria: nova.categoria.clone(),
            });
        })
    }

    async fn delete_receita(&self, id: i64) -> Result<(), ApiError> {
        self.mutate(format!("DELETE /receitas/{}", id), || {
            self.receitas.borrow_mut().retain(|r| r.id != id)
        })
    }

    async fn list_despesas(&self) -> Result<Vec<Parcela>, ApiError> {
        self.listing("GET /despesas", &self.despesas)
    }

    async fn create_despesa(&self, _nova: &NovaDespesa) -> Result<(), ApiError> {
        self.mutate("POST /despesas".into(), || {})
    }

    async fn delete_despesa(&self, despesa_id: i64) -> Result<(), ApiError> {
        self.mutate(format!("DELETE /despesas/{}", despesa_id), || {
            self.despesas
                .borrow_mut()
                .retain(|p| p.despesa_id != despesa_id)
        })
    }

    async fn pay_parcela(&self, id: i64) -> Result<(), ApiError> {
        self.mutate(format!("PUT /parcelas/{}/status", id), || {
            for p in self.despesas.borrow_mut().iter_mut().filter(|p| p.id == id) {
                p.status = StatusParcela::Paga;
            }
        })
    }

    async fn list_metas(&self) -> Result<Vec<Meta>, ApiError> {
        self.listing("GET /metas", &self.metas)
    }

    async fn create_meta(&self, _nova: &NovaMeta) -> Result<(), ApiError> {
        self.mutate("POST /metas".into(), || {})
    }

    async fn add_to_meta(&self, id: i64, valor: f64) -> Result<(), ApiError> {
        self.mutate(format!("PUT /metas/{}/adicionar {}", id, valor), || {
            for m in self.metas.borrow_mut().iter_mut().filter(|m| m.id == id) {
                m.valor_atual = Some(m.atual() + valor);
            }
        })
    }

    async fn delete_meta(&self, id: i64) -> Result<(), ApiError> {
        self.mutate(format!("DELETE /metas/{}", id), || {
            self.metas.borrow_mut().retain(|m| m.id != id)
        })
    }

    async fn resumo(&self) -> Result<Resumo, ApiError> {
        self.record("GET /dashboard");
        let total_receitas = self.receitas.borrow().iter().map(|r| r.valor).sum::<f64>();
        let total_despesas = self.despesas.borrow().iter().map(|p| p.valor).sum::<f64>();
        Ok(Resumo {
            total_receitas,
            total_despesas,
            saldo: total_receitas - total_despesas,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Shown(ViewUpdate),
    Toast(String, ToastKind),
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Toast(msg, kind) => Some((msg, kind)),
                Event::Shown(_) => None,
            })
            .collect()
    }

    fn last_despesas(&self) -> Option<Vec<Parcela>> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Shown(ViewUpdate::Despesas(ViewState::Loaded(items))) => Some(items),
            _ => None,
        })
    }
}

impl ViewSink for RecordingSink {
    fn show(&self, update: ViewUpdate) {
        self.events.borrow_mut().push(Event::Shown(update));
    }

    fn notify(&self, message: String, kind: ToastKind) {
        self.events.borrow_mut().push(Event::Toast(message, kind));
    }
}

fn receita(id: i64, valor: f64) -> Receita {
    Receita {
        id,
        descricao: format!("Receita {}", id),
        valor,
        data: "2024-03-05".into(),
        categoria: "Salário".into(),
    }
}

fn parcela(id: i64, despesa_id: i64, numero: u32) -> Parcela {
    Parcela {
        id,
        despesa_id,
        descricao_original: "Notebook".into(),
        numero_parcela: numero,
        total_parcelas: 3,
        valor: 400.0,
        data_vencimento: "2024-05-10".into(),
        status: StatusParcela::EmAberto,
    }
}

fn fake() -> Rc<FakeApi> {
    let api = FakeApi::default();
    *api.receitas.borrow_mut() = vec![receita(1, 1000.0), receita(2, 250.0), receita(3, 80.0)];
    *api.despesas.borrow_mut() = vec![parcela(7, 3, 1), parcela(8, 3, 2), parcela(9, 4, 1)];
    *api.metas.borrow_mut() = vec![Meta {
        id: 5,
        descricao: "Viagem".into(),
        tipo: "Economia".into(),
        valor_atual: Some(50.0),
        valor_meta: 200.0,
        data_inicio: "2024-01-01".into(),
        data_fim: "2024-12-31".into(),
    }];
    Rc::new(api)
}

// ── Fetch-and-render ────────────────────────────────────────────────

mod fetch {
    use super::*;

    #[tokio::test]
    async fn placeholder_then_every_item() {
        let api = fake();
        let sink = RecordingSink::default();
        load_section(&*api, Section::Receitas, &sink).await;

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::Shown(ViewUpdate::Receitas(ViewState::Loading)));
        match &events[1] {
            Event::Shown(ViewUpdate::Receitas(ViewState::Loaded(items))) => {
                assert_eq!(items.len(), api.receitas.borrow().len());
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(api.calls(), vec!["GET /receitas"]);
    }

    #[tokio::test]
    async fn error_envelope_text_is_embedded() {
        let api = fake();
        *api.list_error.borrow_mut() = Some(ApiError::Application("tabela bloqueada".into()));
        let sink = RecordingSink::default();
        load_section(&*api, Section::Metas, &sink).await;

        assert_eq!(
            sink.events().last(),
            Some(&Event::Shown(ViewUpdate::Metas(ViewState::Failed(
                "Erro ao carregar metas: tabela bloqueada".into()
            ))))
        );
    }

    #[tokio::test]
    async fn transport_failure_reads_as_connection_error() {
        let api = fake();
        *api.list_error.borrow_mut() = Some(ApiError::Transport("Failed to fetch".into()));
        let sink = RecordingSink::default();
        load_section(&*api, Section::Despesas, &sink).await;

        assert_eq!(
            sink.events().last(),
            Some(&Event::Shown(ViewUpdate::Despesas(ViewState::Failed(
                "Erro de conexão: Failed to fetch".into()
            ))))
        );
        assert!(sink.toasts().is_empty());
    }

    #[tokio::test]
    async fn initial_load_order() {
        let api = fake();
        let sink = RecordingSink::default();
        load_all(&*api, &sink).await;
        assert_eq!(
            api.calls(),
            vec!["GET /dashboard", "GET /receitas", "GET /despesas", "GET /metas"]
        );
    }

    #[test]
    fn placeholder_texts() {
        assert_eq!(Section::Receitas.loading_text(), "Carregando receitas...");
        assert_eq!(Section::Despesas.loading_text(), "Carregando despesas...");
        assert_eq!(Section::Metas.loading_text(), "Carregando metas...");
    }
}

// ── Mutations ───────────────────────────────────────────────────────

mod mutations {
    use super::*;

    #[tokio::test]
    async fn confirmed_delete_refetches_then_refreshes_dashboard() {
        let api = fake();
        let sink = RecordingSink::default();
        let action = confirm_action(api.clone(), Mutation::DeleteReceita(2), sink.clone());
        assert!(api.calls().is_empty());

        action().await;

        assert_eq!(
            api.calls(),
            vec!["DELETE /receitas/2", "GET /receitas", "GET /dashboard"]
        );
        assert_eq!(
            sink.toasts(),
            vec![("Receita excluída com sucesso!".to_string(), ToastKind::Success)]
        );
        let events = sink.events();
        assert!(matches!(events[0], Event::Toast(..)));
        match &events[2] {
            Event::Shown(ViewUpdate::Receitas(ViewState::Loaded(items))) => {
                assert_eq!(items.len(), 2);
                assert!(items.iter().all(|r| r.id != 2));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(
            events.last(),
            Some(&Event::Shown(ViewUpdate::Resumo(ViewState::Loaded(Resumo {
                total_receitas: 1080.0,
                total_despesas: 1200.0,
                saldo: -120.0,
            }))))
        );
    }

    #[tokio::test]
    async fn paying_installment_hides_pay_button_after_refresh() {
        let api = fake();
        let sink = RecordingSink::default();
        perform(&*api, &Mutation::PayParcela(7), &sink).await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["PUT /parcelas/7/status", "GET /despesas", "GET /dashboard"]
        );
        let despesas = sink.last_despesas().unwrap();
        let paid = despesas.iter().find(|p| p.id == 7).unwrap();
        assert!(!paid.pode_pagar());
        assert!(despesas.iter().filter(|p| p.id != 7).all(|p| p.pode_pagar()));
    }

    #[tokio::test]
    async fn deleting_expense_uses_parent_id() {
        let api = fake();
        let sink = RecordingSink::default();
        perform(&*api, &Mutation::DeleteDespesa(3), &sink).await.unwrap();

        assert_eq!(api.calls()[0], "DELETE /despesas/3");
        let remaining = sink.last_despesas().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 9);
    }

    #[tokio::test]
    async fn failure_toasts_server_error_without_refresh() {
        let api = fake();
        *api.mutation_error.borrow_mut() =
            Some(ApiError::Application("Receita não encontrada".into()));
        let sink = RecordingSink::default();
        let result = perform(&*api, &Mutation::DeleteReceita(9), &sink).await;

        assert!(result.is_err());
        assert_eq!(api.calls(), vec!["DELETE /receitas/9"]);
        assert_eq!(
            sink.events(),
            vec![Event::Toast(
                "Erro ao excluir receita: Receita não encontrada".into(),
                ToastKind::Error
            )]
        );
    }

    #[tokio::test]
    async fn transport_failure_toast() {
        let api = fake();
        *api.mutation_error.borrow_mut() = Some(ApiError::Transport("Failed to fetch".into()));
        let sink = RecordingSink::default();
        let _ = perform(&*api, &Mutation::DeleteMeta(5), &sink).await;

        assert_eq!(
            sink.toasts(),
            vec![("Erro de conexão: Failed to fetch".to_string(), ToastKind::Error)]
        );
    }

    #[tokio::test]
    async fn adding_to_goal_submits_directly() {
        let api = fake();
        let sink = RecordingSink::default();
        let mutation = Mutation::AddToMeta { id: 5, valor: 50.0 };
        assert!(confirmation_modal(api.clone(), mutation.clone(), sink.clone()).is_none());

        perform(&*api, &mutation, &sink).await.unwrap();
        assert_eq!(
            api.calls(),
            vec!["PUT /metas/5/adicionar 50", "GET /metas", "GET /dashboard"]
        );
        let metas = sink
            .events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Event::Shown(ViewUpdate::Metas(ViewState::Loaded(items))) => Some(items),
                _ => None,
            })
            .unwrap();
        assert_eq!(metas[0].progresso(), 50.0);
    }

    #[tokio::test]
    async fn creating_income_refreshes_its_table() {
        let api = fake();
        let sink = RecordingSink::default();
        let nova = NovaReceita {
            descricao: "Freela".into(),
            valor: 600.0,
            data: "2024-03-20".into(),
            categoria: "Freelance".into(),
        };
        perform(&*api, &Mutation::CreateReceita(nova), &sink).await.unwrap();

        assert_eq!(api.calls(), vec!["POST /receitas", "GET /receitas", "GET /dashboard"]);
        assert_eq!(sink.toasts()[0].0, "Receita cadastrada com sucesso!");
    }

    #[test]
    fn only_destructive_mutations_need_confirmation() {
        assert_eq!(
            Mutation::DeleteReceita(1).confirmation().map(|c| c.kind),
            Some(ModalKind::Warning)
        );
        assert_eq!(
            Mutation::PayParcela(1).confirmation().map(|c| c.title),
            Some("Confirmar Pagamento")
        );
        assert!(Mutation::DeleteDespesa(1).confirmation().is_some());
        assert!(Mutation::DeleteMeta(1).confirmation().is_some());
        assert!(Mutation::AddToMeta { id: 1, valor: 1.0 }.confirmation().is_none());
    }

    #[test]
    fn mutations_map_to_their_section() {
        assert_eq!(Mutation::PayParcela(1).section(), Section::Despesas);
        assert_eq!(Mutation::DeleteDespesa(1).section(), Section::Despesas);
        assert_eq!(Mutation::AddToMeta { id: 1, valor: 1.0 }.section(), Section::Metas);
        assert_eq!(Mutation::DeleteReceita(1).section(), Section::Receitas);
    }
}

// ── Modal guarding ──────────────────────────────────────────────────

mod guarded {
    use super::*;

    fn open(
        state: Rc<ModalState>,
        api: &Rc<FakeApi>,
        sink: &RecordingSink,
        mutation: Mutation,
    ) -> Rc<ModalState> {
        let config = confirmation_modal(api.clone(), mutation, sink.clone()).unwrap();
        state.reduce(ModalAction::Open(config))
    }

    #[test]
    fn cancelling_sends_nothing() {
        let api = fake();
        let sink = RecordingSink::default();
        let state = open(Rc::new(ModalState::default()), &api, &sink, Mutation::DeleteReceita(1));
        assert!(state.visible());

        let state = state.reduce(ModalAction::Close);
        assert!(!state.visible());
        assert!(api.calls().is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn second_modal_replaces_first() {
        let api = fake();
        let sink = RecordingSink::default();
        let state = open(Rc::new(ModalState::default()), &api, &sink, Mutation::DeleteReceita(1));
        let state = open(state, &api, &sink, Mutation::PayParcela(7));

        let current = state.current.as_ref().unwrap();
        assert_eq!(current.title, "Confirmar Pagamento");
        assert_eq!(state.generation, 2);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn confirming_runs_action_then_settles() {
        let api = fake();
        let sink = RecordingSink::default();
        let state = open(Rc::new(ModalState::default()), &api, &sink, Mutation::DeleteMeta(5));

        let (generation, action) = state.pending().unwrap();
        action().await;
        assert_eq!(api.calls(), vec!["DELETE /metas/5", "GET /metas", "GET /dashboard"]);

        let state = state.reduce(ModalAction::Settle(generation));
        assert!(!state.visible());
    }
}
