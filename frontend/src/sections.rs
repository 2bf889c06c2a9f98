use yew::prelude::*;

use crate::actions::{Mutation, Section, ViewState};
use crate::format::{format_brl, format_percent};
use crate::icons::{icon, Icon};
use crate::modal::{ModalAction, ModalConfig, ModalState};
use crate::models::{parse_valor, Meta, Parcela, Receita, Resumo};

pub fn section_shell(id: &'static str, title: &'static str, glyph: Icon, children: Html) -> Html {
    html! {
        <section id={id} class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center gap-2 pb-4 border-b border-border text-[#173E63]">
                { icon(glyph, 22) }
                <h2 class="text-2xl font-bold">{ title }</h2>
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </section>
    }
}

fn placeholder_row(colspan: &'static str, text: String) -> Html {
    html! {
        <tr><td colspan={colspan} class="px-8 py-6 text-center text-muted-foreground">{ text }</td></tr>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryTileProps {
    label: &'static str,
    amount: f64,
    glyph: Icon,
}

// A negative balance is the only value that changes colour.
#[function_component(SummaryTile)]
fn summary_tile(props: &SummaryTileProps) -> Html {
    let tone = if props.amount < 0.0 {
        "text-red-600"
    } else {
        "text-[#1D617A]"
    };
    html! {
        <div class="bg-card p-5 rounded-[10px] shadow-sm border border-border flex items-center gap-4">
            <div class="p-3 bg-[#eef4f9] rounded-full text-[#173E63]">{ icon(props.glyph, 20) }</div>
            <div>
                <p class="text-muted-foreground text-[10px] font-bold uppercase tracking-widest">{ props.label }</p>
                <p class={classes!("text-xl", "font-black", tone)}>{ format_brl(props.amount) }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub state: ViewState<Resumo>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let body = match &props.state {
        ViewState::Loading => html! { <p class="text-muted-foreground">{"Carregando resumo..."}</p> },
        ViewState::Failed(text) => html! { <p class="text-red-600">{ text.clone() }</p> },
        ViewState::Loaded(resumo) => html! {
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <SummaryTile label="Receitas" amount={resumo.total_receitas} glyph={Icon::TrendingUp} />
                <SummaryTile label="Despesas" amount={resumo.total_despesas} glyph={Icon::CreditCard} />
                <SummaryTile label="Saldo" amount={resumo.saldo} glyph={Icon::Wallet} />
            </div>
        },
    };

    html! {
        <div id="dashboard" class="p-6 max-w-7xl mx-auto">
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReceitasTableProps {
    pub state: ViewState<Vec<Receita>>,
    pub on_request: Callback<Mutation>,
}

#[function_component(ReceitasTable)]
pub fn receitas_table(props: &ReceitasTableProps) -> Html {
    let rows = match &props.state {
        ViewState::Loading => placeholder_row("5", Section::Receitas.loading_text()),
        ViewState::Failed(text) => placeholder_row("5", text.clone()),
        ViewState::Loaded(receitas) => html! {
            { for receitas.iter().map(|receita| {
                let on_delete = {
                    let on_request = props.on_request.clone();
                    let id = receita.id;
                    Callback::from(move |_: MouseEvent| on_request.emit(Mutation::DeleteReceita(id)))
                };
                html! {
                    <tr key={receita.id} class="text-sm hover:bg-muted/40 transition-colors">
                        <td class="px-8 py-4 text-foreground">{ receita.descricao.clone() }</td>
                        <td class="px-8 py-4 font-semibold text-foreground">{ format_brl(receita.valor) }</td>
                        <td class="px-8 py-4 text-muted-foreground">{ receita.data.clone() }</td>
                        <td class="px-8 py-4">
                            <span class="bg-secondary text-secondary-foreground px-2.5 py-1 rounded-md text-[9px] font-bold">{ receita.categoria.clone() }</span>
                        </td>
                        <td class="px-8 py-4">
                            <button class="btn-delete text-red-600 text-xs font-bold" onclick={on_delete}>{"Excluir"}</button>
                        </td>
                    </tr>
                }
            }) }
        },
    };

    html! {
        <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
            <div class="overflow-x-auto">
                <table id="tabela-receitas" class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                            <th class="px-8 py-4 font-bold">{"Descrição"}</th>
                            <th class="px-8 py-4 font-bold">{"Valor"}</th>
                            <th class="px-8 py-4 font-bold">{"Data"}</th>
                            <th class="px-8 py-4 font-bold">{"Categoria"}</th>
                            <th class="px-8 py-4 font-bold">{"Ações"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { rows }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DespesasTableProps {
    pub state: ViewState<Vec<Parcela>>,
    pub on_request: Callback<Mutation>,
}

#[function_component(DespesasTable)]
pub fn despesas_table(props: &DespesasTableProps) -> Html {
    let rows = match &props.state {
        ViewState::Loading => placeholder_row("6", Section::Despesas.loading_text()),
        ViewState::Failed(text) => placeholder_row("6", text.clone()),
        ViewState::Loaded(parcelas) => html! {
            { for parcelas.iter().map(|parcela| {
                let on_pay = {
                    let on_request = props.on_request.clone();
                    let id = parcela.id;
                    Callback::from(move |_: MouseEvent| on_request.emit(Mutation::PayParcela(id)))
                };
                let on_delete = {
                    let on_request = props.on_request.clone();
                    let despesa_id = parcela.despesa_id;
                    Callback::from(move |_: MouseEvent| on_request.emit(Mutation::DeleteDespesa(despesa_id)))
                };
                html! {
                    <tr key={parcela.id} class="text-sm hover:bg-muted/40 transition-colors">
                        <td class="px-8 py-4 text-foreground">{ parcela.descricao_original.clone() }</td>
                        <td class="px-8 py-4 text-muted-foreground">{ parcela.rotulo_parcela() }</td>
                        <td class="px-8 py-4 font-semibold text-foreground">{ format_brl(parcela.valor) }</td>
                        <td class="px-8 py-4 text-muted-foreground">{ parcela.data_vencimento.clone() }</td>
                        <td class="px-8 py-4">
                            { parcela.status.to_string() }
                            if parcela.pode_pagar() {
                                <>
                                    { " " }
                                    <button class="btn-mark-paid bg-[#1D617A] text-white px-2 py-1 rounded-md text-[10px] font-bold" onclick={on_pay}>{"Pagar"}</button>
                                </>
                            }
                        </td>
                        <td class="px-8 py-4">
                            <button class="btn-delete text-red-600 text-xs font-bold" onclick={on_delete}>{"Excluir Despesa"}</button>
                        </td>
                    </tr>
                }
            }) }
        },
    };

    html! {
        <div class="bg-card rounded-[10px] shadow-md border border-border overflow-hidden">
            <div class="overflow-x-auto">
                <table id="tabela-despesas" class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                            <th class="px-8 py-4 font-bold">{"Descrição"}</th>
                            <th class="px-8 py-4 font-bold">{"Parcela"}</th>
                            <th class="px-8 py-4 font-bold">{"Valor"}</th>
                            <th class="px-8 py-4 font-bold">{"Vencimento"}</th>
                            <th class="px-8 py-4 font-bold">{"Status"}</th>
                            <th class="px-8 py-4 font-bold">{"Ações"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { rows }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MetasCardsProps {
    pub state: ViewState<Vec<Meta>>,
    pub on_request: Callback<Mutation>,
}

#[function_component(MetasCards)]
pub fn metas_cards(props: &MetasCardsProps) -> Html {
    let content = match &props.state {
        ViewState::Loading => html! { <p>{ Section::Metas.loading_text() }</p> },
        ViewState::Failed(text) => html! { <p>{ text.clone() }</p> },
        ViewState::Loaded(metas) if metas.is_empty() => html! { <p>{"Nenhuma meta cadastrada."}</p> },
        ViewState::Loaded(metas) => html! {
            { for metas.iter().map(|meta| html! {
                <MetaCard key={meta.id} meta={meta.clone()} on_request={props.on_request.clone()} />
            }) }
        },
    };

    html! {
        <div id="metas-cards" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
            { content }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MetaCardProps {
    pub meta: Meta,
    pub on_request: Callback<Mutation>,
}

#[function_component(MetaCard)]
pub fn meta_card(props: &MetaCardProps) -> Html {
    let valor = use_state(|| "".to_string());
    let modal = use_context::<UseReducerHandle<ModalState>>();

    let meta = &props.meta;
    let progresso = meta.progresso();

    let on_submit = {
        let valor = valor.clone();
        let on_request = props.on_request.clone();
        let id = meta.id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match parse_valor(&valor) {
                Some(amount) => {
                    on_request.emit(Mutation::AddToMeta { id, valor: amount });
                    valor.set("".to_string());
                }
                None => {
                    if let Some(modal) = &modal {
                        modal.dispatch(ModalAction::Open(ModalConfig::info(
                            "Valor inválido",
                            "Informe um valor positivo para adicionar à meta.",
                        )));
                    }
                }
            }
        })
    };

    let on_delete = {
        let on_request = props.on_request.clone();
        let id = meta.id;
        Callback::from(move |_: MouseEvent| on_request.emit(Mutation::DeleteMeta(id)))
    };

    html! {
        <div class="meta-card bg-white p-5 rounded-[10px] shadow-sm border border-border flex flex-col gap-4">
            <div class="meta-header flex justify-between items-start">
                <h4 class="text-lg font-black text-[#173E63] tracking-tight">{ meta.descricao.clone() }</h4>
                <span class="meta-tipo px-2 py-0.5 bg-[#dae3f0] rounded-full text-[9px] font-black text-[#173E63] uppercase tracking-wider">{ meta.tipo.clone() }</span>
            </div>
            <div class="meta-valores grid grid-cols-3 gap-2 text-xs">
                <div class="valor-info">
                    <span class="label block text-slate-400 font-bold">{"Atual:"}</span>
                    <span class="valor font-black text-[#1D617A]">{ format_brl(meta.atual()) }</span>
                </div>
                <div class="valor-info">
                    <span class="label block text-slate-400 font-bold">{"Meta:"}</span>
                    <span class="valor font-black text-[#173E63]">{ format_brl(meta.valor_meta) }</span>
                </div>
                <div class="valor-info">
                    <span class="label block text-slate-400 font-bold">{"Restante:"}</span>
                    <span class="valor valor-restante font-black text-[#173E63]/70">{ format_brl(meta.restante()) }</span>
                </div>
            </div>
            <div class="progress-container flex items-center gap-3">
                <div class="progress-bar flex-1 h-2 bg-slate-200 rounded-full overflow-hidden">
                    <div class="progress-fill h-full bg-[#173E63]" style={format!("width: {}%", progresso)}></div>
                </div>
                <span class="progress-text text-xs font-black text-[#173E63]">{ format_percent(progresso) }</span>
            </div>
            if meta.concluida() {
                <div class="p-2 rounded-lg bg-green-50 border border-green-200 text-green-700 text-xs font-bold">
                    {"Meta atingida!"}
                </div>
            }
            <div class="meta-periodo text-[10px] text-slate-400">
                <small>{ format!("Período: {} até {}", meta.data_inicio, meta.data_fim) }</small>
            </div>
            <div class="meta-actions flex flex-col gap-2">
                <form class="form-adicionar-valor flex gap-2" onsubmit={on_submit}>
                    <input type="number" step="0.01" placeholder="Valor a adicionar" required={true} value={(*valor).clone()} oninput={{
                        let valor = valor.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            valor.set(input.value());
                        })
                    }} class="flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                    <button type="submit" class="bg-[#173E63] text-white px-3 py-2 rounded-[10px] text-[10px] font-bold">{"Adicionar"}</button>
                </form>
                <button class="btn-delete text-red-600 text-xs font-bold self-end" onclick={on_delete}>{"Excluir Meta"}</button>
            </div>
        </div>
    }
}
