use yew::prelude::*;

use crate::actions::Mutation;
use crate::icons::{icon, Icon};
use crate::models::{parse_valor, NovaDespesa, NovaMeta, NovaReceita};

pub const MSG_INCOMPLETE: &str = "Preencha todos os campos.";
pub const MSG_VALOR: &str = "Informe um valor positivo.";
pub const MSG_PARCELAS: &str = "Número de parcelas inválido.";
pub const MSG_PERIODO: &str = "A data final deve ser igual ou posterior à data inicial.";

const CATEGORIAS_RECEITA: [&str; 4] = ["Salário", "Freelance", "Investimentos", "Outros"];
const TIPOS_META: [&str; 3] = ["Economia", "Investimento", "Reserva de Emergência"];

/// A create request handed to the app. `on_done` receives whether the
/// backend accepted it, once the refresh that follows has finished.
pub struct Submission {
    pub mutation: Mutation,
    pub on_done: Callback<bool>,
}

fn filled(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceitaInput {
    pub descricao: String,
    pub valor: String,
    pub data: String,
    pub categoria: String,
}

impl Default for ReceitaInput {
    fn default() -> Self {
        Self {
            descricao: String::new(),
            valor: String::new(),
            data: String::new(),
            categoria: CATEGORIAS_RECEITA[0].to_string(),
        }
    }
}

impl ReceitaInput {
    pub fn validate(&self) -> Result<NovaReceita, &'static str> {
        if !filled(&[&self.descricao, &self.valor, &self.data, &self.categoria]) {
            return Err(MSG_INCOMPLETE);
        }
        let valor = parse_valor(&self.valor).ok_or(MSG_VALOR)?;
        Ok(NovaReceita {
            descricao: self.descricao.trim().to_string(),
            valor,
            data: self.data.clone(),
            categoria: self.categoria.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DespesaInput {
    pub descricao: String,
    pub valor_total: String,
    pub total_parcelas: String,
    pub data_primeira_parcela: String,
    pub categoria: String,
}

impl Default for DespesaInput {
    fn default() -> Self {
        Self {
            descricao: String::new(),
            valor_total: String::new(),
            total_parcelas: "1".to_string(),
            data_primeira_parcela: String::new(),
            categoria: String::new(),
        }
    }
}

impl DespesaInput {
    pub fn validate(&self) -> Result<NovaDespesa, &'static str> {
        if !filled(&[
            &self.descricao,
            &self.valor_total,
            &self.total_parcelas,
            &self.data_primeira_parcela,
            &self.categoria,
        ]) {
            return Err(MSG_INCOMPLETE);
        }
        let valor_total = parse_valor(&self.valor_total).ok_or(MSG_VALOR)?;
        let total_parcelas = match self.total_parcelas.trim().parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(MSG_PARCELAS),
        };
        Ok(NovaDespesa {
            descricao: self.descricao.trim().to_string(),
            valor_total,
            total_parcelas,
            data_primeira_parcela: self.data_primeira_parcela.clone(),
            categoria: self.categoria.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaInput {
    pub descricao: String,
    pub tipo: String,
    pub valor_meta: String,
    pub data_inicio: String,
    pub data_fim: String,
}

impl Default for MetaInput {
    fn default() -> Self {
        Self {
            descricao: String::new(),
            tipo: TIPOS_META[0].to_string(),
            valor_meta: String::new(),
            data_inicio: String::new(),
            data_fim: String::new(),
        }
    }
}

impl MetaInput {
    pub fn validate(&self) -> Result<NovaMeta, &'static str> {
        if !filled(&[
            &self.descricao,
            &self.tipo,
            &self.valor_meta,
            &self.data_inicio,
            &self.data_fim,
        ]) {
            return Err(MSG_INCOMPLETE);
        }
        let valor_meta = parse_valor(&self.valor_meta).ok_or(MSG_VALOR)?;
        // <input type="date"> yields ISO dates, which order lexicographically.
        if self.data_fim < self.data_inicio {
            return Err(MSG_PERIODO);
        }
        Ok(NovaMeta {
            descricao: self.descricao.trim().to_string(),
            tipo: self.tipo.clone(),
            valor_meta,
            data_inicio: self.data_inicio.clone(),
            data_fim: self.data_fim.clone(),
        })
    }
}

fn bind_input<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, input.value());
        state.set(next);
    })
}

fn bind_select<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, select.value());
        state.set(next);
    })
}

fn submit_handler<T: Clone + Default + 'static>(
    input: &UseStateHandle<T>,
    form_error: &UseStateHandle<Option<String>>,
    saving: &UseStateHandle<bool>,
    on_submit: &Callback<Submission>,
    build: fn(&T) -> Result<Mutation, &'static str>,
) -> Callback<SubmitEvent> {
    let input = input.clone();
    let form_error = form_error.clone();
    let saving = saving.clone();
    let on_submit = on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        match build(&*input) {
            Err(msg) => form_error.set(Some(msg.to_string())),
            Ok(mutation) => {
                form_error.set(None);
                saving.set(true);
                let on_done = {
                    let input = input.clone();
                    let saving = saving.clone();
                    Callback::from(move |accepted: bool| {
                        saving.set(false);
                        if accepted {
                            input.set(T::default());
                        }
                    })
                };
                on_submit.emit(Submission { mutation, on_done });
            }
        }
    })
}

fn field(label: &'static str, control: Html) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
            { control }
        </div>
    }
}

fn form_footer(label: &'static str, saving: bool, form_error: &Option<String>) -> Html {
    html! {
        <>
            <button type="submit" class="w-full bg-[#173E63] text-white py-2 rounded-[10px] text-[10px] font-bold flex items-center justify-center gap-2" disabled={saving}>
                { icon(Icon::Plus, 16) }
                { if saving { "Salvando..." } else { label } }
            </button>
            if let Some(msg) = form_error {
                <p class="text-sm text-red-500 mt-3">{ msg.clone() }</p>
            }
        </>
    }
}

const INPUT_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none";

#[derive(Properties, PartialEq)]
pub struct FormProps {
    pub on_submit: Callback<Submission>,
}

#[function_component(ReceitaForm)]
pub fn receita_form(props: &FormProps) -> Html {
    let input = use_state(ReceitaInput::default);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = submit_handler(&input, &form_error, &saving, &props.on_submit, |i| {
        i.validate().map(Mutation::CreateReceita)
    });

    html! {
        <form class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50 space-y-4" onsubmit={on_submit}>
            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Nova Receita"}</h4>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                { field("Descrição", html! {
                    <input type="text" placeholder="Fonte da receita" value={input.descricao.clone()} oninput={bind_input(&input, |i, v| i.descricao = v)} class={INPUT_CLASS} />
                }) }
                { field("Valor (R$)", html! {
                    <input type="number" step="0.01" placeholder="0.00" value={input.valor.clone()} oninput={bind_input(&input, |i, v| i.valor = v)} class={INPUT_CLASS} />
                }) }
                { field("Data", html! {
                    <input type="date" value={input.data.clone()} oninput={bind_input(&input, |i, v| i.data = v)} class={INPUT_CLASS} />
                }) }
                { field("Categoria", html! {
                    <select onchange={bind_select(&input, |i, v| i.categoria = v)} class={INPUT_CLASS}>
                        { for CATEGORIAS_RECEITA.iter().map(|c| html! {
                            <option value={*c} selected={input.categoria == *c}>{ *c }</option>
                        }) }
                    </select>
                }) }
            </div>
            { form_footer("Adicionar Receita", *saving, &form_error) }
        </form>
    }
}

#[function_component(DespesaForm)]
pub fn despesa_form(props: &FormProps) -> Html {
    let input = use_state(DespesaInput::default);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = submit_handler(&input, &form_error, &saving, &props.on_submit, |i| {
        i.validate().map(Mutation::CreateDespesa)
    });

    html! {
        <form class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50 space-y-4" onsubmit={on_submit}>
            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Nova Despesa"}</h4>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-3">
                { field("Descrição", html! {
                    <input type="text" placeholder="Descrição da despesa" value={input.descricao.clone()} oninput={bind_input(&input, |i, v| i.descricao = v)} class={INPUT_CLASS} />
                }) }
                { field("Valor total (R$)", html! {
                    <input type="number" step="0.01" placeholder="0.00" value={input.valor_total.clone()} oninput={bind_input(&input, |i, v| i.valor_total = v)} class={INPUT_CLASS} />
                }) }
                { field("Parcelas", html! {
                    <input type="number" min="1" step="1" value={input.total_parcelas.clone()} oninput={bind_input(&input, |i, v| i.total_parcelas = v)} class={INPUT_CLASS} />
                }) }
                { field("Primeiro vencimento", html! {
                    <input type="date" value={input.data_primeira_parcela.clone()} oninput={bind_input(&input, |i, v| i.data_primeira_parcela = v)} class={INPUT_CLASS} />
                }) }
                { field("Categoria", html! {
                    <input type="text" placeholder="Categoria" value={input.categoria.clone()} oninput={bind_input(&input, |i, v| i.categoria = v)} class={INPUT_CLASS} />
                }) }
            </div>
            { form_footer("Adicionar Despesa", *saving, &form_error) }
        </form>
    }
}

#[function_component(MetaForm)]
pub fn meta_form(props: &FormProps) -> Html {
    let input = use_state(MetaInput::default);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = submit_handler(&input, &form_error, &saving, &props.on_submit, |i| {
        i.validate().map(Mutation::CreateMeta)
    });

    html! {
        <form class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50 space-y-4" onsubmit={on_submit}>
            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Nova Meta"}</h4>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-3">
                { field("Descrição", html! {
                    <input type="text" placeholder="ex. Viagem" value={input.descricao.clone()} oninput={bind_input(&input, |i, v| i.descricao = v)} class={INPUT_CLASS} />
                }) }
                { field("Tipo", html! {
                    <select onchange={bind_select(&input, |i, v| i.tipo = v)} class={INPUT_CLASS}>
                        { for TIPOS_META.iter().map(|t| html! {
                            <option value={*t} selected={input.tipo == *t}>{ *t }</option>
                        }) }
                    </select>
                }) }
                { field("Valor da meta (R$)", html! {
                    <input type="number" step="0.01" placeholder="0.00" value={input.valor_meta.clone()} oninput={bind_input(&input, |i, v| i.valor_meta = v)} class={INPUT_CLASS} />
                }) }
                { field("Início", html! {
                    <input type="date" value={input.data_inicio.clone()} oninput={bind_input(&input, |i, v| i.data_inicio = v)} class={INPUT_CLASS} />
                }) }
                { field("Fim", html! {
                    <input type="date" value={input.data_fim.clone()} oninput={bind_input(&input, |i, v| i.data_fim = v)} class={INPUT_CLASS} />
                }) }
            </div>
            { form_footer("Adicionar Meta", *saving, &form_error) }
        </form>
    }
}
