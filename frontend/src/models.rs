use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ApiError;

pub const SUCCESS: &str = "success";

/// `{message, data|error}` wrapper used by every backend response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Envelope of a mutation; whatever `data` holds is ignored.
pub type Ack = Envelope<IgnoredAny>;

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS
    }

    /// Anything but `message == "success"` is a failure. The `error` field is
    /// surfaced, falling back to `message` when the backend omitted it.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Application(self.error.unwrap_or(self.message)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receita {
    pub id: i64,
    pub descricao: String,
    pub valor: f64,
    pub data: String,
    pub categoria: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusParcela {
    #[serde(rename = "em aberto")]
    EmAberto,
    #[serde(rename = "paga")]
    Paga,
    #[serde(other)]
    Desconhecido,
}

impl fmt::Display for StatusParcela {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusParcela::EmAberto => "em aberto",
            StatusParcela::Paga => "paga",
            StatusParcela::Desconhecido => "desconhecido",
        };
        f.write_str(label)
    }
}

/// One row of `GET /despesas`: a single installment of a parent expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcela {
    pub id: i64,
    pub despesa_id: i64,
    pub descricao_original: String,
    pub numero_parcela: u32,
    pub total_parcelas: u32,
    pub valor: f64,
    pub data_vencimento: String,
    pub status: StatusParcela,
}

impl Parcela {
    pub fn pode_pagar(&self) -> bool {
        self.status == StatusParcela::EmAberto
    }

    pub fn rotulo_parcela(&self) -> String {
        format!("{}/{}", self.numero_parcela, self.total_parcelas)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub id: i64,
    pub descricao: String,
    pub tipo: String,
    #[serde(default)]
    pub valor_atual: Option<f64>,
    pub valor_meta: f64,
    pub data_inicio: String,
    pub data_fim: String,
}

impl Meta {
    pub fn atual(&self) -> f64 {
        self.valor_atual.unwrap_or(0.0)
    }

    /// Percentage reached, clamped to `0..=100`. A goal without a positive
    /// target counts as complete as soon as anything was saved.
    pub fn progresso(&self) -> f64 {
        let atual = self.atual();
        if self.valor_meta <= 0.0 {
            return if atual > 0.0 { 100.0 } else { 0.0 };
        }
        ((atual / self.valor_meta) * 100.0).clamp(0.0, 100.0)
    }

    pub fn restante(&self) -> f64 {
        (self.valor_meta - self.atual()).max(0.0)
    }

    pub fn concluida(&self) -> bool {
        self.progresso() >= 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resumo {
    #[serde(default)]
    pub total_receitas: f64,
    #[serde(default)]
    pub total_despesas: f64,
    #[serde(default)]
    pub saldo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NovaReceita {
    pub descricao: String,
    pub valor: f64,
    pub data: String,
    pub categoria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NovaDespesa {
    pub descricao: String,
    pub valor_total: f64,
    pub total_parcelas: u32,
    pub data_primeira_parcela: String,
    pub categoria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NovaMeta {
    pub descricao: String,
    pub tipo: String,
    pub valor_meta: f64,
    pub data_inicio: String,
    pub data_fim: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: StatusParcela,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValorAporte {
    pub valor: f64,
}

/// Parses a user-typed amount. Accepts a decimal comma; rejects anything that
/// is not a finite positive number.
pub fn parse_valor(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => None,
    }
}
