use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::config::endpoint;
use crate::errors::ApiError;
use crate::models::{
    Envelope, Meta, NovaDespesa, NovaMeta, NovaReceita, Parcela, Receita, Resumo, StatusParcela,
    StatusUpdate, ValorAporte,
};

/// Remote finance backend. Every call resolves the response envelope, so an
/// `Ok` always means `message == "success"`.
///
/// Futures are `?Send`: everything runs on the browser's main thread.
#[async_trait(?Send)]
pub trait FinanceApi {
    async fn list_receitas(&self) -> Result<Vec<Receita>, ApiError>;
    async fn create_receita(&self, nova: &NovaReceita) -> Result<(), ApiError>;
    async fn delete_receita(&self, id: i64) -> Result<(), ApiError>;

    async fn list_despesas(&self) -> Result<Vec<Parcela>, ApiError>;
    async fn create_despesa(&self, nova: &NovaDespesa) -> Result<(), ApiError>;
    async fn delete_despesa(&self, despesa_id: i64) -> Result<(), ApiError>;
    async fn pay_parcela(&self, id: i64) -> Result<(), ApiError>;

    async fn list_metas(&self) -> Result<Vec<Meta>, ApiError>;
    async fn create_meta(&self, nova: &NovaMeta) -> Result<(), ApiError>;
    async fn add_to_meta(&self, id: i64, valor: f64) -> Result<(), ApiError>;
    async fn delete_meta(&self, id: i64) -> Result<(), ApiError>;

    async fn resumo(&self) -> Result<Resumo, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    // Status codes are not inspected: the envelope alone decides success.
    async fn read<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
        let envelope = response.json::<Envelope<T>>().await?;
        envelope.into_result()
    }

    async fn ack(response: Response) -> Result<(), ApiError> {
        Self::read::<IgnoredAny>(response).await.map(|_| ())
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await?;
        Ok(Self::read::<Vec<T>>(response).await?.unwrap_or_default())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);
        let response = Request::delete(&url).send().await?;
        Self::ack(response).await
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = Request::post(&url).json(body)?.send().await?;
        Self::ack(response).await
    }

    async fn put<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("PUT {}", url);
        let response = Request::put(&url).json(body)?.send().await?;
        Self::ack(response).await
    }
}

#[async_trait(?Send)]
impl FinanceApi for HttpApi {
    async fn list_receitas(&self) -> Result<Vec<Receita>, ApiError> {
        self.get_list("receitas").await
    }

    async fn create_receita(&self, nova: &NovaReceita) -> Result<(), ApiError> {
        self.post("receitas", nova).await
    }

    async fn delete_receita(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("receitas/{}", id)).await
    }

    async fn list_despesas(&self) -> Result<Vec<Parcela>, ApiError> {
        self.get_list("despesas").await
    }

    async fn create_despesa(&self, nova: &NovaDespesa) -> Result<(), ApiError> {
        self.post("despesas", nova).await
    }

    async fn delete_despesa(&self, despesa_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("despesas/{}", despesa_id)).await
    }

    async fn pay_parcela(&self, id: i64) -> Result<(), ApiError> {
        let body = StatusUpdate {
            status: StatusParcela::Paga,
        };
        self.put(&format!("parcelas/{}/status", id), &body).await
    }

    async fn list_metas(&self) -> Result<Vec<Meta>, ApiError> {
        self.get_list("metas").await
    }

    async fn create_meta(&self, nova: &NovaMeta) -> Result<(), ApiError> {
        self.post("metas", nova).await
    }

    async fn add_to_meta(&self, id: i64, valor: f64) -> Result<(), ApiError> {
        self.put(&format!("metas/{}/adicionar", id), &ValorAporte { valor })
            .await
    }

    async fn delete_meta(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("metas/{}", id)).await
    }

    async fn resumo(&self) -> Result<Resumo, ApiError> {
        let url = self.url("dashboard");
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await?;
        Ok(Self::read::<Resumo>(response).await?.unwrap_or_default())
    }
}
