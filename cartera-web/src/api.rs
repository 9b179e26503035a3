use crate::config::FrontendConfig;
use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use reqwest::{Client, Error, RequestBuilder};
use shared::models::{
    Cliente, ClienteRequest, Credito, CreditoRequest, LoginRequest, LoginResponse, Movimiento,
    MovimientoRequest, NoPagoRequest, Recaudo, RecaudoRequest, ResumenFinanciero, Tienda,
    TipoMovimiento,
};
use std::sync::{Arc, Mutex};

thread_local! {
    static SHARED_CLIENT: OnceCell<CarteraClient> = OnceCell::new();
}

/// Lightweight API client for the Cartera Financiera backend.
///
/// Carries the session's bearer token; the session provider installs it on
/// login/hydration and drops it on teardown.
#[derive(Clone, Debug)]
pub struct CarteraClient {
    base_url: String,
    client: Client,
    bearer: Arc<Mutex<Option<String>>>,
}

impl CarteraClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            bearer: Arc::new(Mutex::new(None)),
        }
    }

    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.bearer.lock() {
            *guard = token;
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.bearer
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.current_token() {
            request.header("Authorization", format!("Bearer {token}"))
        } else {
            request
        }
    }

    /// Authenticate with usuario/password credentials. Stores the bearer
    /// token for subsequent calls.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse, Error> {
        let url = self.api_url("auth/login");
        let response = self.client.post(url).json(payload).send().await?;
        let body: LoginResponse = response.error_for_status()?.json().await?;
        self.set_token(Some(body.token.clone()));
        Ok(body)
    }

    /// List the stores the authenticated user may operate against.
    pub async fn list_tiendas(&self) -> Result<Vec<Tienda>, Error> {
        let url = self.api_url("tiendas");
        let response = self.apply_auth(self.client.get(url)).send().await?;
        response.error_for_status()?.json().await
    }

    /// List the clients of a store.
    pub async fn list_clientes(&self, tienda_id: i64) -> Result<Vec<Cliente>, Error> {
        let url = self.api_url("clientes");
        let response = self
            .apply_auth(self.client.get(url).query(&[("tienda", tienda_id)]))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// Register a new client.
    pub async fn create_cliente(&self, payload: &ClienteRequest) -> Result<Cliente, Error> {
        let url = self.api_url("clientes");
        let response = self
            .apply_auth(self.client.post(url).json(payload))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// List the credits of a store.
    pub async fn list_creditos(&self, tienda_id: i64) -> Result<Vec<Credito>, Error> {
        let url = self.api_url("creditos");
        let response = self
            .apply_auth(self.client.get(url).query(&[("tienda", tienda_id)]))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// Open a new credit sale.
    pub async fn create_credito(&self, payload: &CreditoRequest) -> Result<Credito, Error> {
        let url = self.api_url("creditos");
        let response = self
            .apply_auth(self.client.post(url).json(payload))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// List the collections of a store for one day.
    pub async fn list_recaudos(
        &self,
        tienda_id: i64,
        fecha: NaiveDate,
    ) -> Result<Vec<Recaudo>, Error> {
        let url = self.api_url("recaudos");
        let response = self
            .apply_auth(
                self.client
                    .get(url)
                    .query(&[("tienda", tienda_id.to_string())])
                    .query(&[("fecha", fecha.to_string())]),
            )
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// Register a collection against a credit.
    pub async fn registrar_recaudo(&self, payload: &RecaudoRequest) -> Result<Recaudo, Error> {
        let url = self.api_url("recaudos");
        let response = self
            .apply_auth(self.client.post(url).json(payload))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// Record a visit where the client did not pay.
    pub async fn registrar_no_pago(&self, payload: &NoPagoRequest) -> Result<(), Error> {
        let url = self.api_url("no-pagos");
        let response = self
            .apply_auth(self.client.post(url).json(payload))
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }

    /// List cash movements of a store, optionally filtered by kind.
    pub async fn list_movimientos(
        &self,
        tienda_id: i64,
        tipo: Option<TipoMovimiento>,
    ) -> Result<Vec<Movimiento>, Error> {
        let url = self.api_url("movimientos");
        let mut request = self.client.get(url).query(&[("tienda", tienda_id)]);
        if let Some(tipo) = tipo {
            request = request.query(&[("tipo", tipo.as_str())]);
        }
        let response = self.apply_auth(request).send().await?;
        response.error_for_status()?.json().await
    }

    /// Register a cash movement (expense, contribution or withdrawal).
    pub async fn registrar_movimiento(
        &self,
        payload: &MovimientoRequest,
    ) -> Result<Movimiento, Error> {
        let url = self.api_url("movimientos");
        let response = self
            .apply_auth(self.client.post(url).json(payload))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }

    /// Fetch the aggregated financial summary of a store.
    pub async fn resumen_financiero(&self, tienda_id: i64) -> Result<ResumenFinanciero, Error> {
        let url = self.api_url("reportes/resumen");
        let response = self
            .apply_auth(self.client.get(url).query(&[("tienda", tienda_id)]))
            .send()
            .await?;
        response.error_for_status()?.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_normalizes_base_url() {
        let client = CarteraClient::new("http://localhost:8080/");
        assert_eq!(
            client.api_url("auth/login"),
            "http://localhost:8080/auth/login"
        );
        assert_eq!(client.api_url("/tiendas"), "http://localhost:8080/tiendas");
    }

    #[test]
    fn token_is_shared_across_clones() {
        let client = CarteraClient::new("/api");
        assert!(client.current_token().is_none());

        let clone = client.clone();
        client.set_token(Some("tok-abc".to_string()));
        assert_eq!(clone.current_token().as_deref(), Some("tok-abc"));

        clone.set_token(None);
        assert!(client.current_token().is_none());
    }

    #[test]
    fn endpoint_paths() {
        let client = CarteraClient::new("/api");
        assert_eq!(client.api_url("clientes"), "/api/clientes");
        assert_eq!(client.api_url("recaudos"), "/api/recaudos");
        assert_eq!(client.api_url("no-pagos"), "/api/no-pagos");
        assert_eq!(client.api_url("movimientos"), "/api/movimientos");
        assert_eq!(client.api_url("reportes/resumen"), "/api/reportes/resumen");
    }
}
