// ============================================================================
// API Client : backend de données crypto
// ============================================================================
// Appelle le backend HTTP qui sert l'historique des cryptomonnaies
//
// Endpoints (préfixe /api/crypto) :
// - GET  /names    -> ["BITCOIN", "ETHEREUM", ...]
// - POST /data     {coin_name, start_date, end_date} -> {summary, data}
// - POST /top      {year} -> {year, top_cryptos: [...]}
// - POST /year     {year} -> {data: [{coin_name, market_cap}]}
// - GET  /summary  -> {total_cryptos, average_price}
//
// Pas d'en-têtes, pas d'authentification, pas de retry, pas de pagination.
// ============================================================================

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::api::CryptoApi;
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{
    CoinId, DateRange, DetailedHistory, MarketOverview, TopCryptoEntry, Year, YearlyCapEntry,
};

// ============================================================================
// Structures pour les corps de requête / réponse
// ============================================================================

#[derive(Debug, Serialize)]
struct HistoryRequest<'a> {
    coin_name: &'a str,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Serialize)]
struct YearRequest {
    year: String,
}

#[derive(Debug, Deserialize)]
struct TopCryptosResponse {
    #[serde(default)]
    top_cryptos: Vec<TopCryptoEntry>,
}

#[derive(Debug, Deserialize)]
struct YearlyCapsResponse {
    #[serde(default)]
    data: Vec<YearlyCapEntry>,
}

// ============================================================================
// BackendClient
// ============================================================================

/// Client HTTP du backend
///
/// CONCEPT RUST : reqwest::Client est un Arc interne
/// - Le cloner ne duplique pas le pool de connexions
/// - Un seul client pour toute l'application
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Crée le client depuis la configuration
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL complète d'un endpoint
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/crypto/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending GET request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending POST request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        read_json(response).await
    }
}

/// Vérifie le statut puis décode le corps
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Backend returned error status");
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    decode_body(&body)
}

/// Décode un corps JSON ; vide ou `null` compte comme une absence de résultat
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::Empty);
    }
    serde_json::from_str(trimmed).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Les noms vides renvoyés par le backend sont écartés
fn to_coin_ids(names: Vec<String>) -> Vec<CoinId> {
    names.into_iter().filter_map(CoinId::new).collect()
}

impl CryptoApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_coin_identifiers(&self) -> Result<Vec<CoinId>, FetchError> {
        let names: Vec<String> = self.get_json("names").await?;
        let coins = to_coin_ids(names);
        info!(coins = coins.len(), "Coin list fetched");
        Ok(coins)
    }

    #[instrument(skip(self), fields(coin = %coin))]
    async fn get_detailed_history(
        &self,
        coin: CoinId,
        range: DateRange,
    ) -> Result<DetailedHistory, FetchError> {
        let (start_date, end_date) = range.as_params();
        let request = HistoryRequest {
            coin_name: coin.as_str(),
            start_date,
            end_date,
        };

        let history: DetailedHistory = self.post_json("data", &request).await?;
        info!(points = history.len(), "Detailed history fetched");
        Ok(history)
    }

    #[instrument(skip(self), fields(year = %year))]
    async fn get_top_cryptos_for_year(&self, year: Year) -> Result<Vec<TopCryptoEntry>, FetchError> {
        let request = YearRequest {
            year: year.as_param(),
        };
        let response: TopCryptosResponse = self.post_json("top", &request).await?;
        info!(entries = response.top_cryptos.len(), "Top cryptos fetched");
        Ok(response.top_cryptos)
    }

    #[instrument(skip(self), fields(year = %year))]
    async fn get_market_caps_for_year(&self, year: Year) -> Result<Vec<YearlyCapEntry>, FetchError> {
        let request = YearRequest {
            year: year.as_param(),
        };
        let response: YearlyCapsResponse = self.post_json("year", &request).await?;
        info!(entries = response.data.len(), "Yearly market caps fetched");
        Ok(response.data)
    }

    #[instrument(skip(self))]
    async fn get_market_overview(&self) -> Result<MarketOverview, FetchError> {
        self.get_json("summary").await
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> BackendClient {
        let config = Config {
            api_url: url.to_string(),
            ..Config::default()
        };
        BackendClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint() {
        let client = client("http://localhost:5000/");
        assert_eq!(
            client.endpoint("data"),
            "http://localhost:5000/api/crypto/data"
        );
    }

    #[test]
    fn test_history_request_body() {
        let range = DateRange::new(
            chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2021, 1, 31).unwrap(),
        );
        let (start_date, end_date) = range.as_params();
        let body = serde_json::to_value(HistoryRequest {
            coin_name: "BTC",
            start_date,
            end_date,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "coin_name": "BTC",
                "start_date": "2021-01-01",
                "end_date": "2021-01-31"
            })
        );
    }

    #[test]
    fn test_decode_empty_and_malformed() {
        assert_eq!(decode_body::<Vec<String>>(""), Err(FetchError::Empty));
        assert_eq!(decode_body::<Vec<String>>(" null "), Err(FetchError::Empty));
        assert!(matches!(
            decode_body::<Vec<String>>("{not json"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_yearly_caps_out_of_range() {
        // Année hors sélecteur : on rend ce que l'API renvoie, même vide
        let response: YearlyCapsResponse = decode_body(r#"{"year": "2099", "data": []}"#).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_decode_top_cryptos() {
        let response: TopCryptosResponse = decode_body(
            r#"{"year": "2020", "top_cryptos": [
                {"coin_name": "A", "price_change": 310.5, "data": [{"date": "2020-01-01", "price": 1.0}]},
                {"coin_name": "B", "price_change": -80.1, "data": []},
                {"coin_name": "C", "price_change": 120.0, "data": []},
                {"coin_name": "D", "price_change": 99.9, "data": []}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.top_cryptos.len(), 4);
        assert_eq!(response.top_cryptos[0].data.len(), 1);
    }

    #[test]
    fn test_coin_names_filter_empty() {
        let coins = to_coin_ids(vec!["BTC".into(), "".into(), "ETH".into()]);
        assert_eq!(coins.len(), 2);
    }
}
