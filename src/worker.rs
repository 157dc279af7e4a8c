// ============================================================================
// Background Worker
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop (thread UI) envoie des Command au worker
// - Le worker exécute les appels HTTP sur son propre runtime tokio
// - Les résultats reviennent en Outcome sur un autre channel
//
// Chaque commande est spawnée comme une tâche indépendante : deux
// chargements peuvent se croiser, et les réponses arriver dans le
// désordre. C'est le jeton de génération des contrôleurs qui trie.
// ============================================================================

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use tracing::{debug, error, info};

use crate::api::CryptoApi;
use crate::error::FetchError;
use crate::models::{
    CoinId, DateRange, DetailedHistory, MarketOverview, TopCryptoEntry, Year, YearlyCapEntry,
};

/// Commandes envoyées au worker
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Liste des cryptos (montage de la page détail)
    LoadCoinList { generation: u64 },

    /// Vue d'ensemble du marché (barre d'état)
    LoadOverview { generation: u64 },

    /// Historique détaillé d'une crypto
    FetchHistory {
        generation: u64,
        coin: CoinId,
        range: DateRange,
    },

    /// Top cryptos d'une année
    FetchTopCryptos { generation: u64, year: Year },

    /// Market caps d'une année
    FetchYearlyCaps { generation: u64, year: Year },
}

/// Résultats renvoyés par le worker (chacun porte sa génération)
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    CoinList {
        generation: u64,
        result: Result<Vec<CoinId>, FetchError>,
    },
    Overview {
        generation: u64,
        result: Result<MarketOverview, FetchError>,
    },
    History {
        generation: u64,
        result: Result<DetailedHistory, FetchError>,
    },
    TopCryptos {
        generation: u64,
        result: Result<Vec<TopCryptoEntry>, FetchError>,
    },
    YearlyCaps {
        generation: u64,
        result: Result<Vec<YearlyCapEntry>, FetchError>,
    },
}

/// Lance le worker dans un thread dédié
///
/// CONCEPT RUST : Thread + runtime async
/// - std::thread::spawn() : thread OS pour ne pas bloquer l'UI
/// - Le runtime est créé AVANT le thread : une erreur remonte à l'appelant
/// - Le thread s'arrête quand tous les Sender de commandes sont droppés
pub fn spawn_worker<A>(
    api: Arc<A>,
    command_rx: mpsc::Receiver<Command>,
    outcome_tx: mpsc::Sender<Outcome>,
) -> std::io::Result<JoinHandle<()>>
where
    A: CryptoApi + 'static,
{
    let runtime = tokio::runtime::Runtime::new()?;

    let handle = std::thread::Builder::new()
        .name("cryptodash-worker".to_string())
        .spawn(move || {
            while let Ok(command) = command_rx.recv() {
                info!(?command, "Worker received command");
                let api = Arc::clone(&api);
                let outcome_tx = outcome_tx.clone();

                runtime.spawn(async move {
                    let outcome = execute(api.as_ref(), command).await;
                    if let Some(error) = outcome_error(&outcome) {
                        error!(error = %error, "Fetch failed");
                    }
                    if outcome_tx.send(outcome).is_err() {
                        debug!("UI gone, dropping outcome");
                    }
                });
            }
            info!("Worker thread exiting (channel closed)");
        })?;

    Ok(handle)
}

/// Exécute une commande contre l'API
pub async fn execute<A: CryptoApi>(api: &A, command: Command) -> Outcome {
    match command {
        Command::LoadCoinList { generation } => Outcome::CoinList {
            generation,
            result: api.list_coin_identifiers().await,
        },
        Command::LoadOverview { generation } => Outcome::Overview {
            generation,
            result: api.get_market_overview().await,
        },
        Command::FetchHistory {
            generation,
            coin,
            range,
        } => Outcome::History {
            generation,
            result: api.get_detailed_history(coin, range).await,
        },
        Command::FetchTopCryptos { generation, year } => Outcome::TopCryptos {
            generation,
            result: api.get_top_cryptos_for_year(year).await,
        },
        Command::FetchYearlyCaps { generation, year } => Outcome::YearlyCaps {
            generation,
            result: api.get_market_caps_for_year(year).await,
        },
    }
}

fn outcome_error(outcome: &Outcome) -> Option<&FetchError> {
    match outcome {
        Outcome::CoinList { result, .. } => result.as_ref().err(),
        Outcome::Overview { result, .. } => result.as_ref().err(),
        Outcome::History { result, .. } => result.as_ref().err(),
        Outcome::TopCryptos { result, .. } => result.as_ref().err(),
        Outcome::YearlyCaps { result, .. } => result.as_ref().err(),
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, Screen};
    use crate::models::{PricePoint, SummaryStats};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// API en mémoire : compte les appels, 2099 n'a aucune donnée
    #[derive(Default)]
    struct FakeApi {
        history_calls: AtomicUsize,
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    impl CryptoApi for FakeApi {
        async fn list_coin_identifiers(&self) -> Result<Vec<CoinId>, FetchError> {
            Ok(["BTC", "ETH"].iter().filter_map(|c| CoinId::new(*c)).collect())
        }

        async fn get_detailed_history(
            &self,
            coin: CoinId,
            range: DateRange,
        ) -> Result<DetailedHistory, FetchError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(DetailedHistory {
                summary: SummaryStats {
                    coin_name: Some(coin.to_string()),
                    start_date: Some(range.start.to_string()),
                    end_date: Some(range.end.to_string()),
                    initial_price: Some(100.005),
                    final_price: Some(120.0),
                    price_change_percentage: Some(19.99),
                },
                data: vec![
                    PricePoint::new(day(1), 100.0),
                    PricePoint::new(day(2), 110.0),
                    PricePoint::new(day(3), 120.0),
                ],
            })
        }

        async fn get_top_cryptos_for_year(
            &self,
            year: Year,
        ) -> Result<Vec<TopCryptoEntry>, FetchError> {
            if year.value() == 2099 {
                return Ok(Vec::new());
            }
            Ok(["BTC", "ETH", "SOL", "ADA"]
                .iter()
                .map(|name| TopCryptoEntry {
                    coin_name: name.to_string(),
                    price_change: Some(10.0),
                    data: vec![PricePoint::new(day(1), 1.0)],
                })
                .collect())
        }

        async fn get_market_caps_for_year(
            &self,
            year: Year,
        ) -> Result<Vec<YearlyCapEntry>, FetchError> {
            if year.value() == 2099 {
                return Ok(Vec::new());
            }
            Ok(vec![YearlyCapEntry {
                coin_name: "BTC".to_string(),
                market_cap: 1_234_567.0,
            }])
        }

        async fn get_market_overview(&self) -> Result<MarketOverview, FetchError> {
            Err(FetchError::Status(500))
        }
    }

    #[tokio::test]
    async fn test_execute_routes_generation() {
        let api = FakeApi::default();
        let outcome = execute(
            &api,
            Command::FetchTopCryptos {
                generation: 7,
                year: Year::new(2099),
            },
        )
        .await;

        assert_eq!(
            outcome,
            Outcome::TopCryptos {
                generation: 7,
                result: Ok(Vec::new()),
            }
        );
    }

    #[tokio::test]
    async fn test_execute_reports_errors() {
        let api = FakeApi::default();
        let outcome = execute(&api, Command::LoadOverview { generation: 1 }).await;
        assert_eq!(outcome_error(&outcome), Some(&FetchError::Status(500)));
    }

    /// Envoie les commandes puis applique les `count` résultats attendus
    fn round_trip(
        app: &mut App,
        commands: Vec<Command>,
        command_tx: &mpsc::Sender<Command>,
        outcome_rx: &mpsc::Receiver<Outcome>,
    ) {
        let count = commands.len();
        for command in commands {
            command_tx.send(command).unwrap();
        }
        for _ in 0..count {
            let outcome = outcome_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            app.apply(outcome);
        }
    }

    #[test]
    fn test_worker_drives_detail_page() {
        let api = Arc::new(FakeApi::default());
        let (command_tx, command_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::clone(&api), command_rx, outcome_tx).unwrap();

        let mut app = App::new();
        let commands = app.start();
        round_trip(&mut app, commands, &command_tx, &outcome_rx);

        assert_eq!(app.detail.available_coins().len(), 2);
        assert!(app.overview.error().is_some());

        // Sans dates : aucun appel
        app.detail.select_next_coin();
        assert_eq!(app.detail.submit(), None);
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 0);

        app.detail.focus_next();
        for c in "2021-01-01".chars() {
            app.detail.push_char(c);
        }
        app.detail.focus_next();
        for c in "2021-01-03".chars() {
            app.detail.push_char(c);
        }
        let command = app.detail.submit().unwrap();
        round_trip(&mut app, vec![command], &command_tx, &outcome_rx);

        assert_eq!(api.history_calls.load(Ordering::SeqCst), 1);
        let series = app.detail.price_series().unwrap();
        assert_eq!(series.labels, vec!["01/01/2021", "02/01/2021", "03/01/2021"]);
        assert_eq!(series.values, vec![100.0, 110.0, 120.0]);

        let summary = app.detail.summary_view().unwrap();
        assert_eq!(summary.initial_price.as_deref(), Some("100.01"));
        assert_eq!(summary.final_price.as_deref(), Some("120.00"));

        drop(command_tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_worker_drives_year_pages() {
        let api = Arc::new(FakeApi::default());
        let (command_tx, command_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let handle = spawn_worker(api, command_rx, outcome_tx).unwrap();

        let mut app = App::new();
        let commands = app.switch_to(Screen::TopCryptos);
        round_trip(&mut app, commands, &command_tx, &outcome_rx);
        assert_eq!(app.top_cryptos.cards().len(), 4);

        let commands = app.switch_to(Screen::YearlyCaps);
        round_trip(&mut app, commands, &command_tx, &outcome_rx);
        assert_eq!(app.yearly_caps.cards().len(), 1);

        let command = app.yearly_caps.set_year(Year::new(2099)).unwrap();
        round_trip(&mut app, vec![command], &command_tx, &outcome_rx);
        assert!(app.yearly_caps.cards().is_empty());
        assert_eq!(app.yearly_caps.entries.error(), None);

        drop(command_tx);
        handle.join().unwrap();
    }
}
