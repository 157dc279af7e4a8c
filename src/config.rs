// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement au démarrage :
// - CRYPTODASH_API_URL      : URL de base du backend (défaut http://127.0.0.1:5000)
// - CRYPTODASH_TIMEOUT_SECS : timeout par requête (absent = pas de timeout)
// - CRYPTODASH_LOG_DIR      : répertoire des logs
// - RUST_LOG                : niveau de log (lu par tracing-subscriber)
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "CRYPTODASH_API_URL";
pub const TIMEOUT_VAR: &str = "CRYPTODASH_TIMEOUT_SECS";
pub const LOG_DIR_VAR: &str = "CRYPTODASH_LOG_DIR";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// URL de base de l'API (sans le préfixe /api/crypto)
    pub api_url: String,

    /// Timeout appliqué à chaque requête
    /// None : une requête bloquée laisse la page en chargement
    pub request_timeout: Option<Duration>,

    /// Répertoire des fichiers de log
    pub log_dir: PathBuf,
}

impl Config {
    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Lit la configuration depuis une fonction de lookup
    ///
    /// CONCEPT RUST : Injection de dépendance par closure
    /// - Les tests passent une closure au lieu de modifier l'environnement
    /// - Évite les tests qui se marchent dessus (env global au processus)
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        var: API_URL_VAR,
                        value: url,
                    });
                }
                url
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let request_timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
            None => None,
        };

        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self {
            api_url,
            request_timeout,
            log_dir,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            log_dir: default_log_dir(),
        }
    }
}

/// Répertoire de logs par défaut
///
/// - Linux : ~/.local/share/cryptodash/logs
/// - macOS : ~/Library/Application Support/cryptodash/logs
/// - Windows : C:\Users\<user>\AppData\Local\cryptodash\logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("cryptodash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
