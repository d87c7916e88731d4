//! Configuração das execuções
//!
//! Lê `.env` (uma vez) e as variáveis `BELL_TRIALS` e `BELL_SEED`.
//! Flags de linha de comando sobrescrevem estes valores no binário.

use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{BellError, BellResult};

/// Número de ensaios quando nada é informado
pub const DEFAULT_TRIALS: usize = 1000;

/// Variável de ambiente com o número de ensaios
pub const TRIALS_VAR: &str = "BELL_TRIALS";

/// Variável de ambiente com a seed do gerador
pub const SEED_VAR: &str = "BELL_SEED";

static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Configuração de uma execução
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellConfig {
    /// Ensaios por estatística (sempre > 0)
    pub trials: usize,
    /// Seed do gerador; `None` usa entropia do SO
    pub seed: Option<u64>,
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl BellConfig {
    /// Configuração padrão com seed fixa
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Define o número de ensaios
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Carrega do ambiente (e do `.env`, se existir)
    pub fn from_env() -> BellResult<Self> {
        Self::from_env_with(|_| None)
    }

    /// Como [`BellConfig::from_env`], mas `overrides` tem prioridade.
    ///
    /// Um valor sobrescrito nunca é lido do ambiente, então um
    /// `BELL_TRIALS` inválido não impede `--trials` de valer.
    pub fn from_env_with<O>(overrides: O) -> BellResult<Self>
    where
        O: Fn(&str) -> Option<String>,
    {
        ensure_loaded();
        Self::layered(overrides, |key| env::var(key).ok())
    }

    fn layered<O, B>(overrides: O, base: B) -> BellResult<Self>
    where
        O: Fn(&str) -> Option<String>,
        B: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| overrides(key).or_else(|| base(key)))
    }

    /// Carrega a partir de uma função de consulta chave → valor
    pub fn from_lookup<F>(lookup: F) -> BellResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TRIALS_VAR) {
            config.trials = raw
                .trim()
                .parse()
                .map_err(|_| BellError::InvalidConfig(format!("{TRIALS_VAR}={raw}")))?;
        }

        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|_| BellError::InvalidConfig(format!("{SEED_VAR}={raw}")))?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejeita configurações que levariam a divisão por zero
    pub fn validate(&self) -> BellResult<()> {
        if self.trials == 0 {
            return Err(BellError::NoTrials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BellConfig::default();
        assert_eq!(config.trials, 1000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = BellConfig::from_lookup(lookup_from(&[(TRIALS_VAR, "250"), (SEED_VAR, "99")])).unwrap();
        assert_eq!(config.trials, 250);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_lookup_empty_uses_defaults() {
        let config = BellConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, BellConfig::default());
    }

    #[test]
    fn test_invalid_trials() {
        let result = BellConfig::from_lookup(lookup_from(&[(TRIALS_VAR, "many")]));
        assert!(matches!(result, Err(BellError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let result = BellConfig::from_lookup(lookup_from(&[(TRIALS_VAR, "0")]));
        assert_eq!(result, Err(BellError::NoTrials));
    }

    #[test]
    fn test_overrides_shadow_invalid_base() {
        let overrides = lookup_from(&[(TRIALS_VAR, "10")]);
        for bad in ["0", "abc"] {
            let base = lookup_from(&[(TRIALS_VAR, bad), (SEED_VAR, "5")]);
            let config = BellConfig::layered(&overrides, base).unwrap();
            assert_eq!(config.trials, 10);
            assert_eq!(config.seed, Some(5));
        }
    }

    #[test]
    fn test_invalid_base_without_override_fails() {
        let base = lookup_from(&[(TRIALS_VAR, "abc")]);
        let result = BellConfig::layered(|_: &str| None, base);
        assert!(matches!(result, Err(BellError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder() {
        let config = BellConfig::seeded(3).with_trials(10);
        assert_eq!(config.trials, 10);
        assert_eq!(config.seed, Some(3));
    }
}
