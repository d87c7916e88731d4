//! # Trials — execução repetida de ensaios e reduções estatísticas
//!
//! Todo ensaio segue o mesmo roteiro: par novo (um sorteado, outro
//! emaranhado com ele ou sorteado à parte), mede `one` no lado de Alice,
//! mede `two` no lado de Bob, classifica. As reduções diferem apenas na
//! contagem, nunca no roteiro.
//!
//! ```text
//! ┌──────────┐  randomize   ┌──────────┐
//! │   one    │ ───────────► │ measure A│──┐
//! └──────────┘              └──────────┘  │  classifica
//!      │ entangle_with                    ├────────────► tally
//! ┌────▼─────┐              ┌──────────┐  │
//! │   two    │ ───────────► │ measure B│──┘
//! └──────────┘              └──────────┘
//! ```

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BellConfig;
use crate::electron::{Electron, Spin, SpinAxis};
use crate::error::{BellError, BellResult};
use crate::photon::Photon;
use crate::random::rng_from_seed;

/// Como o par de cada ensaio é preparado
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PairMode {
    /// `two` recebe o estado de `one`
    #[default]
    Entangled,
    /// Ambos sorteados independentemente
    Independent,
}

/// Contagem de concordância entre os dois lados
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    pub same: usize,
    pub different: usize,
}

impl Agreement {
    /// Registra um ensaio
    #[inline]
    pub fn record(&mut self, agreed: bool) {
        if agreed {
            self.same += 1;
        } else {
            self.different += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.same + self.different
    }

    /// `(same − different) / total`, em [-1, 1]
    pub fn correlation(&self) -> BellResult<f64> {
        let total = self.nonzero_total()?;
        Ok((self.same as f64 - self.different as f64) / total)
    }

    /// `same / total`, sem sinal
    pub fn same_fraction(&self) -> BellResult<f64> {
        let total = self.nonzero_total()?;
        Ok(self.same as f64 / total)
    }

    fn nonzero_total(&self) -> BellResult<f64> {
        match self.total() {
            0 => Err(BellError::NoTrials),
            n => Ok(n as f64),
        }
    }
}

/// Contagem conjunta dos quatro resultados possíveis (P = passa, M = não passa)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTally {
    pub pp: usize,
    pub pm: usize,
    pub mp: usize,
    pub mm: usize,
}

impl JointTally {
    /// Registra um ensaio
    #[inline]
    pub fn record(&mut self, alice: bool, bob: bool) {
        match (alice, bob) {
            (true, true) => self.pp += 1,
            (true, false) => self.pm += 1,
            (false, true) => self.mp += 1,
            (false, false) => self.mm += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pp + self.pm + self.mp + self.mm
    }

    pub fn same(&self) -> usize {
        self.pp + self.mm
    }

    /// Reduz para concordância simples
    pub fn agreement(&self) -> Agreement {
        Agreement {
            same: self.same(),
            different: self.pm + self.mp,
        }
    }

    /// `(pp − pm − mp + mm) / total`; trilha vazia vale 0.0
    pub fn correlation(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.pp as f64 - self.pm as f64 - self.mp as f64 + self.mm as f64) / total as f64
    }

    /// `|PP + PM| − |MP − MM|`, sem normalização.
    ///
    /// Não é um coeficiente de correlação: não divide pelo total e aplica o
    /// valor absoluto de forma assimétrica. Mantido como está.
    pub fn hard_way(&self) -> f64 {
        let pp = self.pp as f64;
        let pm = self.pm as f64;
        let mp = self.mp as f64;
        let mm = self.mm as f64;
        (pp + pm).abs() - (mp - mm).abs()
    }
}

/// Contagens independentes dos objetivos de Alice e Bob
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCounts {
    pub alice: usize,
    pub bob: usize,
}

/// Executor de ensaios; dono do gerador usado por todas as partículas
#[derive(Debug, Clone)]
pub struct TrialRunner {
    rng: StdRng,
    trials: usize,
}

impl TrialRunner {
    /// Cria executor a partir da configuração
    pub fn new(config: &BellConfig) -> BellResult<Self> {
        config.validate()?;
        Ok(Self {
            rng: rng_from_seed(config.seed),
            trials: config.trials,
        })
    }

    /// Executor determinístico com o número padrão de ensaios
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: rng_from_seed(Some(seed)),
            trials: BellConfig::default().trials,
        }
    }

    /// Altera o número de ensaios por estatística
    pub fn with_trials(mut self, trials: usize) -> BellResult<Self> {
        if trials == 0 {
            return Err(BellError::NoTrials);
        }
        self.trials = trials;
        Ok(self)
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Gerador compartilhado da execução
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Prepara o par de fótons de um ensaio
    pub fn prepare_photons(&mut self, one: &mut Photon, two: &mut Photon, mode: PairMode) {
        one.randomize(&mut self.rng);
        match mode {
            PairMode::Entangled => two.entangle_with(one),
            PairMode::Independent => two.randomize(&mut self.rng),
        }
    }

    /// Prepara o par de elétrons de um ensaio
    pub fn prepare_electrons(&mut self, one: &mut Electron, two: &mut Electron, mode: PairMode) {
        one.randomize(&mut self.rng);
        match mode {
            PairMode::Entangled => two.entangle_with(one),
            PairMode::Independent => two.randomize(&mut self.rng),
        }
    }

    /// Roda `trials` ensaios de fótons e entrega cada par de resultados
    pub fn photon_trials<F>(&mut self, alice: f64, bob: f64, mode: PairMode, mut visit: F)
    where
        F: FnMut(bool, bool),
    {
        let mut one = Photon::new(&mut self.rng);
        let mut two = Photon::new(&mut self.rng);

        for _ in 0..self.trials {
            self.prepare_photons(&mut one, &mut two, mode);
            let a = one.measure(alice);
            let b = two.measure(bob);
            visit(a, b);
        }
    }

    /// Roda `trials` ensaios de elétrons e entrega cada par de resultados
    pub fn electron_trials<F>(&mut self, alice: SpinAxis, bob: SpinAxis, mode: PairMode, mut visit: F)
    where
        F: FnMut(Spin, Spin),
    {
        let mut one = Electron::new(&mut self.rng);
        let mut two = Electron::new(&mut self.rng);

        for _ in 0..self.trials {
            self.prepare_electrons(&mut one, &mut two, mode);
            let a = one.measure(alice, &mut self.rng);
            let b = two.measure(bob, &mut self.rng);
            visit(a, b);
        }
    }

    /// Concordância de fótons nos ângulos dados
    pub fn photon_agreement(&mut self, alice: f64, bob: f64, mode: PairMode) -> Agreement {
        let mut agreement = Agreement::default();
        self.photon_trials(alice, bob, mode, |a, b| agreement.record(a == b));
        agreement
    }

    /// Concordância de elétrons nos eixos dados
    pub fn electron_agreement(&mut self, alice: SpinAxis, bob: SpinAxis, mode: PairMode) -> Agreement {
        let mut agreement = Agreement::default();
        self.electron_trials(alice, bob, mode, |a, b| agreement.record(a == b));
        agreement
    }

    /// Contagem conjunta de fótons emaranhados
    pub fn photon_tally(&mut self, alice: f64, bob: f64) -> JointTally {
        let mut tally = JointTally::default();
        self.photon_trials(alice, bob, PairMode::Entangled, |a, b| tally.record(a, b));
        tally
    }

    /// Correlação de fótons emaranhados entre dois ângulos
    pub fn correlate_photons(&mut self, alice: f64, bob: f64) -> BellResult<f64> {
        let correlation = self
            .photon_agreement(alice, bob, PairMode::Entangled)
            .correlation()?;
        debug!(alice, bob, trials = self.trials, correlation, "photon correlation");
        Ok(correlation)
    }

    /// Correlação de elétrons emaranhados entre dois eixos
    pub fn correlate_electrons(&mut self, alice: SpinAxis, bob: SpinAxis) -> BellResult<f64> {
        let correlation = self
            .electron_agreement(alice, bob, PairMode::Entangled)
            .correlation()?;
        debug!(%alice, %bob, trials = self.trials, correlation, "electron correlation");
        Ok(correlation)
    }

    /// Fração de ensaios em que os fótons concordaram
    pub fn photons_same_fraction(&mut self, alice: f64, bob: f64) -> BellResult<f64> {
        let fraction = self
            .photon_agreement(alice, bob, PairMode::Entangled)
            .same_fraction()?;
        debug!(alice, bob, trials = self.trials, fraction, "photon same fraction");
        Ok(fraction)
    }

    /// Variante "hard way" sobre as quatro contagens conjuntas
    pub fn correlate_photons_hard_way(&mut self, alice: f64, bob: f64) -> f64 {
        let tally = self.photon_tally(alice, bob);
        let value = tally.hard_way();
        debug!(alice, bob, ?tally, value, "photon hard-way correlation");
        value
    }

    /// Conta quantas vezes cada lado atingiu seu objetivo, sem condição conjunta
    pub fn count_photons_separately(
        &mut self,
        alice: f64,
        alice_goal: bool,
        bob: f64,
        bob_goal: bool,
    ) -> GoalCounts {
        let mut counts = GoalCounts::default();
        self.photon_trials(alice, bob, PairMode::Entangled, |a, b| {
            if a == alice_goal {
                counts.alice += 1;
            }
            if b == bob_goal {
                counts.bob += 1;
            }
        });
        debug!(alice, bob, ?counts, "photon separate goal counts");
        counts
    }

    /// Conta os ensaios em que os dois objetivos foram atingidos juntos
    pub fn count_photons_together(
        &mut self,
        alice: f64,
        alice_goal: bool,
        bob: f64,
        bob_goal: bool,
    ) -> usize {
        let mut hits = 0;
        self.photon_trials(alice, bob, PairMode::Entangled, |a, b| {
            if a == alice_goal && b == bob_goal {
                hits += 1;
            }
        });
        debug!(alice, bob, hits, "photon joint goal count");
        hits
    }
}
