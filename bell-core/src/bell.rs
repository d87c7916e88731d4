//! # Bell — desigualdades avaliadas sobre o modelo de variáveis ocultas
//!
//! Cada avaliador compõe correlações ou contagens do [`TrialRunner`] em
//! ângulos/eixos fixos e compara o escalar com o limite clássico.
//!
//! ```text
//! Bell (spin)     S = C(X,Y) − C(Y,Z) − C(Z,X)                 clássico: S ≤ 1
//! Bell (fóton)    S = C(0,60) − C(60,120) − C(120,0)           clássico: S ≤ 1
//! CHSH            S = C(A,B) − C(A,b) + C(a,B) + C(a,b)        clássico: |S| ≤ 2
//! CH74            S = (N(A,B) − N(A,b) + N(a,B) + N(a,b)
//!                      − N(A,∞) − N(∞,b)) / N                  clássico: S ≤ 0
//! Porcentagem     P(same) nos três pares do Bell básico       clássico: P ≥ 1/3
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::electron::SpinAxis;
use crate::error::{BellError, BellResult};
use crate::experiment;
use crate::trials::TrialRunner;

/// Ângulos (graus) do Bell básico com fótons
pub const BELL_PHOTON_ANGLES: [f64; 3] = [0.0, 60.0, 120.0];

/// Ângulos (graus) do CHSH: Alice (A, a) e Bob (B, b)
pub const CHSH_ALICE: [f64; 2] = [0.0, 45.0];
pub const CHSH_BOB: [f64; 2] = [22.5, 67.5];

/// Ângulos (graus) do CH74: Alice (A, a) e Bob (B, b)
pub const CH74_ALICE: [f64; 2] = [0.0, 180.0];
pub const CH74_BOB: [f64; 2] = [90.0, 270.0];

/// Previsão quântica para a fração de concordância
pub const QUANTUM_SAME_FRACTION: f64 = 0.25;

/// Limite inferior clássico para a fração de concordância
pub const CLASSICAL_SAME_FRACTION: f64 = 1.0 / 3.0;

/// Classificação do resultado
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Compatível com variáveis ocultas locais
    Classical,
    /// Viola a desigualdade
    Spooky,
}

impl Verdict {
    pub fn from_violation(violated: bool) -> Self {
        if violated { Self::Spooky } else { Self::Classical }
    }

    pub fn is_spooky(&self) -> bool {
        matches!(self, Self::Spooky)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classical => "Classic",
            Self::Spooky => "Spooky",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Avaliadores disponíveis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Inequality {
    BellSpin,
    BellPhoton,
    Chsh,
    Ch74,
    Percentage,
    TriAxisPhoton,
    TriAxisElectron,
    ChshTracks,
}

impl Inequality {
    /// Todos os avaliadores, na ordem do relatório
    pub const ALL: [Inequality; 8] = [
        Inequality::BellSpin,
        Inequality::BellPhoton,
        Inequality::Chsh,
        Inequality::Ch74,
        Inequality::Percentage,
        Inequality::TriAxisPhoton,
        Inequality::TriAxisElectron,
        Inequality::ChshTracks,
    ];

    /// Nome usado na linha de comando
    pub fn name(&self) -> &'static str {
        match self {
            Self::BellSpin => "bell-spin",
            Self::BellPhoton => "bell-photon",
            Self::Chsh => "chsh",
            Self::Ch74 => "ch74",
            Self::Percentage => "percentage",
            Self::TriAxisPhoton => "tri-axis-photon",
            Self::TriAxisElectron => "tri-axis-electron",
            Self::ChshTracks => "chsh-tracks",
        }
    }

    /// Descrição do limite clássico
    pub fn bound(&self) -> &'static str {
        match self {
            Self::BellSpin | Self::BellPhoton => "S <= 1.0",
            Self::Chsh => "-2.0 <= S <= 2.0",
            Self::ChshTracks => "S <= 2.0",
            Self::Ch74 => "S <= 0.0",
            Self::Percentage => "P(same) >= 0.333",
            Self::TriAxisPhoton => "P(both) >= 33.33%",
            Self::TriAxisElectron => "Ch < 1.0",
        }
    }

    /// Roda o avaliador
    pub fn evaluate(self, runner: &mut TrialRunner) -> BellResult<InequalityReport> {
        match self {
            Self::BellSpin => bell_spin(runner),
            Self::BellPhoton => bell_photon(runner),
            Self::Chsh => chsh(runner),
            Self::Ch74 => ch74(runner),
            Self::Percentage => bell_percentage(runner),
            Self::TriAxisPhoton => experiment::tri_axis_photon(runner),
            Self::TriAxisElectron => experiment::tri_axis_electron(runner),
            Self::ChshTracks => experiment::chsh_tracks(runner),
        }
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Inequality {
    type Err = BellError;

    fn from_str(s: &str) -> BellResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|inequality| inequality.name() == wanted)
            .ok_or_else(|| BellError::UnknownInequality(s.to_string()))
    }
}

/// Valor intermediário nomeado (uma correlação, uma contagem)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub label: String,
    pub value: f64,
}

impl Component {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Resultado de um avaliador, entregue à camada de relatório
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InequalityReport {
    pub inequality: Inequality,
    pub statistic: f64,
    pub components: Vec<Component>,
    pub trials: usize,
    pub verdict: Verdict,
}

impl InequalityReport {
    pub(crate) fn new(
        inequality: Inequality,
        statistic: f64,
        components: Vec<Component>,
        trials: usize,
        verdict: Verdict,
    ) -> Self {
        info!(%inequality, statistic, trials, %verdict, "inequality evaluated");
        Self {
            inequality,
            statistic,
            components,
            trials,
            verdict,
        }
    }

    /// Busca um componente pelo rótulo
    pub fn component(&self, label: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|component| component.label == label)
            .map(|component| component.value)
    }
}

/// Bell básico com elétrons: `C(X,Y) − C(Y,Z) − C(Z,X)`
pub fn bell_spin(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let xy = runner.correlate_electrons(SpinAxis::X, SpinAxis::Y)?;
    let yz = runner.correlate_electrons(SpinAxis::Y, SpinAxis::Z)?;
    let zx = runner.correlate_electrons(SpinAxis::Z, SpinAxis::X)?;
    let s = xy - yz - zx;

    Ok(InequalityReport::new(
        Inequality::BellSpin,
        s,
        vec![
            Component::new("C(X,Y)", xy),
            Component::new("C(Y,Z)", yz),
            Component::new("C(Z,X)", zx),
        ],
        runner.trials(),
        Verdict::from_violation(s > 1.0),
    ))
}

/// Bell básico com fótons em 0°, 60° e 120°
pub fn bell_photon(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let [x, y, z] = BELL_PHOTON_ANGLES.map(f64::to_radians);
    let xy = runner.correlate_photons(x, y)?;
    let yz = runner.correlate_photons(y, z)?;
    let zx = runner.correlate_photons(z, x)?;
    let s = xy - yz - zx;

    Ok(InequalityReport::new(
        Inequality::BellPhoton,
        s,
        vec![
            Component::new("C(0,60)", xy),
            Component::new("C(60,120)", yz),
            Component::new("C(120,0)", zx),
        ],
        runner.trials(),
        Verdict::from_violation(s > 1.0),
    ))
}

/// CHSH: `C(A,B) − C(A,b) + C(a,B) + C(a,b)`; a faixa possível é [-4, 4]
pub fn chsh(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let [big_a, small_a] = CHSH_ALICE.map(f64::to_radians);
    let [big_b, small_b] = CHSH_BOB.map(f64::to_radians);

    let ab = runner.correlate_photons(big_a, big_b)?;
    let a_b = runner.correlate_photons(big_a, small_b)?;
    let a_big_b = runner.correlate_photons(small_a, big_b)?;
    let small_ab = runner.correlate_photons(small_a, small_b)?;
    let s = ab - a_b + a_big_b + small_ab;

    Ok(InequalityReport::new(
        Inequality::Chsh,
        s,
        vec![
            Component::new("C(A,B)", ab),
            Component::new("C(A,b)", a_b),
            Component::new("C(a,B)", a_big_b),
            Component::new("C(a,b)", small_ab),
        ],
        runner.trials(),
        Verdict::from_violation(!(-2.0..=2.0).contains(&s)),
    ))
}

/// CH74 com contagens de passagem; a faixa possível é [-6, 6]
///
/// Cada contagem vem de uma rodada própria de ensaios, todas com o
/// mesmo tamanho `N`.
pub fn ch74(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let [big_a, small_a] = CH74_ALICE.map(f64::to_radians);
    let [big_b, small_b] = CH74_BOB.map(f64::to_radians);

    let singles = runner.count_photons_separately(big_a, true, small_b, true);
    let n_ab = runner.count_photons_together(big_a, true, big_b, true);
    let n_a_b = runner.count_photons_together(big_a, true, small_b, true);
    let n_a_big_b = runner.count_photons_together(small_a, true, big_b, true);
    let n_small_ab = runner.count_photons_together(small_a, true, small_b, true);

    let total = runner.trials();
    let numerator = n_ab as f64 - n_a_b as f64 + n_a_big_b as f64 + n_small_ab as f64
        - singles.alice as f64
        - singles.bob as f64;
    let s = numerator / total as f64;

    Ok(InequalityReport::new(
        Inequality::Ch74,
        s,
        vec![
            Component::new("N(A,inf)", singles.alice as f64),
            Component::new("N(inf,b)", singles.bob as f64),
            Component::new("N(A,B)", n_ab as f64),
            Component::new("N(A,b)", n_a_b as f64),
            Component::new("N(a,B)", n_a_big_b as f64),
            Component::new("N(a,b)", n_small_ab as f64),
        ],
        total,
        Verdict::from_violation(s > 0.0),
    ))
}

/// Bell básico com frações de concordância em vez de correlações.
///
/// O escalar é a média das três frações; a violação exige todas em
/// [1/4, 1/3).
pub fn bell_percentage(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let [x, y, z] = BELL_PHOTON_ANGLES.map(f64::to_radians);
    let xy = runner.photons_same_fraction(x, y)?;
    let yz = runner.photons_same_fraction(y, z)?;
    let zx = runner.photons_same_fraction(z, x)?;
    let mean = (xy + yz + zx) / 3.0;

    let spooky = [xy, yz, zx]
        .iter()
        .all(|p| (QUANTUM_SAME_FRACTION..CLASSICAL_SAME_FRACTION).contains(p));

    Ok(InequalityReport::new(
        Inequality::Percentage,
        mean,
        vec![
            Component::new("P(0,60)", xy),
            Component::new("P(60,120)", yz),
            Component::new("P(120,0)", zx),
        ],
        runner.trials(),
        Verdict::from_violation(spooky),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inequality_names_roundtrip() {
        for inequality in Inequality::ALL {
            assert_eq!(inequality.name().parse::<Inequality>().unwrap(), inequality);
        }
        assert_eq!("CHSH".parse::<Inequality>().unwrap(), Inequality::Chsh);
    }

    #[test]
    fn test_unknown_inequality() {
        assert_eq!(
            "mermin".parse::<Inequality>(),
            Err(BellError::UnknownInequality("mermin".to_string()))
        );
    }

    #[test]
    fn test_verdict() {
        assert!(Verdict::from_violation(true).is_spooky());
        assert_eq!(Verdict::from_violation(false), Verdict::Classical);
        assert_eq!(Verdict::Spooky.to_string(), "Spooky");
        assert_eq!(Verdict::Classical.to_string(), "Classic");
    }

    #[test]
    fn test_report_component_lookup() {
        let mut runner = TrialRunner::seeded(8).with_trials(100).unwrap();
        let report = bell_spin(&mut runner).unwrap();
        assert_eq!(report.components.len(), 3);
        assert!(report.component("C(X,Y)").is_some());
        assert!(report.component("C(X,X)").is_none());
        assert_eq!(report.trials, 100);
    }

    #[test]
    fn test_bounds_match_verdict_sides() {
        assert_eq!(Inequality::Chsh.bound(), "-2.0 <= S <= 2.0");
        assert_eq!(Inequality::ChshTracks.bound(), "S <= 2.0");
        assert_eq!(Inequality::Ch74.bound(), "S <= 0.0");
    }

    #[test]
    fn test_ch74_divides_by_runner_trials() {
        let mut runner = TrialRunner::seeded(22).with_trials(1).unwrap();
        let report = ch74(&mut runner).unwrap();
        assert_eq!(report.trials, 1);
        assert!(report.statistic.is_finite());
    }

    #[test]
    fn test_chsh_verdict_consistent_with_statistic() {
        let mut runner = TrialRunner::seeded(21);
        let report = chsh(&mut runner).unwrap();
        assert_eq!(report.verdict.is_spooky(), report.statistic.abs() > 2.0);
    }
}
