//! # 🔔 bell-core — Hidden-Variable Bell Experiments
//!
//! Simula pares de partículas "emaranhadas" com um modelo clássico de
//! variáveis ocultas locais e mede as estatísticas usadas nas
//! desigualdades de Bell (básica, CHSH, CH74). O objetivo é didático:
//! comparar o que o modelo produz com os limites clássicos e com a
//! previsão quântica.
//!
//! ## Computational Complexity
//!
//! Every reduction is O(N) in the trial count; evaluators run a fixed
//! number of reductions (three to six), so a full report is O(N).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │         Inequality Evaluators (bell, experiment)│
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  TrialRunner + Agreement / JointTally     │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Photon (alignment)  Electron (x, y, z)   │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  RandomSource (StdRng, seed opcional)     │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use bell_core::{BellConfig, Inequality, TrialRunner};
//!
//! let mut runner = TrialRunner::new(&BellConfig::seeded(42))?;
//! let report = Inequality::Chsh.evaluate(&mut runner)?;
//! println!("S = {} ({})", report.statistic, report.verdict);
//! ```

pub mod bell;
pub mod config;
pub mod electron;
pub mod error;
pub mod experiment;
pub mod photon;
pub mod random;
pub mod trials;

pub use bell::{
    Component, Inequality, InequalityReport, Verdict, bell_percentage, bell_photon, bell_spin,
    ch74, chsh,
};
pub use config::{BellConfig, DEFAULT_TRIALS};
pub use electron::{Electron, Spin, SpinAxis};
pub use error::{BellError, BellResult};
pub use experiment::{chsh_tracks, tri_axis_electron, tri_axis_photon};
pub use photon::{POLARIZER_THRESHOLD, Photon};
pub use random::{RandomSource, rng_from_seed};
pub use trials::{Agreement, GoalCounts, JointTally, PairMode, TrialRunner};
