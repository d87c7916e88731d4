//! Experimentos de passada única
//!
//! Diferente dos avaliadores em [`crate::bell`], que rodam uma série de
//! ensaios por correlação, aqui todas as escolhas de ângulo/eixo se
//! alternam dentro de um único laço.

use rand::Rng;

use crate::bell::{CHSH_ALICE, CHSH_BOB, Component, Inequality, InequalityReport, Verdict};
use crate::electron::{Electron, SpinAxis};
use crate::error::{BellError, BellResult};
use crate::photon::Photon;
use crate::trials::{Agreement, JointTally, PairMode, TrialRunner};

/// Filtros (graus) do experimento de três eixos com fótons
pub const TRI_AXIS_FILTERS: [f64; 3] = [60.0, 90.0, 120.0];

/// Faixa "spooky" da porcentagem de passagem conjunta
const SPOOKY_PERCENT_LOW: f64 = 25.0;
const SPOOKY_PERCENT_HIGH: f64 = 33.33;

/// Três eixos com fótons: Alice e Bob nunca usam o mesmo filtro.
///
/// Conta passagens de cada lado e conjuntas; a estatística é a
/// porcentagem de passagem conjunta.
pub fn tri_axis_photon(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let filters = TRI_AXIS_FILTERS.map(f64::to_radians);
    let mut one = Photon::new(runner.rng());
    let mut two = Photon::new(runner.rng());

    let mut count_a = 0usize;
    let mut count_b = 0usize;
    let mut count_ab = 0usize;
    let mut count_all = 0usize;

    for i in 0..runner.trials() {
        let alice = filters[i % 3];
        let bob = filters[(i + 1) % 3];

        runner.prepare_photons(&mut one, &mut two, PairMode::Entangled);
        let answer_a = one.measure(alice);
        let answer_b = two.measure(bob);

        count_all += 1;
        count_a += usize::from(answer_a);
        count_b += usize::from(answer_b);
        count_ab += usize::from(answer_a && answer_b);
    }

    if count_all == 0 {
        return Err(BellError::NoTrials);
    }
    let percent = |count: usize| count as f64 * 100.0 / count_all as f64;
    let percent_ab = percent(count_ab);
    let spooky = (SPOOKY_PERCENT_LOW..SPOOKY_PERCENT_HIGH).contains(&percent_ab);

    Ok(InequalityReport::new(
        Inequality::TriAxisPhoton,
        percent_ab,
        vec![
            Component::new("A%", percent(count_a)),
            Component::new("B%", percent(count_b)),
            Component::new("AB", count_ab as f64),
        ],
        count_all,
        Verdict::from_violation(spooky),
    ))
}

/// Três eixos com elétrons, pares X+Y, Y+Z e Z+X alternados.
///
/// Precisa de pelo menos três ensaios para que cada par de eixos tenha
/// contagem.
pub fn tri_axis_electron(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let mut one = Electron::new(runner.rng());
    let mut two = Electron::new(runner.rng());

    let mut overall = Agreement::default();
    let mut per_pair = [Agreement::default(); 3];

    for i in 0..runner.trials() {
        let index = i % 3;
        let alice = SpinAxis::ALL[index];
        let bob = alice.next();

        runner.prepare_electrons(&mut one, &mut two, PairMode::Entangled);
        let answer_a = one.measure(alice, runner.rng());
        let answer_b = two.measure(bob, runner.rng());

        let agreed = answer_a == answer_b;
        overall.record(agreed);
        per_pair[index].record(agreed);
    }

    let ce = overall.correlation()?;
    let cxy = per_pair[0].correlation()?;
    let cyz = per_pair[1].correlation()?;
    let czx = per_pair[2].correlation()?;
    let ch = cxy - cyz - czx;

    Ok(InequalityReport::new(
        Inequality::TriAxisElectron,
        ch,
        vec![
            Component::new("Ce", ce),
            Component::new("C(X,Y)", cxy),
            Component::new("C(Y,Z)", cyz),
            Component::new("C(Z,X)", czx),
        ],
        overall.total(),
        Verdict::from_violation(ch >= 1.0),
    ))
}

/// CHSH com escolha aleatória de filtro por ensaio, uma trilha por combinação
pub fn chsh_tracks(runner: &mut TrialRunner) -> BellResult<InequalityReport> {
    let filters_a = CHSH_ALICE.map(f64::to_radians);
    let filters_b = CHSH_BOB.map(f64::to_radians);
    let mut one = Photon::new(runner.rng());
    let mut two = Photon::new(runner.rng());

    let mut tracks = [JointTally::default(); 4];

    for _ in 0..runner.trials() {
        let index_a = runner.rng().gen_range(0..filters_a.len());
        let index_b = runner.rng().gen_range(0..filters_b.len());

        runner.prepare_photons(&mut one, &mut two, PairMode::Entangled);
        let answer_a = one.measure(filters_a[index_a]);
        let answer_b = two.measure(filters_b[index_b]);

        tracks[index_a * 2 + index_b].record(answer_a, answer_b);
    }

    let [e0, e1, e2, e3] = tracks.map(|track| track.correlation());
    let s = e0 - e1 + e2 + e3;

    Ok(InequalityReport::new(
        Inequality::ChshTracks,
        s,
        vec![
            Component::new("E(A,B)", e0),
            Component::new("E(A,b)", e1),
            Component::new("E(a,B)", e2),
            Component::new("E(a,b)", e3),
        ],
        tracks.iter().map(JointTally::total).sum(),
        Verdict::from_violation(s > 2.0),
    ))
}
