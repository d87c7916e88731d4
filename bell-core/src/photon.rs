//! # Photon — polarização linear com uma variável oculta
//!
//! O único estado é o ângulo de alinhamento (radianos). Toda operação
//! sobrescreve esse ângulo; nada é combinado.
//!
//! ```text
//! randomize()        alignment ← U[0, 2π)
//! entangle_with(o)   alignment ← o.alignment
//! measure(θ)         passa se |cos|θ − alignment|| < √2/2 ; alignment ← θ
//! ```
//!
//! Polarização elíptica não é modelada.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Limiar do filtro: produz 50% de passagem para alinhamento uniforme
pub const POLARIZER_THRESHOLD: f64 = FRAC_1_SQRT_2;

/// Fóton com polarização linear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Photon {
    alignment: f64,
}

impl Photon {
    /// Cria fóton com alinhamento aleatório
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            alignment: random_alignment(rng),
        }
    }

    /// Cria fóton com alinhamento conhecido
    pub fn with_alignment(alignment: f64) -> Self {
        Self { alignment }
    }

    /// Variável oculta; só para inspeção em testes
    #[cfg(test)]
    pub(crate) fn alignment(&self) -> f64 {
        self.alignment
    }

    /// Perde qualquer emaranhamento
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.alignment = random_alignment(rng);
    }

    /// Emaranhamento perfeito: passa a ter o mesmo alinhamento que `other`
    pub fn entangle_with(&mut self, other: &Photon) {
        self.alignment = other.alignment;
    }

    /// Testa se o fóton passa por um filtro em `angle`.
    ///
    /// A medição não é um acessor puro: depois dela o fóton fica alinhado
    /// exatamente em `angle`. Repetir no mesmo ângulo é determinístico;
    /// medir em outro ângulo já não carrega o alinhamento original.
    pub fn measure(&mut self, angle: f64) -> bool {
        let previous = self.alignment;
        self.alignment = angle;
        let diff = (angle - previous).abs().cos().abs();
        diff < POLARIZER_THRESHOLD
    }

    /// Forma por valor de [`Photon::measure`]: devolve o resultado e o novo estado
    pub fn observe(mut self, angle: f64) -> (bool, Photon) {
        let passed = self.measure(angle);
        (passed, self)
    }
}

fn random_alignment<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    rng.unit() * TAU
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::rng_from_seed;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_new_alignment_in_range() {
        let mut rng = rng_from_seed(Some(1));
        for _ in 0..1_000 {
            let photon = Photon::new(&mut rng);
            assert!((0.0..TAU).contains(&photon.alignment()));
        }
    }

    #[test]
    fn test_measure_collapses_alignment() {
        let mut photon = Photon::with_alignment(0.3);
        photon.measure(1.2);
        assert_eq!(photon.alignment(), 1.2);
    }

    #[test]
    fn test_filter_threshold() {
        // perpendicular: |cos| = 0, passa
        assert!(Photon::with_alignment(0.0).measure(FRAC_PI_2));
        // paralelo: |cos| = 1, bloqueado
        assert!(!Photon::with_alignment(0.0).measure(0.0));
        // 30°: |cos| ≈ 0.866, bloqueado
        assert!(!Photon::with_alignment(0.0).measure(30f64.to_radians()));
        // 60°: |cos| = 0.5, passa
        assert!(Photon::with_alignment(0.0).measure(60f64.to_radians()));
    }

    #[test]
    fn test_collapsed_photon_blocked_at_own_angle() {
        let mut photon = Photon::with_alignment(2.0);
        let angle = 0.7;
        photon.measure(angle);
        for _ in 0..10 {
            assert!(!photon.measure(angle));
        }
    }

    #[test]
    fn test_entangle_copies_alignment() {
        let one = Photon::with_alignment(1.234);
        let mut two = Photon::with_alignment(5.0);
        two.entangle_with(&one);
        assert_eq!(two.alignment(), 1.234);
    }

    #[test]
    fn test_randomize_overwrites() {
        let mut rng = rng_from_seed(Some(3));
        let mut photon = Photon::with_alignment(-1.0);
        photon.randomize(&mut rng);
        assert!(photon.alignment() >= 0.0);
    }

    #[test]
    fn test_observe_matches_measure() {
        let original = Photon::with_alignment(0.4);
        let mut measured = original;
        let expected = measured.measure(1.9);

        let (passed, after) = original.observe(1.9);
        assert_eq!(passed, expected);
        assert_eq!(after, measured);
        // o valor original continua intacto
        assert_eq!(original.alignment(), 0.4);
    }
}
