//! Fonte de aleatoriedade compartilhada pelas partículas
//!
//! Uma única fonte por execução alimenta todos os `randomize` e sorteios
//! de spin, em vez de um gerador por partícula.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Capacidade mínima de sorteio usada pelo modelo de variáveis ocultas
pub trait RandomSource {
    /// Real uniforme em [0, 1)
    fn unit(&mut self) -> f64;

    /// Moeda honesta
    fn coin(&mut self) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }

    #[inline]
    fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

/// Cria o gerador de uma execução: determinístico com seed, entropia do SO sem
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
