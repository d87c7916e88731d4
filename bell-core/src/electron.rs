//! # Electron — spin em três eixos como variáveis ocultas
//!
//! Cada eixo guarda um valor ±1 independente. Medir um eixo devolve o
//! valor dele e sorteia de novo os outros dois (decoerência).

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BellError, BellResult};
use crate::random::RandomSource;

/// Eixo de spin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpinAxis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl SpinAxis {
    /// Os três eixos, em ordem
    pub const ALL: [SpinAxis; 3] = [SpinAxis::X, SpinAxis::Y, SpinAxis::Z];

    /// Próximo eixo na rotação X → Y → Z → X
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }

    /// Nome curto
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

impl TryFrom<u8> for SpinAxis {
    type Error = BellError;

    fn try_from(index: u8) -> BellResult<Self> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            other => Err(BellError::InvalidAxis(other.to_string())),
        }
    }
}

impl FromStr for SpinAxis {
    type Err = BellError;

    fn from_str(s: &str) -> BellResult<Self> {
        match s.trim() {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            "z" | "Z" => Ok(Self::Z),
            other => Err(BellError::InvalidAxis(other.to_string())),
        }
    }
}

impl fmt::Display for SpinAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Valor de spin em um eixo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Spin {
    Up = 1,
    Down = -1,
}

impl Spin {
    /// Sorteia ±1 com probabilidade 1/2
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        if rng.coin() { Self::Up } else { Self::Down }
    }

    /// +1 ou -1
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl Neg for Spin {
    type Output = Spin;

    fn neg(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

/// Elétron com spin nos três eixos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Electron {
    spin_x: Spin,
    spin_y: Spin,
    spin_z: Spin,
}

impl Electron {
    /// Cria elétron com os três spins sorteados
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            spin_x: Spin::random(rng),
            spin_y: Spin::random(rng),
            spin_z: Spin::random(rng),
        }
    }

    /// Cria elétron com spins conhecidos
    pub fn with_spins(spin_x: Spin, spin_y: Spin, spin_z: Spin) -> Self {
        Self { spin_x, spin_y, spin_z }
    }

    /// Valor oculto em um eixo, sem medir
    #[cfg(test)]
    pub(crate) fn spin(&self, axis: SpinAxis) -> Spin {
        match axis {
            SpinAxis::X => self.spin_x,
            SpinAxis::Y => self.spin_y,
            SpinAxis::Z => self.spin_z,
        }
    }

    /// Perde qualquer emaranhamento
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.spin_x = Spin::random(rng);
        self.spin_y = Spin::random(rng);
        self.spin_z = Spin::random(rng);
    }

    /// Emaranhamento perfeito: spins opostos aos de `other` neste instante.
    ///
    /// É uma cópia, não um vínculo; medições posteriores em `other` não
    /// chegam aqui.
    pub fn entangle_with(&mut self, other: &Electron) {
        self.spin_x = -other.spin_x;
        self.spin_y = -other.spin_y;
        self.spin_z = -other.spin_z;
    }

    /// Mede o spin em `axis`; os outros dois eixos são sorteados de novo
    pub fn measure<R: RandomSource + ?Sized>(&mut self, axis: SpinAxis, rng: &mut R) -> Spin {
        match axis {
            SpinAxis::X => {
                self.spin_y = Spin::random(rng);
                self.spin_z = Spin::random(rng);
                self.spin_x
            }
            SpinAxis::Y => {
                self.spin_x = Spin::random(rng);
                self.spin_z = Spin::random(rng);
                self.spin_y
            }
            SpinAxis::Z => {
                self.spin_x = Spin::random(rng);
                self.spin_y = Spin::random(rng);
                self.spin_z
            }
        }
    }

    /// Forma por valor de [`Electron::measure`]
    pub fn observe<R: RandomSource + ?Sized>(
        mut self,
        axis: SpinAxis,
        rng: &mut R,
    ) -> (Spin, Electron) {
        let spin = self.measure(axis, rng);
        (spin, self)
    }
}
