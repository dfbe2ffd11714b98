// ============================================================================
// Finite-Difference Stencils
// Symmetric central-difference coefficient tables
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Central-difference stencil used to approximate a first derivative.
///
/// Every stencil combines the symmetric differences
/// `d_k = f(x + k·dx) - f(x - k·dx)` for `k = 1..=width` as
///
/// ```text
/// f'(x) ≈ (w_1·d_1 + w_2·d_2 + ... ) / (denominator · dx)
/// ```
///
/// with small integer weights, so the whole combination stays in
/// fixed-point arithmetic and rounds exactly once, at the final division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stencil {
    /// `d_1 / (2·dx)`, second-order accurate
    CentralThreePoint,

    /// `(8·d_1 - d_2) / (12·dx)`, fourth-order accurate
    #[default]
    CentralFivePoint,

    /// `(45·d_1 - 9·d_2 + d_3) / (60·dx)`, sixth-order accurate
    CentralSevenPoint,
}

impl Stencil {
    /// Weights of `d_1, d_2, ...` in order.
    #[inline]
    pub fn weights(self) -> &'static [i8] {
        match self {
            Stencil::CentralThreePoint => &[1],
            Stencil::CentralFivePoint => &[8, -1],
            Stencil::CentralSevenPoint => &[45, -9, 1],
        }
    }

    /// Integer multiplying `dx` in the final division.
    #[inline]
    pub fn denominator(self) -> i8 {
        match self {
            Stencil::CentralThreePoint => 2,
            Stencil::CentralFivePoint => 12,
            Stencil::CentralSevenPoint => 60,
        }
    }

    /// Order of accuracy in `dx`.
    #[inline]
    pub fn order(self) -> u32 {
        2 * self.weights().len() as u32
    }

    /// Largest multiple of `dx` sampled on either side of `x`.
    #[inline]
    pub fn width(self) -> usize {
        self.weights().len()
    }

    /// Number of function evaluations per derivative.
    #[inline]
    pub fn evaluations(self) -> usize {
        2 * self.width()
    }

    pub fn name(self) -> &'static str {
        match self {
            Stencil::CentralThreePoint => "central-3",
            Stencil::CentralFivePoint => "central-5",
            Stencil::CentralSevenPoint => "central-7",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stencil; 3] = [
        Stencil::CentralThreePoint,
        Stencil::CentralFivePoint,
        Stencil::CentralSevenPoint,
    ];

    #[test]
    fn test_default_is_five_point() {
        assert_eq!(Stencil::default(), Stencil::CentralFivePoint);
    }

    #[test]
    fn test_shape() {
        assert_eq!(Stencil::CentralThreePoint.order(), 2);
        assert_eq!(Stencil::CentralFivePoint.order(), 4);
        assert_eq!(Stencil::CentralSevenPoint.order(), 6);

        assert_eq!(Stencil::CentralFivePoint.width(), 2);
        assert_eq!(Stencil::CentralFivePoint.evaluations(), 4);
        assert_eq!(Stencil::CentralSevenPoint.evaluations(), 6);
    }

    #[test]
    fn test_weights_are_consistent() {
        // Exact on f(x) = x: d_k = 2k·dx, so sum(w_k · 2k) must equal the denominator.
        for stencil in ALL {
            let sum: i32 = stencil
                .weights()
                .iter()
                .zip(1..)
                .map(|(&w, k)| i32::from(w) * 2 * k)
                .sum();
            assert_eq!(sum, i32::from(stencil.denominator()), "{}", stencil.name());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Stencil::CentralThreePoint.name(), "central-3");
        assert_eq!(Stencil::CentralSevenPoint.name(), "central-7");
    }
}
