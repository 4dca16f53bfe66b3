//! The group G1 of BLS12-381: `y^2 = x^3 + 4` over Fq.

use subtle::{ConditionallySelectable, ConstantTimeEq};

use super::fq::Fq;

crate::new_curve_impl!(
    (pub),
    G1,
    G1Affine,
    Fq,
    (G1_GENERATOR_X, G1_GENERATOR_Y),
    G1_B,
    G1_B3,
    "bls12_381_g1",
);

const G1_GENERATOR_X: Fq = Fq([
    0x5cb38790fd530c16,
    0x7817fc679976fff5,
    0x154f95c7143ba1c1,
    0xf0ae6acdf3d0e747,
    0xedce6ecc21dbf440,
    0x120177419e0bfb75,
]);

const G1_GENERATOR_Y: Fq = Fq([
    0xbaac93d50ce72271,
    0x8c22631a7918fd8e,
    0xdd595f13570725ce,
    0x51ac582950405194,
    0x0e1c8c3fad0059c0,
    0x0bbc3efc5008a26a,
]);

/// 4
pub(crate) const G1_B: Fq = Fq([
    0xaa270000000cfff3,
    0x53cc0032fc34000a,
    0x478fe97a6b0a807f,
    0xb1d37ebee6ba24d7,
    0x8ec9733bbf78ab2f,
    0x09d645513d83de7e,
]);

/// 3 * 4
pub(crate) const G1_B3: Fq = Fq([
    0x447600000027552e,
    0xdcb8009a43480020,
    0x6f7ee9ce4a6e8b59,
    0xb10330b7c0a95bc6,
    0x6140b1fcfb1e54b7,
    0x0381be097f0bb4e1,
]);
