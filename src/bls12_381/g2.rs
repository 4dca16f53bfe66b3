//! The group G2 of BLS12-381, on the M-type sextic twist
//! `y^2 = x^3 + 4(u + 1)` over Fq2.

use subtle::{ConditionallySelectable, ConstantTimeEq};

use super::fq::Fq;
use super::fq2::Fq2;
use super::g1::{G1_B, G1_B3};

crate::new_curve_impl!(
    (pub),
    G2,
    G2Affine,
    Fq2,
    (G2_GENERATOR_X, G2_GENERATOR_Y),
    G2_B,
    G2_B3,
    "bls12_381_g2",
);

const G2_GENERATOR_X: Fq2 = Fq2::new(
    Fq([
        0xf5f28fa202940a10,
        0xb3f5fb2687b4961a,
        0xa1a893b53e2ae580,
        0x9894999d1a3caee9,
        0x6f67b7631863366b,
        0x058191924350bcd7,
    ]),
    Fq([
        0xa5a9c0759e23f606,
        0xaaa0c59dbccd60c3,
        0x3bb17e18e2867806,
        0x1b1ab6cc8541b367,
        0xc2b6ed0ef2158547,
        0x11922a097360edf3,
    ]),
);

const G2_GENERATOR_Y: Fq2 = Fq2::new(
    Fq([
        0x4c730af860494c4a,
        0x597cfa1f5e369c5a,
        0xe7e6856caa0a635a,
        0xbbefb5e96e0d495f,
        0x07d3a975f0ef25a2,
        0x0083fd8e7e80dae5,
    ]),
    Fq([
        0xadc0fc92df64b05d,
        0x18aa270a2b1461dc,
        0x86adac6a3be4eba0,
        0x79495c4ec93da33a,
        0xe7175850a43ccaed,
        0x0b2bc2a163de1bf2,
    ]),
);

/// 4(u + 1)
pub(crate) const G2_B: Fq2 = Fq2::new(G1_B, G1_B);

/// 3 * 4(u + 1)
pub(crate) const G2_B3: Fq2 = Fq2::new(G1_B3, G1_B3);

#[cfg(test)]
mod test {
    use super::*;
    use crate::ff_ext::ExtField;
    use core::str::FromStr;

    crate::curve_testing_suite!(G2, G2Affine);

    #[test]
    fn test_constants() {
        assert_eq!(G2_B, Fq2::NON_RESIDUE.scale(&Fq::from(4)));
        assert_eq!(G2_B3, G2_B.double() + G2_B);
        assert_eq!(G2::CURVE_ID, "bls12_381_g2");
    }

    #[test]
    fn test_generator() {
        let g = G2Affine::generator();
        let fe = |s: &str| Fq::from_str(s).unwrap();
        let x = Fq2::new(
            fe("0x024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"),
            fe("0x13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e"),
        );
        let y = Fq2::new(
            fe("0x0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801"),
            fe("0x0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be"),
        );
        assert_eq!(*g.x(), x);
        assert_eq!(*g.y(), y);
    }
}
