//! BLS12-381: the base field, its tower, both source groups and the
//! optimal ate pairing into the target group.

mod engine;
pub(crate) mod fq;
mod fq12;
mod fq2;
mod fq6;
mod g1;
mod g2;

pub use engine::{
    final_exponentiation, multi_miller_loop, pairing, G2Prepared, Gt, PairingEngine,
    LINE_TABLE_LEN,
};
pub use fq::{Fq, FqRepr, MODULUS};
pub use fq12::Fq12;
pub use fq2::Fq2;
pub use fq6::Fq6;
pub use g1::{G1Affine, G1};
pub use g2::{G2Affine, G2};

/// `|x|`, where `x = -0xd201000000010000` parameterizes the curve family.
pub const BLS_X: u64 = 0xd201_0000_0001_0000;
pub const BLS_X_IS_NEGATIVE: bool = true;

/// Order `r` of G1, G2 and Gt, as little-endian limbs.
pub const R_LIMBS: [u64; 4] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];
