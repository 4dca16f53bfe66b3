pub mod cubic;
pub mod quadratic;

/// A field that serves as a level of the BLS12-381 extension tower.
pub trait ExtField: ff::Field {
    /// The element adjoined by the next level up: the next level is
    /// `Self[X]/(X^n - NON_RESIDUE)`.
    const NON_RESIDUE: Self;

    fn mul_by_nonresidue(&self) -> Self;

    /// Raises the element to the `p^power`-th power.
    fn frobenius_map(&mut self, power: usize);
}
