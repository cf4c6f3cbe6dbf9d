/// Zadeh connectives on membership degrees.
///
/// AND is the minimum, OR the maximum and NOT the complement `1 - x`.
pub trait FuzzyLogic: Copy {
    /// Fuzzy AND (minimum)
    #[must_use]
    fn and(self, other: Self) -> Self;

    /// Fuzzy OR (maximum)
    #[must_use]
    fn or(self, other: Self) -> Self;

    /// Fuzzy NOT (complement)
    #[must_use]
    fn complement(self) -> Self;
}

impl FuzzyLogic for f64 {
    /// # Example
    /// ```rust
    /// use mamdani_rs::operations::FuzzyLogic;
    ///
    /// assert_eq!(0.3_f64.and(0.8), 0.3);
    /// ```
    fn and(self, other: Self) -> Self {
        self.min(other)
    }

    /// # Example
    /// ```rust
    /// use mamdani_rs::operations::FuzzyLogic;
    ///
    /// assert_eq!(0.3_f64.or(0.8), 0.8);
    /// ```
    fn or(self, other: Self) -> Self {
        self.max(other)
    }

    /// # Example
    /// ```rust
    /// use mamdani_rs::operations::FuzzyLogic;
    ///
    /// assert_eq!(0.25_f64.complement(), 0.75);
    /// ```
    fn complement(self) -> Self {
        1.0 - self
    }
}
