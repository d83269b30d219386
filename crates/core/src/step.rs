/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the fixed-step solvers advance a value via
/// `value + derivative * delta`, where the derivative is taken with respect to
/// `Delta`. For epidemic models `Delta` is elapsed time in days, but nothing
/// here assumes that.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// Shorthand for the fully qualified [`StepIntegrable::Derivative`] path.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
