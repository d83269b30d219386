/// Receives events emitted by a solver as it runs.
///
/// Observers are read-only taps: a run always executes to completion, so
/// there is no action for an observer to return.
///
/// The unit type `()` is a no-op observer, and any `FnMut(&E)` closure is an
/// observer, which keeps call sites short:
///
/// ```ignore
/// use contagion_solvers::transient::segmented::{self, Config, Event};
///
/// let mut rates = Vec::new();
/// segmented::run_observed(
///     span,
///     initial,
///     &mut controller,
///     &dynamics,
///     &Config::default(),
///     |event: &Event| rates.push(event.rate),
/// )?;
/// ```
pub trait Observer<E> {
    /// Handles a single event.
    fn observe(&mut self, event: &E);
}

impl<E> Observer<E> for () {
    fn observe(&mut self, _event: &E) {}
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event);
    }
}
