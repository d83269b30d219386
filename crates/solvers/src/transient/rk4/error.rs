use std::error::Error as StdError;

/// Errors that can occur during Runge–Kutta integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("derivative failed at t = {time}: {source}")]
    Derivative {
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("span needs {steps} steps, more than the limit of {max}")]
    TooManySteps { steps: f64, max: usize },
}

impl Error {
    pub(crate) fn derivative<E: StdError + Send + Sync + 'static>(time: f64, err: E) -> Self {
        Self::Derivative {
            time,
            source: Box::new(err),
        }
    }
}
