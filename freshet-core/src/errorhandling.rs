//! Global error handling mechanisms.

/// Let Freshet handle fatal errors in the process.
pub trait FreshetFatal<T, E>: Sized + sealed::Sealed {
    /// Abort the computation as gracefully as possible due to a fatal non-recoverable error.
    fn freshet_fatal(self) -> T;
}

impl<T, E> FreshetFatal<T, E> for Result<T, E>
where
    E: std::fmt::Debug + std::error::Error + Send + Sync + 'static,
{
    fn freshet_fatal(self) -> T {
        match self {
            Ok(x) => x,
            Err(e) => {
                let report = eyre::Report::new(e);
                panic!("{report:?}")
            }
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl<T, E> Sealed for Result<T, E> {}
}
