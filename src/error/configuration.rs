use std::{error::Error, fmt};

/// `forceTZ` was requested on an engine built without fallback support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigurationError;

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nearest-zone fallback requested but the engine was built \
             without `support_nearest`"
        )
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
