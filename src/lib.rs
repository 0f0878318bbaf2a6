#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Error, Result};
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, trace, warn};

pub mod api;
pub mod config;
pub mod data;
pub mod eval;
pub mod logging;
pub mod pipeline;
pub mod prompt;
