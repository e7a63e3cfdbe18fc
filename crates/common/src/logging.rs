use error_stack::{Report, ResultExt};
use log::LevelFilter;

use crate::error::SignedUrlError;

fn dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
}

/// Initialize logging for the application
/// Should be called once at the start of main()
///
/// # Errors
///
/// Returns [`SignedUrlError::Configuration`] if a logger is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), Report<SignedUrlError>> {
    dispatch(level)
        .apply()
        .change_context(SignedUrlError::Configuration {
            message: "Failed to initialize logger".into(),
        })
}
