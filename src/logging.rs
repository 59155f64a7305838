use crate::features::LoggingFeatures;
pub use log::LevelFilter::*;
use log::LevelFilter;

/// Installs the global logger. Stdout is reserved for the game protocol, so records go to
/// stderr and, when given, to `log_file`.
pub fn setup_logging(verbosity: LevelFilter, log_file: Option<&str>) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new()
        .level(verbosity)
        .format(|out, message, record| out.finish(format_args!("({}) {}: {}", record.level(), record.target(), message)))
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|err| format!("Failed to open log file {}: {}", path, err))?;

        dispatch = dispatch.chain(file);
    }

    dispatch
        .apply()
        .map_err(|err| format!("Failed to install logger: {}", err))
}

pub fn setup_from_features(features: &LoggingFeatures) -> Result<(), String> {
    setup_logging(features.level_filter()?, features.file.as_deref())
}
