use crate::config::Config;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

/// Installs the global subscriber: appends to `log_file` when configured,
/// stderr otherwise.
pub fn init(config: &Config) -> io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_ansi(false);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}
