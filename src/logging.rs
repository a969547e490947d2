use fern;
use log::{Level, LevelFilter};
use std::io;

const LOG_FILE: &str = "/tmp/partitioner.log";

/// Initialize logging with the fern logger.
///
/// Every record is passed to `callback`, and also written to stderr and to
/// `/tmp/partitioner.log`.
pub fn log<F: Fn(Level, &str) + Send + Sync + 'static>(callback: F) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .level(LevelFilter::Debug)
        // Lets a front end display the logs.
        .chain(fern::Output::call(move |record| {
            callback(record.level(), &format!("{}", record.args()))
        }))
        .chain({
            let mut logger = fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} partitioner{}] {}",
                        record.level(),
                        match (record.file(), record.line()) {
                            (Some(file), Some(line)) => format!(":{}:{}", file, line),
                            _ => "".into(),
                        },
                        message
                    ))
                })
                .chain(io::stderr());

            match fern::log_file(LOG_FILE) {
                Ok(log) => logger = logger.chain(log),
                Err(why) => {
                    eprintln!("failed to create log file at {}: {}", LOG_FILE, why);
                }
            };

            logger
        })
        .apply()?;

    Ok(())
}
