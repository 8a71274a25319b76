use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Logger that appends `<timestamp> - <LEVEL> - <message>` lines to `path`.
pub fn builder(path: &Path) -> io::Result<Builder> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    Ok(builder)
}

/// Install the file logger as the global `log` backend.
pub fn init(path: &Path) -> anyhow::Result<()> {
    builder(path)?.try_init()?;
    Ok(())
}
