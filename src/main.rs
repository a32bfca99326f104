use clap::Parser;
use colored::Colorize;
use ip_helper_tool::config::Config;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Use the log4rs file when present, else warnings and errors to stderr.
fn init_logging(log_config: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(log_config).exists() {
        log4rs::init_file(log_config, Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::parse();
    if let Err(e) = init_logging(&config.log_config) {
        eprintln!("{}", format!("Error initializing log4rs: {e}").yellow());
    }
    log::info!("#Start main() action={} batch={:?}", config.action, config.batch);

    match ip_helper_tool::run(&config) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", format!("Error: {e}").red());
            std::process::exit(1);
        }
    }
}
