use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

const LOG_CONFIG_ENV: &str = "COLLAGE_LOG_CONFIG";
const DEFAULT_LOG_CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    let configured = std::env::var(LOG_CONFIG_ENV).ok();
    let config_file = configured.as_deref().unwrap_or(DEFAULT_LOG_CONFIG_FILE);
    match log4rs::init_file(config_file, Default::default()) {
        Ok(()) => return,
        Err(e) if configured.is_some() => {
            eprintln!("Unable to load log configuration '{}': {}", config_file, e)
        }
        // no default config file, log warnings to stderr
        Err(_) => {}
    }
    match fallback_config() {
        Some(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Unable to initialise logging: {}", e);
            }
        }
        None => eprintln!("Unable to build the stderr logging configuration"),
    }
}

fn fallback_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .ok()
}

#[cfg(test)]
mod test {
    use super::fallback_config;

    #[test]
    fn fallback_configuration_is_valid() {
        let config = fallback_config().expect("stderr configuration rejected");
        assert_eq!(config.root().level(), log::LevelFilter::Warn);
        assert_eq!(config.appenders().len(), 1);
    }
}
