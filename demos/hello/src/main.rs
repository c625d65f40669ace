//! Greets someone using settings gathered from flags, `HELLO_*`
//! environment variables, and built-in defaults.
//!
//! ```text
//! $ HELLO_GREETING=Howdy hello --recipient=Ada --excited
//! Howdy, Ada!
//! ```

use std::io::{self, Write};
use std::time::Duration;

use nest_config::{Configurator, NestConfig};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, NestConfig)]
struct HelloConfig {
    /// Who to greet.
    #[nest(flag, env, required)]
    pub recipient: String,

    /// Opening word of the greeting.
    #[nest(flag, env, default = "Hello")]
    pub greeting: String,

    /// Finish with an exclamation mark.
    #[nest(flag, env)]
    pub excited: bool,

    /// How many times to repeat the greeting.
    #[nest(flag, env, default = 1)]
    pub repeat: u32,

    #[nest(prefix = "pause")]
    pub pause: Pause,
}

#[derive(Debug, Default, NestConfig)]
struct Pause {
    /// Delay between repeated greetings.
    #[nest(flag, env, split_words, default = "0s")]
    pub between_lines: Duration,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();

    let configurator = Configurator::new();
    configurator.set_name("hello");
    configurator.set_env_prefix("hello");

    let mut config = HelloConfig::default();
    match configurator.load(&mut config) {
        Err(err) if err.is_help_request() => return Ok(()),
        other => other?,
    }
    debug!(?config, "configuration loaded");

    let punctuation = if config.excited { "!" } else { "." };
    let mut stdout = io::stdout().lock();
    for round in 0..config.repeat {
        if round > 0 && !config.pause.between_lines.is_zero() {
            std::thread::sleep(config.pause.between_lines);
        }
        writeln!(
            stdout,
            "{}, {}{punctuation}",
            config.greeting, config.recipient
        )?;
    }
    info!(repeat = config.repeat, "greeting delivered");
    Ok(())
}
