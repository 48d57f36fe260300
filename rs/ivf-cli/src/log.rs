use clap::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The log configuration.
#[derive(Args, Clone, Debug)]
pub struct Log {
	/// The default log level, overridden per-target by RUST_LOG.
	#[arg(long = "log-level", env = "IVF_LOG_LEVEL", default_value = "info")]
	pub level: tracing::Level,
}

impl Log {
	/// Install a global subscriber that writes to stderr, keeping stdout for command output.
	pub fn init(&self) {
		let filter = EnvFilter::builder()
			.with_default_directive(LevelFilter::from_level(self.level).into())
			.from_env_lossy();

		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.init();
	}
}
