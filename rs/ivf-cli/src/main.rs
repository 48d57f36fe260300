mod info;
mod input;
mod log;
mod remux;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[command(name = "ivf", version, about = "Inspect, validate and rewrite IVF files")]
pub struct Cli {
	#[command(flatten)]
	log: log::Log,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
	/// Print the header and a summary of the frames.
	Info {
		/// The IVF file, or `-` for stdin.
		path: PathBuf,

		/// Print JSON instead of text.
		#[arg(long)]
		json: bool,
	},

	/// Print one line per frame: index, size, ticks, microseconds and type.
	Frames {
		/// The IVF file, or `-` for stdin.
		path: PathBuf,
	},

	/// Parse the file and report any truncated frames.
	Check {
		/// The IVF file, or `-` for stdin.
		path: PathBuf,

		/// Fail if fewer frames are present than declared.
		#[arg(long)]
		strict: bool,
	},

	/// Rewrite the file with a standard header, dropping any truncated frame.
	Remux {
		/// The IVF file, or `-` for stdin.
		input: PathBuf,

		/// The output file, or `-` for stdout.
		output: PathBuf,

		/// Convert timestamps to a `1 / fps` timebase.
		#[arg(long)]
		fps: Option<u32>,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.log.init();

	match cli.command {
		Command::Info { path, json } => {
			let ivf = input::read(&path, ivf::Reader::new()).await?;
			let summary = info::Summary::new(&ivf);

			if json {
				println!("{}", serde_json::to_string_pretty(&summary)?);
			} else {
				println!("{summary}");
			}
		}
		Command::Frames { path } => {
			let ivf = input::read(&path, ivf::Reader::new()).await?;
			for line in info::frame_lines(&ivf) {
				println!("{line}");
			}
		}
		Command::Check { path, strict } => {
			let reader = ivf::Reader::new().strict(strict);
			let ivf = input::read(&path, reader).await?;

			tracing::info!(
				path = %path.display(),
				frames = ivf.frames.len(),
				declared = ivf.header.frame_count,
				complete = ivf.is_complete(),
				"checked file"
			);
		}
		Command::Remux { input: source, output, fps } => {
			let ivf = input::read(&source, ivf::Reader::new()).await?;
			let data = remux::remux(&ivf, fps)?;
			input::write(&output, data).await?;
		}
	}

	Ok(())
}
