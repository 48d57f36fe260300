use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;

/// Returns true if the path refers to stdin/stdout.
fn is_stdio(path: &Path) -> bool {
	path == Path::new("-")
}

/// Read and parse a file, or stdin when the path is `-`.
pub async fn read(path: &Path, reader: ivf::Reader) -> anyhow::Result<ivf::Ivf> {
	let ivf = if is_stdio(path) {
		tracing::debug!("reading from stdin");
		let mut stdin = tokio::io::stdin();
		reader
			.stream()
			.decode_from(&mut stdin)
			.await
			.context("failed to parse stdin")?
	} else {
		let data = tokio::fs::read(path)
			.await
			.with_context(|| format!("failed to read {}", path.display()))?;

		reader
			.parse(data)
			.with_context(|| format!("failed to parse {}", path.display()))?
	};

	tracing::debug!(header = ?ivf.header, frames = ivf.frames.len(), "parsed file");

	if !ivf.is_complete() {
		tracing::warn!(
			declared = ivf.header.frame_count,
			read = ivf.frames.len(),
			"file is truncated, ignoring the incomplete frame"
		);
	}

	Ok(ivf)
}

/// Write a file, or stdout when the path is `-`.
pub async fn write(path: &Path, data: Bytes) -> anyhow::Result<()> {
	if is_stdio(path) {
		let mut stdout = tokio::io::stdout();
		stdout.write_all(&data).await.context("failed to write stdout")?;
		stdout.flush().await.context("failed to flush stdout")?;
		return Ok(());
	}

	tokio::fs::write(path, &data)
		.await
		.with_context(|| format!("failed to write {}", path.display()))?;

	tracing::info!(path = %path.display(), size = data.len(), content_type = ivf::CONTENT_TYPE, "wrote file");

	Ok(())
}
