use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use tokio::fs::File;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;

use crate::models::Catalog;
use crate::services::classifier::LineClassifier;
use crate::services::lines::LineAssembler;

/// Read buffer size for local playlist files
const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Why an ingest run was abandoned. Unparseable records are not errors (they
/// classify as skips); only the byte source failing aborts the run, and the
/// partially built catalog is dropped with it.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("file could not be processed: {0}")]
    Read(#[from] std::io::Error),
}

/// Spaces voluntary scheduler yields during a long parse so one huge
/// playlist cannot monopolize a worker thread. Counts every payload line
/// processed against a pending metadata line, classified or not.
struct YieldGate {
    every: usize,
    processed: usize,
}

impl YieldGate {
    fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            processed: 0,
        }
    }

    async fn tick(&mut self) {
        self.processed += 1;
        if self.processed % self.every == 0 {
            tokio::task::yield_now().await;
        }
    }

    fn processed(&self) -> usize {
        self.processed
    }
}

/// Streaming M3U-to-catalog parser.
///
/// Pairing state is a single pending-metadata slot: a `#EXTINF` line fills
/// (or overwrites) it, the next non-blank line of any shape is taken as its
/// payload, and the pair goes through the classifier into the catalog.
pub struct M3UParser {
    yield_every: usize,
}

impl M3UParser {
    pub fn new(yield_every: usize) -> Self {
        Self { yield_every }
    }

    /// Parse a local playlist file into a finished, sorted catalog.
    pub async fn parse_file(&self, path: &Path) -> Result<Catalog, IngestError> {
        tracing::info!("Parsing playlist file: {}", path.display());
        let file = File::open(path).await?;
        let stream = ReaderStream::with_capacity(file, READ_CHUNK_BYTES);
        self.parse_chunks(stream).await
    }

    /// Parse any chunked byte source into a finished, sorted catalog. The
    /// chunk boundaries carry no meaning; lines are reassembled across them.
    pub async fn parse_chunks<S>(&self, mut chunks: S) -> Result<Catalog, IngestError>
    where
        S: Stream<Item = std::io::Result<Bytes>> + Unpin,
    {
        let mut assembler = LineAssembler::new();
        let mut catalog = Catalog::new();
        let mut pending_extinf: Option<String> = None;
        let mut gate = YieldGate::new(self.yield_every);

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;

            for line in assembler.feed(&chunk) {
                if line.is_empty() {
                    continue;
                }

                if line.starts_with("#EXTINF") {
                    pending_extinf = Some(line);
                    continue;
                }

                // Any other non-blank line with a pending metadata line is
                // its payload; without one it is a header or stray comment.
                if let Some(metadata) = pending_extinf.take() {
                    catalog.insert(LineClassifier::classify(&metadata, &line));
                    gate.tick().await;

                    if gate.processed() % 10_000 == 0 {
                        tracing::info!("Processed {} playlist entries...", gate.processed());
                    }
                }
            }
        }

        // A final line without a newline never completes and is dropped.
        if let Some(tail) = assembler.finish() {
            tracing::debug!("Dropping unterminated trailing line ({} bytes)", tail.len());
        }

        catalog.sort_episodes();

        let stats = catalog.stats();
        tracing::info!(
            "Parse complete: {} series, {} movies, {} episodes from {} entries",
            stats.series,
            stats.movies,
            stats.episodes,
            gate.processed()
        );

        Ok(catalog)
    }
}
