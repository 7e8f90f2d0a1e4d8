//! Run statistics
//!
//! Aggregated after all documents finish and printed as the run summary.

use semchunk_core::Chunk;

/// Statistics accumulated over one processing run
#[derive(Debug, Default)]
pub struct RunStats {
    /// Documents processed successfully
    pub documents: usize,
    /// Documents that failed and were skipped
    pub failed: usize,
    token_counts: Vec<usize>,
    sample: Option<(String, usize)>,
}

impl RunStats {
    /// Record the chunks of one successfully processed document.
    pub fn record_document(&mut self, chunks: &[Chunk]) {
        self.documents += 1;
        for chunk in chunks {
            if self.sample.is_none() {
                self.sample = Some((chunk.id.clone(), chunk.token_count));
            }
            self.token_counts.push(chunk.token_count);
        }
    }

    /// Record one failed document.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Total chunks produced.
    pub fn chunks(&self) -> usize {
        self.token_counts.len()
    }

    /// Print the run summary to stdout.
    pub fn print_summary(&self) {
        println!("Processed {} document(s), {} failed", self.documents, self.failed);
        println!("Chunks written: {}", self.chunks());

        if self.token_counts.is_empty() {
            return;
        }
        let total: usize = self.token_counts.iter().sum();
        let avg = total as f64 / self.token_counts.len() as f64;
        let min = self.token_counts.iter().min().unwrap();
        let max = self.token_counts.iter().max().unwrap();
        println!("Tokens per chunk: avg {avg:.1}, min {min}, max {max}");

        if let Some((id, tokens)) = &self.sample {
            println!("Sample chunk: {id} ({tokens} tokens)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semchunk_core::chunk_text;

    #[test]
    fn records_documents_and_chunks() {
        let chunks = chunk_text("A short body of text.", "T", "t").unwrap();
        let mut stats = RunStats::default();
        stats.record_document(&chunks);
        stats.record_failure();

        assert_eq!(stats.documents, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.chunks(), chunks.len());
    }

    #[test]
    fn empty_run_prints_without_panicking() {
        RunStats::default().print_summary();
    }
}
