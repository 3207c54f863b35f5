use std::io::{self, Write};
use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Writes text with a typewriter cadence.
///
/// The unit of pacing is the extended grapheme cluster, so emoji sequences
/// and combining marks are never split mid-glyph. A zero delay writes the
/// whole chunk at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingPacer {
    delay: Duration,
}

impl TypingPacer {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// A pacer that never sleeps.
    pub const fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Writes `text` to `out`, sleeping after each grapheme when pacing is on.
    ///
    /// Safe to call once per delta: N calls produce the same bytes as one
    /// call with the concatenation.
    pub async fn pace<W: Write + ?Sized>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        if self.delay.is_zero() {
            out.write_all(text.as_bytes())?;
            return out.flush();
        }

        for grapheme in text.graphemes(true) {
            out.write_all(grapheme.as_bytes())?;
            out.flush()?;
            tokio::time::sleep(self.delay).await;
        }

        Ok(())
    }
}

impl Default for TypingPacer {
    fn default() -> Self {
        Self::immediate()
    }
}
