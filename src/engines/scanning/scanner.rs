use super::pam::PamPattern;
use crate::types::Candidate;
use std::ops::Range;

/// Locates PAM hits and cuts the guide window in front of each one.
///
/// Boundary policy: a hit whose guide window would start before offset 0 is
/// dropped, and so is a hit whose PAM window does not fit inside the scanned
/// region. Neither case is an error.
pub struct SiteScanner {
    pam: PamPattern,
    guide_length: usize,
}

impl SiteScanner {
    pub fn new(pam: PamPattern, guide_length: usize) -> Self {
        Self { pam, guide_length }
    }

    /// Scan `sequence` (or `region` of it) and return candidates in ascending locus order.
    ///
    /// The region end is clamped to the sequence length; an empty or inverted
    /// region yields nothing.
    pub fn scan(&self, sequence: &str, region: Option<Range<usize>>) -> Vec<Candidate> {
        let bytes = sequence.as_bytes();
        let region = region.unwrap_or(0..bytes.len());
        let end = region.end.min(bytes.len());
        let start = region.start;
        if start >= end {
            return Vec::new();
        }

        let pam_len = self.pam.len();
        self.pam
            .find_all(&bytes[start..end])
            .filter_map(|offset| {
                let locus = start + offset;
                // Guide window would run off the front of the sequence
                let guide_start = locus.checked_sub(self.guide_length)?;
                // find_all only yields hits whose whole PAM lies inside the region
                let pam_end = locus + pam_len;
                // Windows splitting a multi-byte symbol are skipped like out-of-range ones
                let guide_sequence = sequence.get(guide_start..locus)?.to_string();
                let pam_sequence = sequence.get(locus..pam_end)?.to_string();
                Some(Candidate {
                    locus,
                    guide_window: guide_start..locus,
                    pam_window: locus..pam_end,
                    guide_sequence,
                    pam_sequence,
                })
            })
            .collect()
    }
}
