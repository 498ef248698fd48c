use crate::error::DesignError;

const BASE_A: u8 = 1;
const BASE_C: u8 = 2;
const BASE_G: u8 = 4;
const BASE_T: u8 = 8;
const BASE_ANY: u8 = BASE_A | BASE_C | BASE_G | BASE_T;

/// Bases a sequence symbol may stand for. Unknown symbols map to 0 and never match.
#[inline(always)]
fn sequence_mask(symbol: u8) -> u8 {
    match symbol {
        b'A' => BASE_A,
        b'C' => BASE_C,
        b'G' => BASE_G,
        b'T' => BASE_T,
        b'N' => BASE_ANY,
        _ => 0,
    }
}

/// PAM motif over `{A, C, G, T, N}` where `N` is a wildcard position.
///
/// A sequence symbol matches a pattern position when every base the symbol
/// can denote is allowed there, so a literal `G` only accepts `G` while `N`
/// accepts any base (including an unresolved `N` in the sequence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PamPattern {
    motif: String,
    masks: Vec<u8>,
}

impl PamPattern {
    pub fn parse(motif: &str) -> Result<Self, DesignError> {
        if motif.is_empty() {
            return Err(DesignError::Configuration(
                "PAM sequence must not be empty".to_string(),
            ));
        }

        let masks = motif
            .bytes()
            .enumerate()
            .map(|(i, letter)| match letter {
                b'A' => Ok(BASE_A),
                b'C' => Ok(BASE_C),
                b'G' => Ok(BASE_G),
                b'T' => Ok(BASE_T),
                b'N' => Ok(BASE_ANY),
                _ => Err(DesignError::Configuration(format!(
                    "PAM sequence {:?} has invalid letter {:?} at position {} (allowed: A, C, G, T, N)",
                    motif, letter as char, i
                ))),
            })
            .collect::<Result<Vec<u8>, DesignError>>()?;

        Ok(Self {
            motif: motif.to_string(),
            masks,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.motif
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// True if the pattern matches `window`, which must have the pattern's length
    #[inline]
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() == self.masks.len()
            && window.iter().zip(&self.masks).all(|(&symbol, &allowed)| {
                let bases = sequence_mask(symbol);
                bases != 0 && bases & allowed == bases
            })
    }

    /// Every start offset in `haystack` where the pattern matches, overlapping hits included
    pub fn find_all<'a>(&'a self, haystack: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
        let last_start = (haystack.len() + 1).saturating_sub(self.masks.len());
        (0..last_start).filter(move |&i| self.matches(&haystack[i..i + self.masks.len()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_bad_letters() {
        assert!(PamPattern::parse("NGG").is_ok());
        assert!(PamPattern::parse("TTTV").is_err());
        assert!(PamPattern::parse("ngg").is_err());
        assert!(PamPattern::parse("").is_err());
    }

    #[test]
    fn test_wildcard_and_literal() {
        let pam = PamPattern::parse("NGG").unwrap();
        assert!(pam.matches(b"AGG"));
        assert!(pam.matches(b"TGG"));
        assert!(pam.matches(b"NGG"));
        assert!(!pam.matches(b"AGC"));
        assert!(!pam.matches(b"ANG"));
        assert!(!pam.matches(b"aGG"));
        assert!(!pam.matches(b"GG"));
    }

    #[test]
    fn test_overlapping_hits_all_reported() {
        let pam = PamPattern::parse("NGG").unwrap();
        let hits: Vec<usize> = pam.find_all(b"AGGGG").collect();
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn test_haystack_shorter_than_pattern() {
        let pam = PamPattern::parse("NGG").unwrap();
        assert_eq!(pam.find_all(b"GG").count(), 0);
        assert_eq!(pam.find_all(b"").count(), 0);
    }
}
