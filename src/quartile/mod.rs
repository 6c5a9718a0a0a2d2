//! ESG score classification into quartile bands.
//!
//! Bands are half-open intervals on the total score with no gap or overlap:
//!
//! | band | total score      |
//! |------|------------------|
//! | Q1   | `s > 80`         |
//! | Q2   | `65 < s <= 80`   |
//! | Q3   | `50 < s <= 65`   |
//! | Q4   | `s <= 50`        |

use std::str::FromStr;

use crate::core::{EsgError, Quartile};

/// Lower (exclusive) bound of the Q1 band.
pub const Q1_THRESHOLD: f64 = 80.0;
/// Lower (exclusive) bound of the Q2 band.
pub const Q2_THRESHOLD: f64 = 65.0;
/// Lower (exclusive) bound of the Q3 band.
pub const Q3_THRESHOLD: f64 = 50.0;

/// Maps an ESG total score to its quartile.
///
/// Every input resolves to a band. Scores outside 0..100 are not rejected, and
/// `NaN` fails every comparison so it lands in [`Quartile::Q4`].
#[must_use]
pub fn classify(total: f64) -> Quartile {
    if total > Q1_THRESHOLD {
        Quartile::Q1
    } else if total > Q2_THRESHOLD {
        Quartile::Q2
    } else if total > Q3_THRESHOLD {
        Quartile::Q3
    } else {
        Quartile::Q4
    }
}

/// What to do with an external quartile label that is not `Q1`..`Q4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Treat the company as a member of the lowest band ([`Quartile::LOWEST`]).
    #[default]
    CoerceToLowest,
    /// Refuse the label with [`EsgError::UnknownQuartile`].
    Reject,
}

impl LabelPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LabelPolicy::CoerceToLowest => "coerce-to-lowest",
            LabelPolicy::Reject => "reject",
        }
    }
}

impl Quartile {
    /// Remaps an externally encoded quartile label onto [`Quartile`] under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`EsgError::UnknownQuartile`] for an unrecognized label when `policy` is
    /// [`LabelPolicy::Reject`]. Never fails under [`LabelPolicy::CoerceToLowest`].
    pub fn from_label(label: &str, policy: LabelPolicy) -> Result<Quartile, EsgError> {
        match (label.parse::<Quartile>(), policy) {
            (Ok(q), _) => Ok(q),
            (Err(_), LabelPolicy::CoerceToLowest) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(label, "unrecognized quartile label, coercing to Q4");
                Ok(Quartile::LOWEST)
            }
            (Err(e), LabelPolicy::Reject) => Err(e),
        }
    }
}

impl FromStr for Quartile {
    type Err = EsgError;

    /// Strict parse: only the exact labels `Q1`, `Q2`, `Q3` and `Q4` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quartile::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| EsgError::UnknownQuartile(s.to_string()))
    }
}
