use mindtrace_common::types::{BandedRisk, RiskTier, NO_DISORDER_LABEL};

/// Default disorder detection threshold (confidence out of 100).
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 35.0;

/// Band a disorder confidence score into a risk tier.
///
/// Pure and total. The threshold comparison is `<=` (a score exactly at the
/// threshold does NOT count as detected) and the Moderate band is inclusive
/// on both ends: `<50` Low, `50..=75` Moderate, `>75` High. These cutoffs
/// are clinical-adjacent and must not drift.
pub fn band_risk(disorder_label: &str, confidence: f64, threshold: f64) -> BandedRisk {
    if confidence <= threshold {
        return BandedRisk {
            tier: RiskTier::NoRisk,
            effective_label: NO_DISORDER_LABEL.to_string(),
        };
    }

    let tier = if confidence < 50.0 {
        RiskTier::Low
    } else if confidence <= 75.0 {
        RiskTier::Moderate
    } else {
        RiskTier::High
    };

    BandedRisk {
        tier,
        effective_label: disorder_label.to_string(),
    }
}
