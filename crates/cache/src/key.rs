//! Cache keys and the configuration fingerprint.

use augur_calendar::TimeScale;

const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// FNV-1a hash of a canonical configuration string.
///
/// The verifier renders everything that shapes a result (model, lead,
/// bucket partition signature, epoch, regrid direction) into one string
/// and fingerprints it; a blob written under a different configuration
/// then reads back as a miss instead of as stale labels.
pub fn fingerprint(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for b in text.bytes() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Identity of one cached verification result.
///
/// The `(model, lead, time_scale)` triple names the file; the fingerprint
/// travels inside the blob and guards against configuration drift that the
/// file name cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheKey {
    model: String,
    lead: f64,
    time_scale: TimeScale,
    fingerprint: u64,
}

impl CacheKey {
    pub fn new(model: impl Into<String>, lead: f64, time_scale: TimeScale, fingerprint: u64) -> Self {
        Self {
            model: model.into(),
            lead,
            time_scale,
            fingerprint,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn lead(&self) -> f64 {
        self.lead
    }

    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// File name under the cache root.
    ///
    /// `{model}_lead{lead}_metrics.bin`, with a `seasonal_` infix when the
    /// seasonal partition was used so the two partitions never collide.
    pub fn file_name(&self) -> String {
        let scale = match self.time_scale {
            TimeScale::Monthly => "",
            TimeScale::Seasonal => "seasonal_",
        };
        format!("{}_{}lead{}_metrics.bin", self.model, scale, self.lead)
    }
}
