use serde::{Serialize, Serializer};
use serde::ser::Error;

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    #[serde(serialize_with = "finite_f64")]
    pub meter: f64,
    pub km: String,
}

impl DistanceResponse {
    pub fn from_meters(meter: f64) -> Self {
        Self {
            meter,
            km: format!("{:.2}", meter / 1000.0),
        }
    }
}

// serde_json writes NaN and infinities as null, which is not a distance.
fn finite_f64<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("non-finite distance: {}", value)));
    }
    serializer.serialize_f64(*value)
}
