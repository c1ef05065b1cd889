use serde::Deserialize;

/// Which library curve a turbine without a configured curve is modelled with
///
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FetchCurve {
    /// Manufacturer power curve, independent of air density
    #[default]
    Power,
    /// Power coefficient curve, scaled by air density at hub height
    Cp,
}
