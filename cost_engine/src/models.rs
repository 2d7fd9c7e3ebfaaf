use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegType {
    Domestic,
    International,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirportStop {
    pub airport: String,
    pub leg_type: LegType,
    pub mtow_kg: f64,
    #[serde(default)]
    pub parking_hours: f64,
    #[serde(default)]
    pub pax_departing: u32,
    #[serde(default)]
    pub pax_arriving: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RouteQuote {
    pub stops: Vec<AirportStop>,
    pub flight_hours: f64,
    pub hourly_rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MultiRouteQuote {
    pub routes: Vec<RouteQuote>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopCharges {
    pub airport: String,
    pub leg_type: LegType,
    pub weight_mt_billed: i64,
    pub landing_fee: f64,
    pub parking_fee: f64,
    pub udf_fee: f64,
    pub atc_fee: f64,
    pub total_airport: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub gst_18_percent: f64,
    pub extra_charge: f64,
    pub final_estimated_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub currency: &'static str,
    pub breakdown: Vec<StopCharges>,
    pub total_handling_charges: f64,
    pub flight_cost: f64,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiwayEstimate {
    pub currency: &'static str,
    pub breakdown: Vec<StopCharges>,
    pub total_handling_charges: f64,
    pub total_flight_cost: f64,
    #[serde(flatten)]
    pub totals: Totals,
}
