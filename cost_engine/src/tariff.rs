//! Published airport handling tariffs.
//!
//! Figures are taken from the airports' current tariff cards (AERA orders). Rates that are not
//! yet transcribed are zero, which leaves only the published minimums in effect.

use std::collections::HashMap;

pub const CURRENCY: &str = "INR";

#[derive(Clone, Debug)]
pub struct AirportTariff {
    pub landing: LandingTariff,
    pub parking: ParkingTariff,
    /// User development fee per passenger, where the airport levies one.
    pub udf: Option<UdfTariff>,
    pub atc_navigation_flat: f64,
}

#[derive(Clone, Debug)]
pub struct LandingTariff {
    pub domestic_per_mt: f64,
    pub domestic_min: f64,
    /// Ascending by `max_mt`; the final open-ended slab has `max_mt: None`.
    pub intl_slabs: Vec<IntlSlab>,
}

#[derive(Copy, Clone, Debug)]
pub struct IntlSlab {
    pub max_mt: Option<i64>,
    pub per_mt: f64,
}

#[derive(Clone, Debug)]
pub struct ParkingTariff {
    pub domestic_per_mt_per_hr: f64,
    pub free_hours: f64,
    pub free_buffer_minutes: u32,
}

#[derive(Copy, Clone, Debug)]
pub struct UdfTariff {
    pub domestic_depart: f64,
    pub domestic_arrive: f64,
    pub intl_depart: f64,
    pub intl_arrive: f64,
}

/// Tariffs keyed by upper-case airport name.
#[derive(Clone, Debug, Default)]
pub struct TariffBook {
    airports: HashMap<String, AirportTariff>,
}

impl TariffBook {
    pub fn builtin() -> Self {
        let mut book = Self::default();

        book.insert(
            "DELHI IGI",
            AirportTariff {
                landing: LandingTariff {
                    domestic_per_mt: 441.0,
                    domestic_min: 5788.0,
                    intl_slabs: vec![
                        IntlSlab {
                            max_mt: Some(100),
                            per_mt: 662.0,
                        },
                        IntlSlab {
                            max_mt: None,
                            per_mt: 772.0,
                        },
                    ],
                },
                parking: ParkingTariff {
                    domestic_per_mt_per_hr: 18.22,
                    free_hours: 2.0,
                    free_buffer_minutes: 15,
                },
                udf: Some(UdfTariff {
                    domestic_depart: 1050.0,
                    domestic_arrive: 450.0,
                    intl_depart: 1540.0,
                    intl_arrive: 660.0,
                }),
                atc_navigation_flat: 0.0,
            },
        );

        book.insert(
            "HYDERABAD RGIA",
            AirportTariff {
                landing: LandingTariff {
                    domestic_per_mt: 0.0,
                    domestic_min: 4000.0,
                    intl_slabs: Vec::new(),
                },
                parking: ParkingTariff {
                    domestic_per_mt_per_hr: 0.0,
                    free_hours: 0.0,
                    free_buffer_minutes: 0,
                },
                udf: None,
                atc_navigation_flat: 0.0,
            },
        );

        book
    }

    pub fn insert(&mut self, airport: &str, tariff: AirportTariff) {
        self.airports.insert(airport.to_uppercase(), tariff);
    }

    pub fn get(&self, airport: &str) -> Option<&AirportTariff> {
        self.airports.get(&airport.trim().to_uppercase())
    }
}
