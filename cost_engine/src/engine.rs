use crate::error::CostError;
use crate::models::{
    AirportStop, LegType, MultiRouteQuote, MultiwayEstimate, RouteEstimate, RouteQuote,
    StopCharges, Totals,
};
use crate::tariff::{AirportTariff, CURRENCY, IntlSlab, TariffBook};

pub const GST_RATE: f64 = 0.18;
pub const EXTRA_CHARGE: f64 = 15_000.0;

/// MTOW billed to the nearest metric ton, halves going to the even ton.
pub fn billed_weight_mt(mtow_kg: f64) -> i64 {
    (mtow_kg / 1000.0).round_ties_even() as i64
}

/// Parking time left after the free window and its grace buffer.
pub fn parking_billable_hours(raw_hours: f64, free_hours: f64, buffer_minutes: u32) -> f64 {
    let effective_free = free_hours + f64::from(buffer_minutes) / 60.0;
    (raw_hours - effective_free).max(0.0)
}

/// Per-MT rate of the first slab that covers `weight_mt`, or 0 when none does.
pub fn rate_for_intl_slab(slabs: &[IntlSlab], weight_mt: i64) -> f64 {
    slabs
        .iter()
        .find(|s| s.max_mt.is_none_or(|max| weight_mt <= max))
        .map_or(0.0, |s| s.per_mt)
}

pub fn quote_stop(tariff: &AirportTariff, stop: &AirportStop) -> StopCharges {
    let weight_mt = billed_weight_mt(stop.mtow_kg);
    let weight = weight_mt as f64;

    let landing_fee = match stop.leg_type {
        LegType::Domestic => {
            (weight * tariff.landing.domestic_per_mt).max(tariff.landing.domestic_min)
        }
        LegType::International => weight * rate_for_intl_slab(&tariff.landing.intl_slabs, weight_mt),
    };

    let parking = &tariff.parking;
    let billable_hours =
        parking_billable_hours(stop.parking_hours, parking.free_hours, parking.free_buffer_minutes);
    let parking_fee = weight * parking.domestic_per_mt_per_hr * billable_hours;

    let udf_fee = tariff.udf.map_or(0.0, |udf| {
        let (depart, arrive) = match stop.leg_type {
            LegType::Domestic => (udf.domestic_depart, udf.domestic_arrive),
            LegType::International => (udf.intl_depart, udf.intl_arrive),
        };
        f64::from(stop.pax_departing) * depart + f64::from(stop.pax_arriving) * arrive
    });

    let atc_fee = tariff.atc_navigation_flat;

    StopCharges {
        airport: stop.airport.clone(),
        leg_type: stop.leg_type,
        weight_mt_billed: weight_mt,
        landing_fee,
        parking_fee,
        udf_fee,
        atc_fee,
        total_airport: landing_fee + parking_fee + udf_fee + atc_fee,
    }
}

pub fn totals(handling: f64, flight: f64) -> Totals {
    let subtotal = handling + flight;
    let gst = subtotal * GST_RATE;
    Totals {
        subtotal,
        gst_18_percent: gst,
        extra_charge: EXTRA_CHARGE,
        final_estimated_cost: subtotal + gst + EXTRA_CHARGE,
    }
}

pub fn estimate_route(book: &TariffBook, route: &RouteQuote) -> Result<RouteEstimate, CostError> {
    let mut errors = Vec::new();
    let breakdown = quote_route_stops(book, route, "", &mut errors);
    if !errors.is_empty() {
        return Err(CostError::Invalid(errors));
    }

    let total_handling_charges = breakdown.iter().map(|s| s.total_airport).sum();
    let flight_cost = route.flight_hours * route.hourly_rate;

    Ok(RouteEstimate {
        currency: CURRENCY,
        breakdown,
        total_handling_charges,
        flight_cost,
        totals: totals(total_handling_charges, flight_cost),
    })
}

pub fn estimate_multiway(
    book: &TariffBook,
    quote: &MultiRouteQuote,
) -> Result<MultiwayEstimate, CostError> {
    let mut errors = Vec::new();
    let mut breakdown = Vec::new();
    let mut total_flight_cost = 0.0;

    for (i, route) in quote.routes.iter().enumerate() {
        breakdown.extend(quote_route_stops(book, route, &format!("routes[{i}]."), &mut errors));
        total_flight_cost += route.flight_hours * route.hourly_rate;
    }
    if !errors.is_empty() {
        return Err(CostError::Invalid(errors));
    }

    let total_handling_charges = breakdown.iter().map(|s| s.total_airport).sum();

    Ok(MultiwayEstimate {
        currency: CURRENCY,
        breakdown,
        total_handling_charges,
        total_flight_cost,
        totals: totals(total_handling_charges, total_flight_cost),
    })
}

/// Prices every stop of `route`, appending a message to `errors` for each bad field or unknown
/// airport instead of stopping at the first.
fn quote_route_stops(
    book: &TariffBook,
    route: &RouteQuote,
    prefix: &str,
    errors: &mut Vec<String>,
) -> Vec<StopCharges> {
    if !(route.flight_hours.is_finite() && route.flight_hours >= 0.0) {
        errors.push(format!("{prefix}flight_hours must be a non-negative number"));
    }
    if !(route.hourly_rate.is_finite() && route.hourly_rate >= 0.0) {
        errors.push(format!("{prefix}hourly_rate must be a non-negative number"));
    }

    let mut breakdown = Vec::with_capacity(route.stops.len());
    for (i, stop) in route.stops.iter().enumerate() {
        let mut valid = true;
        if !(stop.mtow_kg.is_finite() && stop.mtow_kg > 0.0) {
            errors.push(format!("{prefix}stops[{i}].mtow_kg must be greater than 0"));
            valid = false;
        }
        if !(stop.parking_hours.is_finite() && stop.parking_hours >= 0.0) {
            errors.push(format!("{prefix}stops[{i}].parking_hours must be a non-negative number"));
            valid = false;
        }
        let Some(tariff) = book.get(&stop.airport) else {
            errors.push(format!("No tariff configured for airport: {}", stop.airport));
            continue;
        };
        if valid {
            breakdown.push(quote_stop(tariff, stop));
        }
    }
    breakdown
}
