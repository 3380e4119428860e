use log::debug;

use crate::catalog::{OrbitClass, OrbitType, SatelliteRecord};

/// Mean Earth radius used for the eccentricity estimate.
const EARTH_RADIUS_KM: f64 = 6370.0;

const CIRCULAR_MAX_ECCENTRICITY: f64 = 0.14;
const LEO_MIN_ALTITUDE_KM: f64 = 80.0;
const LEO_MAX_ALTITUDE_KM: f64 = 1700.0;
const MEO_MAX_ALTITUDE_KM: f64 = 35700.0;
const GEO_PERIOD_MIN: f64 = 1410.0;
const GEO_PERIOD_MAX: f64 = 1462.0;
const CISLUNAR_MIN_APOGEE_KM: f64 = 318200.0;

/// Eccentricity estimated from apsis altitudes.
pub fn eccentricity(apogee_km: f64, perigee_km: f64) -> f64 {
    (apogee_km - perigee_km) / (apogee_km + perigee_km + 2.0 * EARTH_RADIUS_KM)
}

/// Derives orbit class and type from catalog orbit parameters.
///
/// Near-circular orbits are split by altitude, except GEO which is recognised by its
/// period. Anything with `e >= 0.14` is elliptical. Either value may be unset when the
/// parameters fall between the bands.
pub fn classify_orbit(
    apogee_km: f64,
    perigee_km: f64,
    period_min: f64,
    inclination_deg: f64,
) -> (Option<OrbitClass>, Option<OrbitType>) {
    let ecc = eccentricity(apogee_km, perigee_km);
    let altitude = apogee_km.max(perigee_km);

    if ecc >= CIRCULAR_MAX_ECCENTRICITY {
        let orbit_type = if apogee_km > CISLUNAR_MIN_APOGEE_KM {
            Some(OrbitType::Cislunar)
        } else if period_min > 25.0 * 60.0 && ecc > 0.5 {
            Some(OrbitType::DeepHighlyEccentric)
        } else if (11.5 * 60.0..12.5 * 60.0).contains(&period_min)
            && (0.5..0.77).contains(&ecc)
            && (62.0..64.0).contains(&inclination_deg)
        {
            Some(OrbitType::Molniya)
        } else {
            None
        };
        return (Some(OrbitClass::Elliptical), orbit_type);
    }

    let class = if (LEO_MIN_ALTITUDE_KM..LEO_MAX_ALTITUDE_KM).contains(&altitude) {
        Some(OrbitClass::Leo)
    } else if (GEO_PERIOD_MIN..GEO_PERIOD_MAX).contains(&period_min) {
        Some(OrbitClass::Geo)
    } else if (LEO_MAX_ALTITUDE_KM..=MEO_MAX_ALTITUDE_KM).contains(&altitude) {
        Some(OrbitClass::Meo)
    } else {
        None
    };

    let orbit_type = match class {
        Some(OrbitClass::Leo) | Some(OrbitClass::Meo) => Some(inclination_type(inclination_deg)),
        _ => None,
    };

    (class, orbit_type)
}

/// Classifies records whose orbit class is unset but whose apogee, perigee and
/// inclination are known. An existing orbit type is kept. Returns how many records got a
/// class.
pub fn fill_missing_classes(records: &mut [SatelliteRecord]) -> usize {
    let mut filled = 0;
    for record in records.iter_mut().filter(|r| r.orbit_class.is_none()) {
        let (Some(apogee), Some(perigee), Some(inclination)) =
            (record.apogee_km, record.perigee_km, record.inclination_deg)
        else {
            continue;
        };
        let (class, orbit_type) =
            classify_orbit(apogee, perigee, record.period_minutes, inclination);
        if class.is_some() {
            record.orbit_class = class;
            record.orbit_type = record.orbit_type.or(orbit_type);
            filled += 1;
        }
    }
    debug!("Derived orbit class for {} records", filled);
    filled
}

fn inclination_type(inclination_deg: f64) -> OrbitType {
    let inc = inclination_deg;
    if !(20.0..160.0).contains(&inc) {
        OrbitType::Equatorial
    } else if (20.0..85.0).contains(&inc) || (104.0..160.0).contains(&inc) {
        OrbitType::NonPolarInclined
    } else if (85.0..95.0).contains(&inc) {
        OrbitType::Polar
    } else {
        OrbitType::SunSynchronous
    }
}
