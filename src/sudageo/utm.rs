use crate::sudageo::error::Error;
use std::fmt;

/// UTM zones that also have a legacy Adindan datum projection.
pub const LEGACY_ZONES: [(u8, u32); 3] = [(35, 20135), (36, 20136), (37, 20137)];

const LEGACY_DATUM: &str = "Adindan";
const WGS84_DATUM: &str = "WGS 84";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The equator belongs to the northern hemisphere.
    pub fn from_latitude(lat: f64) -> Hemisphere {
        if lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    fn wgs84_epsg_base(self) -> u32 {
        match self {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UtmSuggestion {
    pub epsg: u32,
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub name: String,
    pub datum: String,
}

impl UtmSuggestion {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "epsg": self.epsg,
            "zone": self.zone,
            "hemisphere": self.hemisphere.to_string(),
            "name": self.name,
            "datum": self.datum,
        })
    }
}

pub(crate) fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), Error> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Six-degree longitude band, zone 1 starting at -180.
/// 180 itself falls on the east edge of zone 60; the bare floor formula
/// would give 61 there, whose EPSG 32661 is UPS North rather than a UTM zone.
pub fn zone_number(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i64 + 1;
    zone.min(60).max(1) as u8
}

pub fn legacy_epsg(zone: u8) -> Option<u32> {
    LEGACY_ZONES
        .iter()
        .find(|(z, _)| *z == zone)
        .map(|(_, epsg)| *epsg)
}

/// Suggests projected CRSs for a lon/lat pair, the WGS 84 UTM zone first and
/// the legacy Adindan zone second where one exists.
pub fn suggest_utm_zone(lon: f64, lat: f64) -> Result<Vec<UtmSuggestion>, Error> {
    check_range("Longitude", lon, -180.0, 180.0)?;
    check_range("Latitude", lat, -90.0, 90.0)?;

    let zone = zone_number(lon);
    let hemisphere = Hemisphere::from_latitude(lat);

    let mut suggestions = vec![UtmSuggestion {
        epsg: hemisphere.wgs84_epsg_base() + zone as u32,
        zone,
        hemisphere,
        name: format!("{} / UTM zone {}{}", WGS84_DATUM, zone, hemisphere),
        datum: WGS84_DATUM.to_string(),
    }];

    if hemisphere == Hemisphere::North {
        if let Some(epsg) = legacy_epsg(zone) {
            suggestions.push(UtmSuggestion {
                epsg,
                zone,
                hemisphere,
                name: format!("{} / UTM zone {}N", LEGACY_DATUM, zone),
                datum: LEGACY_DATUM.to_string(),
            });
        }
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use crate::sudageo::error::Error;
    use crate::sudageo::utm::{suggest_utm_zone, zone_number, Hemisphere};

    fn codes(lon: f64, lat: f64) -> Vec<u32> {
        suggest_utm_zone(lon, lat)
            .unwrap()
            .iter()
            .map(|s| s.epsg)
            .collect()
    }

    #[test]
    fn test_khartoum() {
        let s = suggest_utm_zone(32.5, 15.6).unwrap();
        assert_eq!(2, s.len());
        assert_eq!(32636, s[0].epsg);
        assert_eq!(36, s[0].zone);
        assert_eq!(Hemisphere::North, s[0].hemisphere);
        assert_eq!("WGS 84", s[0].datum);
        assert_eq!("WGS 84 / UTM zone 36N", s[0].name);
        assert_eq!(20136, s[1].epsg);
        assert_eq!("Adindan", s[1].datum);
        assert_eq!("Adindan / UTM zone 36N", s[1].name);
    }

    #[test]
    fn test_el_fasher() {
        assert!(codes(25.3, 13.6).contains(&32635));
    }

    #[test]
    fn test_port_sudan() {
        let c = codes(37.2, 19.6);
        assert!(c.contains(&32637));
        assert!(c.contains(&20137));
    }

    #[test]
    fn test_southern_hemisphere() {
        let s = suggest_utm_zone(32.5, -5.0).unwrap();
        assert_eq!(1, s.len());
        assert_eq!(Hemisphere::South, s[0].hemisphere);
        assert_eq!(32736, s[0].epsg);
        assert_eq!("WGS 84 / UTM zone 36S", s[0].name);
    }

    #[test]
    fn test_equator_is_north() {
        let s = suggest_utm_zone(32.5, 0.0).unwrap();
        assert_eq!('N', s[0].hemisphere.letter());
        assert_eq!(32636, s[0].epsg);
    }

    #[test]
    fn test_no_legacy_zone_outside_table() {
        assert_eq!(vec![32633], codes(15.0, 10.0));
    }

    #[test]
    fn test_zone_edges() {
        assert_eq!(1, zone_number(-180.0));
        assert_eq!(1, zone_number(-174.000001));
        assert_eq!(2, zone_number(-174.0));
        assert_eq!(36, zone_number(30.0));
        assert_eq!(60, zone_number(179.9));
        assert_eq!(60, zone_number(180.0));
    }

    #[test]
    fn test_zone_and_hemisphere_over_valid_range() {
        let mut lon = -180.0;
        while lon <= 180.0 {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let s = suggest_utm_zone(lon, lat).unwrap();
                assert!(!s.is_empty());
                assert!(s[0].zone >= 1 && s[0].zone <= 60);
                let expected = if lat >= 0.0 { 'N' } else { 'S' };
                assert_eq!(expected, s[0].hemisphere.letter());
                lat += 7.5;
            }
            lon += 2.5;
        }
    }

    #[test]
    fn test_invalid_longitude() {
        match suggest_utm_zone(200.0, 15.0) {
            Err(Error::OutOfRange { name, .. }) => assert_eq!("Longitude", name),
            other => panic!("expected longitude error, got {:?}", other),
        }
        let msg = suggest_utm_zone(200.0, 15.0).unwrap_err().to_string();
        assert!(msg.contains("Longitude"));
        assert!(msg.contains("[-180, 180]"));
    }

    #[test]
    fn test_invalid_latitude() {
        let msg = suggest_utm_zone(32.0, 100.0).unwrap_err().to_string();
        assert!(msg.contains("Latitude"));
        assert!(msg.contains("[-90, 90]"));
    }

    #[test]
    fn test_nan_is_out_of_range() {
        assert!(suggest_utm_zone(std::f64::NAN, 15.0).is_err());
    }
}
