/// A named coordinate reference system commonly used in Sudanese geomatics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrsPreset {
    pub epsg: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub region: &'static str,
}

static PRESETS: [CrsPreset; 8] = [
    CrsPreset {
        epsg: 4326,
        name: "WGS 84",
        description: "Global geographic CRS (latitude / longitude)",
        region: "Global",
    },
    CrsPreset {
        epsg: 32634,
        name: "WGS 84 / UTM zone 34N",
        description: "UTM zone covering western Sudan (~18-24 E)",
        region: "Western Sudan",
    },
    CrsPreset {
        epsg: 32635,
        name: "WGS 84 / UTM zone 35N",
        description: "UTM zone covering central Sudan (~24-30 E)",
        region: "Central Sudan",
    },
    CrsPreset {
        epsg: 32636,
        name: "WGS 84 / UTM zone 36N",
        description: "UTM zone covering eastern Sudan (~30-36 E)",
        region: "Eastern Sudan",
    },
    CrsPreset {
        epsg: 32637,
        name: "WGS 84 / UTM zone 37N",
        description: "UTM zone covering far-eastern Sudan and Red Sea coast (~36-42 E)",
        region: "Red Sea / Far-Eastern Sudan",
    },
    CrsPreset {
        epsg: 20135,
        name: "Adindan / UTM zone 35N",
        description: "Legacy Adindan datum, UTM zone 35N",
        region: "Central Sudan (legacy surveys)",
    },
    CrsPreset {
        epsg: 20136,
        name: "Adindan / UTM zone 36N",
        description: "Legacy Adindan datum, UTM zone 36N",
        region: "Eastern Sudan (legacy surveys)",
    },
    CrsPreset {
        epsg: 20137,
        name: "Adindan / UTM zone 37N",
        description: "Legacy Adindan datum, UTM zone 37N",
        region: "Red Sea / Far-Eastern Sudan (legacy surveys)",
    },
];

pub fn list_presets() -> &'static [CrsPreset] {
    &PRESETS
}

pub fn get_preset(epsg: u32) -> Option<&'static CrsPreset> {
    PRESETS.iter().find(|p| p.epsg == epsg)
}
