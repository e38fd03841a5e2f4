//! The ordered list of scales a palette contains and the seed of each one.
//!
//! A [`Catalog`] is plain immutable data. The builder takes it by reference, so
//! tests and callers can swap in their own catalogs (see
//! [`Catalog::load_from_path`]).

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::ramp::{
    BackgroundRamp, ChromaticRamp, FixedShade, ForegroundRamp, NeutralRamp, RampFamily,
};

pub const CODE_LEN: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid scale code {code:?}: expected 3 ASCII letters or digits")]
    InvalidCode { code: String },
    #[error("catalog has no background scale in its order")]
    MissingBackground,
    #[error("catalog defines more than one background scale")]
    DuplicateBackground,
    #[error("catalog defines more than one foreground scale")]
    DuplicateForeground,
    #[error("scale code {code} is defined more than once")]
    DuplicateCode { code: ScaleCode },
    #[error("scale code {code} is listed more than once in the order")]
    DuplicateOrder { code: ScaleCode },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Short identifier of a scale such as `rby`. Doubles as the CSS variable
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScaleCode(ArrayString<CODE_LEN>);

impl ScaleCode {
    pub fn new(code: &str) -> Result<Self, CatalogError> {
        let invalid = || CatalogError::InvalidCode {
            code: code.to_string(),
        };
        if code.len() != CODE_LEN || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        ArrayString::from(code).map(Self).map_err(|_| invalid())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ScaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ScaleCode {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ScaleCode> for String {
    fn from(code: ScaleCode) -> Self {
        code.as_str().to_string()
    }
}

impl PartialEq<&str> for ScaleCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// One catalog entry. Background and foreground entries ignore `anchor_hex`:
/// their anchor is the seed passed to the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeed {
    pub code: ScaleCode,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_hex: Option<String>,
    #[serde(flatten)]
    pub family: RampFamily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CatalogFile {
    order: Vec<ScaleCode>,
    seeds: Vec<NamedSeed>,
}

/// Scale order plus the seed table. The order may name codes that have no
/// seed; the builder skips those.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    order: Vec<ScaleCode>,
    seeds: Vec<NamedSeed>,
    #[serde(skip)]
    background: usize,
}

impl Catalog {
    pub fn new(order: Vec<ScaleCode>, seeds: Vec<NamedSeed>) -> Result<Self, CatalogError> {
        for (position, seed) in seeds.iter().enumerate() {
            if seeds[..position].iter().any(|other| other.code == seed.code) {
                return Err(CatalogError::DuplicateCode { code: seed.code });
            }
        }
        for (position, code) in order.iter().enumerate() {
            if order[..position].contains(code) {
                return Err(CatalogError::DuplicateOrder { code: *code });
            }
        }

        let mut backgrounds = seeds
            .iter()
            .enumerate()
            .filter(|(_, seed)| matches!(seed.family, RampFamily::Background(_)));
        let (background, background_seed) =
            backgrounds.next().ok_or(CatalogError::MissingBackground)?;
        if backgrounds.next().is_some() {
            return Err(CatalogError::DuplicateBackground);
        }
        if !order.contains(&background_seed.code) {
            return Err(CatalogError::MissingBackground);
        }

        let foregrounds = seeds
            .iter()
            .filter(|seed| matches!(seed.family, RampFamily::Foreground(_)))
            .count();
        if foregrounds > 1 {
            return Err(CatalogError::DuplicateForeground);
        }

        Ok(Self {
            order,
            seeds,
            background,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.order, file.seeds)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn order(&self) -> &[ScaleCode] {
        &self.order
    }

    pub fn seeds(&self) -> &[NamedSeed] {
        &self.seeds
    }

    pub fn seed(&self, code: ScaleCode) -> Option<&NamedSeed> {
        self.seeds.iter().find(|seed| seed.code == code)
    }

    pub fn background(&self) -> &NamedSeed {
        &self.seeds[self.background]
    }

    pub fn foreground(&self) -> Option<&NamedSeed> {
        self.seeds
            .iter()
            .find(|seed| matches!(seed.family, RampFamily::Foreground(_)))
    }

    /// The default design-system catalog.
    pub fn standard() -> Self {
        Self::try_standard().expect("standard catalog is valid")
    }

    fn try_standard() -> Result<Self, CatalogError> {
        let mut seeds = Vec::with_capacity(STANDARD_CHROMATIC.len() + 5);
        seeds.push(standard_seed(
            "bgc",
            "Base",
            None,
            RampFamily::Background(BackgroundRamp::default()),
        )?);
        seeds.push(standard_seed(
            "fgc",
            "Surface",
            None,
            RampFamily::Foreground(ForegroundRamp::default()),
        )?);
        for (code, hex, name) in STANDARD_CHROMATIC {
            seeds.push(standard_seed(
                code,
                name,
                Some(hex),
                RampFamily::Chromatic(ChromaticRamp::default()),
            )?);
        }
        for neutral in &STANDARD_NEUTRALS {
            let shades = neutral
                .shades
                .iter()
                .map(|(level, hex)| FixedShade::new(*level, hex))
                .collect();
            seeds.push(standard_seed(
                neutral.code,
                neutral.name,
                Some(neutral.anchor_hex),
                RampFamily::Neutral(NeutralRamp {
                    anchor_level: Level(neutral.anchor_level),
                    shades,
                }),
            )?);
        }

        let order = seeds.iter().map(|seed| seed.code).collect();
        Self::new(order, seeds)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_seed(
    code: &str,
    name: &str,
    anchor_hex: Option<&str>,
    family: RampFamily,
) -> Result<NamedSeed, CatalogError> {
    Ok(NamedSeed {
        code: ScaleCode::new(code)?,
        name: name.to_string(),
        anchor_hex: anchor_hex.map(str::to_string),
        family,
    })
}

const STANDARD_CHROMATIC: [(&str, &str, &str); 36] = [
    ("rse", "#fc0086", "Rose"),
    ("bry", "#fd016f", "Berry"),
    ("chy", "#ff0457", "Cherry"),
    ("rby", "#f9043a", "Ruby"),
    ("red", "#fd181a", "Red"),
    ("crl", "#fb3d03", "Coral"),
    ("pmk", "#fd5802", "Pumpkin"),
    ("orn", "#ff7220", "Orange"),
    ("sun", "#ff9004", "Sun"),
    ("gld", "#fead05", "Gold"),
    ("hny", "#ffcc00", "Honey"),
    ("yel", "#fddf00", "Yellow"),
    ("lem", "#ecec00", "Lemon"),
    ("acd", "#cdf118", "Acid"),
    ("lim", "#aae801", "Lime"),
    ("spr", "#86e401", "Spring"),
    ("grn", "#58d300", "Green"),
    ("emr", "#28c624", "Emerald"),
    ("jde", "#01b947", "Jade"),
    ("frs", "#03bb65", "Forest"),
    ("lea", "#01c37e", "Leaf"),
    ("tea", "#0ed39a", "Teal"),
    ("cyn", "#00e7cb", "Cyan"),
    ("aqu", "#02eeef", "Aqua"),
    ("rbn", "#07e3fe", "Robin"),
    ("azr", "#0acbff", "Azure"),
    ("sky", "#0aafff", "Sky"),
    ("blu", "#0184fe", "Blue"),
    ("cbt", "#256eff", "Cobalt"),
    ("sph", "#4158fa", "Sapphire"),
    ("ind", "#5a4aff", "Indigo"),
    ("lav", "#6e40ff", "Lavender"),
    ("prp", "#972eff", "Purple"),
    ("vio", "#c602fe", "Violet"),
    ("pnk", "#ea0aeb", "Pink"),
    ("mag", "#fd01b9", "Magenta"),
];

struct NeutralTable {
    code: &'static str,
    name: &'static str,
    anchor_hex: &'static str,
    anchor_level: u16,
    shades: &'static [(u16, &'static str)],
}

// Black keeps its levels. Gray and white were curated dark to light and are
// mirrored onto the light-to-dark level order. Missing levels are filled from
// their curated neighbours.
const STANDARD_NEUTRALS: [NeutralTable; 3] = [
    NeutralTable {
        code: "blk",
        name: "Black",
        anchor_hex: "#1d1d21",
        anchor_level: 700,
        shades: &[(800, "#16161a"), (900, "#101014"), (950, "#0b0b0f")],
    },
    NeutralTable {
        code: "gry",
        name: "Gray",
        anchor_hex: "#4f5163",
        anchor_level: 600,
        shades: &[
            (300, "#7f8199"),
            (400, "#6d7089"),
            (500, "#5f6278"),
            (700, "#3f414f"),
            (800, "#373945"),
        ],
    },
    NeutralTable {
        code: "wht",
        name: "White",
        anchor_hex: "#ddddf6",
        anchor_level: 300,
        shades: &[(200, "#e9e9fb"), (400, "#d3d3ed"), (500, "#c9c9e2")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_oklch;

    fn code(value: &str) -> ScaleCode {
        ScaleCode::new(value).expect("valid code")
    }

    fn chromatic(value: &str, hex: &str) -> NamedSeed {
        NamedSeed {
            code: code(value),
            name: value.to_uppercase(),
            anchor_hex: Some(hex.to_string()),
            family: RampFamily::Chromatic(ChromaticRamp::default()),
        }
    }

    fn background(value: &str) -> NamedSeed {
        NamedSeed {
            code: code(value),
            name: "Base".to_string(),
            anchor_hex: None,
            family: RampFamily::Background(BackgroundRamp::default()),
        }
    }

    #[test]
    fn scale_codes_are_exactly_three_characters() {
        assert_eq!(code("rby").as_str(), "rby");
        for bad in ["", "rb", "ruby", "r-y", "rü"] {
            assert!(
                matches!(ScaleCode::new(bad), Err(CatalogError::InvalidCode { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn standard_catalog_starts_with_base_scales() {
        let catalog = Catalog::standard();
        let order: Vec<&str> = catalog.order().iter().map(ScaleCode::as_str).collect();

        assert_eq!(&order[..4], ["bgc", "fgc", "rse", "bry"]);
        assert_eq!(&order[order.len() - 3..], ["blk", "gry", "wht"]);
        assert_eq!(order.len(), 41);
        assert_eq!(catalog.background().code, "bgc");
        assert_eq!(catalog.foreground().map(|seed| seed.code), Some(code("fgc")));
    }

    #[test]
    fn standard_catalog_hexes_parse() {
        for seed in Catalog::standard().seeds() {
            if let Some(hex) = &seed.anchor_hex {
                hex_to_oklch(hex).expect("standard anchor parses");
            }
            if let RampFamily::Neutral(neutral) = &seed.family {
                for shade in &neutral.shades {
                    hex_to_oklch(&shade.hex).expect("standard constant parses");
                    assert!(shade.level.index().is_some());
                }
            }
        }
    }

    #[test]
    fn new_requires_a_single_ordered_background() {
        let order = vec![code("bgc"), code("rby")];
        assert!(matches!(
            Catalog::new(order.clone(), vec![chromatic("rby", "#f9043a")]),
            Err(CatalogError::MissingBackground)
        ));
        assert!(matches!(
            Catalog::new(order.clone(), vec![background("bgc"), background("bg2")]),
            Err(CatalogError::DuplicateBackground)
        ));
        assert!(matches!(
            Catalog::new(vec![code("rby")], vec![background("bgc")]),
            Err(CatalogError::MissingBackground)
        ));
        assert!(matches!(
            Catalog::new(
                order,
                vec![background("bgc"), chromatic("rby", "#f9043a"), chromatic("rby", "#fd181a")]
            ),
            Err(CatalogError::DuplicateCode { .. })
        ));
    }

    #[test]
    fn new_rejects_repeated_order_codes() {
        let mut order = Catalog::standard().order().to_vec();
        order.push(code("rby"));
        let seeds = Catalog::standard().seeds().to_vec();

        assert!(matches!(
            Catalog::new(order, seeds),
            Err(CatalogError::DuplicateOrder { code }) if code == "rby"
        ));
        assert!(matches!(
            Catalog::new(
                vec![code("bgc"), code("rby"), code("bgc")],
                vec![background("bgc"), chromatic("rby", "#f9043a")]
            ),
            Err(CatalogError::DuplicateOrder { code }) if code == "bgc"
        ));
    }

    #[test]
    fn standard_neutrals_use_the_curated_constants() {
        let expected: [(&str, &[(u16, &str)]); 3] = [
            (
                "blk",
                &[(700, "#1d1d21"), (800, "#16161a"), (900, "#101014"), (950, "#0b0b0f")],
            ),
            (
                "gry",
                &[
                    (300, "#7f8199"),
                    (400, "#6d7089"),
                    (500, "#5f6278"),
                    (600, "#4f5163"),
                    (700, "#3f414f"),
                    (800, "#373945"),
                ],
            ),
            (
                "wht",
                &[(200, "#e9e9fb"), (300, "#ddddf6"), (400, "#d3d3ed"), (500, "#c9c9e2")],
            ),
        ];

        let catalog = Catalog::standard();
        for (value, table) in expected {
            let seed = catalog.seed(code(value)).expect("neutral seed");
            let RampFamily::Neutral(neutral) = &seed.family else {
                panic!("{value} is not a neutral scale");
            };
            let mut actual: Vec<(u16, String)> = neutral
                .shades
                .iter()
                .map(|shade| (shade.level.value(), shade.hex.clone()))
                .collect();
            actual.push((
                neutral.anchor_level.value(),
                seed.anchor_hex.clone().expect("neutral anchor"),
            ));
            actual.sort();

            let table: Vec<(u16, String)> = table
                .iter()
                .map(|(level, hex)| (*level, hex.to_string()))
                .collect();
            assert_eq!(actual, table, "{value} constants");
        }
    }

    #[test]
    fn order_may_reference_unknown_codes() {
        let catalog = Catalog::new(
            vec![code("bgc"), code("tes"), code("rby")],
            vec![background("bgc"), chromatic("rby", "#f9043a")],
        )
        .expect("catalog");
        assert!(catalog.seed(code("tes")).is_none());
        assert_eq!(catalog.order().len(), 3);
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = Catalog::standard();
        let json = catalog.to_json_pretty().expect("serialize");
        let parsed = Catalog::from_json_str(&json).expect("parse");
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn minimal_json_catalog_uses_family_defaults() {
        let json = r##"{
            "order": ["bgc", "fgc", "rby"],
            "seeds": [
                {"code": "bgc", "name": "Base", "family": "background"},
                {"code": "fgc", "name": "Surface", "family": "foreground"},
                {"code": "rby", "name": "Ruby", "anchor_hex": "#f9043a", "family": "chromatic"}
            ]
        }"##;
        let catalog = Catalog::from_json_str(json).expect("parse catalog");
        assert_eq!(
            catalog.seed(code("rby")).map(|seed| &seed.family),
            Some(&RampFamily::Chromatic(ChromaticRamp::default()))
        );
    }

    #[test]
    fn json_with_bad_code_is_rejected() {
        let json = r#"{"order": ["bgcx"], "seeds": []}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::Serde(_))
        ));
    }

    #[test]
    fn load_from_path_reads_catalog_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, Catalog::standard().to_json_pretty().expect("json"))
            .expect("write catalog");

        let loaded = Catalog::load_from_path(&path).expect("load catalog");
        assert_eq!(loaded, Catalog::standard());
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Catalog::load_from_path(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
