use serde::{Deserialize, Serialize};

/// Serde helper: parse an optional `f64` from a JSON number, a numeric string,
/// an empty string, or `null`.
///
/// The NWIS-backed service is loosely typed: depth and diameter columns arrive
/// as numbers when present, as `""` when the field is blank in the database,
/// and occasionally as numeric strings. Empty and unparseable strings map to
/// `None`.
fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct OptF64Visitor;

    impl<'de> Visitor<'de> for OptF64Visitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string, an empty string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<f64>().ok())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(OptF64Visitor)
}

/// Site metadata (`sitefile` section of the service payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteFile {
    #[serde(default)]
    pub site_no: String,
    #[serde(default)]
    pub station_nm: String,
    /// Land-surface altitude in feet.
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub alt_va: Option<f64>,
    /// Reference datum for `alt_va` (e.g., "NAVD88").
    #[serde(default)]
    pub alt_datum_cd: String,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub well_depth_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub hole_depth_va: Option<f64>,
}

/// Seal sub-record (`gw_cons`). The seal extends from land surface down to
/// `seal_depth_va`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealRecord {
    #[serde(default)]
    pub cons_seq_nu: Option<i64>,
    #[serde(default)]
    pub seal_cd: String,
    #[serde(default)]
    pub seal_ds: String,
    /// Display color resolved by the backend from the seal code lookup.
    #[serde(default)]
    pub seal_cl: String,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub seal_depth_va: Option<f64>,
    #[serde(default)]
    pub finish_cd: String,
    #[serde(default)]
    pub finish_ds: String,
}

/// Borehole sub-record (`gw_hole`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleRecord {
    #[serde(default)]
    pub hole_seq_nu: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub hole_top_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub hole_bottom_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub hole_dia_va: Option<f64>,
}

/// Casing sub-record (`gw_csng`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasingRecord {
    #[serde(default)]
    pub csng_seq_nu: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub csng_top_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub csng_bottom_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub csng_dia_va: Option<f64>,
    #[serde(default)]
    pub csng_material_cd: String,
    #[serde(default)]
    pub csng_material_ds: String,
    #[serde(default)]
    pub csng_material_cl: String,
}

/// Open-interval sub-record (`gw_open`): screens, perforations, open hole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenIntervalRecord {
    #[serde(default)]
    pub open_seq_nu: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub open_top_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub open_bottom_va: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub open_dia_va: Option<f64>,
    #[serde(default)]
    pub open_cd: String,
    #[serde(default)]
    pub open_material_cd: String,
    #[serde(default)]
    pub open_ds: String,
    /// Tile-pattern image file resolved by the backend (e.g., "030.svg").
    #[serde(default)]
    pub image: String,
}

/// Lithology record (`gw_geoh`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LithologyRecord {
    #[serde(default)]
    pub geoh_seq_nu: Option<i64>,
    #[serde(default)]
    pub lith_cd: String,
    #[serde(default)]
    pub lith_ds: String,
    #[serde(default)]
    pub lith_unit_cd: String,
    #[serde(default)]
    pub lith_unit_ds: String,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub lith_top_va: Option<f64>,
    /// Missing bottoms extend to the bottom of the depth axis when drawn.
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub lith_bottom_va: Option<f64>,
    #[serde(default)]
    pub image: String,
}

/// One well-construction record: a group of sub-record lists sharing a
/// construction sequence number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructionRecord {
    #[serde(default)]
    pub gw_cons: Vec<SealRecord>,
    #[serde(default)]
    pub gw_hole: Vec<HoleRecord>,
    #[serde(default)]
    pub gw_csng: Vec<CasingRecord>,
    #[serde(default)]
    pub gw_open: Vec<OpenIntervalRecord>,
}

/// Full service payload for one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellReport {
    pub sitefile: SiteFile,
    #[serde(default)]
    pub gw_geoh: Vec<LithologyRecord>,
    #[serde(default)]
    pub well_construction: Vec<ConstructionRecord>,
    /// Precomputed plot extents from the backend.
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub y_min: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub y_max: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub dia_max: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub land_surface: Option<f64>,
}

/// What a drawn interval represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntervalKind {
    Lithology,
    Seal,
    Borehole,
    Casing,
    OpenInterval,
}

impl IntervalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Lithology => "lithology",
            IntervalKind::Seal => "seal",
            IntervalKind::Borehole => "borehole",
            IntervalKind::Casing => "casing",
            IntervalKind::OpenInterval => "open_interval",
        }
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tidy structure used by this crate (one row = one drawn interval).
///
/// Produced by [`WellReport::intervals`]; consumed by the renderer, storage,
/// and stats. Blank service fields are already normalized here (seal color
/// and description defaults, composed lithology descriptions) so every
/// consumer sees the same data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    pub kind: IntervalKind,
    /// Depth below land surface, feet.
    pub top_depth: f64,
    /// `None` means "extends to the bottom of the depth axis" (lithology only).
    pub bottom_depth: Option<f64>,
    /// Inches.
    pub diameter: Option<f64>,
    pub code: String,
    pub description: String,
    /// Solid fill color, when the record carries one (seals, casings).
    pub color: Option<String>,
    /// Tile-pattern image file, when the record carries one (lithology, open
    /// intervals).
    pub pattern: Option<String>,
}

/// Fallback seal color when the lookup table carries none.
pub const DEFAULT_SEAL_COLOR: &str = "#ED9EE9";
/// Fallback pattern for lithology known only by geologic unit.
pub const FALLBACK_LITHOLOGY_PATTERN: &str = "000.svg";

impl WellReport {
    /// Flatten the report into tidy [`Interval`] rows, lithology first, then
    /// construction sub-records in service order.
    pub fn intervals(&self) -> Vec<Interval> {
        let mut out = Vec::new();

        for lith in &self.gw_geoh {
            let Some(top) = lith.lith_top_va else {
                continue;
            };

            let mut code = lith.lith_cd.clone();
            let mut description = lith.lith_ds.clone();
            let mut pattern = lith.image.clone();
            if !lith.lith_unit_cd.is_empty() {
                description = format!("{} [{}]", description, lith.lith_unit_ds);
            }
            // Known only by geologic unit: fall back to the generic pattern.
            if lith.lith_cd.is_empty() && !lith.lith_unit_cd.is_empty() {
                code = lith.lith_unit_cd.clone();
                description = lith.lith_unit_ds.clone();
                pattern = FALLBACK_LITHOLOGY_PATTERN.to_string();
            }

            out.push(Interval {
                kind: IntervalKind::Lithology,
                top_depth: top,
                bottom_depth: lith.lith_bottom_va,
                diameter: None,
                code,
                description,
                color: None,
                pattern: (!pattern.is_empty()).then_some(pattern),
            });
        }

        for record in &self.well_construction {
            for seal in &record.gw_cons {
                let Some(depth) = seal.seal_depth_va else {
                    continue;
                };
                let color = if seal.seal_cl.is_empty() {
                    DEFAULT_SEAL_COLOR.to_string()
                } else {
                    seal.seal_cl.clone()
                };
                let description = if seal.seal_ds.is_empty() {
                    "Unknown".to_string()
                } else {
                    seal.seal_ds.clone()
                };
                out.push(Interval {
                    kind: IntervalKind::Seal,
                    top_depth: 0.0,
                    bottom_depth: Some(depth),
                    diameter: None,
                    code: seal.seal_cd.clone(),
                    description,
                    color: Some(color),
                    pattern: None,
                });
            }

            for hole in &record.gw_hole {
                let (Some(top), Some(bottom), Some(dia)) =
                    (hole.hole_top_va, hole.hole_bottom_va, hole.hole_dia_va)
                else {
                    continue;
                };
                out.push(Interval {
                    kind: IntervalKind::Borehole,
                    top_depth: top,
                    bottom_depth: Some(bottom),
                    diameter: Some(dia),
                    code: String::new(),
                    description: String::new(),
                    color: None,
                    pattern: None,
                });
            }

            for csng in &record.gw_csng {
                let (Some(top), Some(bottom), Some(dia)) =
                    (csng.csng_top_va, csng.csng_bottom_va, csng.csng_dia_va)
                else {
                    continue;
                };
                let description = if csng.csng_material_ds.is_empty() {
                    "Not recorded".to_string()
                } else {
                    csng.csng_material_ds.clone()
                };
                out.push(Interval {
                    kind: IntervalKind::Casing,
                    top_depth: top,
                    bottom_depth: Some(bottom),
                    diameter: Some(dia),
                    code: csng.csng_material_cd.clone(),
                    description,
                    color: (!csng.csng_material_cl.is_empty())
                        .then(|| csng.csng_material_cl.clone()),
                    pattern: None,
                });
            }

            for open in &record.gw_open {
                let (Some(top), Some(bottom)) = (open.open_top_va, open.open_bottom_va) else {
                    continue;
                };
                out.push(Interval {
                    kind: IntervalKind::OpenInterval,
                    top_depth: top,
                    bottom_depth: Some(bottom),
                    diameter: open.open_dia_va,
                    code: open.open_cd.clone(),
                    description: open.open_ds.clone(),
                    color: None,
                    pattern: (!open.image.is_empty()).then(|| open.image.clone()),
                });
            }
        }

        out
    }

    /// True when the report carries no drawable construction data.
    pub fn is_empty(&self) -> bool {
        self.well_construction.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_sitefile() -> SiteFile {
        SiteFile {
            site_no: "422508121161501".into(),
            station_nm: String::new(),
            alt_va: Some(4186.0),
            alt_datum_cd: "NGVD29".into(),
            well_depth_va: None,
            hole_depth_va: None,
        }
    }

    #[test]
    fn seal_defaults_applied() {
        let report = WellReport {
            sitefile: bare_sitefile(),
            gw_geoh: vec![],
            well_construction: vec![ConstructionRecord {
                gw_cons: vec![SealRecord {
                    cons_seq_nu: Some(1),
                    seal_cd: String::new(),
                    seal_ds: String::new(),
                    seal_cl: String::new(),
                    seal_depth_va: Some(18.0),
                    finish_cd: String::new(),
                    finish_ds: String::new(),
                }],
                ..Default::default()
            }],
            y_min: Some(0.0),
            y_max: Some(18.0),
            dia_max: None,
            land_surface: Some(4186.0),
        };

        let rows = report.intervals();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, IntervalKind::Seal);
        assert_eq!(rows[0].top_depth, 0.0);
        assert_eq!(rows[0].bottom_depth, Some(18.0));
        assert_eq!(rows[0].description, "Unknown");
        assert_eq!(rows[0].color.as_deref(), Some(DEFAULT_SEAL_COLOR));
    }

    #[test]
    fn lithology_unit_fallback() {
        let report = WellReport {
            sitefile: bare_sitefile(),
            gw_geoh: vec![LithologyRecord {
                geoh_seq_nu: Some(1),
                lith_cd: String::new(),
                lith_ds: String::new(),
                lith_unit_cd: "112EOLS".into(),
                lith_unit_ds: "Eolian Deposits".into(),
                lith_top_va: Some(0.0),
                lith_bottom_va: Some(25.0),
                image: String::new(),
            }],
            well_construction: vec![],
            y_min: None,
            y_max: None,
            dia_max: None,
            land_surface: None,
        };

        let rows = report.intervals();
        assert_eq!(rows[0].code, "112EOLS");
        assert_eq!(rows[0].description, "Eolian Deposits");
        assert_eq!(rows[0].pattern.as_deref(), Some(FALLBACK_LITHOLOGY_PATTERN));
    }

    #[test]
    fn incomplete_subrecords_skipped() {
        let report = WellReport {
            sitefile: bare_sitefile(),
            gw_geoh: vec![],
            well_construction: vec![ConstructionRecord {
                gw_hole: vec![HoleRecord {
                    hole_seq_nu: Some(1),
                    hole_top_va: Some(0.0),
                    hole_bottom_va: None,
                    hole_dia_va: Some(10.0),
                }],
                ..Default::default()
            }],
            y_min: None,
            y_max: None,
            dia_max: Some(10.0),
            land_surface: None,
        };
        assert!(report.intervals().is_empty());
    }
}
