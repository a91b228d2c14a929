use wellbore_rs::models::{IntervalKind, WellReport};

#[test]
fn parse_sample_json() {
    // Shaped like the live service: numbers, numeric strings, empty strings,
    // and nulls all appear in numeric columns.
    let sample = r##"
    {
      "sitefile": {
        "site_no": "422508121161501",
        "station_nm": "Test well",
        "alt_va": "4186.5",
        "alt_datum_cd": "NGVD29",
        "well_depth_va": 120,
        "hole_depth_va": ""
      },
      "gw_geoh": [
        {
          "geoh_seq_nu": 1,
          "lith_cd": "SAND",
          "lith_ds": "Sand",
          "lith_unit_cd": "",
          "lith_unit_ds": "",
          "lith_top_va": 0,
          "lith_bottom_va": "25",
          "image": "607.svg"
        },
        {
          "geoh_seq_nu": 2,
          "lith_cd": "BSLT",
          "lith_ds": "Basalt",
          "lith_unit_cd": "",
          "lith_unit_ds": "",
          "lith_top_va": 25,
          "lith_bottom_va": null,
          "image": "608.svg"
        }
      ],
      "well_construction": [
        {
          "gw_cons": [
            {
              "cons_seq_nu": 1,
              "cons_src_cd": "D",
              "seal_cd": "C",
              "seal_ds": "Cement",
              "seal_cl": "#A5A5A5",
              "seal_depth_va": "18",
              "finish_cd": "",
              "finish_ds": ""
            }
          ],
          "gw_hole": [
            {
              "hole_seq_nu": 1,
              "hole_top_va": 0,
              "hole_bottom_va": 120,
              "hole_dia_va": 10
            }
          ],
          "gw_csng": [
            {
              "csng_seq_nu": 1,
              "csng_top_va": 0,
              "csng_bottom_va": 50,
              "csng_dia_va": 6,
              "csng_material_cd": "S",
              "csng_material_ds": "Steel",
              "csng_material_cl": "#636363"
            }
          ],
          "gw_open": [
            {
              "open_seq_nu": 1,
              "open_top_va": 50,
              "open_bottom_va": 120,
              "open_dia_va": "",
              "open_cd": "S",
              "open_material_cd": "",
              "open_ds": "Screen",
              "image": "030.svg"
            }
          ]
        }
      ],
      "y_max": 120.0,
      "y_min": 0.0,
      "dia_max": 10.0,
      "land_surface": 4186.5
    }
    "##;

    let report: WellReport = serde_json::from_str(sample).unwrap();
    assert_eq!(report.sitefile.site_no, "422508121161501");
    assert_eq!(report.sitefile.alt_va, Some(4186.5));
    assert_eq!(report.sitefile.hole_depth_va, None);
    assert_eq!(report.dia_max, Some(10.0));

    let rows = report.intervals();
    assert_eq!(rows.len(), 6);

    let seal = rows.iter().find(|r| r.kind == IntervalKind::Seal).unwrap();
    assert_eq!(seal.bottom_depth, Some(18.0));
    assert_eq!(seal.color.as_deref(), Some("#A5A5A5"));

    // Open-ended lithology keeps its missing bottom.
    let basalt = rows
        .iter()
        .find(|r| r.kind == IntervalKind::Lithology && r.description == "Basalt")
        .unwrap();
    assert_eq!(basalt.bottom_depth, None);

    // Blank diameter string parses to None, record still present.
    let open = rows
        .iter()
        .find(|r| r.kind == IntervalKind::OpenInterval)
        .unwrap();
    assert_eq!(open.diameter, None);
    assert_eq!(open.pattern.as_deref(), Some("030.svg"));
}

#[test]
fn missing_sections_default_to_empty() {
    let sample = r#"{ "sitefile": { "site_no": "422508121161501" } }"#;
    let report: WellReport = serde_json::from_str(sample).unwrap();
    assert!(report.is_empty());
    assert!(report.gw_geoh.is_empty());
    assert_eq!(report.y_max, None);
}
