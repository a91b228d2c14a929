use crate::models::Interval;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save intervals as CSV with header.
pub fn save_csv<P: AsRef<Path>>(intervals: &[Interval], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "kind",
        "top_depth",
        "bottom_depth",
        "diameter",
        "code",
        "description",
        "color",
        "pattern",
    ))?;
    for i in intervals {
        wtr.serialize((
            i.kind.as_str(),
            i.top_depth,
            i.bottom_depth,
            i.diameter,
            &i.code,
            &i.description,
            &i.color,
            &i.pattern,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save intervals as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(intervals: &[Interval], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(intervals)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalKind;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let rows = vec![Interval {
            kind: IntervalKind::Casing,
            top_depth: 0.0,
            bottom_depth: Some(50.0),
            diameter: Some(6.0),
            code: "S".into(),
            description: "Steel".into(),
            color: Some("#808080".into()),
            pattern: None,
        }];
        save_csv(&rows, &csvp).unwrap();
        save_json(&rows, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
