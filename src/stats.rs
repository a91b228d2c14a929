use crate::models::{Interval, IntervalKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for one interval kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub kind: IntervalKind,
    pub count: usize,
    /// Shallowest top depth, feet.
    pub top_min: Option<f64>,
    /// Deepest recorded bottom depth, feet. Open-ended intervals contribute
    /// nothing here.
    pub bottom_max: Option<f64>,
    /// Largest diameter, inches.
    pub dia_max: Option<f64>,
}

/// Compute grouped statistics by interval kind.
pub fn kind_summary(intervals: &[Interval]) -> Vec<Summary> {
    let mut groups: BTreeMap<IntervalKind, Vec<&Interval>> = BTreeMap::new();
    for interval in intervals {
        groups.entry(interval.kind).or_default().push(interval);
    }

    let mut out = Vec::new();
    for (kind, rows) in groups {
        let top_min = rows
            .iter()
            .map(|r| r.top_depth)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));
        let bottom_max = rows
            .iter()
            .filter_map(|r| r.bottom_depth)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        let dia_max = rows
            .iter()
            .filter_map(|r| r.diameter)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        out.push(Summary {
            kind,
            count: rows.len(),
            top_min,
            bottom_max,
            dia_max,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(kind: IntervalKind, top: f64, bottom: f64, dia: Option<f64>) -> Interval {
        Interval {
            kind,
            top_depth: top,
            bottom_depth: Some(bottom),
            diameter: dia,
            code: String::new(),
            description: String::new(),
            color: None,
            pattern: None,
        }
    }

    #[test]
    fn groups_by_kind() {
        let rows = vec![
            interval(IntervalKind::Casing, 0.0, 50.0, Some(6.0)),
            interval(IntervalKind::Casing, 50.0, 80.0, Some(4.0)),
            interval(IntervalKind::Seal, 0.0, 18.0, None),
        ];
        let summaries = kind_summary(&rows);
        assert_eq!(summaries.len(), 2);

        let casing = summaries
            .iter()
            .find(|s| s.kind == IntervalKind::Casing)
            .unwrap();
        assert_eq!(casing.count, 2);
        assert_eq!(casing.top_min, Some(0.0));
        assert_eq!(casing.bottom_max, Some(80.0));
        assert_eq!(casing.dia_max, Some(6.0));
    }
}
