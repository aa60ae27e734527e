//! Y-axis range for lap time charts

use serde::Serialize;

use super::ChartDatum;

/// Fraction of the data span added above and below.
pub const PADDING_RATIO: f64 = 0.05;

/// Padding floor in seconds, so equal values still get a visible range.
pub const MIN_PADDING_SECONDS: f64 = 0.3;

/// Display range for the time axis, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Padded range over every finite value of the active codes.
///
/// Returns `None` when no active code has a finite value, which tells the
/// chart to auto-scale. The lower bound is clamped at zero since times are
/// never negative.
pub fn axis_range<S: AsRef<str>>(series: &[ChartDatum], active: &[S]) -> Option<AxisRange> {
    let active: Vec<String> = active.iter().map(|code| code.as_ref().to_uppercase()).collect();

    let (min, max) = series
        .iter()
        .flat_map(|datum| active.iter().filter_map(|code| datum.times.get(code).copied().flatten()))
        .filter(|value| value.is_finite())
        .fold(None, |bounds: Option<(f64, f64)>, value| match bounds {
            Some((min, max)) => Some((min.min(value), max.max(value))),
            None => Some((value, value)),
        })?;

    let padding = ((max - min) * PADDING_RATIO).max(MIN_PADDING_SECONDS);
    Some(AxisRange { min: (min - padding).max(0.0), max: max + padding })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn datum(lap_number: u32, times: &[(&str, Option<f64>)]) -> ChartDatum {
        ChartDatum {
            lap_number: f64::from(lap_number),
            times: times.iter().map(|(code, time)| (code.to_string(), *time)).collect(),
        }
    }

    #[test]
    fn pads_by_floor_for_close_values() {
        let series = vec![datum(1, &[("VER", Some(91.234)), ("NOR", Some(91.900))])];
        let range = axis_range(&series, &["ver", "nor"]).unwrap();
        assert!((range.min - 90.934).abs() < 1e-9);
        assert!((range.max - 92.2).abs() < 1e-9);
    }

    #[test]
    fn pads_proportionally_for_wide_spans() {
        let series = vec![datum(1, &[("VER", Some(80.0))]), datum(2, &[("VER", Some(120.0))])];
        let range = axis_range(&series, &["VER"]).unwrap();
        assert!((range.min - 78.0).abs() < 1e-9);
        assert!((range.max - 122.0).abs() < 1e-9);
    }

    #[test]
    fn equal_values_get_non_degenerate_range() {
        let series = vec![datum(1, &[("VER", Some(90.0))]), datum(2, &[("VER", Some(90.0))])];
        let range = axis_range(&series, &["VER"]).unwrap();
        assert!(range.max > range.min);
        assert!((range.max - range.min - 0.6).abs() < 1e-9);
    }

    #[test]
    fn lower_bound_clamped_at_zero() {
        let series = vec![datum(1, &[("VER", Some(0.1))])];
        let range = axis_range(&series, &["VER"]).unwrap();
        assert_eq!(range.min, 0.0);
    }

    #[test]
    fn no_values_means_auto_scale() {
        assert_eq!(axis_range(&[], &["VER"]), None);

        let series = vec![datum(1, &[("VER", None), ("NOR", Some(f64::NAN))])];
        assert_eq!(axis_range(&series, &["VER", "NOR"]), None);

        let series = vec![datum(1, &[("LEC", Some(91.0))])];
        assert_eq!(axis_range(&series, &["VER"]), None);
        assert_eq!(axis_range(&series, &[] as &[&str]), None);
    }

    #[test]
    fn inactive_codes_do_not_widen_range() {
        let series = vec![datum(1, &[("VER", Some(90.0)), ("LEC", Some(200.0))])];
        let range = axis_range(&series, &["VER"]).unwrap();
        assert!(range.max < 91.0);
    }

    proptest! {
        #[test]
        fn prop_none_iff_no_finite_value(
            values in prop::collection::vec(
                prop::option::of(prop_oneof![0.0f64..500.0, Just(f64::NAN), Just(f64::INFINITY)]),
                0..32,
            )
        ) {
            let series: Vec<ChartDatum> = values
                .iter()
                .enumerate()
                .map(|(lap, value)| ChartDatum {
                    lap_number: lap as f64,
                    times: BTreeMap::from([("VER".to_string(), *value)]),
                })
                .collect();

            let has_finite = values.iter().flatten().any(|v| v.is_finite());
            let range = axis_range(&series, &["VER"]);
            prop_assert_eq!(range.is_some(), has_finite);

            if let Some(range) = range {
                prop_assert!(range.min >= 0.0);
                prop_assert!(range.max > range.min);
            }
        }
    }
}
