//! TypeScript Generation Tests
//!
//! Validates that Paddock's display types can be exported to TypeScript
//! when the tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_display_types_implement_specta_type() {
    use specta::Type;

    fn assert_type<T: Type>() {}

    // Session documents
    assert_type::<paddock::SessionRecord>();
    assert_type::<paddock::SessionMeta>();
    assert_type::<paddock::LapRecord>();
    assert_type::<paddock::LapFlag>();
    assert_type::<paddock::LapSummary>();

    // Track documents and overlay
    assert_type::<paddock::TrackCatalog>();
    assert_type::<paddock::CornerDescriptor>();
    assert_type::<paddock::RenderedTrack>();
    assert_type::<paddock::ViewFrame>();

    // Chart output
    assert_type::<paddock::ChartDatum>();
    assert_type::<paddock::AxisRange>();
    assert_type::<paddock::CornerTable>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let range = paddock::AxisRange { min: 90.0, max: 92.0 };
    assert!(range.max > range.min);
}
