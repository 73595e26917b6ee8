use grid_notation::{
    notation::{Articulation, Attachments, Dynamic, Fermata},
    primitives::{Grid, Length},
    segmentation::SegmentSettings,
};

#[test]
fn test_partial_settings() {
    let settings: SegmentSettings = serde_json::from_str(r#"{"hard_cut": true}"#).unwrap();
    assert_eq!(settings, SegmentSettings::hard_cut());

    let settings: SegmentSettings =
        serde_json::from_str(r#"{"connectable_denominator": 8, "max_length": "1/2"}"#)
            .unwrap();
    assert!(!settings.hard_cut);
    assert_eq!(settings.connectable_denominator, 8);
    assert_eq!(settings.max_length, Length::new(1, 2));

    let settings: SegmentSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, SegmentSettings::default());
}

#[test]
fn test_settings_json() {
    let settings = SegmentSettings {
        max_length: Length::new(1, 4),
        ..Default::default()
    };
    let json = serde_json::to_value(&settings).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "hard_cut": false,
            "connectable_denominator": 4,
            "max_length": "1/4",
        })
    );
}

#[test]
fn test_grid_json() {
    let grid: Grid = serde_json::from_str(r#"["3/8", "1/4", "1/4"]"#).unwrap();
    assert_eq!(grid, Grid::from_groups(&[3, 2, 2], 8).unwrap());
    assert_eq!(grid.total(), Length::new(7, 8));
    assert_eq!(
        serde_json::to_string(&grid).unwrap(),
        r#"["3/8","1/4","1/4"]"#
    );

    assert!(serde_json::from_str::<Grid>("[]").is_err());
    assert!(serde_json::from_str::<Grid>(r#"["1/4", "0"]"#).is_err());
    assert!(serde_json::from_str::<Grid>(r#"["1/0"]"#).is_err());
    assert!(serde_json::from_str::<Grid>(r#"["quarter"]"#).is_err());
}

#[test]
fn test_attachments_json() {
    let attachments: Attachments = serde_json::from_str(
        r#"{"dynamic": "pp", "articulation": "staccatissimo", "fermata": "long"}"#,
    )
    .unwrap();
    assert_eq!(
        attachments,
        Attachments {
            dynamic: Some(Dynamic("pp".to_string())),
            articulation: Some(Articulation::Staccatissimo),
            markup: None,
            fermata: Some(Fermata::Long),
        }
    );
    assert!(serde_json::from_str::<Attachments>(r#"{"fermata": "endless"}"#).is_err());
}
