use std::io::Write;
use std::time::Duration;

use link_accordion::{NamedSpeed, Settings, SettingsError, SettingsOverrides, SlideSpeed};
use pagedom::{Easing, TransitionConfig};

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.closed_class, "toggled-closed");
    assert_eq!(settings.opened_class, "toggled-open");
    assert_eq!(settings.close_text, "Close");
    assert_eq!(settings.open_text, "Open");
    assert_eq!(settings.heading_element, "h2");
    assert!(!settings.link_headings);
    assert_eq!(settings.default_content, None);
    assert_eq!(settings.slide_toggle, SlideSpeed::Named(NamedSpeed::Slow));
    assert_eq!(settings.toggle_link_class, "section-toggle");
    assert_eq!(settings.toggle_section_class, "toggle-section");
    assert!(settings.toggle_all);
}

#[test]
fn test_merge_keeps_unspecified() {
    let settings = Settings::from_json(
        r#"{ "openText": "Expand", "defaultContent": -1, "toggleAll": false }"#,
    )
    .unwrap();

    assert_eq!(settings.open_text, "Expand");
    assert_eq!(settings.default_content, Some(-1));
    assert!(!settings.toggle_all);
    assert_eq!(settings.close_text, "Close");
    assert_eq!(settings.heading_element, "h2");
}

#[test]
fn test_empty_overrides_are_defaults() {
    assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    assert_eq!(
        Settings::default().merge(SettingsOverrides::default()),
        Settings::default()
    );
}

#[test]
fn test_speed_forms() {
    let named = Settings::from_json(r#"{ "slideToggle": "fast" }"#).unwrap();
    assert_eq!(named.transition().duration, Duration::from_millis(200));
    assert_eq!(named.transition().easing, Easing::EaseInOut);

    let millis = Settings::from_json(r#"{ "speed": 250 }"#).unwrap();
    assert_eq!(millis.slide_toggle, SlideSpeed::Millis(250));

    let custom =
        Settings::from_json(r#"{ "slideToggle": { "duration": 120, "easing": "linear" } }"#)
            .unwrap();
    assert_eq!(
        custom.transition(),
        TransitionConfig::new(Duration::from_millis(120), Easing::Linear)
    );

    let swing = Settings::from_json(r#"{ "slideToggle": { "duration": 50, "easing": "swing" } }"#)
        .unwrap();
    assert_eq!(swing.transition().easing, Easing::EaseInOut);
}

#[test]
fn test_invalid_overrides_rejected() {
    assert!(matches!(
        Settings::from_json(r#"{ "openTxt": "typo" }"#),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(
        Settings::from_json(r#"{ "toggleAll": "yes" }"#),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(
        Settings::from_json(r#"{ "slideToggle": "glacial" }"#),
        Err(SettingsError::Json(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "headingElement": "h3", "linkHeadings": true }}"#).unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.heading_element, "h3");
    assert!(settings.link_headings);

    let missing = Settings::load(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(SettingsError::Io { .. })));
}

#[test]
fn test_label_and_state_class() {
    let settings = Settings::default();
    assert_eq!(settings.label(true), "Close");
    assert_eq!(settings.label(false), "Open");
    assert_eq!(settings.state_class(true), "toggled-open");
    assert_eq!(settings.state_class(false), "toggled-closed");
}
