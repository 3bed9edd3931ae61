//! Naming rules: backing members, CLR properties and attached accessors.

use rstest::rstest;
use wpflint::RuleId;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// CLEAN DECLARATIONS
// =============================================================================

#[rstest]
#[case::plain(control(BAR_PROPERTY))]
#[case::read_only(control(READ_ONLY_BAR))]
#[case::attached(attached(ATTACHED_BAR))]
fn test_well_formed_declarations_are_clean(#[case] source: String) {
    assert_no_diagnostics(&source);
}

// =============================================================================
// WPF0001 / WPF0002
// =============================================================================

#[test]
fn test_field_not_matching_registered_name() {
    let source = control(
        r#"
        public static readonly DependencyProperty ErrorProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0001);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "ErrorProperty");
    assert!(diagnostics[0].message.contains("BarProperty"));
    assert!(diagnostics[0].fix.is_some());
}

#[test]
fn test_key_not_matching_registered_name() {
    let source = control(
        r#"
        private static readonly DependencyPropertyKey BarKey = DependencyProperty.RegisterReadOnly(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public static readonly DependencyProperty BarProperty = BarKey.DependencyProperty;
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0002"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0002);
    assert_eq!(reported_text(&source, &diagnostics[0]), "BarKey");
    assert!(diagnostics[0].message.contains("BarPropertyKey"));
}

#[test]
fn test_alias_not_matching_key_registration() {
    let source = control(
        r#"
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public static readonly DependencyProperty ErrorProperty = BarPropertyKey.DependencyProperty;
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0001);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "ErrorProperty");
}

// =============================================================================
// WPF0003
// =============================================================================

#[test]
fn test_clr_property_not_matching_registered_name() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));

        public int Error
        {
            get { return (int)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); }
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0003"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0003);
    assert_eq!(reported_text(&source, &diagnostics[0]), "Error");
}

// =============================================================================
// WPF0004
// =============================================================================

#[rstest]
#[case::getter("GetBar", "GetError")]
#[case::setter("SetBar", "SetError")]
fn test_attached_accessor_not_matching_registered_name(#[case] original: &str, #[case] renamed: &str) {
    let source = attached(&ATTACHED_BAR.replace(original, renamed));
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0004);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), renamed);
    assert!(diagnostics[0].message.contains(original));
}
