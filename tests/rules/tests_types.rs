//! Accessor types against the registered type.

use rstest::rstest;
use wpflint::RuleId;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_clr_property_type_not_matching_registered_type() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));

        public string Bar
        {
            get { return (string)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); }
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0012"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0012);
    assert_eq!(reported_text(&source, &diagnostics[0]), "string");
    assert!(diagnostics[0].message.contains("'int'"));
}

#[test]
fn test_clr_property_with_framework_type() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(TextBox), typeof(FooControl));

        public TextBox Bar
        {
            get { return (TextBox)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); }
        }
"#,
    );
    assert!(diagnostics_for(&source, RuleId::Wpf0012).is_empty());
}

#[rstest]
#[case::getter(
    "public static int GetBar(DependencyObject element)",
    "public static string GetBar(DependencyObject element)",
    "string"
)]
#[case::setter(
    "public static void SetBar(DependencyObject element, int value)",
    "public static void SetBar(DependencyObject element, string value)",
    "string value"
)]
fn test_attached_accessor_type_not_matching_registered_type(
    #[case] original: &str,
    #[case] changed: &str,
    #[case] reported: &str,
) {
    let source = attached(&ATTACHED_BAR.replace(original, changed));
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0013);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), reported);
}
