//! Callback rules: names and the casts callbacks perform.

use rstest::rstest;
use wpflint::RuleId;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn with_changed_callback(callback: &str, body: &str) -> String {
    control(&format!(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), {callback}));

        private static void {callback}(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {{
            {body}
        }}
"#
    ))
}

// =============================================================================
// CALLBACK NAMES
// =============================================================================

#[test]
fn test_matching_changed_callback_is_clean() {
    assert_no_diagnostics(&with_changed_callback("OnBarChanged", ""));
}

#[test]
fn test_changed_callback_not_matching_registered_name() {
    let source = with_changed_callback("OnErrorChanged", "");
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0005);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "OnErrorChanged");
    assert!(diagnostics[0].message.contains("OnBarChanged"));
    assert!(diagnostics[0].fix.is_some());
}

#[test]
fn test_coerce_callback_not_matching_registered_name() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnBarChanged, CoerceError));

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }

        private static object CoerceError(DependencyObject d, object baseValue)
        {
            return baseValue;
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0006"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0006);
    assert_eq!(reported_text(&source, &diagnostics[0]), "CoerceError");
}

#[rstest]
#[case::validate("ValidateBar", 0)]
#[case::is_valid("IsBarValid", 0)]
#[case::wrong("ValidateError", 1)]
fn test_validate_callback_names(#[case] callback: &str, #[case] expected: usize) {
    let source = control(&format!(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)), {callback});

        private static bool {callback}(object value)
        {{
            return true;
        }}
"#
    ));
    assert_eq!(diagnostics_for(&source, RuleId::Wpf0007).len(), expected);
}

#[test]
fn test_shared_callback_reported_once_without_fix() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnValueChanged));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnValueChanged));

        private static void OnValueChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0005);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].fix.is_none());
    assert!(diagnostics[0].message.contains("2 registrations"));
    let second = source.find("BazProperty =").unwrap();
    assert!(usize::from(diagnostics[0].range.start()) < second);
}

#[test]
fn test_callback_shared_by_three_registrations() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnValueChanged));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnValueChanged));

        public static readonly DependencyProperty QuxProperty = DependencyProperty.Register(
            "Qux", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnValueChanged));

        private static void OnValueChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0005);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("3 registrations"));
    assert!(diagnostics[0].fix.is_none());
}

#[test]
fn test_shared_callback_named_after_last_owner_is_clean() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnQuxChanged));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnQuxChanged));

        public static readonly DependencyProperty QuxProperty = DependencyProperty.Register(
            "Qux", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnQuxChanged));

        private static void OnQuxChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }
"#,
    );
    assert!(diagnostics_for(&source, RuleId::Wpf0005).is_empty());
}

#[test]
fn test_shared_callback_named_after_one_owner_is_clean() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnBarChanged));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnBarChanged));

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }
"#,
    );
    assert!(diagnostics_for(&source, RuleId::Wpf0005).is_empty());
}

// =============================================================================
// WPF0019 / WPF0020
// =============================================================================

#[rstest]
#[case::owner("var control = (FooControl)d;", 0)]
#[case::base_type("var control = (Control)d;", 0)]
#[case::as_owner("var control = d as FooControl;", 0)]
#[case::unrelated("var control = (TextBox)d;", 1)]
#[case::as_unrelated("var control = d as TextBox;", 1)]
fn test_sender_casts(#[case] body: &str, #[case] expected: usize) {
    let source = with_changed_callback("OnBarChanged", body);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0019);
    assert_eq!(diagnostics.len(), expected);
    if let Some(diagnostic) = diagnostics.first() {
        assert_eq!(reported_text(&source, diagnostic), "TextBox");
        assert_eq!(diagnostic.fix.is_some(), body.starts_with("var control = (TextBox)"));
    }
}

#[rstest]
#[case::registered("var value = (int)e.NewValue;", 0)]
#[case::old_value("var value = (int)e.OldValue;", 0)]
#[case::object("var value = (object)e.NewValue;", 0)]
#[case::wrong_new("var value = (string)e.NewValue;", 1)]
#[case::wrong_old("var value = (double)e.OldValue;", 1)]
fn test_changed_value_casts(#[case] body: &str, #[case] expected: usize) {
    let source = with_changed_callback("OnBarChanged", body);
    assert_eq!(diagnostics_for(&source, RuleId::Wpf0020).len(), expected);
}

#[test]
fn test_coerce_value_cast_reported_at_type() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), null, CoerceBar));

        private static object CoerceBar(DependencyObject d, object baseValue)
        {
            var text = (string)baseValue;
            return baseValue;
        }
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0020);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "string");
    assert!(diagnostics[0].message.contains("int"));
}

#[test]
fn test_attached_sender_casts_are_not_checked() {
    let source = attached(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.RegisterAttached(
            "Bar", typeof(int), typeof(Foo), new PropertyMetadata(default(int), OnBarChanged));

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
            var textBox = (TextBox)d;
        }
"#,
    );
    assert!(diagnostics_for(&source, RuleId::Wpf0019).is_empty());
}
