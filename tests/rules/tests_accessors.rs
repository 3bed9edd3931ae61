//! Accessor bodies, declaration order and value-setting calls.

use rstest::rstest;
use wpflint::RuleId;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

const KEY: &str = r#"
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));
"#;

const ALIAS: &str = r#"
        public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;
"#;

// =============================================================================
// WPF0031
// =============================================================================

#[rstest]
#[case::key_first(&[KEY, ALIAS], 0)]
#[case::alias_first(&[ALIAS, KEY], 1)]
fn test_key_declared_before_alias(#[case] members: &[&str], #[case] expected: usize) {
    let source = control(&members.concat());
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0031);
    assert_eq!(diagnostics.len(), expected);
    if let Some(diagnostic) = diagnostics.first() {
        assert_eq!(reported_text(&source, diagnostic), "BarProperty");
    }
}

// =============================================================================
// WPF0032
// =============================================================================

#[test]
fn test_getter_and_setter_use_different_properties() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl));

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            set { this.SetValue(BazProperty, value); }
        }
"#,
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0032);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "BazProperty");
}

// =============================================================================
// WPF0040
// =============================================================================

#[test]
fn test_read_only_property_set_through_key_is_clean() {
    let source = control(READ_ONLY_BAR);
    assert!(diagnostics_for(&source, RuleId::Wpf0040).is_empty());
}

#[rstest]
#[case::clr_setter(
    r#"
        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            private set { this.SetValue(BarProperty, value); }
        }
"#
)]
#[case::method(
    r#"
        public void Reset()
        {
            this.SetValue(BarProperty, 0);
        }
"#
)]
fn test_read_only_property_set_without_key(#[case] member: &str) {
    let source = control(&[KEY, ALIAS, member].concat());
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0040);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "BarProperty");
}

// =============================================================================
// WPF0042
// =============================================================================

#[test]
fn test_side_effect_in_clr_setter() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            set
            {
                this.SetValue(BarProperty, value);
                this.InvalidateMeasure();
            }
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0042"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0042);
    assert_eq!(reported_text(&source, &diagnostics[0]).trim(), "this.InvalidateMeasure();");
}

#[test]
fn test_side_effect_does_not_break_the_pair() {
    let source = control(
        r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl));

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); Foo(); }
        }

        private void Foo()
        {
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0042"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0042);
    assert_eq!(reported_text(&source, &diagnostics[0]).trim(), "Foo();");
}

#[test]
fn test_side_effect_in_attached_setter() {
    let source = attached(&ATTACHED_BAR.replace(
        "element.SetValue(BarProperty, value);",
        "element.SetValue(BarProperty, value);\n            element.ClearValue(BarProperty);",
    ));
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0042);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]).trim(), "element.ClearValue(BarProperty);");
}

// =============================================================================
// WPF0043
// =============================================================================

#[test]
fn test_set_current_value_on_data_context() {
    let source = control(
        r#"
        public void Reset()
        {
            this.SetCurrentValue(DataContextProperty, null);
        }
"#,
    );
    assert_eq!(codes(&source), vec!["WPF0043"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0043);
    assert_eq!(
        reported_text(&source, &diagnostics[0]),
        "this.SetCurrentValue(DataContextProperty, null)"
    );
    assert!(diagnostics[0].fix.is_some());
}

#[test]
fn test_set_current_value_on_own_property_is_clean() {
    let source = control(&format!(
        r#"{BAR_PROPERTY}
        public void Reset()
        {{
            this.SetCurrentValue(BarProperty, 1);
        }}
"#
    ));
    assert_no_diagnostics(&source);
}
