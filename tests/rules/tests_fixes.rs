//! Rewrites offered by diagnostics, applied through the analysis snapshot.

use rstest::rstest;
use wpflint::RuleId;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_rename_backing_field_updates_references() {
    let source = control(&BAR_PROPERTY.replace("BarProperty", "ErrorProperty"));
    let fixed = fixed(&source, RuleId::Wpf0001);
    assert_eq!(fixed, control(BAR_PROPERTY));
    assert_no_diagnostics(&fixed);
}

#[test]
fn test_rename_clr_property() {
    let original = BAR_PROPERTY.replace("nameof(Bar)", "\"Bar\"");
    let source = control(&original.replace("public int Bar", "public int Error"));
    let fixed = fixed(&source, RuleId::Wpf0003);
    assert_eq!(fixed, control(&original));
}

#[rstest]
#[case::getter("GetBar", "GetError")]
#[case::setter("SetBar", "SetError")]
fn test_rename_attached_accessor(#[case] expected: &str, #[case] actual: &str) {
    let source = attached(&ATTACHED_BAR.replace(expected, actual));
    let fixed = fixed(&source, RuleId::Wpf0004);
    assert_eq!(fixed, attached(ATTACHED_BAR));
}

#[test]
fn test_rename_changed_callback_updates_argument() {
    let members = r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnBarChanged));

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
        }
"#;
    let source = control(&members.replace("OnBarChanged", "OnErrorChanged"));
    let fixed = fixed(&source, RuleId::Wpf0005);
    assert_eq!(fixed, control(members));
    assert_no_diagnostics(&fixed);
}

#[test]
fn test_set_current_value_becomes_set_value() {
    let members = r#"
        public void Reset()
        {
            this.SetCurrentValue(DataContextProperty, null);
        }
"#;
    let source = control(members);
    let fixed = fixed(&source, RuleId::Wpf0043);
    assert_eq!(fixed, control(&members.replace("SetCurrentValue", "SetValue")));
    assert_no_diagnostics(&fixed);
}

const CHANGED_CALLBACK: &str = r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int), OnBarChanged));

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
            var control = (FooControl)d;
            var value = (int)e.NewValue;
        }
"#;

#[rstest]
#[case::sender(RuleId::Wpf0019, "(FooControl)d", "(TextBox)d")]
#[case::value(RuleId::Wpf0020, "(int)e.NewValue", "(string)e.NewValue")]
fn test_wrong_cast_gets_registered_type(
    #[case] rule: RuleId,
    #[case] expected: &str,
    #[case] actual: &str,
) {
    let source = control(&CHANGED_CALLBACK.replace(expected, actual));
    let fixed = fixed(&source, rule);
    assert_eq!(fixed, control(CHANGED_CALLBACK));
    assert_no_diagnostics(&fixed);
}
