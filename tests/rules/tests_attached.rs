//! Attached property accessors: browsable-for-type attribute and documentation.

use wpflint::{RuleId, Severity};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

const BROWSABLE: &str = "[AttachedPropertyBrowsableForType(typeof(DependencyObject))]";

fn without_docs(members: &str) -> String {
    members
        .lines()
        .filter(|line| !line.trim_start().starts_with("///"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_getter_without_browsable_attribute() {
    let source = attached(&ATTACHED_BAR.replace(BROWSABLE, ""));
    assert_eq!(codes(&source), vec!["WPF0033"]);
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0033);
    assert_eq!(reported_text(&source, &diagnostics[0]), "GetBar");
    assert_eq!(diagnostics[0].severity, Severity::Info);
    assert!(diagnostics[0].message.contains("typeof(DependencyObject)"));
}

#[test]
fn test_browsable_attribute_with_wrong_type() {
    let source = attached(&ATTACHED_BAR.replace(
        "typeof(DependencyObject))]",
        "typeof(UIElement))]",
    ));
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0034);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "typeof(UIElement)");
}

#[test]
fn test_public_accessors_without_docs() {
    let source = attached(&without_docs(ATTACHED_BAR));
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0061);
    assert_eq!(diagnostics.len(), 2);
    assert!(
        diagnostics
            .iter()
            .all(|d| reported_text(&source, d).contains("static"))
    );
}

#[test]
fn test_private_accessors_without_docs_are_not_reported() {
    let members = without_docs(ATTACHED_BAR).replace("public static void", "private static void");
    let members = members.replace("public static int", "private static int");
    let source = attached(&members);
    assert!(diagnostics_for(&source, RuleId::Wpf0061).is_empty());
}

#[test]
fn test_lookalike_browsable_attribute_does_not_count() {
    let members = ATTACHED_BAR.replace(
        BROWSABLE,
        "[Fake.AttachedPropertyBrowsableForType(typeof(DependencyObject))]",
    );
    let source = format!(
        r#"{}
namespace Fake
{{
    public class AttachedPropertyBrowsableForTypeAttribute : System.Attribute
    {{
    }}
}}
"#,
        attached(&members)
    );
    let diagnostics = diagnostics_for(&source, RuleId::Wpf0033);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(reported_text(&source, &diagnostics[0]), "GetBar");
}

#[test]
fn test_fully_qualified_browsable_attribute_is_recognized() {
    let source = attached(&ATTACHED_BAR.replace(
        BROWSABLE,
        "[System.Windows.AttachedPropertyBrowsableForTypeAttribute(typeof(DependencyObject))]",
    ));
    assert_no_diagnostics(&source);
}
