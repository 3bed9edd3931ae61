use rstest::rstest;

use super::*;
use crate::base::FileId;
use crate::parser::parse;
use crate::semantic::{Compilation, FileSemantics};

const FILE: FileId = FileId::new(1);

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn plan(edits: Vec<TextEdit>) -> RewritePlan {
    RewritePlan {
        title: "test".to_string(),
        edits,
    }
}

#[test]
fn edits_apply_back_to_front() {
    let plan = plan(vec![
        TextEdit::replace(range(4, 7), "uvwxyz"),
        TextEdit::replace(range(0, 3), "a"),
    ]);
    assert_eq!(apply_plan("abc def ghi", &plan).unwrap(), "a uvwxyz ghi");
}

#[test]
fn overlapping_edits_are_rejected() {
    let plan = plan(vec![
        TextEdit::replace(range(0, 5), "x"),
        TextEdit::replace(range(3, 7), "y"),
    ]);
    assert!(matches!(
        apply_plan("abcdefgh", &plan),
        Err(FixError::OverlappingEdits { .. })
    ));
}

#[test]
fn edit_past_the_end_is_rejected() {
    let plan = plan(vec![TextEdit::replace(range(2, 40), "x")]);
    assert_eq!(
        apply_plan("short", &plan),
        Err(FixError::OutOfBounds(range(2, 40)))
    );
}

#[rstest]
#[case("BarProperty", true)]
#[case("_bar", true)]
#[case("class", false)]
#[case("int", false)]
#[case("1Bar", false)]
#[case("Bar Baz", false)]
#[case("", false)]
fn identifier_validation(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(is_valid_identifier(name), expected);
}

const MISNAMED: &str = r#"
using System.Windows;
using System.Windows.Controls;

public class FooControl : Control
{
    public static readonly DependencyProperty ErrorProperty = DependencyProperty.Register(
        "Bar", typeof(int), typeof(FooControl));

    public int Bar
    {
        get { return (int)this.GetValue(ErrorProperty); }
        set { this.SetValue(FooControl.ErrorProperty, value); }
    }
}
"#;

#[test]
fn rename_updates_declaration_and_references() {
    let db = Compilation::new([(FILE, parse(MISNAMED).green)]);
    let model = FileSemantics::new(&db, FILE);
    let foo = db.type_named("FooControl").unwrap();
    let field = db.find_members(foo, "ErrorProperty")[0];

    let plan = rename_symbol(&model, field, "BarProperty").unwrap();
    assert_eq!(plan.edits.len(), 3);
    let renamed = apply_plan(MISNAMED, &plan).unwrap();
    assert!(!renamed.contains("ErrorProperty"));
    assert!(renamed.contains("DependencyProperty BarProperty ="));
    assert!(renamed.contains("this.GetValue(BarProperty)"));
    assert!(renamed.contains("this.SetValue(FooControl.BarProperty, value)"));
}

#[test]
fn rename_to_keyword_is_an_error() {
    let db = Compilation::new([(FILE, parse(MISNAMED).green)]);
    let model = FileSemantics::new(&db, FILE);
    let foo = db.type_named("FooControl").unwrap();
    let field = db.find_members(foo, "ErrorProperty")[0];

    assert_eq!(
        rename_symbol(&model, field, "class"),
        Err(FixError::InvalidIdentifier("class".to_string()))
    );
}

#[test]
fn framework_symbols_cannot_be_renamed() {
    let db = Compilation::new([(FILE, parse(MISNAMED).green)]);
    let model = FileSemantics::new(&db, FILE);
    let control = db.type_named("System.Windows.Controls.Control").unwrap();

    assert!(matches!(
        rename_symbol(&model, control, "Widget"),
        Err(FixError::NotInFile(_))
    ));
}

#[test]
fn set_current_value_becomes_set_value() {
    let source = r#"
using System.Windows;

public class FooElement : FrameworkElement
{
    public void Reset()
    {
        this.SetCurrentValue(DataContextProperty, null);
    }
}
"#;
    let db = Compilation::new([(FILE, parse(source).green)]);
    let model = FileSemantics::new(&db, FILE);
    let call = db
        .root(FILE)
        .unwrap()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::INVOCATION)
        .unwrap();

    let plan = use_set_value(&model, call.text_range()).unwrap();
    let fixed = apply_plan(source, &plan).unwrap();
    assert!(fixed.contains("this.SetValue(DataContextProperty, null);"));

    assert_eq!(
        use_set_value(&model, range(0, 1)),
        Err(FixError::NoCall(range(0, 1)))
    );
}

#[test]
fn cast_type_is_replaced_in_place() {
    let source = r#"
using System.Windows;

public class FooElement : FrameworkElement
{
    private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
    {
        var value = (string)e.NewValue;
        var other = e.OldValue as string;
    }
}
"#;
    let db = Compilation::new([(FILE, parse(source).green)]);
    let model = FileSemantics::new(&db, FILE);
    let mut types = db
        .root(FILE)
        .unwrap()
        .descendants()
        .filter(|node| {
            node.kind() == SyntaxKind::TYPE
                && node.parent().is_some_and(|p| p.kind() != SyntaxKind::PARAM)
                && node.text() == "string"
        })
        .map(|node| node.text_range());
    let cast = types.next().unwrap();
    let as_cast = types.next().unwrap();

    let plan = replace_cast_type(&model, cast, "int").unwrap();
    let fixed = apply_plan(source, &plan).unwrap();
    assert!(fixed.contains("var value = (int)e.NewValue;"));
    assert!(fixed.contains("e.OldValue as string;"));

    assert_eq!(
        replace_cast_type(&model, as_cast, "int"),
        Err(FixError::NoCast(as_cast))
    );
}
