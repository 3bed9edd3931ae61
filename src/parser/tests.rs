use super::*;
use rstest::rstest;

fn kinds_of(source: &str) -> Vec<SyntaxKind> {
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    parsed.syntax().descendants().map(|n| n.kind()).collect()
}

#[test]
fn test_parse_is_lossless() {
    let source = "using System;\n\n// comment\nnamespace A\n{\n    /// doc\n    public class B { int x = 1 + 2 * 3; }\n}\n";
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    assert_eq!(parsed.syntax().to_string(), source);
}

#[rstest]
#[case::newline("\nclass A { }")]
#[case::line_comment("// header\nclass A { }")]
#[case::doc_comment("/// <summary>A.</summary>\nclass A { }")]
#[case::trailing("class A { }\n")]
fn test_leading_trivia_stays_in_source_file(#[case] source: &str) {
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let root = parsed.syntax();
    assert_eq!(root.kind(), SyntaxKind::SOURCE_FILE);
    assert_eq!(root.to_string(), source);
    assert!(root.descendants().any(|n| n.kind() == SyntaxKind::CLASS_DECL));
}

#[test]
fn test_parse_recovers_from_garbage() {
    let source = "class A { int x = ; ) public int Y { get; } }";
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().to_string(), source);
    // The property after the garbage is still recognized
    assert!(
        parsed
            .syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::PROPERTY_DECL)
    );
}

#[rstest]
#[case("x = (int)y;", SyntaxKind::CAST_EXPR)]
#[case("x = (FooControl)d;", SyntaxKind::CAST_EXPR)]
#[case("x = (a) + b;", SyntaxKind::PAREN_EXPR)]
#[case("f((d, e) => g(d, e));", SyntaxKind::LAMBDA_EXPR)]
#[case("f(e => g(e));", SyntaxKind::LAMBDA_EXPR)]
#[case("x = typeof(int);", SyntaxKind::TYPEOF_EXPR)]
#[case("x = default(double);", SyntaxKind::DEFAULT_EXPR)]
#[case("x = a ?? b;", SyntaxKind::BINARY_EXPR)]
#[case("x = a ? b : c;", SyntaxKind::CONDITIONAL_EXPR)]
#[case("x = a is Foo;", SyntaxKind::IS_EXPR)]
#[case("x = a as Foo;", SyntaxKind::IS_EXPR)]
#[case("var x = new Foo();", SyntaxKind::LOCAL_DECL_STMT)]
#[case("Foo x;", SyntaxKind::LOCAL_DECL_STMT)]
#[case("this.SetValue(P, value);", SyntaxKind::THIS_EXPR)]
#[case("if (a) { b(); } else c();", SyntaxKind::ELSE_CLAUSE)]
#[case("foreach (var x in xs) { y(); }", SyntaxKind::OTHER_STMT)]
#[case("try { a(); } catch (Exception) { } finally { }", SyntaxKind::OTHER_STMT)]
fn test_parse_statement_forms(#[case] statement: &str, #[case] expected: SyntaxKind) {
    let source = format!("class A {{ void M() {{ {} }} }}", statement);
    assert!(kinds_of(&source).contains(&expected), "{}", statement);
}

#[test]
fn test_parse_member_access_chain() {
    let source = "class A { object x = TextElement.FontSizeProperty.AddOwner(typeof(A)); }";
    let kinds = kinds_of(source);
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::MEMBER_ACCESS).count(),
        2
    );
    assert!(kinds.contains(&SyntaxKind::INVOCATION));
}

#[test]
fn test_parse_named_arguments() {
    let source = "class A { object x = F(name: \"Bar\", propertyType: typeof(int)); }";
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let named = parsed
        .syntax()
        .descendants()
        .filter_map(Argument::cast)
        .filter(|a| a.name().is_some())
        .count();
    assert_eq!(named, 2);
}

#[test]
fn test_parse_declaration_kinds() {
    let source = r#"
        [assembly: Foo]
        namespace N
        {
            public delegate void Changed(object sender);
            public enum Options { None = 0, AffectsMeasure = 1, }
            public interface IThing { int Value { get; } }
            public struct Size { public Size(double w) { } }
            public partial class Thing<T> : Base, IThing where T : class
            {
                static Thing() { }
                public int Value { get; private set; } = 3;
                public event Changed OnChanged;
                int IThing.Other => 1;
                T Make<U>(U u) where U : T => default;
            }
        }
    "#;
    let kinds = kinds_of(source);
    for expected in [
        SyntaxKind::ATTRIBUTE_LIST,
        SyntaxKind::DELEGATE_DECL,
        SyntaxKind::ENUM_DECL,
        SyntaxKind::ENUM_MEMBER,
        SyntaxKind::INTERFACE_DECL,
        SyntaxKind::STRUCT_DECL,
        SyntaxKind::CONSTRUCTOR_DECL,
        SyntaxKind::CLASS_DECL,
        SyntaxKind::BASE_LIST,
        SyntaxKind::PROPERTY_DECL,
        SyntaxKind::ACCESSOR_LIST,
        SyntaxKind::EQUALS_VALUE,
        SyntaxKind::METHOD_DECL,
        SyntaxKind::ARROW_BODY,
        SyntaxKind::FIELD_DECL,
    ] {
        assert!(kinds.contains(&expected), "missing {:?}", expected);
    }
}

#[test]
fn test_doc_comment_is_sibling_of_member() {
    let source = "class A\n{\n    /// <summary>Docs.</summary>\n    public static int GetX(object o) => 1;\n}";
    let parsed = parse(source);
    let method = parsed
        .syntax()
        .descendants()
        .find_map(MethodDecl::cast)
        .unwrap();
    assert_eq!(
        method.doc_comment().as_deref(),
        Some("<summary>Docs.</summary>")
    );
}
