use super::*;
use crate::parser::parse;

fn first_type(source: &str) -> TypeDecl {
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let root = SourceFile::cast(parsed.syntax()).unwrap();
    root.syntax()
        .descendants()
        .find_map(TypeDecl::cast)
        .expect("expected a type declaration")
}

#[test]
fn test_ast_namespace_and_usings() {
    let parsed = parse("using System.Windows;\nnamespace Demo.Controls { public class Foo {} }");
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let root = SourceFile::cast(parsed.syntax()).unwrap();

    let usings: Vec<_> = root.usings().collect();
    assert_eq!(usings.len(), 1);
    assert_eq!(usings[0].target().unwrap().segments(), vec!["System", "Windows"]);

    let members: Vec<_> = root.members().collect();
    if let Member::Namespace(ns) = &members[0] {
        assert_eq!(ns.name().unwrap().to_string(), "Demo.Controls");
        assert_eq!(ns.members().count(), 1);
    } else {
        panic!("expected Namespace");
    }
}

#[test]
fn test_ast_file_scoped_namespace() {
    let parsed = parse("namespace Demo;\npublic class Foo {}\npublic class Bar {}");
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let root = SourceFile::cast(parsed.syntax()).unwrap();
    let members: Vec<_> = root.members().collect();
    assert_eq!(members.len(), 1);
    if let Member::Namespace(ns) = &members[0] {
        assert_eq!(ns.members().count(), 2);
    } else {
        panic!("expected Namespace");
    }
}

#[test]
fn test_ast_field_with_registration() {
    let class = first_type(
        r#"public class FooControl : Control
        {
            public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
                nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));
        }"#,
    );
    assert_eq!(class.name().unwrap().text(), Some("FooControl".to_string()));
    assert_eq!(class.base_types()[0].segments(), vec!["Control"]);

    let field = class
        .members()
        .find_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
        .unwrap();
    assert!(field.is_static());
    assert!(field.is_readonly());
    assert!(field.is_public());
    assert_eq!(field.ty().unwrap().text(), "DependencyProperty");

    let declarator = field.declarators().next().unwrap();
    assert_eq!(declarator.name().unwrap().text(), Some("BarProperty".to_string()));
    let Some(Expr::Invocation(call)) = declarator.initializer() else {
        panic!("expected invocation initializer");
    };
    assert_eq!(call.method_name(), Some("Register".to_string()));
    let args = call.args();
    assert_eq!(args.len(), 4);
    assert!(matches!(args[1].expr(), Some(Expr::TypeOf(_))));
    assert!(matches!(args[3].expr(), Some(Expr::ObjectCreation(_))));
}

#[test]
fn test_ast_property_accessors() {
    let class = first_type(
        r#"class FooControl
        {
            public int Bar
            {
                get { return (int)this.GetValue(BarProperty); }
                set => this.SetValue(BarProperty, value);
            }
        }"#,
    );
    let Some(Member::Property(property)) = class.members().next() else {
        panic!("expected property");
    };
    assert_eq!(property.ty().unwrap().predefined().unwrap().text(), "int");
    let getter = property.getter().unwrap();
    let setter = property.setter().unwrap();
    assert!(matches!(getter.body(), Some(Body::Block(_))));
    assert!(matches!(setter.body(), Some(Body::Expr(_))));

    let Some(Body::Block(block)) = getter.body() else {
        unreachable!()
    };
    let Some(Stmt::Return(ret)) = block.statements().next() else {
        panic!("expected return");
    };
    let Some(Expr::Cast(cast)) = ret.expr() else {
        panic!("expected cast");
    };
    assert_eq!(cast.ty().unwrap().text(), "int");
    assert!(matches!(cast.expr(), Some(Expr::Invocation(_))));
}

#[test]
fn test_ast_expression_bodied_property() {
    let class = first_type("class A { public int Bar => (int)GetValue(BarProperty); }");
    let Some(Member::Property(property)) = class.members().next() else {
        panic!("expected property");
    };
    assert!(property.accessor_list().is_none());
    assert!(matches!(property.getter_body(), Some(Body::Expr(_))));
}

#[test]
fn test_ast_lambda_and_delegate_creation() {
    let class = first_type(
        r#"class A
        {
            static readonly PropertyMetadata M1 = new PropertyMetadata(1, (d, e) => OnChanged(d, e));
            static readonly PropertyMetadata M2 = new PropertyMetadata(new PropertyChangedCallback(OnChanged));
        }"#,
    );
    let fields: Vec<_> = class
        .members()
        .filter_map(|m| match m {
            Member::Field(f) => f.declarators().next(),
            _ => None,
        })
        .collect();

    let Some(Expr::ObjectCreation(first)) = fields[0].initializer() else {
        panic!("expected object creation");
    };
    let Some(Expr::Lambda(lambda)) = first.args()[1].expr() else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.params().len(), 2);
    assert!(matches!(lambda.body(), Some(LambdaBody::Expr(Expr::Invocation(_)))));

    let Some(Expr::ObjectCreation(second)) = fields[1].initializer() else {
        panic!("expected object creation");
    };
    assert!(matches!(
        second.args()[0].expr(),
        Some(Expr::ObjectCreation(_))
    ));
}

#[test]
fn test_ast_attached_methods_with_attributes_and_docs() {
    let class = first_type(
        r#"public static class Attached
        {
            /// <summary>Helper for getting Baz.</summary>
            [AttachedPropertyBrowsableForType(typeof(UIElement))]
            public static int GetBaz(DependencyObject element) => (int)element.GetValue(BazProperty);

            public static void SetBaz(this DependencyObject element, int value)
            {
                element.SetValue(BazProperty, value);
            }
        }"#,
    );
    let methods: Vec<_> = class
        .members()
        .filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
        .collect();
    assert_eq!(methods.len(), 2);

    let get = &methods[0];
    assert_eq!(
        get.doc_comment().as_deref(),
        Some("<summary>Helper for getting Baz.</summary>")
    );
    let attributes = get.attributes();
    assert_eq!(
        attributes[0].short_name().as_deref(),
        Some("AttachedPropertyBrowsableForType")
    );
    assert_eq!(get.params().len(), 1);

    let set = &methods[1];
    assert!(set.doc_comment().is_none());
    assert!(set.params()[0].is_this());
    assert_eq!(set.return_type().unwrap().predefined().unwrap().text(), "void");
}

#[test]
fn test_ast_string_literal_values() {
    let class = first_type(r#"class A { const string X = "a\"b"; const string Y = @"c""d"; }"#);
    let values: Vec<_> = class
        .members()
        .filter_map(|m| match m {
            Member::Field(f) => f.declarators().next()?.initializer(),
            _ => None,
        })
        .filter_map(|e| match e {
            Expr::Literal(lit) => lit.string_value(),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec!["a\"b".to_string(), "c\"d".to_string()]);
}
