use rstest::rstest;

use super::*;
use crate::base::FileId;
use crate::parser::{AstNode, Expr, FieldDecl, Invocation, ObjectCreation, SyntaxNode, parse};

const FILE: FileId = FileId::new(1);

fn compile(source: &str) -> Compilation {
    Compilation::new([(FILE, parse(source).green)])
}

fn root(db: &Compilation) -> SyntaxNode {
    db.root(FILE).expect("file is part of the compilation")
}

fn first<N: AstNode>(node: &SyntaxNode) -> N {
    node.descendants()
        .find_map(N::cast)
        .expect("node of the requested kind")
}

fn control(body: &str) -> String {
    format!(
        r#"
using System.Windows;
using System.Windows.Controls;

namespace Demo
{{
    public class FooControl : Control
    {{
{body}
    }}
}}
"#
    )
}

#[test]
fn framework_types_are_always_available() {
    let db = compile("");
    let dp = db
        .type_named("System.Windows.DependencyProperty")
        .expect("DependencyProperty");
    let register = db.find_members(dp, "Register");
    assert_eq!(register.len(), 3);
    assert!(db.symbol(dp).is_metadata());
    assert!(db.symbol(dp).declaration.is_none());
    assert_eq!(db.source_files().collect::<Vec<_>>(), vec![FILE]);
}

#[test]
fn source_types_derive_from_framework_bases() {
    let db = compile(&control(""));
    let foo = db.type_named("Demo.FooControl").expect("FooControl");
    let dependency_object = db
        .type_named("System.Windows.DependencyObject")
        .expect("DependencyObject");
    assert!(db.derives_from(foo, dependency_object));
    assert_eq!(db.qualified_name(foo).to_string(), "Demo.FooControl");
    assert_eq!(db.symbol(foo).origin, SymbolOrigin::Source(FILE));
}

#[test]
fn field_types_resolve_through_usings() {
    let db = compile(&control(
        "public static readonly DependencyProperty BarProperty = null;",
    ));
    let root = root(&db);
    let field: FieldDecl = first(&root);
    let model = FileSemantics::new(&db, FILE);
    let id = model
        .declared_symbol(field.syntax())
        .expect("field symbol");
    let symbol = model.symbol(id);
    assert_eq!(symbol.name, "BarProperty");
    assert!(symbol.is_static && symbol.is_readonly);
    assert_eq!(symbol.accessibility, Accessibility::Public);
    assert_eq!(model.type_display(&symbol.ty), "DependencyProperty");
}

#[test]
fn partial_types_merge_members() {
    let db = compile(
        r#"
namespace Demo
{
    public partial class Foo { public int A; }
    public partial class Foo { public int B; }
}
"#,
    );
    let foo = db.type_named("Demo.Foo").expect("Foo");
    assert_eq!(db.find_members(foo, "A").len(), 1);
    assert_eq!(db.find_members(foo, "B").len(), 1);
}

#[test]
fn nested_and_qualified_type_names_resolve() {
    let db = compile(
        r#"
namespace Demo
{
    public class Outer
    {
        public class Inner { }
        public Inner Field;
        public System.Windows.Thickness Margin;
    }
}
"#,
    );
    let outer = db.type_named("Demo.Outer").expect("Outer");
    let inner = db.nested_type(outer, "Inner", 0).expect("Inner");
    let field = db.find_members(outer, "Field")[0];
    assert_eq!(db.symbol(field).ty, TypeRef::Named(inner));
    assert_eq!(db.qualified_name(inner).to_string(), "Demo.Outer.Inner");
    let margin = db.find_members(outer, "Margin")[0];
    assert_eq!(db.type_display(&db.symbol(margin).ty), "Thickness");
}

#[test]
fn scope_reports_file_scoped_namespace() {
    let db = compile("using System;\nnamespace Demo.Inner;\npublic class C { }\n");
    let root = root(&db);
    let class = root
        .descendants()
        .find(|n| n.kind() == crate::parser::SyntaxKind::CLASS_DECL)
        .expect("class");
    let scope = db.scope_at(FILE, &class);
    assert_eq!(scope.namespace, "Demo.Inner");
    assert_eq!(scope.usings, vec!["System".to_string()]);
    assert_eq!(scope.namespace_chain(), vec!["Demo.Inner", "Demo", ""]);
}

#[rstest]
#[case("new PropertyMetadata(1.0)", &["defaultValue"])]
#[case("new PropertyMetadata(OnChanged)", &["propertyChangedCallback"])]
#[case("new PropertyMetadata(null)", &["propertyChangedCallback"])]
#[case("new PropertyMetadata(default(double), OnChanged)", &["defaultValue", "propertyChangedCallback"])]
#[case(
    "new FrameworkPropertyMetadata(1.0, FrameworkPropertyMetadataOptions.AffectsMeasure)",
    &["defaultValue", "flags"]
)]
#[case(
    "new FrameworkPropertyMetadata(1.0, (d, e) => { })",
    &["defaultValue", "propertyChangedCallback"]
)]
fn metadata_constructor_overloads(#[case] creation: &str, #[case] expected: &[&str]) {
    let body = format!(
        "private static readonly PropertyMetadata Meta = {creation};\n\
         private static void OnChanged(DependencyObject d, DependencyPropertyChangedEventArgs e) {{ }}"
    );
    let db = compile(&control(&body));
    let root = root(&db);
    let creation: ObjectCreation = first(&root);
    let model = FileSemantics::new(&db, FILE);
    let signature = model
        .resolve_invoked_method(creation.syntax())
        .expect("constructor resolves");
    let names: Vec<&str> = signature.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn register_overload_and_argument_alignment() {
    let db = compile(&control(
        r#"public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), validateValueCallback: IsValid, typeMetadata: new PropertyMetadata(1));
        public int Bar { get; set; }
        private static bool IsValid(object value) => true;"#,
    ));
    let root = root(&db);
    let call: Invocation = first(&root);
    let model = FileSemantics::new(&db, FILE);
    let signature = model
        .resolve_invoked_method(call.syntax())
        .expect("Register resolves");
    assert_eq!(signature.name, "Register");
    assert_eq!(signature.parameters.len(), 5);
    let metadata = argument_for(&signature, &call.args(), "typeMetadata").expect("metadata");
    assert!(matches!(metadata, Expr::ObjectCreation(_)));
    let aligned = align_arguments(&signature, &call.args());
    assert!(aligned.iter().all(Option::is_some));
}

#[test]
fn ambiguous_overloads_do_not_resolve() {
    let db = compile(
        r#"
namespace Demo
{
    public class C
    {
        void M(string a, object b) { }
        void M(object a, string b) { }
        void Call() { M("x", "y"); }
    }
}
"#,
    );
    let root = root(&db);
    let call: Invocation = first(&root);
    let model = FileSemantics::new(&db, FILE);
    assert!(model.resolve_invoked_method(call.syntax()).is_none());
}

#[test]
fn locals_parameters_and_members_bind() {
    let db = compile(&control(
        r#"private int count;
        private void M(int value)
        {
            var local = value;
            this.count = local;
        }"#,
    ));
    let root = root(&db);
    let model = FileSemantics::new(&db, FILE);
    let assign = root
        .descendants()
        .find_map(crate::parser::AssignExpr::cast)
        .expect("assignment");
    let lhs = assign.lhs().expect("lhs");
    let rhs = assign.rhs().expect("rhs");
    let field = model.resolve_symbol(&lhs).expect("field");
    assert_eq!(model.symbol(field).kind, SymbolKind::Field);
    let local = model.resolve_symbol(&rhs).expect("local");
    assert_eq!(model.symbol(local).kind, SymbolKind::Local);
    // `var` takes no type from its initializer
    assert_eq!(model.symbol(local).ty, TypeRef::Unknown);
}

#[rstest]
#[case("[AttachedPropertyBrowsableForType(typeof(UIElement))]", Some("System.Windows.AttachedPropertyBrowsableForTypeAttribute"))]
#[case("[AttachedPropertyBrowsableForTypeAttribute(typeof(UIElement))]", Some("System.Windows.AttachedPropertyBrowsableForTypeAttribute"))]
#[case("[Missing]", None)]
fn attribute_names_bind_with_and_without_suffix(
    #[case] attribute: &str,
    #[case] expected: Option<&str>,
) {
    let db = compile(&control(&format!(
        "{attribute}\n        public static int GetBar(UIElement element) {{ return 0; }}"
    )));
    let root = root(&db);
    let model = FileSemantics::new(&db, FILE);
    let attribute: crate::parser::Attribute = first(&root);
    let resolved = model
        .resolve_attribute(&attribute)
        .map(|id| model.qualified_name(id).to_string());
    assert_eq!(resolved.as_deref(), expected);
}

#[test]
fn setter_value_binds_to_property_type() {
    let db = compile(&control(
        "public double Size { get { return 0; } set { SetValue(null, value); } }",
    ));
    let root = root(&db);
    let model = FileSemantics::new(&db, FILE);
    let call: Invocation = first(&root);
    let value = call.args()[1].expr().expect("value");
    let id = model.resolve_symbol(&value).expect("value parameter");
    assert_eq!(model.type_display(&model.symbol(id).ty), "double");
}

#[rstest]
#[case("1", "int")]
#[case("1L", "long")]
#[case("1.5", "double")]
#[case("1.5f", "float")]
#[case("\"s\"", "string")]
#[case("true", "bool")]
#[case("(object)1", "object")]
#[case("typeof(int)", "Type")]
#[case("nameof(Foo)", "string")]
#[case("double.NaN", "double")]
#[case("1 < 2", "bool")]
#[case("1 + 2.0", "double")]
#[case("\"a\" + 1", "string")]
#[case("new Thickness()", "Thickness")]
fn expression_types(#[case] expr: &str, #[case] expected: &str) {
    let db = compile(&control(&format!("private object Foo = {expr};")));
    let root = root(&db);
    let model = FileSemantics::new(&db, FILE);
    let field: FieldDecl = first(&root);
    let initializer = field
        .declarators()
        .next()
        .and_then(|d| d.initializer())
        .expect("initializer");
    assert_eq!(model.type_display(&model.type_of(&initializer)), expected);
}

#[test]
fn assignability_follows_base_chain_and_boxing() {
    let db = compile(&control(""));
    let foo = TypeRef::Named(db.type_named("Demo.FooControl").expect("FooControl"));
    let control_type = TypeRef::Named(
        db.type_named("System.Windows.Controls.Control")
            .expect("Control"),
    );
    let int = db.predefined_type("int");
    let double = db.predefined_type("double");
    let object = db.predefined_type("object");
    assert!(db.is_assignable(&foo, &control_type));
    assert!(!db.is_assignable(&control_type, &foo));
    assert!(db.is_assignable(&int, &object));
    assert!(!db.is_assignable(&int, &double));
    assert!(db.is_implicitly_convertible(&int, &double));
    assert!(db.is_assignable(&TypeRef::Unknown, &int));
    assert!(!db.types_equal(&TypeRef::Unknown, &TypeRef::Unknown));
}
