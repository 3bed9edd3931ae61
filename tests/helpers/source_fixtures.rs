//! Common source code fixtures for tests.

/// Wrap members in `public class FooControl : Control`.
pub fn control(members: &str) -> String {
    format!(
        r#"using System.Windows;
using System.Windows.Controls;

namespace Demo
{{
    public class FooControl : Control
    {{
{members}
    }}
}}
"#
    )
}

/// Wrap members in `public static class Foo`, the usual home of attached properties.
pub fn attached(members: &str) -> String {
    format!(
        r#"using System.Windows;
using System.Windows.Controls;

namespace Demo
{{
    public static class Foo
    {{
{members}
    }}
}}
"#
    )
}

pub const BAR_PROPERTY: &str = r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            set { this.SetValue(BarProperty, value); }
        }
"#;

pub const READ_ONLY_BAR: &str = r#"
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;

        public int Bar
        {
            get { return (int)this.GetValue(BarProperty); }
            private set { this.SetValue(BarPropertyKey, value); }
        }
"#;

pub const ATTACHED_BAR: &str = r#"
        public static readonly DependencyProperty BarProperty = DependencyProperty.RegisterAttached(
            "Bar", typeof(int), typeof(Foo), new PropertyMetadata(default(int)));

        /// <summary>Helper for setting <see cref="BarProperty"/> on <paramref name="element"/>.</summary>
        public static void SetBar(DependencyObject element, int value)
        {
            element.SetValue(BarProperty, value);
        }

        /// <summary>Helper for getting <see cref="BarProperty"/> from <paramref name="element"/>.</summary>
        [AttachedPropertyBrowsableForType(typeof(DependencyObject))]
        public static int GetBar(DependencyObject element)
        {
            return (int)element.GetValue(BarProperty);
        }
"#;
