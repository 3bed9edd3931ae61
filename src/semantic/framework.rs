//! Reference declarations for the framework surface.
//!
//! The declarations are parsed like any other C# file and marked as
//! metadata: symbols have no declaration syntax and are never analyzed.

/// Declarations of the runtime and WPF types the analyzer binds against.
pub const FRAMEWORK_SOURCE: &str = r#"
using System.Windows.Data;
using System.Windows.Media;

namespace System
{
    public class Object
    {
        public Object();
        public virtual bool Equals(object obj);
        public virtual int GetHashCode();
        public Type GetType();
        public virtual string ToString();
        public static bool ReferenceEquals(object objA, object objB);
    }

    public abstract class ValueType { }
    public abstract class Enum : ValueType { }
    public abstract class Array { public int Length { get; } }
    public abstract class Delegate { }
    public abstract class MulticastDelegate : Delegate { }
    public abstract class Attribute { }

    public class Exception
    {
        public Exception();
        public Exception(string message);
        public string Message { get; }
    }

    public class ArgumentException : Exception
    {
        public ArgumentException();
        public ArgumentException(string message);
        public ArgumentException(string message, string paramName);
    }

    public class ArgumentNullException : ArgumentException
    {
        public ArgumentNullException(string paramName);
    }

    public class ArgumentOutOfRangeException : ArgumentException
    {
        public ArgumentOutOfRangeException(string paramName);
    }

    public class InvalidOperationException : Exception
    {
        public InvalidOperationException(string message);
    }

    public abstract class Type
    {
        public string Name { get; }
        public string FullName { get; }
        public virtual bool IsAssignableFrom(Type c);
        public bool IsInstanceOfType(object o);
    }

    public sealed class String
    {
        public static readonly string Empty;
        public int Length { get; }
        public static bool IsNullOrEmpty(string value);
        public static string Format(string format, object arg0);
        public static string Concat(object arg0, object arg1);
        public bool Equals(string value);
    }

    public struct Void { }
    public struct Boolean { }
    public struct Char { }
    public struct SByte { }
    public struct Byte { }
    public struct Int16 { }
    public struct UInt16 { }

    public struct Int32
    {
        public const int MaxValue;
        public const int MinValue;
    }

    public struct UInt32 { }
    public struct Int64 { }
    public struct UInt64 { }
    public struct Single { }

    public struct Double
    {
        public const double NaN;
        public const double PositiveInfinity;
        public const double NegativeInfinity;
        public static bool IsNaN(double d);
        public static bool IsInfinity(double d);
    }

    public struct Decimal { }

    public class EventArgs
    {
        public static readonly EventArgs Empty;
    }

    public delegate void EventHandler(object sender, EventArgs e);

    public static class Math
    {
        public static double Max(double val1, double val2);
        public static double Min(double val1, double val2);
        public static int Max(int val1, int val2);
        public static int Min(int val1, int val2);
        public static double Abs(double value);
    }
}

namespace System.Windows.Data
{
    public enum UpdateSourceTrigger
    {
        Default,
        PropertyChanged,
        LostFocus,
        Explicit,
    }
}

namespace System.Windows.Media
{
    public abstract class Brush { }

    public static class Brushes
    {
        public static Brush Transparent { get; }
        public static Brush Black { get; }
    }

    public class FontFamily { }
}

namespace System.Windows
{
    public delegate void PropertyChangedCallback(DependencyObject d, DependencyPropertyChangedEventArgs e);
    public delegate object CoerceValueCallback(DependencyObject d, object baseValue);
    public delegate bool ValidateValueCallback(object value);

    public struct DependencyPropertyChangedEventArgs
    {
        public DependencyProperty Property { get; }
        public object OldValue { get; }
        public object NewValue { get; }
    }

    public class DependencyObject
    {
        public object GetValue(DependencyProperty dp);
        public void SetValue(DependencyProperty dp, object value);
        public void SetValue(DependencyPropertyKey key, object value);
        public void SetCurrentValue(DependencyProperty dp, object value);
        public void ClearValue(DependencyProperty dp);
        public void ClearValue(DependencyPropertyKey key);
        public void CoerceValue(DependencyProperty dp);
        public void InvalidateProperty(DependencyProperty dp);
        public object ReadLocalValue(DependencyProperty dp);
    }

    public sealed class DependencyProperty
    {
        public static readonly object UnsetValue;

        public string Name { get; }
        public Type PropertyType { get; }
        public Type OwnerType { get; }
        public PropertyMetadata DefaultMetadata { get; }
        public bool ReadOnly { get; }
        public ValidateValueCallback ValidateValueCallback { get; }

        public static DependencyProperty Register(string name, Type propertyType, Type ownerType);
        public static DependencyProperty Register(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata);
        public static DependencyProperty Register(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata, ValidateValueCallback validateValueCallback);

        public static DependencyPropertyKey RegisterReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata);
        public static DependencyPropertyKey RegisterReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata, ValidateValueCallback validateValueCallback);

        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType);
        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata);
        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata, ValidateValueCallback validateValueCallback);

        public static DependencyPropertyKey RegisterAttachedReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata);
        public static DependencyPropertyKey RegisterAttachedReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata, ValidateValueCallback validateValueCallback);

        public DependencyProperty AddOwner(Type ownerType);
        public DependencyProperty AddOwner(Type ownerType, PropertyMetadata typeMetadata);

        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata);
        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata, DependencyPropertyKey key);

        public PropertyMetadata GetMetadata(Type forType);
        public bool IsValidType(object value);
        public bool IsValidValue(object value);
    }

    public sealed class DependencyPropertyKey
    {
        public DependencyProperty DependencyProperty { get; }
        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata);
    }

    public class PropertyMetadata
    {
        public PropertyMetadata();
        public PropertyMetadata(object defaultValue);
        public PropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public PropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public PropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);

        public object DefaultValue { get; set; }
        public PropertyChangedCallback PropertyChangedCallback { get; set; }
        public CoerceValueCallback CoerceValueCallback { get; set; }
    }

    public class UIPropertyMetadata : PropertyMetadata
    {
        public UIPropertyMetadata();
        public UIPropertyMetadata(object defaultValue);
        public UIPropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public UIPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public UIPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public UIPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback, bool isAnimationProhibited);

        public bool IsAnimationProhibited { get; set; }
    }

    public enum FrameworkPropertyMetadataOptions
    {
        None = 0,
        AffectsMeasure = 1,
        AffectsArrange = 2,
        AffectsParentMeasure = 4,
        AffectsParentArrange = 8,
        AffectsRender = 16,
        Inherits = 32,
        OverridesInheritanceBehavior = 64,
        NotDataBindable = 128,
        BindsTwoWayByDefault = 256,
        Journal = 1024,
        SubPropertiesDoNotAffectRender = 2048,
    }

    public class FrameworkPropertyMetadata : UIPropertyMetadata
    {
        public FrameworkPropertyMetadata();
        public FrameworkPropertyMetadata(object defaultValue);
        public FrameworkPropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags);
        public FrameworkPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback, bool isAnimationProhibited);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback, bool isAnimationProhibited, UpdateSourceTrigger defaultUpdateSourceTrigger);

        public bool AffectsMeasure { get; set; }
        public bool AffectsArrange { get; set; }
        public bool AffectsRender { get; set; }
        public bool Inherits { get; set; }
        public bool BindsTwoWayByDefault { get; set; }
    }

    public class AttachedPropertyBrowsableForTypeAttribute : Attribute
    {
        public AttachedPropertyBrowsableForTypeAttribute(Type targetType);
        public Type TargetType { get; }
    }

    public sealed class AttachedPropertyBrowsableForChildrenAttribute : Attribute
    {
        public AttachedPropertyBrowsableForChildrenAttribute();
        public bool IncludeDescendants { get; set; }
    }

    public struct Size
    {
        public Size(double width, double height);
        public double Width { get; set; }
        public double Height { get; set; }
    }

    public struct Thickness
    {
        public Thickness(double uniformLength);
        public Thickness(double left, double top, double right, double bottom);
        public double Left { get; set; }
        public double Top { get; set; }
        public double Right { get; set; }
        public double Bottom { get; set; }
    }

    public class UIElement : DependencyObject
    {
        public static readonly DependencyProperty IsEnabledProperty;
        public static readonly DependencyProperty VisibilityProperty;
        public bool IsEnabled { get; set; }
        public void InvalidateMeasure();
        public void InvalidateArrange();
        public void InvalidateVisual();
    }

    public class FrameworkElement : UIElement
    {
        public static readonly DependencyProperty DataContextProperty;
        public static readonly DependencyProperty WidthProperty;
        public static readonly DependencyProperty HeightProperty;
        public static readonly DependencyProperty MarginProperty;
        public object DataContext { get; set; }
        public double Width { get; set; }
        public double Height { get; set; }
        public Thickness Margin { get; set; }
    }

    public class ContentElement : DependencyObject { }

    public class FrameworkContentElement : ContentElement
    {
        public static readonly DependencyProperty DataContextProperty;
        public object DataContext { get; set; }
    }
}

namespace System.Windows.Documents
{
    public abstract class TextElement : FrameworkContentElement
    {
        public static readonly DependencyProperty FontSizeProperty;
        public static readonly DependencyProperty FontFamilyProperty;
        public static readonly DependencyProperty ForegroundProperty;
        public double FontSize { get; set; }
        public FontFamily FontFamily { get; set; }
        public Brush Foreground { get; set; }
        public static double GetFontSize(DependencyObject element);
        public static void SetFontSize(DependencyObject element, double value);
    }
}

namespace System.Windows.Controls
{
    public class Control : FrameworkElement
    {
        public static readonly DependencyProperty BackgroundProperty;
        public static readonly DependencyProperty ForegroundProperty;
        public static readonly DependencyProperty BorderThicknessProperty;
        public static readonly DependencyProperty PaddingProperty;
        public static readonly DependencyProperty FontSizeProperty;
        public Brush Background { get; set; }
        public Brush Foreground { get; set; }
        public Thickness BorderThickness { get; set; }
        public Thickness Padding { get; set; }
        public double FontSize { get; set; }
    }

    public class ContentControl : Control
    {
        public static readonly DependencyProperty ContentProperty;
        public object Content { get; set; }
    }

    public class UserControl : ContentControl { }

    public class Decorator : FrameworkElement { }

    public class Border : Decorator
    {
        public static readonly DependencyProperty BackgroundProperty;
        public static readonly DependencyProperty BorderThicknessProperty;
        public Brush Background { get; set; }
        public Thickness BorderThickness { get; set; }
    }

    public abstract class Panel : FrameworkElement
    {
        public static readonly DependencyProperty BackgroundProperty;
        public Brush Background { get; set; }
    }

    public class Grid : Panel
    {
        public static readonly DependencyProperty RowProperty;
        public static readonly DependencyProperty ColumnProperty;
        public static int GetRow(UIElement element);
        public static void SetRow(UIElement element, int value);
        public static int GetColumn(UIElement element);
        public static void SetColumn(UIElement element, int value);
    }

    public class TextBox : Control
    {
        public static readonly DependencyProperty TextProperty;
        public string Text { get; set; }
    }

    public class TextBlock : FrameworkElement
    {
        public static readonly DependencyProperty TextProperty;
        public static readonly DependencyProperty FontSizeProperty;
        public string Text { get; set; }
        public double FontSize { get; set; }
    }
}
"#;
