//! Rule identifiers.

use std::fmt;
use std::str::FromStr;

use super::diagnostic::Severity;

/// Every rule the analyzer knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    Wpf0001,
    Wpf0002,
    Wpf0003,
    Wpf0004,
    Wpf0005,
    Wpf0006,
    Wpf0007,
    Wpf0012,
    Wpf0013,
    Wpf0019,
    Wpf0020,
    Wpf0031,
    Wpf0032,
    Wpf0033,
    Wpf0034,
    Wpf0040,
    Wpf0042,
    Wpf0043,
    Wpf0061,
}

impl RuleId {
    pub const ALL: [RuleId; 19] = [
        RuleId::Wpf0001,
        RuleId::Wpf0002,
        RuleId::Wpf0003,
        RuleId::Wpf0004,
        RuleId::Wpf0005,
        RuleId::Wpf0006,
        RuleId::Wpf0007,
        RuleId::Wpf0012,
        RuleId::Wpf0013,
        RuleId::Wpf0019,
        RuleId::Wpf0020,
        RuleId::Wpf0031,
        RuleId::Wpf0032,
        RuleId::Wpf0033,
        RuleId::Wpf0034,
        RuleId::Wpf0040,
        RuleId::Wpf0042,
        RuleId::Wpf0043,
        RuleId::Wpf0061,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RuleId::Wpf0001 => "WPF0001",
            RuleId::Wpf0002 => "WPF0002",
            RuleId::Wpf0003 => "WPF0003",
            RuleId::Wpf0004 => "WPF0004",
            RuleId::Wpf0005 => "WPF0005",
            RuleId::Wpf0006 => "WPF0006",
            RuleId::Wpf0007 => "WPF0007",
            RuleId::Wpf0012 => "WPF0012",
            RuleId::Wpf0013 => "WPF0013",
            RuleId::Wpf0019 => "WPF0019",
            RuleId::Wpf0020 => "WPF0020",
            RuleId::Wpf0031 => "WPF0031",
            RuleId::Wpf0032 => "WPF0032",
            RuleId::Wpf0033 => "WPF0033",
            RuleId::Wpf0034 => "WPF0034",
            RuleId::Wpf0040 => "WPF0040",
            RuleId::Wpf0042 => "WPF0042",
            RuleId::Wpf0043 => "WPF0043",
            RuleId::Wpf0061 => "WPF0061",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RuleId::Wpf0001 => "Backing field for a DependencyProperty should match registered name",
            RuleId::Wpf0002 => "Backing field for a DependencyPropertyKey should match registered name",
            RuleId::Wpf0003 => "CLR property for a DependencyProperty should match registered name",
            RuleId::Wpf0004 => "CLR method for a DependencyProperty must match registered name",
            RuleId::Wpf0005 => "Name of PropertyChangedCallback should match registered name",
            RuleId::Wpf0006 => "Name of CoerceValueCallback should match registered name",
            RuleId::Wpf0007 => "Name of ValidateValueCallback should match registered name",
            RuleId::Wpf0012 => "CLR property type should match registered type",
            RuleId::Wpf0013 => "CLR accessor for attached property must match registered type",
            RuleId::Wpf0019 => "Cast sender to the containing type",
            RuleId::Wpf0020 => "Cast value to the registered type",
            RuleId::Wpf0031 => "DependencyPropertyKey member must be declared before DependencyProperty member",
            RuleId::Wpf0032 => "Use the same dependency property in get and set",
            RuleId::Wpf0033 => "Add [AttachedPropertyBrowsableForType]",
            RuleId::Wpf0034 => "Use correct argument for [AttachedPropertyBrowsableForType]",
            RuleId::Wpf0040 => "A readonly DependencyProperty must be set with DependencyPropertyKey",
            RuleId::Wpf0042 => "Avoid side effects in CLR accessors",
            RuleId::Wpf0043 => "Don't set DataContext using SetCurrentValue",
            RuleId::Wpf0061 => "Attached property accessor should have a documentation comment",
        }
    }

    pub fn default_severity(self) -> Severity {
        match self {
            RuleId::Wpf0020 | RuleId::Wpf0032 | RuleId::Wpf0040 => Severity::Error,
            RuleId::Wpf0033 | RuleId::Wpf0034 | RuleId::Wpf0061 => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The text is not a known rule code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule id `{0}`")]
pub struct UnknownRule(pub String);

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}
