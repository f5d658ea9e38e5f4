use std::fmt;

/// Family of UI constructs a context-window pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCategory {
    Display,
    Input,
    Overlay,
    Navigation,
    StateBuilder,
    Accessibility,
    Animation,
    Adaptive,
    Custom,
}

impl fmt::Display for UiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UiCategory::Display => "display",
            UiCategory::Input => "input",
            UiCategory::Overlay => "overlay",
            UiCategory::Navigation => "navigation",
            UiCategory::StateBuilder => "state-builder",
            UiCategory::Accessibility => "accessibility",
            UiCategory::Animation => "animation",
            UiCategory::Adaptive => "adaptive",
            UiCategory::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Shape of content recognized as technical rather than linguistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechnicalKind {
    NoLetters,
    Url,
    Email,
    HexColor,
    FilePath,
    Uuid,
    Keyword,
    SingleChar,
    ShortToken,
    Identifier,
    MimeType,
    HttpVerb,
    DateFormat,
    RoutePath,
}

impl fmt::Display for TechnicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TechnicalKind::NoLetters => "no letters",
            TechnicalKind::Url => "url",
            TechnicalKind::Email => "email",
            TechnicalKind::HexColor => "hex color",
            TechnicalKind::FilePath => "file path",
            TechnicalKind::Uuid => "uuid",
            TechnicalKind::Keyword => "keyword literal",
            TechnicalKind::SingleChar => "single character",
            TechnicalKind::ShortToken => "short token",
            TechnicalKind::Identifier => "identifier",
            TechnicalKind::MimeType => "mime type",
            TechnicalKind::HttpVerb => "http verb",
            TechnicalKind::DateFormat => "date format",
            TechnicalKind::RoutePath => "route path",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// Passed as a named argument from the user-facing parameter list.
    UserFacingParam(String),
    /// First positional argument of a user-facing callee.
    UserFacingCallee(String),
    UiEvidence(UiCategory),
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeepReason::UserFacingParam(label) => write!(f, "user-facing parameter `{}`", label),
            KeepReason::UserFacingCallee(callee) => write!(f, "user-facing widget `{}`", callee),
            KeepReason::UiEvidence(category) => write!(f, "{} context", category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Suppressed,
    IgnoredText,
    NonUiCall(String),
    NonUiPath,
    Technical(TechnicalKind),
    AlreadyLocalized,
    KnownResource,
    NoUiEvidence,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Suppressed => f.write_str("suppressed by directive"),
            SkipReason::IgnoredText => f.write_str("listed in ignoreTexts"),
            SkipReason::NonUiCall(callee) => write!(f, "argument of non-UI call `{}`", callee),
            SkipReason::NonUiPath => f.write_str("non-UI layer"),
            SkipReason::Technical(kind) => write!(f, "technical content ({})", kind),
            SkipReason::AlreadyLocalized => f.write_str("already localized"),
            SkipReason::KnownResource => f.write_str("matches an existing resource"),
            SkipReason::NoUiEvidence => f.write_str("no UI evidence"),
        }
    }
}

/// Outcome of classifying one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep(KeepReason),
    Skip(SkipReason),
}

impl Verdict {
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep(_))
    }
}
