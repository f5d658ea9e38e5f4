//! Immutable regex tables used by the classifier.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::{TechnicalKind, UiCategory};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Content shapes that are never user-facing text, checked in order.
pub static TECHNICAL: LazyLock<Vec<(TechnicalKind, Regex)>> = LazyLock::new(|| {
    vec![
        (
            TechnicalKind::Url,
            re(r"(?i)^((https?|ftp|wss?|file)://|mailto:|tel:|www\.)\S*$"),
        ),
        (
            TechnicalKind::Email,
            re(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$"),
        ),
        (
            TechnicalKind::HexColor,
            re(r"^(#|0x|0X)([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$"),
        ),
        (
            TechnicalKind::Uuid,
            re(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"),
        ),
        (
            TechnicalKind::FilePath,
            re(r"(?i)^[\w\-./\\]*\.(png|jpe?g|gif|svg|webp|bmp|ico|json|arb|dart|ya?ml|xml|html?|css|js|txt|csv|pdf|ttf|otf|woff2?|mp3|mp4|wav|ogg|lottie|riv|db|sqlite)$"),
        ),
        (
            TechnicalKind::FilePath,
            re(r"^(assets|images|fonts|packages|icons)/\S+$"),
        ),
        (
            TechnicalKind::FilePath,
            re(r"^(\.{1,2}/|/)?[\w\-.]+(/[\w\-.]+){2,}/?$"),
        ),
        (
            TechnicalKind::RoutePath,
            re(r"^/[\w\-/:.{}]*$"),
        ),
        (
            TechnicalKind::MimeType,
            re(r"^(application|text|image|audio|video|multipart|font)/[\w.+-]+$"),
        ),
        (
            TechnicalKind::Keyword,
            re(r"^(true|false|null|undefined)$"),
        ),
        (
            TechnicalKind::HttpVerb,
            re(r"^(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)$"),
        ),
        (
            TechnicalKind::ShortToken,
            re(r"^[a-z]{1,2}$"),
        ),
        (
            TechnicalKind::ShortToken,
            re(r"^([A-Za-z]+\d[A-Za-z\d]*|\d+[A-Za-z][A-Za-z\d]*)$"),
        ),
        // camelCase, snake_case, SCREAMING_CASE, kebab-case, dotted.path, PascalCase
        (
            TechnicalKind::Identifier,
            re(r"^[a-z][a-z0-9]*([A-Z][a-z0-9]*)+$"),
        ),
        (
            TechnicalKind::Identifier,
            re(r"^_?[a-z0-9]+(_[a-z0-9]+)+$"),
        ),
        (
            TechnicalKind::Identifier,
            re(r"^[A-Z0-9]+(_[A-Z0-9]+)+$"),
        ),
        (
            TechnicalKind::Identifier,
            re(r"^[a-z0-9]+(-[a-z0-9]+)+$"),
        ),
        (
            TechnicalKind::Identifier,
            re(r"^[A-Za-z_]\w*(\.[A-Za-z_]\w*)+$"),
        ),
        (
            TechnicalKind::Identifier,
            re(r"^[A-Z][a-z0-9]+([A-Z][a-z0-9]+)+$"),
        ),
    ]
});

/// Characters of an ICU/intl date pattern.
pub static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| re(r"^[yMdHhmsaEkKSzZLQ:\-/., ']+$"));

pub static DATE_FORMAT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| re(r"yy|MM|dd|HH|hh|mm|ss"));

/// The ordered UI-evidence table: (category, pattern, priority).
/// Higher priority wins when several lines match.
pub static UI_EVIDENCE: LazyLock<Vec<(UiCategory, Regex, u8)>> = LazyLock::new(|| {
    vec![
        (
            UiCategory::Overlay,
            re(r"\b(showDialog|showModalBottomSheet|showCupertinoDialog|showCupertinoModalPopup|showGeneralDialog|showMenu|showSnackBar|showAboutDialog|showDatePicker|showTimePicker|showSearch|showBottomSheet)\s*(<[^>]*>)?\s*\("),
            4,
        ),
        (
            UiCategory::Overlay,
            re(r"\b(AlertDialog|SimpleDialog|SimpleDialogOption|CupertinoAlertDialog|CupertinoActionSheet|SnackBar|SnackBarAction|BottomSheet|PopupMenuItem|PopupMenuButton|Dialog)\s*\("),
            4,
        ),
        (
            UiCategory::Display,
            re(r"\b(Text|SelectableText|RichText|TextSpan|Tooltip|Chip|ActionChip|FilterChip|ChoiceChip|InputChip|Badge|ListTile|MaterialBanner|AppBar|SliverAppBar|Tab|Step|ExpansionTile|CheckboxListTile|SwitchListTile|RadioListTile|DataColumn|Card)\s*(\.\w+\s*)?\("),
            3,
        ),
        (
            UiCategory::Input,
            re(r"\b(TextField|TextFormField|InputDecoration|DropdownButton|DropdownButtonFormField|DropdownMenuItem|DropdownMenuEntry|Checkbox|Radio|Switch|Slider|Autocomplete|SearchBar|SearchAnchor|CupertinoTextField|Form|FormField)\s*(<[^>]*>)?\s*\("),
            3,
        ),
        (
            UiCategory::Input,
            re(r"\b(ElevatedButton|TextButton|OutlinedButton|FilledButton|IconButton|FloatingActionButton|CupertinoButton|MaterialButton|SegmentedButton|ButtonSegment)\s*(\.\w+\s*)?\("),
            3,
        ),
        (
            UiCategory::Accessibility,
            re(r"\b(Semantics|MergeSemantics|ExcludeSemantics|BlockSemantics)\s*\(|\bsemantics?Label\s*:"),
            3,
        ),
        (
            UiCategory::Navigation,
            re(r"\b(BottomNavigationBarItem|NavigationDestination|NavigationRailDestination|NavigationDrawerDestination|Drawer|NavigationBar|NavigationRail|TabBar|BottomNavigationBar|CupertinoTabBar)\s*\("),
            2,
        ),
        (
            UiCategory::Adaptive,
            re(r"\b(Cupertino[A-Z]\w*|Platform[A-Z]\w*|\w+\.adaptive)\s*\("),
            2,
        ),
        (
            UiCategory::StateBuilder,
            re(r"\b(BlocBuilder|BlocConsumer|BlocListener|BlocSelector|Consumer|Selector|StreamBuilder|FutureBuilder|ValueListenableBuilder|AnimatedBuilder|Builder|LayoutBuilder|StatefulBuilder|Obx|GetBuilder|ListenableBuilder)\s*(<[^>]*>)?\s*\(|\bbuilder\s*:\s*\("),
            1,
        ),
        (
            UiCategory::Animation,
            re(r"\b(AnimatedSwitcher|AnimatedOpacity|AnimatedContainer|AnimatedCrossFade|AnimatedDefaultTextStyle|Hero|FadeTransition|SlideTransition|ScaleTransition|AnimatedTextKit|TypewriterAnimatedText)\s*\("),
            1,
        ),
    ]
});

/// Priority of user-supplied `customUiPatterns`.
pub const CUSTOM_PRIORITY: u8 = 5;

/// A line that already goes through a localization accessor.
pub static LOCALIZED_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\bAppLocalizations\.of\(|\bS\.of\(|\bS\.current\b|\bcontext\.l10n\b|\bl10n\.\w|\.tr\(|\btr\(|\.plural\(|\bplural\(|\bIntl\.(message|plural|select|gender)\(|\blookupAppLocalizations\(|\.i18n\b")
});

/// Callees whose string arguments are diagnostics, not UI.
pub static NON_UI_CALLEE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^(print|debugPrint|debugPrintStack|log|assert|logError|logWarning|logInfo|logDebug|logEvent|captureMessage|captureException|recordError)$")
});

/// Error or exception type constructors.
pub static ERROR_TYPE: LazyLock<Regex> =
    LazyLock::new(|| re(r"^[A-Z]\w*(Exception|Error|Failure)$|^(Error|Exception|Failure)$"));

/// Receivers that are loggers or telemetry sinks.
pub static LOGGER_RECEIVER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(^_?log$|logger$|^_?talker$|crashlytics|sentry|analytics|^_?console$|^developer$)")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn technical(text: &str) -> Option<TechnicalKind> {
        TECHNICAL
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(kind, _)| *kind)
    }

    #[test]
    fn test_technical_shapes() {
        assert_eq!(technical("https://example.com/a?b=1"), Some(TechnicalKind::Url));
        assert_eq!(technical("support@example.com"), Some(TechnicalKind::Email));
        assert_eq!(technical("#FF00AA"), Some(TechnicalKind::HexColor));
        assert_eq!(technical("0xFF112233"), Some(TechnicalKind::HexColor));
        assert_eq!(technical("assets/images/logo.png"), Some(TechnicalKind::FilePath));
        assert_eq!(technical("config.json"), Some(TechnicalKind::FilePath));
        assert_eq!(
            technical("123e4567-e89b-12d3-a456-426614174000"),
            Some(TechnicalKind::Uuid)
        );
        assert_eq!(technical("/settings/profile"), Some(TechnicalKind::RoutePath));
        assert_eq!(technical("application/json"), Some(TechnicalKind::MimeType));
        assert_eq!(technical("null"), Some(TechnicalKind::Keyword));
        assert_eq!(technical("POST"), Some(TechnicalKind::HttpVerb));
        assert_eq!(technical("en"), Some(TechnicalKind::ShortToken));
        assert_eq!(technical("v2"), Some(TechnicalKind::ShortToken));
        assert_eq!(technical("userName"), Some(TechnicalKind::Identifier));
        assert_eq!(technical("user_name"), Some(TechnicalKind::Identifier));
        assert_eq!(technical("API_KEY"), Some(TechnicalKind::Identifier));
        assert_eq!(technical("primary-button"), Some(TechnicalKind::Identifier));
        assert_eq!(technical("home.title"), Some(TechnicalKind::Identifier));
        assert_eq!(technical("HomePage"), Some(TechnicalKind::Identifier));
    }

    #[test]
    fn test_text_is_not_technical() {
        for text in ["Hello World", "OK", "Save", "Sign in", "Don't have an account?", "Settings"] {
            assert_eq!(technical(text), None, "{text}");
        }
    }

    #[test]
    fn test_date_format() {
        for text in ["yyyy-MM-dd", "HH:mm", "dd/MM/yyyy", "EEE, MMM d, yyyy"] {
            assert!(DATE_FORMAT.is_match(text), "{text}");
        }
        assert!(!DATE_FORMAT.is_match("Hello"));
    }

    #[test]
    fn test_ui_evidence_matches() {
        let category = |line: &str| {
            UI_EVIDENCE
                .iter()
                .filter(|(_, pattern, _)| pattern.is_match(line))
                .max_by_key(|(_, _, priority)| *priority)
                .map(|(category, _, _)| *category)
        };
        assert_eq!(category("child: Text("), Some(UiCategory::Display));
        assert_eq!(category("showDialog(context: context,"), Some(UiCategory::Overlay));
        assert_eq!(category("ElevatedButton(onPressed: save,"), Some(UiCategory::Input));
        assert_eq!(category("BlocBuilder<A, B>("), Some(UiCategory::StateBuilder));
        assert_eq!(category("final x = compute();"), None);
    }

    #[test]
    fn test_localized_accessor() {
        assert!(LOCALIZED_ACCESSOR.is_match("Text(AppLocalizations.of(context)!.save)"));
        assert!(LOCALIZED_ACCESSOR.is_match("title: 'home.title'.tr(),"));
        assert!(LOCALIZED_ACCESSOR.is_match("Text(S.of(context).hello)"));
        assert!(LOCALIZED_ACCESSOR.is_match("Text(context.l10n.hello)"));
        assert!(!LOCALIZED_ACCESSOR.is_match("Text('Hello')"));
    }

    #[test]
    fn test_logger_conventions() {
        assert!(LOGGER_RECEIVER.is_match("logger"));
        assert!(LOGGER_RECEIVER.is_match("_logger"));
        assert!(LOGGER_RECEIVER.is_match("FirebaseCrashlytics"));
        assert!(!LOGGER_RECEIVER.is_match("dialog"));
        assert!(ERROR_TYPE.is_match("StateError"));
        assert!(ERROR_TYPE.is_match("AuthFailure"));
        assert!(!ERROR_TYPE.is_match("showError"));
        assert!(NON_UI_CALLEE.is_match("debugPrint"));
    }
}
