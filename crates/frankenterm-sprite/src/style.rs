#![forbid(unsafe_code)]

//! Line decoration styles that can be rasterized as sprites.

use serde::{Deserialize, Serialize};

/// A horizontal-line decoration drawn as a cell-sized sprite.
///
/// Underline, overline, and strikethrough share the same solid bar; they
/// only differ in the line position the caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Underline,
    DoubleUnderline,
    DottedUnderline,
    DashedUnderline,
    CurlyUnderline,
    Overline,
    Strikethrough,
}

impl LineStyle {
    /// Every style, in declaration order.
    pub const ALL: [LineStyle; 7] = [
        LineStyle::Underline,
        LineStyle::DoubleUnderline,
        LineStyle::DottedUnderline,
        LineStyle::DashedUnderline,
        LineStyle::CurlyUnderline,
        LineStyle::Overline,
        LineStyle::Strikethrough,
    ];

    /// Whether the style belongs to the underline family (positioned by the
    /// font's underline metrics).
    #[must_use]
    pub const fn is_underline(self) -> bool {
        matches!(
            self,
            Self::Underline
                | Self::DoubleUnderline
                | Self::DottedUnderline
                | Self::DashedUnderline
                | Self::CurlyUnderline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&LineStyle::CurlyUnderline).expect("serialize");
        assert_eq!(json, "\"curly_underline\"");
        let back: LineStyle = serde_json::from_str("\"double_underline\"").expect("deserialize");
        assert_eq!(back, LineStyle::DoubleUnderline);
    }

    #[test]
    fn unknown_style_name_is_rejected() {
        assert!(serde_json::from_str::<LineStyle>("\"wavy\"").is_err());
    }

    #[test]
    fn underline_family_excludes_overline_and_strike() {
        let underlines = LineStyle::ALL.iter().filter(|s| s.is_underline()).count();
        assert_eq!(underlines, 5);
        assert!(!LineStyle::Overline.is_underline());
        assert!(!LineStyle::Strikethrough.is_underline());
    }
}
