use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Native font selector meaning "load the font file at `path`".
pub const CUSTOM_FONT: i32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {kind} value: {value}")]
pub struct InvalidOrdinal {
    pub kind: &'static str,
    pub value: i32,
}

/// Declares an ordinal enum exchanged as a plain integer with the scripting
/// layer and the printer service.
macro_rules! ordinal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            #[default]
            $($variant = $value),+
        }

        impl $name {
            pub fn ordinal(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = InvalidOrdinal;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $(v if v == $value => Ok(Self::$variant),)+
                    _ => Err(InvalidOrdinal { kind: stringify!($name), value }),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value as i32
            }
        }
    };
}

ordinal_enum!(
    /// Horizontal alignment
    PrintAlign { Left = 0, Center = 1, Right = 2 }
);

ordinal_enum!(
    /// Where the human readable text goes relative to a barcode
    BarcodeTextPosition { NoText = 0, TextAbove = 1, TextBelow = 2, Both = 3 }
);

ordinal_enum!(
    /// Bitmap rendering mode: black and white, or grayscale for rich images
    BitmapType { BlackWhite = 0, Grayscale = 1 }
);

ordinal_enum!(
    /// Customer display (LCD) control operation
    LcdOpt { Init = 0, Wakeup = 1, Sleep = 2, Clear = 3, Reset = 4 }
);

/// Text format record understood by the printer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintTextFormat {
    pub text_size: i32,
    pub underline: bool,
    pub text_scale_x: f32,
    pub text_scale_y: f32,
    pub letter_spacing: f32,
    pub line_spacing: f32,
    pub top_padding: i32,
    pub left_padding: i32,
    pub ali: i32,
    pub style: i32,
    pub font: i32,
    pub path: Option<String>,
}

impl Default for PrintTextFormat {
    fn default() -> Self {
        Self {
            text_size: 24,
            underline: false,
            text_scale_x: 1.0,
            text_scale_y: 1.0,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            top_padding: 0,
            left_padding: 0,
            ali: 0,
            style: 0,
            font: 0,
            path: None,
        }
    }
}

/// Caller supplied partial text style.
///
/// Every field is optional; an absent field leaves the native default of
/// [`PrintTextFormat`] untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_padding: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_padding: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<PrintAlign>,
    /// Path of a font file on the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl TextStyle {
    /// Override the fields present in this style on top of `base`.
    pub fn apply(&self, mut base: PrintTextFormat) -> PrintTextFormat {
        if let Some(size) = self.text_size {
            base.text_size = size;
        }
        if let Some(underline) = self.underline {
            base.underline = underline;
        }
        if let Some(x) = self.text_scale_x {
            base.text_scale_x = x as f32;
        }
        if let Some(y) = self.text_scale_y {
            base.text_scale_y = y as f32;
        }
        if let Some(spacing) = self.letter_spacing {
            base.letter_spacing = spacing as f32;
        }
        if let Some(spacing) = self.line_spacing {
            base.line_spacing = spacing as f32;
        }
        if let Some(padding) = self.top_padding {
            base.top_padding = padding;
        }
        if let Some(padding) = self.left_padding {
            base.left_padding = padding;
        }
        if let Some(align) = self.align {
            base.ali = align.ordinal();
        }
        if let Some(font) = &self.font {
            base.font = CUSTOM_FONT;
            base.path = Some(font.clone());
        }
        base
    }

    /// Native format for an optional caller style.
    pub fn to_format(style: Option<&TextStyle>) -> PrintTextFormat {
        match style {
            Some(style) => style.apply(PrintTextFormat::default()),
            None => PrintTextFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_style_yields_defaults() {
        assert_eq!(TextStyle::to_format(None), PrintTextFormat::default());
        assert_eq!(
            TextStyle::to_format(Some(&TextStyle::default())),
            PrintTextFormat::default()
        );
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let style: TextStyle = serde_json::from_value(json!({
            "textSize": 32,
            "underline": true,
            "align": 1
        }))
        .unwrap();

        let format = TextStyle::to_format(Some(&style));
        assert_eq!(format.text_size, 32);
        assert!(format.underline);
        assert_eq!(format.ali, 1);
        assert_eq!(format.text_scale_x, 1.0);
        assert_eq!(format.top_padding, 0);
        assert_eq!(format.font, 0);
        assert!(format.path.is_none());
    }

    #[test]
    fn test_font_path_selects_custom_font() {
        let style = TextStyle {
            font: Some("/sdcard/fonts/mono.ttf".into()),
            ..Default::default()
        };
        let format = style.apply(PrintTextFormat::default());
        assert_eq!(format.font, CUSTOM_FONT);
        assert_eq!(format.path.as_deref(), Some("/sdcard/fonts/mono.ttf"));
    }

    #[test]
    fn test_float_fields_narrow() {
        let style: TextStyle = serde_json::from_value(json!({
            "textScaleX": 2.0,
            "textScaleY": 0.5,
            "letterSpacing": 1.5,
            "lineSpacing": 3.0
        }))
        .unwrap();
        let format = TextStyle::to_format(Some(&style));
        assert_eq!(format.text_scale_x, 2.0);
        assert_eq!(format.text_scale_y, 0.5);
        assert_eq!(format.letter_spacing, 1.5);
        assert_eq!(format.line_spacing, 3.0);
    }

    #[test]
    fn test_ordinals_round_trip_through_integers() {
        assert_eq!(PrintAlign::try_from(2), Ok(PrintAlign::Right));
        assert_eq!(LcdOpt::Reset.ordinal(), 4);
        assert_eq!(BitmapType::Grayscale.ordinal(), 1);
        assert!(BarcodeTextPosition::try_from(9).is_err());
    }

    #[test]
    fn test_unknown_align_is_rejected_by_serde() {
        let res: Result<TextStyle, _> = serde_json::from_value(json!({ "align": 7 }));
        assert!(res.is_err());
    }
}
