//! Decoding of base64 payloads received from the scripting layer.
//!
//! Two policies apply:
//! - images degrade silently: anything undecodable becomes `None` and the
//!   print call proceeds without a bitmap
//! - raw command streams (raster, ESC/POS) decode strictly and fail the call

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::warn;

use domain::error::{BridgeError, Result};
use domain::printer::Bitmap;

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn decode_base64(data: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    // Line-wrapped payloads are common; whitespace carries no data.
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT.decode(compact)
}

/// Strip a data-URI header. Any input mentioning `base64` is treated as a
/// data URI whose payload follows the first comma.
fn strip_data_uri(data: &str) -> &str {
    if data.contains("base64") {
        match data.find(',') {
            Some(idx) => &data[idx + 1..],
            None => data,
        }
    } else {
        data
    }
}

/// Decode a bare or data-URI base64 image into an RGBA bitmap.
pub fn decode_image(data: &str) -> Option<Bitmap> {
    let bytes = match decode_base64(strip_data_uri(data)) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Image payload is not valid base64, printing without bitmap");
            return None;
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            Some(Bitmap {
                width,
                height,
                pixels: rgba.into_raw(),
            })
        }
        Err(e) => {
            warn!(error = %e, "Image payload could not be decoded, printing without bitmap");
            None
        }
    }
}

/// Decode a raw command stream; malformed input fails the call.
pub fn decode_raw(data: &str) -> Result<Vec<u8>> {
    decode_base64(data).map_err(|e| BridgeError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_base64() -> String {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([255, 255, 255, 255]));

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_data_uri_and_bare_payload_decode_identically() {
        let bare = png_base64();
        let uri = format!("data:image/png;base64,{}", bare);

        let from_bare = decode_image(&bare).expect("bare payload decodes");
        let from_uri = decode_image(&uri).expect("data uri decodes");

        assert_eq!(from_bare, from_uri);
        assert_eq!((from_bare.width, from_bare.height), (3, 2));
        assert_eq!(&from_bare.pixels[0..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_garbage_image_degrades_to_none() {
        assert!(decode_image("definitely not base64 !!!").is_none());
        assert!(decode_image("").is_none());
    }

    #[test]
    fn test_valid_base64_but_not_an_image_degrades_to_none() {
        let payload = STANDARD.encode(b"hello printer");
        assert!(decode_image(&payload).is_none());
    }

    #[test]
    fn test_wrapped_payload_is_accepted() {
        let bare = png_base64();
        let (head, tail) = bare.split_at(bare.len() / 2);
        let wrapped = format!("{}\n{}\n", head, tail);
        assert!(decode_image(&wrapped).is_some());
    }

    #[test]
    fn test_raw_decode_is_strict() {
        assert_eq!(decode_raw("G0A=").unwrap(), vec![0x1B, 0x40]);
        assert_eq!(decode_raw("G0A").unwrap(), vec![0x1B, 0x40]);

        let err = decode_raw("@@not-base64@@").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
        assert_eq!(err.code(), -1005);
    }
}
