use async_trait::async_trait;

use crate::format::PrintTextFormat;

/// Decoded bitmap handed to the printer service (RGBA8, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Remote interface of the vendor printer service.
///
/// Mirrors the service's native argument order and types. Methods returning
/// `i32` answer with a vendor status code (`0` is success). Calls may block
/// on the physical printer, so callers must treat every method as slow.
#[async_trait]
pub trait PrinterService: Send + Sync {
    async fn service_version(&self) -> String;

    /// Status code plus the version written to the out parameter.
    async fn printer_version(&self) -> (i32, Option<String>);

    async fn printer_status(&self) -> i32;

    async fn paper_out(&self, px: i32) -> i32;

    async fn paper_back(&self, px: i32) -> i32;

    async fn print_text(&self, text: &str, format: &PrintTextFormat) -> i32;

    async fn print_text2(
        &self,
        text: &str,
        format: &PrintTextFormat,
        text_width: i32,
        align: i32,
    ) -> i32;

    async fn print_barcode(
        &self,
        data: &str,
        width: i32,
        height: i32,
        text_position: i32,
        align: i32,
    ) -> i32;

    async fn print_qr_code(&self, data: &str, width: i32, height: i32, align: i32) -> i32;

    /// `bitmap` is `None` when the caller's payload could not be decoded.
    async fn print_bitmap(&self, bitmap: Option<&Bitmap>, bitmap_type: i32, align: i32) -> i32;

    async fn print_raster_data(&self, data: &[u8]) -> i32;

    async fn print_escpos_data(&self, data: &[u8]) -> i32;

    async fn print_table_text(
        &self,
        texts: &[String],
        weights: &[i32],
        formats: &[PrintTextFormat],
    ) -> i32;

    async fn print_end_auto_out(&self) -> i32;

    async fn label_locate(&self, label_height: i32, label_gap: i32) -> i32;

    async fn label_print_end(&self) -> i32;

    async fn label_locate_auto(&self) -> i32;

    async fn label_detect_auto(&self) -> i32;

    async fn has_label_learning(&self) -> bool;

    async fn clear_label_learning(&self) -> i32;

    async fn config_lcd(&self, opt: i32) -> i32;

    async fn show_lcd_bitmap(&self, bitmap: Option<&Bitmap>) -> i32;

    async fn open_cash_box(&self) -> i32;

    async fn trigger_qsc_scan(&self) -> i32;
}
