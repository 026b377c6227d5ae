use std::sync::Arc;

use tracing::{debug, warn};

use domain::error::{BridgeError, Result};
use domain::format::{BarcodeTextPosition, BitmapType, LcdOpt, PrintAlign, PrintTextFormat, TextStyle};
use domain::printer::PrinterService;
use domain::scan::{ScanOptions, ScanRequest, ScannerLauncher};
use domain::status::StatusCode;

use crate::connection::ConnectionManager;
use crate::printer::payload::{decode_image, decode_raw};

/// Typed command surface over the bound printer service.
///
/// Every command takes a snapshot of the service handle and fails with
/// [`BridgeError::ServiceNotBound`] when there is none, without waiting for a
/// reconnect. Integer replies are normalised: `0` is success, anything else
/// is a [`BridgeError::VendorStatus`] carrying the catalog message.
#[derive(Clone)]
pub struct PrinterFacade {
    connection: ConnectionManager,
    launcher: Arc<dyn ScannerLauncher>,
}

impl PrinterFacade {
    pub fn new(connection: ConnectionManager, launcher: Arc<dyn ScannerLauncher>) -> Self {
        Self {
            connection,
            launcher,
        }
    }

    fn service(&self) -> Result<Arc<dyn PrinterService>> {
        self.connection.service().ok_or(BridgeError::ServiceNotBound)
    }

    fn check(code: i32) -> Result<()> {
        if StatusCode(code).is_success() {
            Ok(())
        } else {
            debug!(code, "Printer service reported failure");
            Err(BridgeError::vendor(code))
        }
    }

    pub async fn service_version(&self) -> Result<String> {
        let service = self.service()?;
        Ok(service.service_version().await)
    }

    pub async fn printer_version(&self) -> Result<String> {
        let service = self.service()?;
        let (code, version) = service.printer_version().await;
        Self::check(code)?;
        Ok(version.unwrap_or_default())
    }

    /// Current printer status. Hardware band codes (`-1300 < code < -1200`)
    /// such as "no paper" are reported as values, not failures.
    pub async fn printer_status(&self) -> Result<i32> {
        let service = self.service()?;
        let code = service.printer_status().await;
        let status = StatusCode(code);
        if status.is_success() || status.is_printer_status() {
            Ok(code)
        } else {
            Err(BridgeError::vendor(code))
        }
    }

    pub async fn paper_out(&self, px: i32) -> Result<()> {
        let service = self.service()?;
        Self::check(service.paper_out(px).await)
    }

    pub async fn paper_back(&self, px: i32) -> Result<()> {
        let service = self.service()?;
        Self::check(service.paper_back(px).await)
    }

    pub async fn print_text(&self, text: &str, style: Option<&TextStyle>) -> Result<()> {
        let service = self.service()?;
        let format = TextStyle::to_format(style);
        Self::check(service.print_text(text, &format).await)
    }

    pub async fn print_text2(
        &self,
        text: &str,
        style: Option<&TextStyle>,
        text_width: i32,
        align: PrintAlign,
    ) -> Result<()> {
        let service = self.service()?;
        let format = TextStyle::to_format(style);
        Self::check(
            service
                .print_text2(text, &format, text_width, align.ordinal())
                .await,
        )
    }

    pub async fn print_barcode(
        &self,
        data: &str,
        width: i32,
        height: i32,
        text_position: BarcodeTextPosition,
        align: PrintAlign,
    ) -> Result<()> {
        let service = self.service()?;
        Self::check(
            service
                .print_barcode(data, width, height, text_position.ordinal(), align.ordinal())
                .await,
        )
    }

    pub async fn print_qr_code(
        &self,
        data: &str,
        width: i32,
        height: i32,
        align: PrintAlign,
    ) -> Result<()> {
        let service = self.service()?;
        Self::check(
            service
                .print_qr_code(data, width, height, align.ordinal())
                .await,
        )
    }

    /// An undecodable image is forwarded as an absent bitmap.
    pub async fn print_bitmap(
        &self,
        data: &str,
        bitmap_type: BitmapType,
        align: PrintAlign,
    ) -> Result<()> {
        let service = self.service()?;
        let bitmap = decode_image(data);
        Self::check(
            service
                .print_bitmap(bitmap.as_ref(), bitmap_type.ordinal(), align.ordinal())
                .await,
        )
    }

    pub async fn print_raster_data(&self, data: &str) -> Result<()> {
        let service = self.service()?;
        let bytes = decode_raw(data)?;
        Self::check(service.print_raster_data(&bytes).await)
    }

    pub async fn print_escpos_data(&self, data: &str) -> Result<()> {
        let service = self.service()?;
        let bytes = decode_raw(data)?;
        Self::check(service.print_escpos_data(&bytes).await)
    }

    /// Print one table row; `texts[i]`, `weights[i]` and `styles[i]` form
    /// column `i`, so all three must have the same length.
    pub async fn print_table_text(
        &self,
        texts: &[String],
        weights: &[i32],
        styles: &[TextStyle],
    ) -> Result<()> {
        let service = self.service()?;
        if texts.len() != weights.len() || texts.len() != styles.len() {
            warn!(
                texts = texts.len(),
                weights = weights.len(),
                styles = styles.len(),
                "Rejecting table row with mismatched columns"
            );
            return Err(BridgeError::InvalidArgument(format!(
                "table columns differ in length (texts {}, weights {}, styles {})",
                texts.len(),
                weights.len(),
                styles.len()
            )));
        }

        let formats: Vec<PrintTextFormat> = styles
            .iter()
            .map(|style| style.apply(PrintTextFormat::default()))
            .collect();
        Self::check(service.print_table_text(texts, weights, &formats).await)
    }

    pub async fn print_end_auto_out(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.print_end_auto_out().await)
    }

    pub async fn label_locate(&self, label_height: i32, label_gap: i32) -> Result<()> {
        let service = self.service()?;
        Self::check(service.label_locate(label_height, label_gap).await)
    }

    pub async fn label_print_end(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.label_print_end().await)
    }

    pub async fn label_locate_auto(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.label_locate_auto().await)
    }

    pub async fn label_detect_auto(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.label_detect_auto().await)
    }

    pub async fn has_label_learning(&self) -> Result<bool> {
        let service = self.service()?;
        Ok(service.has_label_learning().await)
    }

    pub async fn clear_label_learning(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.clear_label_learning().await)
    }

    pub async fn config_lcd(&self, opt: LcdOpt) -> Result<()> {
        let service = self.service()?;
        Self::check(service.config_lcd(opt.ordinal()).await)
    }

    pub async fn show_lcd_bitmap(&self, data: &str) -> Result<()> {
        let service = self.service()?;
        let bitmap = decode_image(data);
        Self::check(service.show_lcd_bitmap(bitmap.as_ref()).await)
    }

    pub async fn open_cash_box(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.open_cash_box().await)
    }

    pub async fn qsc_scan(&self) -> Result<()> {
        let service = self.service()?;
        Self::check(service.trigger_qsc_scan().await)
    }

    /// Launch the scanner activity. Does not need the printer service; the
    /// result is delivered later as an `onScanResult` event.
    pub fn scan(&self, options: &ScanOptions) -> Result<()> {
        let request = ScanRequest::new(options);
        self.launcher.launch(&request).map_err(|e| {
            warn!(error = %e, "Scanner activity unavailable");
            BridgeError::FeatureNotSupported
        })
    }
}
