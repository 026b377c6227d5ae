use async_trait::async_trait;
use domain::format::PrintTextFormat;
use domain::printer::{Bitmap, PrinterService};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// One call received by the simulated printer, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum PrinterCall {
    ServiceVersion,
    PrinterVersion,
    PrinterStatus,
    PaperOut(i32),
    PaperBack(i32),
    PrintText {
        text: String,
        format: PrintTextFormat,
    },
    PrintText2 {
        text: String,
        format: PrintTextFormat,
        text_width: i32,
        align: i32,
    },
    PrintBarcode {
        data: String,
        width: i32,
        height: i32,
        text_position: i32,
        align: i32,
    },
    PrintQrCode {
        data: String,
        width: i32,
        height: i32,
        align: i32,
    },
    PrintBitmap {
        bitmap: Option<Bitmap>,
        bitmap_type: i32,
        align: i32,
    },
    PrintRasterData(Vec<u8>),
    PrintEscposData(Vec<u8>),
    PrintTableText {
        texts: Vec<String>,
        weights: Vec<i32>,
        formats: Vec<PrintTextFormat>,
    },
    PrintEndAutoOut,
    LabelLocate {
        label_height: i32,
        label_gap: i32,
    },
    LabelPrintEnd,
    LabelLocateAuto,
    LabelDetectAuto,
    HasLabelLearning,
    ClearLabelLearning,
    ConfigLcd(i32),
    ShowLcdBitmap(Option<Bitmap>),
    OpenCashBox,
    TriggerQscScan,
}

/// In-process printer service that records every call and answers with
/// scripted status codes.
#[derive(Clone)]
pub struct SimulatedPrinter {
    calls: Arc<Mutex<Vec<PrinterCall>>>,
    reply: Arc<AtomicI32>,
    status: Arc<AtomicI32>,
    label_learning: Arc<AtomicBool>,
    service_version: String,
    printer_version: String,
}

impl SimulatedPrinter {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(AtomicI32::new(0)),
            status: Arc::new(AtomicI32::new(0)),
            label_learning: Arc::new(AtomicBool::new(false)),
            service_version: "sim-1.0.0".to_string(),
            printer_version: "SIM-PRN-58".to_string(),
        }
    }

    /// Status code returned by every command that answers with one
    /// (everything except the status query).
    pub fn reply_with(&self, code: i32) {
        self.reply.store(code, Ordering::SeqCst);
    }

    /// Code returned by the status query.
    pub fn set_status(&self, code: i32) {
        self.status.store(code, Ordering::SeqCst);
    }

    pub fn set_label_learning(&self, learned: bool) {
        self.label_learning.store(learned, Ordering::SeqCst);
    }

    pub async fn recorded(&self) -> Vec<PrinterCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: PrinterCall) -> i32 {
        debug!(?call, "Simulated printer call");
        self.calls.lock().await.push(call);
        self.reply.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedPrinter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrinterService for SimulatedPrinter {
    async fn service_version(&self) -> String {
        self.record(PrinterCall::ServiceVersion).await;
        self.service_version.clone()
    }

    async fn printer_version(&self) -> (i32, Option<String>) {
        let code = self.record(PrinterCall::PrinterVersion).await;
        if code == 0 {
            (code, Some(self.printer_version.clone()))
        } else {
            (code, None)
        }
    }

    async fn printer_status(&self) -> i32 {
        self.calls.lock().await.push(PrinterCall::PrinterStatus);
        self.status.load(Ordering::SeqCst)
    }

    async fn paper_out(&self, px: i32) -> i32 {
        self.record(PrinterCall::PaperOut(px)).await
    }

    async fn paper_back(&self, px: i32) -> i32 {
        self.record(PrinterCall::PaperBack(px)).await
    }

    async fn print_text(&self, text: &str, format: &PrintTextFormat) -> i32 {
        self.record(PrinterCall::PrintText {
            text: text.to_string(),
            format: format.clone(),
        })
        .await
    }

    async fn print_text2(
        &self,
        text: &str,
        format: &PrintTextFormat,
        text_width: i32,
        align: i32,
    ) -> i32 {
        self.record(PrinterCall::PrintText2 {
            text: text.to_string(),
            format: format.clone(),
            text_width,
            align,
        })
        .await
    }

    async fn print_barcode(
        &self,
        data: &str,
        width: i32,
        height: i32,
        text_position: i32,
        align: i32,
    ) -> i32 {
        self.record(PrinterCall::PrintBarcode {
            data: data.to_string(),
            width,
            height,
            text_position,
            align,
        })
        .await
    }

    async fn print_qr_code(&self, data: &str, width: i32, height: i32, align: i32) -> i32 {
        self.record(PrinterCall::PrintQrCode {
            data: data.to_string(),
            width,
            height,
            align,
        })
        .await
    }

    async fn print_bitmap(&self, bitmap: Option<&Bitmap>, bitmap_type: i32, align: i32) -> i32 {
        self.record(PrinterCall::PrintBitmap {
            bitmap: bitmap.cloned(),
            bitmap_type,
            align,
        })
        .await
    }

    async fn print_raster_data(&self, data: &[u8]) -> i32 {
        self.record(PrinterCall::PrintRasterData(data.to_vec())).await
    }

    async fn print_escpos_data(&self, data: &[u8]) -> i32 {
        self.record(PrinterCall::PrintEscposData(data.to_vec())).await
    }

    async fn print_table_text(
        &self,
        texts: &[String],
        weights: &[i32],
        formats: &[PrintTextFormat],
    ) -> i32 {
        self.record(PrinterCall::PrintTableText {
            texts: texts.to_vec(),
            weights: weights.to_vec(),
            formats: formats.to_vec(),
        })
        .await
    }

    async fn print_end_auto_out(&self) -> i32 {
        self.record(PrinterCall::PrintEndAutoOut).await
    }

    async fn label_locate(&self, label_height: i32, label_gap: i32) -> i32 {
        self.record(PrinterCall::LabelLocate {
            label_height,
            label_gap,
        })
        .await
    }

    async fn label_print_end(&self) -> i32 {
        self.record(PrinterCall::LabelPrintEnd).await
    }

    async fn label_locate_auto(&self) -> i32 {
        self.record(PrinterCall::LabelLocateAuto).await
    }

    async fn label_detect_auto(&self) -> i32 {
        self.record(PrinterCall::LabelDetectAuto).await
    }

    async fn has_label_learning(&self) -> bool {
        self.calls.lock().await.push(PrinterCall::HasLabelLearning);
        self.label_learning.load(Ordering::SeqCst)
    }

    async fn clear_label_learning(&self) -> i32 {
        let code = self.record(PrinterCall::ClearLabelLearning).await;
        if code == 0 {
            self.label_learning.store(false, Ordering::SeqCst);
        }
        code
    }

    async fn config_lcd(&self, opt: i32) -> i32 {
        self.record(PrinterCall::ConfigLcd(opt)).await
    }

    async fn show_lcd_bitmap(&self, bitmap: Option<&Bitmap>) -> i32 {
        self.record(PrinterCall::ShowLcdBitmap(bitmap.cloned())).await
    }

    async fn open_cash_box(&self) -> i32 {
        self.record(PrinterCall::OpenCashBox).await
    }

    async fn trigger_qsc_scan(&self) -> i32 {
        self.record(PrinterCall::TriggerQscScan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let printer = SimulatedPrinter::new();
        assert_eq!(printer.paper_out(40).await, 0);
        assert_eq!(printer.open_cash_box().await, 0);

        assert_eq!(
            printer.recorded().await,
            vec![PrinterCall::PaperOut(40), PrinterCall::OpenCashBox]
        );
    }

    #[tokio::test]
    async fn test_scripted_reply_and_status() {
        let printer = SimulatedPrinter::new();
        printer.reply_with(-1203);
        printer.set_status(-1201);

        assert_eq!(printer.paper_back(10).await, -1203);
        assert_eq!(printer.printer_version().await, (-1203, None));
        assert_eq!(printer.printer_status().await, -1201);
    }

    #[test]
    fn test_label_learning_cleared_on_success() {
        let printer = SimulatedPrinter::new();
        printer.set_label_learning(true);
        tokio_test::block_on(async {
            assert!(printer.has_label_learning().await);
            assert_eq!(printer.clear_label_learning().await, 0);
            assert!(!printer.has_label_learning().await);
        });
    }
}
