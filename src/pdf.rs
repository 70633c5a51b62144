use std::io::BufWriter;

use printpdf::*;

use crate::error::{Result, RoastError};
use crate::fmt::{kg, money, percent};
use crate::pricing::PriceAnalysis;
use crate::settings::QuoteSettings;

// A5 landscape quote sheet (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 148.0;
const MARGIN_LEFT: f32 = 18.0;
const MARGIN_TOP: f32 = 18.0;
const ROW_H: f32 = 7.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;

const VAT_RATE: f64 = 0.10; // coffee VAT, quoted totals are tax-inclusive

/// Split a tax-inclusive total into its net and VAT parts.
fn vat_breakdown(total: f64) -> (f64, f64) {
    let subtotal = total / (1.0 + VAT_RATE);
    (subtotal, total - subtotal)
}

pub struct QuoteData {
    pub customer: String,
    pub product: String,
    pub weight: f64,
    pub offer_price: f64,
    pub analysis: PriceAnalysis,
}

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RoastError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RoastError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            page,
            layer,
            y: MARGIN_TOP,
        })
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold { &self.font_bold } else { &self.font };
        let layer = self.doc.get_page(self.page).get_layer(self.layer);
        layer.use_text(s, size, Mm(x), Mm(PAGE_H - self.y), font);
    }

    fn line(&mut self, label: &str, value: &str, bold: bool) {
        self.text(label, MARGIN_LEFT, FONT_SIZE, false);
        self.text(value, PAGE_W / 2.0, FONT_SIZE, bold);
        self.y += ROW_H;
    }

    fn gap(&mut self, h: f32) {
        self.y += h;
    }

    fn save(self, output: &str) -> Result<()> {
        let file = std::fs::File::create(output)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| RoastError::Pdf(format!("{e:?}")))?;
        Ok(())
    }
}

/// Render a one-page wholesale quote. The on-paper price: the candidate
/// offer if one was given, otherwise the convincing price suggestion.
pub fn export_quote(data: &QuoteData, quote: &QuoteSettings, output: &str) -> Result<()> {
    let mut w = PdfWriter::new("Wholesale Quote")?;

    w.text(&quote.business_name, MARGIN_LEFT, TITLE_SIZE, true);
    w.gap(ROW_H * 1.5);
    w.text("WHOLESALE QUOTE", MARGIN_LEFT, FONT_SIZE, true);
    w.gap(ROW_H * 1.5);

    let price = if data.offer_price > 0.0 {
        data.offer_price
    } else {
        data.analysis.convincing_price
    };

    w.line("Customer", &data.customer, true);
    w.line("Product", &data.product, false);
    if quote.show_total_weight {
        w.line("Total weight", &kg(data.weight), false);
    }
    w.line("Unit price (per kg)", &money(price / data.weight.max(0.001)), false);
    w.gap(ROW_H / 2.0);
    if quote.show_tax {
        let (subtotal, vat) = vat_breakdown(price);
        w.line("Subtotal", &money(subtotal), false);
        w.line(&format!("VAT ({})", percent(VAT_RATE * 100.0)), &money(vat), false);
    }
    w.line("Quoted total", &money(price), true);

    if quote.show_terms {
        w.gap(ROW_H);
        w.text(
            "Valid for 15 days. Payment on delivery unless agreed otherwise.",
            MARGIN_LEFT,
            FONT_SIZE - 2.0,
            false,
        );
        w.gap(ROW_H / 1.5);
    }
    if !quote.footer_note.is_empty() {
        w.gap(ROW_H / 2.0);
        w.text(&quote.footer_note, MARGIN_LEFT, FONT_SIZE - 2.0, false);
    }

    w.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShippingRate;
    use crate::pricing::{analyze, CostProfile};

    #[test]
    fn test_vat_breakdown_sums_to_total() {
        let (subtotal, vat) = vat_breakdown(1100.0);
        assert!((subtotal - 1000.0).abs() < 1e-9);
        assert!((vat - 100.0).abs() < 1e-9);
        assert!((subtotal + vat - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_quote_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("quote.pdf");
        let profile = CostProfile {
            weight: 10.0,
            unit_wholesale_cost: 450.0,
            packaging_cost: 15.0,
            commission_rate: 0.0,
            fixed_fee: 0.0,
            target_margin: 25.0,
        };
        let rates = vec![ShippingRate { min_weight: 1.0, max_weight: 30.0, price: 50.0 }];
        let data = QuoteData {
            customer: "Kavala Kafe".to_string(),
            product: "Ethiopia Sidamo".to_string(),
            weight: 10.0,
            offer_price: 0.0,
            analysis: analyze(&profile, &rates, 0.0, 2.0),
        };
        export_quote(&data, &crate::settings::QuoteSettings::default(), output.to_str().unwrap())
            .unwrap();
        assert!(output.exists());
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }
}
