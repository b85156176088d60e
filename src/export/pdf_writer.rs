use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::layout::PageLayout;
use crate::error::ExportError;

/// Write pre-wrapped pages of text into a PDF using the built-in Courier font.
/// Glyphs the font cannot encode are handled however printpdf handles them.
pub fn render(title: &str, pages: &[Vec<String>], layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        targets.push(doc.add_page(width, height, "Layer 1"));
    }

    for ((page, layer), lines) in targets.into_iter().zip(pages) {
        let canvas = doc.get_page(page).get_layer(layer);
        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            canvas.use_text(
                line.as_str(),
                layout.font_size_pt,
                Mm(layout.left_margin_mm),
                Mm(layout.baseline_mm(row)),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}
