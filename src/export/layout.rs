const MM_PER_PT: f32 = 25.4 / 72.0;
/// Advance width of every Courier glyph, as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;

/// Page geometry of the flowing-text block: A4, 10 mm side and top margins,
/// 20 mm bottom break margin, 10 mm lines of 12 pt Courier.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub left_margin_mm: f32,
    pub right_margin_mm: f32,
    pub top_margin_mm: f32,
    pub bottom_margin_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            left_margin_mm: 10.0,
            right_margin_mm: 10.0,
            top_margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            line_height_mm: 10.0,
            font_size_pt: 12.0,
        }
    }
}

impl PageLayout {
    pub fn chars_per_line(&self) -> usize {
        let usable = self.page_width_mm - self.left_margin_mm - self.right_margin_mm;
        let glyph = COURIER_ADVANCE * self.font_size_pt * MM_PER_PT;
        ((usable / glyph).floor() as usize).max(1)
    }

    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.top_margin_mm - self.bottom_margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Baseline of row `row` (0-based), measured from the page bottom.
    /// Text sits vertically centred in its line cell.
    pub fn baseline_mm(&self, row: usize) -> f32 {
        let cell_top = self.page_height_mm - self.top_margin_mm - self.line_height_mm * row as f32;
        cell_top - self.line_height_mm / 2.0 - 0.3 * self.font_size_pt * MM_PER_PT
    }
}

/// Word-wrap `text` to lines of at most `width` characters. Hard newlines are
/// kept, blank lines survive, and words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_len = 0;

    for word in paragraph.split(' ') {
        let word_len = word.chars().count();
        let needed = if line_len == 0 { word_len } else { line_len + 1 + word_len };
        if needed <= width {
            if line_len > 0 {
                line.push(' ');
            }
            line.push_str(word);
            line_len = needed;
            continue;
        }

        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
        }

        let mut rest: Vec<char> = word.chars().collect();
        while rest.len() > width {
            lines.push(rest.drain(..width).collect());
        }
        line = rest.iter().collect();
        line_len = rest.len();
    }

    lines.push(line);
}

/// Split lines into pages; there is always at least one page.
pub fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page.max(1)).map(|chunk| chunk.to_vec()).collect()
}
