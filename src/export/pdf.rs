use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

type Rgb = (f32, f32, f32);

/// Grid theme: teal header with white text, light grey bands, grey borders.
const HEADER_FILL: Rgb = (22.0 / 255.0, 160.0 / 255.0, 133.0 / 255.0);
const HEADER_TEXT: Rgb = (1.0, 1.0, 1.0);
const BAND_FILL: Rgb = (238.0 / 255.0, 238.0 / 255.0, 238.0 / 255.0);
const BODY_TEXT: Rgb = (0.0, 0.0, 0.0);
const BORDER: Rgb = (0.78, 0.78, 0.78);

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            // A4 portrait, in points
            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 20.0,

            next_id,
            font_id,

            font_size: 10.0,
            header_font_size: 10.0,
            title_font_size: 18.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Create a new page and its content object.
    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, color: Rgb, text: &str) {
        content.save_state();
        content.set_fill_rgb(color.0, color.1, color.2);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&win_ansi(text)));
        content.end_text();
        content.restore_state();
    }

    fn fill_row(&self, content: &mut Content, y: f32, width: f32, color: Rgb) {
        content.save_state();
        content.set_fill_rgb(color.0, color.1, color.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(BORDER.0, BORDER.1, BORDER.2);
        content.set_line_width(0.5);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
        color: Rgb,
    ) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(col_widths) {
            // text never spills into the next column
            content.save_state();
            content.rect(x, y, *w, self.row_h);
            content.clip_nonzero();
            content.end_path();
            self.draw_text(content, x + 4.0, y + 6.0, font_size, color, text);
            content.restore_state();

            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header + content, scaled to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * 6.5 + 8.0)
            .collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(cell.chars().count() as f32 * 5.6 + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > 0.0 {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_title_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin - 10.0,
            self.title_font_size,
            BODY_TEXT,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin - 20.0,
            self.font_size,
            BODY_TEXT,
            &pg,
        );
    }

    /// Multi-page table with title; the header row repeats on each page.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_title_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 50.0;

            self.fill_row(&mut content, y, table_w, HEADER_FILL);
            self.draw_row(
                &mut content,
                y,
                &col_widths,
                &header_row,
                self.header_font_size,
                HEADER_TEXT,
            );
            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }

                if i % 2 == 1 {
                    self.fill_row(&mut content, y, table_w, BAND_FILL);
                }

                self.draw_row(&mut content, y, &col_widths, row, self.font_size, BODY_TEXT);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Close the document and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }
}

/// Encode `text` for the WinAnsi (CP1252) font encoding; anything outside it
/// becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u8,
        _ => match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("Person {i}"), i.to_string(), "d".into(), "t".into()])
            .collect()
    }

    #[test]
    fn small_table_fits_one_page() {
        let mut pdf = PdfManager::new();
        pdf.write_table("Attendee Records", &["Name", "ID", "Date", "Time"], &rows(3));
        assert_eq!(pdf.page_count(), 1);

        let bytes = pdf.finish();
        assert!(bytes.starts_with(b"%PDF"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Attendee Records)"));
        assert!(text.contains("(Person 2)"));
    }

    #[test]
    fn long_table_is_paginated() {
        let mut pdf = PdfManager::new();
        pdf.write_table("T", &["Name", "ID", "Date", "Time"], &rows(120));
        assert!(pdf.page_count() >= 3);

        let text = String::from_utf8_lossy(&pdf.finish()).into_owned();
        assert!(text.contains("(Person 119)"));
        assert!(text.contains("(Page 3)"));
    }

    #[test]
    fn latin_names_use_win_ansi_bytes() {
        assert_eq!(win_ansi("Peña"), b"Pe\xF1a");
        assert_eq!(win_ansi("Zoë \u{20AC}5"), b"Zo\xEB \x805");
        assert_eq!(win_ansi("李 \u{1F600}"), b"? ?");

        let mut pdf = PdfManager::new();
        pdf.write_table("T", &["Name"], &[vec!["Peña".to_string()]]);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(!bytes.windows(2).any(|w| w == [0xC3, 0xB1]));
    }

    #[test]
    fn every_cell_is_clipped_to_its_box() {
        let mut pdf = PdfManager::new();
        pdf.write_table("T", &["Name", "ID"], &[vec!["x".repeat(300), "1".into()]]);
        let text = String::from_utf8_lossy(&pdf.finish()).into_owned();
        // two header cells + two body cells
        assert_eq!(text.matches("\nW\nn\n").count(), 4);
    }
}
