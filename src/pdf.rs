//! Text-to-PDF rendering via `printpdf`.
//!
//! Single-column A4 layout: bold title, small subtitle, 12 pt body with
//! word wrap and automatic page breaks. The built-in Helvetica fonts
//! only carry Latin-1, so every line is sanitized before layout.

use std::io::BufWriter;

use printpdf::*;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF write error: {0}")]
    Write(String),
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 15.0;

const TITLE_SIZE: f32 = 14.0;
const SUBTITLE_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING_MM: f32 = 7.0;

/// Word-wrap budget for 12 pt Helvetica inside the margins.
const WRAP_COLUMNS: usize = 90;

/// Render a title, subtitle and free-text body into PDF bytes.
pub fn render_document(title: &str, subtitle: &str, body: &str) -> Result<Vec<u8>, PdfError> {
    let (doc, page1, layer1) = PdfDocument::new(
        sanitize_latin1(title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Font(e.to_string()))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = Mm(TOP_MM);

    layer.use_text(sanitize_latin1(title), TITLE_SIZE, Mm(MARGIN_LEFT_MM), y, &bold);
    y -= Mm(10.0);
    layer.use_text(sanitize_latin1(subtitle), SUBTITLE_SIZE, Mm(MARGIN_LEFT_MM), y, &font);
    y -= Mm(8.0);

    for raw_line in body.lines() {
        let line = sanitize_latin1(raw_line);
        if line.trim().is_empty() {
            // Blank lines keep their vertical space.
            y -= Mm(BODY_LEADING_MM);
            continue;
        }
        for wrapped in wrap_text(&line, WRAP_COLUMNS) {
            if y < Mm(BOTTOM_MM) {
                let (page, new_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(new_layer);
                y = Mm(TOP_MM);
            }
            layer.use_text(&wrapped, BODY_SIZE, Mm(MARGIN_LEFT_MM), y, &font);
            y -= Mm(BODY_LEADING_MM);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| PdfError::Write(e.to_string()))
}

/// Replace anything the built-in fonts cannot encode.
///
/// Printable Latin-1 passes through, tabs become spaces, control
/// characters are dropped, everything else becomes a visible `?`.
pub fn sanitize_latin1(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            let code = c as u32;
            match code {
                0x09 => Some(' '),
                0x00..=0x1F | 0x7F..=0x9F => None,
                0x20..=0xFF => Some(c),
                _ => Some('?'),
            }
        })
        .collect()
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_pdf() {
        let bytes = render_document("Titre", "Généré le 2026-08-08", "Une ligne.").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_body_paginates() {
        let body = (0..400)
            .map(|i| format!("Ligne numéro {i} avec un peu de contenu pour occuper la page."))
            .collect::<Vec<_>>()
            .join("\n");
        let long = render_document("Titre", "Sous-titre", &body).unwrap();
        let short = render_document("Titre", "Sous-titre", "Une ligne.").unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn non_latin1_input_still_renders() {
        let bytes = render_document("Résumé 日本語", "→ flèche", "Emoji 🙂 et texte accentué: éàü").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn sanitize_keeps_accented_french() {
        assert_eq!(sanitize_latin1("éàüç œ"), "éàüç ?"); // œ is outside Latin-1
    }

    #[test]
    fn sanitize_replaces_wide_chars_visibly() {
        assert_eq!(sanitize_latin1("日本"), "??");
        assert_eq!(sanitize_latin1("a\u{2014}b"), "a?b"); // em dash
    }

    #[test]
    fn sanitize_drops_control_chars() {
        assert_eq!(sanitize_latin1("a\u{0007}b\tc"), "ab c");
    }

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_text("un deux trois quatre cinq", 9);
        assert_eq!(lines, vec!["un deux", "trois", "quatre", "cinq"]);
    }

    #[test]
    fn wrap_empty_yields_single_blank() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }
}
