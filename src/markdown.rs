//! Recipe Markdown Rendering
//!
//! Thin pulldown-cmark wrapper for the recipe view modal. Recipes are
//! typed as free text where a line break means "next step", so single
//! newlines become hard breaks before parsing.

use pulldown_cmark::{html::push_html, Options, Parser};

/// Render recipe text to HTML
pub fn parse_markdown(text: &str) -> String {
    let prepared = keep_line_breaks(text);
    let parser = Parser::new_ext(&prepared, get_options());
    let mut html_output = String::new();
    push_html(&mut html_output, parser);
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn keep_line_breaks(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = String::with_capacity(text.len() + lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if i + 1 < lines.len() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str("  \n");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_newlines_become_breaks() {
        let html = parse_markdown("Couper les oignons\nFaire revenir 5 minutes");
        assert!(html.contains("<br"));
        assert!(html.contains("Faire revenir 5 minutes"));
    }

    #[test]
    fn lists_and_emphasis_still_render() {
        let html = parse_markdown("- Farine\n- **Sel**");
        assert!(html.contains("<li>"));
        assert!(html.contains("<strong>Sel</strong>"));
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let html = parse_markdown("Étape 1\n\nÉtape 2");
        assert!(html.matches("<p>").count() >= 2);
    }
}
