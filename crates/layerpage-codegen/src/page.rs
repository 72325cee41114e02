//! Standalone page envelope.

use crate::html::escape_text;
use crate::CompilerOutput;

/// Wrap compiled output in a complete HTML document.
pub fn render_page(output: &CompilerOutput, title: &str) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("  <meta charset=\"UTF-8\">\n");
    page.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    page.push_str(&format!("  <title>{}</title>\n", escape_text(title)));
    page.push_str(&format!("  <style>\n{}  </style>\n", output.css));
    page.push_str("</head>\n<body>\n");
    page.push_str(&output.html);
    page.push_str("</body>\n</html>\n");
    page
}
