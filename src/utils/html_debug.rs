// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Saves the page with the given byte ranges wrapped in highlight spans.
/// A range that overlaps one already emitted is dropped.
pub fn save_debug_html(html: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<usize, AppError> {
    let mut file = File::create(filename)?;

    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    debug_html.push_str(".highlight-name { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-number { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-votes { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-party { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n<pre>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, h.1));

    let mut last_pos = 0;
    let mut emitted = 0;
    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        push_escaped(&mut debug_html, &html[last_pos..start]);

        let css_class = match highlight_type {
            "name" => "highlight-name",
            "number" => "highlight-number",
            "votes" => "highlight-votes",
            "party" => "highlight-party",
            _ => "highlight-custom",
        };
        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        push_escaped(&mut debug_html, &html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
        emitted += 1;
    }
    push_escaped(&mut debug_html, &html[last_pos..]);
    debug_html.push_str("\n</pre>\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {} ({} highlights)", filename.display(), emitted);
    Ok(emitted)
}

/// Creates an annotated copy of the page with every match of the given
/// patterns highlighted. Returns the number of highlights written.
pub fn create_debug_html(html: &str, filename: &Path, patterns: &[(&str, &str)]) -> Result<usize, AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, filename, &highlights)
}

// Source markup is shown as text so the highlights stay visible.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}
