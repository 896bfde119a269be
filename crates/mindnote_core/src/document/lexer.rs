use super::Section;
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

/// Splits document text into sections.
///
/// A heading is any line starting with one or more `#` followed by a space.
/// Closing hashes (`# Title #`) are dropped from the title. Text before the
/// first heading becomes the preamble section, which is omitted when it holds
/// only blank lines.
pub fn lex_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<String> = Vec::new();

    for raw in text.lines() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(heading) = heading_title(line) {
            flush_section(&mut sections, title.take(), std::mem::take(&mut body));
            title = Some(heading);
        } else {
            body.push(line.to_string());
        }
    }
    flush_section(&mut sections, title, body);

    sections
}

/// Reads and lexes one document from disk.
///
/// The file is read fully and closed before lexing starts. Bytes that are not
/// valid UTF-8 become U+FFFD, so a stray byte only spoils the line holding it.
pub fn read_document(path: impl AsRef<Path>) -> io::Result<Vec<Section>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(
            "event=document_read module=document status=degraded path={} reason=invalid_utf8",
            path.display()
        );
    }
    let sections = lex_sections(&text);
    debug!(
        "event=document_read module=document status=ok path={} sections={}",
        path.display(),
        sections.len()
    );
    Ok(sections)
}

fn flush_section(sections: &mut Vec<Section>, title: Option<String>, body: Vec<String>) {
    match title {
        Some(title) => sections.push(Section::titled(title, body)),
        None => {
            if body.iter().any(|line| !line.trim().is_empty()) {
                sections.push(Section::preamble(body));
            }
        }
    }
}

fn heading_title(line: &str) -> Option<String> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    let title = rest.trim().trim_end_matches('#').trim_end();
    Some(title.to_string())
}
