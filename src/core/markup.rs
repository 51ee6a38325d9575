//! Inline formatting for lesson text. Card text is drawn literally unless a
//! document opts in to markup, and even then only a small allowlist of
//! inline tags styles the text; anything else stays visible as typed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub underline: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), strong: false, emphasis: false, underline: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Style {
    Strong,
    Emphasis,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tag {
    Open(Style),
    Close(Style),
    Break,
}

pub fn spans(input: &str, allow_markup: bool) -> Vec<Span> {
    if allow_markup {
        parse(input)
    } else {
        literal(input)
    }
}

pub fn literal(input: &str) -> Vec<Span> {
    vec![Span::plain(input)]
}

/// Splits `input` into styled spans. Only `<b>`, `<strong>`, `<i>`, `<em>`,
/// `<u>` and `<br>` are recognized (case-insensitive, no attributes); an
/// unclosed tag styles to the end of the input, a stray closing tag is
/// ignored, and any other tag-looking sequence is emitted as literal text.
pub fn parse(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let (mut strong, mut emphasis, mut underline) = (0u32, 0u32, 0u32);

    let mut rest = input;
    while let Some(pos) = rest.find('<') {
        let (before, tail) = rest.split_at(pos);
        buffer.push_str(before);

        match match_tag(tail) {
            Some((tag, consumed)) => {
                match tag {
                    Tag::Break => buffer.push('\n'),
                    Tag::Open(style) => {
                        flush(&mut spans, &mut buffer, strong, emphasis, underline);
                        match style {
                            Style::Strong => strong += 1,
                            Style::Emphasis => emphasis += 1,
                            Style::Underline => underline += 1,
                        }
                    }
                    Tag::Close(style) => {
                        flush(&mut spans, &mut buffer, strong, emphasis, underline);
                        match style {
                            Style::Strong => strong = strong.saturating_sub(1),
                            Style::Emphasis => emphasis = emphasis.saturating_sub(1),
                            Style::Underline => underline = underline.saturating_sub(1),
                        }
                    }
                }
                rest = &tail[consumed..];
            }
            None => {
                buffer.push('<');
                rest = &tail[1..];
            }
        }
    }

    buffer.push_str(rest);
    flush(&mut spans, &mut buffer, strong, emphasis, underline);
    spans
}

fn flush(spans: &mut Vec<Span>, buffer: &mut String, strong: u32, emphasis: u32, underline: u32) {
    if buffer.is_empty() {
        return;
    }

    spans.push(Span {
        text: std::mem::take(buffer),
        strong: strong > 0,
        emphasis: emphasis > 0,
        underline: underline > 0,
    });
}

/// Tries to read one allowlisted tag at the start of `rest` (which begins
/// with '<'). Returns the tag and the byte length consumed.
fn match_tag(rest: &str) -> Option<(Tag, usize)> {
    let bytes = rest.as_bytes();
    let mut pos = 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_alphabetic()) {
        pos += 1;
    }
    if pos == name_start {
        return None;
    }
    let name = rest[name_start..pos].to_ascii_lowercase();

    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'/') {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'>') {
        return None;
    }
    pos += 1;

    let style = match name.as_str() {
        "b" | "strong" => Style::Strong,
        "i" | "em" => Style::Emphasis,
        "u" => Style::Underline,
        "br" => return Some((Tag::Break, pos)),
        _ => return None,
    };

    let tag = if closing { Tag::Close(style) } else { Tag::Open(style) };
    Some((tag, pos))
}
