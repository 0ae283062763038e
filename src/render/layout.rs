//! Greedy line breaking and justification.

use super::fonts::Font;

/// A laid-out line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Words on the line, in order
    pub words: Vec<String>,

    /// Natural width with single spaces, in points
    pub width: f32,

    /// Whether this is the last line of its paragraph
    pub last: bool,
}

impl Line {
    /// Line text with single spaces between words.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Number of inter-word spaces.
    pub fn spaces(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Extra word spacing (the `Tw` operand) that stretches the line to
    /// `max_width`. Last lines and single-word lines are left ragged.
    pub fn word_spacing(&self, max_width: f32) -> f32 {
        if self.last || self.spaces() == 0 || self.width >= max_width {
            return 0.0;
        }
        (max_width - self.width) / self.spaces() as f32
    }
}

/// Wrap a paragraph into lines no wider than `max_width`.
///
/// Whitespace runs collapse to single spaces. A word wider than the line is
/// split across lines. An empty paragraph yields no lines.
pub fn wrap_paragraph(text: &str, font: Font, size: f32, max_width: f32) -> Vec<Line> {
    let space_width = font.text_width(" ", size);
    let mut lines = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut width = 0.0;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, font, size, max_width) {
            let piece_width = font.text_width(&piece, size);

            if !words.is_empty() && width + space_width + piece_width > max_width {
                lines.push(Line {
                    words: std::mem::take(&mut words),
                    width,
                    last: false,
                });
                width = 0.0;
            }

            if words.is_empty() {
                width = piece_width;
            } else {
                width += space_width + piece_width;
            }
            words.push(piece);
        }
    }

    if !words.is_empty() {
        lines.push(Line {
            words,
            width,
            last: true,
        });
    }

    lines
}

/// Break a word that does not fit on a line into pieces that do.
fn split_long_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    if font.text_width(word, size) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && font.text_width(&candidate, size) > max_width {
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
