//! Terminal output for outlines.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::types::Attr;

use super::outline::{Line, OutlineOptions};

/// Map [`Attr`] flags onto crossterm attributes.
fn attributes(attrs: Attr) -> impl Iterator<Item = Attribute> {
    [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
    ]
    .into_iter()
    .filter(move |(flag, _)| attrs.contains(*flag))
    .map(|(_, attribute)| attribute)
}

/// Write `lines` one per row, indented by depth.
///
/// Labels print in cyan and text carries the line's attributes when
/// `options.color` is set; otherwise output is plain text.
pub fn write_outline<W: Write>(
    out: &mut W,
    lines: &[Line],
    options: &OutlineOptions,
) -> io::Result<()> {
    for line in lines {
        let indent = " ".repeat(line.depth.saturating_sub(1) * options.indent);
        queue!(out, Print(indent))?;

        if !line.label.is_empty() {
            if options.color {
                queue!(out, SetForegroundColor(Color::Cyan), Print(&line.label), ResetColor)?;
            } else {
                queue!(out, Print(&line.label))?;
            }
            queue!(out, Print(": "))?;
        }

        if options.color && !line.attrs.is_empty() {
            for attribute in attributes(line.attrs) {
                queue!(out, SetAttribute(attribute))?;
            }
            queue!(out, Print(&line.text), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, Print(&line.text))?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
