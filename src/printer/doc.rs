//! Wadler-style layout documents.
//!
//! A [`Doc`] is built once per AST node and rendered once. Groups are laid
//! out flat when their contents, plus whatever follows on the same line,
//! fit in the remaining width; otherwise their lines break.

pub const INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Nothing when flat, a newline when broken.
    Soft,
    /// A space when flat, a newline when broken.
    Space,
    /// Always a newline; breaks every enclosing group.
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    Nil,
    Text(String),
    Concat(Vec<Doc>),
    Group { contents: Box<Doc>, broken: bool },
    Indent(Box<Doc>),
    Line(Line),
    IfBreak { broken: Box<Doc>, flat: Box<Doc> },
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn concat(parts: Vec<Doc>) -> Doc {
        Doc::Concat(parts)
    }

    pub fn group(contents: Doc) -> Doc {
        let broken = contents.has_hard_line();
        Doc::Group {
            contents: Box::new(contents),
            broken,
        }
    }

    pub fn indent(contents: Doc) -> Doc {
        Doc::Indent(Box::new(contents))
    }

    pub fn softline() -> Doc {
        Doc::Line(Line::Soft)
    }

    pub fn line() -> Doc {
        Doc::Line(Line::Space)
    }

    pub fn hardline() -> Doc {
        Doc::Line(Line::Hard)
    }

    /// Two hard lines, leaving one blank line between sections.
    pub fn blankline() -> Doc {
        Doc::concat(vec![Doc::hardline(), Doc::hardline()])
    }

    pub fn if_break(broken: Doc, flat: Doc) -> Doc {
        Doc::IfBreak {
            broken: Box::new(broken),
            flat: Box::new(flat),
        }
    }

    pub fn join(separator: Doc, docs: impl IntoIterator<Item = Doc>) -> Doc {
        let mut parts = Vec::new();
        for (position, doc) in docs.into_iter().enumerate() {
            if position > 0 {
                parts.push(separator.clone());
            }
            parts.push(doc);
        }
        Doc::Concat(parts)
    }

    fn has_hard_line(&self) -> bool {
        match self {
            Doc::Nil | Doc::Text(_) => false,
            Doc::Line(line) => *line == Line::Hard,
            Doc::Concat(parts) => parts.iter().any(Doc::has_hard_line),
            Doc::Group { broken, .. } => *broken,
            Doc::Indent(contents) => contents.has_hard_line(),
            Doc::IfBreak { flat, .. } => flat.has_hard_line(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

#[derive(Debug, Clone, Copy)]
struct Command<'a> {
    indent: usize,
    mode: Mode,
    doc: &'a Doc,
}

pub fn render(doc: &Doc, width: usize) -> String {
    let mut output = String::new();
    let mut column = 0usize;
    let mut stack = vec![Command {
        indent: 0,
        mode: Mode::Break,
        doc,
    }];

    while let Some(Command { indent, mode, doc }) = stack.pop() {
        match doc {
            Doc::Nil => {}
            Doc::Text(text) => {
                output.push_str(text);
                column += text.chars().count();
            }
            Doc::Concat(parts) => {
                stack.extend(
                    parts
                        .iter()
                        .rev()
                        .map(|doc| Command { indent, mode, doc }),
                );
            }
            Doc::Indent(contents) => stack.push(Command {
                indent: indent + INDENT_WIDTH,
                mode,
                doc: &**contents,
            }),
            Doc::Group { contents, broken } => {
                let remaining = width as isize - column as isize;
                let mode = if !broken && fits(contents, &stack, remaining) {
                    Mode::Flat
                } else {
                    Mode::Break
                };
                stack.push(Command {
                    indent,
                    mode,
                    doc: &**contents,
                });
            }
            Doc::Line(line) => match (mode, line) {
                (Mode::Flat, Line::Soft) => {}
                (Mode::Flat, Line::Space) => {
                    output.push(' ');
                    column += 1;
                }
                _ => {
                    let trimmed = output.trim_end_matches(' ').len();
                    output.truncate(trimmed);
                    output.push('\n');
                    output.extend(std::iter::repeat(' ').take(indent));
                    column = indent;
                }
            },
            Doc::IfBreak { broken, flat } => stack.push(Command {
                indent,
                mode,
                doc: if mode == Mode::Break { &**broken } else { &**flat },
            }),
        }
    }

    output
}

/// Whether `next`, laid out flat, and the rest of its line fit in `width`
/// columns. The rest of the line ends at the first line break taken in
/// break mode.
fn fits(next: &Doc, rest: &[Command<'_>], width: isize) -> bool {
    let mut remaining = width;
    let mut rest_index = rest.len();
    let mut pending = vec![(Mode::Flat, next)];

    loop {
        if remaining < 0 {
            return false;
        }

        let (mode, doc) = match pending.pop() {
            Some(item) => item,
            None => {
                if rest_index == 0 {
                    return true;
                }
                rest_index -= 1;
                (rest[rest_index].mode, rest[rest_index].doc)
            }
        };

        match doc {
            Doc::Nil => {}
            Doc::Text(text) => remaining -= text.chars().count() as isize,
            Doc::Concat(parts) => pending.extend(parts.iter().rev().map(|doc| (mode, doc))),
            Doc::Indent(contents) => pending.push((mode, &**contents)),
            Doc::Group { contents, broken } => {
                let mode = if *broken { Mode::Break } else { mode };
                pending.push((mode, &**contents));
            }
            Doc::Line(line) => {
                if mode == Mode::Break || *line == Line::Hard {
                    return true;
                }
                if *line == Line::Space {
                    remaining -= 1;
                }
            }
            Doc::IfBreak { broken, flat } => {
                pending.push((mode, if mode == Mode::Break { &**broken } else { &**flat }));
            }
        }
    }
}
