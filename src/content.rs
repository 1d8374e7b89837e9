//! Static educational text for the "About Disease" view.

/// Title of the about view.
pub const ABOUT_TITLE: &str = "Bacterial Infections & Secretome Proteins";

/// One block of the about text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Paragraph(&'static str),
    /// Bulleted item with an emphasized label
    Item(&'static str, &'static str),
    Bullet(&'static str),
}

/// The about text, in display order.
pub const ABOUT: &[Block] = &[
    Block::Heading("Overview"),
    Block::Paragraph(
        "Bacterial infections are caused by pathogenic bacteria and can affect various parts of the body.",
    ),
    Block::Heading("Types"),
    Block::Item("Respiratory", "Tuberculosis, Pneumonia"),
    Block::Item("Digestive", "Cholera, Salmonella"),
    Block::Item("Skin", "Cellulitis, Impetigo"),
    Block::Heading("Treatments"),
    Block::Bullet("Antibiotics (Penicillin, Tetracycline)"),
    Block::Bullet("Immunotherapy"),
    Block::Bullet("Vaccination"),
    Block::Bullet("Supportive care and hygiene"),
    Block::Paragraph(
        "Secretome proteins are exported by bacteria to interact with the host and enhance infection.",
    ),
];

/// Styling class of a wrapped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Text,
    Blank,
}

/// One display line of the about text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutLine {
    pub kind: LineKind,
    pub text: String,
}

impl AboutLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Lays the about text out for a given width.
///
/// Bullets get a hanging indent; headings are preceded by a blank line
/// (except the first one).
pub fn about_lines(width: usize) -> Vec<AboutLine> {
    let width = width.max(10);
    let mut lines = Vec::new();

    for (i, block) in ABOUT.iter().enumerate() {
        match *block {
            Block::Heading(title) => {
                if i > 0 {
                    lines.push(AboutLine::new(LineKind::Blank, ""));
                }
                lines.push(AboutLine::new(LineKind::Heading, title));
            }
            Block::Paragraph(text) => {
                let previous = i.checked_sub(1).and_then(|p| ABOUT.get(p));
                if matches!(previous, Some(Block::Bullet(_) | Block::Item(..))) {
                    lines.push(AboutLine::new(LineKind::Blank, ""));
                }
                push_wrapped(&mut lines, text, textwrap::Options::new(width));
            }
            Block::Item(label, text) => {
                let item = format!("{label}: {text}");
                push_wrapped(&mut lines, &item, bullet_options(width));
            }
            Block::Bullet(text) => {
                push_wrapped(&mut lines, text, bullet_options(width));
            }
        }
    }

    lines
}

fn bullet_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width)
        .initial_indent("- ")
        .subsequent_indent("  ")
}

fn push_wrapped(lines: &mut Vec<AboutLine>, text: &str, options: textwrap::Options<'_>) {
    lines.extend(
        textwrap::wrap(text, options)
            .into_iter()
            .map(|line| AboutLine::new(LineKind::Text, line)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout() {
        let lines = about_lines(200);
        assert_eq!(lines[0], AboutLine::new(LineKind::Heading, "Overview"));
        assert!(lines.iter().any(|l| l.text == "- Respiratory: Tuberculosis, Pneumonia"));
        assert!(lines.iter().any(|l| l.text == "- Supportive care and hygiene"));
        assert!(lines.last().unwrap().text.starts_with("Secretome proteins are exported"));
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Heading).count(), 3);
    }

    #[test]
    fn test_narrow_layout_wraps() {
        let lines = about_lines(30);
        assert!(lines.iter().all(|l| l.text.chars().count() <= 30));
        assert!(lines.len() > about_lines(200).len());
        // Continuation lines of a bullet are indented
        let i = lines
            .iter()
            .position(|l| l.text.starts_with("- Antibiotics"))
            .unwrap();
        assert!(lines[i + 1].text.starts_with("  "));
    }
}
