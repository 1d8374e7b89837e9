/// Decorative characters used by the renderer.
///
/// ASCII is the default so the dashboard renders on any terminal;
/// `--fancy` switches to Unicode symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub tab_divider: &'static str,
    pub cursor: &'static str,
    pub ellipsis: &'static str,
    pub ok_prefix: &'static str,
    pub warn_prefix: &'static str,
    pub error_prefix: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub arrow_left: &'static str,
    pub arrow_right: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        tab_divider: "|",
        cursor: "_",
        ellipsis: "~",
        ok_prefix: "[ok] ",
        warn_prefix: "[!] ",
        error_prefix: "[x] ",
        arrow_up: "^",
        arrow_down: "v",
        arrow_left: "<",
        arrow_right: ">",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        tab_divider: "│",
        cursor: "█",
        ellipsis: "…",
        ok_prefix: "✔ ",
        warn_prefix: "⚠ ",
        error_prefix: "✖ ",
        arrow_up: "↑",
        arrow_down: "↓",
        arrow_left: "←",
        arrow_right: "→",
    }
}
