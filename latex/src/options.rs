use serde::Deserialize;

/// Knobs for the generated preamble. Loaded from the `[latex]` table of
/// `markright.toml`; every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Paper size passed to the article class.
    pub paper: String,
    /// Extra class options, e.g. `["11pt", "twocolumn"]`.
    pub class_options: Vec<String>,
    pub main_font: Option<String>,
    pub sans_font: Option<String>,
    pub mono_font: Option<String>,
    /// Language for `\XeTeXlinebreaklocale`.
    pub linebreak_locale: Option<String>,
    /// Beamer theme used in slide mode.
    pub theme: String,
    /// Additional `\usepackage` lines, emitted after the built-in ones.
    pub packages: Vec<String>,
    /// Emit `\maketitle` (articles) or a title frame (slides).
    pub title_block: bool,
    /// Render as slides even without `%slide-mode`.
    pub force_slides: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            paper: "a4paper".to_string(),
            class_options: Vec::new(),
            main_font: Some("IPAMincho".to_string()),
            sans_font: Some("IPAGothic".to_string()),
            mono_font: Some("IPAGothic".to_string()),
            linebreak_locale: Some("ja".to_string()),
            theme: "default".to_string(),
            packages: Vec::new(),
            title_block: true,
            force_slides: false,
        }
    }
}

/// Document-wide structural mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Article,
    Slides,
}

impl Mode {
    pub fn of(document: &markright::Document, options: &Options) -> Self {
        if document.slide_mode || options.force_slides {
            Mode::Slides
        } else {
            Mode::Article
        }
    }
}
