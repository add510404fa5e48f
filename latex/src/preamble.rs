use std::fmt;

use markright::Document;

use crate::options::{Mode, Options};

/// Packages every document loads, in order.
const ARTICLE_PACKAGES: &[&str] = &["indentfirst", "xltxtra", "bussproofs", "listings"];
const SLIDE_PACKAGES: &[&str] = &["xltxtra", "bussproofs", "listings"];

/// Everything before `\begin{document}`.
pub fn write_preamble(
    f: &mut fmt::Formatter<'_>,
    document: &Document,
    options: &Options,
    mode: Mode,
) -> fmt::Result {
    match mode {
        Mode::Article => {
            let mut class_options = vec![options.paper.as_str()];
            class_options.extend(options.class_options.iter().map(String::as_str));
            writeln!(f, "\\documentclass[{}]{{article}}", class_options.join(","))?;
        }
        Mode::Slides => {
            if options.class_options.is_empty() {
                writeln!(f, "\\documentclass{{beamer}}")?;
            } else {
                writeln!(f, "\\documentclass[{}]{{beamer}}", options.class_options.join(","))?;
            }
            writeln!(f, "\\usetheme{{{}}}", options.theme)?;
        }
    }

    writeln!(f, "\\title{{{}}}", document.title)?;
    writeln!(f, "\\author{{{}}}", document.author)?;
    writeln!(f, "\\date{{{}}}", document.date)?;

    let builtin = match mode {
        Mode::Article => ARTICLE_PACKAGES,
        Mode::Slides => SLIDE_PACKAGES,
    };
    for package in builtin {
        writeln!(f, "\\usepackage{{{}}}", package)?;
    }
    for package in &options.packages {
        writeln!(f, "\\usepackage{{{}}}", package)?;
    }

    if let Some(font) = &options.main_font {
        writeln!(f, "\\setmainfont{{{}}}", font)?;
    }
    if let Some(font) = &options.sans_font {
        writeln!(f, "\\setsansfont{{{}}}", font)?;
    }
    if let Some(font) = &options.mono_font {
        writeln!(f, "\\setmonofont{{{}}}", font)?;
    }
    if let Some(locale) = &options.linebreak_locale {
        writeln!(f, "\\XeTeXlinebreaklocale \"{}\"", locale)?;
    }

    Ok(())
}
