use latex::{Mode, Options, render, render_to, render_with};
use markright::Document;

fn parse(source: &str) -> Document {
    markright::parser::Parser::new(source.to_string(), 0)
        .parse()
        .expect("parse failed")
}

fn latex(source: &str) -> String {
    render(&parse(source))
}

/// The text between `\begin{document}` and `\end{document}`, title block excluded.
fn body(source: &str) -> String {
    let options = Options {
        title_block: false,
        ..Options::default()
    };
    let out = render_with(&parse(source), &options);
    let start = out.find("\\begin{document}\n").expect("no begin") + "\\begin{document}\n".len();
    let end = out.find("\\end{document}").expect("no end");
    out[start..end].to_string()
}

#[test]
fn full_article_output() {
    let expected = r#"\documentclass[a4paper]{article}
\title{T}
\author{}
\date{}
\usepackage{indentfirst}
\usepackage{xltxtra}
\usepackage{bussproofs}
\usepackage{listings}
\setmainfont{IPAMincho}
\setsansfont{IPAGothic}
\setmonofont{IPAGothic}
\XeTeXlinebreaklocale "ja"
\begin{document}
\maketitle
\section{S}
\par x
\end{document}
"#;
    assert_eq!(latex("%title T\n# S\n x"), expected);
}

#[test]
fn metadata_reaches_preamble() {
    let out = latex("%title Report\n%author Ann\n%date today\n# Intro\n paragraph text here");
    assert!(out.contains("\\title{Report}\n"));
    assert!(out.contains("\\author{Ann}\n"));
    assert!(out.contains("\\date{today}\n"));
    assert!(out.contains("\\section{Intro}\n\\par paragraph text here\n\\end{document}"));
}

#[test]
fn rendering_is_deterministic() {
    let source = "%title T\n# A\n x\ny\n* a\n1. b\n> c\n[code]{ z }\n## B\n[proof]{\n[conclusion] q\n}";
    let doc = parse(source);
    assert_eq!(render(&doc), render(&doc));
    assert_eq!(render(&doc), latex(source));
}

#[test]
fn sections_and_subsections_in_order() {
    assert_eq!(
        body("# One\n## A\n a\n## B\n b\n# Two"),
        "\\section{One}\n\\subsection{A}\n\\par a\n\\subsection{B}\n\\par b\n\\section{Two}\n"
    );
}

#[test]
fn paragraph_statements_are_newline_separated() {
    assert_eq!(body("# S\n first\nsecond"), "\\section{S}\n\\par first\nsecond\n");
}

#[test]
fn lists() {
    assert_eq!(
        body("# S\n* a\n* b\n1. c\n2. d"),
        "\\section{S}\n\
         \\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}\n\
         \\begin{enumerate}\n\\item c\n\\item d\n\\end{enumerate}\n"
    );
}

#[test]
fn quote() {
    assert_eq!(
        body("# S\n> to be\n> or not"),
        "\\section{S}\n\\begin{quote}\nto be\nor not\n\\end{quote}\n"
    );
}

#[test]
fn code_block_is_verbatim() {
    assert_eq!(
        body("# S\n[code] rust {\nlet s = \"{}\";\n}"),
        "\\section{S}\n\\begin{lstlisting}[language=rust]\n\nlet s = \"{}\";\n\n\\end{lstlisting}\n"
    );
}

#[test]
fn binary_proof_with_label() {
    assert_eq!(
        body("# S\n[proof] {\n[premise] A\n[premise] B\n[label] and\n[conclusion] A \\land B\n}"),
        "\\section{S}\n\\begin{prooftree}\n\\AxiomC{A}\n\\AxiomC{B}\n\\RightLabel{and}\n\\BinaryInfC{A \\land B}\n\\end{prooftree}\n"
    );
}

#[test]
fn axiom_proof() {
    assert_eq!(
        body("# S\n[proof] {\n[conclusion] T\n}"),
        "\\section{S}\n\\begin{prooftree}\n\\AxiomC{}\n\\UnaryInfC{T}\n\\end{prooftree}\n"
    );
}

#[test]
fn quinary_proof() {
    let out = body("# S\n[proof] {\n[premise] a\n[premise] b\n[premise] c\n[premise] d\n[premise] e\n[conclusion] f\n}");
    assert!(out.contains("\\AxiomC{e}\n\\QuinaryInfC{f}\n"));
}

#[test]
fn six_premise_proof_stays_quinary() {
    let out = body(
        "# S\n[proof] {\n[premise] a\n[premise] b\n[premise] c\n[premise] d\n[premise] e\n[premise] f\n[conclusion] g\n}",
    );
    assert_eq!(
        out,
        "\\section{S}\n\\begin{prooftree}\n\\AxiomC{a}\n\\AxiomC{b}\n\\AxiomC{c}\n\\AxiomC{d}\n\\AxiomC{e \\quad f}\n\\QuinaryInfC{g}\n\\end{prooftree}\n"
    );
}

#[test]
fn special_characters_are_not_escaped() {
    assert_eq!(body("# 100% & $x_1$"), "\\section{100% & $x_1$}\n");
}

#[test]
fn slide_mode_uses_frames_and_blocks() {
    let out = latex("%slide-mode\n%title Talk\n# Frame\n## Box\n* a");
    assert!(out.starts_with("\\documentclass{beamer}\n\\usetheme{default}\n\\title{Talk}\n"));
    assert!(!out.contains("indentfirst"));
    assert!(out.contains("\\begin{document}\n\\begin{frame}\n\\titlepage\n\\end{frame}\n"));
    assert!(out.contains(
        "\\begin{frame}[fragile]{Frame}\n\\begin{block}{Box}\n\\begin{itemize}\n\\item a\n\\end{itemize}\n\\end{block}\n\\end{frame}\n"
    ));
    assert!(!out.contains("\\section"));
    assert!(!out.contains("\\maketitle"));
}

#[test]
fn force_slides_overrides_document() {
    let doc = parse("# Frame\n x");
    let options = Options {
        force_slides: true,
        theme: "Madrid".into(),
        ..Options::default()
    };
    assert_eq!(latex::Latex::new(&doc, &options).mode(), Mode::Slides);
    let out = render_with(&doc, &options);
    assert!(out.contains("\\usetheme{Madrid}\n"));
    assert!(out.contains("\\begin{frame}[fragile]{Frame}\n\\par x\n\\end{frame}\n"));
}

#[test]
fn options_from_toml() {
    let options: Options = toml::from_str(
        r#"
paper = "letterpaper"
class_options = ["11pt"]
main_font = "Noto Serif"
packages = ["amsmath"]
title_block = false
"#,
    )
    .expect("valid options");
    let out = render_with(&parse("# S"), &options);
    assert!(out.starts_with("\\documentclass[letterpaper,11pt]{article}\n"));
    assert!(out.contains("\\usepackage{listings}\n\\usepackage{amsmath}\n"));
    assert!(out.contains("\\setmainfont{Noto Serif}\n\\setsansfont{IPAGothic}\n"));
    assert!(!out.contains("\\maketitle"));
}

#[test]
fn unknown_option_is_rejected() {
    let result: Result<Options, _> = toml::from_str("papersize = \"a5\"");
    assert!(result.is_err());
}

#[test]
fn render_to_matches_render() {
    let doc = parse("%title T\n# S\n* a");
    let mut out = Vec::new();
    render_to(&doc, &Options::default(), &mut out).expect("write failed");
    assert_eq!(String::from_utf8(out).unwrap(), render(&doc));
}
