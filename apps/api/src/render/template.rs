//! The embedded LaTeX document template. Generated content replaces
//! [`CONTENT_MARKER`]; everything else is the fixed preamble defining the
//! resume macros the generator emits.

pub const CONTENT_MARKER: &str = "%[[[INSERT CONTENT HERE]]]%";

pub const DOCUMENT_TEMPLATE: &str = r#"\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\addtolength{\oddsidemargin}{-0.5in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1in}
\addtolength{\topmargin}{-.5in}
\addtolength{\textheight}{1.0in}

\urlstyle{same}

\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\usepackage{xcolor}

\begin{document}

%[[[INSERT CONTENT HERE]]]%

\end{document}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_contains_exactly_one_marker() {
        assert_eq!(DOCUMENT_TEMPLATE.matches(CONTENT_MARKER).count(), 1);
    }

    #[test]
    fn test_template_defines_every_emitted_macro() {
        for macro_name in [
            "\\newcommand{\\resumeItem}",
            "\\newcommand{\\resumeSubheading}",
            "\\newcommand{\\resumeSubHeadingListStart}",
            "\\newcommand{\\resumeSubHeadingListEnd}",
            "\\newcommand{\\resumeItemListStart}",
            "\\newcommand{\\resumeItemListEnd}",
        ] {
            assert!(
                DOCUMENT_TEMPLATE.contains(macro_name),
                "template missing {macro_name}"
            );
        }
    }
}
