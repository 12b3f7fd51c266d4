use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Severity, SnippetKind};
use crate::span::Span;

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for (source, snippets) in self.snippets_by_source() {
            let groups = get_overlapping_groups(snippets, |s| s.lines);
            for (snippets, mut lines) in groups {
                lines.start = lines.start.saturating_sub(self.config.context_size);
                lines.end = (lines.end + self.config.context_size).min(source.num_lines());

                self.draw_group(source, &snippets, lines)?;
            }
        }

        self.draw_notes()
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Span,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // groups are never empty
        let (line_num, col_num) = source
            .byte_to_line_col(snippets[0].bytes.start)
            .unwrap_or((source.num_lines(), 1));

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines {
            let Some(line_str) = source.line_str(line) else {
                break;
            };

            self.draw_gutter(Some(line), line_num_width)?;
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            let Some(line_start) = source.line_to_byte(line) else {
                continue;
            };
            let line_end = line_start + line_str.len();

            for snippet in snippets.iter().filter(|s| s.lines.start == line) {
                self.draw_gutter(None, line_num_width)?;

                let before = source
                    .source_str()
                    .get(line_start..snippet.bytes.start)
                    .unwrap_or_default();
                let offset = str_width(before);

                // spans crossing a line break are underlined up to the end of their first line
                let underlined = source
                    .source_str()
                    .get(snippet.bytes.start..snippet.bytes.end.min(line_end))
                    .map_or(1, str_width)
                    .max(1);

                self.stream.set_color(self.get_snippet_color(snippet.kind))?;

                write!(self.stream, "{:<offset$}", "")?;
                write!(self.stream, "{}", self.config.underline.repeat(underlined))?;
                writeln!(
                    self.stream,
                    "{}{}",
                    self.config.underline_after, snippet.label
                )?;

                self.stream.reset()?;
            }
        }

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{:>line_num_width$}", line + 1)?,
            None => write!(self.stream, "{:>line_num_width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()
    }

    fn draw_notes(&mut self) -> io::Result<()> {
        for note in &self.diagnostic.notes {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "{}", self.config.note_prefix)?;
            self.stream.reset()?;

            writeln!(self.stream, " {note}")?;
        }

        Ok(())
    }

    fn snippets_by_source(&self) -> Vec<(&'a Cached<S::Source>, Vec<SnippetData<'a>>)> {
        let mut by_source: Vec<(S::SourceId, &'a Cached<S::Source>, Vec<SnippetData<'a>>)> =
            vec![];

        for snippet in &self.diagnostic.snippets {
            // snippets into unknown sources are dropped rather than aborting the report
            let Some(source) = self.sources.get_source(snippet.source_id) else {
                continue;
            };

            let last_line = source.num_lines() - 1;
            let start_line = source
                .byte_to_line_index(snippet.span.start)
                .unwrap_or(last_line);
            let end_line = source
                .byte_to_line_index(snippet.span.end)
                .unwrap_or(last_line)
                .max(start_line)
                + 1;

            let data = SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                bytes: snippet.span,
                lines: Span::new(start_line, end_line),
            };

            match by_source
                .iter_mut()
                .find(|(id, _, _)| *id == snippet.source_id)
            {
                Some((_, _, snippets)) => snippets.push(data),
                None => by_source.push((snippet.source_id, source, vec![data])),
            }
        }

        by_source
            .into_iter()
            .map(|(_, source, snippets)| (source, snippets))
            .collect()
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Error => &self.config.error_color,
        }
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    bytes: Span,
    lines: Span,
}

/// Sorts items by the start of their range and merges those whose ranges touch.
fn get_overlapping_groups<T, F>(mut items: Vec<T>, get_range: F) -> Vec<(Vec<T>, Span)>
where
    F: Fn(&T) -> Span,
{
    items.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_start = 0;
    let mut group_end = 0;

    for item in items {
        let range = get_range(&item);

        if range.start > group_end || group.is_empty() {
            if !group.is_empty() {
                groups.push((
                    std::mem::take(&mut group),
                    Span::new(group_start, group_end),
                ));
            }

            group_start = range.start;
            group_end = range.end;
        }

        group_end = group_end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, Span::new(group_start, group_end)));
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::get_overlapping_groups;
    use crate::sources::{Cached, Sources};
    use crate::span::Span;
    use crate::{Config, Diagnostic, Snippet};

    #[must_use]
    fn diagnostic_to_string<S: Sources>(diagnostic: &Diagnostic<S>, sources: &S) -> String {
        let config = Config::default();
        let mut stream = NoColor::new(vec![]);

        diagnostic
            .write_to_stream(sources, &config, &mut stream)
            .unwrap();

        String::from_utf8(stream.into_inner()).unwrap()
    }

    fn sources(source: &str) -> Vec<Cached<(String, String)>> {
        vec![Cached::new(("main.ret".to_owned(), source.to_owned()))]
    }

    #[test]
    fn overlapping_ranges() {
        let ranges = vec![
            Span::new(2, 4),
            Span::new(0, 1),
            Span::new(1, 2),
            Span::new(6, 7),
        ];
        let groups = get_overlapping_groups(ranges, |&r| r);

        assert_eq!(
            groups,
            vec![
                (
                    vec![Span::new(0, 1), Span::new(1, 2), Span::new(2, 4)],
                    Span::new(0, 4)
                ),
                (vec![Span::new(6, 7)], Span::new(6, 7)),
            ]
        );
    }

    #[test]
    fn single_line_error() {
        let diagnostic = Diagnostic::error()
            .with_message("syntax error")
            .with_snippet(Snippet::primary("invalid token: returns", 0, 0..7));

        let rendered = diagnostic_to_string(&diagnostic, &sources("returns 1;"));

        assert_eq!(
            rendered,
            "Error: syntax error\n\
             In main.ret:1:1\n\
             1 │ returns 1;\n  \
               │ ^^^^^^^ invalid token: returns\n"
        );
    }

    #[test]
    fn context_and_notes() {
        let diagnostic = Diagnostic::error()
            .with_id("E0002")
            .with_message("expected `;`")
            .with_snippet(Snippet::primary("expected `;` here", 0, 9..9))
            .with_note("every statement ends with a semicolon");

        let rendered = diagnostic_to_string(&diagnostic, &sources("\nreturn 1\n"));

        assert_eq!(
            rendered,
            "[E0002] Error: expected `;`\n\
             In main.ret:2:9\n\
             1 │ \n\
             2 │ return 1\n  \
               │         ^ expected `;` here\n\
             3 │ \n\
             = note: every statement ends with a semicolon\n"
        );
    }

    #[test]
    fn message_only() {
        let diagnostic = Diagnostic::<Vec<Cached<(String, String)>>>::error()
            .with_message("no return statement");

        let rendered = diagnostic_to_string(&diagnostic, &sources(""));

        assert_eq!(rendered, "Error: no return statement\n");
    }
}
