use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use yansi::Paint;

use crate::formatting::FormatContext;
use crate::outline::glyph_for_level;

/// Minimal styling categories used when coloring markdown output.
#[derive(Clone, Copy)]
enum Style {
    Heading,
    Bullet(usize),
    Rule,
    Code,
    Body,
}

/// Render an entry body as styled terminal text. Bullet items use the
/// outline glyph for their depth whatever marker the file was written with.
pub fn render_markdown(input: &str, ctx: &FormatContext) -> String {
    let mut rendered = String::new();
    let mut list_depth: usize = 0;

    for event in Parser::new(input) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                rendered.push('\n');
                let mark = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    _ => "#### ",
                };
                push_styled(&mut rendered, mark, Style::Heading, ctx);
            }
            Event::End(TagEnd::Heading(_)) => rendered.push('\n'),
            Event::Start(Tag::List(_)) => {
                if list_depth > 0 && !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    rendered.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                rendered.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                let marker = format!("{} ", glyph_for_level(list_depth));
                push_styled(
                    &mut rendered,
                    &marker,
                    Style::Bullet(list_depth),
                    ctx,
                );
            }
            Event::End(TagEnd::Item) => {
                if !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if list_depth == 0 {
                    rendered.push_str("\n\n");
                }
            }
            Event::Code(t) => push_styled(&mut rendered, &t, Style::Code, ctx),
            Event::Text(t) => push_styled(&mut rendered, &t, Style::Body, ctx),
            Event::SoftBreak | Event::HardBreak => rendered.push('\n'),
            Event::Rule => {
                push_styled(&mut rendered, "\n---\n", Style::Rule, ctx);
            }
            Event::Html(t) => rendered.push_str(&t),
            _ => {}
        }
    }

    rendered.trim().to_string()
}

fn push_styled(buf: &mut String, text: &str, style: Style, ctx: &FormatContext) {
    if !ctx.use_color {
        buf.push_str(text);
        return;
    }
    let p = ctx.palette;
    let painted = match style {
        Style::Heading => {
            Paint::rgb(text, p.heading.0, p.heading.1, p.heading.2).bold()
        }
        Style::Bullet(depth) => {
            let (r, g, b) = if depth <= 1 { p.warning } else { p.date };
            Paint::rgb(text, r, g, b).bold()
        }
        Style::Rule => Paint::new(text).dim(),
        Style::Code => Paint::rgb(text, p.id.0, p.id.1, p.id.2),
        Style::Body => Paint::new(text),
    };
    buf.push_str(&painted.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::ColorPalette;

    fn plain() -> FormatContext {
        FormatContext::new(false, ColorPalette::MONOKAI)
    }

    #[test]
    fn test_render_nested_hyphen_list_with_glyphs() {
        let out = render_markdown("- first\n  - second\n- third\n", &plain());
        assert_eq!(out, "• first\n  ◦ second\n• third");
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let out = render_markdown("# Title\n\nsome `code` here\n", &plain());
        assert!(out.starts_with("# Title"));
        assert!(out.contains("some code here"));
    }

    #[test]
    fn test_render_with_color_adds_escapes() {
        let ctx = FormatContext::new(true, ColorPalette::MONOKAI);
        let out = render_markdown("- item\n", &ctx);
        assert!(out.contains("item"));
        assert!(out.contains('\x1b'));
    }
}
