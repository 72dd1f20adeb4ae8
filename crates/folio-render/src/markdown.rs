use regex::Regex;

use crate::error::RenderResult;
use crate::highlight::{escape_html, Highlighter};

const DEFAULT_LANGUAGE: &str = "typescript";
const FENCE: &str = "```";

/// Renders the markdown subset used in article bodies to HTML.
///
/// Supported: fenced code blocks (the first fence line names the language),
/// `#`/`##`/`###` headings, `![alt](url)` figures, `[video](url)` embeds,
/// `- `/`* ` lists, paragraphs, and inline `**bold**` and `[text](url)`.
/// All text is escaped.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    highlighter: Highlighter,
    inline: Regex,
    link_target: Regex,
}

impl MarkdownRenderer {
    pub fn new() -> RenderResult<Self> {
        Ok(Self {
            highlighter: Highlighter::new()?,
            inline: Regex::new(r"\*\*(?P<bold>.+?)\*\*|\[(?P<text>[^\]]+)\]\((?P<url>[^)\s]+)\)")?,
            link_target: Regex::new(r"^\[(?P<label>[^\]]*)\]\((?P<url>[^)]*)\)")?,
        })
    }

    /// Render a whole article body.
    pub fn render(&self, body: &str) -> String {
        let mut html = String::new();
        for (i, part) in body.split(FENCE).enumerate() {
            if i % 2 == 1 {
                html.push_str(&self.render_code_block(part));
            } else {
                html.push_str(&self.render_text(part));
            }
        }
        html
    }

    /// The highlighter used for fenced blocks.
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    fn render_code_block(&self, part: &str) -> String {
        let trimmed = part.trim();
        let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
        let first = first.trim();
        let (language, code) = if !first.is_empty() && !first.contains(char::is_whitespace) && !rest.is_empty() {
            (first, rest)
        } else if first.is_empty() {
            (DEFAULT_LANGUAGE, rest)
        } else {
            (DEFAULT_LANGUAGE, trimmed)
        };
        format!(
            "<pre class=\"code-block\" data-lang=\"{}\"><code>{}</code></pre>\n",
            escape_html(language),
            self.highlighter.highlight(code.trim())
        )
    }

    fn render_text(&self, text: &str) -> String {
        let mut html = String::new();
        let mut list: Vec<String> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
                list.push(format!("<li>{}</li>", self.inline(item)));
                continue;
            }
            flush_list(&mut list, &mut html);

            if trimmed.is_empty() {
                continue;
            }
            if let Some(heading) = trimmed.strip_prefix("### ") {
                html.push_str(&format!("<h3>{}</h3>\n", self.inline(heading)));
            } else if let Some(heading) = trimmed.strip_prefix("## ") {
                html.push_str(&format!("<h2>{}</h2>\n", self.inline(heading)));
            } else if let Some(heading) = trimmed.strip_prefix("# ") {
                html.push_str(&format!("<h1>{}</h1>\n", self.inline(heading)));
            } else if let Some(figure) = trimmed.strip_prefix('!').and_then(|rest| self.figure(rest)) {
                html.push_str(&figure);
            } else if let Some(video) = self.video(trimmed) {
                html.push_str(&video);
            } else {
                html.push_str(&format!("<p>{}</p>\n", self.inline(trimmed)));
            }
        }
        flush_list(&mut list, &mut html);
        html
    }

    fn figure(&self, rest: &str) -> Option<String> {
        let caps = self.link_target.captures(rest)?;
        let alt = escape_html(&caps["label"]);
        let url = safe_url(&caps["url"])?;
        let caption = if alt.is_empty() {
            String::new()
        } else {
            format!("<figcaption>{alt}</figcaption>")
        };
        Some(format!(
            "<figure><img src=\"{}\" alt=\"{alt}\">{caption}</figure>\n",
            escape_html(url)
        ))
    }

    fn video(&self, line: &str) -> Option<String> {
        let caps = self.link_target.captures(line)?;
        if !caps["label"].eq_ignore_ascii_case("video") {
            return None;
        }
        let url = safe_url(&caps["url"])?;
        Some(match youtube_id(url) {
            Some(id) => format!(
                "<div class=\"video\"><iframe src=\"https://www.youtube.com/embed/{}\" \
                 title=\"YouTube video player\" allowfullscreen></iframe></div>\n",
                escape_html(id)
            ),
            None => format!(
                "<div class=\"video\"><video controls><source src=\"{}\" type=\"video/mp4\"></video></div>\n",
                escape_html(url)
            ),
        })
    }

    /// Inline markup: escape everything, then re-emit bold runs and links.
    fn inline(&self, text: &str) -> String {
        let mut out = String::new();
        let mut last = 0;
        for caps in self.inline.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&escape_html(&text[last..whole.start()]));
            last = whole.end();

            if let Some(bold) = caps.name("bold") {
                out.push_str(&format!("<strong>{}</strong>", escape_html(bold.as_str())));
            } else if let (Some(label), Some(url)) = (caps.name("text"), caps.name("url")) {
                match safe_url(url.as_str()) {
                    Some(url) => out.push_str(&format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(url),
                        escape_html(label.as_str())
                    )),
                    None => out.push_str(&escape_html(label.as_str())),
                }
            }
        }
        out.push_str(&escape_html(&text[last..]));
        out
    }
}

fn flush_list(list: &mut Vec<String>, html: &mut String) {
    if list.is_empty() {
        return;
    }
    html.push_str("<ul>");
    for item in list.drain(..) {
        html.push_str(&item);
    }
    html.push_str("</ul>\n");
}

/// Only web, relative and mail links are emitted as links.
fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || lower.starts_with('/')
        || lower.starts_with('#');
    allowed.then_some(url)
}

/// Video id of a YouTube watch or short link.
fn youtube_id(url: &str) -> Option<&str> {
    if !(url.contains("youtube.com") || url.contains("youtu.be")) {
        return None;
    }
    let id = match url.split_once("v=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or(rest),
        None => url.rsplit('/').next().unwrap_or(url),
    };
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(body: &str) -> String {
        MarkdownRenderer::new().unwrap().render(body)
    }

    #[test]
    fn headings_and_paragraphs() {
        let html = render("# One\n## Two\n### Three\nPlain text.");
        assert_eq!(html, "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>\n<p>Plain text.</p>\n");
    }

    #[test]
    fn lists_are_grouped() {
        let html = render("- a\n* b\n\nafter");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n<p>after</p>\n");
    }

    #[test]
    fn fenced_block_uses_language_line() {
        let html = render("Intro\n\n```protobuf\nservice Pay {}\n```\nOutro");
        assert!(html.starts_with("<p>Intro</p>\n<pre class=\"code-block\" data-lang=\"protobuf\">"));
        assert!(html.contains("<span class=\"tok-keyword\">service</span>"));
        assert!(html.ends_with("<p>Outro</p>\n"));
    }

    #[test]
    fn fence_without_language_defaults_to_typescript() {
        let html = render("```\nlet x = 1;\n```");
        assert!(html.contains("data-lang=\"typescript\""));
        assert!(html.contains("<span class=\"tok-number\">1</span>"));
    }

    #[test]
    fn inline_bold_and_links() {
        let html = render("A **bold** [site](https://example.com) and [bad](javascript:alert(1))");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<a href=\"https://example.com\">site</a>"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render("<img src=x onerror=alert(1)>\n- <b>item</b>");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("<li>&lt;b&gt;item&lt;/b&gt;</li>"));
    }

    #[test]
    fn figures_and_videos() {
        let html = render("![Diagram](https://img.example.com/d.png)");
        assert_eq!(
            html,
            "<figure><img src=\"https://img.example.com/d.png\" alt=\"Diagram\"><figcaption>Diagram</figcaption></figure>\n"
        );

        let yt = render("[video](https://www.youtube.com/watch?v=abc123&t=5)");
        assert!(yt.contains("https://www.youtube.com/embed/abc123\""));

        let short = render("[video](https://youtu.be/xyz)");
        assert!(short.contains("embed/xyz"));

        let mp4 = render("[video](https://cdn.example.com/clip.mp4)");
        assert!(mp4.contains("<video controls><source src=\"https://cdn.example.com/clip.mp4\""));
    }
}
