use leptos::*;

/// Rendering unit for the plain-text bodies of reports, sources and replies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
}

fn heading(line: &str) -> Option<&str> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('#') {
        return Some(rest.trim_start_matches('#').trim());
    }
    line.strip_prefix("**")
        .and_then(|rest| rest.strip_suffix("**"))
        .filter(|inner| !inner.contains("**"))
}

fn bullet(line: &str) -> Option<&str> {
    let line = line.trim_start();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .or_else(|| line.strip_prefix("* "))
}

/// Splits text into headings, bullet lists and paragraphs. Blank lines end a
/// paragraph; consecutive bullet lines form one list.
pub fn blocks(text: &str) -> Vec<Block> {
    let mut out = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<String> = Vec::new();

    fn flush(out: &mut Vec<Block>, paragraph: &mut Vec<&str>, bullets: &mut Vec<String>) {
        if !paragraph.is_empty() {
            out.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
        if !bullets.is_empty() {
            out.push(Block::Bullets(std::mem::take(bullets)));
        }
    }

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut out, &mut paragraph, &mut bullets);
        } else if let Some(item) = bullet(line) {
            if !paragraph.is_empty() {
                out.push(Block::Paragraph(paragraph.join(" ")));
                paragraph.clear();
            }
            bullets.push(item.trim().to_string());
        } else if let Some(title) = heading(line) {
            flush(&mut out, &mut paragraph, &mut bullets);
            out.push(Block::Heading(title.to_string()));
        } else {
            if !bullets.is_empty() {
                out.push(Block::Bullets(std::mem::take(&mut bullets)));
            }
            paragraph.push(line.trim());
        }
    }
    flush(&mut out, &mut paragraph, &mut bullets);
    out
}

/// First `limit` characters, with `...` when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

#[component]
pub fn RichText(#[prop(into)] text: MaybeSignal<String>) -> impl IntoView {
    move || {
        text.with(|text| blocks(text))
            .into_iter()
            .map(|block| match block {
                Block::Heading(title) => view! { <h4>{title}</h4> }.into_view(),
                Block::Paragraph(body) => view! { <p>{body}</p> }.into_view(),
                Block::Bullets(items) => view! {
                  <ul>{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}</ul>
                }
                .into_view(),
            })
            .collect_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_bullets_and_paragraphs() {
        let text = "**Revenue**\nUp 12% on\nlast week.\n- ACME paid\n- NetLogic pending\n\nDone.";
        assert_eq!(
            blocks(text),
            vec![
                Block::Heading("Revenue".into()),
                Block::Paragraph("Up 12% on last week.".into()),
                Block::Bullets(vec!["ACME paid".into(), "NetLogic pending".into()]),
                Block::Paragraph("Done.".into()),
            ]
        );
    }

    #[test]
    fn inline_bold_is_not_a_heading() {
        assert_eq!(
            blocks("**ACME** paid the **invoice**"),
            vec![Block::Paragraph("**ACME** paid the **invoice**".into())]
        );
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("short", 50), "short");
    }
}
