//! Template rendering: dispatch from a [`TemplateId`] to a render strategy
//! producing a complete HTML document for the brand page.
//!
//! All user-supplied text is HTML-escaped here, and font inputs pass
//! through [`crate::brand::sanitize`] before entering generated style
//! text. A disabled section is omitted from the document entirely.

use crate::brand::page::{BrandPage, Section, TemplateId};
use crate::brand::sanitize::{sanitize_font_family, sanitize_font_url};
use crate::brand::templates::{
    Brutalist, Campaign, Editorial, Minimal, Monochrome, Vibrant,
};

/// A render strategy for one visual template.
pub trait TemplateRenderer: Sync {
    fn id(&self) -> TemplateId;
    fn render(&self, page: &BrandPage) -> String;
}

/// Resolve the strategy for a template identifier. Total: every variant of
/// the closed enum has a strategy, and lenient deserialization already
/// mapped unknown identifiers to the default.
pub fn renderer_for(template: TemplateId) -> &'static dyn TemplateRenderer {
    match template {
        TemplateId::Minimal => &Minimal,
        TemplateId::Editorial => &Editorial,
        TemplateId::Monochrome => &Monochrome,
        TemplateId::Vibrant => &Vibrant,
        TemplateId::Brutalist => &Brutalist,
        TemplateId::Campaign => &Campaign,
    }
}

/// Render a brand page with its selected template.
pub fn render_page(page: &BrandPage) -> String {
    renderer_for(page.template).render(page)
}

/// Escape text for embedding in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generated typography CSS for the page: optional `@font-face` rules for
/// uploaded font files plus the family assignments. Rejected font URLs are
/// dropped, not embedded.
pub fn font_css(page: &BrandPage) -> String {
    let heading = sanitize_font_family(&page.heading_font.family);
    let body = sanitize_font_family(&page.body_font.family);
    let mut css = String::new();

    for (name, font) in [("brand-heading", &page.heading_font), ("brand-body", &page.body_font)] {
        if let Some(url) = font.file_url.as_deref().and_then(sanitize_font_url) {
            css.push_str(&format!(
                "@font-face {{ font-family: '{name}'; src: url('{url}'); }}\n"
            ));
        }
    }

    let heading_stack = if page.heading_font.file_url.as_deref().and_then(sanitize_font_url).is_some() {
        format!("'brand-heading', {heading}, serif")
    } else if heading.is_empty() {
        "serif".to_string()
    } else {
        format!("{heading}, serif")
    };
    let body_stack = if page.body_font.file_url.as_deref().and_then(sanitize_font_url).is_some() {
        format!("'brand-body', {body}, sans-serif")
    } else if body.is_empty() {
        "sans-serif".to_string()
    } else {
        format!("{body}, sans-serif")
    };

    css.push_str(&format!(
        "h1, h2, h3 {{ font-family: {heading_stack}; }}\nbody {{ font-family: {body_stack}; }}\n"
    ));
    css
}

// ---------------------------------------------------------------------------
// Shared section builders
// ---------------------------------------------------------------------------

/// Builders for the individual page sections, shared by every template.
/// Each returns `None` when the section is disabled so the caller can
/// splice enabled sections in its own order.
pub mod sections {
    use super::*;

    pub fn hero(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Hero) {
            return None;
        }
        let name = escape_html(&page.name);
        let tagline = escape_html(&page.tagline);
        Some(format!(
            "<section class=\"hero\"><h1>{name}</h1><p class=\"tagline\">{tagline}</p></section>\n"
        ))
    }

    pub fn logos(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Logos) {
            return None;
        }
        let title = escape_html(page.section_title(Section::Logos, "Logo"));
        let mut items = String::new();
        let variants = [
            ("light", &page.logos.light),
            ("dark", &page.logos.dark),
            ("icon-light", &page.logos.icon_light),
            ("icon-dark", &page.logos.icon_dark),
            ("grid", &page.logos.grid),
            ("anatomy", &page.logos.anatomy),
        ];
        for (variant, url) in variants {
            if let Some(url) = url {
                let url = escape_html(url);
                items.push_str(&format!(
                    "<figure class=\"logo logo-{variant}\"><img src=\"{url}\" alt=\"{variant} logo\"></figure>"
                ));
            }
        }
        Some(format!(
            "<section class=\"logos\"><h2>{title}</h2><div class=\"logo-grid\">{items}</div></section>\n"
        ))
    }

    pub fn palette(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Palette) {
            return None;
        }
        let title = escape_html(page.section_title(Section::Palette, "Color"));
        let mut swatches = String::new();
        for color in &page.palette {
            let name = escape_html(&color.name);
            let hex = escape_html(&color.hex);
            let rgb = color.rgb_css().unwrap_or_default();
            // The swatch background only gets a value that parsed as hex.
            let bg = if color.rgb().is_some() { hex.as_str() } else { "transparent" };
            swatches.push_str(&format!(
                "<div class=\"swatch\" style=\"background: {bg}\">\
                 <span class=\"swatch-name\">{name}</span>\
                 <span class=\"swatch-hex\">{hex}</span>\
                 <span class=\"swatch-rgb\">{rgb}</span></div>"
            ));
        }
        Some(format!(
            "<section class=\"palette\"><h2>{title}</h2><div class=\"swatches\">{swatches}</div></section>\n"
        ))
    }

    pub fn typography(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Typography) {
            return None;
        }
        let title = escape_html(page.section_title(Section::Typography, "Typography"));
        let heading = escape_html(&sanitize_font_family(&page.heading_font.family));
        let body = escape_html(&sanitize_font_family(&page.body_font.family));
        Some(format!(
            "<section class=\"typography\"><h2>{title}</h2>\
             <p class=\"type-heading\">Headings: {heading}</p>\
             <p class=\"type-body\">Body: {body}</p></section>\n"
        ))
    }

    pub fn story(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Story) {
            return None;
        }
        let title = escape_html(page.section_title(Section::Story, "Our Story"));
        let subtitle = page
            .section_subtitle(Section::Story)
            .map(|s| format!("<p class=\"subtitle\">{}</p>", escape_html(s)))
            .unwrap_or_default();
        let story = escape_html(&page.story);
        Some(format!(
            "<section class=\"story\"><h2>{title}</h2>{subtitle}<p>{story}</p></section>\n"
        ))
    }

    pub fn mockups(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Mockups) {
            return None;
        }
        let title = escape_html(page.section_title(Section::Mockups, "In the Wild"));
        let mut items = String::new();
        for url in &page.mockups {
            let url = escape_html(url);
            items.push_str(&format!("<img class=\"mockup\" src=\"{url}\" alt=\"mockup\">"));
        }
        Some(format!(
            "<section class=\"mockups\"><h2>{title}</h2><div class=\"mockup-grid\">{items}</div></section>\n"
        ))
    }

    /// The social-strategy section. Only the campaign template calls this,
    /// and only when the page actually carries a strategy.
    pub fn social(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Social) {
            return None;
        }
        let strategy = page.social.as_ref()?;
        let title = escape_html(page.section_title(Section::Social, "Social Strategy"));
        let mut body = String::new();

        if !strategy.goals.is_empty() {
            body.push_str("<ul class=\"goals\">");
            for goal in &strategy.goals {
                body.push_str(&format!("<li>{}</li>", escape_html(goal)));
            }
            body.push_str("</ul>");
        }
        for pillar in &strategy.pillars {
            body.push_str(&format!(
                "<div class=\"pillar\"><h3>{}</h3><p>{}</p></div>",
                escape_html(&pillar.name),
                escape_html(&pillar.description)
            ));
        }
        for plan in &strategy.platforms {
            body.push_str(&format!(
                "<div class=\"platform\"><h3>{}</h3><p>{} — {}</p></div>",
                escape_html(&plan.platform),
                escape_html(&plan.cadence),
                escape_html(&plan.focus)
            ));
        }
        for group in &strategy.hashtags {
            let tags = group
                .tags
                .iter()
                .map(|t| escape_html(t))
                .collect::<Vec<_>>()
                .join(" ");
            body.push_str(&format!(
                "<div class=\"hashtags\"><h3>{}</h3><p>{tags}</p></div>",
                escape_html(&group.name)
            ));
        }
        if !strategy.calendar.is_empty() {
            body.push_str("<table class=\"calendar\">");
            for slot in &strategy.calendar {
                body.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>",
                    escape_html(&slot.day),
                    escape_html(&slot.activity)
                ));
            }
            body.push_str("</table>");
        }
        for kpi in &strategy.kpis {
            body.push_str(&format!(
                "<div class=\"kpi\"><span>{}</span><strong>{}</strong></div>",
                escape_html(&kpi.metric),
                escape_html(&kpi.target)
            ));
        }
        for persona in &strategy.personas {
            body.push_str(&format!(
                "<div class=\"persona\"><h3>{}</h3><p>{}</p></div>",
                escape_html(&persona.name),
                escape_html(&persona.summary)
            ));
        }
        if !strategy.voice.is_empty() {
            body.push_str(&format!(
                "<p class=\"voice\">{}</p>",
                escape_html(&strategy.voice)
            ));
        }

        Some(format!(
            "<section class=\"social\"><h2>{title}</h2>{body}</section>\n"
        ))
    }

    pub fn footer(page: &BrandPage) -> Option<String> {
        if !page.sections.is_enabled(Section::Footer) {
            return None;
        }
        let name = escape_html(&page.name);
        Some(format!(
            "<footer class=\"footer\"><p>{name}</p></footer>\n"
        ))
    }
}

/// Assemble a full HTML document from a template's stylesheet and the
/// rendered sections.
pub fn document(page: &BrandPage, template_css: &str, body: &str) -> String {
    let title = escape_html(&page.name);
    let fonts = font_css(page);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{fonts}{template_css}\n</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}
