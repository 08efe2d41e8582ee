//! The six visual template strategies.
//!
//! Each strategy owns its stylesheet tokens and its section order. The
//! campaign template is the only one that renders the social-strategy
//! section; every other template ignores that sub-document entirely.

use crate::brand::page::{BrandPage, TemplateId};
use crate::brand::render::{document, sections, TemplateRenderer};

fn splice(parts: &[Option<String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .collect::<Vec<_>>()
        .concat()
}

/// Clean whitespace-heavy default look.
pub struct Minimal;

impl TemplateRenderer for Minimal {
    fn id(&self) -> TemplateId {
        TemplateId::Minimal
    }

    fn render(&self, page: &BrandPage) -> String {
        let body = splice(&[
            sections::hero(page),
            sections::logos(page),
            sections::palette(page),
            sections::typography(page),
            sections::story(page),
            sections::mockups(page),
            sections::footer(page),
        ]);
        let css = "body.template-minimal { margin: 0; color: #1a1a1a; background: #ffffff; }\n\
                   .template-minimal section { max-width: 720px; margin: 4rem auto; padding: 0 1.5rem; }\n\
                   .template-minimal .swatches { display: flex; gap: 1rem; }\n\
                   .template-minimal .swatch { flex: 1; padding: 2rem 1rem; }";
        document(page, css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-minimal\">")
    }
}

/// Magazine-style layout with a serif-forward hierarchy.
pub struct Editorial;

impl TemplateRenderer for Editorial {
    fn id(&self) -> TemplateId {
        TemplateId::Editorial
    }

    fn render(&self, page: &BrandPage) -> String {
        let body = splice(&[
            sections::hero(page),
            sections::story(page),
            sections::logos(page),
            sections::typography(page),
            sections::palette(page),
            sections::mockups(page),
            sections::footer(page),
        ]);
        let css = "body.template-editorial { margin: 0; color: #22201d; background: #faf7f2; }\n\
                   .template-editorial .hero { padding: 8rem 2rem; text-align: center; }\n\
                   .template-editorial .hero h1 { font-size: 4rem; letter-spacing: -0.02em; }\n\
                   .template-editorial section { max-width: 880px; margin: 5rem auto; padding: 0 2rem; }\n\
                   .template-editorial .swatch { padding: 3rem 1rem; border: 1px solid #e4ded3; }";
        document(page, css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-editorial\">")
    }
}

/// Black-and-white, palette rendered as labeled bars.
pub struct Monochrome;

impl TemplateRenderer for Monochrome {
    fn id(&self) -> TemplateId {
        TemplateId::Monochrome
    }

    fn render(&self, page: &BrandPage) -> String {
        let body = splice(&[
            sections::hero(page),
            sections::typography(page),
            sections::logos(page),
            sections::story(page),
            sections::palette(page),
            sections::mockups(page),
            sections::footer(page),
        ]);
        let css = "body.template-monochrome { margin: 0; color: #f5f5f5; background: #0a0a0a; }\n\
                   .template-monochrome section { max-width: 760px; margin: 4rem auto; padding: 0 1.5rem; }\n\
                   .template-monochrome .swatch { display: flex; justify-content: space-between; padding: 1rem; }\n\
                   .template-monochrome img { filter: grayscale(1); }";
        document(page, css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-monochrome\">")
    }
}

/// Saturated gradients, palette-first ordering.
pub struct Vibrant;

impl TemplateRenderer for Vibrant {
    fn id(&self) -> TemplateId {
        TemplateId::Vibrant
    }

    fn render(&self, page: &BrandPage) -> String {
        // Lead with the first palette color as the hero backdrop.
        let hero_bg = page
            .palette
            .first()
            .and_then(|c| c.rgb_css())
            .unwrap_or_else(|| "rgb(30, 30, 30)".to_string());
        let body = splice(&[
            sections::hero(page),
            sections::palette(page),
            sections::logos(page),
            sections::mockups(page),
            sections::story(page),
            sections::typography(page),
            sections::footer(page),
        ]);
        let css = format!(
            "body.template-vibrant {{ margin: 0; color: #ffffff; background: #14121f; }}\n\
             .template-vibrant .hero {{ padding: 9rem 2rem; background: {hero_bg}; }}\n\
             .template-vibrant section {{ max-width: 820px; margin: 4rem auto; padding: 0 1.5rem; }}\n\
             .template-vibrant .swatch {{ border-radius: 1rem; padding: 2.5rem 1rem; }}"
        );
        document(page, &css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-vibrant\">")
    }
}

/// Raw borders, system-font fallback aesthetic, no rounding anywhere.
pub struct Brutalist;

impl TemplateRenderer for Brutalist {
    fn id(&self) -> TemplateId {
        TemplateId::Brutalist
    }

    fn render(&self, page: &BrandPage) -> String {
        let body = splice(&[
            sections::hero(page),
            sections::logos(page),
            sections::story(page),
            sections::palette(page),
            sections::typography(page),
            sections::mockups(page),
            sections::footer(page),
        ]);
        let css = "body.template-brutalist { margin: 0; color: #000; background: #fffef5; }\n\
                   .template-brutalist section { max-width: 720px; margin: 3rem auto; padding: 1.5rem; border: 3px solid #000; }\n\
                   .template-brutalist h1, .template-brutalist h2 { text-transform: uppercase; }\n\
                   .template-brutalist .swatch { border: 3px solid #000; padding: 1.5rem; }";
        document(page, css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-brutalist\">")
    }
}

/// Social-campaign template: the only strategy that renders the
/// social-media strategy sub-document.
pub struct Campaign;

impl TemplateRenderer for Campaign {
    fn id(&self) -> TemplateId {
        TemplateId::Campaign
    }

    fn render(&self, page: &BrandPage) -> String {
        let body = splice(&[
            sections::hero(page),
            sections::social(page),
            sections::palette(page),
            sections::logos(page),
            sections::story(page),
            sections::typography(page),
            sections::mockups(page),
            sections::footer(page),
        ]);
        let css = "body.template-campaign { margin: 0; color: #1c1b22; background: #f2f0ff; }\n\
                   .template-campaign section { max-width: 840px; margin: 4rem auto; padding: 0 1.5rem; }\n\
                   .template-campaign .pillar, .template-campaign .platform, .template-campaign .persona \
                   { background: #ffffff; border-radius: 0.75rem; padding: 1rem 1.5rem; margin: 1rem 0; }\n\
                   .template-campaign .calendar th { text-align: left; padding-right: 1rem; }";
        document(page, css, &format!("<div class=\"page\">{body}</div>"))
            .replace("<body>", "<body class=\"template-campaign\">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::page::SocialStrategy;
    use crate::brand::render::render_page;

    fn page_with_strategy() -> BrandPage {
        let mut page = BrandPage::demo();
        page.social = Some(SocialStrategy {
            goals: vec!["Grow local following".to_string()],
            voice: "Warm, unhurried".to_string(),
            ..SocialStrategy::default()
        });
        page
    }

    #[test]
    fn test_only_campaign_renders_social_strategy() {
        let mut page = page_with_strategy();

        page.template = TemplateId::Campaign;
        let html = render_page(&page);
        assert!(html.contains("class=\"social\""));
        assert!(html.contains("Grow local following"));

        page.template = TemplateId::Editorial;
        let html = render_page(&page);
        assert!(!html.contains("class=\"social\""));
        assert!(!html.contains("Grow local following"));
    }

    #[test]
    fn test_campaign_without_strategy_omits_section() {
        let mut page = BrandPage::demo();
        page.template = TemplateId::Campaign;
        page.social = None;
        let html = render_page(&page);
        assert!(!html.contains("class=\"social\""));
    }

    #[test]
    fn test_disabled_social_section_omitted_even_on_campaign() {
        let mut page = page_with_strategy();
        page.template = TemplateId::Campaign;
        page.sections.social = false;
        let html = render_page(&page);
        assert!(!html.contains("Grow local following"));
    }

    #[test]
    fn test_each_template_marks_its_body_class() {
        let mut page = BrandPage::demo();
        for (id, class) in [
            (TemplateId::Minimal, "template-minimal"),
            (TemplateId::Editorial, "template-editorial"),
            (TemplateId::Monochrome, "template-monochrome"),
            (TemplateId::Vibrant, "template-vibrant"),
            (TemplateId::Brutalist, "template-brutalist"),
            (TemplateId::Campaign, "template-campaign"),
        ] {
            page.template = id;
            let html = render_page(&page);
            assert!(html.contains(&format!("<body class=\"{class}\">")));
        }
    }

    #[test]
    fn test_vibrant_hero_uses_first_palette_color() {
        let mut page = BrandPage::demo();
        page.template = TemplateId::Vibrant;
        let html = render_page(&page);
        assert!(html.contains("rgb(244, 162, 89)"));
    }
}
