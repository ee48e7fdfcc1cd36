use anyhow::Result;

use quest_core::content::{self, Href, PageContent, SectionHeader};

pub fn run(json: bool) -> Result<()> {
    let page = content::page();
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        print!("{}", render(page));
    }
    Ok(())
}

fn href_label(href: Href) -> String {
    match href {
        Href::WebApp => "web app".to_string(),
        Href::Anchor(section) => format!("#{}", section.anchor().unwrap_or("top")),
        Href::Placeholder => "-".to_string(),
    }
}

fn header(out: &mut String, header: &SectionHeader) {
    out.push_str(&format!("\n== {} ==\n", header.eyebrow));
    out.push_str(&format!("{} {}\n", header.heading, header.highlight));
    out.push_str(&format!("{}\n\n", header.body));
}

fn render(page: &PageContent) -> String {
    let mut out = String::new();
    let nav: Vec<String> = page
        .nav
        .iter()
        .map(|link| format!("{} ({})", link.label, href_label(link.href)))
        .collect();
    out.push_str(&format!("{} | {}\n", page.brand, nav.join(" | ")));

    let hero = &page.hero;
    out.push_str(&format!("\n{}\n{} {}\n{}\n", hero.badge, hero.heading, hero.highlight, hero.tagline));
    for download in hero.downloads {
        out.push_str(&format!("  - {} {}\n", download.caption, download.store));
    }

    header(&mut out, &page.features_header);
    for feature in page.features {
        out.push_str(&format!("  {} {}: {}\n", feature.icon.glyph(), feature.title, feature.description));
    }

    header(&mut out, &page.platforms_header);
    for platform in page.platforms {
        let link = platform
            .href
            .map(|href| format!(" [{}]", href_label(href)))
            .unwrap_or_default();
        out.push_str(&format!("  {} {}{}: {}\n", platform.icon.glyph(), platform.name, link, platform.description));
    }

    header(&mut out, &page.testimonials_header);
    for t in page.testimonials {
        out.push_str(&format!("  {} \"{}\"\n    {}, {}\n", "★".repeat(t.rating as usize), t.quote, t.author, t.role));
    }

    let cta = &page.cta;
    out.push_str(&format!(
        "\n{} {}\n{}\n[{}] {}\n",
        cta.heading, cta.highlight, cta.body, cta.button.label, cta.footnote
    ));

    let footer: Vec<&str> = page.footer.links.iter().map(|link| link.label).collect();
    out.push_str(&format!("\n{}\n{}\n", footer.join(" · "), page.footer.copyright));
    out
}
