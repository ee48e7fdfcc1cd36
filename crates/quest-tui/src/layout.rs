//! Page geometry in terminal cells.
//!
//! The whole page is laid out as one tall column of [`PageBlock`]s in page
//! coordinates (row 0 is the top of the document). Each block remembers
//! which motion slot drives it and its index inside that slot's reveal
//! tree, so the renderer can look its style up after every dispatch.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use quest_core::content::{Href, Icon, PageContent, Section, SectionHeader};

use crate::theme::Theme;
use crate::widgets::card::{card_lines, testimonial_lines};

/// Rows covered by the fixed navbar.
pub const NAVBAR_ROWS: u16 = 3;

const MAX_COLUMN_WIDTH: u16 = 110;
const SECTION_PADDING: u16 = 4;
const GRID_GAP: u16 = 2;

/// One independently animated region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Navbar,
    /// Scroll-linked drift of the whole hero section
    Hero,
    HeroContent,
    Showcase,
    FeaturesHeader,
    FeaturesGrid,
    Platforms,
    TestimonialsHeader,
    TestimonialsGrid,
    Cta,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::Navbar,
        Slot::Hero,
        Slot::HeroContent,
        Slot::Showcase,
        Slot::FeaturesHeader,
        Slot::FeaturesGrid,
        Slot::Platforms,
        Slot::TestimonialsHeader,
        Slot::TestimonialsGrid,
        Slot::Cta,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Slot::Navbar => "navbar",
            Slot::Hero => "hero",
            Slot::HeroContent => "hero-content",
            Slot::Showcase => "showcase",
            Slot::FeaturesHeader => "features-header",
            Slot::FeaturesGrid => "features-grid",
            Slot::Platforms => "platforms",
            Slot::TestimonialsHeader => "testimonials-header",
            Slot::TestimonialsGrid => "testimonials-grid",
            Slot::Cta => "cta",
        }
    }
}

/// Decoration drawn around a block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    Plain,
    Card,
    Button,
}

#[derive(Debug, Clone)]
pub struct PageBlock {
    /// Resting position in page coordinates
    pub area: Rect,
    pub lines: Vec<Line<'static>>,
    pub chrome: Chrome,
    pub align: Alignment,
    /// Index into [`PageLayout::links`]
    pub link: Option<usize>,
    /// Reveal slot and pre-order element index
    pub reveal: Option<(Slot, usize)>,
    pub parallax: Option<Slot>,
}

/// A focusable link.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLink {
    pub label: &'static str,
    pub href: Href,
    /// `None` for links living in the fixed navbar
    pub block: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub blocks: Vec<PageBlock>,
    pub links: Vec<PageLink>,
    sections: Vec<(Section, u16)>,
    slots: Vec<(Slot, Rect)>,
}

impl PageLayout {
    /// Lay the page out for a terminal `width` columns wide whose page area
    /// shows `viewport_rows` rows.
    pub fn build(content: &PageContent, theme: &Theme, width: u16, viewport_rows: u16) -> Self {
        let mut builder = Builder::new(theme, width.max(20));
        builder.navbar(content);
        builder.hero(content, viewport_rows);
        builder.showcase();
        builder.features(content);
        builder.platforms(content);
        builder.testimonials(content);
        builder.cta(content);
        builder.footer(content);
        builder.finish()
    }

    /// First row of a section
    pub fn section_top(&self, section: Section) -> Option<u16> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, top)| *top)
    }

    /// Section containing `row`
    pub fn section_at(&self, row: u16) -> Option<Section> {
        self.sections
            .iter()
            .rev()
            .find(|(_, top)| *top <= row)
            .map(|(section, _)| *section)
    }

    /// Region a motion slot observes
    pub fn slot_area(&self, slot: Slot) -> Option<Rect> {
        self.slots
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, area)| *area)
    }

    /// Blocks driven by `slot`, with their element index
    pub fn reveal_members(&self, slot: Slot) -> impl Iterator<Item = (usize, &PageBlock)> {
        self.blocks
            .iter()
            .filter_map(move |block| match block.reveal {
                Some((s, index)) if s == slot => Some((index, block)),
                _ => None,
            })
    }
}

/// Word-wrap `text` to `width` display columns. Words longer than a line
/// are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(1);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct Builder<'t> {
    theme: &'t Theme,
    width: u16,
    /// Left edge and width of the centered content column
    col_x: u16,
    col_w: u16,
    y: u16,
    parallax: Option<Slot>,
    blocks: Vec<PageBlock>,
    links: Vec<PageLink>,
    sections: Vec<(Section, u16)>,
    slots: Vec<(Slot, Rect)>,
}

impl<'t> Builder<'t> {
    fn new(theme: &'t Theme, width: u16) -> Self {
        let col_w = width.saturating_sub(4).min(MAX_COLUMN_WIDTH).max(16);
        let col_x = width.saturating_sub(col_w) / 2;
        Self {
            theme,
            width,
            col_x,
            col_w,
            y: 0,
            parallax: None,
            blocks: Vec::new(),
            links: Vec::new(),
            sections: Vec::new(),
            slots: Vec::new(),
        }
    }

    fn finish(self) -> PageLayout {
        PageLayout {
            width: self.width,
            height: self.y,
            blocks: self.blocks,
            links: self.links,
            sections: self.sections,
            slots: self.slots,
        }
    }

    fn push(
        &mut self,
        area: Rect,
        lines: Vec<Line<'static>>,
        chrome: Chrome,
        align: Alignment,
        reveal: Option<(Slot, usize)>,
    ) -> usize {
        self.blocks.push(PageBlock {
            area,
            lines,
            chrome,
            align,
            link: None,
            reveal,
            parallax: self.parallax,
        });
        self.blocks.len() - 1
    }

    fn link(&mut self, label: &'static str, href: Href, block: Option<usize>) {
        let index = self.links.len();
        self.links.push(PageLink { label, href, block });
        if let Some(block) = block {
            self.blocks[block].link = Some(index);
        }
    }

    /// Full-column text block at the cursor
    fn text(&mut self, lines: Vec<Line<'static>>, align: Alignment, reveal: Option<(Slot, usize)>) -> usize {
        self.text_in(self.col_x, self.col_w, lines, align, reveal)
    }

    fn text_in(
        &mut self,
        x: u16,
        w: u16,
        lines: Vec<Line<'static>>,
        align: Alignment,
        reveal: Option<(Slot, usize)>,
    ) -> usize {
        let area = Rect::new(x, self.y, w, lines.len() as u16);
        self.y += area.height;
        self.push(area, lines, Chrome::Plain, align, reveal)
    }

    fn gap(&mut self, rows: u16) {
        self.y += rows;
    }

    fn slot(&mut self, slot: Slot, top: u16) {
        let area = Rect::new(self.col_x, top, self.col_w, self.y.saturating_sub(top));
        self.slots.push((slot, area));
    }

    fn section(&mut self, section: Section) {
        self.sections.push((section, self.y));
    }

    fn wrapped(&self, text: &str, width: u16, style: Style) -> Vec<Line<'static>> {
        wrap_words(text, width as usize)
            .into_iter()
            .map(|line| Line::styled(line, style))
            .collect()
    }

    fn header_lines(&self, header: &SectionHeader) -> [Vec<Line<'static>>; 3] {
        let theme = self.theme;
        let bold = Modifier::BOLD;
        let eyebrow = vec![Line::styled(
            header.eyebrow,
            Style::default().fg(theme.primary).add_modifier(bold),
        )];
        let heading = vec![
            Line::styled(header.heading, Style::default().fg(theme.fg0).add_modifier(bold)),
            Line::styled(header.highlight, Style::default().fg(theme.accent).add_modifier(bold)),
        ];
        let body = self.wrapped(header.body, self.col_w.min(72), Style::default().fg(theme.muted));
        [eyebrow, heading, body]
    }

    /// Eyebrow, heading and body as children 1..=3 of `slot`
    fn header(&mut self, header: &SectionHeader, slot: Slot) {
        let top = self.y;
        let [eyebrow, heading, body] = self.header_lines(header);
        self.text(eyebrow, Alignment::Center, Some((slot, 1)));
        self.gap(1);
        self.text(heading, Alignment::Center, Some((slot, 2)));
        self.gap(1);
        self.text(body, Alignment::Center, Some((slot, 3)));
        self.slot(slot, top);
    }

    /// Equal-width columns for a grid of `count` cards
    fn grid_columns(&self, count: usize, wide: u16, medium: u16) -> u16 {
        let cols = if self.col_w >= wide {
            3
        } else if self.col_w >= medium {
            2
        } else {
            1
        };
        cols.min(count.max(1) as u16)
    }

    /// Bordered cards in rows; child `i` of `slot` is the card at `i + 1`
    fn card_grid(&mut self, slot: Slot, cards: Vec<Vec<Line<'static>>>, cols: u16) {
        let top = self.y;
        let card_w = (self.col_w - GRID_GAP * (cols - 1)) / cols;
        for (row_index, row) in cards.chunks(cols as usize).enumerate() {
            let height = row.iter().map(Vec::len).max().unwrap_or(0) as u16 + 2;
            for (col, lines) in row.iter().enumerate() {
                let x = self.col_x + col as u16 * (card_w + GRID_GAP);
                let index = row_index * cols as usize + col + 1;
                self.push(
                    Rect::new(x, self.y, card_w, height),
                    lines.clone(),
                    Chrome::Card,
                    Alignment::Left,
                    Some((slot, index)),
                );
            }
            self.y += height + 1;
        }
        self.y = self.y.saturating_sub(1);
        self.slot(slot, top);
    }

    fn navbar(&mut self, content: &PageContent) {
        // the navbar floats over the page; only its action link and slot
        // live in the layout
        self.slots.push((Slot::Navbar, Rect::new(0, 0, self.width, NAVBAR_ROWS)));
        self.link(content.nav_action.label, content.nav_action.href, None);
    }

    fn hero(&mut self, content: &PageContent, viewport_rows: u16) {
        let theme = self.theme;
        let hero = &content.hero;
        let slot = Slot::HeroContent;
        let section_top = self.y;
        self.section(Section::Hero);
        self.parallax = Some(Slot::Hero);
        self.gap(NAVBAR_ROWS + 2);
        let top = self.y;

        let badge = vec![Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.success)),
            Span::styled(hero.badge, Style::default().fg(theme.fg1)),
        ])];
        self.text(badge, Alignment::Center, Some((slot, 1)));
        self.gap(1);

        let bold = Modifier::BOLD;
        let heading = vec![
            Line::styled(hero.heading, Style::default().fg(theme.fg0).add_modifier(bold)),
            Line::styled(hero.highlight, Style::default().fg(theme.primary).add_modifier(bold)),
        ];
        self.text(heading, Alignment::Center, Some((slot, 2)));
        self.gap(1);

        let tagline = self.wrapped(hero.tagline, self.col_w.min(72), Style::default().fg(theme.muted));
        self.text(tagline, Alignment::Center, Some((slot, 3)));
        self.gap(1);

        // two buttons side by side, sharing one reveal element
        let primary = format!("{} →", hero.primary.label);
        let secondary = format!("▶ {}", hero.secondary.label);
        let pw = primary.width() as u16 + 4;
        let sw = secondary.width() as u16 + 4;
        let total = pw + 2 + sw;
        let x = self.col_x + self.col_w.saturating_sub(total) / 2;
        let primary_block = self.push(
            Rect::new(x, self.y, pw, 3),
            vec![Line::styled(primary, Style::default().fg(theme.fg0).add_modifier(bold))],
            Chrome::Button,
            Alignment::Center,
            Some((slot, 4)),
        );
        let secondary_block = self.push(
            Rect::new(x + pw + 2, self.y, sw, 3),
            vec![Line::styled(secondary, Style::default().fg(theme.fg1))],
            Chrome::Button,
            Alignment::Center,
            Some((slot, 4)),
        );
        self.link(hero.primary.label, hero.primary.href, Some(primary_block));
        self.link(hero.secondary.label, hero.secondary.href, Some(secondary_block));
        self.y += 3;
        self.gap(1);

        let chips: Vec<String> = hero
            .downloads
            .iter()
            .map(|d| format!("[ {} ]", d.store))
            .collect();
        let mut downloads = vec![Line::styled(hero.download_caption, Style::default().fg(theme.muted))];
        downloads.extend(self.wrapped(&chips.join("  "), self.col_w, Style::default().fg(theme.fg1)));
        self.text(downloads, Alignment::Center, Some((slot, 5)));
        self.gap(1);

        let bullets: Vec<String> = hero
            .bullets
            .iter()
            .map(|b| format!("{} {}", Icon::Check.glyph(), b))
            .collect();
        let bullets = self.wrapped(&bullets.join("   "), self.col_w, Style::default().fg(theme.success));
        self.text(bullets, Alignment::Center, Some((slot, 6)));
        self.slot(slot, top);

        self.gap(2);
        let min_bottom = section_top + viewport_rows;
        self.y = self.y.max(min_bottom);
        self.slot(Slot::Hero, section_top);
        self.parallax = None;
    }

    fn showcase(&mut self) {
        self.section(Section::Showcase);
        self.gap(1);
        let art = device_art(self.col_w);
        let style = Style::default().fg(self.theme.fg1);
        let lines = art.into_iter().map(|line| Line::styled(line, style)).collect();
        let top = self.y;
        self.text(lines, Alignment::Center, Some((Slot::Showcase, 0)));
        self.slot(Slot::Showcase, top);
        self.gap(SECTION_PADDING);
    }

    fn features(&mut self, content: &PageContent) {
        self.section(Section::Features);
        self.gap(SECTION_PADDING);
        self.header(&content.features_header, Slot::FeaturesHeader);
        self.gap(3);

        let cols = self.grid_columns(content.features.len(), 90, 56);
        let inner = (self.col_w - GRID_GAP * (cols - 1)) / cols - 4;
        let cards = content
            .features
            .iter()
            .map(|feature| card_lines(feature, self.theme, inner))
            .collect();
        self.card_grid(Slot::FeaturesGrid, cards, cols);
        self.gap(SECTION_PADDING);
    }

    fn platforms(&mut self, content: &PageContent) {
        let theme = self.theme;
        let slot = Slot::Platforms;
        self.section(Section::Platforms);
        self.gap(SECTION_PADDING);
        let top = self.y;

        let two_columns = self.col_w >= 100;
        let (text_x, text_w) = if two_columns {
            (self.col_x, (self.col_w - 4) / 2)
        } else {
            (self.col_x, self.col_w)
        };

        let [eyebrow, heading, _] = self.header_lines(&content.platforms_header);
        let body = self.wrapped(content.platforms_header.body, text_w, Style::default().fg(theme.muted));
        self.text_in(text_x, text_w, eyebrow, Alignment::Left, Some((slot, 1)));
        self.gap(1);
        self.text_in(text_x, text_w, heading, Alignment::Left, Some((slot, 2)));
        self.gap(1);
        self.text_in(text_x, text_w, body, Alignment::Left, Some((slot, 3)));
        self.gap(1);

        // element 4 is the nested list container; its items follow in pre-order
        for (i, platform) in content.platforms.iter().enumerate() {
            let lines = card_lines(platform, theme, text_w.saturating_sub(4));
            let area = Rect::new(text_x, self.y, text_w, lines.len() as u16 + 2);
            self.y += area.height;
            let block = self.push(area, lines, Chrome::Card, Alignment::Left, Some((slot, 5 + i)));
            if let Some(href) = platform.href {
                self.link(platform.name, href, Some(block));
            }
        }
        let list_bottom = self.y;

        let panel_index = 5 + content.platforms.len();
        let (panel_x, panel_w, panel_y) = if two_columns {
            (self.col_x + text_w + 4, self.col_w - text_w - 4, top)
        } else {
            self.gap(2);
            (self.col_x, self.col_w, self.y)
        };
        let art: Vec<Line<'static>> = device_art(panel_w.saturating_sub(4))
            .into_iter()
            .map(|line| Line::styled(line, Style::default().fg(theme.fg1)))
            .collect();
        let panel = Rect::new(panel_x, panel_y, panel_w, art.len() as u16 + 2);
        self.push(panel, art, Chrome::Card, Alignment::Center, Some((slot, panel_index)));

        self.y = list_bottom.max(panel.bottom());
        self.slot(slot, top);
        self.gap(SECTION_PADDING);
    }

    fn testimonials(&mut self, content: &PageContent) {
        self.section(Section::Testimonials);
        self.gap(SECTION_PADDING);
        self.header(&content.testimonials_header, Slot::TestimonialsHeader);
        self.gap(3);

        // quotes are too long for two columns; go straight from one to three
        let cols = self.grid_columns(content.testimonials.len(), 90, u16::MAX);
        let inner = (self.col_w - GRID_GAP * (cols - 1)) / cols - 4;
        let cards = content
            .testimonials
            .iter()
            .map(|t| testimonial_lines(t, self.theme, inner))
            .collect();
        self.card_grid(Slot::TestimonialsGrid, cards, cols);
        self.gap(SECTION_PADDING);
    }

    fn cta(&mut self, content: &PageContent) {
        let theme = self.theme;
        let slot = Slot::Cta;
        let cta = &content.cta;
        self.section(Section::Cta);
        self.gap(SECTION_PADDING);
        let top = self.y;

        let card_w = self.col_w.min(80);
        let card_x = self.col_x + (self.col_w - card_w) / 2;
        let inner_x = card_x + 2;
        let inner_w = card_w - 4;

        // card frame first so its content draws on top
        let card = self.push(
            Rect::new(card_x, top, card_w, 0),
            Vec::new(),
            Chrome::Card,
            Alignment::Center,
            Some((slot, 1)),
        );
        self.gap(2);

        let bold = Modifier::BOLD;
        let heading = vec![
            Line::styled(cta.heading, Style::default().fg(theme.fg0).add_modifier(bold)),
            Line::styled(cta.highlight, Style::default().fg(theme.accent).add_modifier(bold)),
        ];
        self.text_in(inner_x, inner_w, heading, Alignment::Center, Some((slot, 2)));
        self.gap(1);
        let body = self.wrapped(cta.body, inner_w.min(60), Style::default().fg(theme.muted));
        self.text_in(inner_x, inner_w, body, Alignment::Center, Some((slot, 3)));
        self.gap(1);

        let label = format!("{} →", cta.button.label);
        let bw = label.width() as u16 + 4;
        let button = self.push(
            Rect::new(card_x + (card_w.saturating_sub(bw)) / 2, self.y, bw, 3),
            vec![Line::styled(label, Style::default().fg(theme.fg0).add_modifier(bold))],
            Chrome::Button,
            Alignment::Center,
            Some((slot, 4)),
        );
        self.link(cta.button.label, cta.button.href, Some(button));
        self.y += 3;
        self.gap(1);

        let footnote = vec![Line::styled(cta.footnote, Style::default().fg(theme.muted))];
        self.text_in(inner_x, inner_w, footnote, Alignment::Center, Some((slot, 5)));
        self.gap(2);

        self.blocks[card].area.height = self.y - top;
        self.slot(slot, top);
        self.gap(SECTION_PADDING);
    }

    fn footer(&mut self, content: &PageContent) {
        let theme = self.theme;
        self.section(Section::Footer);
        let rule = vec![Line::styled(
            "─".repeat(self.col_w as usize),
            Style::default().fg(theme.border),
        )];
        self.text(rule, Alignment::Left, None);
        self.gap(1);

        let links: Vec<&str> = content.footer.links.iter().map(|link| link.label).collect();
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", Icon::Target.glyph()),
                    Style::default().fg(theme.primary),
                ),
                Span::styled(content.brand, Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)),
            ]),
            Line::styled(links.join("   "), Style::default().fg(theme.muted)),
            Line::styled(content.footer.copyright, Style::default().fg(theme.muted)),
        ];
        self.text(lines, Alignment::Center, None);
        self.gap(1);
    }
}

/// Boxed sketches of the app on tablet, phone and desktop. Only the phone
/// is drawn when there is no room for all three.
fn device_art(width: u16) -> Vec<String> {
    let tablet = framed(&["☰ Today", "✓ Plan the day", "↻ Morning run", "◷ Deep work"], 18);
    let phone = framed(&["◷ 25:00", "Focus", "", "▶ Start"], 10);
    let desktop = framed(&["▥ This week", "▇▇▆▅▆▇▃", "Tasks 24", "Habits 9"], 22);

    let gap = "   ";
    let full = tablet[0].width() + phone[0].width() + desktop[0].width() + 2 * gap.len();
    if full <= width as usize {
        (0..phone.len())
            .map(|i| format!("{}{}{}{}{}", tablet[i], gap, phone[i], gap, desktop[i]))
            .collect()
    } else {
        phone
    }
}

fn framed(rows: &[&str], inner: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format!("╭{}╮", "─".repeat(inner + 2)));
    for row in rows {
        let pad = inner.saturating_sub(row.width());
        out.push(format!("│ {}{} │", row, " ".repeat(pad)));
    }
    out.push(format!("╰{}╯", "─".repeat(inner + 2)));
    out
}
