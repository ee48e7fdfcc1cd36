use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use quest_core::content::{Feature, Icon, Platform, Testimonial};

use crate::layout::wrap_words;
use crate::theme::Theme;

/// Anything shown as an icon, a title and a short description.
pub trait CardRecord {
    fn icon(&self) -> Icon;
    fn title(&self) -> &'static str;
    fn body(&self) -> &'static str;

    /// Whether the card leads somewhere when activated.
    fn links_out(&self) -> bool {
        false
    }
}

impl CardRecord for Feature {
    fn icon(&self) -> Icon {
        self.icon
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn body(&self) -> &'static str {
        self.description
    }
}

impl CardRecord for Platform {
    fn icon(&self) -> Icon {
        self.icon
    }

    fn title(&self) -> &'static str {
        self.name
    }

    fn body(&self) -> &'static str {
        self.description
    }

    fn links_out(&self) -> bool {
        self.href.is_some()
    }
}

/// Text of a card, wrapped to `inner_width` columns.
pub fn card_lines(record: &impl CardRecord, theme: &Theme, inner_width: u16) -> Vec<Line<'static>> {
    let mut title = vec![
        Span::styled(
            format!("{} ", record.icon().glyph()),
            Style::default().fg(theme.primary),
        ),
        Span::styled(
            record.title(),
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        ),
    ];
    if record.links_out() {
        title.push(Span::styled(" ›", Style::default().fg(theme.accent)));
    }

    let mut lines = vec![Line::from(title), Line::default()];
    lines.extend(
        wrap_words(record.body(), inner_width as usize)
            .into_iter()
            .map(|text| Line::styled(text, Style::default().fg(theme.muted))),
    );
    lines
}

pub fn testimonial_lines(testimonial: &Testimonial, theme: &Theme, inner_width: u16) -> Vec<Line<'static>> {
    let stars = Icon::Star.glyph().repeat(testimonial.rating as usize);
    let mut lines = vec![
        Line::styled(stars, Style::default().fg(theme.star)),
        Line::default(),
    ];
    lines.extend(
        wrap_words(&format!("\"{}\"", testimonial.quote), inner_width as usize)
            .into_iter()
            .map(|text| {
                Line::styled(text, Style::default().fg(theme.fg1).add_modifier(Modifier::ITALIC))
            }),
    );
    lines.push(Line::default());
    lines.push(Line::styled(
        testimonial.author,
        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(testimonial.role, Style::default().fg(theme.muted)));
    lines
}
