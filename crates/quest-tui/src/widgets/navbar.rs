use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use quest_core::content::{Href, Icon};

use crate::app::App;
use crate::layout::{Slot, NAVBAR_ROWS};
use crate::widgets::page::{fade_area, transformed};

/// Fixed bar across the top of the page.
pub struct NavbarWidget;

impl NavbarWidget {
    pub fn render(buf: &mut Buffer, area: Rect, app: &App) {
        let style = app.styles.root(Slot::Navbar);
        if style.opacity < 0.02 {
            return;
        }
        let bar = Rect::new(area.x, area.y, area.width, NAVBAR_ROWS.min(area.height));
        let Some(bar) = transformed(bar, style, app.scale, area) else {
            return;
        };

        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(bar);
        block.render(bar, buf);

        let left = Self::left_spans(app, inner.width);
        let right = Self::action_spans(app);
        let right_width: usize = right.iter().map(|span| span.content.width()).sum();
        let left_width: usize = left.iter().map(|span| span.content.width()).sum();
        let pad = (inner.width as usize).saturating_sub(left_width + right_width);

        let mut spans = left;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.extend(right);
        Paragraph::new(Line::from(spans)).render(inner, buf);

        if style.opacity < 1.0 {
            fade_area(buf, bar, theme, style.opacity);
        }
    }

    /// Brand plus the section links, dropped when the bar is too narrow
    fn left_spans(app: &App, width: u16) -> Vec<Span<'static>> {
        let theme = &app.theme;
        let mut spans = vec![
            Span::styled(format!(" {} ", Icon::Target.glyph()), Style::default().fg(theme.primary)),
            Span::styled(
                app.content.brand,
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];

        let current = app.current_section();
        let mut links = Vec::new();
        for (i, link) in app.content.nav.iter().enumerate() {
            let active = matches!(link.href, Href::Anchor(section) if Some(section) == current);
            let label_style = if active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            links.push(Span::styled(format!("{}", i + 1), Style::default().fg(theme.muted)));
            links.push(Span::styled(format!(" {}  ", link.label), label_style));
        }

        let used: usize = spans
            .iter()
            .chain(links.iter())
            .map(|span| span.content.width())
            .sum();
        if used + 18 <= width as usize {
            spans.extend(links);
        }
        spans
    }

    fn action_spans(app: &App) -> Vec<Span<'static>> {
        let theme = &app.theme;
        let Some(index) = app.layout.links.iter().position(|link| link.block.is_none()) else {
            return Vec::new();
        };
        let link = &app.layout.links[index];
        let style = if app.focused_link == Some(index) {
            Style::default()
                .fg(theme.bg0)
                .bg(theme.focus)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(theme.fg0)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD)
        };
        vec![Span::styled(format!(" {} ", link.label), style), Span::raw(" ")]
    }
}
