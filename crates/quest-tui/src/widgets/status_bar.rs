use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use quest_core::content::Section;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(buf: &mut Buffer, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = if app.presets.reduced_motion() {
            "STATIC"
        } else {
            "MOTION"
        };

        let section_str = app.current_section().map(section_name).unwrap_or("-");
        let max = app.max_scroll();
        let percent = if max == 0 {
            100
        } else {
            app.scroll.current_scroll() as u32 * 100 / max as u32
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let focused = app
                .focused_link
                .and_then(|i| app.layout.links.get(i))
                .map(|link| format!(" | Link: {}", link.label))
                .unwrap_or_default();
            format!(" {} | {} | {}%{}", mode_str, section_str, percent, focused)
        };

        let help_hint = " q:quit j/k:scroll 1-4:sections tab:links enter:open ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let bar = Style::default().fg(theme.fg0).bg(theme.bg2);
        let line = Line::from(vec![
            Span::styled(status_text, bar),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg2)),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}

fn section_name(section: Section) -> &'static str {
    match section {
        Section::Hero => "Home",
        Section::Showcase => "Showcase",
        Section::Features => "Features",
        Section::Platforms => "Platforms",
        Section::Testimonials => "Testimonials",
        Section::Cta => "Pricing",
        Section::Footer => "Footer",
    }
}
