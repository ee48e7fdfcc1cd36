use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use quest_core::motion::StyleValues;

use crate::layout::{Chrome, PageBlock, PageLayout};
use crate::motion::{MotionStyles, RowScale};
use crate::theme::Theme;

/// Below this opacity a block is not drawn at all
const MIN_VISIBLE_OPACITY: f64 = 0.02;

/// Renders the whole document with motion applied.
pub struct PageWidget<'a> {
    pub layout: &'a PageLayout,
    pub styles: &'a MotionStyles,
    pub theme: &'a Theme,
    pub scale: RowScale,
    pub focused_link: Option<usize>,
}

impl PageWidget<'_> {
    /// Draw every block into a buffer as tall as the page.
    pub fn render_page(&self) -> Buffer {
        let area = Rect::new(0, 0, self.layout.width, self.layout.height);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(self.theme.bg0).fg(self.theme.fg1));

        for block in &self.layout.blocks {
            let style = self.styles.block(block);
            if style.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let Some(rect) = transformed(block.area, style, self.scale, area) else {
                continue;
            };
            let focused = block.link.is_some() && block.link == self.focused_link;
            self.render_block(block, rect, focused, &mut buf);
            if style.opacity < 1.0 {
                fade_area(&mut buf, rect, self.theme, style.opacity);
            }
        }
        buf
    }

    fn render_block(&self, block: &PageBlock, rect: Rect, focused: bool, buf: &mut Buffer) {
        let theme = self.theme;
        let border_color = if focused {
            theme.focus
        } else {
            match block.chrome {
                Chrome::Button => theme.primary,
                _ => theme.border,
            }
        };
        let mut border_style = Style::default().fg(border_color);
        if focused {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        let frame = match block.chrome {
            Chrome::Plain => None,
            Chrome::Card => Some(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .style(Style::default().bg(theme.bg1))
                    .padding(ratatui::widgets::Padding::horizontal(1)),
            ),
            Chrome::Button => Some(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
                    .border_style(border_style)
                    .style(Style::default().bg(theme.bg2)),
            ),
        };

        let mut paragraph = Paragraph::new(block.lines.clone()).alignment(block.align);
        if let Some(frame) = frame {
            paragraph = paragraph.block(frame);
        }
        paragraph.render(rect, buf);
    }
}

/// Where a block lands once translated and scaled, clipped to `bounds`.
pub fn transformed(area: Rect, style: StyleValues, scale: RowScale, bounds: Rect) -> Option<Rect> {
    let dy = scale.to_rows(style.translate_y);
    let y = area.y as i32 + dy;

    let s = style.scale.clamp(0.0, 1.0);
    let width = ((area.width as f64) * s).round() as i32;
    let height = ((area.height as f64) * s).round().max(1.0) as i32;
    let x = area.x as i32 + (area.width as i32 - width) / 2;
    let y = y + (area.height as i32 - height) / 2;

    if width <= 0 || y + height <= 0 {
        return None;
    }
    let top = y.max(0);
    let rect = Rect::new(
        x.max(0) as u16,
        top.min(u16::MAX as i32) as u16,
        width as u16,
        (y + height - top).min(u16::MAX as i32) as u16,
    );
    let clipped = rect.intersection(bounds);
    (!clipped.is_empty()).then_some(clipped)
}

/// Blend every cell in `area` towards the page background.
pub(crate) fn fade_area(buf: &mut Buffer, area: Rect, theme: &Theme, opacity: f64) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = resolve(cell.fg, theme.fg1);
                let bg = resolve(cell.bg, theme.bg0);
                cell.set_fg(theme.fade(fg, opacity));
                cell.set_bg(theme.fade(bg, opacity));
            }
        }
    }
}

fn resolve(color: Color, fallback: Color) -> Color {
    match color {
        Color::Reset => fallback,
        other => other,
    }
}

/// Copy rows `scroll..scroll + area.height` of `page` into `area` of `buf`.
pub fn blit(page: &Buffer, scroll: u16, buf: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        let page_y = scroll.saturating_add(row);
        if page_y >= page.area.bottom() {
            break;
        }
        for col in 0..area.width.min(page.area.width) {
            let (Some(src), Some(dst)) = (
                page.cell((col, page_y)),
                buf.cell_mut((area.x + col, area.y + row)),
            ) else {
                continue;
            };
            *dst = src.clone();
        }
    }
}
