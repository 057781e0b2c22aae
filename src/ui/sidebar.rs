use campaign_timeline::model::Board;
use campaign_timeline::timeline::TimelineLayout;
use egui::{Align2, Painter, Pos2, Rect, Rounding, Stroke, Vec2};
use egui_phosphor::regular as icons;
use uuid::Uuid;

use crate::ui::theme;

/// Room reserved under the last lane for the "add swimlane" button.
pub const ADD_BUTTON_SPACE: f32 = 40.0;

const ICON_SIZE: f32 = 18.0;
const ICON_MARGIN: f32 = 6.0;
const GRIP_WIDTH: f32 = 18.0;

/// What a press inside the sidebar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarPress {
    Label(Uuid),
    Rename(Uuid),
    Delete(Uuid),
    Add,
    Nothing,
}

fn delete_rect(width: f32, top: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(width - ICON_SIZE - ICON_MARGIN, top + ICON_MARGIN),
        Vec2::splat(ICON_SIZE),
    )
}

fn rename_rect(width: f32, top: f32) -> Rect {
    delete_rect(width, top).translate(Vec2::new(-(ICON_SIZE + 4.0), 0.0))
}

fn add_rect(width: f32, lanes_height: f32) -> Rect {
    Rect::from_min_max(
        Pos2::new(8.0, lanes_height + 8.0),
        Pos2::new(width - 8.0, lanes_height + ADD_BUTTON_SPACE - 8.0),
    )
}

/// Resolve a press given in sidebar-local coordinates (x from the sidebar's
/// left edge, y from the top of the first lane).
pub fn hit_test(local: Pos2, layout: &TimelineLayout, width: f32) -> SidebarPress {
    if add_rect(width, layout.total_height()).contains(local) {
        return SidebarPress::Add;
    }
    let Some(band) = layout.bands.iter().find(|b| b.contains(local.y)) else {
        return SidebarPress::Nothing;
    };
    if delete_rect(width, band.top).contains(local) {
        SidebarPress::Delete(band.swimlane_id)
    } else if rename_rect(width, band.top).contains(local) {
        SidebarPress::Rename(band.swimlane_id)
    } else {
        SidebarPress::Label(band.swimlane_id)
    }
}

/// Sticky lane sidebar: name, grip, budget usage and lane actions.
#[allow(clippy::too_many_arguments)]
pub fn draw_sidebar(
    painter: &Painter,
    board: &Board,
    layout: &TimelineLayout,
    lanes_top: f32,
    left: f32,
    width: f32,
    header_top: f32,
    read_only: bool,
) {
    let bottom = lanes_top + layout.total_height() + ADD_BUTTON_SPACE;
    let panel = Rect::from_min_max(Pos2::new(left, lanes_top), Pos2::new(left + width, bottom));
    painter.rect_filled(panel, 0.0, theme::BG_PANEL);

    for (i, band) in layout.bands.iter().enumerate() {
        let row = Rect::from_min_size(
            Pos2::new(left, lanes_top + band.top),
            Vec2::new(width, band.height),
        );
        let fill = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_LANE_ALT };
        painter.rect_filled(row, 0.0, fill);
        painter.line_segment(
            [row.left_bottom(), row.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        let Some(lane) = board.swimlane(band.swimlane_id) else {
            continue;
        };
        let text_y = row.top() + 15.0;
        let clipped = painter.with_clip_rect(row);

        if !read_only {
            clipped.text(
                Pos2::new(row.left() + 4.0, text_y),
                Align2::LEFT_CENTER,
                icons::DOTS_SIX_VERTICAL,
                theme::font_icon(),
                theme::TEXT_DIM,
            );
        }
        let name_right = if read_only { row.right() - 6.0 } else { row.left() + rename_rect(width, band.top).left() - 4.0 };
        painter
            .with_clip_rect(Rect::from_min_max(row.min, Pos2::new(name_right, row.bottom())))
            .text(
                Pos2::new(row.left() + GRIP_WIDTH + 4.0, text_y),
                Align2::LEFT_CENTER,
                &lane.name,
                theme::font_lane(),
                theme::TEXT_PRIMARY,
            );

        if !read_only {
            let offset = Vec2::new(left, lanes_top);
            for (rect, glyph, color) in [
                (rename_rect(width, band.top), icons::PENCIL_SIMPLE, theme::TEXT_SECONDARY),
                (delete_rect(width, band.top), icons::TRASH, theme::DANGER),
            ] {
                clipped.text(
                    rect.translate(offset).center(),
                    Align2::CENTER_CENTER,
                    glyph,
                    theme::font_icon(),
                    color,
                );
            }
        }

        if let Some(usage) = lane.budget_usage(&board.activities) {
            let track = Rect::from_min_size(
                Pos2::new(row.left() + GRIP_WIDTH + 4.0, row.top() + 28.0),
                Vec2::new(width - GRIP_WIDTH - 16.0, 4.0),
            );
            if track.bottom() < row.bottom() {
                clipped.rect_filled(track, Rounding::same(2.0), theme::BUDGET_TRACK);
                let mut fill = track;
                fill.set_width(track.width() * usage.fill_fraction());
                let color = if usage.is_over() { theme::DANGER } else { theme::ACCENT };
                clipped.rect_filled(fill, Rounding::same(2.0), color);
                clipped.text(
                    Pos2::new(track.left(), track.bottom() + 7.0),
                    Align2::LEFT_CENTER,
                    format!("{:.0} / {:.0}", usage.spent, usage.budget),
                    theme::font_small(),
                    theme::TEXT_DIM,
                );
            }
        }
    }

    if !read_only {
        let add = add_rect(width, layout.total_height()).translate(Vec2::new(left, lanes_top));
        painter.rect_stroke(add, Rounding::same(4.0), Stroke::new(1.0, theme::BORDER_SUBTLE));
        painter.text(
            add.center(),
            Align2::CENTER_CENTER,
            format!("{} Add swimlane", icons::PLUS),
            theme::font_menu(),
            theme::TEXT_SECONDARY,
        );
    }

    painter.line_segment(
        [Pos2::new(left + width, lanes_top), Pos2::new(left + width, bottom)],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Corner cell above the lane names stays put on both scroll axes.
    let corner = Rect::from_min_size(Pos2::new(left, header_top), Vec2::new(width, theme::HEADER_HEIGHT));
    painter.rect_filled(corner, 0.0, theme::BG_HEADER);
    painter.text(
        Pos2::new(corner.left() + 10.0, corner.center().y),
        Align2::LEFT_CENTER,
        "Swimlanes",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );
    painter.line_segment(
        [corner.left_bottom(), corner.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}
