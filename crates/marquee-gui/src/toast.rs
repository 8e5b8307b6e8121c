use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use marquee_core::notify::{Notice, Severity};

use crate::style;
use crate::theme::{self, ColorScheme};

/// Render the notification overlay — a column of notices anchored
/// top-right, oldest at the top. Fading notices stay in place at reduced
/// opacity until the center detaches them.
pub fn notice_overlay<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    notices: &'a [Notice],
    on_dismiss: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message> {
    if notices.is_empty() {
        return iced::widget::Space::new().width(0).height(0).into();
    }

    let mut notice_column = column![]
        .spacing(style::SPACE_SM)
        .width(Length::Fixed(style::TOAST_WIDTH));

    for notice in notices {
        let (icon, accent) = match notice.severity {
            Severity::Success => (lucide_icons::iced::icon_circle_check(), cs.success),
            Severity::Error => (lucide_icons::iced::icon_circle_x(), cs.error),
            Severity::Warning => (lucide_icons::iced::icon_info(), cs.warning),
            Severity::Info => (lucide_icons::iced::icon_info(), cs.primary),
        };

        let dismiss_msg = on_dismiss(notice.id);

        let notice_card = container(
            row![
                icon.size(style::TEXT_LG).color(accent),
                text(notice.message.as_str())
                    .size(style::TEXT_SM)
                    .line_height(style::LINE_HEIGHT_NORMAL)
                    .width(Length::Fill),
                button(
                    lucide_icons::iced::icon_x()
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                )
                .on_press(dismiss_msg)
                .padding(style::SPACE_XXS)
                .style(theme::icon_button(cs)),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::toast_card(cs, notice.is_fading()))
        .padding([style::SPACE_SM, style::SPACE_MD])
        .width(Length::Fill);

        notice_column = notice_column.push(notice_card);
    }

    // Sits just below the top bar so the selectors stay clickable.
    container(notice_column)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding(
            iced::Padding::new(0.0)
                .top(style::SPACE_2XL + style::SPACE_XL)
                .right(style::SPACE_XL),
        )
        .into()
}
