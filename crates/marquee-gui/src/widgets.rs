pub mod movie_card;

pub use movie_card::movie_card;

use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length};

use marquee_core::rows::{Row, RowPhase};

use crate::style;
use crate::theme::{self, ColorScheme};

/// A vertical scrollable with consistent style for page bodies.
pub fn page_scroller<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}

/// A horizontal scrollable for one row of movie cards.
pub fn row_scroller<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}

/// One titled, horizontally scrolling row of movie cards.
///
/// A failed row renders the same as an empty one — row errors are
/// deliberately silent toward the user.
pub fn row_section<'a, Message: Clone + 'static>(
    cs: &'a ColorScheme,
    row_data: &'a Row,
    on_open: impl Fn(u32) -> Message + 'a,
) -> Element<'a, Message> {
    let header = text(row_data.descriptor.label.as_str())
        .size(style::TEXT_LG)
        .color(cs.on_surface)
        .line_height(style::LINE_HEIGHT_TIGHT);

    let body: Element<'a, Message> = if row_data.cards.is_empty() {
        let hint = match row_data.phase {
            RowPhase::Loading => "Loading...",
            RowPhase::Ready | RowPhase::Failed => "",
        };
        container(
            text(hint)
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_LOOSE),
        )
        .height(Length::Fixed(style::POSTER_HEIGHT / 2.0))
        .padding(style::SPACE_MD)
        .into()
    } else {
        let cards: Vec<Element<'a, Message>> = row_data
            .cards
            .iter()
            .map(|card| movie_card(cs, card, on_open(card.movie.movie_id)))
            .collect();

        row_scroller(iced::widget::row(cards).spacing(style::SPACE_SM), cs)
            .width(Length::Fill)
            .into()
    };

    column![header, body]
        .spacing(style::SPACE_SM)
        .width(Length::Fill)
        .into()
}
