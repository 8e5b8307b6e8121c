use iced::widget::{button, column, container, text};
use iced::{Element, Length};

use marquee_core::rows::RowCard;

use crate::style;
use crate::theme::{self, ColorScheme};

/// Card width: poster + horizontal padding inside the card.
pub const CARD_WIDTH: f32 = style::POSTER_WIDTH + 2.0 * style::SPACE_SM;

/// A compact movie card for row display.
///
/// Poster art is never fetched; the poster block is a placeholder tile
/// showing the title's first character. The rating shown is whatever the
/// row decided — catalog average for feed rows, the user's own score for
/// history rows.
pub fn movie_card<'a, Message: Clone + 'static>(
    cs: &ColorScheme,
    card: &'a RowCard,
    on_open: Message,
) -> Element<'a, Message> {
    let initial = card.movie.title.chars().next().unwrap_or('?');

    let poster = container(
        text(initial.to_string())
            .size(style::TEXT_2XL)
            .color(cs.outline),
    )
    .style(theme::poster_placeholder(cs))
    .center_x(Length::Fixed(style::POSTER_WIDTH))
    .center_y(Length::Fixed(style::POSTER_HEIGHT));

    // Title clipped to 2 lines via container height.
    let title_el = container(
        text(card.movie.title.as_str())
            .size(style::TEXT_SM)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(iced::widget::text::Wrapping::WordOrGlyph),
    )
    .height(Length::Fixed(
        style::TEXT_SM * style::LINE_HEIGHT_NORMAL * 2.0 + 2.0,
    ))
    .clip(true);

    let meta = text(format!(
        "{}  \u{00B7}  \u{2605} {:.1}",
        card.movie.release_year, card.shown_rating
    ))
    .size(style::TEXT_XS)
    .color(cs.on_surface_variant)
    .line_height(style::LINE_HEIGHT_LOOSE);

    let ratings_caption = text(format!("{} ratings", card.movie.rating_number))
        .size(style::TEXT_XS)
        .color(cs.outline)
        .line_height(style::LINE_HEIGHT_LOOSE);

    let genres = text(
        card.movie
            .genres
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    )
    .size(style::TEXT_XS)
    .color(cs.outline)
    .line_height(style::LINE_HEIGHT_LOOSE);

    let card_content = column![poster, title_el, meta, ratings_caption, genres]
        .spacing(style::SPACE_XS)
        .padding(style::SPACE_SM)
        .width(Length::Fixed(CARD_WIDTH));

    let inner = container(card_content).style(theme::movie_card_style(cs));

    button(inner)
        .padding(0)
        .width(Length::Fixed(CARD_WIDTH))
        .on_press(on_open)
        .style(theme::card_button(cs))
        .into()
}
